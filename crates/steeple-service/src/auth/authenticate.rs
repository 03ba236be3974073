use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use salvo::http::header::AUTHORIZATION;

use steeple_core::config::{AuthMethod, Settings};
use steeple_db::model::user::AdminIdentity;
use steeple_db::store::DocumentStore;

use super::account::verify_credentials;
use crate::error::{ServiceError, ServiceResult};

/// The configured administrator, used for every request in single-user mode.
fn authenticate_single_user(config: &Settings) -> ServiceResult<AdminIdentity> {
    tracing::debug!("Authenticating single user");

    let single_user = config
        .auth
        .single_user
        .as_ref()
        .ok_or(ServiceError::InvalidConfiguration(
            "Single user config is missing".to_string(),
        ))?;

    Ok(AdminIdentity {
        user_id: None,
        name: single_user.name.clone(),
        email: single_user.email.clone(),
    })
}

/// ## Summary
/// Splits an `Authorization: Basic` header into email and password.
///
/// ## Errors
/// Returns `NotAuthenticated` if the header is missing or malformed.
pub fn parse_basic_credentials(header: Option<&str>) -> ServiceResult<(String, String)> {
    let encoded = header
        .and_then(|value| {
            value
                .split_once(' ')
                .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("basic"))
        })
        .map(|(_, credentials)| credentials.trim())
        .ok_or(ServiceError::NotAuthenticated)?;

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_e| ServiceError::NotAuthenticated)?;
    let decoded = String::from_utf8(decoded).map_err(|_e| ServiceError::NotAuthenticated)?;

    decoded
        .split_once(':')
        .map(|(email, password)| (email.to_string(), password.to_string()))
        .ok_or(ServiceError::NotAuthenticated)
}

#[tracing::instrument(skip(req, store))]
async fn authenticate_basic(
    req: &salvo::Request,
    store: &dyn DocumentStore,
) -> ServiceResult<AdminIdentity> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let (email, password) = parse_basic_credentials(header)?;

    verify_credentials(store, &email, &password).await
}

/// ## Summary
/// Authenticate an administrator based on the configured authentication method.
///
/// ## Errors
/// Returns `NotAuthenticated` if credentials are missing or wrong.
#[tracing::instrument(skip(req, store, config))]
pub async fn authenticate(
    req: &salvo::Request,
    store: &dyn DocumentStore,
    config: &Settings,
) -> ServiceResult<AdminIdentity> {
    tracing::trace!(auth_method = ?config.auth.method, "Authenticating request");

    match config.auth.method {
        AuthMethod::SingleUser => authenticate_single_user(config),
        AuthMethod::BasicAuth => authenticate_basic(req, store).await,
    }
}
