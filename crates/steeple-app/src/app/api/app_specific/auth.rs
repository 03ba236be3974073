use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::{Deserialize, Serialize};

use steeple_db::model::user::AdminIdentity;
use steeple_service::auth::account::{Enrollment, has_admins, register_admin, verify_credentials};
use steeple_service::auth::authenticate;

use crate::config::get_config_from_depot;
use crate::context::get_context_from_depot;
use crate::error::AppResult;

/// ## Summary
/// Registration request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// ## Summary
/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// ## Summary
/// Login response payload
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub admin: AdminIdentity,
    pub message: String,
}

/// ## Summary
/// POST /app/auth/register - Create an administrator account.
///
/// The first account can be created by anyone. Once one exists, the caller
/// must authenticate as an administrator.
///
/// ## Side Effects
/// Creates an `adminUsers` document with an Argon2 password hash.
///
/// ## Errors
/// Returns HTTP 400 for invalid input, 401 when an existing administrator must
/// authenticate first, and 409 if the email is already registered.
#[handler]
async fn register_handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> AppResult<Json<AdminIdentity>> {
    tracing::debug!("Processing administrator registration request");

    let context = get_context_from_depot(depot)?;
    let enrollment = if has_admins(context.store()).await? {
        let config = get_config_from_depot(depot)?;
        let admin = authenticate(req, context.store(), &config).await?;
        tracing::debug!(registered_by = %admin.email, "Registration authorised");
        Enrollment::Invited
    } else {
        Enrollment::Bootstrap
    };

    let register_req: RegisterRequest = req.parse_json().await?;
    let identity = register_admin(
        context.store(),
        enrollment,
        &register_req.name,
        &register_req.email,
        &register_req.password,
    )
    .await?;

    res.status_code(StatusCode::CREATED);
    Ok(Json(identity))
}

/// ## Summary
/// POST /app/auth/login - Check an administrator's email and password.
///
/// ## Errors
/// Returns HTTP 401 if the credentials do not match.
#[handler]
async fn login_handler(req: &mut Request, depot: &mut Depot) -> AppResult<Json<LoginResponse>> {
    let login_req: LoginRequest = req.parse_json().await?;
    let context = get_context_from_depot(depot)?;

    let admin = verify_credentials(context.store(), &login_req.email, &login_req.password).await?;
    tracing::info!(admin_email = %admin.email, "Administrator logged in");

    Ok(Json(LoginResponse {
        success: true,
        message: format!("Welcome back, {}", admin.name),
        admin,
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("auth")
        .push(Router::with_path("register").post(register_handler))
        .push(Router::with_path("login").post(login_handler))
}
