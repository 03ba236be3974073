use salvo::Depot;
use salvo::http::header::WWW_AUTHENTICATE;

use steeple_service::auth::{authenticate, depot_keys};
use steeple_service::error::ServiceError;

use crate::config::{AuthMethod, get_config_from_depot};
use crate::context::get_context_from_depot;
use crate::error::AppError;

/// Challenge sent with 401 responses when HTTP Basic is configured.
const BASIC_CHALLENGE: &str = r#"Basic realm="steeple", charset="UTF-8""#;

/// ## Summary
/// Middleware that authenticates the administrator and stores the identity in the depot.
/// Use this as a hoop on every router that needs an administrator.
///
/// ## Side Effects
/// Inserts the authenticated administrator into the depot under
/// `depot_keys::AUTHENTICATED_ADMIN` for downstream handlers.
///
/// ## Errors
/// Responds 401 and stops the chain if authentication fails.
pub struct AuthMiddleware;

#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        tracing::trace!("Authenticating request");

        let (config, context) = match (get_config_from_depot(depot), get_context_from_depot(depot)) {
            (Ok(config), Ok(context)) => (config, context),
            (Err(e), _) | (_, Err(e)) => {
                e.render(res);
                ctrl.skip_rest();
                return;
            }
        };

        match authenticate(req, context.store(), &config).await {
            Ok(admin) => {
                tracing::debug!(admin_email = %admin.email, "Administrator authenticated");
                depot.insert(depot_keys::AUTHENTICATED_ADMIN, admin);
            }
            Err(err) => {
                if matches!(err, ServiceError::NotAuthenticated)
                    && matches!(config.auth.method, AuthMethod::BasicAuth)
                    && res.add_header(WWW_AUTHENTICATE, BASIC_CHALLENGE, true).is_err()
                {
                    tracing::warn!("Failed to set authentication challenge header");
                }
                AppError::from(err).render(res);
                ctrl.skip_rest();
            }
        }
    }
}
