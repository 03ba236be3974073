use steeple_db::error::DbError;
use steeple_db::model::Document;
use steeple_db::model::user::{AdminIdentity, AdminUser, BOOTSTRAP_ADMIN_ID, admin_user_id};
use steeple_db::store::DocumentStore;
use steeple_db::store::repository::Repository;

use super::password::{check_strength, hash_password, verify_password};
use crate::error::{ServiceError, ServiceResult};
use crate::record::validated;

/// ## Summary
/// Finds an administrator by email, ignoring ASCII case.
///
/// ## Errors
/// Returns store or decoding errors.
pub async fn find_admin_by_email(
    store: &dyn DocumentStore,
    email: &str,
) -> ServiceResult<Option<Document<AdminUser>>> {
    let email = email.trim();
    let users = Repository::<AdminUser>::new(store).list(None).await?;
    Ok(users
        .into_iter()
        .find(|user| user.data.email.eq_ignore_ascii_case(email)))
}

/// ## Summary
/// Whether any administrator account exists yet.
///
/// ## Errors
/// Returns store or decoding errors.
pub async fn has_admins(store: &dyn DocumentStore) -> ServiceResult<bool> {
    let users = Repository::<AdminUser>::new(store).list(None).await?;
    Ok(!users.is_empty())
}

/// How a registration was admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enrollment {
    /// No administrator existed, so the request was not authenticated.
    Bootstrap,
    /// An authenticated administrator registered the account.
    Invited,
}

/// ## Summary
/// Creates an administrator account with an Argon2 password hash.
///
/// The account is inserted under a fixed id for [`Enrollment::Bootstrap`] and
/// under an id derived from the email otherwise, so the store rejects a
/// concurrent duplicate atomically.
///
/// ## Errors
/// - `ValidationError` for a missing name, malformed email or short password
/// - `Conflict` if the email is already registered, or if another bootstrap
///   registration won
#[tracing::instrument(skip(store, password))]
pub async fn register_admin(
    store: &dyn DocumentStore,
    enrollment: Enrollment,
    name: &str,
    email: &str,
    password: &str,
) -> ServiceResult<AdminIdentity> {
    check_strength(password)?;
    let user = AdminUser {
        name: name.trim().to_string(),
        email: email.trim().to_string(),
        password_hash: hash_password(password)?,
    };
    validated(&user)?;

    if find_admin_by_email(store, &user.email).await?.is_some() {
        return Err(duplicate(&user.email));
    }

    let id = match enrollment {
        Enrollment::Bootstrap => BOOTSTRAP_ADMIN_ID,
        Enrollment::Invited => admin_user_id(&user.email),
    };
    let created = Repository::<AdminUser>::new(store)
        .create_with_id(id, &user)
        .await
        .map_err(|e| match e {
            DbError::AlreadyExists { .. } if enrollment == Enrollment::Bootstrap => {
                ServiceError::Conflict("the first administrator is already registered".to_string())
            }
            DbError::AlreadyExists { .. } => duplicate(&user.email),
            other => other.into(),
        })?;

    tracing::info!(user_id = %created.id, ?enrollment, "Administrator registered");
    Ok(AdminIdentity::from(&created))
}

fn duplicate(email: &str) -> ServiceError {
    ServiceError::Conflict(format!("an administrator with email {email} already exists"))
}

/// ## Summary
/// Checks an email and password pair.
///
/// ## Errors
/// Returns `NotAuthenticated` for an unknown email or a wrong password.
#[tracing::instrument(skip(store, password))]
pub async fn verify_credentials(
    store: &dyn DocumentStore,
    email: &str,
    password: &str,
) -> ServiceResult<AdminIdentity> {
    let Some(user) = find_admin_by_email(store, email).await? else {
        tracing::debug!("Unknown administrator email");
        return Err(ServiceError::NotAuthenticated);
    };

    verify_password(password, &user.data.password_hash)?;
    Ok(AdminIdentity::from(&user))
}
