use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use pawhub_auth::{Claims, verify_token};
use pawhub_core::permissions::{SETTINGS_ROLES_READ, SETTINGS_ROLES_WRITE};
use pawhub_core::{AppError, Required, ResolvedPrivileges};
use pawhub_models::AdminAccount;

use tracing::warn;

use crate::metrics::track_permission_check;
use crate::state::{AppState, CachedPermissions};

/// An authenticated administrator session.
///
/// Extraction validates the bearer token, reloads the administrator from
/// the directory, and resolves privileges through the permission cache
/// against that fresh record. A missing, expired or revoked session is a
/// 401, and so is a directory that cannot be reached. Permission decisions
/// happen afterwards and are 403s.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    pub claims: Claims,
    pub admin: AdminAccount,
    pub privileges: ResolvedPrivileges,
}

impl AuthAdmin {
    pub fn admin_id(&self) -> i64 {
        self.admin.id
    }

    pub fn username(&self) -> &str {
        &self.admin.username
    }

    pub fn is_super_admin(&self) -> bool {
        self.privileges.is_super_admin()
    }

    /// Whether the session allows `required`. Never fails; deny is `false`.
    pub fn has_permission(&self, required: impl Into<Required>) -> bool {
        self.privileges.allows(required)
    }

    /// Like [`has_permission`](Self::has_permission), but a denial is a
    /// `403 Forbidden` naming the missing permission.
    pub fn require_permission(&self, required: impl Into<Required>) -> Result<(), AppError> {
        let required = required.into();
        let allowed = self.privileges.allows(&required);
        track_permission_check(allowed);

        if allowed {
            Ok(())
        } else {
            Err(forbidden(&required))
        }
    }
}

pub(crate) fn forbidden(required: &Required) -> AppError {
    AppError::forbidden(format!(
        "Access denied. Missing required permission: {}",
        required.codes().join(" or ")
    ))
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let auth_header = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::unauthorized("Invalid authorization header format".to_string()))
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<AuthAdmin>() {
            return Ok(session.clone());
        }

        let claims = verify_token(bearer_token(parts)?, &state.jwt_config)?;
        let admin_id = claims.admin_id()?;
        let CachedPermissions { admin, privileges } =
            match state.get_cached_permissions(admin_id).await {
                Ok(Some(cached)) => cached,
                Ok(None) => {
                    return Err(AppError::unauthorized(
                        "Session is no longer valid".to_string(),
                    ));
                }
                // An unreachable directory cannot vouch for the session
                Err(e) => {
                    warn!(admin_id, error = %e.error, "Administrator lookup failed during session resolution");
                    return Err(AppError::unauthorized(
                        "Session could not be verified".to_string(),
                    ));
                }
            };

        let session = AuthAdmin {
            claims,
            admin,
            privileges,
        };
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}

/// Declares an extractor that only succeeds for sessions holding a
/// permission.
#[macro_export]
macro_rules! require_permission {
    ($name:ident, $permission:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthAdmin);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = pawhub_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let session =
                    $crate::middleware::auth::AuthAdmin::from_request_parts(parts, state).await?;
                session.require_permission($permission)?;
                Ok($name(session))
            }
        }
    };
}

require_permission!(RequireSettingsRolesRead, SETTINGS_ROLES_READ);
require_permission!(RequireSettingsRolesWrite, SETTINGS_ROLES_WRITE);
