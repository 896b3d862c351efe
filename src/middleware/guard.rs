//! Route-level permission guard.
//!
//! For routers where every route needs the same permission, attach the
//! guard once instead of using a typed extractor in every handler:
//!
//! ```ignore
//! Router::new()
//!     .route("/catalog", get(get_catalog))
//!     .route_layer(middleware::from_fn_with_state(
//!         PermissionGuard::new(state.clone(), SETTINGS_ROLES_READ),
//!         require_permissions,
//!     ))
//! ```

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use pawhub_core::{AppError, Required};

use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;

/// Middleware state: the application state plus what the guarded routes
/// require.
#[derive(Clone)]
pub struct PermissionGuard {
    state: AppState,
    required: Required,
}

impl PermissionGuard {
    pub fn new(state: AppState, required: impl Into<Required>) -> Self {
        Self {
            state,
            required: required.into(),
        }
    }
}

/// Rejects with 401 when there is no session and 403 when the session lacks
/// the guard's permission. The resolved session is left in the request
/// extensions, so handlers extracting [`AuthAdmin`] do not resolve it again.
pub async fn require_permissions(
    State(guard): State<PermissionGuard>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = request.into_parts();
    let session = AuthAdmin::from_request_parts(&mut parts, &guard.state).await?;
    session.require_permission(&guard.required)?;

    Ok(next.run(Request::from_parts(parts, body)).await)
}
