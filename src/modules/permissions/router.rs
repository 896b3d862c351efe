use axum::{
    Router, middleware,
    routing::{get, post},
};
use pawhub_core::permissions::SETTINGS_ROLES_READ;

use crate::middleware::guard::{PermissionGuard, require_permissions};
use crate::state::AppState;

use super::controller::{
    check_permission, expand_privileges, get_catalog, get_menu, reload_permissions,
};

pub fn init_permissions_router(state: &AppState) -> Router<AppState> {
    let role_editor = Router::new()
        .route("/catalog", get(get_catalog))
        .route("/expand", post(expand_privileges))
        .route_layer(middleware::from_fn_with_state(
            PermissionGuard::new(state.clone(), SETTINGS_ROLES_READ),
            require_permissions,
        ));

    Router::new()
        .route("/reload", post(reload_permissions))
        .route("/check", post(check_permission))
        .route("/menu", get(get_menu))
        .merge(role_editor)
}
