use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{get_admin_privileges, update_admin_privileges};

pub fn init_admins_router() -> Router<AppState> {
    Router::new().route(
        "/{id}/privileges",
        get(get_admin_privileges).put(update_admin_privileges),
    )
}
