use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{get_me, login_admin, logout_admin};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login_admin))
        .route("/logout", post(logout_admin))
        .route("/me", get(get_me))
}
