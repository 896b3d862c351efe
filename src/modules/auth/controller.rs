use axum::Json;
use axum::extract::State;
use pawhub_core::AppError;
use pawhub_models::{AdminProfile, LoginRequest, LoginResponse, MessageResponse};
use tracing::instrument;
use utoipa::ToSchema;

use super::service::AuthService;
use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 400, description = "Bad request", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login_admin(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = AuthService::login(&state, dto).await?;
    Ok(Json(response))
}

/// End the session and drop its cached permissions
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, session))]
pub async fn logout_admin(
    State(state): State<AppState>,
    session: AuthAdmin,
) -> Result<Json<MessageResponse>, AppError> {
    AuthService::logout(&state, &session).await;
    Ok(Json(MessageResponse::new("Logged out")))
}

/// Current administrator with raw and expanded privileges
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current administrator", body = AdminProfile),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip(session))]
pub async fn get_me(session: AuthAdmin) -> Result<Json<AdminProfile>, AppError> {
    Ok(Json(AdminProfile::new(&session.admin, &session.privileges)))
}
