use axum::Json;
use axum::extract::State;
use pawhub_core::AppError;
use pawhub_models::{
    AdminProfile, CatalogEntry, ExpandRequest, ExpandResponse, MenuSection,
    PermissionCheckRequest, PermissionCheckResponse,
};
use tracing::{debug, instrument};

use super::navigation::visible_menu;
use super::service::PermissionService;
use crate::middleware::auth::AuthAdmin;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Rebuild the current administrator's cached permissions
#[utoipa::path(
    post,
    path = "/api/permissions/reload",
    responses(
        (status = 200, description = "Permissions reloaded", body = AdminProfile),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, session))]
pub async fn reload_permissions(
    State(state): State<AppState>,
    session: AuthAdmin,
) -> Result<Json<AdminProfile>, AppError> {
    Ok(Json(PermissionService::reload(&state, &session).await))
}

/// Ask whether the current administrator holds a permission
///
/// `required` is a code or a list of codes; a list is satisfied by any one
/// of its members. Denial is reported in the body, not as an error status.
#[utoipa::path(
    post,
    path = "/api/permissions/check",
    request_body = PermissionCheckRequest,
    responses(
        (status = 200, description = "Decision", body = PermissionCheckResponse),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(session, request))]
pub async fn check_permission(
    session: AuthAdmin,
    Json(request): Json<PermissionCheckRequest>,
) -> Result<Json<PermissionCheckResponse>, AppError> {
    let allowed = session.has_permission(&request.required);
    debug!(required = ?request.required.codes(), allowed, "Permission check");
    Ok(Json(PermissionCheckResponse { allowed }))
}

/// Navigation entries visible to the current administrator
#[utoipa::path(
    get,
    path = "/api/permissions/menu",
    responses(
        (status = 200, description = "Visible sections", body = Vec<MenuSection>),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(session))]
pub async fn get_menu(session: AuthAdmin) -> Result<Json<Vec<MenuSection>>, AppError> {
    Ok(Json(visible_menu(&session.privileges)))
}

/// Every permission code with its label and what it grants
#[utoipa::path(
    get,
    path = "/api/permissions/catalog",
    responses(
        (status = 200, description = "Permission catalog", body = Vec<CatalogEntry>),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Requires settings:roles:read", body = ErrorResponse)
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
pub async fn get_catalog() -> Json<Vec<CatalogEntry>> {
    Json(PermissionService::catalog())
}

/// Preview the expansion of a privilege string
#[utoipa::path(
    post,
    path = "/api/permissions/expand",
    request_body = ExpandRequest,
    responses(
        (status = 200, description = "Expanded permissions", body = ExpandResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Requires settings:roles:read", body = ErrorResponse),
        (status = 422, description = "Malformed privilege string", body = ErrorResponse)
    ),
    tag = "Permissions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(dto))]
pub async fn expand_privileges(
    ValidatedJson(dto): ValidatedJson<ExpandRequest>,
) -> Result<Json<ExpandResponse>, AppError> {
    Ok(Json(PermissionService::preview_expansion(dto.privileges)))
}
