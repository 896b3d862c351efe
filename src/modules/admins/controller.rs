use axum::Json;
use axum::extract::{Path, State};
use pawhub_core::AppError;
use pawhub_models::{AdminPrivilegesResponse, UpdatePrivilegesDto};
use tracing::instrument;

use super::service::AdminService;
use crate::middleware::auth::{RequireSettingsRolesRead, RequireSettingsRolesWrite};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Raw and expanded privileges of an administrator
#[utoipa::path(
    get,
    path = "/api/admins/{id}/privileges",
    params(("id" = i64, Path, description = "Administrator ID")),
    responses(
        (status = 200, description = "Administrator privileges", body = AdminPrivilegesResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Requires settings:roles:read", body = ErrorResponse),
        (status = 404, description = "Administrator not found", body = ErrorResponse)
    ),
    tag = "Administrators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _session))]
pub async fn get_admin_privileges(
    State(state): State<AppState>,
    RequireSettingsRolesRead(_session): RequireSettingsRolesRead,
    Path(admin_id): Path<i64>,
) -> Result<Json<AdminPrivilegesResponse>, AppError> {
    let response = AdminService::get_privileges(&state, admin_id).await?;
    Ok(Json(response))
}

/// Replace an administrator's privilege string
#[utoipa::path(
    put,
    path = "/api/admins/{id}/privileges",
    params(("id" = i64, Path, description = "Administrator ID")),
    request_body = UpdatePrivilegesDto,
    responses(
        (status = 200, description = "Privileges updated", body = AdminPrivilegesResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 403, description = "Requires settings:roles:write; granting full access requires a super administrator", body = ErrorResponse),
        (status = 404, description = "Administrator not found", body = ErrorResponse),
        (status = 422, description = "Malformed privilege string", body = ErrorResponse)
    ),
    tag = "Administrators",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, session, dto))]
pub async fn update_admin_privileges(
    State(state): State<AppState>,
    RequireSettingsRolesWrite(session): RequireSettingsRolesWrite,
    Path(admin_id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdatePrivilegesDto>,
) -> Result<Json<AdminPrivilegesResponse>, AppError> {
    let response = AdminService::update_privileges(&state, &session, admin_id, dto).await?;
    Ok(Json(response))
}
