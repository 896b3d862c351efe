use pawhub_core::permissions::SUPER_ADMIN;
use pawhub_core::{AppError, ResolvedPrivileges};
use pawhub_models::{AdminAccount, AdminPrivilegesResponse, UpdatePrivilegesDto};
use tracing::{info, instrument, warn};

use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;

pub struct AdminService;

fn admin_not_found(admin_id: i64) -> AppError {
    AppError::not_found(anyhow::anyhow!("Administrator {admin_id} not found"))
}

impl AdminService {
    #[instrument(skip(state))]
    pub async fn get_privileges(
        state: &AppState,
        admin_id: i64,
    ) -> Result<AdminPrivilegesResponse, AppError> {
        let admin = Self::find(state, admin_id).await?;
        let resolved = state.permission_cache.get(&admin).await;
        Ok(AdminPrivilegesResponse::new(&admin, &resolved))
    }

    /// Replace an administrator's raw privilege string and drop their cached
    /// expansion. A blank string is stored as no privileges.
    ///
    /// Only a super administrator may hand out full access, whether as the
    /// sentinel itself or as a list containing it.
    #[instrument(skip(state, editor, dto), fields(editor_id = editor.admin_id()))]
    pub async fn update_privileges(
        state: &AppState,
        editor: &AuthAdmin,
        admin_id: i64,
        dto: UpdatePrivilegesDto,
    ) -> Result<AdminPrivilegesResponse, AppError> {
        let privileges = dto.privileges.trim();
        let privileges = (!privileges.is_empty()).then_some(privileges);
        let resolved = ResolvedPrivileges::resolve(privileges);

        if resolved.permissions().contains(SUPER_ADMIN) && !editor.is_super_admin() {
            warn!(
                editor_id = editor.admin_id(),
                admin_id, "Refused to grant full access without super administrator rights"
            );
            return Err(AppError::forbidden(
                "Only a super administrator can grant full access".to_string(),
            ));
        }

        let admin = state
            .directory
            .update_privileges(admin_id, privileges)
            .await?
            .ok_or_else(|| admin_not_found(admin_id))?;

        state.permission_cache.invalidate(admin_id).await;
        info!(
            editor_id = editor.admin_id(),
            admin_id,
            privileges = ?privileges,
            "Administrator privileges updated"
        );

        Ok(AdminPrivilegesResponse::new(&admin, &resolved))
    }

    async fn find(state: &AppState, admin_id: i64) -> Result<AdminAccount, AppError> {
        state
            .directory
            .find_by_id(admin_id)
            .await?
            .ok_or_else(|| admin_not_found(admin_id))
    }
}
