use pawhub_core::ResolvedPrivileges;
use pawhub_core::permissions::{all_permissions, describe, group_members};
use pawhub_models::{AdminProfile, CatalogEntry, ExpandResponse};
use tracing::{info, instrument};

use crate::middleware::auth::AuthAdmin;
use crate::state::AppState;

pub struct PermissionService;

impl PermissionService {
    /// Throw away the session's cached expansion and rebuild it from the
    /// administrator's stored privilege string.
    #[instrument(skip(state, session), fields(admin_id = session.admin_id()))]
    pub async fn reload(state: &AppState, session: &AuthAdmin) -> AdminProfile {
        state.permission_cache.invalidate(session.admin_id()).await;
        let resolved = state.permission_cache.preload(&session.admin).await;
        info!(
            permissions = resolved.permissions().len(),
            "Permissions reloaded"
        );
        AdminProfile::new(&session.admin, &resolved)
    }

    pub fn catalog() -> Vec<CatalogEntry> {
        all_permissions()
            .iter()
            .map(|code| CatalogEntry {
                code: code.to_string(),
                label: describe(code).to_string(),
                grants: group_members(code)
                    .unwrap_or_default()
                    .iter()
                    .map(|member| member.to_string())
                    .collect(),
            })
            .collect()
    }

    pub fn preview_expansion(privileges: String) -> ExpandResponse {
        let resolved = ResolvedPrivileges::resolve(Some(&privileges));
        ExpandResponse {
            is_super_admin: resolved.is_super_admin(),
            permissions: resolved.permissions().ordered(),
            privileges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawhub_core::permissions::{MEMBERS_READ, SHOP_READ, SHOP_PRODUCTS_READ, SUPER_ADMIN};

    #[test]
    fn test_catalog_covers_every_code() {
        let catalog = PermissionService::catalog();
        assert_eq!(catalog.len(), all_permissions().len());
        assert_eq!(catalog[0].code, SUPER_ADMIN);

        let shop = catalog.iter().find(|entry| entry.code == SHOP_READ).unwrap();
        assert_eq!(shop.grants[0], SHOP_READ);
        assert!(shop.grants.iter().any(|code| code == SHOP_PRODUCTS_READ));

        let members = catalog.iter().find(|entry| entry.code == MEMBERS_READ).unwrap();
        assert!(members.grants.is_empty());
    }

    #[test]
    fn test_preview_expansion() {
        let preview = PermissionService::preview_expansion("general".to_string());
        assert_eq!(preview.privileges, "general");
        assert!(!preview.is_super_admin);
        assert_eq!(preview.permissions, vec!["members:read", "shop:read", "general"]);

        let preview = PermissionService::preview_expansion("111".to_string());
        assert!(preview.is_super_admin);
        assert_eq!(preview.permissions.len(), all_permissions().len());
    }
}
