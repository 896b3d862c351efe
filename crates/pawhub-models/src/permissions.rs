//! Permission payloads exposed over HTTP.

use pawhub_core::permissions::Required;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::admins::validate_privileges;

/// Body of `POST /api/permissions/check`.
///
/// `required` is either one permission code or a list of codes, any one of
/// which is enough.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PermissionCheckRequest {
    #[schema(value_type = Object, example = json!(["shop:write", "shop:products:write"]))]
    pub required: Required,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PermissionCheckResponse {
    pub allowed: bool,
}

/// Preview the expansion of a privilege string without saving it.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ExpandRequest {
    #[validate(
        length(max = 2000, message = "Privileges must not exceed 2000 characters"),
        custom(function = "validate_privileges")
    )]
    #[schema(example = "shop:read,pets:write")]
    pub privileges: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExpandResponse {
    pub privileges: String,
    pub is_super_admin: bool,
    pub permissions: Vec<String>,
}

/// One catalog code with its label and the codes it grants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogEntry {
    pub code: String,
    pub label: String,
    /// Group members, the code itself first. Empty for leaf codes.
    pub grants: Vec<String>,
}

/// A navigation entry visible to the current administrator.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuItem {
    pub key: String,
    pub label: String,
    pub path: String,
}

/// A top-level navigation section and the entries in it the administrator
/// may open.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MenuSection {
    pub key: String,
    pub label: String,
    pub items: Vec<MenuItem>,
}
