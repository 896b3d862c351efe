//! Administrator accounts.

use chrono::{DateTime, Utc};
use pawhub_core::permissions::{Privilege, ResolvedPrivileges};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// An administrator record as stored in the `admins` table.
///
/// `privileges` is the raw privilege string. It is opaque to everything
/// except the permission core, and `None` means no privileges at all.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub privileges: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl AdminAccount {
    pub fn privileges(&self) -> Option<&str> {
        self.privileges.as_deref()
    }
}

/// Public view of an administrator with its expanded permissions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminProfile {
    pub id: i64,
    pub username: String,
    #[schema(example = "shop:read,pets:write")]
    pub privileges: Option<String>,
    pub is_super_admin: bool,
    /// Expanded permission codes in catalog order
    pub permissions: Vec<String>,
}

impl AdminProfile {
    pub fn new(admin: &AdminAccount, resolved: &ResolvedPrivileges) -> Self {
        Self {
            id: admin.id,
            username: admin.username.clone(),
            privileges: admin.privileges.clone(),
            is_super_admin: resolved.is_super_admin(),
            permissions: resolved.permissions().ordered(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminPrivilegesResponse {
    pub admin_id: i64,
    pub privileges: Option<String>,
    pub permissions: Vec<String>,
}

impl AdminPrivilegesResponse {
    pub fn new(admin: &AdminAccount, resolved: &ResolvedPrivileges) -> Self {
        Self {
            admin_id: admin.id,
            privileges: admin.privileges.clone(),
            permissions: resolved.permissions().ordered(),
        }
    }
}

/// Replaces an administrator's raw privilege string.
///
/// An empty string revokes everything.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdatePrivilegesDto {
    #[validate(
        length(max = 2000, message = "Privileges must not exceed 2000 characters"),
        custom(function = "validate_privileges")
    )]
    #[schema(example = "shop:read,pets:write")]
    pub privileges: String,
}

/// Rejects privilege strings the permission core would treat as malformed.
pub fn validate_privileges(privileges: &str) -> Result<(), ValidationError> {
    match Privilege::parse(Some(privileges)) {
        Ok(_) => Ok(()),
        Err(e) => {
            let mut error = ValidationError::new("invalid_privileges");
            error.message = Some(e.to_string().into());
            Err(error)
        }
    }
}
