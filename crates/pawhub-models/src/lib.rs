//! # PawHub Models
//!
//! Domain models and DTOs for the PawHub admin API.
//!
//! # Modules
//!
//! - [`admins`]: Administrator accounts and privilege editing
//! - [`auth`]: Login and session responses
//! - [`permissions`]: Permission check, expansion preview, catalog and menu payloads
//!
//! # Example
//!
//! ```ignore
//! use pawhub_models::admins::AdminAccount;
//! use pawhub_models::permissions::PermissionCheckRequest;
//!
//! let allowed = resolved.allows(&request.required);
//! ```

pub mod admins;
pub mod auth;
pub mod permissions;

// Re-export commonly used types at crate root for convenience
pub use admins::{AdminAccount, AdminPrivilegesResponse, AdminProfile, UpdatePrivilegesDto};
pub use auth::{LoginRequest, LoginResponse, MessageResponse};
pub use permissions::{
    CatalogEntry, ExpandRequest, ExpandResponse, MenuItem, MenuSection, PermissionCheckRequest,
    PermissionCheckResponse,
};
