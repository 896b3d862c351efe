//! # PawHub Core
//!
//! Core types, errors, and the permission model for the PawHub admin API.
//!
//! This crate provides foundational types used throughout the application:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`password`]: Password hashing and verification
//! - [`permissions`]: Permission catalog, privilege expansion, and permission checks
//!
//! # Example
//!
//! ```ignore
//! use pawhub_core::errors::AppError;
//! use pawhub_core::permissions::{self, check};
//!
//! // Raw privilege strings are stored per administrator
//! assert!(check(Some("shop:read,pets:write"), permissions::PETS_CATEGORIES_WRITE));
//! assert!(!check(Some("shop:read"), [permissions::FINANCE_READ, permissions::SETTINGS_READ]));
//!
//! // Deny at an API boundary
//! let error = AppError::forbidden("Missing required permission: shop:write".to_string());
//! ```

pub mod errors;
pub mod password;
pub mod permissions;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, verify_password};
pub use permissions::{PermissionSet, Required, ResolvedPrivileges, check, expand};
