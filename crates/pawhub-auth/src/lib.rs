//! # PawHub Auth
//!
//! Authentication types and JWT utilities for the PawHub admin API.
//!
//! This crate is the identity side of the permission model: it proves *who*
//! an administrator is. It deliberately carries no permissions in the token.
//! Privileges are loaded from the admin record on every request so that an
//! edited privilege string takes effect without re-issuing tokens.
//!
//! - [`claims`]: access token claims
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use pawhub_auth::{create_access_token, verify_token};
//! use pawhub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(admin.id, &admin.username, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.admin_id()?, admin.id);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
