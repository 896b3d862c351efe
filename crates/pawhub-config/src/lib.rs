//! # PawHub Config
//!
//! Configuration types for the PawHub admin API.
//!
//! Every structure is loaded from environment variables with a sensible
//! development default:
//!
//! - [`jwt`]: JWT signing secret and token lifetime
//! - [`cors`]: allowed browser origins
//! - [`server`]: listen address
//!
//! # Example
//!
//! ```ignore
//! use pawhub_config::{CorsConfig, JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! ```

pub mod cors;
pub mod jwt;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
