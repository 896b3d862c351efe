//! Authentication and authorization for the admin API.
//!
//! - [`auth`]: the [`AuthAdmin`](auth::AuthAdmin) session extractor and
//!   typed permission extractors built with `require_permission!`
//! - [`guard`]: a route layer requiring a permission for a whole router
//!
//! # Flow
//!
//! 1. Client sends `Authorization: Bearer <token>`
//! 2. `AuthAdmin` verifies the JWT and reloads the administrator
//! 3. Privileges are resolved through the permission cache
//! 4. A typed extractor or the guard layer checks the required permission
//!
//! A failure in steps 1-3 is `401 Unauthorized`; a failure in step 4 is
//! `403 Forbidden`.

pub mod auth;
pub mod guard;
