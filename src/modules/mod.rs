pub mod admins;
pub mod auth;
pub mod permissions;
