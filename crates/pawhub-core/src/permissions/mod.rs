//! Role-based permission model for PawHub administrators.
//!
//! An administrator carries one raw privilege string. It flows through:
//!
//! 1. [`catalog`]: the static universe of codes and their groups.
//! 2. [`privilege`]: classification of the raw string into a [`Privilege`].
//! 3. [`expand`](mod@expand): resolution into a [`PermissionSet`].
//! 4. [`check`](mod@check): allow/deny for a [`Required`] expression.
//!
//! None of the public operations here return errors. Anything that cannot
//! be resolved confidently resolves to deny.

pub mod catalog;
pub mod check;
pub mod expand;
pub mod privilege;
pub mod set;

pub use catalog::*;
pub use check::{Required, ResolvedPrivileges, check};
pub use expand::{CatalogExpander, Expander, expand, expand_privilege};
pub use privilege::{LEGACY_DONATION, LEGACY_GENERAL, LegacyAlias, Privilege, PrivilegeError};
pub use set::PermissionSet;
