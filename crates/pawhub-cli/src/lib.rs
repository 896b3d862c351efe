//! Operator commands behind the `pawhub-cli` binary.
//!
//! The database-free commands (`expand`, `check`) render to strings so they
//! can be tested directly.

use anyhow::{Context, anyhow};
use pawhub_core::hash_password;
use pawhub_core::permissions::{self, Privilege, Required, check, expand};
use pawhub_db::{AdminDirectory, NewAdmin};
use pawhub_models::AdminAccount;

/// Reject privilege strings the permission core would treat as deny-all
/// because they are malformed.
pub fn parse_privileges(privileges: &str) -> anyhow::Result<()> {
    Privilege::parse(Some(privileges))
        .map(|_| ())
        .with_context(|| format!("invalid privilege string {privileges:?}"))
}

/// One line per granted code, in catalog order, with its label.
pub fn render_expansion(privileges: &str) -> String {
    let expanded = expand(Some(privileges));
    if expanded.is_empty() {
        return "(no permissions)".to_string();
    }

    let ordered = expanded.ordered();
    let width = ordered.iter().map(String::len).max().unwrap_or(0);
    ordered
        .iter()
        .map(|code| format!("{code:<width$}  {}", permissions::describe(code)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_check(privileges: &str, required: &[String]) -> (bool, String) {
    let allowed = check(Some(privileges), Required::from(required.to_vec()));
    let verdict = if allowed { "ALLOW" } else { "DENY" };
    (allowed, format!("{verdict} [{}]", required.join(" | ")))
}

pub async fn create_admin(
    directory: &dyn AdminDirectory,
    username: &str,
    password: &str,
    privileges: Option<&str>,
) -> anyhow::Result<AdminAccount> {
    if let Some(privileges) = privileges {
        parse_privileges(privileges)?;
    }

    let password_hash = hash_password(password).map_err(|e| e.error)?;

    directory
        .create_admin(NewAdmin {
            username: username.to_string(),
            password_hash,
            privileges: privileges.map(str::to_string),
        })
        .await
        .map_err(|e| e.error)
}

pub async fn set_privileges(
    directory: &dyn AdminDirectory,
    id: i64,
    privileges: &str,
) -> anyhow::Result<AdminAccount> {
    parse_privileges(privileges)?;

    directory
        .update_privileges(id, Some(privileges))
        .await
        .map_err(|e| e.error)?
        .ok_or_else(|| anyhow!("no administrator with id {id}"))
}
