//! Expansion of raw privilege strings into permission sets.
//!
//! Expansion never fails. A malformed privilege string is logged and
//! expands to the empty set, so a broken value denies everything instead of
//! breaking the caller.

use tracing::warn;

use super::catalog::{all_permissions, group_members, is_known};
use super::privilege::Privilege;
use super::set::PermissionSet;

/// Turns a raw privilege string into an expanded permission set.
///
/// The Cache-backed accessor takes an `Expander` so the expansion it caches
/// can be swapped or instrumented.
pub trait Expander: Send + Sync {
    fn expand(&self, raw: &str) -> PermissionSet;
}

/// The catalog-driven expander used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogExpander;

impl Expander for CatalogExpander {
    fn expand(&self, raw: &str) -> PermissionSet {
        expand(Some(raw))
    }
}

/// Expand a raw privilege string.
///
/// - `"111"` expands to the whole catalog.
/// - `"donation"` / `"general"` expand to their fixed legacy sets.
/// - Otherwise every token is kept verbatim, group keys add their group,
///   and `domain:action` catalog codes add every catalog code under the same
///   `domain:` prefix.
/// - Empty, absent, or malformed input expands to the empty set.
pub fn expand(raw: Option<&str>) -> PermissionSet {
    match Privilege::parse(raw) {
        Ok(privilege) => expand_privilege(&privilege),
        Err(e) => {
            warn!(error = %e, "Malformed privilege string, expanding to no permissions");
            PermissionSet::new()
        }
    }
}

pub fn expand_privilege(privilege: &Privilege) -> PermissionSet {
    match privilege {
        Privilege::Sentinel => all_permissions().iter().copied().collect(),
        Privilege::Legacy(alias) => alias.permissions().iter().copied().collect(),
        Privilege::Codes(tokens) => expand_codes(tokens),
    }
}

fn expand_codes(tokens: &[String]) -> PermissionSet {
    let mut set: PermissionSet = tokens.iter().map(String::as_str).collect();

    for token in tokens {
        if let Some(members) = group_members(token) {
            set.extend(members.iter().copied());
        }
    }

    // Matches on the string prefix, not the resource tree: `shop:read`
    // also grants `shop:promotions:delete`. Kept for compatibility with
    // stored privilege strings.
    for token in tokens {
        if let Some(domain) = domain_of_domain_action(token) {
            if is_known(token) {
                set.extend(all_permissions().iter().copied().filter(|code| {
                    code.strip_prefix(domain)
                        .is_some_and(|rest| rest.starts_with(':'))
                }));
            }
        }
    }

    set
}

/// `Some("shop")` for a two-segment `"shop:read"`, `None` otherwise.
fn domain_of_domain_action(token: &str) -> Option<&str> {
    let (domain, action) = token.split_once(':')?;
    if domain.is_empty() || action.is_empty() || action.contains(':') {
        return None;
    }
    Some(domain)
}
