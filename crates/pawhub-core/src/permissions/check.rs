//! Allow/deny decisions for required permissions.

use serde::Deserialize;

use super::expand::{Expander, expand};
use super::privilege::is_sentinel;
use super::set::PermissionSet;

/// A required-permission expression: one code, or a list of codes of which
/// any one is enough.
///
/// Deserializes from either a JSON string or a JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RequiredRepr")]
pub struct Required(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RequiredRepr {
    One(String),
    AnyOf(Vec<String>),
}

impl From<RequiredRepr> for Required {
    fn from(repr: RequiredRepr) -> Self {
        match repr {
            RequiredRepr::One(code) => Required::one(code),
            RequiredRepr::AnyOf(codes) => Required(codes),
        }
    }
}

impl Required {
    pub fn one(code: impl Into<String>) -> Self {
        Required(vec![code.into()])
    }

    pub fn any_of<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Required(codes.into_iter().map(Into::into).collect())
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Required {
    fn from(code: &str) -> Self {
        Required::one(code)
    }
}

impl From<String> for Required {
    fn from(code: String) -> Self {
        Required::one(code)
    }
}

impl From<&[&str]> for Required {
    fn from(codes: &[&str]) -> Self {
        Required::any_of(codes.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for Required {
    fn from(codes: [&str; N]) -> Self {
        Required::any_of(codes)
    }
}

impl From<Vec<&str>> for Required {
    fn from(codes: Vec<&str>) -> Self {
        Required::any_of(codes)
    }
}

impl From<Vec<String>> for Required {
    fn from(codes: Vec<String>) -> Self {
        Required(codes)
    }
}

impl From<&Required> for Required {
    fn from(required: &Required) -> Self {
        required.clone()
    }
}

/// Decide whether a raw privilege string satisfies `required`.
///
/// The sentinel allows everything, including an empty or unknown
/// requirement. An empty or absent privilege string allows nothing. An
/// empty required list is never satisfied by anything but the sentinel.
pub fn check(raw: Option<&str>, required: impl Into<Required>) -> bool {
    let raw = raw.unwrap_or_default();
    if is_sentinel(raw) {
        return true;
    }
    if raw.trim().is_empty() {
        return false;
    }
    any_granted(&expand(Some(raw)), &required.into())
}

fn any_granted(permissions: &PermissionSet, required: &Required) -> bool {
    required.codes().iter().any(|code| permissions.contains(code))
}

/// A raw privilege string together with its expansion.
///
/// This is what the permission cache hands out: decisions made through
/// [`ResolvedPrivileges::allows`] match [`check`] on the same raw string
/// without expanding again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPrivileges {
    raw: String,
    permissions: PermissionSet,
}

impl ResolvedPrivileges {
    pub fn resolve(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or_default();
        Self {
            raw: raw.to_string(),
            permissions: expand(Some(raw)),
        }
    }

    pub fn with_expander(raw: Option<&str>, expander: &dyn Expander) -> Self {
        let raw = raw.unwrap_or_default();
        Self {
            raw: raw.to_string(),
            permissions: expander.expand(raw),
        }
    }

    /// Rebuild from a stored raw string and its previously computed expansion.
    pub fn from_parts(raw: impl Into<String>, permissions: PermissionSet) -> Self {
        Self {
            raw: raw.into(),
            permissions,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn permissions(&self) -> &PermissionSet {
        &self.permissions
    }

    pub fn is_super_admin(&self) -> bool {
        is_sentinel(&self.raw)
    }

    pub fn allows(&self, required: impl Into<Required>) -> bool {
        if self.is_super_admin() {
            return true;
        }
        if self.raw.trim().is_empty() {
            return false;
        }
        any_granted(&self.permissions, &required.into())
    }

    /// The subset of `codes` this privilege allows, in input order.
    pub fn filter_allowed<'a>(&self, codes: &[&'a str]) -> Vec<&'a str> {
        codes
            .iter()
            .copied()
            .filter(|code| self.allows(*code))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::catalog::*;
    use serde_json::json;

    #[test]
    fn test_sentinel_allows_everything() {
        assert!(check(Some("111"), SETTINGS_DELETE));
        assert!(check(Some("111"), "anything:not:real"));
        assert!(check(Some("111"), ""));
        assert!(check(Some(" 111 "), Required::default()));
    }

    #[test]
    fn test_empty_privileges_deny() {
        assert!(!check(None, SHOP_READ));
        assert!(!check(Some(""), SHOP_READ));
        assert!(!check(Some("   "), [SHOP_READ, MEMBERS_READ]));
    }

    #[test]
    fn test_empty_required_list_is_false() {
        assert!(!check(Some("shop:read"), Required::default()));
        assert!(!check(Some("shop:read"), Vec::<String>::new()));
    }

    #[test]
    fn test_single_and_any_of() {
        let raw = Some("shop:read,pets:write");
        assert!(check(raw, SHOP_PRODUCTS_READ));
        assert!(check(raw, PETS_APPOINTMENTS_WRITE));
        assert!(!check(raw, MEMBERS_READ));
        assert!(check(raw, [MEMBERS_READ, PETS_READ]));
        assert!(!check(raw, [MEMBERS_READ, FINANCE_READ]));
    }

    #[test]
    fn test_unknown_required_codes_simply_do_not_match() {
        assert!(!check(Some("members:read"), "anything:not:real"));
        assert!(check(Some("members:read"), ["anything:not:real", MEMBERS_READ]));
    }

    #[test]
    fn test_malformed_privileges_deny() {
        assert!(!check(Some("shop:read,<bad>"), SHOP_READ));
    }

    #[test]
    fn test_legacy_alias_check() {
        assert!(check(Some("donation"), FINANCE_TRANSACTIONS_READ));
        assert!(check(Some("donation"), "donation"));
        assert!(!check(Some("donation"), FINANCE_WRITE));
        assert!(check(Some("general"), SHOP_READ));
        assert!(!check(Some("general"), SHOP_PRODUCTS_READ));
    }

    #[test]
    fn test_resolved_privileges_agree_with_check() {
        for raw in ["111", "", "shop:read", "donation", "pets:categories:write", "foo:bar"] {
            let resolved = ResolvedPrivileges::resolve(Some(raw));
            for required in [SHOP_WRITE, PETS_CATEGORIES_READ, FINANCE_READ, "foo:bar", ""] {
                assert_eq!(
                    resolved.allows(required),
                    check(Some(raw), required),
                    "{raw:?} vs {required:?}"
                );
            }
        }
    }

    #[test]
    fn test_filter_allowed_keeps_order() {
        let resolved = ResolvedPrivileges::resolve(Some("pets:categories:write"));
        assert_eq!(
            resolved.filter_allowed(&[
                SHOP_READ,
                PETS_CATEGORIES_WRITE,
                PETS_CATEGORIES_DELETE,
                PETS_CATEGORIES_READ,
            ]),
            vec![PETS_CATEGORIES_WRITE, PETS_CATEGORIES_READ]
        );
    }

    #[test]
    fn test_from_parts_uses_stored_expansion() {
        let stored: PermissionSet = [SHOP_READ].into_iter().collect();
        let resolved = ResolvedPrivileges::from_parts("shop:read", stored);
        assert!(resolved.allows(SHOP_READ));
        // Nothing is re-expanded from the raw string
        assert!(!resolved.allows(SHOP_PRODUCTS_READ));
    }

    #[test]
    fn test_required_deserializes_from_string_or_array() {
        let one: Required = serde_json::from_value(json!("shop:read")).unwrap();
        assert_eq!(one, Required::one(SHOP_READ));

        let many: Required = serde_json::from_value(json!(["shop:read", "pets:read"])).unwrap();
        assert_eq!(many, Required::any_of([SHOP_READ, PETS_READ]));

        let none: Required = serde_json::from_value(json!([])).unwrap();
        assert!(none.is_empty());

        assert!(serde_json::from_value::<Required>(json!(42)).is_err());
    }
}
