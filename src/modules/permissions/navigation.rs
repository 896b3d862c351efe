//! Admin console navigation and the permissions that reveal each entry.

use pawhub_core::ResolvedPrivileges;
use pawhub_core::permissions::*;
use pawhub_models::{MenuItem, MenuSection};

struct Entry {
    key: &'static str,
    label: &'static str,
    path: &'static str,
    /// Any one of these reveals the entry
    required: &'static [&'static str],
}

struct Section {
    key: &'static str,
    label: &'static str,
    entries: &'static [Entry],
}

const fn entry(
    key: &'static str,
    label: &'static str,
    path: &'static str,
    required: &'static [&'static str],
) -> Entry {
    Entry {
        key,
        label,
        path,
        required,
    }
}

static NAVIGATION: &[Section] = &[
    Section {
        key: "members",
        label: "Members",
        entries: &[entry("members", "Members", "/members", &[MEMBERS_READ, LEGACY_GENERAL])],
    },
    Section {
        key: "shop",
        label: "Shop",
        entries: &[
            entry("shop-products", "Products", "/shop/products", &[SHOP_PRODUCTS_READ]),
            entry("shop-orders", "Orders", "/shop/orders", &[SHOP_ORDERS_READ]),
            entry("shop-categories", "Categories", "/shop/categories", &[SHOP_CATEGORIES_READ]),
            entry("shop-promotions", "Promotions", "/shop/promotions", &[SHOP_PROMOTIONS_READ]),
        ],
    },
    Section {
        key: "pets",
        label: "Pets",
        entries: &[
            entry("pets", "Pets", "/pets", &[PETS_READ]),
            entry("pets-categories", "Categories", "/pets/categories", &[PETS_CATEGORIES_READ]),
            entry("pets-appointments", "Appointments", "/pets/appointments", &[PETS_APPOINTMENTS_READ]),
        ],
    },
    Section {
        key: "forum",
        label: "Forum",
        entries: &[
            entry("forum-articles", "Articles", "/forum/articles", &[FORUM_ARTICLES_READ]),
            entry("forum-categories", "Categories", "/forum/categories", &[FORUM_CATEGORIES_READ]),
            entry("forum-reports", "Reports", "/forum/reports", &[FORUM_REPORTS_READ]),
        ],
    },
    Section {
        key: "finance",
        label: "Finance",
        entries: &[
            entry(
                "finance-transactions",
                "Transactions",
                "/finance/transactions",
                &[FINANCE_TRANSACTIONS_READ, LEGACY_DONATION],
            ),
            entry("finance-payments", "Payments", "/finance/payments", &[FINANCE_PAYMENTS_READ]),
            entry("finance-reports", "Reports", "/finance/reports", &[FINANCE_REPORTS_READ]),
        ],
    },
    Section {
        key: "settings",
        label: "Settings",
        entries: &[
            entry("settings-roles", "Roles", "/settings/roles", &[SETTINGS_ROLES_READ]),
            entry("settings-logs", "Logs", "/settings/logs", &[SETTINGS_LOGS_READ]),
        ],
    },
];

/// The sections and entries `privileges` may open. Sections with no
/// visible entry are left out.
pub fn visible_menu(privileges: &ResolvedPrivileges) -> Vec<MenuSection> {
    NAVIGATION
        .iter()
        .filter_map(|section| {
            let items: Vec<MenuItem> = section
                .entries
                .iter()
                .filter(|entry| privileges.allows(entry.required))
                .map(|entry| MenuItem {
                    key: entry.key.to_string(),
                    label: entry.label.to_string(),
                    path: entry.path.to_string(),
                })
                .collect();

            (!items.is_empty()).then(|| MenuSection {
                key: section.key.to_string(),
                label: section.label.to_string(),
                items,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(menu: &[MenuSection]) -> Vec<&str> {
        menu.iter()
            .flat_map(|section| section.items.iter().map(|item| item.key.as_str()))
            .collect()
    }

    #[test]
    fn test_every_gate_is_a_known_code_or_alias() {
        for section in NAVIGATION {
            for entry in section.entries {
                for code in entry.required {
                    assert!(
                        is_known(code) || LegacyAlias::from_token(code).is_some(),
                        "{code} gates {} but is not a permission",
                        entry.key
                    );
                }
            }
        }
    }

    #[test]
    fn test_super_admin_sees_everything() {
        let menu = visible_menu(&ResolvedPrivileges::resolve(Some("111")));
        assert_eq!(menu.len(), NAVIGATION.len());
        let total: usize = NAVIGATION.iter().map(|s| s.entries.len()).sum();
        assert_eq!(keys(&menu).len(), total);
    }

    #[test]
    fn test_no_privileges_sees_nothing() {
        assert!(visible_menu(&ResolvedPrivileges::resolve(None)).is_empty());
    }

    #[test]
    fn test_subresource_grant_shows_one_entry() {
        let menu = visible_menu(&ResolvedPrivileges::resolve(Some("pets:appointments:read")));
        assert_eq!(keys(&menu), vec!["pets-appointments"]);
        assert_eq!(menu[0].key, "pets");
    }

    #[test]
    fn test_legacy_aliases_open_their_sections() {
        let menu = visible_menu(&ResolvedPrivileges::resolve(Some("donation")));
        assert_eq!(keys(&menu), vec!["finance-transactions"]);

        let menu = visible_menu(&ResolvedPrivileges::resolve(Some("general")));
        assert_eq!(keys(&menu), vec!["members"]);
    }
}
