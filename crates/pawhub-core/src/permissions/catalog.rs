//! Permission catalog for the PawHub admin API.
//!
//! This module is the static universe of permission codes. Every code is a
//! constant so handlers, route layers, and tests refer to the same string,
//! and the codes are arranged in a resource tree ([`RESOURCES`]) from which
//! the flat catalog, the permission groups, and human-readable labels are
//! derived.
//!
//! # Permission groups
//!
//! A group maps a coarse code to every finer code it implies, itself first:
//!
//! | Key | Members |
//! |-----|---------|
//! | `X:sub:write` | `X:sub:write`, `X:sub:read` |
//! | `X:sub:delete` | `X:sub:delete`, `X:sub:write`, `X:sub:read` |
//! | `X:read` | `X:read`, every `X:<sub>:read` |
//! | `X:write` | `X:write`, `X:read`, every `X:<sub>:read` and `X:<sub>:write` |
//! | `X:delete` | `X:delete`, the `X:write` group, every `X:<sub>:delete` |
//! | `111` | the entire flat catalog |
//!
//! Read codes on resources without children are leaves and have no group.
//!
//! # Example
//!
//! ```ignore
//! use pawhub_core::permissions::catalog::{self, SHOP_READ};
//!
//! let members = catalog::group_members(SHOP_READ).unwrap();
//! assert!(members.contains(&catalog::SHOP_PRODUCTS_READ));
//! assert_eq!(catalog::describe("unknown:code"), "unknown:code");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

// =============================================================================
// Super administrator
// =============================================================================

/// Sentinel code granting unconditional full access
pub const SUPER_ADMIN: &str = "111";

// =============================================================================
// Members permissions
// =============================================================================

/// Permission to view members
pub const MEMBERS_READ: &str = "members:read";
/// Permission to create and edit members
pub const MEMBERS_WRITE: &str = "members:write";
/// Permission to delete members
pub const MEMBERS_DELETE: &str = "members:delete";

// =============================================================================
// Shop permissions
// =============================================================================

/// Permission to view the shop
pub const SHOP_READ: &str = "shop:read";
/// Permission to manage the shop
pub const SHOP_WRITE: &str = "shop:write";
/// Permission to delete shop data
pub const SHOP_DELETE: &str = "shop:delete";

pub const SHOP_PRODUCTS_READ: &str = "shop:products:read";
pub const SHOP_PRODUCTS_WRITE: &str = "shop:products:write";
pub const SHOP_PRODUCTS_DELETE: &str = "shop:products:delete";

pub const SHOP_ORDERS_READ: &str = "shop:orders:read";
pub const SHOP_ORDERS_WRITE: &str = "shop:orders:write";
pub const SHOP_ORDERS_DELETE: &str = "shop:orders:delete";

pub const SHOP_CATEGORIES_READ: &str = "shop:categories:read";
pub const SHOP_CATEGORIES_WRITE: &str = "shop:categories:write";
pub const SHOP_CATEGORIES_DELETE: &str = "shop:categories:delete";

pub const SHOP_PROMOTIONS_READ: &str = "shop:promotions:read";
pub const SHOP_PROMOTIONS_WRITE: &str = "shop:promotions:write";
pub const SHOP_PROMOTIONS_DELETE: &str = "shop:promotions:delete";

// =============================================================================
// Pets permissions
// =============================================================================

/// Permission to view pets
pub const PETS_READ: &str = "pets:read";
/// Permission to create and edit pets
pub const PETS_WRITE: &str = "pets:write";
/// Permission to delete pets
pub const PETS_DELETE: &str = "pets:delete";

pub const PETS_CATEGORIES_READ: &str = "pets:categories:read";
pub const PETS_CATEGORIES_WRITE: &str = "pets:categories:write";
pub const PETS_CATEGORIES_DELETE: &str = "pets:categories:delete";

pub const PETS_APPOINTMENTS_READ: &str = "pets:appointments:read";
pub const PETS_APPOINTMENTS_WRITE: &str = "pets:appointments:write";
pub const PETS_APPOINTMENTS_DELETE: &str = "pets:appointments:delete";

// =============================================================================
// Forum permissions
// =============================================================================

/// Permission to view the forum
pub const FORUM_READ: &str = "forum:read";
/// Permission to moderate the forum
pub const FORUM_WRITE: &str = "forum:write";
/// Permission to delete forum content
pub const FORUM_DELETE: &str = "forum:delete";

pub const FORUM_ARTICLES_READ: &str = "forum:articles:read";
pub const FORUM_ARTICLES_WRITE: &str = "forum:articles:write";
pub const FORUM_ARTICLES_DELETE: &str = "forum:articles:delete";

pub const FORUM_CATEGORIES_READ: &str = "forum:categories:read";
pub const FORUM_CATEGORIES_WRITE: &str = "forum:categories:write";
pub const FORUM_CATEGORIES_DELETE: &str = "forum:categories:delete";

pub const FORUM_REPORTS_READ: &str = "forum:reports:read";
pub const FORUM_REPORTS_WRITE: &str = "forum:reports:write";
pub const FORUM_REPORTS_DELETE: &str = "forum:reports:delete";

// =============================================================================
// Finance permissions
// =============================================================================

/// Permission to view finance data
pub const FINANCE_READ: &str = "finance:read";
/// Permission to record and edit finance data
pub const FINANCE_WRITE: &str = "finance:write";
/// Permission to delete finance data
pub const FINANCE_DELETE: &str = "finance:delete";

pub const FINANCE_TRANSACTIONS_READ: &str = "finance:transactions:read";
pub const FINANCE_TRANSACTIONS_WRITE: &str = "finance:transactions:write";
pub const FINANCE_TRANSACTIONS_DELETE: &str = "finance:transactions:delete";

pub const FINANCE_PAYMENTS_READ: &str = "finance:payments:read";
pub const FINANCE_PAYMENTS_WRITE: &str = "finance:payments:write";
pub const FINANCE_PAYMENTS_DELETE: &str = "finance:payments:delete";

pub const FINANCE_REPORTS_READ: &str = "finance:reports:read";
pub const FINANCE_REPORTS_WRITE: &str = "finance:reports:write";
pub const FINANCE_REPORTS_DELETE: &str = "finance:reports:delete";

// =============================================================================
// Settings permissions
// =============================================================================

/// Permission to view settings
pub const SETTINGS_READ: &str = "settings:read";
/// Permission to update settings
pub const SETTINGS_WRITE: &str = "settings:write";
/// Permission to delete settings
pub const SETTINGS_DELETE: &str = "settings:delete";

/// Permission to view administrator privileges
pub const SETTINGS_ROLES_READ: &str = "settings:roles:read";
/// Permission to change administrator privileges
pub const SETTINGS_ROLES_WRITE: &str = "settings:roles:write";
pub const SETTINGS_ROLES_DELETE: &str = "settings:roles:delete";

pub const SETTINGS_LOGS_READ: &str = "settings:logs:read";
pub const SETTINGS_LOGS_WRITE: &str = "settings:logs:write";
pub const SETTINGS_LOGS_DELETE: &str = "settings:logs:delete";

/// CRUD severity of a permission code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    Read,
    Write,
    Delete,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Read => "View",
            Action::Write => "Create and edit",
            Action::Delete => "Delete",
        }
    }
}

/// A permission-bearing resource with its read/write/delete codes.
#[derive(Debug)]
pub struct Resource {
    pub label: &'static str,
    pub read: &'static str,
    pub write: &'static str,
    pub delete: &'static str,
    pub children: &'static [Resource],
}

impl Resource {
    const fn leaf(
        label: &'static str,
        read: &'static str,
        write: &'static str,
        delete: &'static str,
    ) -> Self {
        Self {
            label,
            read,
            write,
            delete,
            children: &[],
        }
    }

    /// The codes of this resource paired with their action, in severity order.
    pub fn codes(&self) -> [(Action, &'static str); 3] {
        [
            (Action::Read, self.read),
            (Action::Write, self.write),
            (Action::Delete, self.delete),
        ]
    }
}

/// The permission resource tree. Declaration order is catalog order.
pub static RESOURCES: &[Resource] = &[
    Resource::leaf("members", MEMBERS_READ, MEMBERS_WRITE, MEMBERS_DELETE),
    Resource {
        label: "shop",
        read: SHOP_READ,
        write: SHOP_WRITE,
        delete: SHOP_DELETE,
        children: &[
            Resource::leaf(
                "shop products",
                SHOP_PRODUCTS_READ,
                SHOP_PRODUCTS_WRITE,
                SHOP_PRODUCTS_DELETE,
            ),
            Resource::leaf(
                "shop orders",
                SHOP_ORDERS_READ,
                SHOP_ORDERS_WRITE,
                SHOP_ORDERS_DELETE,
            ),
            Resource::leaf(
                "shop categories",
                SHOP_CATEGORIES_READ,
                SHOP_CATEGORIES_WRITE,
                SHOP_CATEGORIES_DELETE,
            ),
            Resource::leaf(
                "shop promotions",
                SHOP_PROMOTIONS_READ,
                SHOP_PROMOTIONS_WRITE,
                SHOP_PROMOTIONS_DELETE,
            ),
        ],
    },
    Resource {
        label: "pets",
        read: PETS_READ,
        write: PETS_WRITE,
        delete: PETS_DELETE,
        children: &[
            Resource::leaf(
                "pet categories",
                PETS_CATEGORIES_READ,
                PETS_CATEGORIES_WRITE,
                PETS_CATEGORIES_DELETE,
            ),
            Resource::leaf(
                "pet appointments",
                PETS_APPOINTMENTS_READ,
                PETS_APPOINTMENTS_WRITE,
                PETS_APPOINTMENTS_DELETE,
            ),
        ],
    },
    Resource {
        label: "forum",
        read: FORUM_READ,
        write: FORUM_WRITE,
        delete: FORUM_DELETE,
        children: &[
            Resource::leaf(
                "forum articles",
                FORUM_ARTICLES_READ,
                FORUM_ARTICLES_WRITE,
                FORUM_ARTICLES_DELETE,
            ),
            Resource::leaf(
                "forum categories",
                FORUM_CATEGORIES_READ,
                FORUM_CATEGORIES_WRITE,
                FORUM_CATEGORIES_DELETE,
            ),
            Resource::leaf(
                "forum reports",
                FORUM_REPORTS_READ,
                FORUM_REPORTS_WRITE,
                FORUM_REPORTS_DELETE,
            ),
        ],
    },
    Resource {
        label: "finance",
        read: FINANCE_READ,
        write: FINANCE_WRITE,
        delete: FINANCE_DELETE,
        children: &[
            Resource::leaf(
                "finance transactions",
                FINANCE_TRANSACTIONS_READ,
                FINANCE_TRANSACTIONS_WRITE,
                FINANCE_TRANSACTIONS_DELETE,
            ),
            Resource::leaf(
                "finance payments",
                FINANCE_PAYMENTS_READ,
                FINANCE_PAYMENTS_WRITE,
                FINANCE_PAYMENTS_DELETE,
            ),
            Resource::leaf(
                "finance reports",
                FINANCE_REPORTS_READ,
                FINANCE_REPORTS_WRITE,
                FINANCE_REPORTS_DELETE,
            ),
        ],
    },
    Resource {
        label: "settings",
        read: SETTINGS_READ,
        write: SETTINGS_WRITE,
        delete: SETTINGS_DELETE,
        children: &[
            Resource::leaf(
                "administrator roles",
                SETTINGS_ROLES_READ,
                SETTINGS_ROLES_WRITE,
                SETTINGS_ROLES_DELETE,
            ),
            Resource::leaf(
                "audit logs",
                SETTINGS_LOGS_READ,
                SETTINGS_LOGS_WRITE,
                SETTINGS_LOGS_DELETE,
            ),
        ],
    },
];

const SUPER_ADMIN_LABEL: &str = "Full access (super administrator)";

struct Catalog {
    flat: Vec<&'static str>,
    positions: HashMap<&'static str, usize>,
    groups: HashMap<&'static str, Vec<&'static str>>,
    labels: HashMap<&'static str, String>,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(Catalog::build);

impl Catalog {
    fn build() -> Self {
        let mut flat = vec![SUPER_ADMIN];
        let mut labels = HashMap::new();
        labels.insert(SUPER_ADMIN, SUPER_ADMIN_LABEL.to_string());

        for resource in RESOURCES {
            for node in std::iter::once(resource).chain(resource.children) {
                for (action, code) in node.codes() {
                    flat.push(code);
                    labels.insert(code, format!("{} {}", action.verb(), node.label));
                }
            }
        }

        let mut groups = HashMap::new();
        for resource in RESOURCES {
            for child in resource.children {
                groups.insert(child.write, vec![child.write, child.read]);
                groups.insert(child.delete, vec![child.delete, child.write, child.read]);
            }

            if !resource.children.is_empty() {
                let mut read = vec![resource.read];
                read.extend(resource.children.iter().map(|c| c.read));
                groups.insert(resource.read, read);
            }

            let mut write = vec![resource.write, resource.read];
            for child in resource.children {
                write.extend([child.read, child.write]);
            }

            let mut delete = vec![resource.delete];
            delete.extend(write.iter().copied());
            delete.extend(resource.children.iter().map(|c| c.delete));

            groups.insert(resource.write, write);
            groups.insert(resource.delete, delete);
        }
        groups.insert(SUPER_ADMIN, flat.clone());

        let positions = flat.iter().enumerate().map(|(i, code)| (*code, i)).collect();

        Self {
            flat,
            positions,
            groups,
            labels,
        }
    }
}

/// Every valid permission code: the sentinel first, then each resource's
/// codes in declaration order.
pub fn all_permissions() -> &'static [&'static str] {
    &CATALOG.flat
}

/// The expansion of a coarse code, itself first. `None` for leaf and
/// unregistered codes, which expand to themselves only.
pub fn group_members(code: &str) -> Option<&'static [&'static str]> {
    CATALOG.groups.get(code).map(Vec::as_slice)
}

/// A human-readable label for `code`, or `code` itself when none is registered.
pub fn describe(code: &str) -> &str {
    match CATALOG.labels.get(code) {
        Some(label) => label.as_str(),
        None => code,
    }
}

pub fn is_known(code: &str) -> bool {
    CATALOG.positions.contains_key(code)
}

/// Position of `code` in [`all_permissions`], used for display ordering.
pub fn position(code: &str) -> Option<usize> {
    CATALOG.positions.get(code).copied()
}

/// The declared resource tree.
pub fn resources() -> &'static [Resource] {
    RESOURCES
}
