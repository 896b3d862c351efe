//! Cache key generation.

fn build_key(prefix: &str, parts: &[&str]) -> String {
    format!("{}:{}", prefix, parts.join(":"))
}

/// Cache keys for administrator data.
pub mod admins {
    use super::*;

    /// Key for an administrator's expanded permissions.
    pub fn permissions(prefix: &str, admin_id: i64) -> String {
        build_key(prefix, &["admin", &admin_id.to_string(), "permissions"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_permissions_key() {
        assert_eq!(admins::permissions("pawhub", 42), "pawhub:admin:42:permissions");
        assert_ne!(admins::permissions("pawhub", 1), admins::permissions("pawhub", 11));
    }
}
