//! Parsing of raw administrator privilege strings.
//!
//! A raw privilege string is stored per administrator. It is one of:
//!
//! - the sentinel `"111"` (full access),
//! - a legacy single-token alias (`"donation"` or `"general"`) kept for
//!   accounts created before hierarchical codes existed,
//! - a comma-separated list of permission codes.
//!
//! [`Privilege::parse`] classifies a raw string into exactly one of these
//! shapes before any expansion runs.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::catalog::{
    FINANCE_READ, FINANCE_TRANSACTIONS_READ, MEMBERS_READ, SHOP_READ, SUPER_ADMIN,
};

pub const LEGACY_DONATION: &str = "donation";
pub const LEGACY_GENERAL: &str = "general";

const DONATION_PERMISSIONS: &[&str] = &[LEGACY_DONATION, FINANCE_READ, FINANCE_TRANSACTIONS_READ];
const GENERAL_PERMISSIONS: &[&str] = &[LEGACY_GENERAL, MEMBERS_READ, SHOP_READ];

/// Pre-hierarchical privilege values with a fixed expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LegacyAlias {
    Donation,
    General,
}

impl LegacyAlias {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            LEGACY_DONATION => Some(LegacyAlias::Donation),
            LEGACY_GENERAL => Some(LegacyAlias::General),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            LegacyAlias::Donation => LEGACY_DONATION,
            LegacyAlias::General => LEGACY_GENERAL,
        }
    }

    /// The complete, hard-coded expansion of this alias.
    pub fn permissions(self) -> &'static [&'static str] {
        match self {
            LegacyAlias::Donation => DONATION_PERMISSIONS,
            LegacyAlias::General => GENERAL_PERMISSIONS,
        }
    }
}

/// A classified raw privilege string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Privilege {
    /// Unconditional full access.
    Sentinel,
    Legacy(LegacyAlias),
    /// Trimmed, non-empty tokens in their stored order. Empty for an empty
    /// or absent privilege string.
    Codes(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrivilegeError {
    #[error("invalid character {ch:?} in privilege token {token:?}")]
    InvalidToken { token: String, ch: char },
}

fn is_token_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ':' | '_' | '-' | '.')
}

/// Whether `raw` is the full-access sentinel. Surrounding whitespace is ignored.
pub fn is_sentinel(raw: &str) -> bool {
    raw.trim() == SUPER_ADMIN
}

impl Privilege {
    /// Classify a raw privilege string.
    ///
    /// The sentinel and legacy aliases must be the whole (trimmed) string.
    /// Anything else is split on commas; empty tokens are dropped. A token
    /// with characters outside `[A-Za-z0-9_:.-]` makes the string malformed.
    pub fn parse(raw: Option<&str>) -> Result<Self, PrivilegeError> {
        let raw = raw.map(str::trim).unwrap_or_default();

        if raw == SUPER_ADMIN {
            return Ok(Privilege::Sentinel);
        }
        if let Some(alias) = LegacyAlias::from_token(raw) {
            return Ok(Privilege::Legacy(alias));
        }

        let mut codes = Vec::new();
        for token in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if let Some(ch) = token.chars().find(|c| !is_token_char(*c)) {
                return Err(PrivilegeError::InvalidToken {
                    token: token.to_string(),
                    ch,
                });
            }
            codes.push(token.to_string());
        }

        Ok(Privilege::Codes(codes))
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self, Privilege::Sentinel)
    }

    /// True for an absent or empty privilege string (deny-all).
    pub fn is_empty(&self) -> bool {
        matches!(self, Privilege::Codes(codes) if codes.is_empty())
    }
}

impl FromStr for Privilege {
    type Err = PrivilegeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Privilege::parse(Some(s))
    }
}

impl fmt::Display for Privilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Privilege::Sentinel => f.write_str(SUPER_ADMIN),
            Privilege::Legacy(alias) => f.write_str(alias.token()),
            Privilege::Codes(codes) => f.write_str(&codes.join(",")),
        }
    }
}
