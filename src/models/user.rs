// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Board participant identity (UI-agnostic).

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{BoardError, Result};

static ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.]+@[\w.]+\.\w{2,}$").expect("address pattern is valid"));

/// Validated participant: contact address plus alphanumeric display name.
///
/// Immutable once built; postings share it through an `Arc` instead of copying.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct User {
    address: String,
    name: String,
}

impl User {
    /// Build a user after validating both fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidIdentity`] when the address is not shaped like
    /// `local@domain.tld`, or the name is empty or contains anything but ASCII letters and
    /// digits. The address is checked first.
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let address = address.into();
        let name = name.into();

        if !is_valid_address(&address) {
            return Err(BoardError::invalid_identity(
                "address must look like 'username@domain.tld'",
            ));
        }
        if !is_valid_name(&name) {
            return Err(BoardError::invalid_identity(
                "name must contain only letters and digits",
            ));
        }

        Ok(Self { address, name })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Legacy display form, also the owner column of 7-field records.
impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[email= {}, nome= {}]", self.address, self.name)
    }
}

fn is_valid_address(address: &str) -> bool {
    ADDRESS_RE.is_match(address)
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    // A conventional address and alphanumeric name are accepted as-is.
    #[test]
    fn new_accepts_valid_fields() {
        let user = User::new("giovanni.neri@example.com", "giovanniNeri").unwrap();
        assert_eq!(user.address(), "giovanni.neri@example.com");
        assert_eq!(user.name(), "giovanniNeri");
    }

    // Addresses without a domain suffix or an @ are rejected.
    #[test]
    fn new_rejects_malformed_addresses() {
        for bad in ["", "plain", "user@domain", "user@.c", "us er@example.com"] {
            let err = User::new(bad, "mario").unwrap_err();
            assert!(matches!(err, BoardError::InvalidIdentity(_)), "{bad}");
        }
    }

    // Names must be non-empty ASCII alphanumerics, no spaces or punctuation.
    #[test]
    fn new_rejects_bad_names() {
        for bad in ["", "mario rossi", "mario_rossi", "mario!", "Mirè"] {
            let err = User::new("mario@example.com", bad).unwrap_err();
            assert!(matches!(err, BoardError::InvalidIdentity(_)), "{bad:?}");
        }
    }

    // The address is validated before the name.
    #[test]
    fn address_error_wins_over_name_error() {
        let err = User::new("nope", "bad name").unwrap_err();
        assert!(err.to_string().contains("address"));
    }

    // Equality is structural over both fields.
    #[test]
    fn equality_is_structural() {
        let a = User::new("a@example.com", "anna").unwrap();
        let b = User::new("a@example.com", "anna").unwrap();
        let c = User::new("a@example.com", "anna2").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    // Display renders the legacy owner column.
    #[test]
    fn display_uses_legacy_owner_form() {
        let user = User::new("a@example.com", "anna").unwrap();
        assert_eq!(user.to_string(), "[email= a@example.com, nome= anna]");
    }
}
