//! Special types that may require validation to ensure they don't contain invalid values.

use crate::error::InvalidEmail;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::convert::TryFrom;
use std::fmt;

/// An email address a user can be reached at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email {
    address: String,
}

impl Email {
    /// Creates a new email address, verifying that it has a local part and a
    /// domain separated by a single `@`, and no whitespace.
    pub fn new<S: Into<String>>(address: S) -> Result<Email, InvalidEmail> {
        let address = address.into();

        let well_formed = match address.split_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
            None => false,
        };

        if !well_formed || address.chars().any(char::is_whitespace) {
            Err(InvalidEmail)
        } else {
            Ok(Email {
                address,
            })
        }
    }

    /// Provides access to the address as a `&str`.
    pub fn as_str(&self) -> &str {
        self.address.borrow()
    }
}

impl Borrow<str> for Email {
    fn borrow(&self) -> &str {
        self.address.borrow()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl TryFrom<String> for Email {
    type Error = InvalidEmail;

    fn try_from(address: String) -> Result<Self, Self::Error> {
        Email::new(address)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.address
    }
}
