//! Diagram identifiers.
//!
//! This module provides the [`DiagramId`] type, an opaque string identifier
//! that names a diagram in storage and in editor routes.

use std::{borrow::Borrow, fmt, str::FromStr};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of identifiers produced by [`DiagramId::generate`].
pub const GENERATED_ID_LEN: usize = 12;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Error returned when a string cannot be used as a [`DiagramId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("diagram id must not be empty")]
    Empty,

    #[error("diagram id `{0}` must not contain `/` or whitespace")]
    InvalidChar(String),
}

/// Opaque identifier of a stored diagram.
///
/// Identifiers are non-empty and free of path separators and whitespace so
/// that they can be embedded in routes and used as file stems.
///
/// # Examples
///
/// ```
/// use chartroom_core::identifier::DiagramId;
///
/// let id = DiagramId::new("abc123").unwrap();
/// assert_eq!(id, "abc123");
/// assert!(DiagramId::new("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DiagramId(String);

impl DiagramId {
    /// Creates a `DiagramId` after validating `value`.
    ///
    /// # Errors
    ///
    /// Returns [`IdError`] if the value is empty or contains `/` or
    /// whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if value.chars().any(|c| c == '/' || c.is_whitespace()) {
            return Err(IdError::InvalidChar(value));
        }
        Ok(Self(value))
    }

    /// Generates a random lowercase alphanumeric identifier.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..GENERATED_ID_LEN)
            .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DiagramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DiagramId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for DiagramId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiagramId> for String {
    fn from(id: DiagramId) -> Self {
        id.0
    }
}

impl AsRef<str> for DiagramId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DiagramId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for DiagramId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for DiagramId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
