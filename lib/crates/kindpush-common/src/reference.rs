use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest reference accepted, matching the container runtime's name limit.
pub const MAX_REFERENCE_LEN: usize = 255;

/// Why a string was refused as an image reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("image reference is empty")]
    Empty,

    #[error("image reference is {0} bytes long (max {MAX_REFERENCE_LEN})")]
    TooLong(usize),

    #[error("image reference '{0}' contains whitespace or control characters")]
    InvalidCharacter(String),
}

/// An image reference such as `kind.local/app:v1` or `repo@sha256:...`.
///
/// Only a shallow sanity check is done here: the value ends up as a single
/// argument of a command run inside a node, so it must be non-empty and free
/// of whitespace. The full reference grammar is left to the container runtime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageRef(String);

impl ImageRef {
    /// Validate and wrap `value`.
    pub fn new(value: impl Into<String>) -> Result<Self, ReferenceError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ReferenceError::Empty);
        }
        if value.len() > MAX_REFERENCE_LEN {
            return Err(ReferenceError::TooLong(value.len()));
        }
        if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ReferenceError::InvalidCharacter(value));
        }
        Ok(Self(value))
    }

    /// The canonical string form passed to the runtime.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ImageRef {
    type Err = ReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ImageRef {
    type Error = ReferenceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImageRef> for String {
    fn from(value: ImageRef) -> Self {
        value.0
    }
}

impl AsRef<str> for ImageRef {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
