//! Opaque identifier type for diagram entities.
//!
//! This module provides the [`Ptr`] type: a globally-unique, copyable
//! identifier minted once per entity within an extraction pass. Pointers have
//! no meaning across passes; every pass mints a fresh set.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An opaque identifier for a node, edge, or pointer mirror in a diagram.
///
/// Backed by a random UUID. Two pointers are equal only if one was copied
/// from the other; minting always produces a distinct value.
///
/// # Examples
///
/// ```
/// use armature_core::identifier::Ptr;
///
/// let a = Ptr::random();
/// let b = Ptr::random();
/// assert_ne!(a, b);
/// assert_eq!(a, a);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ptr(Uuid);

impl Ptr {
    /// Mints a fresh, globally-unique pointer.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil pointer, used only as a placeholder in tests.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl fmt::Display for Ptr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for Ptr {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
