//! Content fingerprints for entities
//!
//! A fingerprint covers every significant field of an entity, including its
//! kind, so two entities share a fingerprint exactly when they compare equal.

use sha2::{Digest, Sha256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::Entity;

/// SHA256 fingerprint of an entity's canonical JSON form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Compute fingerprint from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute fingerprint of an entity
    pub fn of(entity: &Entity) -> Self {
        // Entity fields serialize in declaration order, which keeps this stable
        let canonical = serde_json::to_string(entity).unwrap_or_default();
        Self::from_bytes(canonical.as_bytes())
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix for display
    pub fn short(&self) -> &str {
        &self.0[..12.min(self.0.len())]
    }

    /// Verify that an entity matches this fingerprint
    pub fn verify(&self, entity: &Entity) -> bool {
        *self == Self::of(entity)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Fingerprint {
    fn from(s: String) -> Self {
        Self(s)
    }
}
