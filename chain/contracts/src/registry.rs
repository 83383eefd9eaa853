//! Trust registry — allow-list of depositable collections
//!
//! Unknown collections are untrusted. Writes are batched: every entry in a
//! batch is validated before any flag is written, so a batch containing a
//! null collection id changes nothing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use types::ids::CollectionId;

use crate::errors::VaultError;

/// One trust-flag write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustedToken {
    pub collection: CollectionId,
    pub is_trusted: bool,
}

impl TrustedToken {
    pub fn trusted(collection: CollectionId) -> Self {
        Self {
            collection,
            is_trusted: true,
        }
    }

    pub fn untrusted(collection: CollectionId) -> Self {
        Self {
            collection,
            is_trusted: false,
        }
    }
}

/// Collection trust flags.
#[derive(Debug, Clone, Default)]
pub struct TrustRegistry {
    flags: BTreeMap<CollectionId, bool>,
}

impl TrustRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert every entry. Idempotent.
    pub fn apply(&mut self, entries: &[TrustedToken]) -> Result<(), VaultError> {
        if entries.iter().any(|entry| entry.collection.is_zero()) {
            return Err(VaultError::InvalidAddress { field: "collection" });
        }
        for entry in entries {
            self.flags.insert(entry.collection, entry.is_trusted);
        }
        Ok(())
    }

    pub fn is_trusted(&self, collection: &CollectionId) -> bool {
        self.flags.get(collection).copied().unwrap_or(false)
    }

    /// Currently trusted collections, in ascending order.
    pub fn trusted_collections(&self) -> impl Iterator<Item = &CollectionId> {
        self.flags
            .iter()
            .filter(|(_, trusted)| **trusted)
            .map(|(collection, _)| collection)
    }
}
