//! Vault configuration
//!
//! Identities fixed at construction plus the per-call bulk release limit.

use serde::{Deserialize, Serialize};
use types::ids::Address;

use crate::errors::VaultError;

/// Default upper bound on items released by one bulk withdrawal call.
pub const DEFAULT_MAX_BULK_ITEMS: usize = 500;

/// Construction-time configuration for an `NftVault`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Privileged identity for trust updates and forced withdrawals.
    pub admin: Address,
    /// The vault's own identity at the asset collaborator. Deposits move
    /// assets to this address and withdrawals move them out of it.
    pub custody: Address,
    /// Maximum number of items one `withdraw_all*` call releases.
    #[serde(default = "default_max_bulk_items")]
    pub max_bulk_items: usize,
}

fn default_max_bulk_items() -> usize {
    DEFAULT_MAX_BULK_ITEMS
}

impl VaultConfig {
    pub fn new(admin: Address, custody: Address) -> Self {
        Self {
            admin,
            custody,
            max_bulk_items: DEFAULT_MAX_BULK_ITEMS,
        }
    }

    pub fn with_max_bulk_items(mut self, max_bulk_items: usize) -> Self {
        self.max_bulk_items = max_bulk_items;
        self
    }

    /// Reject null identities and a zero bulk limit.
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.admin.is_zero() {
            return Err(VaultError::InvalidAddress { field: "admin" });
        }
        if self.custody.is_zero() {
            return Err(VaultError::InvalidAddress { field: "custody" });
        }
        if self.max_bulk_items == 0 {
            return Err(VaultError::InvalidConfig {
                reason: "max_bulk_items must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
