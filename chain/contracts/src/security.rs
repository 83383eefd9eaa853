//! Access control for privileged vault operations
//!
//! The administrator is fixed at construction. There is no rotation and no
//! role table: a caller is either the administrator or it is not.

use tracing::warn;
use types::ids::Address;

use crate::errors::VaultError;

/// Single-administrator access control.
#[derive(Debug, Clone)]
pub struct AccessControl {
    admin: Address,
}

impl AccessControl {
    /// Create access control for `admin`. The null identity is rejected.
    pub fn new(admin: Address) -> Result<Self, VaultError> {
        if admin.is_zero() {
            return Err(VaultError::InvalidAddress { field: "admin" });
        }
        Ok(Self { admin })
    }

    /// Check if a caller is admin.
    pub fn is_admin(&self, caller: &Address) -> bool {
        *caller == self.admin
    }

    /// Fail with `NotAdmin` unless `caller` is the administrator.
    pub fn require_admin(&self, caller: &Address, operation: &'static str) -> Result<(), VaultError> {
        if !self.is_admin(caller) {
            warn!(%caller, operation, "Rejected non-admin caller");
            return Err(VaultError::NotAdmin);
        }
        Ok(())
    }

    /// Get the admin identity.
    pub fn admin(&self) -> Address {
        self.admin
    }
}
