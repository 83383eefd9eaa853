//! NFT Vault — custody ledger for non-fungible assets
//!
//! This crate implements a custodial vault that holds non-fungible tokens on
//! behalf of depositors, gates deposits on a trusted-collection allow-list,
//! and lets an administrator force-release custody back to depositors.
//!
//! # Modules
//! - `events`: Contract events (`Deposited`, `Withdrew`, `TrustUpdated`)
//! - `errors`: Contract-specific error types
//! - `config`: Construction-time vault configuration
//! - `security`: Single-administrator access control
//! - `registry`: Trusted collection allow-list
//! - `collaborator`: Asset transfer collaborator trait and in-memory collections
//! - `vault`: Custody ledger, deposits, single-item withdrawals, queries
//! - `withdrawal`: Bulk withdrawal for a depositor or the whole vault
//! - `commitment`: Custody root over the deposit records
//!
//! The vault is a serial state machine: every operation takes `&mut self`
//! and completes (including its collaborator call) before the next begins.
//!
//! # Version
//! v0.1.0 — Initial implementation

pub mod errors;
pub mod events;
pub mod config;
pub mod security;
pub mod registry;
pub mod collaborator;
pub mod vault;
pub mod withdrawal;
pub mod commitment;

pub use collaborator::{AssetTransfer, InMemoryCollections};
pub use config::VaultConfig;
pub use errors::{BulkWithdrawalError, TransferError, VaultError};
pub use events::ContractEvent;
pub use registry::TrustedToken;
pub use vault::NftVault;
pub use withdrawal::BulkWithdrawal;

/// Contract ABI version — frozen after release
pub const CONTRACT_ABI_VERSION: &str = "1.0.0";
