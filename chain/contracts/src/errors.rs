//! Contract-specific error types
//!
//! Error taxonomy for custody, trust registry, collaborator transfers, and
//! bulk withdrawals. Every rejected precondition maps to its own variant.

use thiserror::Error;
use types::ids::{Address, AssetRef, CollectionId};

/// Failures reported by an asset transfer collaborator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    #[error("Unknown token: {asset}")]
    UnknownToken { asset: AssetRef },

    #[error("Transfer source does not hold {asset}: held by {holder}")]
    NotHolder { asset: AssetRef, holder: Address },

    #[error("Operator {operator} is not approved to move {asset}")]
    NotApproved { asset: AssetRef, operator: Address },

    #[error("Transfer to the zero address")]
    ZeroDestination,

    #[error("Token already minted: {asset}")]
    AlreadyMinted { asset: AssetRef },

    #[error("Token ids exhausted in collection {collection}")]
    IdsExhausted { collection: CollectionId },
}

/// Vault-specific errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("Invalid address: null identity supplied for {field}")]
    InvalidAddress { field: &'static str },

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Untrusted collection: {collection}")]
    UntrustedAsset { collection: CollectionId },

    #[error("Caller {caller} does not own {asset}")]
    NotOwner { asset: AssetRef, caller: Address },

    #[error("Already deposited: {asset}")]
    AlreadyDeposited { asset: AssetRef },

    #[error("Not deposited: {asset}")]
    NotDeposited { asset: AssetRef },

    #[error("Unauthorized: caller is not admin")]
    NotAdmin,

    #[error("Transfer rejected: {0}")]
    TransferRejected(#[from] TransferError),
}

/// Bulk withdrawal errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BulkWithdrawalError {
    #[error("Vault error: {0}")]
    Vault(#[from] VaultError),

    #[error("Nothing to withdraw")]
    NothingToWithdraw,
}
