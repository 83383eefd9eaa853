//! Types library for the NFT vault
//!
//! Identifier types shared by the custody ledger and its collaborators.
//!
//! # Version
//! v1.0.0 - Frozen
//!
//! # Modules
//! - `ids`: Account, collection and token identifiers (Address, CollectionId, TokenId, AssetRef)
//! - `errors`: Identifier parse errors

pub mod ids;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::errors::*;
}
