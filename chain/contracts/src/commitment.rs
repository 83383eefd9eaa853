//! Custody commitment — a digest of the vault's deposit records
//!
//! The root is SHA-256 over a domain tag followed by every record in
//! ascending asset order as `collection (20) || token id (8, BE) ||
//! depositor (20)`. Equal custody state gives an equal root regardless of
//! the operation history that produced it.

use sha2::{Digest, Sha256};
use types::ids::{Address, AssetRef};

const DOMAIN_TAG: &[u8] = b"nft-vault/custody/v1";

/// Compute the custody root over `records`, which must be in ascending
/// asset order.
pub fn custody_root<'a>(records: impl IntoIterator<Item = (&'a AssetRef, &'a Address)>) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(DOMAIN_TAG);
    for (asset, depositor) in records {
        hasher.update(asset.collection.address().as_bytes());
        hasher.update(asset.token_id.value().to_be_bytes());
        hasher.update(depositor.as_bytes());
    }
    hasher.finalize().into()
}

/// Hex rendering of a root, for logs and snapshots.
pub fn root_hex(root: &[u8; 32]) -> String {
    hex::encode(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use types::ids::CollectionId;

    fn asset(token: u64) -> AssetRef {
        AssetRef::new(CollectionId::from(Address::from_low_u64(0xc0)), token)
    }

    #[test]
    fn test_empty_root_is_stable() {
        let empty: BTreeMap<AssetRef, Address> = BTreeMap::new();
        assert_eq!(custody_root(empty.iter()), custody_root(empty.iter()));
    }

    #[test]
    fn test_root_independent_of_insertion_order() {
        let mut a = BTreeMap::new();
        a.insert(asset(1), Address::from_low_u64(1));
        a.insert(asset(2), Address::from_low_u64(2));

        let mut b = BTreeMap::new();
        b.insert(asset(2), Address::from_low_u64(2));
        b.insert(asset(1), Address::from_low_u64(1));

        assert_eq!(custody_root(a.iter()), custody_root(b.iter()));
    }

    #[test]
    fn test_root_binds_depositor() {
        let mut a = BTreeMap::new();
        a.insert(asset(1), Address::from_low_u64(1));
        let mut b = BTreeMap::new();
        b.insert(asset(1), Address::from_low_u64(2));

        assert_ne!(custody_root(a.iter()), custody_root(b.iter()));
    }

    #[test]
    fn test_root_hex_length() {
        let empty: BTreeMap<AssetRef, Address> = BTreeMap::new();
        assert_eq!(root_hex(&custody_root(empty.iter())).len(), 64);
    }
}
