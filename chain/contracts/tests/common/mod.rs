//! Shared fixture for vault integration tests
//!
//! Signers, a vault with one trusted collection, and batch mint/deposit
//! helpers.

#![allow(dead_code)]

use std::collections::HashSet;

use nft_vault::{
    AssetTransfer, InMemoryCollections, NftVault, TransferError, TrustedToken, VaultConfig,
};
use types::ids::{Address, AssetRef, CollectionId};

pub const DEPLOYER: Address = Address::new([0xd0; 20]);
pub const OPERATOR: Address = Address::new([0x0a; 20]);
pub const PLAYER1: Address = Address::new([0x01; 20]);
pub const PLAYER2: Address = Address::new([0x02; 20]);
pub const CUSTODY: Address = Address::new([0xcc; 20]);

pub type Vault = NftVault<InMemoryCollections>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn nft() -> CollectionId {
    CollectionId::new(Address::new([0xee; 20]))
}

pub fn untrusted_nft() -> CollectionId {
    CollectionId::new(Address::new([0xbd; 20]))
}

/// Vault administered by `OPERATOR` with `nft()` trusted.
pub fn setup_vault() -> Vault {
    setup_vault_with(VaultConfig::new(OPERATOR, CUSTODY))
}

pub fn setup_vault_with(config: VaultConfig) -> Vault {
    init_tracing();
    let mut vault = NftVault::new(config, InMemoryCollections::new(CUSTODY)).unwrap();
    vault
        .set_trusted_tokens(OPERATOR, &[TrustedToken::trusted(nft())])
        .unwrap();
    vault
}

/// Mint `quantity` fresh tokens of `collection` to `to`, with the vault
/// approved to move them.
pub fn batch_mint<C>(
    vault: &mut NftVault<C>,
    collections: impl Fn(&mut C) -> &mut InMemoryCollections,
    collection: CollectionId,
    quantity: usize,
    to: Address,
) -> Vec<AssetRef>
where
    C: AssetTransfer,
{
    let minter = collections(vault.collaborator_mut());
    minter.set_approval_for_all(to, CUSTODY, true);
    (0..quantity)
        .map(|_| minter.mint_next(collection, to).unwrap())
        .collect()
}

/// `batch_mint` against a plain in-memory vault.
pub fn mint(vault: &mut Vault, quantity: usize, to: Address) -> Vec<AssetRef> {
    batch_mint(vault, |c| c, nft(), quantity, to)
}

pub fn batch_deposit<C: AssetTransfer>(vault: &mut NftVault<C>, ids: &[AssetRef], owner: Address) {
    for asset in ids {
        vault.deposit(owner, asset).unwrap();
    }
}

/// In-memory collections that refuse to move selected assets.
#[derive(Debug)]
pub struct FreezingCollections {
    pub inner: InMemoryCollections,
    pub frozen: HashSet<AssetRef>,
}

impl FreezingCollections {
    pub fn new() -> Self {
        Self {
            inner: InMemoryCollections::new(CUSTODY),
            frozen: HashSet::new(),
        }
    }
}

impl AssetTransfer for FreezingCollections {
    fn owner_of(&self, asset: &AssetRef) -> Option<Address> {
        self.inner.owner_of(asset)
    }

    fn transfer_custody(
        &mut self,
        asset: &AssetRef,
        from: Address,
        to: Address,
    ) -> Result<(), TransferError> {
        if self.frozen.contains(asset) {
            return Err(TransferError::NotApproved {
                asset: *asset,
                operator: self.inner.operator(),
            });
        }
        self.inner.transfer_custody(asset, from, to)
    }
}

pub fn setup_freezing_vault() -> NftVault<FreezingCollections> {
    setup_freezing_vault_with(VaultConfig::new(OPERATOR, CUSTODY))
}

pub fn setup_freezing_vault_with(config: VaultConfig) -> NftVault<FreezingCollections> {
    init_tracing();
    let mut vault = NftVault::new(config, FreezingCollections::new()).unwrap();
    vault
        .set_trusted_tokens(OPERATOR, &[TrustedToken::trusted(nft())])
        .unwrap();
    vault
}
