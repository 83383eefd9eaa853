//! Asset transfer collaborator
//!
//! The vault never moves tokens itself. It asks a collaborator who owns an
//! asset and asks it to move custody. `InMemoryCollections` is an
//! ERC-721-style implementation for tests and for embedders without an
//! external token system.

use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;
use types::ids::{Address, AssetRef, CollectionId, TokenId};

use crate::errors::TransferError;

/// External ownership and transfer surface consumed by the vault.
pub trait AssetTransfer {
    /// Current holder of `asset`, or `None` if the token does not exist.
    fn owner_of(&self, asset: &AssetRef) -> Option<Address>;

    /// Move `asset` from `from` to `to`.
    ///
    /// Must fail without side effects if `from` is not the holder or the
    /// transfer is not authorised.
    fn transfer_custody(
        &mut self,
        asset: &AssetRef,
        from: Address,
        to: Address,
    ) -> Result<(), TransferError>;
}

/// In-memory non-fungible token collections.
///
/// Transfers are evaluated on behalf of a single `operator` (the identity
/// calling into the collections, normally the vault's custody address).
/// A transfer is authorised when the operator is the holder, holds the
/// per-token approval, or is approved for all of the holder's tokens.
#[derive(Debug, Clone)]
pub struct InMemoryCollections {
    operator: Address,
    owners: BTreeMap<AssetRef, Address>,
    token_approvals: HashMap<AssetRef, Address>,
    /// (owner, operator) pairs
    operator_approvals: HashSet<(Address, Address)>,
    next_ids: HashMap<CollectionId, u64>,
}

impl InMemoryCollections {
    pub fn new(operator: Address) -> Self {
        Self {
            operator,
            owners: BTreeMap::new(),
            token_approvals: HashMap::new(),
            operator_approvals: HashSet::new(),
            next_ids: HashMap::new(),
        }
    }

    pub fn operator(&self) -> Address {
        self.operator
    }

    /// Mint a specific token id to `to`.
    pub fn mint(
        &mut self,
        collection: CollectionId,
        to: Address,
        token_id: impl Into<TokenId>,
    ) -> Result<AssetRef, TransferError> {
        if to.is_zero() {
            return Err(TransferError::ZeroDestination);
        }
        let asset = AssetRef::new(collection, token_id);
        if self.owners.contains_key(&asset) {
            return Err(TransferError::AlreadyMinted { asset });
        }

        self.owners.insert(asset, to);
        let next = self.next_ids.entry(collection).or_insert(1);
        if let Some(after) = asset.token_id.value().checked_add(1) {
            *next = (*next).max(after);
        }

        debug!(%asset, %to, "Minted token");
        Ok(asset)
    }

    /// Mint the next unused token id in `collection` (ids start at 1).
    ///
    /// Fails with `IdsExhausted` once the scan runs past `u64::MAX`.
    pub fn mint_next(
        &mut self,
        collection: CollectionId,
        to: Address,
    ) -> Result<AssetRef, TransferError> {
        let mut id = self.next_ids.get(&collection).copied().unwrap_or(1);
        while self.owners.contains_key(&AssetRef::new(collection, id)) {
            id = id
                .checked_add(1)
                .ok_or(TransferError::IdsExhausted { collection })?;
        }
        self.mint(collection, to, id)
    }

    /// Approve `spender` to move a single token held by `owner`.
    pub fn approve(
        &mut self,
        owner: Address,
        asset: &AssetRef,
        spender: Address,
    ) -> Result<(), TransferError> {
        let holder = self
            .owners
            .get(asset)
            .copied()
            .ok_or(TransferError::UnknownToken { asset: *asset })?;
        if holder != owner {
            return Err(TransferError::NotHolder {
                asset: *asset,
                holder,
            });
        }
        self.token_approvals.insert(*asset, spender);
        Ok(())
    }

    /// Grant or revoke `operator` control over all of `owner`'s tokens.
    pub fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool) {
        if approved {
            self.operator_approvals.insert((owner, operator));
        } else {
            self.operator_approvals.remove(&(owner, operator));
        }
    }

    pub fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.operator_approvals.contains(&(*owner, *operator))
    }

    pub fn get_approved(&self, asset: &AssetRef) -> Option<Address> {
        self.token_approvals.get(asset).copied()
    }

    /// Number of tokens in `collection` held by `owner`.
    pub fn balance_of(&self, collection: &CollectionId, owner: &Address) -> usize {
        self.owners
            .iter()
            .filter(|(asset, holder)| asset.collection == *collection && *holder == owner)
            .count()
    }

    fn is_authorised(&self, asset: &AssetRef, from: &Address) -> bool {
        *from == self.operator
            || self.token_approvals.get(asset) == Some(&self.operator)
            || self.is_approved_for_all(from, &self.operator)
    }
}

impl AssetTransfer for InMemoryCollections {
    fn owner_of(&self, asset: &AssetRef) -> Option<Address> {
        self.owners.get(asset).copied()
    }

    fn transfer_custody(
        &mut self,
        asset: &AssetRef,
        from: Address,
        to: Address,
    ) -> Result<(), TransferError> {
        let holder = self
            .owner_of(asset)
            .ok_or(TransferError::UnknownToken { asset: *asset })?;
        if holder != from {
            return Err(TransferError::NotHolder {
                asset: *asset,
                holder,
            });
        }
        if to.is_zero() {
            return Err(TransferError::ZeroDestination);
        }
        if !self.is_authorised(asset, &from) {
            return Err(TransferError::NotApproved {
                asset: *asset,
                operator: self.operator,
            });
        }

        self.token_approvals.remove(asset);
        self.owners.insert(*asset, to);
        debug!(%asset, %from, %to, "Transferred token");
        Ok(())
    }
}
