//! Vault — NFT custody ledger, trust gate, and single-item withdrawals
//!
//! Tracks which depositor is owed each custodied asset:
//! - Deposit records keyed by `AssetRef` (at most one depositor per asset)
//! - Per-depositor index so balances and bulk withdrawals stay proportional
//!   to one depositor's holdings
//! - Trust registry gating which collections may be deposited
//! - Self-service and administrator-forced withdrawal
//!
//! Asset movement is delegated to an `AssetTransfer` collaborator. Ledger
//! bookkeeping changes only after the collaborator accepts the transfer, so
//! a rejected transfer leaves the ledger untouched.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};
use types::ids::{Address, AssetRef, CollectionId};

use crate::collaborator::AssetTransfer;
use crate::commitment;
use crate::config::VaultConfig;
use crate::errors::VaultError;
use crate::events::ContractEvent;
use crate::registry::{TrustRegistry, TrustedToken};
use crate::security::AccessControl;

/// Custodial vault for non-fungible assets.
///
/// All state-changing operations check, in order:
/// 1. Access control (where applicable)
/// 2. Trust registry / deposit record preconditions
/// 3. Collaborator transfer
#[derive(Debug)]
pub struct NftVault<C: AssetTransfer> {
    config: VaultConfig,
    access_control: AccessControl,
    registry: TrustRegistry,
    /// Deposit records: asset -> depositor
    records: BTreeMap<AssetRef, Address>,
    /// Index: depositor -> assets credited to them
    holdings: BTreeMap<Address, BTreeSet<AssetRef>>,
    collaborator: C,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl<C: AssetTransfer> NftVault<C> {
    /// Create a vault. Fails with `InvalidAddress` for a null admin or
    /// custody identity.
    pub fn new(config: VaultConfig, collaborator: C) -> Result<Self, VaultError> {
        config.validate()?;
        let access_control = AccessControl::new(config.admin)?;

        info!(
            admin = %config.admin,
            custody = %config.custody,
            max_bulk_items = config.max_bulk_items,
            "NftVault initialized"
        );

        Ok(Self {
            config,
            access_control,
            registry: TrustRegistry::new(),
            records: BTreeMap::new(),
            holdings: BTreeMap::new(),
            collaborator,
            events: Vec::new(),
        })
    }

    // ───────────────────────── Trust Registry ─────────────────────────

    /// Write trust flags. Admin-only; all-or-nothing per call.
    pub fn set_trusted_tokens(
        &mut self,
        caller: Address,
        entries: &[TrustedToken],
    ) -> Result<Vec<ContractEvent>, VaultError> {
        self.access_control
            .require_admin(&caller, "set_trusted_tokens")?;
        self.registry.apply(entries)?;

        let emitted: Vec<ContractEvent> = entries
            .iter()
            .map(|entry| {
                info!(
                    collection = %entry.collection,
                    is_trusted = entry.is_trusted,
                    "Trust flag updated"
                );
                ContractEvent::trust_updated(entry.collection, entry.is_trusted)
            })
            .collect();

        self.events.extend(emitted.iter().cloned());
        Ok(emitted)
    }

    pub fn is_trusted(&self, collection: &CollectionId) -> bool {
        self.registry.is_trusted(collection)
    }

    /// Currently trusted collections, in ascending order.
    pub fn trusted_collections(&self) -> impl Iterator<Item = &CollectionId> {
        self.registry.trusted_collections()
    }

    // ───────────────────────── Deposit ─────────────────────────

    /// Move `asset` from `caller` into vault custody and credit it to them.
    ///
    /// Validates, in order: collection trusted, caller is the current
    /// holder, no existing record. Emits `Deposited`.
    pub fn deposit(
        &mut self,
        caller: Address,
        asset: &AssetRef,
    ) -> Result<ContractEvent, VaultError> {
        if !self.registry.is_trusted(&asset.collection) {
            debug!(%asset, %caller, "Deposit rejected: untrusted collection");
            return Err(VaultError::UntrustedAsset {
                collection: asset.collection,
            });
        }

        if self.collaborator.owner_of(asset) != Some(caller) {
            debug!(%asset, %caller, "Deposit rejected: caller does not hold asset");
            return Err(VaultError::NotOwner {
                asset: *asset,
                caller,
            });
        }

        if self.records.contains_key(asset) {
            return Err(VaultError::AlreadyDeposited { asset: *asset });
        }

        self.collaborator
            .transfer_custody(asset, caller, self.config.custody)?;

        self.records.insert(*asset, caller);
        self.holdings.entry(caller).or_default().insert(*asset);

        info!(%asset, depositor = %caller, "Deposited");
        let event = ContractEvent::deposited(*asset, caller);
        self.events.push(event.clone());
        Ok(event)
    }

    // ───────────────────────── Withdrawal ─────────────────────────

    /// Release `asset` back to `caller`, who must be its recorded depositor.
    pub fn withdraw(
        &mut self,
        caller: Address,
        asset: &AssetRef,
    ) -> Result<ContractEvent, VaultError> {
        let depositor = self.recorded_depositor(asset)?;
        if depositor != caller {
            debug!(%asset, %caller, %depositor, "Withdraw rejected: caller is not depositor");
            return Err(VaultError::NotOwner {
                asset: *asset,
                caller,
            });
        }
        self.release(asset, false)
    }

    /// Admin-forced release of `asset` to its recorded depositor.
    pub fn withdraw_by_admin(
        &mut self,
        caller: Address,
        asset: &AssetRef,
    ) -> Result<ContractEvent, VaultError> {
        self.access_control
            .require_admin(&caller, "withdraw_by_admin")?;
        self.release(asset, true)
    }

    /// Transfer `asset` out of custody to its recorded depositor and drop
    /// the record. Atomic: on transfer failure nothing changes.
    pub(crate) fn release(
        &mut self,
        asset: &AssetRef,
        forced: bool,
    ) -> Result<ContractEvent, VaultError> {
        let depositor = self.recorded_depositor(asset)?;

        self.collaborator
            .transfer_custody(asset, self.config.custody, depositor)?;

        self.records.remove(asset);
        if let Some(held) = self.holdings.get_mut(&depositor) {
            held.remove(asset);
            if held.is_empty() {
                self.holdings.remove(&depositor);
            }
        }

        info!(%asset, %depositor, forced, "Withdrew");
        let event = ContractEvent::withdrew(*asset, depositor, forced);
        self.events.push(event.clone());
        Ok(event)
    }

    fn recorded_depositor(&self, asset: &AssetRef) -> Result<Address, VaultError> {
        self.records
            .get(asset)
            .copied()
            .ok_or(VaultError::NotDeposited { asset: *asset })
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    /// Number of assets currently credited to `depositor`.
    pub fn balance_of(&self, depositor: &Address) -> usize {
        self.holdings.get(depositor).map_or(0, BTreeSet::len)
    }

    /// Number of assets currently in custody.
    pub fn total_balance(&self) -> usize {
        self.records.len()
    }

    pub fn depositor_of(&self, asset: &AssetRef) -> Option<Address> {
        self.records.get(asset).copied()
    }

    pub fn is_deposited(&self, asset: &AssetRef) -> bool {
        self.records.contains_key(asset)
    }

    /// Assets credited to `depositor`, in ascending order.
    pub fn holdings_of(&self, depositor: &Address) -> impl Iterator<Item = &AssetRef> {
        self.holdings.get(depositor).into_iter().flatten()
    }

    /// All deposit records, in ascending asset order.
    pub fn records(&self) -> impl Iterator<Item = (&AssetRef, &Address)> {
        self.records.iter()
    }

    /// SHA-256 commitment over the current deposit records.
    pub fn custody_root(&self) -> [u8; 32] {
        commitment::custody_root(self.records.iter())
    }

    // ───────────────────────── Configuration ─────────────────────────

    pub fn admin(&self) -> Address {
        self.access_control.admin()
    }

    pub fn custody(&self) -> Address {
        self.config.custody
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub(crate) fn access_control(&self) -> &AccessControl {
        &self.access_control
    }

    // ───────────────────────── Collaborator ─────────────────────────

    pub fn collaborator(&self) -> &C {
        &self.collaborator
    }

    /// Mutable collaborator access, e.g. for minting and approvals in a
    /// local harness. Moving custodied assets through it bypasses the
    /// ledger.
    pub fn collaborator_mut(&mut self) -> &mut C {
        &mut self.collaborator
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }
}
