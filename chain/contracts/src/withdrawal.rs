//! Bulk withdrawal — release every held asset for a depositor, or for the
//! whole vault on the administrator's behalf
//!
//! A bulk call is a sequence of single-item releases, not one transaction:
//! - Items are attempted in ascending `AssetRef` order
//! - An item whose transfer fails stays held and is reported in `failed`;
//!   the call moves on to the next item
//! - At most `max_bulk_items` items are released per call; the rest stay
//!   held and a follow-up call continues where this one stopped

use tracing::{debug, info, warn};
use types::ids::{Address, AssetRef};

use crate::collaborator::AssetTransfer;
use crate::commitment::root_hex;
use crate::errors::{BulkWithdrawalError, VaultError};
use crate::events::ContractEvent;
use crate::vault::NftVault;

/// Outcome of one bulk withdrawal call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkWithdrawal {
    /// One `Withdrew` event per released item, in release order.
    pub events: Vec<ContractEvent>,
    /// Items attempted in this call that stayed in custody, with the reason.
    pub failed: Vec<(AssetRef, VaultError)>,
    /// Items still held in the scope of the call (the caller's holdings, or
    /// the whole vault for the admin variant). Includes `failed` items.
    pub remaining: usize,
}

impl BulkWithdrawal {
    pub fn released(&self) -> usize {
        self.events.len()
    }

    /// Nothing left in scope after this call.
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

impl<C: AssetTransfer> NftVault<C> {
    /// Release every asset credited to `caller` back to them.
    pub fn withdraw_all(&mut self, caller: Address) -> Result<BulkWithdrawal, BulkWithdrawalError> {
        let scope: Vec<AssetRef> = self.holdings_of(&caller).copied().collect();
        if scope.is_empty() {
            return Err(BulkWithdrawalError::NothingToWithdraw);
        }

        let (events, failed) = self.release_batch(&scope, false);
        let outcome = BulkWithdrawal {
            events,
            failed,
            remaining: self.balance_of(&caller),
        };

        info!(
            depositor = %caller,
            released = outcome.released(),
            failed = outcome.failed.len(),
            remaining = outcome.remaining,
            "Bulk withdrawal finished"
        );
        Ok(outcome)
    }

    /// Admin-forced release of every asset in custody, each to its recorded
    /// depositor.
    pub fn withdraw_all_by_admin(
        &mut self,
        caller: Address,
    ) -> Result<BulkWithdrawal, BulkWithdrawalError> {
        self.access_control()
            .require_admin(&caller, "withdraw_all_by_admin")?;

        let scope: Vec<AssetRef> = self.records().map(|(asset, _)| *asset).collect();
        if scope.is_empty() {
            return Err(BulkWithdrawalError::NothingToWithdraw);
        }

        let (events, failed) = self.release_batch(&scope, true);
        let outcome = BulkWithdrawal {
            events,
            failed,
            remaining: self.total_balance(),
        };

        info!(
            released = outcome.released(),
            failed = outcome.failed.len(),
            remaining = outcome.remaining,
            "Forced bulk withdrawal finished"
        );
        debug!(custody_root = %root_hex(&self.custody_root()), "Custody root after forced withdrawal");
        Ok(outcome)
    }

    /// Attempt each item in `scope` until `max_bulk_items` have been
    /// released. Failed attempts do not count toward the limit.
    fn release_batch(
        &mut self,
        scope: &[AssetRef],
        forced: bool,
    ) -> (Vec<ContractEvent>, Vec<(AssetRef, VaultError)>) {
        let limit = self.config().max_bulk_items;
        let mut events = Vec::with_capacity(scope.len().min(limit));
        let mut failed = Vec::new();

        for asset in scope {
            if events.len() == limit {
                break;
            }
            match self.release(asset, forced) {
                Ok(event) => events.push(event),
                Err(err) => {
                    warn!(%asset, forced, error = %err, "Bulk withdrawal skipped item");
                    failed.push((*asset, err));
                }
            }
        }

        (events, failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::InMemoryCollections;
    use crate::config::VaultConfig;
    use crate::errors::VaultError;
    use crate::events::EventKind;
    use crate::registry::TrustedToken;
    use types::ids::CollectionId;

    const ADMIN: Address = Address::new([0x0a; 20]);
    const CUSTODY: Address = Address::new([0xcc; 20]);
    const PLAYER1: Address = Address::new([0x01; 20]);
    const PLAYER2: Address = Address::new([0x02; 20]);

    fn nft() -> CollectionId {
        CollectionId::new(Address::new([0xee; 20]))
    }

    fn setup(max_bulk_items: usize) -> NftVault<InMemoryCollections> {
        let config = VaultConfig::new(ADMIN, CUSTODY).with_max_bulk_items(max_bulk_items);
        let mut vault = NftVault::new(config, InMemoryCollections::new(CUSTODY)).unwrap();
        vault
            .set_trusted_tokens(ADMIN, &[TrustedToken::trusted(nft())])
            .unwrap();
        vault
    }

    fn fund(vault: &mut NftVault<InMemoryCollections>, owner: Address, count: usize) -> Vec<AssetRef> {
        vault
            .collaborator_mut()
            .set_approval_for_all(owner, CUSTODY, true);
        (0..count)
            .map(|_| {
                let asset = vault.collaborator_mut().mint_next(nft(), owner).unwrap();
                vault.deposit(owner, &asset).unwrap();
                asset
            })
            .collect()
    }

    #[test]
    fn test_withdraw_all_releases_only_callers_assets() {
        let mut vault = setup(100);
        let mine = fund(&mut vault, PLAYER1, 3);
        fund(&mut vault, PLAYER2, 2);

        let outcome = vault.withdraw_all(PLAYER1).unwrap();
        assert_eq!(outcome.released(), 3);
        assert!(outcome.is_complete());
        assert_eq!(vault.balance_of(&PLAYER1), 0);
        assert_eq!(vault.balance_of(&PLAYER2), 2);
        assert_eq!(vault.total_balance(), 2);

        for asset in &mine {
            assert_eq!(vault.collaborator().owner_of(asset), Some(PLAYER1));
        }
    }

    #[test]
    fn test_withdraw_all_events_in_asset_order() {
        let mut vault = setup(100);
        let mut assets = fund(&mut vault, PLAYER1, 4);
        assets.sort();

        let outcome = vault.withdraw_all(PLAYER1).unwrap();
        let released: Vec<AssetRef> = outcome
            .events
            .iter()
            .filter_map(|e| e.asset().copied())
            .collect();
        assert_eq!(released, assets);
        assert!(outcome.events.iter().all(|e| e.kind() == EventKind::Withdrew));
    }

    #[test]
    fn test_withdraw_all_nothing_held() {
        let mut vault = setup(100);
        assert_eq!(
            vault.withdraw_all(PLAYER1),
            Err(BulkWithdrawalError::NothingToWithdraw)
        );
    }

    #[test]
    fn test_withdraw_all_respects_limit() {
        let mut vault = setup(2);
        fund(&mut vault, PLAYER1, 5);

        let first = vault.withdraw_all(PLAYER1).unwrap();
        assert_eq!(first.released(), 2);
        assert_eq!(first.remaining, 3);
        assert!(!first.is_complete());

        let second = vault.withdraw_all(PLAYER1).unwrap();
        assert_eq!(second.remaining, 1);

        let third = vault.withdraw_all(PLAYER1).unwrap();
        assert!(third.is_complete());
        assert_eq!(vault.balance_of(&PLAYER1), 0);
    }

    #[test]
    fn test_withdraw_all_by_admin() {
        let mut vault = setup(100);
        let p1 = fund(&mut vault, PLAYER1, 2);
        let p2 = fund(&mut vault, PLAYER2, 3);

        let outcome = vault.withdraw_all_by_admin(ADMIN).unwrap();
        assert_eq!(outcome.released(), 5);
        assert!(outcome.is_complete());
        assert_eq!(vault.total_balance(), 0);

        for asset in &p1 {
            assert_eq!(vault.collaborator().owner_of(asset), Some(PLAYER1));
        }
        for asset in &p2 {
            assert_eq!(vault.collaborator().owner_of(asset), Some(PLAYER2));
        }
    }

    #[test]
    fn test_withdraw_all_by_admin_unauthorized() {
        let mut vault = setup(100);
        fund(&mut vault, PLAYER1, 2);

        assert_eq!(
            vault.withdraw_all_by_admin(PLAYER1),
            Err(BulkWithdrawalError::Vault(VaultError::NotAdmin))
        );
        assert_eq!(vault.total_balance(), 2);
        assert_eq!(vault.balance_of(&PLAYER1), 2);
    }

    #[test]
    fn test_withdraw_all_by_admin_empty_vault() {
        let mut vault = setup(100);
        assert_eq!(
            vault.withdraw_all_by_admin(ADMIN),
            Err(BulkWithdrawalError::NothingToWithdraw)
        );
    }

    #[test]
    fn test_forced_events_marked() {
        let mut vault = setup(100);
        fund(&mut vault, PLAYER1, 2);

        let outcome = vault.withdraw_all_by_admin(ADMIN).unwrap();
        for event in &outcome.events {
            match event {
                ContractEvent::Withdrew(w) => assert!(w.forced),
                other => panic!("unexpected event {:?}", other),
            }
        }
    }
}
