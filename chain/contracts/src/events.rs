//! Contract events
//!
//! Events are immutable records emitted by vault operations and appended to
//! the vault's event log. Each carries a time-sortable UUID v7 and the
//! emission time in UTC milliseconds.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use types::ids::{Address, AssetRef, CollectionId};
use uuid::Uuid;

/// An asset moved into vault custody
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deposited {
    pub event_id: Uuid,
    pub asset: AssetRef,
    pub depositor: Address,
    pub emitted_at: i64,
}

/// An asset released from vault custody back to its depositor
///
/// `forced` is set when the administrator initiated the release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Withdrew {
    pub event_id: Uuid,
    pub asset: AssetRef,
    pub depositor: Address,
    pub forced: bool,
    pub emitted_at: i64,
}

/// A trust flag was written by the administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustUpdated {
    pub event_id: Uuid,
    pub collection: CollectionId,
    pub is_trusted: bool,
    pub emitted_at: i64,
}

/// Event discriminant, useful for filtering the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Deposited,
    Withdrew,
    TrustUpdated,
}

/// Enum wrapper for all contract events, enabling uniform handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    Deposited(Deposited),
    Withdrew(Withdrew),
    TrustUpdated(TrustUpdated),
}

impl ContractEvent {
    pub(crate) fn deposited(asset: AssetRef, depositor: Address) -> Self {
        Self::Deposited(Deposited {
            event_id: Uuid::now_v7(),
            asset,
            depositor,
            emitted_at: now_millis(),
        })
    }

    pub(crate) fn withdrew(asset: AssetRef, depositor: Address, forced: bool) -> Self {
        Self::Withdrew(Withdrew {
            event_id: Uuid::now_v7(),
            asset,
            depositor,
            forced,
            emitted_at: now_millis(),
        })
    }

    pub(crate) fn trust_updated(collection: CollectionId, is_trusted: bool) -> Self {
        Self::TrustUpdated(TrustUpdated {
            event_id: Uuid::now_v7(),
            collection,
            is_trusted,
            emitted_at: now_millis(),
        })
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Deposited(_) => EventKind::Deposited,
            Self::Withdrew(_) => EventKind::Withdrew,
            Self::TrustUpdated(_) => EventKind::TrustUpdated,
        }
    }

    /// The asset this event concerns, if any.
    pub fn asset(&self) -> Option<&AssetRef> {
        match self {
            Self::Deposited(e) => Some(&e.asset),
            Self::Withdrew(e) => Some(&e.asset),
            Self::TrustUpdated(_) => None,
        }
    }

    pub fn event_id(&self) -> Uuid {
        match self {
            Self::Deposited(e) => e.event_id,
            Self::Withdrew(e) => e.event_id,
            Self::TrustUpdated(e) => e.event_id,
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
