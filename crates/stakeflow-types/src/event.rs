//! Journal events for the Stakeflow audit trail.
//!
//! Every state-mutating operation appends a [`StakingEvent`] to its
//! component's [`EventJournal`]. Event ids are deterministic per stream,
//! so two replays of the same history produce identical journals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AccountId, EpochId, EventId};

/// The action a journal event records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A deposit was forwarded and receipts were minted.
    Deposited {
        receiver: AccountId,
        amount: Decimal,
        minted: Decimal,
    },
    /// Receipts were escrowed for a later withdrawal.
    WithdrawRequested {
        account: AccountId,
        amount: Decimal,
        on_hold: bool,
    },
    /// The first epoch step declared a rate and locked the funding requirement.
    RateSet {
        epoch: EpochId,
        rate: u64,
        required_funding: Decimal,
    },
    /// Base-asset liquidity arrived.
    Funded { amount: Decimal },
    /// The second epoch step confirmed funding and unlocked withdrawals.
    EpochUnlocked {
        epoch: EpochId,
        folded_accounts: usize,
    },
    /// Escrowed receipts were burned and base asset was paid out.
    Withdrawn {
        account: AccountId,
        receiver: AccountId,
        amount: Decimal,
    },
    /// Receipts were swapped for an immediate discounted payout.
    Swapped {
        account: AccountId,
        receiver: AccountId,
        receipts: Decimal,
        payout: Decimal,
    },
    /// Accumulated pool receipts were released to the pool owner.
    ReceiptsRedeemed { account: AccountId, amount: Decimal },
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposited { .. } => write!(f, "DEPOSITED"),
            Self::WithdrawRequested { .. } => write!(f, "WITHDRAW_REQUESTED"),
            Self::RateSet { .. } => write!(f, "RATE_SET"),
            Self::Funded { .. } => write!(f, "FUNDED"),
            Self::EpochUnlocked { .. } => write!(f, "EPOCH_UNLOCKED"),
            Self::Withdrawn { .. } => write!(f, "WITHDRAWN"),
            Self::Swapped { .. } => write!(f, "SWAPPED"),
            Self::ReceiptsRedeemed { .. } => write!(f, "RECEIPTS_REDEEMED"),
        }
    }
}

/// One entry in the append-only audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakingEvent {
    /// Deterministic id: same stream + sequence → same id.
    pub id: EventId,
    /// What happened.
    pub kind: EventKind,
    /// When this entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Append-only event journal with deterministic ids.
///
/// Each journal owns a stream label (e.g. `"engine"`, `"swap"`) so ids from
/// different components never collide.
#[derive(Debug, Clone)]
pub struct EventJournal {
    stream: &'static str,
    events: Vec<StakingEvent>,
}

impl EventJournal {
    /// Create an empty journal for the given stream label.
    #[must_use]
    pub fn new(stream: &'static str) -> Self {
        Self {
            stream,
            events: Vec::new(),
        }
    }

    /// Append an event, returning its deterministic id.
    pub fn record(&mut self, kind: EventKind) -> EventId {
        let id = EventId::deterministic(self.stream, self.events.len() as u64);
        self.events.push(StakingEvent {
            id,
            kind,
            recorded_at: Utc::now(),
        });
        id
    }

    /// All recorded events in append order.
    #[must_use]
    pub fn events(&self) -> &[StakingEvent] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// The stream label this journal records under.
    #[must_use]
    pub fn stream(&self) -> &'static str {
        self.stream
    }
}
