//! Per-account withdraw escrow records.
//!
//! Every account that has requested a withdrawal has a `pending` quantity
//! (payable once the current epoch is funded and unlocked) and an `on_hold`
//! quantity (escrowed during an in-flight epoch transition, payable only
//! after the *next* second step).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Escrowed receipt quantities for one account.
///
/// Invariant: `on_hold` is zero while no epoch transition is in flight; it
/// is folded into `pending` exactly once, when the second step that follows
/// its creation completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WithdrawRecord {
    /// Eligible for payout once the current epoch is funded and unlocked.
    pub pending: Decimal,
    /// Escrowed after a first step but before the matching second step;
    /// excluded from that step's funding requirement.
    pub on_hold: Decimal,
}

impl WithdrawRecord {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: Decimal::ZERO,
            on_hold: Decimal::ZERO,
        }
    }

    /// Total escrowed quantity (pending + on-hold).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.pending + self.on_hold
    }

    /// Whether this record has no escrowed quantity at all.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.pending.is_zero() && self.on_hold.is_zero()
    }

    /// Fold the on-hold quantity into pending, returning the folded amount.
    pub fn fold_on_hold(&mut self) -> Decimal {
        let folded = self.on_hold;
        self.pending += folded;
        self.on_hold = Decimal::ZERO;
        folded
    }
}

impl Default for WithdrawRecord {
    fn default() -> Self {
        Self::new()
    }
}
