//! Supply conservation invariant checker.
//!
//! Mathematical invariant enforced on demand:
//! ```text
//! Σ(free) + Σ(escrowed) == Σ(mints) - Σ(burns)
//! ```
//!
//! If this invariant ever breaks, escrow accounting has gone wrong
//! somewhere and the ledger cannot be trusted.

use rust_decimal::Decimal;
use stakeflow_types::{Result, StakeflowError};

/// Tracks cumulative mints and burns and validates conservation.
pub struct SupplyConservation {
    /// Total minted since genesis.
    minted: Decimal,
    /// Total burned since genesis.
    burned: Decimal,
}

impl SupplyConservation {
    /// Create a new supply tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            minted: Decimal::ZERO,
            burned: Decimal::ZERO,
        }
    }

    /// Record a mint.
    pub fn record_mint(&mut self, amount: Decimal) {
        self.minted += amount;
    }

    /// Record a burn.
    pub fn record_burn(&mut self, amount: Decimal) {
        self.burned += amount;
    }

    /// Expected total supply: mints - burns.
    #[must_use]
    pub fn expected_supply(&self) -> Decimal {
        self.minted - self.burned
    }

    /// Total minted since genesis.
    #[must_use]
    pub fn total_minted(&self) -> Decimal {
        self.minted
    }

    /// Total burned since genesis.
    #[must_use]
    pub fn total_burned(&self) -> Decimal {
        self.burned
    }

    /// Verify that the actual supply (sum of all free and escrowed
    /// balances) matches the expected supply.
    ///
    /// # Errors
    /// Returns [`StakeflowError::SupplyInvariantViolation`] if actual ≠ expected.
    pub fn verify(&self, actual_supply: Decimal) -> Result<()> {
        let expected = self.expected_supply();
        if actual_supply != expected {
            tracing::warn!(
                actual = %actual_supply,
                expected = %expected,
                "Supply invariant violated"
            );
            return Err(StakeflowError::SupplyInvariantViolation {
                reason: format!(
                    "actual supply {actual_supply} != expected {expected} \
                     (minted={}, burned={})",
                    self.minted, self.burned,
                ),
            });
        }
        Ok(())
    }
}

impl Default for SupplyConservation {
    fn default() -> Self {
        Self::new()
    }
}
