//! The instant-swap pool.
//!
//! Fee math: `payout = receipts * fee_numerator / SWAP_FEE_DIVIDER`, the
//! numerator strictly below the divider so the discount funds the pool.
//! The fee applies to the payout only — the full receipt amount is
//! escrowed.

use rust_decimal::Decimal;
use stakeflow_ledger::ReceiptLedger;
use stakeflow_types::{
    AccountId, EventJournal, EventKind, Result, StakeflowError, constants,
};

/// Instant-liquidity pool for staking receipts.
///
/// A ledger principal like the engine: swapped receipts accumulate in the
/// pool's escrow partition until the owner redeems them.
#[derive(Debug)]
pub struct InstantSwapPool {
    /// This pool's principal identity on the ledger.
    pool_id: AccountId,
    /// The only principal allowed to withdraw accumulated receipts.
    owner: AccountId,
    /// Payout multiplier over [`constants::SWAP_FEE_DIVIDER`].
    fee_numerator: u64,
    /// Pre-funded base-asset float.
    float: Decimal,
    /// Append-only audit trail.
    journal: EventJournal,
}

impl InstantSwapPool {
    /// Create an empty pool.
    ///
    /// # Errors
    /// `InvalidRate` unless `0 < fee_numerator < SWAP_FEE_DIVIDER` — a
    /// multiplier at or above the divider would pay out more than the
    /// escrowed receipts are worth.
    pub fn new(pool_id: AccountId, owner: AccountId, fee_numerator: u64) -> Result<Self> {
        if fee_numerator == 0 || fee_numerator >= constants::SWAP_FEE_DIVIDER {
            return Err(StakeflowError::InvalidRate {
                rate: fee_numerator,
            });
        }
        Ok(Self {
            pool_id,
            owner,
            fee_numerator,
            float: Decimal::ZERO,
            journal: EventJournal::new("swap"),
        })
    }

    fn require_positive(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(StakeflowError::InvalidAmount { amount });
        }
        Ok(())
    }

    /// Pre-fund the base-asset float.
    ///
    /// # Errors
    /// `InvalidAmount` on a non-positive amount.
    pub fn add_liquidity(&mut self, amount: Decimal) -> Result<()> {
        Self::require_positive(amount)?;
        self.float += amount;
        self.journal.record(EventKind::Funded { amount });
        Ok(())
    }

    /// Discounted payout for a receipt quantity at this pool's fee.
    #[must_use]
    pub fn quote(&self, receipts: Decimal) -> Decimal {
        receipts * Decimal::from(self.fee_numerator) / Decimal::from(constants::SWAP_FEE_DIVIDER)
    }

    /// Swap receipts for an immediate discounted base-asset payout.
    ///
    /// Escrows the full `receipts` quantity into the pool and pays
    /// `quote(receipts)` to `receiver` out of the float.
    ///
    /// # Errors
    /// `InvalidAmount` on a non-positive quantity; `InsufficientLiquidity`
    /// if the float cannot cover the payout; `InsufficientBalance` if the
    /// caller's free receipt balance is short.
    pub fn swap(
        &mut self,
        caller: AccountId,
        receipts: Decimal,
        receiver: AccountId,
        ledger: &mut ReceiptLedger,
    ) -> Result<Decimal> {
        Self::require_positive(receipts)?;

        let payout = self.quote(receipts);
        if self.float < payout {
            return Err(StakeflowError::InsufficientLiquidity {
                needed: payout,
                available: self.float,
            });
        }
        ledger.escrow(caller, self.pool_id, receipts)?;
        self.float -= payout;

        tracing::debug!(
            caller = %caller,
            receiver = %receiver,
            receipts = %receipts,
            payout = %payout,
            "Instant swap"
        );
        self.journal.record(EventKind::Swapped {
            account: caller,
            receiver,
            receipts,
            payout,
        });
        Ok(payout)
    }

    /// Release accumulated receipts to the pool owner's free balance,
    /// e.g. for redemption through the staking engine's withdraw path.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the pool owner;
    /// `InsufficientBalance` if the pool's escrow partition is short.
    pub fn withdraw_receipts(
        &mut self,
        caller: AccountId,
        amount: Decimal,
        ledger: &mut ReceiptLedger,
    ) -> Result<()> {
        if caller != self.owner {
            return Err(StakeflowError::Unauthorized { role: "pool owner" });
        }
        Self::require_positive(amount)?;
        ledger.release_escrow(self.pool_id, caller, amount)?;

        self.journal.record(EventKind::ReceiptsRedeemed {
            account: caller,
            amount,
        });
        Ok(())
    }

    /// This pool's ledger principal identity.
    #[must_use]
    pub fn pool_id(&self) -> AccountId {
        self.pool_id
    }

    /// The pool owner.
    #[must_use]
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Payout multiplier over [`constants::SWAP_FEE_DIVIDER`].
    #[must_use]
    pub fn fee_numerator(&self) -> u64 {
        self.fee_numerator
    }

    /// Base-asset float available for payouts.
    #[must_use]
    pub fn float(&self) -> Decimal {
        self.float
    }

    /// Receipts accumulated in the pool's escrow partition.
    #[must_use]
    pub fn receipt_balance(&self, ledger: &ReceiptLedger) -> Decimal {
        ledger.escrowed_of(self.pool_id)
    }

    /// The audit trail.
    #[must_use]
    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }
}
