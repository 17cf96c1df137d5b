//! The receipt-token ledger.
//!
//! Free balances live in one partition, escrowed balances in another,
//! keyed by the holder that controls them. All mutations are atomic:
//! either the full operation succeeds or the ledger is unchanged.

use std::collections::HashMap;

use rust_decimal::Decimal;
use stakeflow_types::{AccountId, Result, StakeflowError};

use crate::supply::SupplyConservation;

/// Fungible receipt ledger with owner-gated mint/burn and escrow.
///
/// The owner (normally the staking engine) is the only principal allowed
/// to mint or burn. Escrow moves a quantity from an account's free balance
/// into a holder-controlled partition in a single step — there is no
/// approve-then-pull intermediate state.
pub struct ReceiptLedger {
    /// Free balances per account.
    free: HashMap<AccountId, Decimal>,
    /// Escrowed balances per holder (engine or pool).
    escrowed: HashMap<AccountId, Decimal>,
    /// Mint/burn totals for the conservation check.
    supply: SupplyConservation,
    /// The principal with mint/burn rights.
    owner: AccountId,
    /// Staged transferee for the two-party ownership handshake.
    pending_owner: Option<AccountId>,
}

impl ReceiptLedger {
    /// Create an empty ledger owned by `owner`.
    #[must_use]
    pub fn new(owner: AccountId) -> Self {
        Self {
            free: HashMap::new(),
            escrowed: HashMap::new(),
            supply: SupplyConservation::new(),
            owner,
            pending_owner: None,
        }
    }

    fn require_owner(&self, caller: AccountId) -> Result<()> {
        if caller != self.owner {
            return Err(StakeflowError::Unauthorized {
                role: "ledger owner",
            });
        }
        Ok(())
    }

    fn require_positive(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(StakeflowError::InvalidAmount { amount });
        }
        Ok(())
    }

    /// Mint `amount` receipts to `to`'s free balance.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the current owner; `InvalidAmount`
    /// on a non-positive amount.
    pub fn mint(&mut self, caller: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        self.require_owner(caller)?;
        Self::require_positive(amount)?;
        *self.free.entry(to).or_default() += amount;
        self.supply.record_mint(amount);
        Ok(())
    }

    /// Burn `amount` receipts from `from`'s free balance.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the current owner;
    /// `InsufficientBalance` if `from`'s free balance is short.
    pub fn burn(&mut self, caller: AccountId, from: AccountId, amount: Decimal) -> Result<()> {
        self.require_owner(caller)?;
        Self::require_positive(amount)?;
        let balance = self.free.entry(from).or_default();
        if *balance < amount {
            return Err(StakeflowError::InsufficientBalance {
                needed: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        self.supply.record_burn(amount);
        Ok(())
    }

    /// Burn `amount` receipts from the **caller's escrow partition**.
    ///
    /// The withdraw path: receipts were escrowed at request time, so the
    /// settlement burn draws from escrow, not from any free balance.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the current owner;
    /// `InsufficientBalance` if the caller's escrow partition is short.
    pub fn burn_escrowed(&mut self, caller: AccountId, amount: Decimal) -> Result<()> {
        self.require_owner(caller)?;
        Self::require_positive(amount)?;
        let escrow = self.escrowed.entry(caller).or_default();
        if *escrow < amount {
            return Err(StakeflowError::InsufficientBalance {
                needed: amount,
                available: *escrow,
            });
        }
        *escrow -= amount;
        self.supply.record_burn(amount);
        Ok(())
    }

    /// Transfer `amount` between free balances.
    ///
    /// # Errors
    /// `InsufficientBalance` if `from`'s free balance is short.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        Self::require_positive(amount)?;
        let balance = self.free.entry(from).or_default();
        if *balance < amount {
            return Err(StakeflowError::InsufficientBalance {
                needed: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        *self.free.entry(to).or_default() += amount;
        Ok(())
    }

    /// Atomically move `amount` from `account`'s free balance into
    /// `holder`'s escrow partition.
    ///
    /// # Errors
    /// `InsufficientBalance` if `account`'s free balance is short.
    pub fn escrow(&mut self, account: AccountId, holder: AccountId, amount: Decimal) -> Result<()> {
        Self::require_positive(amount)?;
        let balance = self.free.entry(account).or_default();
        if *balance < amount {
            return Err(StakeflowError::InsufficientBalance {
                needed: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        *self.escrowed.entry(holder).or_default() += amount;
        Ok(())
    }

    /// Move `amount` from `holder`'s escrow partition back to `to`'s free
    /// balance.
    ///
    /// # Errors
    /// `InsufficientBalance` if the holder's escrow partition is short.
    pub fn release_escrow(
        &mut self,
        holder: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<()> {
        Self::require_positive(amount)?;
        let escrow = self.escrowed.entry(holder).or_default();
        if *escrow < amount {
            return Err(StakeflowError::InsufficientBalance {
                needed: amount,
                available: *escrow,
            });
        }
        *escrow -= amount;
        *self.free.entry(to).or_default() += amount;
        Ok(())
    }

    /// Free balance of an account.
    #[must_use]
    pub fn balance_of(&self, account: AccountId) -> Decimal {
        self.free.get(&account).copied().unwrap_or_default()
    }

    /// Escrowed balance controlled by a holder.
    #[must_use]
    pub fn escrowed_of(&self, holder: AccountId) -> Decimal {
        self.escrowed.get(&holder).copied().unwrap_or_default()
    }

    /// Total supply: cumulative mints minus burns.
    #[must_use]
    pub fn total_supply(&self) -> Decimal {
        self.supply.expected_supply()
    }

    /// Verify the conservation invariant: the sum of every free and
    /// escrowed balance must equal the total supply.
    pub fn verify_supply(&self) -> Result<()> {
        let actual: Decimal =
            self.free.values().sum::<Decimal>() + self.escrowed.values().sum::<Decimal>();
        self.supply.verify(actual)
    }

    /// The principal currently holding mint/burn rights.
    #[must_use]
    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// The staged ownership transferee, if any.
    #[must_use]
    pub fn pending_owner(&self) -> Option<AccountId> {
        self.pending_owner
    }

    /// Hand ownership to `new_owner` immediately.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the current owner.
    pub fn transfer_ownership(&mut self, caller: AccountId, new_owner: AccountId) -> Result<()> {
        self.require_owner(caller)?;
        self.owner = new_owner;
        self.pending_owner = None;
        Ok(())
    }

    /// Stage `transferee` for the two-party ownership handshake.
    ///
    /// Ownership does not move until the transferee accepts; the stage can
    /// be replaced by a later call.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the current owner.
    pub fn set_pending_owner(&mut self, caller: AccountId, transferee: AccountId) -> Result<()> {
        self.require_owner(caller)?;
        self.pending_owner = Some(transferee);
        Ok(())
    }

    /// Complete a staged ownership transfer.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the staged transferee.
    pub fn accept_ownership(&mut self, caller: AccountId) -> Result<()> {
        if self.pending_owner != Some(caller) {
            return Err(StakeflowError::Unauthorized {
                role: "pending ledger owner",
            });
        }
        self.owner = caller;
        self.pending_owner = None;
        Ok(())
    }
}
