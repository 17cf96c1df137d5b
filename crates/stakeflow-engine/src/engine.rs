//! The staking engine state machine.
//!
//! Two-step epoch transitions: the first step declares the new exchange
//! rate and locks the funding requirement for everything already pending;
//! the second step confirms the funding arrived, folds on-hold escrow into
//! pending, and unlocks withdrawals. Requests that land between the two
//! steps go on hold — the funding computed at first-step time did not
//! account for them.

use std::collections::HashMap;

use rust_decimal::Decimal;
use stakeflow_ledger::ReceiptLedger;
use stakeflow_types::{
    AccountId, BridgeAddress, EngineConfig, EpochId, EpochPhase, EventJournal, EventKind,
    ExchangeRate, MintPolicy, Result, StakeflowError, WithdrawRecord, constants,
};

use crate::bridge::PayloadSink;

/// The core liquid-staking state machine.
///
/// The engine is itself a ledger principal: its `AccountId` holds the
/// ledger's mint/burn rights and controls the escrow partition that backs
/// withdraw requests. The ledger and sink are passed into each operation
/// so their mutations land in the same atomic unit as the engine's own.
pub struct StakingEngine {
    /// This engine's principal identity on the ledger.
    engine_id: AccountId,
    /// The single administrator allowed to run epoch steps and setters.
    admin: AccountId,
    /// Bridging destination/fee and the mint convention.
    config: EngineConfig,
    /// Receipts minted per base unit, over the fixed divider.
    rate: ExchangeRate,
    /// Current phase of the epoch cycle.
    phase: EpochPhase,
    /// Completed epoch cycles.
    epoch: EpochId,
    /// Base-asset amount that must arrive before the second step; locked
    /// by the first step, zero while IDLE.
    required_funding: Decimal,
    /// Base-asset float available for withdrawals.
    liquidity: Decimal,
    /// Escrowed receipt quantities per account.
    records: HashMap<AccountId, WithdrawRecord>,
    /// Accounts that went on hold since the last first step.
    on_hold_index: Vec<AccountId>,
    /// Append-only audit trail.
    journal: EventJournal,
}

impl StakingEngine {
    /// Create an engine in the IDLE phase at the 1:1 rate.
    #[must_use]
    pub fn new(engine_id: AccountId, admin: AccountId, config: EngineConfig) -> Self {
        Self {
            engine_id,
            admin,
            config,
            rate: ExchangeRate::PAR,
            phase: EpochPhase::Idle,
            epoch: EpochId(0),
            required_funding: Decimal::ZERO,
            liquidity: Decimal::ZERO,
            records: HashMap::new(),
            on_hold_index: Vec::new(),
            journal: EventJournal::new("engine"),
        }
    }

    fn require_admin(&self, caller: AccountId) -> Result<()> {
        if caller != self.admin {
            return Err(StakeflowError::Unauthorized {
                role: "engine admin",
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

    // =====================================================================
    // Deposits
    // =====================================================================

    /// Forward a deposit to the bridge and mint receipts to `receiver`.
    ///
    /// The full `amount` goes to the sink; the minted quantity follows the
    /// configured [`MintPolicy`] at the rate in effect right now — deposits
    /// never wait out an in-flight epoch transition.
    ///
    /// # Errors
    /// `InvalidAmount` on a non-positive amount, or when the net of a
    /// `NetOfFee` deposit would not be positive.
    pub fn deposit<S: PayloadSink>(
        &mut self,
        caller: AccountId,
        receiver: AccountId,
        amount: Decimal,
        ledger: &mut ReceiptLedger,
        sink: &mut S,
    ) -> Result<Decimal> {
        Self::require_positive(amount)?;

        let minted = match self.config.mint_policy {
            MintPolicy::NetOfFee => {
                let net = amount - self.config.bridge.fee;
                if net <= Decimal::ZERO {
                    return Err(StakeflowError::InvalidAmount { amount });
                }
                self.rate.mint_net(net)
            }
            MintPolicy::Gross => self.rate.mint_gross(amount),
        };

        ledger.mint(self.engine_id, receiver, minted)?;
        sink.receive(amount);

        tracing::debug!(
            caller = %caller,
            receiver = %receiver,
            amount = %amount,
            minted = %minted,
            rate = %self.rate,
            "Deposit forwarded"
        );
        self.journal.record(EventKind::Deposited {
            receiver,
            amount,
            minted,
        });
        Ok(minted)
    }

    // =====================================================================
    // Withdrawals
    // =====================================================================

    /// Escrow `amount` receipts from the caller toward a later withdrawal.
    ///
    /// While IDLE the quantity becomes pending; during RATE_SET it goes on
    /// hold instead, payable only after the *next* second step.
    ///
    /// # Errors
    /// `InvalidAmount` on a non-positive amount; `InsufficientBalance` if
    /// the caller's free receipt balance is short.
    pub fn request_withdraw(
        &mut self,
        caller: AccountId,
        amount: Decimal,
        ledger: &mut ReceiptLedger,
    ) -> Result<()> {
        Self::require_positive(amount)?;
        ledger.escrow(caller, self.engine_id, amount)?;

        let record = self.records.entry(caller).or_default();
        let on_hold = self.phase == EpochPhase::RateSet;
        if on_hold {
            // A first transition from zero marks this account for the
            // fold at second-step time.
            if record.on_hold.is_zero() {
                self.on_hold_index.push(caller);
            }
            record.on_hold += amount;
        } else {
            record.pending += amount;
        }

        tracing::debug!(
            caller = %caller,
            amount = %amount,
            on_hold,
            "Withdraw requested"
        );
        self.journal.record(EventKind::WithdrawRequested {
            account: caller,
            amount,
            on_hold,
        });
        Ok(())
    }

    /// Pay out `amount` base asset against the caller's pending escrow.
    ///
    /// Burns the receipts from the engine's escrow partition (they left the
    /// caller's free balance at request time) and draws the float down 1:1.
    ///
    /// # Errors
    /// `InsufficientBalance` if `amount` exceeds the caller's pending
    /// quantity; `InsufficientLiquidity` if the float is short — a hard
    /// stop, never queued.
    pub fn withdraw(
        &mut self,
        caller: AccountId,
        amount: Decimal,
        receiver: AccountId,
        ledger: &mut ReceiptLedger,
    ) -> Result<Decimal> {
        Self::require_positive(amount)?;

        let pending = self
            .records
            .get(&caller)
            .map(|r| r.pending)
            .unwrap_or_default();
        if pending < amount {
            return Err(StakeflowError::InsufficientBalance {
                needed: amount,
                available: pending,
            });
        }
        if self.liquidity < amount {
            return Err(StakeflowError::InsufficientLiquidity {
                needed: amount,
                available: self.liquidity,
            });
        }

        ledger.burn_escrowed(self.engine_id, amount)?;
        if let Some(record) = self.records.get_mut(&caller) {
            record.pending -= amount;
        }
        self.liquidity -= amount;

        tracing::debug!(
            caller = %caller,
            receiver = %receiver,
            amount = %amount,
            "Withdraw paid"
        );
        self.journal.record(EventKind::Withdrawn {
            account: caller,
            receiver,
            amount,
        });
        Ok(amount)
    }

    // =====================================================================
    // Epoch transitions
    // =====================================================================

    /// First epoch step: declare `new_rate` and lock the funding requirement.
    ///
    /// The requirement covers everything pending *right now*, valued at the
    /// rate being replaced — those withdrawals settle at the rate that was
    /// active when they were requested. Requests arriving after this point
    /// go on hold and are deliberately excluded.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the administrator; `InvalidPhase`
    /// unless IDLE; `InvalidRate` on a zero numerator.
    pub fn update_epoch_first_step(
        &mut self,
        caller: AccountId,
        new_rate: ExchangeRate,
    ) -> Result<()> {
        self.require_admin(caller)?;
        if self.phase != EpochPhase::Idle {
            return Err(StakeflowError::InvalidPhase {
                expected: EpochPhase::Idle,
                actual: self.phase,
            });
        }
        let new_rate = new_rate.validated()?;

        let pending_total: Decimal = self.records.values().map(|r| r.pending).sum();
        self.required_funding = self.rate.base_value(pending_total);
        self.rate = new_rate;
        self.phase = EpochPhase::RateSet;

        tracing::info!(
            epoch = self.epoch.0,
            rate = %self.rate,
            required_funding = %self.required_funding,
            "Epoch first step: rate declared"
        );
        self.journal.record(EventKind::RateSet {
            epoch: self.epoch,
            rate: new_rate.0,
            required_funding: self.required_funding,
        });
        Ok(())
    }

    /// Second epoch step: confirm funding and unlock withdrawals.
    ///
    /// Folds every on-hold quantity created since the first step into
    /// pending (one pass over the touched accounts, not the full
    /// population) and returns the cycle to IDLE.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the administrator; `InvalidPhase`
    /// unless RATE_SET; `InsufficientLiquidity` while the float is below
    /// the locked requirement — resubmitting after more funding is the
    /// caller's job.
    pub fn update_epoch_second_step(&mut self, caller: AccountId) -> Result<()> {
        self.require_admin(caller)?;
        if self.phase != EpochPhase::RateSet {
            return Err(StakeflowError::InvalidPhase {
                expected: EpochPhase::RateSet,
                actual: self.phase,
            });
        }
        if self.liquidity < self.required_funding {
            return Err(StakeflowError::InsufficientLiquidity {
                needed: self.required_funding,
                available: self.liquidity,
            });
        }

        let folded_accounts = self.on_hold_index.len();
        for account in self.on_hold_index.drain(..) {
            if let Some(record) = self.records.get_mut(&account) {
                record.fold_on_hold();
            }
        }
        self.required_funding = Decimal::ZERO;
        self.phase = EpochPhase::Idle;
        self.epoch = self.epoch.next();

        tracing::info!(
            epoch = self.epoch.0,
            folded_accounts,
            liquidity = %self.liquidity,
            "Epoch second step: withdrawals unlocked"
        );
        self.journal.record(EventKind::EpochUnlocked {
            epoch: self.epoch,
            folded_accounts,
        });
        Ok(())
    }

    /// Accept an inbound base-asset transfer into the liquidity float.
    ///
    /// Passive: any sender, any phase. While RATE_SET the new float counts
    /// toward the locked funding requirement.
    ///
    /// # Errors
    /// `InvalidAmount` on a non-positive amount.
    pub fn receive_funding(&mut self, amount: Decimal) -> Result<()> {
        Self::require_positive(amount)?;
        self.liquidity += amount;
        self.journal.record(EventKind::Funded { amount });
        Ok(())
    }

    // =====================================================================
    // Bridging configuration
    // =====================================================================

    /// Point the bridge at a new destination address.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the administrator.
    pub fn set_bridge_address(&mut self, caller: AccountId, address: BridgeAddress) -> Result<()> {
        self.require_admin(caller)?;
        self.config.bridge.address = address;
        Ok(())
    }

    /// Set the fixed per-deposit fee, in base-asset units.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the administrator; `InvalidAmount`
    /// on a negative fee (zero disables the fee).
    pub fn set_bridge_fee(&mut self, caller: AccountId, fee: Decimal) -> Result<()> {
        self.require_admin(caller)?;
        if fee < Decimal::ZERO {
            return Err(StakeflowError::InvalidAmount { amount: fee });
        }
        self.config.bridge.fee = fee;
        Ok(())
    }

    // =====================================================================
    // Ledger ownership plumbing
    // =====================================================================

    /// Stage a new ledger owner for the two-party handshake.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the administrator, or the engine
    /// no longer owns the ledger.
    pub fn set_ledger_transfer_owner(
        &self,
        caller: AccountId,
        ledger: &mut ReceiptLedger,
        transferee: AccountId,
    ) -> Result<()> {
        self.require_admin(caller)?;
        ledger.set_pending_owner(self.engine_id, transferee)
    }

    /// Hand the ledger's mint/burn rights to `new_owner` immediately.
    ///
    /// # Errors
    /// `Unauthorized` unless `caller` is the administrator, or the engine
    /// no longer owns the ledger.
    pub fn transfer_ledger_ownership(
        &self,
        caller: AccountId,
        ledger: &mut ReceiptLedger,
        new_owner: AccountId,
    ) -> Result<()> {
        self.require_admin(caller)?;
        ledger.transfer_ownership(self.engine_id, new_owner)
    }

    // =====================================================================
    // Read-only queries
    // =====================================================================

    /// This engine's ledger principal identity.
    #[must_use]
    pub fn engine_id(&self) -> AccountId {
        self.engine_id
    }

    /// The administrator principal.
    #[must_use]
    pub fn admin(&self) -> AccountId {
        self.admin
    }

    /// Current epoch phase.
    #[must_use]
    pub fn phase(&self) -> EpochPhase {
        self.phase
    }

    /// Completed epoch cycles.
    #[must_use]
    pub fn epoch(&self) -> EpochId {
        self.epoch
    }

    /// The exchange rate in effect for new deposits.
    #[must_use]
    pub fn exchange_rate(&self) -> ExchangeRate {
        self.rate
    }

    /// Locked funding requirement; zero while IDLE.
    #[must_use]
    pub fn required_funding(&self) -> Decimal {
        self.required_funding
    }

    /// Base-asset float available for withdrawals.
    #[must_use]
    pub fn liquidity(&self) -> Decimal {
        self.liquidity
    }

    /// Escrow snapshot for one account.
    #[must_use]
    pub fn withdraw_record(&self, account: AccountId) -> WithdrawRecord {
        self.records.get(&account).cloned().unwrap_or_default()
    }

    /// Configured bridge destination.
    #[must_use]
    pub fn bridge_address(&self) -> &BridgeAddress {
        &self.config.bridge.address
    }

    /// Configured per-deposit fee.
    #[must_use]
    pub fn bridge_fee(&self) -> Decimal {
        self.config.bridge.fee
    }

    /// Configured deposit-to-mint convention.
    #[must_use]
    pub fn mint_policy(&self) -> MintPolicy {
        self.config.mint_policy
    }

    /// The fixed exchange-rate divider.
    #[must_use]
    pub const fn exchange_rate_divider() -> u64 {
        constants::EXCHANGE_RATE_DIVIDER
    }

    /// The audit trail.
    #[must_use]
    pub fn journal(&self) -> &EventJournal {
        &self.journal
    }
}
