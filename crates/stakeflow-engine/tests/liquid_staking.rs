//! Integration tests for the full staking lifecycle.
//!
//! These exercise the engine against a real ledger and sink in realistic
//! scenarios: deposits under both mint conventions, the two-step epoch
//! transition with on-hold escrow, withdrawals, bridging configuration,
//! and the ledger-ownership handshake.

use rust_decimal::Decimal;
use stakeflow_engine::{MemorySink, StakingEngine};
use stakeflow_ledger::ReceiptLedger;
use stakeflow_types::*;

/// Helper: a deployed engine + ledger + sink, one funded user.
struct Stack {
    engine: StakingEngine,
    ledger: ReceiptLedger,
    sink: MemorySink,
    admin: AccountId,
    user1: AccountId,
    user2: AccountId,
}

impl Stack {
    fn new(policy: MintPolicy) -> Self {
        let deployer = AccountId::new();
        let admin = AccountId::new();
        let engine_id = AccountId::new();

        // The ledger starts under the deployer and is handed to the engine,
        // which needs the mint/burn rights from the first deposit on.
        let mut ledger = ReceiptLedger::new(deployer);
        ledger.transfer_ownership(deployer, engine_id).unwrap();

        let config = EngineConfig::new(
            BridgeConfig::new(
                BridgeAddress::new("EAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"),
                Decimal::new(1, 4), // 0.0001
            ),
            policy,
        );
        Self {
            engine: StakingEngine::new(engine_id, admin, config),
            ledger,
            sink: MemorySink::new(),
            admin,
            user1: AccountId::new(),
            user2: AccountId::new(),
        }
    }

    fn deposit(&mut self, user: AccountId, amount: Decimal) -> Decimal {
        self.engine
            .deposit(user, user, amount, &mut self.ledger, &mut self.sink)
            .expect("deposit should succeed")
    }

    /// Full epoch round-trip: declare the rate, send exactly the required
    /// funding, unlock.
    fn update_epoch(&mut self, rate: u64) {
        self.engine
            .update_epoch_first_step(self.admin, ExchangeRate(rate))
            .expect("first step should succeed");
        let funding = self.engine.required_funding();
        if funding > Decimal::ZERO {
            self.engine.receive_funding(funding).unwrap();
        }
        self.engine
            .update_epoch_second_step(self.admin)
            .expect("second step should succeed");
    }
}

#[test]
fn bridge_address_setter_reads_back() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let addr = BridgeAddress::new("EAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAE");
    stack
        .engine
        .set_bridge_address(stack.admin, addr.clone())
        .unwrap();
    assert_eq!(stack.engine.bridge_address(), &addr);
}

#[test]
fn bridge_fee_setter_reads_back() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let fee = Decimal::new(1, 3); // 0.001
    stack.engine.set_bridge_fee(stack.admin, fee).unwrap();
    assert_eq!(stack.engine.bridge_fee(), fee);
}

#[test]
fn deposit_forwards_and_mints_net_of_fee() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let user = stack.user1;
    let sink_before = stack.sink.balance();
    let balance_before = stack.ledger.balance_of(user);

    stack.deposit(user, Decimal::ONE);

    assert_eq!(stack.sink.balance() - sink_before, Decimal::ONE);
    assert_eq!(
        stack.ledger.balance_of(user) - balance_before,
        Decimal::new(9999, 4) // 1 - 0.0001 at par
    );
}

#[test]
fn deposit_after_epoch_update_divides_by_rate() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let user = stack.user1;
    stack.update_epoch(10_100);

    let minted = stack.deposit(user, Decimal::ONE);

    // (1 - 0.0001) * 10000 / 10100 = 0.99 exactly.
    assert_eq!(minted, Decimal::new(99, 2));
    assert_eq!(stack.sink.balance(), Decimal::ONE);
}

#[test]
fn gross_policy_mints_at_declared_rate() {
    let mut stack = Stack::new(MintPolicy::Gross);
    let user = stack.user1;

    // 1 unit at 1:1 mints exactly 1 receipt.
    assert_eq!(stack.deposit(user, Decimal::ONE), Decimal::ONE);

    // 1 unit at 10500 mints 1.05 receipts.
    stack.update_epoch(10_500);
    assert_eq!(stack.deposit(user, Decimal::ONE), Decimal::new(105, 2));
}

#[test]
fn request_withdraw_escrows_free_balance() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let user = stack.user1;
    stack.deposit(user, Decimal::ONE);
    let balance_before = stack.ledger.balance_of(user);

    stack
        .engine
        .request_withdraw(user, Decimal::new(1, 1), &mut stack.ledger)
        .unwrap();

    assert_eq!(
        balance_before - stack.ledger.balance_of(user),
        Decimal::new(1, 1)
    );
    assert_eq!(
        stack.ledger.escrowed_of(stack.engine.engine_id()),
        Decimal::new(1, 1)
    );
    assert_eq!(
        stack.engine.withdraw_record(user).pending,
        Decimal::new(1, 1)
    );
}

#[test]
fn withdraw_round_trip() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let user = stack.user1;
    stack.deposit(user, Decimal::ONE);
    stack
        .engine
        .request_withdraw(user, Decimal::new(1, 1), &mut stack.ledger)
        .unwrap();

    stack.update_epoch(10_000);

    let paid = stack
        .engine
        .withdraw(user, Decimal::new(1, 1), user, &mut stack.ledger)
        .unwrap();

    assert_eq!(paid, Decimal::new(1, 1));
    assert_eq!(stack.engine.withdraw_record(user).pending, Decimal::ZERO);
    assert_eq!(stack.engine.liquidity(), Decimal::ZERO);
    stack.ledger.verify_supply().unwrap();
}

#[test]
fn hold_step_partitions_and_folds() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let user = stack.user1;
    stack.deposit(user, Decimal::ONE);

    // 0.1 requested while IDLE.
    stack
        .engine
        .request_withdraw(user, Decimal::new(1, 1), &mut stack.ledger)
        .unwrap();

    stack
        .engine
        .update_epoch_first_step(stack.admin, ExchangeRate(10_000))
        .unwrap();

    // 0.15 requested mid-transition goes on hold; pending is untouched.
    stack
        .engine
        .request_withdraw(user, Decimal::new(15, 2), &mut stack.ledger)
        .unwrap();
    let record = stack.engine.withdraw_record(user);
    assert_eq!(record.pending, Decimal::new(1, 1));
    assert_eq!(record.on_hold, Decimal::new(15, 2));

    // The locked requirement covers only the pre-step pending amount.
    assert_eq!(stack.engine.required_funding(), Decimal::new(1, 1));
    stack
        .engine
        .receive_funding(stack.engine.required_funding())
        .unwrap();
    stack
        .engine
        .update_epoch_second_step(stack.admin)
        .unwrap();

    let record = stack.engine.withdraw_record(user);
    assert_eq!(record.pending, Decimal::new(25, 2));
    assert_eq!(record.on_hold, Decimal::ZERO);

    // The pre-step pending slice is payable.
    let paid = stack
        .engine
        .withdraw(user, Decimal::new(1, 1), user, &mut stack.ledger)
        .unwrap();
    assert_eq!(paid, Decimal::new(1, 1));
    assert_eq!(
        stack.engine.withdraw_record(user).pending,
        Decimal::new(15, 2)
    );
}

#[test]
fn epoch_funding_values_pending_at_previous_rate() {
    let mut stack = Stack::new(MintPolicy::Gross);
    let user = stack.user1;
    stack.deposit(user, Decimal::TWO);
    stack
        .engine
        .request_withdraw(user, Decimal::TWO, &mut stack.ledger)
        .unwrap();

    // First cycle leaves the rate at 12500.
    stack.update_epoch(12_500);

    // All 2 receipts are still pending; the next first step values them at
    // the 12500 rate being replaced: 2 * 12500 / 10000 = 2.5.
    stack
        .engine
        .update_epoch_first_step(stack.admin, ExchangeRate(10_000))
        .unwrap();
    assert_eq!(stack.engine.required_funding(), Decimal::new(25, 1));
}

#[test]
fn second_step_blocks_until_funded() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let user = stack.user1;
    stack.deposit(user, Decimal::ONE);
    stack
        .engine
        .request_withdraw(user, Decimal::new(5, 1), &mut stack.ledger)
        .unwrap();
    stack
        .engine
        .update_epoch_first_step(stack.admin, ExchangeRate(10_000))
        .unwrap();

    // Partial funding is not enough; the step keeps failing until the
    // float reaches the locked requirement.
    stack.engine.receive_funding(Decimal::new(2, 1)).unwrap();
    let err = stack
        .engine
        .update_epoch_second_step(stack.admin)
        .unwrap_err();
    assert!(matches!(err, StakeflowError::InsufficientLiquidity { .. }));

    stack.engine.receive_funding(Decimal::new(3, 1)).unwrap();
    stack.engine.update_epoch_second_step(stack.admin).unwrap();
    assert_eq!(stack.engine.phase(), EpochPhase::Idle);
}

#[test]
fn staged_ledger_ownership_handshake() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let transferee = stack.user2;

    stack
        .engine
        .set_ledger_transfer_owner(stack.admin, &mut stack.ledger, transferee)
        .unwrap();
    assert_eq!(stack.ledger.pending_owner(), Some(transferee));
    // Mint rights have not moved yet.
    assert_eq!(stack.ledger.owner(), stack.engine.engine_id());

    stack.ledger.accept_ownership(transferee).unwrap();
    assert_eq!(stack.ledger.owner(), transferee);
}

#[test]
fn direct_ledger_ownership_transfer() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let new_owner = stack.user2;

    stack
        .engine
        .transfer_ledger_ownership(stack.admin, &mut stack.ledger, new_owner)
        .unwrap();
    assert_eq!(stack.ledger.owner(), new_owner);

    // The engine lost its mint rights: deposits now fail.
    let user = stack.user1;
    let err = stack
        .engine
        .deposit(user, user, Decimal::ONE, &mut stack.ledger, &mut stack.sink)
        .unwrap_err();
    assert!(matches!(err, StakeflowError::Unauthorized { .. }));
}

#[test]
fn ownership_plumbing_is_admin_only() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let stranger = stack.user1;
    let err = stack
        .engine
        .transfer_ledger_ownership(stranger, &mut stack.ledger, stranger)
        .unwrap_err();
    assert!(matches!(err, StakeflowError::Unauthorized { .. }));
    assert_eq!(stack.ledger.owner(), stack.engine.engine_id());
}

#[test]
fn supply_conserved_across_full_lifecycle() {
    let mut stack = Stack::new(MintPolicy::NetOfFee);
    let (user1, user2) = (stack.user1, stack.user2);

    stack.deposit(user1, Decimal::ONE);
    stack.deposit(user2, Decimal::TWO);
    stack.ledger.verify_supply().unwrap();

    stack
        .engine
        .request_withdraw(user1, Decimal::new(5, 1), &mut stack.ledger)
        .unwrap();
    stack
        .engine
        .update_epoch_first_step(stack.admin, ExchangeRate(10_100))
        .unwrap();
    stack
        .engine
        .request_withdraw(user2, Decimal::new(3, 1), &mut stack.ledger)
        .unwrap();
    stack
        .engine
        .receive_funding(stack.engine.required_funding())
        .unwrap();
    stack.engine.update_epoch_second_step(stack.admin).unwrap();
    stack.ledger.verify_supply().unwrap();

    stack
        .engine
        .withdraw(user1, Decimal::new(5, 1), user1, &mut stack.ledger)
        .unwrap();
    stack.ledger.verify_supply().unwrap();

    // Total escrow left equals user2's folded on-hold request.
    assert_eq!(
        stack.ledger.escrowed_of(stack.engine.engine_id()),
        Decimal::new(3, 1)
    );
}
