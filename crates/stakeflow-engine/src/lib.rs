//! # stakeflow-engine
//!
//! The **StakingEngine**: deposits, epoch-gated withdrawals, and the
//! bridging forwarder.
//!
//! ## Architecture
//!
//! The engine is a single-writer sequential state machine over two epoch
//! phases (IDLE / RATE_SET). It owns the receipt ledger's mint/burn rights
//! and holds escrowed receipts plus the base-asset float earmarked for
//! withdrawals.
//!
//! ## Flow
//!
//! ```text
//! deposit        → PayloadSink.receive() + ReceiptLedger.mint()
//! requestWithdraw→ ReceiptLedger.escrow() → pending | on-hold
//! first step     → rate declared, funding requirement locked
//! funding        → liquidity float grows
//! second step    → on-hold folded, withdrawals unlocked
//! withdraw       → ReceiptLedger.burn_escrowed() + base-asset payout
//! ```
//!
//! Every state-mutating operation takes the caller's identity explicitly;
//! authorization is a pure function of `(caller, required role)`.

pub mod bridge;
pub mod engine;

pub use bridge::{MemorySink, PayloadSink};
pub use engine::StakingEngine;
