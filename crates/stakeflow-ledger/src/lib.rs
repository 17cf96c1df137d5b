//! # stakeflow-ledger
//!
//! The **receipt token**: a fungible-balance ledger with mint/burn rights
//! held by a single owner (the staking engine) and an atomic escrow
//! primitive used by both the engine and the instant-swap pool.
//!
//! ## Architecture
//!
//! 1. **ReceiptLedger**: free balances + a separate escrow partition per
//!    holder, mint/burn under owner authority, and a two-party ownership
//!    handshake
//! 2. **SupplyConservation**: safety net — `Σ free + Σ escrowed` must equal
//!    `minted - burned` at all times
//!
//! ## Balance Flow
//!
//! ```text
//! mint → free[to]            escrow(owner, holder) → escrowed[holder]
//! release_escrow → free[to]  burn_escrowed → supply shrinks
//! ```

pub mod ledger;
pub mod supply;

pub use ledger::ReceiptLedger;
pub use supply::SupplyConservation;
