//! # stakeflow-swap
//!
//! The **InstantSwap** pool: immediate base-asset payout for staking
//! receipts at a discount, bypassing the epoch wait.
//!
//! ## Architecture
//!
//! The pool sits on top of the receipt ledger: swapped receipts move into
//! the pool's escrow partition, the payout comes out of the pool's own
//! pre-funded base-asset float, and the owner periodically redeems the
//! accumulated receipts through the staking engine's normal withdraw path.

pub mod pool;

pub use pool::InstantSwapPool;
