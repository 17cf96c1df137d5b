//! # stakeflow-types
//!
//! Shared types, errors, and configuration for the **Stakeflow**
//! liquid-staking engine.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountId`], [`EpochId`], [`EventId`], [`BridgeAddress`]
//! - **Exchange-rate math**: [`ExchangeRate`]
//! - **Epoch model**: [`EpochPhase`]
//! - **Withdraw model**: [`WithdrawRecord`]
//! - **Event model**: [`StakingEvent`], [`EventKind`], [`EventJournal`]
//! - **Configuration**: [`EngineConfig`], [`BridgeConfig`], [`MintPolicy`]
//! - **Errors**: [`StakeflowError`] with `SF_ERR_` prefix codes
//! - **Constants**: rate/fee dividers and system-wide defaults

pub mod config;
pub mod constants;
pub mod epoch;
pub mod error;
pub mod event;
pub mod ids;
pub mod rate;
pub mod withdraw;

// Re-export all primary types at crate root for ergonomic imports:
//   use stakeflow_types::{AccountId, ExchangeRate, WithdrawRecord, ...};

pub use config::*;
pub use epoch::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use rate::*;
pub use withdraw::*;

// Constants are accessed via `stakeflow_types::constants::FOO`
// (not re-exported to avoid name collisions).
