//! Error types for the Stakeflow engine.
//!
//! All errors use the `SF_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Authorization errors
//! - 2xx: Balance / escrow errors
//! - 3xx: Epoch errors
//! - 4xx: Liquidity errors
//! - 8xx: Invariant errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::EpochPhase;

/// Central error enum for all Stakeflow operations.
///
/// Every operation is all-or-nothing: when one of these is returned, no
/// partial state mutation has been retained.
#[derive(Debug, Error)]
pub enum StakeflowError {
    // =================================================================
    // Authorization Errors (1xx)
    // =================================================================
    /// The caller lacks the role required for this operation.
    #[error("SF_ERR_100: Unauthorized: {role} required")]
    Unauthorized { role: &'static str },

    // =================================================================
    // Balance / Escrow Errors (2xx)
    // =================================================================
    /// Not enough free or escrowed balance to perform the operation.
    #[error("SF_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    /// Zero or otherwise malformed amount.
    #[error("SF_ERR_201: Invalid amount: {amount}")]
    InvalidAmount { amount: Decimal },

    // =================================================================
    // Epoch Errors (3xx)
    // =================================================================
    /// An operation was attempted in the wrong epoch phase.
    #[error("SF_ERR_300: Wrong epoch phase: expected {expected}, got {actual}")]
    InvalidPhase {
        expected: EpochPhase,
        actual: EpochPhase,
    },

    /// A non-positive exchange rate was supplied.
    #[error("SF_ERR_301: Invalid exchange rate: {rate}")]
    InvalidRate { rate: u64 },

    // =================================================================
    // Liquidity Errors (4xx)
    // =================================================================
    /// The base-asset float is below the required amount.
    #[error("SF_ERR_400: Insufficient liquidity: need {needed}, have {available}")]
    InsufficientLiquidity { needed: Decimal, available: Decimal },

    // =================================================================
    // Invariant Errors (8xx)
    // =================================================================
    /// Supply conservation invariant violated — critical safety alert.
    #[error("SF_ERR_800: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, StakeflowError>;
