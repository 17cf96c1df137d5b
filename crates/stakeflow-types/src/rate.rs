//! Exchange-rate math for receipt minting and funding valuation.
//!
//! A rate is an unsigned numerator over the fixed divider
//! [`constants::EXCHANGE_RATE_DIVIDER`]; a rate equal to the divider is 1:1.
//! Any positive numerator is valid — the rate may move in either direction
//! between epochs.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Result, StakeflowError, constants};

/// Exchange-rate numerator over [`constants::EXCHANGE_RATE_DIVIDER`].
///
/// Mutated only by the epoch update's first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExchangeRate(pub u64);

impl ExchangeRate {
    /// The 1:1 rate (numerator equals the divider). Initial engine rate.
    pub const PAR: Self = Self(constants::EXCHANGE_RATE_DIVIDER);

    /// The fixed divider as a `Decimal`.
    #[must_use]
    pub fn divider() -> Decimal {
        Decimal::from(constants::EXCHANGE_RATE_DIVIDER)
    }

    /// Reject a non-positive numerator.
    pub fn validated(self) -> Result<Self> {
        if self.0 == 0 {
            return Err(StakeflowError::InvalidRate { rate: self.0 });
        }
        Ok(self)
    }

    /// Receipts minted for a gross deposit: the rate acts as a multiplier.
    ///
    /// `receipts = amount * rate / divider`
    #[must_use]
    pub fn mint_gross(self, amount: Decimal) -> Decimal {
        amount * Decimal::from(self.0) / Self::divider()
    }

    /// Receipts minted for a net-of-fee deposit: the rate acts as a divisor.
    ///
    /// `receipts = net * divider / rate`
    #[must_use]
    pub fn mint_net(self, net: Decimal) -> Decimal {
        net * Self::divider() / Decimal::from(self.0)
    }

    /// Base-asset value of a receipt quantity at this rate.
    ///
    /// `base = receipts * rate / divider`
    ///
    /// Used to lock the funding requirement when an epoch transition begins.
    #[must_use]
    pub fn base_value(self, receipts: Decimal) -> Decimal {
        receipts * Decimal::from(self.0) / Self::divider()
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self::PAR
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, constants::EXCHANGE_RATE_DIVIDER)
    }
}
