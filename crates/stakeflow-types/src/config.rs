//! Configuration types for the staking engine and bridging.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::BridgeAddress;

/// How deposits convert to minted receipts.
///
/// Two conventions exist in the field; the engine does not guess between
/// them — callers pick one at construction. The full deposit amount is
/// forwarded to the bridge under both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MintPolicy {
    /// The bridging fee is subtracted before minting and the rate acts as
    /// a divisor: `minted = (amount - fee) * divider / rate`.
    NetOfFee,
    /// The fee does not reduce the mint and the rate acts as a multiplier:
    /// `minted = amount * rate / divider`.
    Gross,
}

impl Default for MintPolicy {
    fn default() -> Self {
        Self::NetOfFee
    }
}

/// Bridging destination and the fixed per-deposit fee.
///
/// The fee is expressed in base-asset units, not basis points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Destination address on the external chain.
    pub address: BridgeAddress,
    /// Fixed fee withheld per deposit, in base-asset units.
    pub fee: Decimal,
}

impl BridgeConfig {
    #[must_use]
    pub fn new(address: BridgeAddress, fee: Decimal) -> Self {
        Self { address, fee }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Bridging destination and fee.
    pub bridge: BridgeConfig,
    /// Deposit-to-mint conversion convention.
    pub mint_policy: MintPolicy,
}

impl EngineConfig {
    #[must_use]
    pub fn new(bridge: BridgeConfig, mint_policy: MintPolicy) -> Self {
        Self {
            bridge,
            mint_policy,
        }
    }
}
