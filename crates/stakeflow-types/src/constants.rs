//! System-wide constants for the Stakeflow engine.

/// Fixed divider for exchange-rate math. A rate equal to the divider is 1:1.
pub const EXCHANGE_RATE_DIVIDER: u64 = 10_000;

/// Fixed divider for the instant-swap fee multiplier (basis points).
pub const SWAP_FEE_DIVIDER: u64 = 10_000;

/// Fractional digits carried by every base-asset and receipt amount.
pub const AMOUNT_SCALE: u32 = 18;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Stakeflow";
