//! The bridge collaborator: a balance-receiving sink for forwarded deposits.
//!
//! The real bridge relays funds to an external chain; the engine only ever
//! sees the narrow [`PayloadSink`] interface and never waits on anything
//! beyond the synchronous call.

use rust_decimal::Decimal;

/// Receives base-asset deposits forwarded by the engine.
pub trait PayloadSink {
    /// Accept `amount` and return the sink's new balance.
    fn receive(&mut self, amount: Decimal) -> Decimal;
}

/// In-memory sink that accumulates forwarded deposits.
#[derive(Debug, Default)]
pub struct MemorySink {
    balance: Decimal,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total forwarded so far.
    #[must_use]
    pub fn balance(&self) -> Decimal {
        self.balance
    }
}

impl PayloadSink for MemorySink {
    fn receive(&mut self, amount: Decimal) -> Decimal {
        self.balance += amount;
        self.balance
    }
}
