//! Core matching engine module
//!
//! Order book maintenance, the matching loop, and trade settlement for a
//! single-instrument continuous double auction.

pub mod book;
pub mod error;
pub mod matching;
pub mod queue;
pub mod types;

// Re-export main types for convenience
pub use book::{MarketStats, StockMarket};
pub use error::{MarketError, MarketResult};
pub use matching::{are_matched, execute_trade};
pub use queue::{OrderQueue, ScanOrder};
pub use types::{
    BookSnapshot, Execution, Order, OrderId, Participant, ParticipantHandle, Price, Quantity,
    RestingOrderInfo, Side, Trade, MAX_PRICE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_exports() {
        let _market = StockMarket::new();
        let _order = Order::limit(Participant::shared(1_000, 0), Side::Buy, 10, 15).unwrap();
        let _error = MarketError::EmptyQueue;
    }
}
