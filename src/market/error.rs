use std::fmt;

use serde::{Deserialize, Serialize};

use crate::market::types::{Price, Quantity, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketError {
    /// Order routed through the wrong entry point or pushed into the
    /// opposite side's queue
    SideMismatch { expected: Side, actual: Side },

    /// Market order carries a caller-supplied price
    MarketOrderWithPrice { price: Price },

    /// Limit order created without a price
    LimitOrderWithoutPrice,

    /// Order quantity must be positive
    InvalidQuantity,

    /// Execution requests more quantity than the order has remaining
    OverFill { requested: Quantity, remaining: Quantity },

    /// Settlement price violates the order's limit
    LimitViolation { side: Side, limit: Price, price: Price },

    /// Pop attempted on a queue with no resting orders
    EmptyQueue,

    /// Submission would overdraw the participant's cash
    InsufficientFunds { required: i64, available: i64 },

    /// Submission would overdraw the participant's shares
    InsufficientShares { requested: i64, held: i64 },
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketError::SideMismatch { expected, actual } => {
                write!(f, "expected a {} order, got {}", expected, actual)
            }
            MarketError::MarketOrderWithPrice { price } => {
                write!(f, "market order specifies price ${}", price)
            }
            MarketError::LimitOrderWithoutPrice => write!(f, "limit order has no price"),
            MarketError::InvalidQuantity => write!(f, "order quantity must be positive"),
            MarketError::OverFill { requested, remaining } => write!(
                f,
                "trying to execute {} shares but only {} remaining",
                requested, remaining
            ),
            MarketError::LimitViolation { side: Side::Buy, limit, price } => {
                write!(f, "trying to buy for ${} but limit ${} set", price, limit)
            }
            MarketError::LimitViolation { side: Side::Sell, limit, price } => {
                write!(f, "trying to sell for ${} but limit ${} set", price, limit)
            }
            MarketError::EmptyQueue => write!(f, "no resting orders to pop"),
            MarketError::InsufficientFunds { required, available } => write!(
                f,
                "trying to spend ${} but only ${} available",
                required, available
            ),
            MarketError::InsufficientShares { requested, held } => write!(
                f,
                "trying to sell {} shares but only {} held",
                requested, held
            ),
        }
    }
}

impl std::error::Error for MarketError {}

/// Result type for market operations
pub type MarketResult<T> = Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            MarketError::SideMismatch { expected: Side::Sell, actual: Side::Buy }.to_string(),
            "expected a SELL order, got BUY"
        );
        assert_eq!(
            MarketError::OverFill { requested: 5, remaining: 3 }.to_string(),
            "trying to execute 5 shares but only 3 remaining"
        );
        assert_eq!(
            MarketError::LimitViolation { side: Side::Buy, limit: 10, price: 12 }.to_string(),
            "trying to buy for $12 but limit $10 set"
        );
        assert_eq!(MarketError::EmptyQueue.to_string(), "no resting orders to pop");
    }

    #[test]
    fn test_error_serialization() {
        let error = MarketError::LimitViolation { side: Side::Sell, limit: 20, price: 18 };
        let serialized = serde_json::to_string(&error).unwrap();
        let deserialized: MarketError = serde_json::from_str(&serialized).unwrap();
        assert_eq!(error, deserialized);
    }
}
