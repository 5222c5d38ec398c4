use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::market::error::{MarketError, MarketResult};

pub type OrderId = Uuid;
pub type Price = u64; // Integer ticks
pub type Quantity = u64;

/// Sentinel limit for market buy orders so they cross any resting ask.
/// Market sells use 0 for the same reason.
pub const MAX_PRICE: Price = 1_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The side an incoming order of this side matches against.
    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Execution {
    Market,
    Limit,
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Execution::Market => write!(f, "MARKET"),
            Execution::Limit => write!(f, "LIMIT"),
        }
    }
}

/// A market participant's ledger: cash and share balances.
///
/// Balances are signed and mutated only by trade settlement or by the agent
/// layer. Settlement itself never checks sufficiency, so an unchecked caller
/// can drive a balance negative; admission control lives in [`crate::agent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Uuid,
    pub cash: i64,
    pub shares: i64,
}

/// Shared handle to a participant. Both the caller and any resting orders
/// the participant owns observe the same balances through it.
pub type ParticipantHandle = Arc<Mutex<Participant>>;

impl Participant {
    pub fn new(cash: i64, shares: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            cash,
            shares,
        }
    }

    pub fn shared(cash: i64, shares: i64) -> ParticipantHandle {
        Arc::new(Mutex::new(Self::new(cash, shares)))
    }
}

/// A request to trade: side, execution style, quantity and limit price.
///
/// Only `remaining_quantity` mutates after creation. Market orders carry a
/// sentinel price ([`MAX_PRICE`] for buys, 0 for sells) instead of a
/// caller-supplied one.
#[derive(Debug)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub execution: Execution,
    pub price: Price,
    pub original_quantity: Quantity,
    pub remaining_quantity: Quantity,
    pub timestamp: DateTime<Utc>,
    owner: ParticipantHandle,
}

impl Order {
    pub fn new(
        owner: ParticipantHandle,
        side: Side,
        execution: Execution,
        quantity: Quantity,
        price: Option<Price>,
    ) -> MarketResult<Self> {
        if quantity == 0 {
            return Err(MarketError::InvalidQuantity);
        }

        let price = match (execution, price) {
            (Execution::Market, Some(price)) => {
                return Err(MarketError::MarketOrderWithPrice { price });
            }
            (Execution::Market, None) => match side {
                Side::Buy => MAX_PRICE,
                Side::Sell => 0,
            },
            (Execution::Limit, Some(price)) => price,
            (Execution::Limit, None) => return Err(MarketError::LimitOrderWithoutPrice),
        };

        Ok(Self {
            id: Uuid::new_v4(),
            side,
            execution,
            price,
            original_quantity: quantity,
            remaining_quantity: quantity,
            timestamp: Utc::now(),
            owner,
        })
    }

    pub fn limit(
        owner: ParticipantHandle,
        side: Side,
        quantity: Quantity,
        price: Price,
    ) -> MarketResult<Self> {
        Self::new(owner, side, Execution::Limit, quantity, Some(price))
    }

    pub fn market(owner: ParticipantHandle, side: Side, quantity: Quantity) -> MarketResult<Self> {
        Self::new(owner, side, Execution::Market, quantity, None)
    }

    pub fn owner(&self) -> &ParticipantHandle {
        &self.owner
    }

    pub fn is_filled(&self) -> bool {
        self.remaining_quantity == 0
    }

    /// Settle `quantity` shares at `price` against this order.
    ///
    /// Debits/credits the owner's balances and reduces the remaining
    /// quantity. Fails before any mutation when the quantity exceeds what is
    /// remaining or the price violates the order's limit. Balance sufficiency
    /// is not checked here.
    pub fn execute(&mut self, quantity: Quantity, price: Price) -> MarketResult<()> {
        if quantity > self.remaining_quantity {
            return Err(MarketError::OverFill {
                requested: quantity,
                remaining: self.remaining_quantity,
            });
        }
        let violates = match self.side {
            Side::Buy => price > self.price,
            Side::Sell => price < self.price,
        };
        if violates {
            return Err(MarketError::LimitViolation {
                side: self.side,
                limit: self.price,
                price,
            });
        }

        let notional = (price * quantity) as i64;
        let mut owner = self.owner.lock();
        match self.side {
            Side::Buy => {
                owner.cash -= notional;
                owner.shares += quantity as i64;
            }
            Side::Sell => {
                owner.shares -= quantity as i64;
                owner.cash += notional;
            }
        }
        self.remaining_quantity -= quantity;
        Ok(())
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.execution {
            Execution::Market => write!(f, "{} MKT x {}", self.side, self.remaining_quantity),
            Execution::Limit => {
                write!(f, "{} ${} x {}", self.side, self.price, self.remaining_quantity)
            }
        }
    }
}

/// One executed match between a resting and an incoming order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub buy_order_id: OrderId,
    pub sell_order_id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
    pub timestamp: DateTime<Utc>,
}

impl Trade {
    pub fn new(
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        price: Price,
        quantity: Quantity,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            buy_order_id,
            sell_order_id,
            price,
            quantity,
            timestamp: Utc::now(),
        }
    }
}

/// Point-in-time view of both sides of the book, best price first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSnapshot {
    pub timestamp: DateTime<Utc>,
    pub bids: Vec<RestingOrderInfo>,
    pub asks: Vec<RestingOrderInfo>,
    pub last_trade_price: Option<Price>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestingOrderInfo {
    pub id: OrderId,
    pub price: Price,
    pub quantity: Quantity,
}
