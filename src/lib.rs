//! Single-Instrument Continuous Double-Auction Matching Engine
//!
//! An in-process matching engine that maintains resting buy and sell
//! interest, matches incoming orders under price-time priority, and settles
//! participant balances as trades execute.
//!
//! # Features
//!
//! - **Price-Time Priority**: best price first, strict FIFO at equal price
//! - **Market and Limit Orders**: market orders cross through sentinel prices
//! - **Price-Taker Settlement**: trades execute at the resting order's price
//! - **Shared Participant Ledgers**: orders and callers observe one balance
//! - **Agent Layer**: admission checks reject overdrawing submissions
//! - **Built-in Reporting**: book ladder and consumption histogram renderers
//!
//! # Quick Start
//!
//! ```rust
//! use stockmarket_engine::market::{Order, Participant, Side, StockMarket};
//!
//! let mut market = StockMarket::new();
//! let seller = Participant::shared(0, 100);
//! let buyer = Participant::shared(5_000, 0);
//!
//! market.submit_sell(Order::limit(seller, Side::Sell, 10, 25)?)?;
//! let trades = market.submit_buy(Order::limit(buyer, Side::Buy, 10, 25)?)?;
//!
//! assert_eq!(trades.len(), 1);
//! assert_eq!(market.last_trade_price(), Some(25));
//! # Ok::<(), stockmarket_engine::market::MarketError>(())
//! ```
//!
//! # Architecture
//!
//! Each side of the book is a binary heap keyed by price and arrival
//! sequence. A submission pops the best opposing order, settles the overlap
//! at the resting price while the pair crosses, and re-queues whichever side
//! is left with quantity. Submissions run synchronously to completion; the
//! engine itself never checks balance sufficiency, that is the agent layer's
//! job.

pub mod agent;
pub mod market;
pub mod metrics;
pub mod report;

pub use agent::Agent;
pub use market::{MarketError, MarketResult, Order, Participant, Side, StockMarket};
pub use self::metrics::MarketMetrics;
