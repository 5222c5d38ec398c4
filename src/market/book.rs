use chrono::Utc;
use tracing::{debug, info};

use crate::market::error::{MarketError, MarketResult};
use crate::market::matching::{are_matched, execute_trade};
use crate::market::queue::{OrderQueue, ScanOrder};
use crate::market::types::{BookSnapshot, Order, Price, RestingOrderInfo, Side, Trade};

/// Single-instrument continuous double-auction market.
///
/// Owns one queue per side, accepts orders through [`submit_buy`] and
/// [`submit_sell`], and settles crossing interest under price-time priority.
/// Submissions run synchronously to completion; the aggressor trades at the
/// resting order's price.
///
/// [`submit_buy`]: StockMarket::submit_buy
/// [`submit_sell`]: StockMarket::submit_sell
#[derive(Debug)]
pub struct StockMarket {
    buy_orders: OrderQueue,
    sell_orders: OrderQueue,
    last_trade_price: Option<Price>,
    total_trades: u64,
    total_volume: u64,
}

impl StockMarket {
    pub fn new() -> Self {
        info!("creating stock market");
        Self {
            buy_orders: OrderQueue::new(Side::Buy),
            sell_orders: OrderQueue::new(Side::Sell),
            last_trade_price: None,
            total_trades: 0,
            total_volume: 0,
        }
    }

    /// Submit a buy order: match it against resting sells, rest any
    /// remainder on the bid side. Returns the executed trades.
    pub fn submit_buy(&mut self, order: Order) -> MarketResult<Vec<Trade>> {
        if order.side != Side::Buy {
            return Err(MarketError::SideMismatch {
                expected: Side::Buy,
                actual: order.side,
            });
        }
        self.process(order)
    }

    /// Submit a sell order: match it against resting buys, rest any
    /// remainder on the ask side. Returns the executed trades.
    pub fn submit_sell(&mut self, order: Order) -> MarketResult<Vec<Trade>> {
        if order.side != Side::Sell {
            return Err(MarketError::SideMismatch {
                expected: Side::Sell,
                actual: order.side,
            });
        }
        self.process(order)
    }

    // The matching loop, shared by both entry points. Pops the best opposing
    // order, settles the overlap at its price while the pair crosses, and
    // re-queues whichever side is left with quantity.
    fn process(&mut self, mut incoming: Order) -> MarketResult<Vec<Trade>> {
        debug!(order = %incoming, "processing order");

        let Self {
            buy_orders,
            sell_orders,
            last_trade_price,
            total_trades,
            total_volume,
        } = self;

        let (own, opposing) = match incoming.side {
            Side::Buy => (buy_orders, sell_orders),
            Side::Sell => (sell_orders, buy_orders),
        };

        let mut trades = Vec::new();

        if !opposing.is_empty() {
            let mut resting = opposing.pop()?;
            loop {
                let crossed = match incoming.side {
                    Side::Buy => are_matched(&resting, &incoming)?,
                    Side::Sell => are_matched(&incoming, &resting)?,
                };
                if !crossed {
                    opposing.push(resting)?;
                    break;
                }

                // Price-taker convention: the resting order sets the price.
                let price = resting.price;
                let trade = match incoming.side {
                    Side::Buy => execute_trade(&mut resting, &mut incoming, price)?,
                    Side::Sell => execute_trade(&mut incoming, &mut resting, price)?,
                };
                *last_trade_price = Some(price);
                *total_trades += 1;
                *total_volume += trade.quantity;
                trades.push(trade);

                if incoming.is_filled() {
                    if !resting.is_filled() {
                        opposing.push(resting)?;
                    }
                    break;
                }
                if opposing.is_empty() {
                    break;
                }
                resting = opposing.pop()?;
            }
        }

        if !incoming.is_filled() {
            debug!(order = %incoming, "resting order");
            own.push(incoming)?;
        }

        Ok(trades)
    }

    pub fn buy_orders(&self) -> &OrderQueue {
        &self.buy_orders
    }

    pub fn sell_orders(&self) -> &OrderQueue {
        &self.sell_orders
    }

    /// Price of the most recent trade, if any has executed.
    pub fn last_trade_price(&self) -> Option<Price> {
        self.last_trade_price
    }

    pub fn best_bid(&self) -> Option<Price> {
        self.buy_orders.peek().map(|order| order.price)
    }

    pub fn best_ask(&self) -> Option<Price> {
        self.sell_orders.peek().map(|order| order.price)
    }

    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) if ask > bid => Some(ask - bid),
            _ => None,
        }
    }

    /// Snapshot both sides best-to-worst for display and reporting.
    pub fn snapshot(&self) -> BookSnapshot {
        let info = |order: &Order| RestingOrderInfo {
            id: order.id,
            price: order.price,
            quantity: order.remaining_quantity,
        };
        BookSnapshot {
            timestamp: Utc::now(),
            bids: self.buy_orders.iter(ScanOrder::BestFirst).map(info).collect(),
            asks: self.sell_orders.iter(ScanOrder::BestFirst).map(info).collect(),
            last_trade_price: self.last_trade_price,
        }
    }

    pub fn stats(&self) -> MarketStats {
        MarketStats {
            resting_buys: self.buy_orders.len(),
            resting_sells: self.sell_orders.len(),
            best_bid: self.best_bid(),
            best_ask: self.best_ask(),
            spread: self.spread(),
            last_trade_price: self.last_trade_price,
            total_trades: self.total_trades,
            total_volume: self.total_volume,
        }
    }
}

impl Default for StockMarket {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketStats {
    pub resting_buys: usize,
    pub resting_sells: usize,
    pub best_bid: Option<Price>,
    pub best_ask: Option<Price>,
    pub spread: Option<Price>,
    pub last_trade_price: Option<Price>,
    pub total_trades: u64,
    pub total_volume: u64,
}
