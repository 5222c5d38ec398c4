//! Caller-side convenience wrapper around a market participant.
//!
//! The engine settles trades without checking balance sufficiency; agents
//! are the validation layer above it. An agent rejects submissions whose
//! worst-case settlement would overdraw its participant, and tracks
//! cumulative consumption for reporting.

use tracing::debug;

use crate::market::{
    Execution, MarketError, MarketResult, Order, Participant, ParticipantHandle, Price, Quantity,
    Side, StockMarket, Trade,
};

pub struct Agent {
    participant: ParticipantHandle,
    consumed: i64,
}

impl Agent {
    pub fn new() -> Self {
        Self::with_balances(0, 0)
    }

    pub fn with_balances(cash: i64, shares: i64) -> Self {
        Self {
            participant: Participant::shared(cash, shares),
            consumed: 0,
        }
    }

    pub fn participant(&self) -> &ParticipantHandle {
        &self.participant
    }

    pub fn cash(&self) -> i64 {
        self.participant.lock().cash
    }

    pub fn shares(&self) -> i64 {
        self.participant.lock().shares
    }

    /// Total cash this agent has consumed so far.
    pub fn consumed(&self) -> i64 {
        self.consumed
    }

    pub fn earn(&self, amount: i64) {
        self.participant.lock().cash += amount;
    }

    /// Spend cash outside the market. Fails when the amount exceeds the
    /// current balance.
    pub fn consume(&mut self, amount: i64) -> MarketResult<()> {
        let mut participant = self.participant.lock();
        if amount > participant.cash {
            return Err(MarketError::InsufficientFunds {
                required: amount,
                available: participant.cash,
            });
        }
        participant.cash -= amount;
        drop(participant);
        self.consumed += amount;
        Ok(())
    }

    /// Credit a 1% dividend on held shares, truncated.
    pub fn collect_dividend(&self) {
        let mut participant = self.participant.lock();
        participant.cash += participant.shares / 100;
    }

    /// Submit a buy order, rejecting it up front when a limit price is given
    /// and the full notional exceeds available cash. Market buys carry no
    /// price bound and are submitted unchecked.
    pub fn buy(
        &self,
        market: &mut StockMarket,
        quantity: Quantity,
        execution: Execution,
        price: Option<Price>,
    ) -> MarketResult<Vec<Trade>> {
        if let Some(price) = price {
            let required = (quantity * price) as i64;
            let available = self.participant.lock().cash;
            if required > available {
                return Err(MarketError::InsufficientFunds { required, available });
            }
        }
        let order = Order::new(self.participant.clone(), Side::Buy, execution, quantity, price)?;
        debug!(order = %order, "agent buying");
        market.submit_buy(order)
    }

    /// Submit a sell order, rejecting it up front when the quantity exceeds
    /// held shares.
    pub fn sell(
        &self,
        market: &mut StockMarket,
        quantity: Quantity,
        execution: Execution,
        price: Option<Price>,
    ) -> MarketResult<Vec<Trade>> {
        let held = self.participant.lock().shares;
        if quantity as i64 > held {
            return Err(MarketError::InsufficientShares {
                requested: quantity as i64,
                held,
            });
        }
        let order = Order::new(self.participant.clone(), Side::Sell, execution, quantity, price)?;
        debug!(order = %order, "agent selling");
        market.submit_sell(order)
    }
}

impl Default for Agent {
    fn default() -> Self {
        Self::new()
    }
}
