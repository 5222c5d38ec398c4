use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};

use crate::market::{Quantity, Side};

/// Metrics collector for market activity.
///
/// Publishes through the `metrics` facade and keeps atomic mirrors so a
/// caller can read a summary without a recorder installed.
#[derive(Debug, Default)]
pub struct MarketMetrics {
    orders_submitted: AtomicU64,
    orders_rested: AtomicU64,
    trades_executed: AtomicU64,
    total_volume: AtomicU64,
    total_notional: AtomicU64,
}

impl MarketMetrics {
    pub fn new() -> Self {
        describe_counter!("market_orders_total", "Total number of orders submitted");
        describe_counter!("market_orders_rested_total", "Orders left resting in the book");
        describe_counter!("market_trades_total", "Total number of trades executed");
        describe_counter!("market_volume_shares_total", "Total shares traded");
        describe_counter!("market_notional_total", "Total notional traded");
        describe_gauge!("market_resting_orders", "Resting orders per side");
        describe_histogram!(
            "market_submission_duration_seconds",
            "Duration of order submissions"
        );

        Self::default()
    }

    /// Time an order submission and record its duration.
    pub fn time_submission<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        histogram!("market_submission_duration_seconds").record(start.elapsed().as_secs_f64());
        result
    }

    pub fn record_submission(&self, side: Side) {
        self.orders_submitted.fetch_add(1, Ordering::Relaxed);
        let side = match side {
            Side::Buy => "buy",
            Side::Sell => "sell",
        };
        counter!("market_orders_total", "side" => side).increment(1);
    }

    pub fn record_rested(&self) {
        self.orders_rested.fetch_add(1, Ordering::Relaxed);
        counter!("market_orders_rested_total").increment(1);
    }

    pub fn record_trade(&self, quantity: Quantity, notional: u64) {
        self.trades_executed.fetch_add(1, Ordering::Relaxed);
        self.total_volume.fetch_add(quantity, Ordering::Relaxed);
        self.total_notional.fetch_add(notional, Ordering::Relaxed);
        counter!("market_trades_total").increment(1);
        counter!("market_volume_shares_total").increment(quantity);
        counter!("market_notional_total").increment(notional);
    }

    pub fn record_book_depth(&self, resting_buys: usize, resting_sells: usize) {
        gauge!("market_resting_orders", "side" => "buy").set(resting_buys as f64);
        gauge!("market_resting_orders", "side" => "sell").set(resting_sells as f64);
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            orders_submitted: self.orders_submitted.load(Ordering::Relaxed),
            orders_rested: self.orders_rested.load(Ordering::Relaxed),
            trades_executed: self.trades_executed.load(Ordering::Relaxed),
            total_volume: self.total_volume.load(Ordering::Relaxed),
            total_notional: self.total_notional.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSummary {
    pub orders_submitted: u64,
    pub orders_rested: u64,
    pub trades_executed: u64,
    pub total_volume: u64,
    pub total_notional: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let metrics = MarketMetrics::new();

        metrics.record_submission(Side::Buy);
        metrics.record_submission(Side::Sell);
        metrics.record_rested();
        metrics.record_trade(10, 150);
        metrics.record_trade(5, 60);

        let summary = metrics.summary();
        assert_eq!(summary.orders_submitted, 2);
        assert_eq!(summary.orders_rested, 1);
        assert_eq!(summary.trades_executed, 2);
        assert_eq!(summary.total_volume, 15);
        assert_eq!(summary.total_notional, 210);
    }

    #[test]
    fn time_submission_passes_the_result_through() {
        let metrics = MarketMetrics::new();
        let value = metrics.time_submission(|| 41 + 1);
        assert_eq!(value, 42);
    }
}
