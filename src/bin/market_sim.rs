//! Scripted market simulation
//!
//! Seeds a book with resting interest on both sides, crosses it with a
//! market order, and prints the ladder, the trades and the collected
//! metrics.

use metrics_exporter_prometheus::PrometheusBuilder;
use tracing::info;

use stockmarket_engine::agent::Agent;
use stockmarket_engine::market::{Execution, Side};
use stockmarket_engine::metrics::MarketMetrics;
use stockmarket_engine::report;
use stockmarket_engine::StockMarket;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt().with_env_filter("info").init();

    let prometheus = PrometheusBuilder::new().install_recorder()?;
    let metrics = MarketMetrics::new();

    info!("starting market simulation");
    let mut market = StockMarket::new();

    // Alice quotes the bid side, Bob the ask side; nothing crosses yet.
    let alice = Agent::new();
    alice.earn(100_000);
    for (quantity, price) in [(20, 15), (17, 13)] {
        metrics.time_submission(|| {
            alice.buy(&mut market, quantity, Execution::Limit, Some(price))
        })?;
        metrics.record_submission(Side::Buy);
        metrics.record_rested();
    }

    let bob = Agent::with_balances(0, 300);
    for price in [73, 34, 62, 26] {
        metrics.time_submission(|| bob.sell(&mut market, 50, Execution::Limit, Some(price)))?;
        metrics.record_submission(Side::Sell);
        metrics.record_rested();
    }

    println!("{}", report::render_book(&market));

    // Bob hits the bids with a market sell.
    let trades = metrics.time_submission(|| bob.sell(&mut market, 30, Execution::Market, None))?;
    metrics.record_submission(Side::Sell);
    for trade in &trades {
        metrics.record_trade(trade.quantity, trade.price * trade.quantity);
        println!("trade: {} shares at ${}", trade.quantity, trade.price);
    }
    metrics.record_book_depth(market.buy_orders().len(), market.sell_orders().len());

    println!();
    println!("{}", report::render_book(&market));

    let stats = market.stats();
    info!(
        trades = stats.total_trades,
        volume = stats.total_volume,
        last_price = ?stats.last_trade_price,
        "simulation complete"
    );

    println!("alice: ${} cash, {} shares", alice.cash(), alice.shares());
    println!("bob:   ${} cash, {} shares", bob.cash(), bob.shares());
    println!();
    println!("{}", report::render_consumption(&[alice, bob], 5));
    println!("{}", prometheus.render());

    Ok(())
}
