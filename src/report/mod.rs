//! Read-only reporting over market and agent state.
//!
//! Nothing here participates in the engine's lifecycle: the renderers take
//! snapshots of resting interest and balances and format them as text.

use std::fmt::Write;

use crate::agent::Agent;
use crate::market::{ScanOrder, StockMarket};

/// Render the book as a price ladder: asks worst-to-best above the spread,
/// bids best-to-worst below it.
pub fn render_book(market: &StockMarket) -> String {
    let mut out = String::from("Sell orders\n");
    if market.sell_orders().is_empty() {
        out.push_str("  No orders\n");
    }
    for order in market.sell_orders().iter(ScanOrder::WorstFirst) {
        let _ = writeln!(out, "  {order}");
    }
    out.push('\n');
    if market.buy_orders().is_empty() {
        out.push_str("  No orders\n");
    }
    for order in market.buy_orders().iter(ScanOrder::BestFirst) {
        let _ = writeln!(out, "  {order}");
    }
    out.push_str("Buy orders\n");
    out
}

/// One bucket of a histogram over equal-width ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramBin {
    pub lower: i64,
    pub upper: i64,
    pub count: usize,
}

/// Bucket `amounts` into `bins` equal-width ranges spanning min..max.
/// The last bucket is inclusive of the maximum.
pub fn histogram(amounts: &[i64], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }
    let Some(&min) = amounts.iter().min() else {
        return Vec::new();
    };
    let max = *amounts.iter().max().unwrap_or(&min);
    let span = (max - min).max(1);
    let width = (span + bins as i64 - 1) / bins as i64;

    let mut out: Vec<HistogramBin> = (0..bins as i64)
        .map(|i| HistogramBin {
            lower: min + i * width,
            upper: min + (i + 1) * width,
            count: 0,
        })
        .collect();
    for &amount in amounts {
        let index = (((amount - min) / width) as usize).min(bins - 1);
        out[index].count += 1;
    }
    out
}

/// Render cumulative consumption across agents as a text histogram.
pub fn render_consumption(agents: &[Agent], bins: usize) -> String {
    let amounts: Vec<i64> = agents.iter().map(|agent| agent.consumed()).collect();
    let mut out = String::from("Consumption\n");
    for bin in histogram(&amounts, bins) {
        let _ = writeln!(
            out,
            "  {:>8}..{:<8} {}",
            bin.lower,
            bin.upper,
            "#".repeat(bin.count)
        );
    }
    out
}
