use tracing::debug;

use crate::market::error::{MarketError, MarketResult};
use crate::market::types::{Order, Side, Trade};

/// The sole crossing condition: a sell at or below a buy's price matches.
///
/// Execution style is never consulted; market orders cross through their
/// sentinel prices. Mis-typed arguments are a `SideMismatch` error.
pub fn are_matched(sell: &Order, buy: &Order) -> MarketResult<bool> {
    if sell.side != Side::Sell {
        return Err(MarketError::SideMismatch {
            expected: Side::Sell,
            actual: sell.side,
        });
    }
    if buy.side != Side::Buy {
        return Err(MarketError::SideMismatch {
            expected: Side::Buy,
            actual: buy.side,
        });
    }
    Ok(sell.price <= buy.price)
}

/// Settle the overlapping quantity of a sell/buy pair at `price` and record
/// the resulting trade.
///
/// The price is expected to be the resting order's price; both legs enforce
/// their own limits, so a wrong price surfaces as a `LimitViolation`.
pub fn execute_trade(sell: &mut Order, buy: &mut Order, price: u64) -> MarketResult<Trade> {
    if sell.side == buy.side {
        return Err(MarketError::SideMismatch {
            expected: sell.side.opposite(),
            actual: buy.side,
        });
    }

    let quantity = sell.remaining_quantity.min(buy.remaining_quantity);
    sell.execute(quantity, price)?;
    buy.execute(quantity, price)?;

    debug!(%price, quantity, sell = %sell.id, buy = %buy.id, "trade executed");
    Ok(Trade::new(buy.id, sell.id, price, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::types::Participant;

    #[test]
    fn crossing_requires_sell_at_or_below_buy() {
        let seller = Participant::shared(0, 100);
        let buyer = Participant::shared(10_000, 0);

        let sell = Order::limit(seller, Side::Sell, 10, 20).unwrap();
        let at = Order::limit(buyer.clone(), Side::Buy, 10, 20).unwrap();
        let above = Order::limit(buyer.clone(), Side::Buy, 10, 25).unwrap();
        let below = Order::limit(buyer, Side::Buy, 10, 19).unwrap();

        assert!(are_matched(&sell, &at).unwrap());
        assert!(are_matched(&sell, &above).unwrap());
        assert!(!are_matched(&sell, &below).unwrap());
    }

    #[test]
    fn predicate_rejects_swapped_sides() {
        let seller = Participant::shared(0, 100);
        let buyer = Participant::shared(10_000, 0);
        let sell = Order::limit(seller, Side::Sell, 10, 20).unwrap();
        let buy = Order::limit(buyer, Side::Buy, 10, 20).unwrap();

        assert_eq!(
            are_matched(&buy, &sell).unwrap_err(),
            MarketError::SideMismatch { expected: Side::Sell, actual: Side::Buy }
        );
    }

    #[test]
    fn trade_settles_overlap_on_both_legs() {
        let seller = Participant::shared(0, 100);
        let buyer = Participant::shared(10_000, 0);
        let mut sell = Order::limit(seller.clone(), Side::Sell, 3, 13).unwrap();
        let mut buy = Order::limit(buyer.clone(), Side::Buy, 5, 13).unwrap();

        let trade = execute_trade(&mut sell, &mut buy, 13).unwrap();

        assert_eq!(trade.quantity, 3);
        assert_eq!(trade.price, 13);
        assert_eq!(trade.buy_order_id, buy.id);
        assert_eq!(trade.sell_order_id, sell.id);
        assert!(sell.is_filled());
        assert_eq!(buy.remaining_quantity, 2);
        assert_eq!(seller.lock().cash, 39);
        assert_eq!(buyer.lock().shares, 3);
    }

    #[test]
    fn same_side_pair_is_rejected() {
        let owner = Participant::shared(10_000, 0);
        let mut a = Order::limit(owner.clone(), Side::Buy, 5, 10).unwrap();
        let mut b = Order::limit(owner, Side::Buy, 5, 10).unwrap();

        assert!(execute_trade(&mut a, &mut b, 10).is_err());
        assert_eq!(a.remaining_quantity, 5);
        assert_eq!(b.remaining_quantity, 5);
    }
}
