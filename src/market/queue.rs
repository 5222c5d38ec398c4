use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::market::error::{MarketError, MarketResult};
use crate::market::types::{Order, Side};

/// Iteration direction over a queue's resting orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOrder {
    BestFirst,
    WorstFirst,
}

/// Priority queue of resting orders for one side of the book.
///
/// Buy queues surface the highest price first, sell queues the lowest.
/// Entries at equal price pop in insertion order: the priority key carries a
/// monotonic sequence number so time priority is strict, not best-effort.
#[derive(Debug)]
pub struct OrderQueue {
    side: Side,
    entries: BinaryHeap<QueueEntry>,
    next_seq: u64,
}

#[derive(Debug)]
struct QueueEntry {
    side: Side,
    seq: u64,
    order: Order,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_price = match self.side {
            Side::Buy => self.order.price.cmp(&other.order.price),
            Side::Sell => other.order.price.cmp(&self.order.price),
        };
        // Earlier arrival wins at equal price.
        by_price.then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl OrderQueue {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            entries: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Insert a resting order, assigning it the next time-priority slot.
    pub fn push(&mut self, order: Order) -> MarketResult<()> {
        if order.side != self.side {
            return Err(MarketError::SideMismatch {
                expected: self.side,
                actual: order.side,
            });
        }
        let entry = QueueEntry {
            side: self.side,
            seq: self.next_seq,
            order,
        };
        self.next_seq += 1;
        self.entries.push(entry);
        Ok(())
    }

    /// Remove and return the highest-priority resting order.
    pub fn pop(&mut self) -> MarketResult<Order> {
        self.entries
            .pop()
            .map(|entry| entry.order)
            .ok_or(MarketError::EmptyQueue)
    }

    /// The highest-priority resting order, if any.
    pub fn peek(&self) -> Option<&Order> {
        self.entries.peek().map(|entry| &entry.order)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate resting orders in the requested direction.
    ///
    /// Purely observational: repeated scans in either direction leave the
    /// queue untouched.
    pub fn iter(&self, scan: ScanOrder) -> impl Iterator<Item = &Order> + '_ {
        let mut entries: Vec<&QueueEntry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.cmp(a));
        if scan == ScanOrder::WorstFirst {
            entries.reverse();
        }
        entries.into_iter().map(|entry| &entry.order)
    }
}
