// Liquidity query utilities
// Pure, stateless functions over one side of an order book. The best-first
// walk here is the canonical primitive: the routing allocator and the
// execution replay both consume liquidity with exactly these semantics, and
// their outputs diverge if either strays from it.

use crate::simulation::order_book::{BookSide, OrderBook, PriceLevel};

/// One level touched by a best-first walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelTake {
    pub price: f64,
    pub taken: u64,
    pub level_quantity: u64,
}

/// Walk levels best-first, consuming `min(remaining, level.quantity)` per
/// level until the request is satisfied or the levels are exhausted
///
/// Precondition: `levels` is best-first (as every `OrderBook` side is by
/// construction). Empty levels are skipped, not recorded.
pub fn walk_levels(levels: &[PriceLevel], quantity: u64) -> Vec<LevelTake> {
    let mut remaining = quantity;
    let mut takes = Vec::new();

    for level in levels {
        if remaining == 0 {
            break;
        }

        let taken = remaining.min(level.quantity);
        if taken > 0 {
            takes.push(LevelTake {
                price: level.price,
                taken,
                level_quantity: level.quantity,
            });
            remaining -= taken;
        }
    }

    takes
}

/// Total resting quantity on one side
pub fn total_liquidity(book: &OrderBook, side: BookSide) -> u64 {
    book.side(side).iter().map(|level| level.quantity).sum()
}

/// Quantity resting at levels at-or-better than `target_price`
///
/// Short-circuits at the first strictly worse level. The strict monotonic
/// ordering of book sides is a hard precondition here: a filter-then-sum over
/// an unsorted side would be undefined.
pub fn liquidity_up_to_price(book: &OrderBook, side: BookSide, target_price: f64) -> u64 {
    let mut total = 0;

    for level in book.side(side) {
        let worse = match side {
            BookSide::Bid => level.price < target_price,
            BookSide::Ask => level.price > target_price,
        };
        if worse {
            break;
        }
        total += level.quantity;
    }

    total
}

/// Volume-weighted average price for consuming `quantity` from one side
///
/// Returns 0.0 when nothing could be taken (empty side or zero request).
/// Requesting more than the side holds returns the VWAP over all available
/// quantity, without error.
pub fn calculate_vwap(book: &OrderBook, side: BookSide, quantity: u64) -> f64 {
    let takes = walk_levels(book.side(side), quantity);
    let taken: u64 = takes.iter().map(|t| t.taken).sum();
    if taken == 0 {
        return 0.0;
    }

    let value: f64 = takes.iter().map(|t| t.price * t.taken as f64).sum();
    value / taken as f64
}
