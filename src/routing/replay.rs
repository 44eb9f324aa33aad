// Execution replay
// Re-walks one venue's book with the allocator's exact consumption semantics
// to recover per-level fill detail for display. Run against the same
// unmutated snapshot the allocator planned over, the replayed average price
// must reproduce the decision's expected price.

use crate::order::Order;
use crate::simulation::liquidity::walk_levels;
use crate::simulation::order_book::{BookSide, OrderBook, PriceLevel};
use serde::{Deserialize, Serialize};

/// One price level consumed during replay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionFill {
    pub price: f64,
    pub quantity_taken: u64,
    /// What the level still holds after the take
    pub quantity_remaining: u64,
    pub percentage_taken: f64,
}

/// Per-venue replay result: the exact level-by-level book walk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueExecutionDetail {
    pub venue_id: String,
    pub fills: Vec<ExecutionFill>,
    pub average_price: f64,
    pub total_filled: u64,
}

/// Replay `quantity` of the order against one venue's book snapshot
///
/// Side selection and level walking are identical to the allocator's, so the
/// realized average equals the planned expected price when the book has not
/// changed in between.
///
/// The average divides by the requested quantity, not the matched quantity:
/// if the book cannot cover the request the average comes out diluted. That
/// mirrors the planner's documented behavior and is asserted by tests rather
/// than corrected here.
pub fn simulate_execution(
    order_book: &OrderBook,
    order: &Order,
    quantity: u64,
) -> VenueExecutionDetail {
    let side = order.side.consumed_side();
    replay_levels(order_book, order_book.side(side), quantity)
}

/// Replay `quantity` starting at the level priced `from_price`
///
/// A plan can touch one venue at several depths; each decision's replay must
/// begin at that decision's own level, not at the top of the book, or the
/// shallower levels get double-counted. Levels strictly better than
/// `from_price` are treated as already consumed by earlier decisions.
pub fn simulate_execution_from(
    order_book: &OrderBook,
    order: &Order,
    from_price: f64,
    quantity: u64,
) -> VenueExecutionDetail {
    let side = order.side.consumed_side();
    let levels = order_book.side(side);
    let start = levels
        .iter()
        .position(|level| match side {
            BookSide::Ask => level.price >= from_price,
            BookSide::Bid => level.price <= from_price,
        })
        .unwrap_or(levels.len());
    replay_levels(order_book, &levels[start..], quantity)
}

fn replay_levels(
    order_book: &OrderBook,
    levels: &[PriceLevel],
    quantity: u64,
) -> VenueExecutionDetail {
    let takes = walk_levels(levels, quantity);

    let fills: Vec<ExecutionFill> = takes
        .iter()
        .map(|take| ExecutionFill {
            price: take.price,
            quantity_taken: take.taken,
            quantity_remaining: take.level_quantity - take.taken,
            percentage_taken: take.taken as f64 / take.level_quantity as f64 * 100.0,
        })
        .collect();

    let total_filled: u64 = takes.iter().map(|t| t.taken).sum();
    let value: f64 = takes.iter().map(|t| t.price * t.taken as f64).sum();
    let average_price = if quantity > 0 {
        value / quantity as f64
    } else {
        0.0
    };

    VenueExecutionDetail {
        venue_id: order_book.venue_id.clone(),
        fills,
        average_price,
        total_filled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Order, OrderSide};
    use crate::simulation::order_book::{OrderBook, PriceLevel};

    fn create_test_book() -> OrderBook {
        let mut book = OrderBook::new("NYSE", "ACME");
        book.bids = vec![
            PriceLevel::new(99.99, 1_000, 3),
            PriceLevel::new(99.98, 1_500, 5),
        ];
        book.asks = vec![
            PriceLevel::new(100.01, 1_000, 2),
            PriceLevel::new(100.02, 1_500, 4),
            PriceLevel::new(100.03, 3_000, 7),
        ];
        book
    }

    #[test]
    fn test_replay_walks_ask_side_for_bid_order() {
        let book = create_test_book();
        let order = Order::market("ACME", OrderSide::Bid, 2_500);

        let detail = simulate_execution(&book, &order, 2_500);

        assert_eq!(detail.venue_id, "NYSE");
        assert_eq!(detail.total_filled, 2_500);
        assert_eq!(detail.fills.len(), 2);

        assert_eq!(detail.fills[0].price, 100.01);
        assert_eq!(detail.fills[0].quantity_taken, 1_000);
        assert_eq!(detail.fills[0].quantity_remaining, 0);
        assert_eq!(detail.fills[0].percentage_taken, 100.0);

        assert_eq!(detail.fills[1].price, 100.02);
        assert_eq!(detail.fills[1].quantity_taken, 1_500);
        assert_eq!(detail.fills[1].percentage_taken, 100.0);

        let expected = (1_000.0 * 100.01 + 1_500.0 * 100.02) / 2_500.0;
        assert!((detail.average_price - expected).abs() < 1e-9);
    }

    #[test]
    fn test_partial_level_consumption() {
        let book = create_test_book();
        let order = Order::market("ACME", OrderSide::Bid, 1_500);

        let detail = simulate_execution(&book, &order, 1_500);

        assert_eq!(detail.fills.len(), 2);
        assert_eq!(detail.fills[1].quantity_taken, 500);
        assert_eq!(detail.fills[1].quantity_remaining, 1_000);
        assert!((detail.fills[1].percentage_taken - 33.333333).abs() < 1e-3);
    }

    #[test]
    fn test_ask_order_walks_bid_side() {
        let book = create_test_book();
        let order = Order::market("ACME", OrderSide::Ask, 1_200);

        let detail = simulate_execution(&book, &order, 1_200);

        assert_eq!(detail.fills[0].price, 99.99);
        assert_eq!(detail.fills[1].price, 99.98);
        assert_eq!(detail.total_filled, 1_200);
    }

    #[test]
    fn test_short_book_dilutes_average() {
        // Asks hold 5500 total; requesting 10000 divides by the request,
        // not the match. The dilution is intentional and documented.
        let book = create_test_book();
        let order = Order::market("ACME", OrderSide::Bid, 10_000);

        let detail = simulate_execution(&book, &order, 10_000);

        assert_eq!(detail.total_filled, 5_500);
        let value = 1_000.0 * 100.01 + 1_500.0 * 100.02 + 3_000.0 * 100.03;
        let diluted = value / 10_000.0;
        assert!((detail.average_price - diluted).abs() < 1e-9);
        assert!(detail.average_price < value / 5_500.0);
    }

    #[test]
    fn test_replay_from_deeper_level_skips_shallower_ones() {
        let book = create_test_book();
        let order = Order::market("ACME", OrderSide::Bid, 5_000);

        let detail = simulate_execution_from(&book, &order, 100.02, 1_500);

        assert_eq!(detail.fills.len(), 1);
        assert_eq!(detail.fills[0].price, 100.02);
        assert_eq!(detail.fills[0].quantity_taken, 1_500);
        assert_eq!(detail.fills[0].quantity_remaining, 0);
        assert!((detail.average_price - 100.02).abs() < 1e-9);
    }

    #[test]
    fn test_replay_from_deeper_bid_level() {
        let book = create_test_book();
        let order = Order::market("ACME", OrderSide::Ask, 2_500);

        let detail = simulate_execution_from(&book, &order, 99.98, 1_500);

        assert_eq!(detail.fills.len(), 1);
        assert_eq!(detail.fills[0].price, 99.98);
        assert_eq!(detail.fills[0].quantity_taken, 1_500);
        assert!((detail.average_price - 99.98).abs() < 1e-9);
    }

    #[test]
    fn test_replay_from_top_matches_plain_replay() {
        let book = create_test_book();
        let order = Order::market("ACME", OrderSide::Bid, 2_500);

        let plain = simulate_execution(&book, &order, 2_500);
        let from_top = simulate_execution_from(&book, &order, 100.01, 2_500);

        assert_eq!(plain.fills, from_top.fills);
        assert_eq!(plain.total_filled, from_top.total_filled);
    }

    #[test]
    fn test_zero_quantity_replay() {
        let book = create_test_book();
        let order = Order::market("ACME", OrderSide::Bid, 100);

        let detail = simulate_execution(&book, &order, 0);
        assert!(detail.fills.is_empty());
        assert_eq!(detail.average_price, 0.0);
        assert_eq!(detail.total_filled, 0);
    }
}
