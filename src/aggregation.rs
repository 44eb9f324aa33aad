// Consolidated book view model
// Cross-venue ladder keyed by exact price: two venues share a row only when
// their prices match to the tick. Pure data reshaping for the display layer,
// no allocation logic.

use crate::simulation::order_book::OrderBook;
use crate::venue::VenueRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Wrapper for f64 to use as BTreeMap key (handles NaN/Inf properly)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
struct OrderedFloat(f64);

impl Eq for OrderedFloat {}

impl Ord for OrderedFloat {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .partial_cmp(&other.0)
            .unwrap_or(std::cmp::Ordering::Equal)
    }
}

/// One row of the unified ladder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedLevel {
    pub price: f64,
    /// Resting bid quantity per venue at exactly this price
    pub bid_quantities: BTreeMap<String, u64>,
    /// Resting ask quantity per venue at exactly this price
    pub ask_quantities: BTreeMap<String, u64>,
    pub total_bid: u64,
    pub total_ask: u64,
}

impl ConsolidatedLevel {
    fn new(price: f64) -> Self {
        Self {
            price,
            bid_quantities: BTreeMap::new(),
            ask_quantities: BTreeMap::new(),
            total_bid: 0,
            total_ask: 0,
        }
    }
}

/// Cross-venue consolidated view of every active venue's book
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsolidatedBook {
    pub symbol: String,
    /// Sorted descending by price
    pub levels: Vec<ConsolidatedLevel>,
    pub timestamp: DateTime<Utc>,
}

impl ConsolidatedBook {
    /// Scan every active venue's book once per side
    pub fn build(
        order_books: &HashMap<String, OrderBook>,
        registry: &VenueRegistry,
        symbol: &str,
    ) -> Self {
        let mut ladder: BTreeMap<OrderedFloat, ConsolidatedLevel> = BTreeMap::new();

        for venue in registry.active_venues() {
            let book = match order_books.get(&venue.id) {
                Some(book) if book.symbol == symbol => book,
                _ => continue,
            };

            for level in &book.bids {
                let row = ladder
                    .entry(OrderedFloat(level.price))
                    .or_insert_with(|| ConsolidatedLevel::new(level.price));
                row.bid_quantities.insert(venue.id.clone(), level.quantity);
                row.total_bid += level.quantity;
            }

            for level in &book.asks {
                let row = ladder
                    .entry(OrderedFloat(level.price))
                    .or_insert_with(|| ConsolidatedLevel::new(level.price));
                row.ask_quantities.insert(venue.id.clone(), level.quantity);
                row.total_ask += level.quantity;
            }
        }

        ConsolidatedBook {
            symbol: symbol.to_string(),
            levels: ladder.into_values().rev().collect(),
            timestamp: Utc::now(),
        }
    }

    /// Consolidated best bid: first row (scanning down) with bid quantity
    pub fn best_bid(&self) -> Option<f64> {
        self.levels
            .iter()
            .find(|row| row.total_bid > 0)
            .map(|row| row.price)
    }

    /// Consolidated best ask: first row from the ascending end with ask quantity
    pub fn best_ask(&self) -> Option<f64> {
        self.levels
            .iter()
            .rev()
            .find(|row| row.total_ask > 0)
            .map(|row| row.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::order_book::PriceLevel;
    use crate::venue::{Venue, VenueRegistry};

    fn test_registry() -> VenueRegistry {
        VenueRegistry::new(vec![
            Venue::new("NYSE", "NYSE", -0.002, 0.003, 50, "#111111"),
            Venue::new("NSDQ", "Nasdaq", -0.002, 0.003, 40, "#222222"),
        ])
    }

    fn test_books() -> HashMap<String, OrderBook> {
        let mut nyse = OrderBook::new("NYSE", "ACME");
        nyse.bids = vec![PriceLevel::new(99.99, 1_000, 1), PriceLevel::new(99.98, 500, 1)];
        nyse.asks = vec![PriceLevel::new(100.01, 700, 1)];

        let mut nsdq = OrderBook::new("NSDQ", "ACME");
        nsdq.bids = vec![PriceLevel::new(99.99, 2_000, 1)];
        nsdq.asks = vec![PriceLevel::new(100.00, 300, 1), PriceLevel::new(100.01, 400, 1)];

        let mut books = HashMap::new();
        books.insert("NYSE".to_string(), nyse);
        books.insert("NSDQ".to_string(), nsdq);
        books
    }

    #[test]
    fn test_exact_price_merge() {
        let registry = test_registry();
        let books = test_books();
        let view = ConsolidatedBook::build(&books, &registry, "ACME");

        let row = view
            .levels
            .iter()
            .find(|l| (l.price - 99.99).abs() < 1e-9)
            .unwrap();
        assert_eq!(row.total_bid, 3_000);
        assert_eq!(row.bid_quantities["NYSE"], 1_000);
        assert_eq!(row.bid_quantities["NSDQ"], 2_000);

        let row = view
            .levels
            .iter()
            .find(|l| (l.price - 100.01).abs() < 1e-9)
            .unwrap();
        assert_eq!(row.total_ask, 1_100);
    }

    #[test]
    fn test_descending_order_and_best_prices() {
        let registry = test_registry();
        let books = test_books();
        let view = ConsolidatedBook::build(&books, &registry, "ACME");

        for pair in view.levels.windows(2) {
            assert!(pair[0].price > pair[1].price);
        }

        assert_eq!(view.best_bid(), Some(99.99));
        assert_eq!(view.best_ask(), Some(100.00));
    }

    #[test]
    fn test_inactive_venue_excluded() {
        let mut registry = test_registry();
        registry.set_active("NSDQ", false);
        let books = test_books();
        let view = ConsolidatedBook::build(&books, &registry, "ACME");

        let row = view
            .levels
            .iter()
            .find(|l| (l.price - 99.99).abs() < 1e-9)
            .unwrap();
        assert_eq!(row.total_bid, 1_000);
        assert!(!row.bid_quantities.contains_key("NSDQ"));
        // NSDQ's 100.00 ask disappears with it
        assert_eq!(view.best_ask(), Some(100.01));
    }

    #[test]
    fn test_other_symbol_ignored() {
        let registry = test_registry();
        let mut books = test_books();
        books.get_mut("NSDQ").unwrap().symbol = "OTHER".to_string();

        let view = ConsolidatedBook::build(&books, &registry, "ACME");
        let row = view
            .levels
            .iter()
            .find(|l| (l.price - 99.99).abs() < 1e-9)
            .unwrap();
        assert_eq!(row.total_bid, 1_000);
    }
}
