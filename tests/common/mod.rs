// Common test utilities and helpers

use sor_simulator::{Config, MarketEngine, OrderBook, PriceLevel};

/// Create a test configuration with logging silenced
pub fn create_test_config() -> Config {
    let mut config = Config::default();
    config.logging.enable_book_logging = false;
    config.logging.enable_routing_logging = false;
    config
}

/// Create a seeded engine for reproducible scenarios
pub fn create_test_engine(seed: u64) -> MarketEngine {
    MarketEngine::with_seed(create_test_config(), seed)
}

/// Build a hand-crafted book from (price, quantity) pairs, best-first
#[allow(dead_code)]
pub fn build_book(
    venue_id: &str,
    bids: &[(f64, u64)],
    asks: &[(f64, u64)],
) -> OrderBook {
    let mut book = OrderBook::new(venue_id, "ACME");
    book.bids = bids
        .iter()
        .map(|&(price, quantity)| PriceLevel::new(price, quantity, 1))
        .collect();
    book.asks = asks
        .iter()
        .map(|&(price, quantity)| PriceLevel::new(price, quantity, 1))
        .collect();
    book
}
