// Synthetic book generator
// Produces statistically plausible order books per venue from one shared,
// evolving reference price. Books are regenerated wholesale, never patched:
// this is a market-data simulator, not a matching engine.

use crate::config::SimulationConfig;
use crate::simulation::order_book::{BookSide, OrderBook, PriceLevel};
use crate::venue::Venue;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The shared reference price all venue mids disperse around
///
/// Held explicitly by the simulator and advanced only through `step`; there
/// is no module-level singleton behind it.
#[derive(Debug, Clone, Copy)]
pub struct ReferencePrice {
    value: f64,
}

impl ReferencePrice {
    pub fn new(initial: f64) -> Self {
        Self { value: initial }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Advance by one random-walk step and return the new value
    pub fn step(&mut self, rng: &mut StdRng, volatility: f64) -> f64 {
        let drift = rng.gen_range(-0.5..0.5) * volatility * 0.1;
        self.value += drift;
        self.value
    }
}

/// Generates and evolves per-venue order books
pub struct BookSimulator {
    config: SimulationConfig,
    reference: ReferencePrice,
    rng: StdRng,
}

impl BookSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        let reference = ReferencePrice::new(config.initial_reference_price);
        Self {
            config,
            reference,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded constructor for reproducible runs and tests
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        let reference = ReferencePrice::new(config.initial_reference_price);
        Self {
            config,
            reference,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn reference_price(&self) -> f64 {
        self.reference.value()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Generate a fresh book for one venue around the shared reference price
    ///
    /// The per-venue mid offset models cross-venue price dispersion; higher
    /// simulated latency widens the spread, modeling information staleness.
    pub fn generate_order_book(&mut self, venue: &Venue, symbol: &str) -> OrderBook {
        let volatility = self.config.volatility;
        let offset = self.rng.gen_range(-volatility / 2.0..volatility / 2.0);
        let mid = self.reference.value() + offset;

        let base_spread = self
            .rng
            .gen_range(self.config.min_base_spread..self.config.max_base_spread);
        let spread = base_spread * (1.0 + venue.latency_ms as f64 / 100.0);

        self.build_book(&venue.id, symbol, mid, spread)
    }

    /// Advance the shared reference price and regenerate a book in place of
    /// the given one, keeping its existing spread (spread is sticky per book;
    /// only level shape and the reference price move)
    pub fn update_order_book(&mut self, book: &OrderBook) -> OrderBook {
        let volatility = self.config.volatility;
        self.reference.step(&mut self.rng, volatility);

        let offset = self.rng.gen_range(-volatility / 2.0..volatility / 2.0);
        let mid = self.reference.value() + offset;

        let spread = match book.spread() {
            Some(s) => s,
            // An empty side leaves no spread to carry; fall back to a fresh draw
            None => self
                .rng
                .gen_range(self.config.min_base_spread..self.config.max_base_spread),
        };

        self.build_book(&book.venue_id, &book.symbol, mid, spread)
    }

    fn build_book(&mut self, venue_id: &str, symbol: &str, mid: f64, spread: f64) -> OrderBook {
        let tick = self.config.tick_size;
        let mut best_bid = round_to_tick(mid - spread / 2.0, tick);
        let mut best_ask = round_to_tick(mid + spread / 2.0, tick);
        if best_ask <= best_bid {
            best_ask = round_to_tick(best_bid + tick, tick);
        }
        // Keep the simulated price positive even after long adverse walks
        if best_bid <= 0.0 {
            best_bid = tick;
            best_ask = round_to_tick(best_bid + spread.max(tick), tick);
        }

        let bids = self.build_side(best_bid, BookSide::Bid);
        let asks = self.build_side(best_ask, BookSide::Ask);

        OrderBook {
            venue_id: venue_id.to_string(),
            symbol: symbol.to_string(),
            bids,
            asks,
            timestamp: Utc::now(),
        }
    }

    /// Walk away from the best price with non-uniform tick increments and
    /// exponentially decaying, lot-rounded quantities
    fn build_side(&mut self, best: f64, side: BookSide) -> Vec<PriceLevel> {
        let tick = self.config.tick_size;
        let lot = self.config.lot_size;
        let direction = match side {
            BookSide::Bid => -1.0,
            BookSide::Ask => 1.0,
        };

        let mut levels = Vec::with_capacity(self.config.levels_per_side);
        let mut price = best;

        for i in 0..self.config.levels_per_side {
            if i > 0 {
                let step = tick * (1.0 + self.rng.gen::<f64>());
                let next = round_to_tick(price + direction * step, tick);
                // Rounding must never collapse two levels onto one price
                price = if (next - price) * direction > 0.0 {
                    next
                } else {
                    round_to_tick(price + direction * tick, tick)
                };
            }

            let decay = (-(i as f64) / 5.0).exp();
            let raw = 1000.0 * decay * (0.5 + self.rng.gen::<f64>());
            let quantity = (raw / lot as f64).round() as u64 * lot;

            let order_count = ((quantity as f64 / 200.0) * self.rng.gen::<f64>()).round() as u32;
            let order_count = order_count.max(1);

            levels.push(PriceLevel::new(price, quantity, order_count));
        }

        levels
    }
}

fn round_to_tick(price: f64, tick: f64) -> f64 {
    (price / tick).round() * tick
}
