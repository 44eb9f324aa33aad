// Market engine orchestrator
// Owns the venue registry, the book simulator, and the per-venue book map.
// Each tick replaces the whole map, never entries in place, so every reader
// within a tick sees one consistent generation of books.

use crate::aggregation::ConsolidatedBook;
use crate::config::Config;
use crate::error::{RoutingError, RoutingResult};
use crate::order::Order;
use crate::routing::allocator::{generate_routing_plan, RoutingPlan};
use crate::routing::replay::{simulate_execution_from, VenueExecutionDetail};
use crate::simulation::generator::BookSimulator;
use crate::simulation::order_book::OrderBook;
use crate::venue::VenueRegistry;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Statistics tracked by the engine
#[derive(Debug, Clone, Default)]
pub struct EngineStats {
    pub ticks: u64,
    pub plans_generated: u64,
    pub routing_failures: u64,
    pub total_allocated: u64,
    pub total_fees: f64,
}

/// Orchestrates book simulation, routing, and replay for one symbol
pub struct MarketEngine {
    registry: VenueRegistry,
    simulator: BookSimulator,
    order_books: HashMap<String, OrderBook>,
    config: Config,
    stats: EngineStats,
}

impl MarketEngine {
    pub fn new(config: Config) -> Self {
        let simulator = BookSimulator::new(config.simulation.clone());
        Self::build(config, simulator)
    }

    /// Seeded constructor for reproducible runs and tests
    pub fn with_seed(config: Config, seed: u64) -> Self {
        let simulator = BookSimulator::with_seed(config.simulation.clone(), seed);
        Self::build(config, simulator)
    }

    fn build(config: Config, mut simulator: BookSimulator) -> Self {
        let registry = VenueRegistry::with_defaults();
        let symbol = config.simulation.symbol.clone();

        let mut order_books = HashMap::new();
        for venue in registry.active_venues() {
            let book = simulator.generate_order_book(venue, &symbol);
            order_books.insert(venue.id.clone(), book);
        }

        if config.logging.enable_book_logging {
            info!(
                "📖 Initialized {} order books for {} around {:.2}",
                order_books.len(),
                symbol,
                simulator.reference_price()
            );
        }

        Self {
            registry,
            simulator,
            order_books,
            config,
            stats: EngineStats::default(),
        }
    }

    /// Advance the market one tick: regenerate every active venue's book
    /// around the stepped reference price and swap in the new map wholesale
    pub fn tick(&mut self) {
        let symbol = self.config.simulation.symbol.clone();
        let mut next = HashMap::new();

        for venue in self.registry.active_venues() {
            let book = match self.order_books.get(&venue.id) {
                Some(previous) => self.simulator.update_order_book(previous),
                None => self.simulator.generate_order_book(venue, &symbol),
            };
            next.insert(venue.id.clone(), book);
        }

        self.order_books = next;
        self.stats.ticks += 1;

        if self.config.logging.enable_book_logging {
            debug!(
                "📊 Tick {}: reference {:.2}, {} books",
                self.stats.ticks,
                self.simulator.reference_price(),
                self.order_books.len()
            );
        }
    }

    /// Toggle a venue; activation generates a fresh book, deactivation drops
    /// it from the map (and so from aggregation and the next routing call)
    pub fn set_venue_active(&mut self, venue_id: &str, active: bool) -> bool {
        if !self.registry.set_active(venue_id, active) {
            warn!("⚠️  Unknown venue: {}", venue_id);
            return false;
        }

        if active {
            let symbol = self.config.simulation.symbol.clone();
            if let Some(venue) = self.registry.get(venue_id) {
                let book = self.simulator.generate_order_book(venue, &symbol);
                self.order_books.insert(venue_id.to_string(), book);
            }
        } else {
            self.order_books.remove(venue_id);
        }

        true
    }

    /// Route an order against the current book generation and replay every
    /// decision over the same snapshot for display detail
    pub fn submit_order(
        &mut self,
        order: &Order,
    ) -> RoutingResult<(RoutingPlan, Vec<VenueExecutionDetail>)> {
        let result = generate_routing_plan(
            order,
            self.registry.venues(),
            &self.order_books,
            &self.config.routing,
        );

        let plan = match result {
            Ok(plan) => plan,
            Err(err) => {
                self.stats.routing_failures += 1;
                if self.config.logging.enable_routing_logging {
                    warn!("❌ Routing failed ({}): {}", err.category(), err);
                }
                return Err(err);
            }
        };

        // A venue can appear in several decisions at increasing depth; each
        // replay starts at the decision's own level so shallower levels,
        // already consumed by earlier decisions, are not walked twice
        let mut details = Vec::with_capacity(plan.decisions.len());
        for decision in &plan.decisions {
            let book = self
                .order_books
                .get(&decision.venue_id)
                .ok_or_else(|| RoutingError::BookNotFound(decision.venue_id.clone()))?;
            details.push(simulate_execution_from(
                book,
                order,
                decision.expected_price,
                decision.quantity,
            ));
        }

        self.stats.plans_generated += 1;
        self.stats.total_allocated += plan.total_quantity;
        self.stats.total_fees += plan.decisions.iter().map(|d| d.expected_fees).sum::<f64>();

        if self.config.logging.enable_routing_logging {
            info!(
                "✅ ROUTED {} {:?} {}: {} decisions, {} filled @ avg {:.4}",
                order.symbol,
                order.side,
                order.quantity,
                plan.decisions.len(),
                plan.total_quantity,
                plan.estimated_avg_price
            );
        }

        Ok((plan, details))
    }

    /// Cross-venue consolidated ladder over the current book generation
    pub fn consolidated_book(&self) -> ConsolidatedBook {
        ConsolidatedBook::build(
            &self.order_books,
            &self.registry,
            &self.config.simulation.symbol,
        )
    }

    pub fn order_books(&self) -> &HashMap<String, OrderBook> {
        &self.order_books
    }

    pub fn order_book(&self, venue_id: &str) -> Option<&OrderBook> {
        self.order_books.get(venue_id)
    }

    pub fn registry(&self) -> &VenueRegistry {
        &self.registry
    }

    pub fn reference_price(&self) -> f64 {
        self.simulator.reference_price()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stats(&self) -> &EngineStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = EngineStats::default();
    }
}
