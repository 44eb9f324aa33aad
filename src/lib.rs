// SOR Simulator Library
//
// An educational multi-venue order-book simulator with a simplified
// smart-order-router: synthetic books per venue around a shared reference
// price, best-price allocation across venues, and a deterministic execution
// replay that reconstructs the exact price levels each decision consumes.

pub mod aggregation;
pub mod config;
pub mod engine;
pub mod error;
pub mod order;
pub mod routing;
pub mod simulation;
pub mod venue;

// Re-export core types
pub use aggregation::{ConsolidatedBook, ConsolidatedLevel};
pub use config::{Config, ConfigError, LoggingConfig, RoutingStrategy, SORConfig, SimulationConfig};
pub use engine::{EngineStats, MarketEngine};
pub use error::{RoutingError, RoutingResult};
pub use order::{Order, OrderSide, OrderStatus, OrderType};
pub use venue::{Venue, VenueRegistry};

// Re-export simulation components
pub use simulation::{
    calculate_vwap, liquidity_up_to_price, total_liquidity, BookSide, BookSimulator, OrderBook,
    PriceLevel, ReferencePrice,
};

// Re-export routing components
pub use routing::{
    generate_routing_plan, simulate_execution, simulate_execution_from, ExecutionFill,
    RoutingDecision, RoutingPlan, VenueExecutionDetail,
};
