// Unified error handling for the SOR simulator
//
// Every routing failure is a typed, terminal error raised synchronously from
// `generate_routing_plan` or the engine surface. There are no retries at this
// layer: allocation against an unchanged book map is deterministic.

use crate::config::RoutingStrategy;
use thiserror::Error;

/// Main error type for routing and engine operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RoutingError {
    /// Non-positive quantity or malformed limit price
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// No venues or no order books were supplied at all
    #[error("No venues available for routing")]
    NoVenuesAvailable,

    /// Venues were supplied but none is both active and backed by a book
    #[error("No eligible venues: all venues are inactive or missing order books")]
    NoEligibleVenues,

    /// Only the best-price strategy is implemented
    #[error("Routing strategy {0:?} is not implemented")]
    StrategyNotImplemented(RoutingStrategy),

    /// Eligible venues exist but zero quantity could be matched
    #[error("Order could not be allocated: no liquidity matched")]
    UnallocatableOrder,

    /// Partial fills disallowed and the books cannot cover the request
    #[error("Insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity { requested: u64, available: u64 },

    /// A routing decision references a venue whose book is missing
    #[error("Order book not found for venue: {0}")]
    BookNotFound(String),

    /// A book failed its integrity check before use
    #[error("Invalid order book: {0}")]
    InvalidBook(String),
}

impl RoutingError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            RoutingError::InvalidOrder(_) => "order",
            RoutingError::NoVenuesAvailable | RoutingError::NoEligibleVenues => "venues",
            RoutingError::StrategyNotImplemented(_) => "strategy",
            RoutingError::UnallocatableOrder | RoutingError::InsufficientLiquidity { .. } => {
                "liquidity"
            }
            RoutingError::BookNotFound(_) | RoutingError::InvalidBook(_) => "book",
        }
    }
}

/// Result type alias using RoutingError
pub type RoutingResult<T> = Result<T, RoutingError>;
