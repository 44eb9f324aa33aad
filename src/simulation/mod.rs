// Simulation module
// Synthetic order book generation and the pure liquidity primitives over it

pub mod generator;
pub mod liquidity;
pub mod order_book;

pub use generator::{BookSimulator, ReferencePrice};
pub use liquidity::{calculate_vwap, liquidity_up_to_price, total_liquidity, walk_levels};
pub use order_book::{BookSide, OrderBook, PriceLevel};
