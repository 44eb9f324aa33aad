// Routing module
// The smart-order-router core: best-price allocation and execution replay

pub mod allocator;
pub mod replay;

pub use allocator::{generate_routing_plan, RoutingDecision, RoutingPlan};
pub use replay::{simulate_execution, simulate_execution_from, ExecutionFill, VenueExecutionDetail};
