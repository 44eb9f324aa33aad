// Best-price routing allocator
// Flattens every eligible venue's consuming side into one global price ladder
// and walks it greedily, emitting one decision per price level touched. The
// per-level granularity is deliberate: aggregating by venue would lose the
// exact levels the execution replay needs to reconstruct.

use crate::config::{RoutingStrategy, SORConfig};
use crate::error::{RoutingError, RoutingResult};
use crate::order::{Order, OrderSide, OrderType};
use crate::simulation::order_book::OrderBook;
use crate::venue::Venue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

/// One allocation unit: take `quantity` at one price level on one venue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub venue_id: String,
    pub quantity: u64,
    pub expected_price: f64,
    pub expected_fees: f64,
    /// Human-readable justification for the display layer
    pub rationale: String,
    /// Execution order: 0-based, unique, ascending with allocation order
    pub priority: u32,
}

/// The complete allocation for one parent order
///
/// Invariant: `total_quantity <= order.quantity`, with equality unless
/// liquidity or limit-price filtering prevented a full fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingPlan {
    pub parent_order_id: String,
    pub strategy: RoutingStrategy,
    /// Sorted by priority ascending; downstream replay must consume in order
    pub decisions: Vec<RoutingDecision>,
    pub total_quantity: u64,
    pub estimated_avg_price: f64,
    pub estimated_total_cost: f64,
    pub estimated_slippage: f64,
    pub timestamp: DateTime<Utc>,
}

/// One price level extracted from a venue book, tagged with its owner
#[derive(Debug, Clone)]
struct VenueSlice {
    venue_id: String,
    price: f64,
    quantity: u64,
    taker_fee: f64,
}

/// Produce a routing plan for one parent order against the current book map
///
/// Fails fast with a typed error; no partial plan ever leaks. Venues that are
/// inactive or missing a book are silently excluded, but an empty post-filter
/// set is an error.
pub fn generate_routing_plan(
    order: &Order,
    venues: &[Venue],
    order_books: &HashMap<String, OrderBook>,
    config: &SORConfig,
) -> RoutingResult<RoutingPlan> {
    validate_order(order)?;

    if config.strategy != RoutingStrategy::BestPrice {
        return Err(RoutingError::StrategyNotImplemented(config.strategy));
    }

    if venues.is_empty() || order_books.is_empty() {
        return Err(RoutingError::NoVenuesAvailable);
    }

    let eligible: Vec<&Venue> = venues
        .iter()
        .filter(|v| v.active && order_books.contains_key(&v.id))
        .collect();

    if eligible.is_empty() {
        return Err(RoutingError::NoEligibleVenues);
    }

    let mut slices = flatten_books(order, &eligible, order_books);

    if let Some(limit) = order.price {
        slices.retain(|slice| match order.side {
            OrderSide::Bid => slice.price <= limit,
            OrderSide::Ask => slice.price >= limit,
        });

        if slices.is_empty() {
            warn!(
                "Limit price {:.2} matches no liquidity for order {}",
                limit, order.id
            );
        }
    }

    sort_slices(&mut slices, order.side);

    // Greedy walk: same consumption rule as the VWAP primitive, applied to
    // the cross-venue ladder
    let mut decisions = Vec::new();
    let mut remaining = order.quantity;

    for slice in &slices {
        if remaining == 0 {
            break;
        }

        let take = remaining.min(slice.quantity);
        let expected_fees = if config.consider_fees {
            slice.price * take as f64 * slice.taker_fee
        } else {
            0.0
        };

        decisions.push(RoutingDecision {
            venue_id: slice.venue_id.clone(),
            quantity: take,
            expected_price: slice.price,
            expected_fees,
            rationale: format!(
                "Price level {:.2} on {} ({} resting)",
                slice.price, slice.venue_id, slice.quantity
            ),
            priority: 0, // assigned after post-processing
        });
        remaining -= take;
    }

    // Post-processing can reduce the fill below what the walk achieved; that
    // is documented behavior, surfaced in the logs rather than hidden
    if config.min_quantity_per_venue > 0 {
        let before = decisions.len();
        decisions.retain(|d| d.quantity >= config.min_quantity_per_venue);
        if decisions.len() < before {
            debug!(
                "Dropped {} decisions below min quantity {}",
                before - decisions.len(),
                config.min_quantity_per_venue
            );
        }
    }

    if decisions.len() > config.max_venues {
        warn!(
            "Truncating plan from {} to {} decisions; fill may shrink",
            decisions.len(),
            config.max_venues
        );
        decisions.truncate(config.max_venues);
    }

    for (i, decision) in decisions.iter_mut().enumerate() {
        decision.priority = i as u32;
    }

    let total_quantity: u64 = decisions.iter().map(|d| d.quantity).sum();

    if total_quantity == 0 {
        return Err(RoutingError::UnallocatableOrder);
    }

    if total_quantity < order.quantity && !config.allow_partial_fills {
        return Err(RoutingError::InsufficientLiquidity {
            requested: order.quantity,
            available: total_quantity,
        });
    }

    let weighted_price: f64 = decisions
        .iter()
        .map(|d| d.expected_price * d.quantity as f64)
        .sum();
    let total_fees: f64 = decisions.iter().map(|d| d.expected_fees).sum();

    let estimated_avg_price = weighted_price / total_quantity as f64;
    let estimated_total_cost = weighted_price + total_fees;
    let estimated_slippage = order
        .price
        .map(|limit| (estimated_avg_price - limit).abs())
        .unwrap_or(0.0);

    Ok(RoutingPlan {
        parent_order_id: order.id.clone(),
        strategy: config.strategy,
        decisions,
        total_quantity,
        estimated_avg_price,
        estimated_total_cost,
        estimated_slippage,
        timestamp: Utc::now(),
    })
}

fn validate_order(order: &Order) -> RoutingResult<()> {
    if order.quantity == 0 {
        return Err(RoutingError::InvalidOrder(
            "quantity must be positive".to_string(),
        ));
    }

    if order.order_type == OrderType::Limit {
        match order.price {
            None => {
                return Err(RoutingError::InvalidOrder(
                    "limit order requires a price".to_string(),
                ))
            }
            Some(price) if price <= 0.0 || !price.is_finite() => {
                return Err(RoutingError::InvalidOrder(format!(
                    "invalid limit price: {}",
                    price
                )))
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// Extract every non-empty level on the consuming side of each eligible
/// venue's book, tagged with its owner. Deliberately not pre-aggregated per
/// venue: best execution interleaves venues at adjacent prices.
fn flatten_books(
    order: &Order,
    eligible: &[&Venue],
    order_books: &HashMap<String, OrderBook>,
) -> Vec<VenueSlice> {
    let side = order.side.consumed_side();
    let mut slices = Vec::new();

    for venue in eligible {
        if let Some(book) = order_books.get(&venue.id) {
            for level in book.side(side) {
                if level.quantity > 0 {
                    slices.push(VenueSlice {
                        venue_id: venue.id.clone(),
                        price: level.price,
                        quantity: level.quantity,
                        taker_fee: venue.taker_fee,
                    });
                }
            }
        }
    }

    slices
}

/// Ascending price for a buyer (cheapest offer first), descending for a
/// seller. Equal prices tie-break on lexicographic venue id so allocations
/// are reproducible.
fn sort_slices(slices: &mut [VenueSlice], side: OrderSide) {
    slices.sort_by(|a, b| {
        let by_price = match side {
            OrderSide::Bid => a.price.partial_cmp(&b.price),
            OrderSide::Ask => b.price.partial_cmp(&a.price),
        }
        .unwrap_or(Ordering::Equal);

        by_price.then_with(|| a.venue_id.cmp(&b.venue_id))
    });
}
