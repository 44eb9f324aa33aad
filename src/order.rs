// Order types
// The parent order consumed read-only by the routing allocator

use crate::simulation::order_book::BookSide;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    /// Buyer: consumes ask-side liquidity
    Bid,
    /// Seller: consumes bid-side liquidity
    Ask,
}

impl OrderSide {
    /// The book side this order takes liquidity from
    pub fn consumed_side(&self) -> BookSide {
        match self {
            OrderSide::Bid => BookSide::Ask,
            OrderSide::Ask => BookSide::Bid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
    Iceberg,
    Hidden,
    PostOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Routed,
    PartiallyFilled,
    Filled,
    Cancelled,
    Rejected,
}

/// User or system order intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    /// Required iff order_type == Limit
    pub price: Option<f64>,
    pub quantity: u64,
    pub filled_quantity: u64,
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
}

impl Order {
    pub fn market(symbol: &str, side: OrderSide, quantity: u64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            symbol: symbol.to_string(),
            side,
            order_type: OrderType::Market,
            price: None,
            quantity,
            filled_quantity: 0,
            status: OrderStatus::Pending,
            timestamp: Utc::now(),
        }
    }

    pub fn limit(symbol: &str, side: OrderSide, quantity: u64, price: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            symbol: symbol.to_string(),
            side,
            order_type: OrderType::Limit,
            price: Some(price),
            quantity,
            filled_quantity: 0,
            status: OrderStatus::Pending,
            timestamp: Utc::now(),
        }
    }
}
