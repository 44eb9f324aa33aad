// Synthetic order book
// Per-venue resting liquidity, best-first on both sides, replaced wholesale
// on every market tick. Consumers never mutate a book once it is published.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resting liquidity at one price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    pub price: f64,
    pub quantity: u64,
    pub order_count: u32,
}

impl PriceLevel {
    pub fn new(price: f64, quantity: u64, order_count: u32) -> Self {
        Self {
            price,
            quantity,
            order_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookSide {
    Bid,
    Ask,
}

/// Order book for one (venue, symbol)
///
/// Invariant: `bids` prices strictly decrease and `asks` prices strictly
/// increase with depth index, and the book is never crossed or locked
/// (`spread > 0` whenever both sides are non-empty).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    pub venue_id: String,
    pub symbol: String,
    /// Best-first: strictly descending prices
    pub bids: Vec<PriceLevel>,
    /// Best-first: strictly ascending prices
    pub asks: Vec<PriceLevel>,
    pub timestamp: DateTime<Utc>,
}

impl OrderBook {
    pub fn new(venue_id: &str, symbol: &str) -> Self {
        Self {
            venue_id: venue_id.to_string(),
            symbol: symbol.to_string(),
            bids: Vec::new(),
            asks: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Levels of one side, best-first
    pub fn side(&self, side: BookSide) -> &[PriceLevel] {
        match side {
            BookSide::Bid => &self.bids,
            BookSide::Ask => &self.asks,
        }
    }

    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bids.first()
    }

    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.asks.first()
    }

    pub fn spread(&self) -> Option<f64> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some(ask.price - bid.price),
            _ => None,
        }
    }

    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => Some((ask.price + bid.price) / 2.0),
            _ => None,
        }
    }

    /// Number of price levels on each side
    pub fn depth(&self) -> (usize, usize) {
        (self.bids.len(), self.asks.len())
    }

    /// Validate order book integrity
    pub fn validate(&self) -> Result<(), String> {
        for pair in self.bids.windows(2) {
            if pair[1].price >= pair[0].price {
                return Err(format!(
                    "Bid prices not strictly decreasing: {} then {}",
                    pair[0].price, pair[1].price
                ));
            }
        }

        for pair in self.asks.windows(2) {
            if pair[1].price <= pair[0].price {
                return Err(format!(
                    "Ask prices not strictly increasing: {} then {}",
                    pair[0].price, pair[1].price
                ));
            }
        }

        if let (Some(bid), Some(ask)) = (self.best_bid(), self.best_ask()) {
            if bid.price >= ask.price {
                return Err(format!(
                    "Crossed or locked book: best bid {} >= best ask {}",
                    bid.price, ask.price
                ));
            }
        }

        for level in self.bids.iter().chain(self.asks.iter()) {
            if level.order_count == 0 {
                return Err(format!("Zero order count at price {}", level.price));
            }
        }

        Ok(())
    }
}
