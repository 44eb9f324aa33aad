// Trading venue registry
// Static configuration of simulated destinations; only `active` mutates after startup

use serde::{Deserialize, Serialize};

/// A simulated trading destination with its own fee schedule and latency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
    pub id: String,
    pub name: String,
    /// Signed rate per notional; negative means a rebate
    pub maker_fee: f64,
    /// Non-negative rate per notional
    pub taker_fee: f64,
    /// Simulated round-trip latency; widens the venue's spread
    pub latency_ms: u64,
    pub active: bool,
    /// Display color for the excluded UI layer
    pub color: String,
}

impl Venue {
    pub fn new(
        id: &str,
        name: &str,
        maker_fee: f64,
        taker_fee: f64,
        latency_ms: u64,
        color: &str,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            maker_fee,
            taker_fee,
            latency_ms,
            active: true,
            color: color.to_string(),
        }
    }
}

/// Process-wide venue registry, seeded once at startup
#[derive(Debug, Clone)]
pub struct VenueRegistry {
    venues: Vec<Venue>,
}

impl VenueRegistry {
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }

    /// Default set of simulated US-equity-style venues
    pub fn with_defaults() -> Self {
        Self::new(vec![
            Venue::new("NYSE", "New York Stock Exchange", -0.0020, 0.0030, 45, "#1f77b4"),
            Venue::new("NSDQ", "Nasdaq", -0.0025, 0.0030, 40, "#2ca02c"),
            Venue::new("ARCA", "NYSE Arca", -0.0021, 0.0028, 55, "#ff7f0e"),
            Venue::new("BATS", "Cboe BZX", -0.0018, 0.0025, 60, "#d62728"),
            Venue::new("IEXG", "IEX", 0.0000, 0.0009, 350, "#9467bd"),
            Venue::new("DPOOL", "Midpoint Dark Pool", 0.0000, 0.0010, 80, "#7f7f7f"),
        ])
    }

    pub fn venues(&self) -> &[Venue] {
        &self.venues
    }

    pub fn get(&self, id: &str) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    /// Toggle a venue's active flag; returns false if the id is unknown
    pub fn set_active(&mut self, id: &str, active: bool) -> bool {
        match self.venues.iter_mut().find(|v| v.id == id) {
            Some(venue) => {
                venue.active = active;
                true
            }
            None => false,
        }
    }

    pub fn active_venues(&self) -> Vec<&Venue> {
        self.venues.iter().filter(|v| v.active).collect()
    }

    pub fn len(&self) -> usize {
        self.venues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}
