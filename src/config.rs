// Configuration management for the SOR simulator

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Routing strategy selector
///
/// Only `BestPrice` is implemented; the others are recognized so a config file
/// naming them produces a typed `StrategyNotImplemented` error instead of a
/// parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutingStrategy {
    BestPrice,
    LowestFee,
    Fastest,
    Proportional,
}

impl Default for RoutingStrategy {
    fn default() -> Self {
        RoutingStrategy::BestPrice
    }
}

/// Smart-order-router configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SORConfig {
    pub strategy: RoutingStrategy,
    /// Maximum number of routing decisions kept after allocation
    pub max_venues: usize,
    /// Decisions smaller than this are dropped in post-processing
    pub min_quantity_per_venue: u64,
    pub consider_fees: bool,
    pub consider_latency: bool,
    pub allow_partial_fills: bool,
    /// Advisory time budget in milliseconds; unused by the best-price strategy
    pub time_limit_ms: Option<u64>,
}

impl Default for SORConfig {
    fn default() -> Self {
        Self {
            strategy: RoutingStrategy::BestPrice,
            max_venues: 10,
            min_quantity_per_venue: 0,
            consider_fees: true,
            consider_latency: false,
            allow_partial_fills: true,
            time_limit_ms: None,
        }
    }
}

/// Synthetic book generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub symbol: String,
    pub initial_reference_price: f64,
    /// Controls cross-venue price dispersion and the reference random walk
    pub volatility: f64,
    pub levels_per_side: usize,
    pub tick_size: f64,
    pub lot_size: u64,
    /// Base spread is drawn uniformly from [min_base_spread, max_base_spread]
    /// before latency scaling
    pub min_base_spread: f64,
    pub max_base_spread: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            symbol: "ACME".to_string(),
            initial_reference_price: 100.0,
            volatility: 0.2,
            levels_per_side: 15,
            tick_size: 0.01,
            lot_size: 100,
            min_base_spread: 0.01,
            max_base_spread: 0.03,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub enable_book_logging: bool,
    pub enable_routing_logging: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_book_logging: true,
            enable_routing_logging: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub routing: SORConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// Load configuration from file, or create default if file doesn't exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            let config = Self::default();
            config.to_file(&path)?;
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.initial_reference_price <= 0.0 {
            return Err(ConfigError::Validation(
                "initial_reference_price must be positive".to_string(),
            ));
        }

        if self.simulation.volatility <= 0.0 {
            return Err(ConfigError::Validation(
                "volatility must be positive".to_string(),
            ));
        }

        if self.simulation.levels_per_side == 0 {
            return Err(ConfigError::Validation(
                "levels_per_side must be greater than 0".to_string(),
            ));
        }

        if self.simulation.tick_size <= 0.0 {
            return Err(ConfigError::Validation(
                "tick_size must be positive".to_string(),
            ));
        }

        if self.simulation.lot_size == 0 {
            return Err(ConfigError::Validation(
                "lot_size must be greater than 0".to_string(),
            ));
        }

        if self.simulation.min_base_spread <= 0.0
            || self.simulation.max_base_spread <= self.simulation.min_base_spread
        {
            return Err(ConfigError::Validation(
                "spread bounds must satisfy 0 < min_base_spread < max_base_spread".to_string(),
            ));
        }

        if self.routing.max_venues == 0 {
            return Err(ConfigError::Validation(
                "max_venues must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(String),

    #[error("Failed to write config file: {0}")]
    FileWrite(String),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Failed to serialize config: {0}")]
    Serialize(String),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sor_config() {
        let config = SORConfig::default();
        assert_eq!(config.strategy, RoutingStrategy::BestPrice);
        assert_eq!(config.max_venues, 10);
        assert_eq!(config.min_quantity_per_venue, 0);
        assert!(config.consider_fees);
        assert!(!config.consider_latency);
        assert!(config.allow_partial_fills);
        assert!(config.time_limit_ms.is_none());
    }

    #[test]
    fn test_default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_spread_bounds() {
        let mut config = Config::default();
        config.simulation.min_base_spread = 0.03;
        config.simulation.max_base_spread = 0.01;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_max_venues_rejected() {
        let mut config = Config::default();
        config.routing.max_venues = 0;
        assert!(config.validate().is_err());
    }
}
