//! Host configuration, read from a JSON5 file.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("../../package-content/reactant_config.json5");

#[cfg(not(feature = "stand-alone"))]
/// Where the host looks for its configuration.
pub const CONFIG_PATH: &str = "config/reactant_config.json5";
#[cfg(feature = "stand-alone")]
/// Where the host looks for its configuration.
pub const CONFIG_PATH: &str = "reactant_config.json5";

/// Why the configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the file failed.
    #[error("failed to access config file: {0}")]
    Io(#[from] io::Error),
    /// The file is not valid JSON5 or does not match the schema.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json5::Error),
    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Tuning for the simulated reactor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReactorConfig {
    /// Length of a tick in milliseconds.
    pub tick_millis: u64,
    /// Stop after this many ticks. `None` runs until interrupted.
    pub max_ticks: Option<u64>,
    /// Shared capacity of the fuel and waste chambers, in mB.
    pub fuel_capacity: u64,
    /// Capacity of each coolant chamber, in mB.
    pub coolant_capacity: u64,
    /// Fuel offered every tick.
    pub fuel_per_tick: u64,
    /// Fuel burned into waste every tick.
    pub burn_per_tick: u64,
    /// Waste taken out every tick.
    pub waste_drain_per_tick: u64,
    /// Water offered every tick.
    pub coolant_per_tick: u64,
    /// Water boiled into steam every tick.
    pub vaporize_per_tick: u64,
}

impl ReactorConfig {
    /// Reads the config at `path`, writing out the default one first if the
    /// file does not exist yet.
    pub fn load_or_create(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, DEFAULT_CONFIG)?;
            log::info!("Wrote default config to {}", path.display());
        }

        let config_str = fs::read_to_string(path)?;
        Self::parse(&config_str)
    }

    /// Parses and validates a JSON5 document.
    pub fn parse(config_str: &str) -> Result<Self, ConfigError> {
        let config: ReactorConfig = serde_json5::from_str(config_str)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Checks that every value is in range.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !(1..=1000).contains(&self.tick_millis) {
            return Err("Tick length must be in range 1..1000 ms");
        }
        if self.max_ticks == Some(0) {
            return Err("Max ticks must be positive when set");
        }
        if self.fuel_capacity == 0 || self.coolant_capacity == 0 {
            return Err("Capacities must be positive");
        }
        if self.fuel_per_tick > self.fuel_capacity
            || self.burn_per_tick > self.fuel_capacity
            || self.waste_drain_per_tick > self.fuel_capacity
        {
            return Err("Fuel rates must not exceed the fuel capacity");
        }
        if self.coolant_per_tick > self.coolant_capacity
            || self.vaporize_per_tick > self.coolant_capacity
        {
            return Err("Coolant rates must not exceed the coolant capacity");
        }
        Ok(())
    }
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            tick_millis: 50,
            max_ticks: Some(1200),
            fuel_capacity: 4000,
            coolant_capacity: 10000,
            fuel_per_tick: 20,
            burn_per_tick: 15,
            waste_drain_per_tick: 10,
            coolant_per_tick: 120,
            vaporize_per_tick: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_matches_default_struct() {
        assert_eq!(
            ReactorConfig::parse(DEFAULT_CONFIG).unwrap(),
            ReactorConfig::default()
        );
    }

    #[test]
    fn missing_max_ticks_runs_forever() {
        let config = ReactorConfig::parse(
            "{ tick_millis: 50, fuel_capacity: 10, coolant_capacity: 10, fuel_per_tick: 1, \
             burn_per_tick: 1, waste_drain_per_tick: 1, coolant_per_tick: 1, vaporize_per_tick: 1 }",
        )
        .unwrap();
        assert_eq!(config.max_ticks, None);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut config = ReactorConfig::default();
        config.tick_millis = 0;
        assert!(config.validate().is_err());

        let mut config = ReactorConfig::default();
        config.fuel_per_tick = config.fuel_capacity + 1;
        assert!(config.validate().is_err());

        let mut config = ReactorConfig::default();
        config.coolant_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = ReactorConfig::default();
        config.max_ticks = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_documents_fail_to_parse() {
        assert!(matches!(
            ReactorConfig::parse("{ tick_millis: "),
            Err(ConfigError::Parse(_))
        ));
    }
}
