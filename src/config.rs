//! Configuration for a simulation run.
//!
//! Supports YAML configuration files with sensible defaults. The default
//! species parameters are the canonical ones the population dynamics were
//! tuned around; changing them is supported but can easily produce runs
//! that collapse to extinction.

use crate::animal::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub field: FieldConfig,
    pub rabbit: SpeciesConfig,
    pub fox: SpeciesConfig,
    pub wolf: SpeciesConfig,
    pub population: PopulationConfig,
    pub logging: LoggingConfig,
}

/// Field extent. Fixed for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    pub height: usize,
    pub width: usize,
}

/// Per-species lifecycle parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// Minimum age at which breeding attempts start
    pub breeding_age: u32,
    /// Age past which the animal dies of old age
    pub max_age: u32,
    /// Per-step probability of breeding once of age
    pub breeding_probability: f64,
    /// Upper bound of the litter-size draw
    pub max_litter_size: u32,
    /// Predators only: food level restored by a kill, and the newborn
    /// food level. Ignored for prey species.
    #[serde(default)]
    pub food_value: u32,
}

/// Initial population seeding: per-cell creation probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    pub rabbit_probability: f64,
    pub fox_probability: f64,
    pub wolf_probability: f64,
}

/// Logging and stats configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Steps between stats history snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            rabbit: SpeciesConfig {
                breeding_age: 5,
                max_age: 40,
                breeding_probability: 0.12,
                max_litter_size: 4,
                food_value: 0,
            },
            fox: SpeciesConfig {
                breeding_age: 15,
                max_age: 150,
                breeding_probability: 0.08,
                max_litter_size: 2,
                food_value: 9,
            },
            wolf: SpeciesConfig {
                breeding_age: 20,
                max_age: 200,
                breeding_probability: 0.015,
                max_litter_size: 2,
                food_value: 11,
            },
            population: PopulationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            height: 80,
            width: 120,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            rabbit_probability: 0.08,
            fox_probability: 0.02,
            wolf_probability: 0.01,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parameters for a species.
    pub fn species(&self, species: Species) -> &SpeciesConfig {
        match species {
            Species::Rabbit => &self.rabbit,
            Species::Fox => &self.fox,
            Species::Wolf => &self.wolf,
        }
    }

    /// Per-cell creation probability used when seeding the initial
    /// population.
    pub fn creation_probability(&self, species: Species) -> f64 {
        match species {
            Species::Rabbit => self.population.rabbit_probability,
            Species::Fox => self.population.fox_probability,
            Species::Wolf => self.population.wolf_probability,
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.field.height == 0 || self.field.width == 0 {
            return Err("field dimensions must be at least 1x1".to_string());
        }
        if self.field.height > 4096 || self.field.width > 4096 {
            return Err("field dimensions must not exceed 4096".to_string());
        }
        for species in Species::ALL {
            let params = self.species(species);
            if params.max_age == 0 {
                return Err(format!("{}: max_age must be > 0", species.name()));
            }
            if params.breeding_age > params.max_age {
                return Err(format!("{}: breeding_age cannot exceed max_age", species.name()));
            }
            if !(0.0..=1.0).contains(&params.breeding_probability) {
                return Err(format!(
                    "{}: breeding_probability must be in [0, 1]",
                    species.name()
                ));
            }
            if params.max_litter_size == 0 {
                return Err(format!("{}: max_litter_size must be > 0", species.name()));
            }
            if species.is_predator() && params.food_value == 0 {
                return Err(format!("{}: food_value must be > 0", species.name()));
            }
            let creation = self.creation_probability(species);
            if !(0.0..=1.0).contains(&creation) {
                return Err(format!(
                    "{}: creation probability must be in [0, 1]",
                    species.name()
                ));
            }
        }
        if self.logging.stats_interval == 0 {
            return Err("stats_interval must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.field.height, loaded.field.height);
        assert_eq!(config.wolf.food_value, loaded.wolf.food_value);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let mut config = Config::default();
        config.field.width = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.rabbit.breeding_probability = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.fox.food_value = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.wolf.breeding_age = config.wolf.max_age + 1;
        assert!(config.validate().is_err());
    }
}
