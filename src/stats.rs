//! Statistics tracking for the simulation.

use crate::animal::{Animal, Species};
use serde::{Deserialize, Serialize};

/// Statistics snapshot for a simulation step
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Current simulation time
    pub time: u64,
    /// Total live population
    pub population: usize,
    /// Live rabbits
    pub rabbits: usize,
    /// Live foxes
    pub foxes: usize,
    /// Live wolves
    pub wolves: usize,
    /// Births this step
    pub births: usize,
    /// Deaths this step
    pub deaths: usize,
    /// Mean age across live animals
    pub age_mean: f64,
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats from the current animal table.
    pub fn update(&mut self, animals: &[Animal]) {
        let alive: Vec<&Animal> = animals.iter().filter(|a| a.is_alive()).collect();

        self.population = alive.len();
        self.rabbits = alive.iter().filter(|a| a.species == Species::Rabbit).count();
        self.foxes = alive.iter().filter(|a| a.species == Species::Fox).count();
        self.wolves = alive.iter().filter(|a| a.species == Species::Wolf).count();
        self.age_mean = if alive.is_empty() {
            0.0
        } else {
            alive.iter().map(|a| a.age as f64).sum::<f64>() / alive.len() as f64
        };
    }

    /// Live count for one species.
    pub fn count(&self, species: Species) -> usize {
        match species {
            Species::Rabbit => self.rabbits,
            Species::Fox => self.foxes,
            Species::Wolf => self.wolves,
        }
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "T:{:6} | Pop:{:5} | R:{:5} F:{:4} W:{:4} | Births:{:4} Deaths:{:4} | Age:{:.1}",
            self.time,
            self.population,
            self.rabbits,
            self.foxes,
            self.wolves,
            self.births,
            self.deaths,
            self.age_mean,
        )
    }

    /// Save stats to JSON file
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load stats from JSON file
    pub fn load_json(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval,
        }
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Get total population over time
    pub fn population_series(&self) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.population))
            .collect()
    }

    /// Get one species' population over time
    pub fn species_series(&self, species: Species) -> Vec<(u64, usize)> {
        self.snapshots
            .iter()
            .map(|s| (s.time, s.count(species)))
            .collect()
    }

    /// Save history to file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)
    }

    /// Load history from file
    pub fn load(path: &str) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}
