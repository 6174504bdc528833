//! # FOXFIELD
//!
//! Discrete-time predator-prey ecosystem simulator on a bounded grid.
//!
//! ## Features
//!
//! - **Three species**: rabbits, foxes (eat rabbits), wolves (eat rabbits
//!   and foxes)
//! - **Deterministic**: seeded random number generation; a fixed seed
//!   replays a run bit for bit
//! - **Configurable**: YAML configuration files for field size, species
//!   parameters, and initial population
//!
//! ## Quick Start
//!
//! ```rust
//! use foxfield::{Config, Simulator};
//!
//! let config = Config::default();
//! let mut sim = Simulator::new_with_seed(config, 42).unwrap();
//!
//! sim.run(100).unwrap();
//!
//! println!("Population: {}", sim.population());
//! println!("{}", sim.stats.summary());
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use foxfield::Config;
//!
//! let mut config = Config::default();
//! config.field.height = 40;
//! config.rabbit.breeding_probability = 0.15;
//! ```

pub mod animal;
pub mod config;
pub mod error;
pub mod field;
pub mod location;
pub mod simulator;
pub mod snapshot;
pub mod stats;

// Re-export main types
pub use animal::{Animal, AnimalId, Species};
pub use config::Config;
pub use error::SimError;
pub use field::Field;
pub use location::Location;
pub use simulator::Simulator;
pub use snapshot::FieldSnapshot;
pub use stats::{Stats, StatsHistory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a quick benchmark
pub fn benchmark(steps: u64, height: usize, width: usize) -> Result<BenchmarkResult, SimError> {
    use std::time::Instant;

    let mut config = Config::default();
    config.field.height = height;
    config.field.width = width;

    let mut sim = Simulator::new_with_seed(config, 42)?;
    let initial_population = sim.population();

    let start = Instant::now();
    sim.run(steps)?;
    let elapsed = start.elapsed();

    Ok(BenchmarkResult {
        steps,
        height,
        width,
        initial_population,
        final_population: sim.population(),
        elapsed_secs: elapsed.as_secs_f64(),
        steps_per_second: steps as f64 / elapsed.as_secs_f64(),
    })
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub steps: u64,
    pub height: usize,
    pub width: usize,
    pub initial_population: usize,
    pub final_population: usize,
    pub elapsed_secs: f64,
    pub steps_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Field: {}x{}", self.height, self.width)?;
        writeln!(f, "Steps: {}", self.steps)?;
        writeln!(
            f,
            "Population: {} -> {}",
            self.initial_population, self.final_population
        )?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} steps/s", self.steps_per_second)?;
        Ok(())
    }
}
