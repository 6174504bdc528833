//! FOXFIELD - CLI entry point.
//!
//! Owns the run loop cadence and the console view; the engine itself
//! lives in the library.

use clap::{Parser, Subcommand};
use foxfield::{benchmark, Config, Simulator, Species};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "foxfield")]
#[command(version)]
#[command(about = "Discrete-time predator-prey ecosystem simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation
    Run {
        /// Configuration file (YAML)
        #[arg(short, long, default_value = "config.yaml")]
        config: PathBuf,

        /// Number of steps to simulate
        #[arg(short, long, default_value = "1000")]
        steps: u64,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Render the field to the console every N steps
        #[arg(short, long)]
        render: Option<u64>,

        /// Write the stats history to this JSON file on completion
        #[arg(long)]
        stats_out: Option<PathBuf>,

        /// Quiet mode (minimal output)
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run performance benchmark
    Benchmark {
        /// Number of steps
        #[arg(short, long, default_value = "1000")]
        steps: u64,

        /// Field height
        #[arg(long, default_value = "80")]
        height: usize,

        /// Field width
        #[arg(long, default_value = "120")]
        width: usize,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            steps,
            seed,
            render,
            stats_out,
            quiet,
        } => run_simulation(config, steps, seed, render, stats_out, quiet),

        Commands::Benchmark {
            steps,
            height,
            width,
        } => run_benchmark(steps, height, width),

        Commands::Init { output } => generate_config(output),
    }
}

fn run_simulation(
    config_path: PathBuf,
    steps: u64,
    seed: Option<u64>,
    render: Option<u64>,
    stats_out: Option<PathBuf>,
    quiet: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = if config_path.exists() {
        log::info!("Loading config from: {:?}", config_path);
        Config::from_file(&config_path)?
    } else {
        log::info!("Using default configuration");
        Config::default()
    };

    let mut sim = if let Some(s) = seed {
        log::info!("Using seed: {}", s);
        Simulator::new_with_seed(config, s)?
    } else {
        Simulator::new(config)?
    };

    println!("Starting simulation");
    println!(
        "  Field: {}x{}",
        sim.config.field.height, sim.config.field.width
    );
    println!(
        "  Initial population: {} ({} rabbits, {} foxes, {} wolves)",
        sim.population(),
        sim.count(Species::Rabbit),
        sim.count(Species::Fox),
        sim.count(Species::Wolf)
    );
    println!("  Steps: {}", steps);
    println!();

    let start = Instant::now();
    let stats_interval = sim.config.logging.stats_interval;

    for _ in 0..steps {
        sim.step()?;

        if !quiet && sim.time % stats_interval == 0 {
            println!("{}", sim.stats.summary());
        }

        if let Some(every) = render {
            if every > 0 && sim.time % every == 0 {
                println!("{}", sim.snapshot().render());
            }
        }

        if sim.is_extinct() {
            log::warn!("Population extinct at step {}", sim.time);
            break;
        }
    }

    let elapsed = start.elapsed();
    let steps_per_sec = sim.time as f64 / elapsed.as_secs_f64();

    println!();
    println!("=== Simulation Complete ===");
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    println!("Steps: {}", sim.time);
    println!("Speed: {:.1} steps/s", steps_per_sec);
    println!(
        "Final population: {} ({} rabbits, {} foxes, {} wolves)",
        sim.population(),
        sim.count(Species::Rabbit),
        sim.count(Species::Fox),
        sim.count(Species::Wolf)
    );
    println!("Seed: {}", sim.seed());

    if let Some(path) = stats_out {
        sim.stats_history
            .save(path.to_str().ok_or("stats path is not valid UTF-8")?)?;
        println!("Stats history: {:?}", path);
    }

    Ok(())
}

fn run_benchmark(steps: u64, height: usize, width: usize) -> Result<(), Box<dyn std::error::Error>> {
    println!("=== FOXFIELD Benchmark ===");
    println!("Steps: {}", steps);
    println!("Field: {}x{}", height, width);
    println!();

    let result = benchmark(steps, height, width)?;
    println!("{}", result);

    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration saved to: {:?}", output);
    Ok(())
}
