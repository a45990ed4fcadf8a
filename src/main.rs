// --- File: main.rs ---
use anyhow::{Context, Result};
use aquarium::constants::DEFAULT_TICK_SECONDS;
use aquarium::{Environment, SimRng, SimulationConfig};
use clap::Parser;
use glam::Vec2;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

/// Headless aquarium driver: owns the clock, feeds the tank and logs the census.
#[derive(Parser, Debug)]
#[command(name = "aquarium")]
#[command(about = "Tick-driven aquarium fish simulation")]
struct Args {
    /// TOML configuration file; shipped presets when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// Seconds of wall-clock time per tick (ignored with --realtime)
    #[arg(long, default_value_t = DEFAULT_TICK_SECONDS)]
    dt: f32,

    /// Multiplier applied to every tick's delta
    #[arg(long)]
    time_scale: Option<f32>,

    /// Override the configured water quality (0 foul, 1 clean)
    #[arg(long)]
    water_quality: Option<f32>,

    /// Drop a pellet near the surface every N ticks (0 disables feeding)
    #[arg(long, default_value_t = 30)]
    feed_every: u64,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Pace ticks to the wall clock and feed them the measured delta
    #[arg(long)]
    realtime: bool,

    /// Log the population census every N ticks (0 disables)
    #[arg(long, default_value_t = 600)]
    report_every: u64,

    /// Print the final snapshot as JSON on stdout
    #[arg(long)]
    snapshot: bool,
}

// --- Main Function ---
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SimulationConfig::new(),
    };

    let mut env = match args.seed {
        Some(seed) => Environment::with_seed(&config, seed),
        None => Environment::new(&config),
    }
    .context("building environment")?;
    if let Some(scale) = args.time_scale {
        env.set_time_scale(scale);
    }
    if let Some(quality) = args.water_quality {
        env.set_water_quality(quality);
    }

    // Feeding stands in for the user clicking on the water.
    let mut feeder = match args.seed {
        Some(seed) => SimRng::seed_from_u64(seed.wrapping_add(1)),
        None => SimRng::from_entropy(),
    };

    log::info!(
        "Running {} ticks in a {}x{} tank ({} creatures, time scale {:.2}x)",
        args.ticks,
        env.tank().width(),
        env.tank().height(),
        env.creatures().len(),
        env.time_scale()
    );

    let cadence = Duration::from_secs_f32(DEFAULT_TICK_SECONDS);
    let mut last_tick_time = Instant::now();
    let mut total_deaths = 0usize;
    let mut total_eaten = 0u64;

    for tick in 1..=args.ticks {
        if args.feed_every > 0 && tick % args.feed_every == 0 {
            let x = feeder.gen_range(0.0..env.tank().width());
            env.spawn_food(Vec2::new(x, 0.0));
        }

        let delta_time = if args.realtime {
            let since_last = last_tick_time.elapsed();
            if since_last < cadence {
                thread::sleep(cadence - since_last);
            }
            let now = Instant::now();
            let delta = now.duration_since(last_tick_time).as_secs_f32();
            last_tick_time = now;
            delta
        } else {
            args.dt
        };

        let report = env.advance(delta_time);
        total_deaths += report.deaths.len();
        total_eaten += report.food_eaten;

        if args.report_every > 0 && tick % args.report_every == 0 {
            log::info!(
                "Tick {} ({:.1} simulated s): census {:?}, {} food in water",
                env.tick(),
                env.elapsed(),
                env.census(),
                env.foods().len()
            );
        }
        if env.creatures().is_empty() {
            log::warn!("Every creature has died, stopping at tick {}", env.tick());
            break;
        }
    }

    log::info!(
        "Finished after {:.1} simulated s: {} creatures alive, {} died, {} food eaten",
        env.elapsed(),
        env.creatures().len(),
        total_deaths,
        total_eaten
    );

    if args.snapshot {
        let json = serde_json::to_string_pretty(&env.snapshot())
            .context("serializing snapshot")?;
        println!("{json}");
    }
    Ok(())
}
// --- End of File: main.rs ---
