//! Command-line runner for the ecosystem simulation

use std::path::PathBuf;

use clap::Parser;
use ecosim::prelude::*;

/// Run the prey/predator/firefly ecosystem headless
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Simulation config (.ron or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(short, long, default_value_t = 60.0)]
    seconds: f32,

    /// Seconds per simulation step
    #[arg(long, default_value_t = 1.0 / 60.0)]
    timestep: f32,

    /// RNG seed, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Simulated seconds between population reports (0 disables them)
    #[arg(long, default_value_t = 5.0)]
    report_interval: f32,

    /// Hold the firefly lure at X Y for the whole run
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_negative_numbers = true)]
    lure: Option<Vec<f32>>,

    /// Write the final sprite snapshot as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Write the resolved config to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut sim = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };
    if args.seed.is_some() {
        sim.seed = args.seed;
    }
    sim.validate()?;

    if let Some(path) = &args.write_config {
        sim.save(path)?;
        log::info!("Wrote config to {}", path.display());
        return Ok(());
    }

    let mut config = EngineConfig::default()
        .with_title(sim.name.clone())
        .with_timestep(args.timestep)
        .with_duration(args.seconds)
        .with_report_interval(args.report_interval);
    if let Some(seed) = sim.seed {
        config = config.with_seed(seed);
    }

    let mut engine = Engine::new(config, Ecosystem::new(sim));
    if let Some(&[x, y]) = args.lure.as_deref() {
        engine.context_mut().input.press_lure(Vec2::new(x, y));
    }
    engine.run()?;

    if let Some(path) = &args.snapshot {
        let frame = engine.game().snapshot(engine.context());
        std::fs::write(path, serde_json::to_string_pretty(&frame)?)?;
        log::info!("Wrote {} sprites to {}", frame.len(), path.display());
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Engine error: {e}");
        std::process::exit(1);
    }
}
