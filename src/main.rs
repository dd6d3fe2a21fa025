//! Comfort vignette driver: plays a scripted locomotion scenario through the engine.

use anyhow::{Context, Result};
use clap::Parser;
use comfort_vignette::config::{Config, EXAMPLE_CONFIG};
use comfort_vignette::constants::DEFAULT_SNAPSHOT_CAPACITY;
use comfort_vignette::host::VignetteHost;
use comfort_vignette::publish::snapshot_channel;
use comfort_vignette::simulation::{FixedClock, Scenario, ScriptedPoseSource};
use comfort_vignette::MotionVignetteEngine;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML format)
    #[arg(short = 'C', long)]
    config: Option<String>,

    /// Preset from the configuration file to apply
    #[arg(short, long)]
    preset: Option<String>,

    /// Number of frames to simulate
    #[arg(short, long)]
    frames: Option<usize>,

    /// Simulated frame rate
    #[arg(long)]
    fps: Option<f64>,

    /// Motion script to play back
    #[arg(short, long, value_enum)]
    scenario: Option<Scenario>,

    /// Pin the vignette to maximum constriction
    #[arg(long)]
    force_effect: bool,

    /// Shift the vignette toward the direction of travel
    #[arg(long)]
    direction_specific: bool,

    /// Positional jitter amplitude in metres
    #[arg(long)]
    jitter: Option<f64>,

    /// Seed for the jitter generator
    #[arg(long)]
    seed: Option<u64>,

    /// Drop tracking every N frames (0 disables)
    #[arg(long)]
    dropout_every: Option<usize>,

    /// Write an example configuration file and exit
    #[arg(long, value_name = "PATH")]
    write_example_config: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    debug: bool,
}

#[derive(Debug, Default)]
struct RadiusSummary {
    frames: usize,
    min: f64,
    max: f64,
    sum: f64,
}

impl RadiusSummary {
    fn record(&mut self, radius: f64) {
        if self.frames == 0 {
            self.min = radius;
            self.max = radius;
        } else {
            self.min = self.min.min(radius);
            self.max = self.max.max(radius);
        }
        self.sum += radius;
        self.frames += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.frames > 0).then(|| self.sum / self.frames as f64)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    if let Some(path) = &args.write_example_config {
        std::fs::write(path, EXAMPLE_CONFIG).with_context(|| format!("Failed to write {path}"))?;
        info!("Wrote example configuration to {path}");
        return Ok(());
    }

    info!("Comfort Vignette");

    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {config_path}");
        match Config::from_file(config_path).and_then(|cfg| cfg.validate().map(|()| cfg)) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {e}. Using defaults.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    if let Some(frames) = args.frames {
        config.simulation.frames = frames;
    }
    if let Some(fps) = args.fps {
        config.simulation.target_fps = fps;
    }
    if let Some(scenario) = args.scenario {
        config.simulation.scenario = scenario;
    }
    if let Some(jitter) = args.jitter {
        config.simulation.jitter = jitter;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(every) = args.dropout_every {
        config.simulation.tracking_dropout_every = every;
    }
    config.validate().context("Invalid simulation settings")?;

    let mut engine = MotionVignetteEngine::new(config.effect.clone());
    if args.force_effect {
        engine.set_force_effect(true);
    }
    if args.direction_specific {
        engine.set_direction_specific(true);
    }

    let simulation = &config.simulation;
    info!(
        "Simulating {} frames of '{}' at {} fps",
        simulation.frames, simulation.scenario, simulation.target_fps
    );

    let (publisher, mut receiver) = snapshot_channel(DEFAULT_SNAPSHOT_CAPACITY);
    let mut host = VignetteHost::new(
        engine,
        ScriptedPoseSource::from_config(simulation),
        FixedClock::from_fps(simulation.target_fps),
    );
    host.attach_sink(Box::new(publisher));

    if let Some(name) = &args.preset {
        let preset = config.preset(name)?;
        host.apply_preset(&preset);
    }

    let mut summary = RadiusSummary::default();
    for _ in 0..simulation.frames {
        if let Some(snapshot) = host.step() {
            summary.record(snapshot.output.radius);
        }
    }

    let stats = host.stats();
    info!(
        "Published {} of {} frames ({} untracked)",
        stats.published, stats.ticks, stats.skipped_untracked
    );
    if let Some(mean) = summary.mean() {
        info!(
            "Radius min {:.3} mean {:.3} max {:.3}",
            summary.min, mean, summary.max
        );
    }
    if let Some(last) = receiver.latest() {
        info!(
            "Last frame {}: radius {:.3}, shift ({:.3}, {:.3})",
            last.frame, last.output.radius, last.output.horizontal_shift, last.output.vertical_shift
        );
    }
    if let Some(appearance) = receiver.latest_appearance() {
        info!(
            "Appearance: background {:?}, mask {:?}, feather {:.2}",
            appearance.background_mode, appearance.mask_mode, appearance.feather
        );
    }

    Ok(())
}
