use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use blockview_common::{CameraPose, WorldConfig};
use blockview_render::{DebugTextRenderer, ProjectionRenderer, Renderer};
use blockview_session::{GameSession, InputEvent, MOVEMENT_INTERVAL, Scheduler};
use blockview_terrain::generate_with_stats;
use blockview_tools::HudInspector;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blockview-cli", about = "Headless driver for the blockview engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Built-in profile: classic or expanded
    #[arg(short, long, global = true, default_value = "classic")]
    profile: String,

    /// YAML or JSON config file; overrides --profile
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Terrain and mob seed
    #[arg(short, long, global = true, default_value = "42")]
    seed: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the resolved configuration
    Info,
    /// Generate terrain and print statistics
    Generate {
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Render one frame from the spawn point
    Render {
        /// Camera yaw in radians
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        yaw: f32,
        /// Camera pitch in radians
        #[arg(long, default_value = "-0.5", allow_hyphen_values = true)]
        pitch: f32,
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
        /// Entities listed in text output
        #[arg(long, default_value = "20")]
        max_entries: usize,
    },
    /// Run the scheduler headless with movement keys held
    Simulate {
        /// Simulated time to run
        #[arg(short, long, default_value = "1000")]
        millis: u64,
        /// Keys held for the whole run, e.g. "wa"
        #[arg(short, long, default_value = "")]
        keys: String,
        /// Use the wall clock instead of a simulated one
        #[arg(long)]
        realtime: bool,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<WorldConfig> {
    match &cli.config {
        Some(path) => WorldConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => WorldConfig::profile(&cli.profile)
            .with_context(|| format!("unknown profile '{}'", cli.profile)),
    }
}

/// A session that is playing regardless of the profile's start mode.
fn playing_session(config: WorldConfig, seed: u64) -> GameSession {
    let mut session = GameSession::new(config, seed);
    session.start();
    session
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let seed = cli.seed;
    tracing::debug!(seed, profile = %cli.profile, from_file = cli.config.is_some(), "config resolved");

    match cli.command {
        Commands::Info => {
            println!("blockview-cli v{}", env!("CARGO_PKG_VERSION"));
            println!(
                "region: {0}x{0} columns, render distance {1}",
                config.region_half_width * 2,
                config.render_distance
            );
            println!(
                "biomes: desert > {}, forest < {}, mountains beyond |{}|",
                config.desert_threshold, config.forest_threshold, config.mountain_edge
            );
            println!(
                "mobs: {} (pursuit {} @ {}/tick, contact {} for {})",
                config.mob_count,
                config.pursuit_radius,
                config.pursuit_speed,
                config.contact_radius,
                config.contact_damage
            );
            println!(
                "viewport: {}x{}, auto start: {}",
                config.viewport.width, config.viewport.height, config.auto_start
            );
        }
        Commands::Generate { format } => {
            let (_, stats) = generate_with_stats(&config, seed);
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                Format::Text => {
                    println!("Terrain: seed={seed}");
                    print!("{stats}");
                }
            }
        }
        Commands::Render {
            yaw,
            pitch,
            format,
            max_entries,
        } => {
            let mut session = playing_session(config, seed);
            let position = session.config().spawn_position;
            session.place_camera(CameraPose::new(position, yaw, pitch));
            let view = session.render_view();
            match format {
                Format::Json => {
                    let frame = ProjectionRenderer::new().render(session.world(), session.mobs(), &view);
                    println!("{}", serde_json::to_string_pretty(&frame)?);
                }
                Format::Text => {
                    let renderer = DebugTextRenderer::with_max_entries(max_entries);
                    print!("{}", renderer.render(session.world(), session.mobs(), &view));
                }
            }
        }
        Commands::Simulate {
            millis,
            keys,
            realtime,
        } => {
            let mut session = playing_session(config, seed);
            for key in keys.chars() {
                session.handle_event(InputEvent::key_down(key.to_string()));
            }
            let renderer = ProjectionRenderer::new();
            let mut scheduler = Scheduler::new();
            let duration = Duration::from_millis(millis);
            let mut drawn = 0usize;

            if realtime {
                let timer = scheduler.run_realtime(&mut session, &renderer, duration, |frame| {
                    drawn = frame.stats.drawn();
                });
                println!("Frame timing: {timer}");
            } else {
                let mut now = Duration::ZERO;
                while now < duration {
                    now = (now + MOVEMENT_INTERVAL).min(duration);
                    if let Some(frame) = scheduler.advance(&mut session, &renderer, now) {
                        drawn = frame.stats.drawn();
                    }
                }
            }
            session.end();

            let counts = scheduler.counts();
            println!(
                "Ran {millis} ms: movement ticks={} ai ticks={} frames={} dropped={}",
                counts.movement,
                counts.ai,
                counts.frames,
                counts.dropped_movement + counts.dropped_ai
            );
            println!("Last frame drew {drawn} entities");
            println!("{}", HudInspector::summary(&session));
            println!("{}", HudInspector::snapshot(&session));
        }
    }

    Ok(())
}
