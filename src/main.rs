//! folio3d - headless host for the portfolio scene interaction layer
//!
//! Loads a scene, composes its interactive entities and drives pointer input,
//! overlays and ambient particles frame by frame.

mod config;
mod headless;
mod scene_loader;
mod scripted_input;

use anyhow::Result;
use clap::Parser;
use config::SceneConfig;
use headless::{HeadlessConfig, DEFAULT_FRAME_MS};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Drive a folio3d scene headlessly")]
struct Args {
    /// Scene configuration (TOML)
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Scripted pointer input (JSON steps)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Scene description to try; repeat to build a fallback chain
    #[arg(long = "scene")]
    scenes: Vec<PathBuf>,

    /// Skip scene descriptions and use the generated fallback scene
    #[arg(long)]
    fallback_scene: bool,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Simulated frame time in milliseconds
    #[arg(long, default_value_t = DEFAULT_FRAME_MS)]
    frame_ms: f32,

    /// Write interaction events as JSONL
    #[arg(long)]
    trace: Option<PathBuf>,

    /// Write a session metrics report
    #[arg(long)]
    metrics: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    info!("Starting folio3d v{}", env!("CARGO_PKG_VERSION"));

    let scene = SceneConfig::load_from_path(&args.config);
    let session_name = args
        .script
        .as_deref()
        .and_then(|path| path.file_stem())
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "interactive".to_string());

    let cfg = HeadlessConfig {
        scene,
        scene_candidates: (!args.scenes.is_empty()).then_some(args.scenes),
        fallback_scene: args.fallback_scene,
        script: args.script,
        max_frames: args.frames,
        frame_ms: args.frame_ms,
        trace: args.trace,
        metrics: args.metrics,
        session_name,
    };

    match headless::run(cfg) {
        Ok(report) => {
            if let Some(interaction) = &report.interaction {
                info!(
                    frames = report.execution.frames,
                    actions = interaction.actions,
                    overlays = interaction.overlays_opened,
                    "run complete"
                );
            }
            Ok(())
        }
        Err(err) => {
            error!("Headless run failed: {err:#}");
            Err(err)
        }
    }
}
