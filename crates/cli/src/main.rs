#![deny(unsafe_code)]
//! CLI binary for the abyss-trail engine.
//!
//! Subcommands:
//! - `render` — drive the scheduler at a 60 Hz display clock for N frames,
//!   write a PNG of the final frame
//! - `list` — print available themes

mod error;

use abyss_trail_core::Theme;
use abyss_trail_render::{snapshot, Renderer};
use abyss_trail_sim::{FrameScheduler, TrailSim, STEP_MS};
use clap::{Parser, Subcommand};
use error::CliError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "abyss-trail", about = "Glowing-trail animation engine CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate N displayed frames and write a PNG of the final frame.
    Render {
        /// Canvas width in logical pixels.
        #[arg(short = 'W', long, default_value_t = 640)]
        width: usize,

        /// Canvas height in logical pixels.
        #[arg(short = 'H', long, default_value_t = 360)]
        height: usize,

        /// Number of displayed frames to run at 60 Hz.
        #[arg(short, long, default_value_t = 600)]
        frames: usize,

        /// Noise seed for deterministic output.
        #[arg(long, default_value_t = 0xA5_F00D)]
        seed: u32,

        /// Theme name (abyss, noctiluca, sunset, emerald).
        #[arg(short, long, default_value = "abyss")]
        theme: String,

        /// Device pixel ratio (clamped to [1, 2]).
        #[arg(long, default_value_t = 1.0)]
        dpr: f64,

        /// Hold the target at a fixed normalized x (needs --target-y).
        #[arg(long)]
        target_x: Option<f64>,

        /// Hold the target at a fixed normalized y (needs --target-x).
        #[arg(long)]
        target_y: Option<f64>,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,

        /// Configuration overrides as a JSON string
        /// (glow, speed, trail_len, thickness, water_quality, zoom).
        #[arg(long, default_value = "{}")]
        params: String,
    },
    /// List available themes.
    List,
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let themes = Theme::list_names();
            if cli.json {
                let info = serde_json::json!({ "themes": themes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Themes:");
                println!("  {}", themes.join(", "));
            }
        }
        Command::Render {
            width,
            height,
            frames,
            seed,
            theme,
            dpr,
            target_x,
            target_y,
            output,
            params,
        } => {
            let params: serde_json::Value = serde_json::from_str(&params)
                .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

            let theme = Theme::from_name(&theme)?;

            let mut sim = TrailSim::new(width as f64, height as f64, seed);
            sim.set_theme(theme);
            sim.config_mut().apply_json(&params);
            match (target_x, target_y) {
                (Some(x), Some(y)) => sim.set_target(x, y),
                (None, None) => {}
                _ => {
                    return Err(CliError::Input(
                        "--target-x and --target-y must be given together".into(),
                    ))
                }
            }

            let mut scheduler = FrameScheduler::new();
            let mut renderer = Renderer::new(width as f64, height as f64, dpr, seed);

            for frame in 0..frames {
                let now_ms = frame as f64 * STEP_MS;
                scheduler.tick(&mut sim, now_ms);
                renderer.render(&sim, now_ms);
            }

            snapshot::write_png(renderer.frame(), &output)?;

            let telemetry = scheduler.telemetry(&sim);
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "frames": frames,
                    "seed": seed,
                    "theme": telemetry.theme,
                    "fps": telemetry.fps,
                    "trail_len": telemetry.trail_len,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} ({width}x{height}, {frames} frames, seed {seed}) -> {}",
                    telemetry.theme,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
