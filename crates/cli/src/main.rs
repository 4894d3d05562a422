#![deny(unsafe_code)]
//! CLI binary for the hidden-shape frame synthesis engine.
//!
//! Subcommands:
//! - `render`: generate a sequence, write an animated GIF
//! - `still`: write the single-frame variant as PNG
//! - `challenge`: random shape and direction, GIF plus JSON metadata
//! - `variants`: every shape/direction combination as GIFs
//! - `list`: print shapes, directions and noise sources

mod error;

use clap::{ArgAction, Args, Parser, Subcommand};
use error::CliError;
use hidden_shape_core::{Direction, NoiseMode, SequenceConfig, ShapeKind};
use hidden_shape_engines::animation::{write_gif, DEFAULT_FRAME_DELAY_MS};
use hidden_shape_engines::challenge::{generate_challenge, render_variants, RenderOptions};
use hidden_shape_engines::snapshot::write_png;
use hidden_shape_engines::{render_sequence, render_still, NoiseKind};
use std::path::PathBuf;
use std::process;
use tracing::Level;

#[derive(Parser)]
#[command(name = "hidden-shape", about = "Hide a moving shape in temporally coherent noise")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

/// Frame and noise settings shared by every rendering subcommand.
#[derive(Args)]
struct SequenceArgs {
    /// Frame width in pixels.
    #[arg(short = 'W', long, default_value_t = 640)]
    width: usize,

    /// Frame height in pixels.
    #[arg(short = 'H', long, default_value_t = 480)]
    height: usize,

    /// Number of frames in the sequence.
    #[arg(short, long, default_value_t = 60)]
    frames: usize,

    /// Shape size: radius for a circle, side length for a square.
    #[arg(long, default_value_t = 80)]
    size: u32,

    /// Radius of the circular path (default: min(width, height) / 3, or / 4 for quilted noise).
    #[arg(long)]
    path_radius: Option<f64>,

    /// Background noise source (uniform, quilted).
    #[arg(short, long, default_value = "uniform")]
    noise: String,

    /// Noise source parameters as a JSON string (e.g. '{"patch_size": 58}').
    #[arg(long, default_value = "{}")]
    params: String,
}

impl SequenceArgs {
    fn config(
        &self,
        shape: ShapeKind,
        direction: Direction,
        seed: Option<u64>,
    ) -> Result<SequenceConfig, CliError> {
        Ok(SequenceConfig {
            width: self.width,
            height: self.height,
            shape,
            direction,
            path_radius: self.path_radius,
            frame_count: self.frames,
            shape_size: self.size,
            seed,
            noise: NoiseMode::from_name(&self.noise)?,
        })
    }

    fn params(&self) -> Result<serde_json::Value, CliError> {
        serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))
    }
}

#[derive(Subcommand)]
enum Command {
    /// Generate a sequence and write it as an animated GIF.
    Render {
        #[command(flatten)]
        sequence: SequenceArgs,

        /// Hidden shape (circle, square).
        #[arg(short, long, default_value = "circle")]
        shape: String,

        /// Motion direction (clockwise, counterclockwise).
        #[arg(short, long, default_value = "clockwise")]
        direction: String,

        /// PRNG seed for deterministic output (default: from the clock).
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds each frame is shown.
        #[arg(long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
        delay_ms: u32,

        /// Output file path.
        #[arg(short, long, default_value = "output.gif")]
        output: PathBuf,
    },
    /// Write the single-frame variant as a PNG.
    Still {
        #[command(flatten)]
        sequence: SequenceArgs,

        /// Hidden shape (circle, square).
        #[arg(short, long, default_value = "circle")]
        shape: String,

        /// PRNG seed for deterministic output (default: from the clock).
        #[arg(long)]
        seed: Option<u64>,

        /// Output file path.
        #[arg(short, long, default_value = "output.png")]
        output: PathBuf,
    },
    /// Generate a random challenge: GIF plus JSON metadata holding the answer.
    Challenge {
        #[command(flatten)]
        sequence: SequenceArgs,

        /// Challenge id (default: random in 1000..=9999).
        #[arg(long)]
        id: Option<u32>,

        /// Seed for the challenge choices (default: from the clock).
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds each frame is shown.
        #[arg(long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
        delay_ms: u32,

        /// Directory receiving challenge_<id>.gif and challenge_<id>.json.
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Write every shape/direction combination as GIFs.
    Variants {
        #[command(flatten)]
        sequence: SequenceArgs,

        /// PRNG seed shared by all variants (default: from the clock).
        #[arg(long)]
        seed: Option<u64>,

        /// Milliseconds each frame is shown.
        #[arg(long, default_value_t = DEFAULT_FRAME_DELAY_MS)]
        delay_ms: u32,

        /// Directory receiving test_<shape>_<direction>.gif files.
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// List available shapes, directions and noise sources.
    List,
}

fn clock_seed(seed: Option<u64>) -> u64 {
    SequenceConfig {
        seed,
        ..SequenceConfig::default()
    }
    .resolve_seed()
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let shapes = ShapeKind::list_names();
            let directions = Direction::list_names();
            let sources = NoiseKind::list_sources();
            if cli.json {
                let info = serde_json::json!({
                    "shapes": shapes,
                    "directions": directions,
                    "noise_sources": sources,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Shapes:        {}", shapes.join(", "));
                println!("Directions:    {}", directions.join(", "));
                println!("Noise sources: {}", sources.join(", "));
            }
        }
        Command::Render {
            sequence,
            shape,
            direction,
            seed,
            delay_ms,
            output,
        } => {
            let shape = ShapeKind::from_name(&shape)?;
            let direction = Direction::from_name(&direction)?;
            let params = sequence.params()?;
            let config = sequence.config(shape, direction, Some(clock_seed(seed)))?;

            let frames = render_sequence(&config, &params)?;
            write_gif(&frames, &output, delay_ms)?;

            if cli.json {
                let info = serde_json::json!({
                    "shape": shape.name(),
                    "direction": direction.name(),
                    "width": config.width,
                    "height": config.height,
                    "frames": frames.len(),
                    "size": config.shape_size,
                    "noise": config.noise.name(),
                    "seed": frames.seed(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {} {} ({}x{}, {} frames, seed {}) -> {}",
                    shape.name(),
                    direction.name(),
                    config.width,
                    config.height,
                    frames.len(),
                    frames.seed(),
                    output.display()
                );
            }
        }
        Command::Still {
            sequence,
            shape,
            seed,
            output,
        } => {
            let shape = ShapeKind::from_name(&shape)?;
            let params = sequence.params()?;
            let seed = clock_seed(seed);
            let config = sequence.config(shape, Direction::Clockwise, Some(seed))?;

            let grid = render_still(&config, &params)?;
            write_png(&grid, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": grid.width(),
                    "height": grid.height(),
                    "seed": seed,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered still ({}x{}, seed {seed}) -> {}",
                    grid.width(),
                    grid.height(),
                    output.display()
                );
            }
        }
        Command::Challenge {
            sequence,
            id,
            seed,
            delay_ms,
            output_dir,
        } => {
            let options = RenderOptions {
                params: sequence.params()?,
                base: sequence.config(ShapeKind::default(), Direction::default(), None)?,
                delay_ms,
            };
            let meta = generate_challenge(&output_dir, id, clock_seed(seed), &options)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&meta)?);
            } else {
                println!("Challenge {} -> {}", meta.id, output_dir.join(&meta.filename).display());
                println!("Answer: {} moving {}", meta.shape.name(), meta.direction.name());
            }
        }
        Command::Variants {
            sequence,
            seed,
            delay_ms,
            output_dir,
        } => {
            let options = RenderOptions {
                params: sequence.params()?,
                base: sequence.config(ShapeKind::default(), Direction::default(), None)?,
                delay_ms,
            };
            let seed = clock_seed(seed);
            let paths = render_variants(&output_dir, seed, &options)?;

            if cli.json {
                let info = serde_json::json!({
                    "seed": seed,
                    "outputs": paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                for path in &paths {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
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
