// Allow unused code for designed-but-not-yet-used APIs
// Remove these as the codebase matures
#![allow(dead_code)]

mod bitmap;
mod blend;
mod color;
mod error;
mod model;
mod optimize;
mod raster;
mod rng;
mod scanline;
mod score;
mod shapes;
mod solver;
mod svg;
mod worker;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use image::imageops::FilterType;
use log::{debug, info};

use bitmap::Bitmap;
use model::{Model, StepConfig};
use rng::Rng;
use shapes::ShapeKind;

/// Approximate an image with geometric primitives and write the result as SVG
#[derive(Parser, Debug)]
#[command(name = "primify", version, about)]
struct Args {
    /// Input image (PNG or JPEG)
    input: PathBuf,

    /// Output SVG path
    #[arg(short, long, default_value = "output.svg")]
    output: PathBuf,

    /// Number of shapes to commit
    #[arg(short, long, default_value_t = 30)]
    steps: u32,

    /// Opacity of every committed shape (0-255)
    #[arg(long, default_value_t = 128)]
    alpha: u8,

    /// Random shapes sampled per step
    #[arg(long, default_value_t = 50)]
    candidates: u32,

    /// Maximum consecutive failed mutations before a step settles
    #[arg(long, default_value_t = 100)]
    mutations: u32,

    /// Shape kinds to draw from: all, rectangle, rotated-rectangle, triangle,
    /// ellipse, rotated-ellipse, circle, line
    #[arg(long, default_value = "all", value_delimiter = ',')]
    shapes: Vec<String>,

    /// Downscale divisor applied to the input before optimization
    #[arg(long, default_value_t = 4)]
    scale: u32,

    /// RNG seed; defaults to the current time
    #[arg(long)]
    seed: Option<u64>,

    /// Serve the JSON worker protocol on stdin/stdout instead of running steps
    #[arg(long)]
    worker: bool,
}

fn parse_shape_kinds(names: &[String]) -> Result<Vec<ShapeKind>> {
    let mut kinds = Vec::new();
    for name in names {
        match name.as_str() {
            "all" => return Ok(ShapeKind::ALL.to_vec()),
            "rectangle" => kinds.push(ShapeKind::Rectangle),
            "rotated-rectangle" => kinds.push(ShapeKind::RotatedRectangle),
            "triangle" => kinds.push(ShapeKind::Triangle),
            "ellipse" => kinds.push(ShapeKind::Ellipse),
            "rotated-ellipse" => kinds.push(ShapeKind::RotatedEllipse),
            "circle" => kinds.push(ShapeKind::Circle),
            "line" => kinds.push(ShapeKind::Line),
            other => bail!("unknown shape kind '{other}'"),
        }
    }
    Ok(kinds)
}

/// Decode the target and downscale it by the given divisor
fn load_bitmap(path: &Path, scale: u32) -> Result<Bitmap> {
    let decoded =
        image::open(path).with_context(|| format!("failed to decode {}", path.display()))?;
    let decoded = if scale > 1 {
        decoded.resize(
            (decoded.width() / scale).max(1),
            (decoded.height() / scale).max(1),
            FilterType::Triangle,
        )
    } else {
        decoded
    };
    let rgba = decoded.to_rgba8();
    Ok(Bitmap::from_rgba_bytes(
        rgba.width(),
        rgba.height(),
        rgba.as_raw(),
    )?)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(1)
    });

    if args.worker {
        return worker::run_stdio(seed).context("worker loop failed");
    }

    let shape_types = parse_shape_kinds(&args.shapes)?;
    let target = load_bitmap(&args.input, args.scale)?;
    let (width, height) = (target.width(), target.height());
    info!(
        "target {}x{}, {} steps, seed {}",
        width, height, args.steps, seed
    );

    let background = target.average_color();
    let mut model = Model::new(target, background)?;
    let mut rng = Rng::new(seed);
    let config = StepConfig {
        alpha: args.alpha,
        candidate_shapes_per_step: args.candidates,
        shape_mutations_per_step: args.mutations,
        shape_types,
    };

    let mut results = Vec::with_capacity(args.steps as usize);
    for step in 0..args.steps {
        let result = model.step(&config, &mut rng)?;
        debug!("step {}: score {:.6}", step + 1, result.score);
        results.push(result);
    }
    info!("final score {:.6}", model.score());

    let document = svg::export_document(width, height, background, &results);
    fs::write(&args.output, document)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!("wrote {}", args.output.display());
    Ok(())
}
