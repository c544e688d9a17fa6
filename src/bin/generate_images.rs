//! Pre-renders every pill sheet: `pills_{remaining}_{taken}.png` for
//! remaining in 0..=MEDICINE_MAX. Pass `--svg` to write SVG files instead.
//!
//! Usage: generate-images [--svg] [OUT_DIR]

use anyhow::{Context, Result};
use medicine_bot::config::medicine_max_from_env;
use medicine_bot::medicine::{render_png, render_svg, PillGrid};
use std::env;
use std::path::PathBuf;
use tracing::info;

const DEFAULT_OUTPUT_DIR: &str = "./generated-images";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "generate_images=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let max = medicine_max_from_env()?;

    let args: Vec<String> = env::args().skip(1).collect();
    let svg = args.iter().any(|arg| arg == "--svg");
    let output_dir = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let extension = if svg { "svg" } else { "png" };

    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    let mut count = 0;
    for remaining in 0..=max {
        for taken in [true, false] {
            let grid = PillGrid::new(remaining, taken, max);
            let bytes = if svg {
                render_svg(&grid).into_bytes()
            } else {
                render_png(&grid)?
            };

            let path = output_dir.join(format!("pills_{remaining}_{taken}.{extension}"));
            std::fs::write(&path, bytes)
                .with_context(|| format!("Failed to write {}", path.display()))?;

            count += 1;
            info!("Generated: {}", path.display());
        }
    }

    info!("Total: {} images generated in {}", count, output_dir.display());
    Ok(())
}
