//! `lutforge grade` - parameter record to LUT.

use crate::CUBE_SIZE;
use anyhow::{Context, Result};
use clap::Args;
use lutforge_core::LutGrid;
use lutforge_grade::GradeParams;
use std::fs::{self, File};
use std::path::PathBuf;
use tracing::info;

/// Arguments for the grade subcommand.
#[derive(Args)]
pub struct GradeArgs {
    /// JSON grading parameter record (all fields optional)
    #[arg(short, long)]
    pub params: PathBuf,

    /// Output .cube path
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Runs the parameter-driven path: record -> pipeline -> .cube.
pub fn run(args: GradeArgs) -> Result<()> {
    let text = fs::read_to_string(&args.params)
        .with_context(|| format!("failed to read {}", args.params.display()))?;
    let params: GradeParams = serde_json::from_str(&text)
        .with_context(|| format!("invalid parameter record in {}", args.params.display()))?;

    let mut grid = LutGrid::identity(CUBE_SIZE);
    lutforge_grade::apply(&params, &mut grid)?;

    let mut file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    lutforge_cube::write_cube(&mut file, &grid)?;

    info!(output = %args.output.display(), size = CUBE_SIZE, "wrote LUT");
    Ok(())
}
