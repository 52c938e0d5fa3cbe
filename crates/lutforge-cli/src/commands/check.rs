//! `lutforge check` - identity/no-op analysis of a .cube file.

use anyhow::{Context, Result};
use clap::Args;
use std::fs;
use std::path::PathBuf;

/// Arguments for the check subcommand.
#[derive(Args)]
pub struct CheckArgs {
    /// .cube file to analyze
    pub lut: PathBuf,
}

/// Compares every voxel of an encoded LUT against the identity value
/// recomputed from its line index and prints the deviation report.
pub fn run(args: CheckArgs) -> Result<()> {
    let text = fs::read_to_string(&args.lut)
        .with_context(|| format!("failed to read {}", args.lut.display()))?;
    let report = lutforge_cube::analyze(&text)?;

    println!("size:               {}", report.size);
    println!("transformed voxels: {}", report.transformed_voxels);
    println!("max deviation:      {:.6}", report.max_deviation);
    println!(
        "verdict:            {}",
        if report.is_identity() { "identity (no-op)" } else { "transformed" }
    );
    Ok(())
}
