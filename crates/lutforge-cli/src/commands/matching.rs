//! `lutforge match` - image pair (or image + look) to LUT.

use crate::CUBE_SIZE;
use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use lutforge_analysis::{derive_from_look, derive_grid, find_look, AnalysisError, TransferMethod};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

/// Transfer method selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MethodArg {
    /// Per-channel whitening transfer
    Linear,
    /// Global mean/variance transfer
    Global,
}

impl From<MethodArg> for TransferMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Linear => TransferMethod::Linear,
            MethodArg::Global => TransferMethod::GlobalStats,
        }
    }
}

/// Arguments for the match subcommand.
#[derive(Args)]
pub struct MatchArgs {
    /// Source image to grade
    #[arg(short, long)]
    pub source: PathBuf,

    /// Named look from the catalog (see `lutforge looks`)
    #[arg(long, conflicts_with = "reference")]
    pub look: Option<String>,

    /// Reference image to match against
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// Transfer method (defaults to the look's preference, or linear)
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,

    /// Seed for the synthetic reference perturbation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output .cube path
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Runs the image-driven path: stats -> transfer -> grid -> .cube.
pub fn run(args: MatchArgs) -> Result<()> {
    let source = super::load_image(&args.source)?;

    let grid = match (&args.look, &args.reference) {
        (Some(name), None) => {
            let look = find_look(name)
                .ok_or_else(|| AnalysisError::UnknownLook(name.clone()))?;
            let mut rng = match args.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            info!(look = look.name, method = ?look.method, "matching against catalog look");
            derive_from_look(&source, look, CUBE_SIZE, &mut rng)?
        }
        (None, Some(path)) => {
            let reference = super::load_image(path)?;
            let method = args.method.map_or(TransferMethod::Linear, Into::into);
            info!(reference = %path.display(), ?method, "matching against reference image");
            derive_grid(&source, &reference, method, CUBE_SIZE)?
        }
        _ => bail!("specify exactly one of --look or --reference"),
    };

    let mut file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    lutforge_cube::write_cube(&mut file, &grid)?;

    info!(output = %args.output.display(), "wrote LUT");
    Ok(())
}
