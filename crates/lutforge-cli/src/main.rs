//! lutforge - 3D LUT synthesis CLI
//!
//! Generates `.cube` color LUTs from grading parameter records or by
//! statistically matching a source image against a reference look.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

/// Grid resolution of every LUT this tool produces.
pub const CUBE_SIZE: usize = 33;

#[derive(Parser)]
#[command(name = "lutforge")]
#[command(author, version, about = "3D LUT synthesis from grading parameters or reference images")]
#[command(long_about = "
Generates 33x33x33 .cube LUTs for color grading tools.

Examples:
  lutforge grade -p grade.json -o grade.cube       # Parameter record to LUT
  lutforge match -s shot.png --look orange_teal -o look.cube
  lutforge match -s shot.png -r ref.jpg -o match.cube --method linear
  lutforge check grade.cube                        # Identity/no-op report
  lutforge looks                                   # List the look catalog
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a LUT from a JSON grading parameter record
    #[command(visible_alias = "g")]
    Grade(commands::grade::GradeArgs),

    /// Match a source image against a named look or reference image
    #[command(visible_alias = "m")]
    Match(commands::matching::MatchArgs),

    /// Analyze a .cube file against the identity LUT
    Check(commands::check::CheckArgs),

    /// List the named look catalog
    Looks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Grade(args) => commands::grade::run(args),
        Commands::Match(args) => commands::matching::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Looks => commands::looks::run(),
    }
}
