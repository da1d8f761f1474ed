pub mod convert;

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::output::Verbosity;

/// tilemap - Convert a composite level image into a tilemap index grid
#[derive(Parser, Debug)]
#[command(name = "tilemap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source image to slice (PNG or any format the image crate decodes)
    #[arg(required = true)]
    pub image: PathBuf,

    /// Cell side length in pixels [default: 16]
    #[arg(long)]
    pub cell: Option<u32>,

    /// Output directory [default: results]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Config file (default: ./tilemap.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Classify cells in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Only print errors
    #[arg(long, short, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print every sliced cell
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Apply command-line overrides on top of a loaded config.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(cell) = self.cell {
            config.cell_size = cell;
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        config.parallel |= self.parallel;
        config.pretty |= self.pretty;
        config
    }
}
