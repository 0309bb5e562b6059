use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "qualmap")]
#[command(about = "Heuristic multi-language code quality analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a file or directory tree
    Analyze {
        /// Path to analyze
        path: PathBuf,

        /// Configuration file (defaults to the nearest .qualmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Additional exclude pattern (repeatable)
        #[arg(short = 'x', long = "exclude")]
        exclude: Vec<String>,

        /// Languages to analyze (comma-separated, e.g. csharp,go,python)
        #[arg(long, value_delimiter = ',')]
        languages: Option<Vec<String>>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of files to list in the terminal summary
        #[arg(long, default_value = "10")]
        top: usize,

        /// Worker threads (0 = available parallelism)
        #[arg(short = 'j', long = "jobs", env = "QUALMAP_JOBS")]
        jobs: Option<usize>,

        /// Analyze files one at a time
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Increase log verbosity (-v info, -vv debug, -vvv trace)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Write a default .qualmap.toml
    Init {
        /// Directory to write the file into
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
