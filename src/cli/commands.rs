use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "planpilot")]
#[command(author, version, about = "Deterministic PRD to execution plan compiler", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a PRD document and emit the execution plan as JSON
    Analyze {
        /// Path to the PRD text file
        prd_file: PathBuf,

        /// Project configuration file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Component registry override (TOML)
        #[arg(long)]
        registry: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Analyze requirements one at a time instead of the worker pool
        #[arg(long)]
        sequential: bool,
    },

    /// List domain categories and their registered components
    Categories {
        /// Component registry override (TOML)
        #[arg(long)]
        registry: Option<PathBuf>,
    },
}
