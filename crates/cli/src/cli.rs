use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
#[command(version, about, long_about = None)]
pub enum Commands {
    /// Run a pipeline definition
    Run {
        /// Pipeline definition (JSON)
        config: PathBuf,
        /// Override the target file
        #[clap(short = 't', long)]
        target: Option<PathBuf>,
        /// Override the source file
        #[clap(short = 's', long)]
        source: Option<PathBuf>,
        /// Write the final data to the target file
        #[clap(short = 'o', long)]
        save_final_output: bool,
    },

    /// List registered step names
    Steps,
}

/// Binder pipeline runner
#[derive(Parser)]
#[command(about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,

    /// Directory for the debug log file
    #[clap(long, global = true)]
    pub log_dir: Option<PathBuf>,
}
