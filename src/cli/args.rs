//! Command line argument parsing for the Veritas CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Veritas - a TF-IDF + logistic regression fake news detector
#[derive(Parser, Debug, Clone)]
#[command(name = "veritas")]
#[command(about = "Train and query a fake news detection model")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct VeritasArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl VeritasArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train a model on a labeled CSV corpus and save it
    Train(TrainArgs),

    /// Classify one or more statements with a saved model
    Predict(PredictArgs),

    /// Show model statistics
    Stats(StatsArgs),
}

/// Arguments for training a model
#[derive(clap::Args, Debug, Clone)]
pub struct TrainArgs {
    /// Path to the labeled corpus (CSV with text and label columns)
    pub corpus: PathBuf,

    /// Where to write the trained model artifact
    #[arg(short, long, default_value = "model.json")]
    pub model: PathBuf,
}

/// Arguments for classifying statements
#[derive(clap::Args, Debug, Clone)]
pub struct PredictArgs {
    /// Statements to classify
    #[arg(required = true)]
    pub texts: Vec<String>,

    /// Path to the trained model artifact
    #[arg(short, long, default_value = "model.json")]
    pub model: PathBuf,
}

/// Arguments for showing model statistics
#[derive(clap::Args, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the trained model artifact
    #[arg(short, long, default_value = "model.json")]
    pub model: PathBuf,
}

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    Human,
    /// JSON
    Json,
}
