// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Subcommands: init, route, extract, train, evaluate.
// Global flags (--config, --base-dir, --model) live on `Cli`.

use std::path::PathBuf;

use clap::{Args, Subcommand};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the destination directory layout under the base directory
    Init,

    /// Classify or dispatch each file
    Route(RouteArgs),

    /// Print the text extracted from one file
    Extract(ExtractArgs),

    /// Train the classifier on a labeled CSV corpus
    Train(TrainArgs),

    /// Score the stored model on a labeled CSV corpus
    Evaluate(EvaluateArgs),
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Files to route
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// File to extract text from
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV file with `text` and `category` columns
    #[arg(long)]
    pub corpus: PathBuf,

    /// Fraction of each category held out for evaluation
    #[arg(long, default_value_t = crate::data::splitter::HOLDOUT_FRACTION)]
    pub holdout: f64,

    /// Seed for the stratified split
    #[arg(long, default_value_t = crate::data::splitter::SPLIT_SEED)]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// CSV file with `text` and `category` columns; every row is scored
    #[arg(long)]
    pub corpus: PathBuf,
}
