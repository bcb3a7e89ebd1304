// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Batch front end over the pipeline. Parses arguments with clap,
// builds the configuration and hands off to Layer 2. Printing
// happens here and nowhere else.
//
//   doc-router init
//   doc-router route scan.pdf minutes.docx song.mp3
//   doc-router extract scan.png
//   doc-router train --corpus labeled.csv
//   doc-router evaluate --corpus labeled.csv

pub mod commands;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use commands::{Commands, EvaluateArgs, ExtractArgs, RouteArgs, TrainArgs};

use crate::application::evaluate_use_case::EvaluateUseCase;
use crate::application::extract_use_case::ExtractUseCase;
use crate::application::route_use_case::RouteUseCase;
use crate::application::train_use_case::{TrainConfig, TrainUseCase};
use crate::domain::branch::Branch;
use crate::domain::category::FileFamily;
use crate::domain::document::Document;
use crate::infra::config::PipelineConfig;

#[derive(Parser, Debug)]
#[command(
    name = "doc-router",
    version,
    about = "Classify scanned documents by content and file everything else by type."
)]
pub struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base directory holding the destination layout
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Model artifact path (default: <base-dir>/models/classifier.json)
    #[arg(long, global = true)]
    pub model: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.pipeline_config()?;
        match self.command {
            Commands::Init => run_init(&config),
            Commands::Route(args) => run_route(&config, args),
            Commands::Extract(args) => run_extract(&config, args),
            Commands::Train(args) => run_train(&config, args),
            Commands::Evaluate(args) => run_evaluate(&config, args),
        }
    }

    /// Config file (or defaults) with command-line overrides applied.
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = PipelineConfig::load_or_default(self.config.as_deref())
            .context("cannot load configuration")?;
        if let Some(base_dir) = &self.base_dir {
            config.base_dir = base_dir.clone();
        }
        if let Some(model) = &self.model {
            config.model_path = Some(model.clone());
        }
        Ok(config)
    }
}

fn run_init(config: &PipelineConfig) -> Result<()> {
    let extensions = config.extension_table()?;
    let routes = config.routing_table();
    routes.ensure_directories()?;

    println!("Directory layout ready under {}", routes.base_dir().display());
    println!("  {:<12} {}", "OCR", routes.ocr_documents().display());
    for family in FileFamily::ALL {
        println!(
            "  {:<12} {}  (.{})",
            family.as_str(),
            routes.destination(family).display(),
            extensions.extensions_for(Branch::Dispatch(family)).join(", .")
        );
    }
    Ok(())
}

fn run_route(config: &PipelineConfig, args: RouteArgs) -> Result<()> {
    let use_case = RouteUseCase::from_config(config)?;
    let outcomes = use_case.route_all(args.paths);

    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(result) => println!("{result}\n"),
            Err(e) => {
                failed += 1;
                eprintln!("Error processing {}: {e}\n", outcome.path.display());
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} files could not be processed", outcomes.len());
    }
    Ok(())
}

fn run_extract(config: &PipelineConfig, args: ExtractArgs) -> Result<()> {
    let use_case = ExtractUseCase::new(config.extension_table()?, config.extractor());
    let text = use_case.execute(&Document::new(args.path))?;
    println!("{text}");
    Ok(())
}

fn run_train(config: &PipelineConfig, args: TrainArgs) -> Result<()> {
    tracing::info!(corpus = %args.corpus.display(), "starting training");

    let mut train_config =
        TrainConfig::new(args.corpus, config.model_path(), config.metrics_path());
    train_config.holdout_fraction = args.holdout;
    train_config.seed = args.seed;

    let outcome = TrainUseCase::new(train_config).execute()?;
    println!(
        "Training complete: {} training documents, holdout accuracy {:.2}% ({}/{}).",
        outcome.train_size,
        outcome.report.accuracy * 100.0,
        outcome.report.correct,
        outcome.report.test_size,
    );
    println!("Model saved to {}", config.model_path().display());
    Ok(())
}

fn run_evaluate(config: &PipelineConfig, args: EvaluateArgs) -> Result<()> {
    let report = EvaluateUseCase::new(args.corpus, config.model_path()).execute()?;
    println!(
        "Accuracy: {:.2}% ({}/{})",
        report.accuracy * 100.0,
        report.correct,
        report.test_size
    );
    Ok(())
}
