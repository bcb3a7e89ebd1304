use anyhow::Result;
use clap::Parser;
use doc_router::cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("doc_router=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.run()
}
