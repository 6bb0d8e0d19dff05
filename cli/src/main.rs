use anyhow::Context;
use clap::Parser;
use infrastructure::Config;
use presentation::cli::{Cli, CliApp};
use shared::telemetry::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("invalid configuration")?;
    let app = CliApp::new(config);
    app.run(cli).await?;
    Ok(())
}
