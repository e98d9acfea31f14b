//! APA CLI - explore a differential-expression dataset from the command line.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "apa-cli",
    version,
    about = "Differential-expression selection explorer"
)]
struct Cli {
    #[command(flatten)]
    config: apa_cmd::DashboardConfig,

    #[command(subcommand)]
    command: apa_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Dataset source: {}", cli.config.dataset);
    apa_cmd::run(cli.config, cli.command).await
}
