//! Command implementations for the APA explorer CLI.
//!
//! Every command loads the dataset once from the configured source, then
//! either reads it directly or drives the view controller headlessly.

use apa_data::{CompartmentSummaryBuilder, SelectionResolver};
use apa_db::models::PlotKind;
use apa_db::DatasetStore;
use apa_view::ViewBindingController;
use clap::Subcommand;
use std::io::BufReader;
use std::path::PathBuf;

pub mod config;
pub mod explore;
pub mod select;

pub use config::{DashboardConfig, DataSource};

#[derive(Subcommand)]
pub enum Command {
    /// Print record and gene counts for the dataset
    Summary,

    /// List the gene names offered by the search dropdown
    Genes,

    /// Export scatter chart data as JSON
    Points {
        /// Which chart: volcano or mean-expression
        #[arg(short = 'p', long, default_value = "volcano")]
        plot: PlotKind,

        /// Output path (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Resolve one selection and print the bar summary as JSON
    Select {
        /// Plot position of a clicked point
        #[arg(short = 'i', long, conflicts_with = "gene", required_unless_present = "gene")]
        index: Option<usize>,

        /// Gene chosen from the search dropdown
        #[arg(short = 'g', long)]
        gene: Option<String>,
    },

    /// Replay newline-delimited view events and print the output after each
    Replay {
        /// Events file (stdin if omitted)
        #[arg(short = 'e', long)]
        events: Option<PathBuf>,
    },
}

/// Wire a controller over `store` with `default_pas` as the initial row.
pub fn bind_controller(
    store: DatasetStore,
    default_pas: &str,
) -> anyhow::Result<ViewBindingController> {
    let controller = ViewBindingController::new(
        SelectionResolver::new(store),
        CompartmentSummaryBuilder::new(default_pas),
        default_pas,
    )?;
    Ok(controller)
}

pub async fn run(config: DashboardConfig, command: Command) -> anyhow::Result<()> {
    let store = config.source().load().await?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Summary => explore::run_summary(&store, &mut out),
        Command::Genes => explore::run_genes(&store, &mut out),
        Command::Points { plot, output } => {
            explore::run_points(&store, plot, output.as_deref(), &mut out)
        }
        Command::Select { index, gene } => {
            let mut controller = bind_controller(store, &config.default_pas)?;
            select::run_select(&mut controller, index, gene, &mut out)
        }
        Command::Replay { events } => {
            let mut controller = bind_controller(store, &config.default_pas)?;
            let summary = match events {
                Some(path) => {
                    let file = std::fs::File::open(&path)?;
                    select::run_replay(&mut controller, BufReader::new(file), &mut out)?
                }
                None => select::run_replay(&mut controller, std::io::stdin().lock(), &mut out)?,
            };
            if summary.rejected > 0 {
                log::warn!("{} replayed events were rejected", summary.rejected);
            }
            Ok(())
        }
    }
}
