//! Dashboard configuration: which dataset to load and which row to show first.

use apa_core::error::{DashError, Result};
use apa_db::DatasetStore;
use clap::Args;
use log::info;
use std::fmt;
use std::path::PathBuf;

/// Published differential-expression table the dashboard was built around.
pub const DEFAULT_DATASET_URL: &str = "https://raw.githubusercontent.com/vedtopkar/apa-dash/8049095cc981ee5f0528f105d578f093eb5d775c/20220201_counted_pas_for_deseq.csv";

/// Site shown in the bar summary before any interaction.
pub const DEFAULT_PAS: &str = "ENSRNOG00000016516-1";

/// Settings shared by every subcommand. Each can also be set through the
/// environment.
#[derive(Args, Debug, Clone)]
pub struct DashboardConfig {
    /// Dataset CSV: a local path (.csv or .csv.gz) or an http(s) URL
    #[arg(long, env = "APA_DATASET", default_value = DEFAULT_DATASET_URL, global = true)]
    pub dataset: String,

    /// Site identifier (pas_name) shown before any selection
    #[arg(long, env = "APA_DEFAULT_PAS", default_value = DEFAULT_PAS, global = true)]
    pub default_pas: String,
}

impl DashboardConfig {
    pub fn source(&self) -> DataSource {
        DataSource::from(self.dataset.as_str())
    }
}

/// Where the dataset CSV comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    Url(String),
}

impl From<&str> for DataSource {
    fn from(s: &str) -> Self {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            DataSource::Url(s.to_string())
        } else {
            DataSource::Path(PathBuf::from(s))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Url(u) => f.write_str(u),
        }
    }
}

impl DataSource {
    /// Load the dataset once. Any failure is `DataUnavailable`.
    pub async fn load(&self) -> Result<DatasetStore> {
        info!("Loading dataset from {}", self);
        match self {
            DataSource::Path(path) => DatasetStore::from_path(path),
            DataSource::Url(url) => {
                let body = fetch_csv(url)
                    .await
                    .map_err(|e| DashError::DataUnavailable(format!("{}: {}", url, e)))?;
                DatasetStore::from_csv(&body)
            }
        }
    }
}

async fn fetch_csv(url: &str) -> std::result::Result<String, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;
    client.get(url).send().await?.error_for_status()?.text().await
}
