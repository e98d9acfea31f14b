//! Compartment summaries: the two-bar Soma/Projection comparison.

use apa_core::compartment::{Compartment, CompartmentSample};
use apa_core::error::{DashError, Result};
use apa_core::record::Record;
use serde::Serialize;

/// One bar of the comparison chart.
///
/// Serialized with the column names the bar chart is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarRow {
    #[serde(rename = "Compartment")]
    pub compartment: Compartment,
    #[serde(rename = "TPM")]
    pub tpm: f64,
}

impl From<CompartmentSample> for BarRow {
    fn from(sample: CompartmentSample) -> Self {
        Self {
            compartment: sample.compartment,
            tpm: sample.value,
        }
    }
}

/// Chart-ready bar data: always Soma then Projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarFigure {
    pub title: String,
    pub rows: [BarRow; 2],
}

/// Builds compartment samples and bar figures from resolved records.
#[derive(Debug, Clone)]
pub struct CompartmentSummaryBuilder {
    default_title: String,
}

impl CompartmentSummaryBuilder {
    /// `default_title` labels the figure when no record has been resolved yet.
    pub fn new(default_title: impl Into<String>) -> Self {
        Self {
            default_title: default_title.into(),
        }
    }

    pub fn default_title(&self) -> &str {
        &self.default_title
    }

    /// Read the two TPM measurements off `record`, Soma first.
    pub fn build(&self, record: &Record) -> Result<[CompartmentSample; 2]> {
        let missing = |field: &'static str| DashError::MalformedRecord {
            pas_name: record.pas_name.clone(),
            field,
        };
        let soma = record.soma_mean_tpm.ok_or_else(|| missing("Soma_Mean_TPM"))?;
        let projection = record
            .projection_mean_tpm
            .ok_or_else(|| missing("Projection_Mean_TPM"))?;
        Ok([
            CompartmentSample::new(Compartment::Soma, soma),
            CompartmentSample::new(Compartment::Projection, projection),
        ])
    }

    /// Figure title: the record's gene, or the default title.
    pub fn title(&self, record: Option<&Record>) -> String {
        match record {
            Some(r) => r.gene_name.clone(),
            None => self.default_title.clone(),
        }
    }

    /// Build the bar figure for `record` under the given title.
    pub fn figure(&self, record: &Record, title: String) -> Result<BarFigure> {
        let [soma, projection] = self.build(record)?;
        Ok(BarFigure {
            title,
            rows: [soma.into(), projection.into()],
        })
    }
}
