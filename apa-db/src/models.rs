//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be handed to a chart view as JSON.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The two scatter charts a point click can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlotKind {
    /// log2FoldChange vs -ln(padj)
    Volcano,
    /// baseMean (log x-axis) vs log2FoldChange
    MeanExpression,
}

impl PlotKind {
    pub fn title(&self) -> &'static str {
        match self {
            PlotKind::Volcano => "log2FC vs pAdj",
            PlotKind::MeanExpression => "baseMean vs log2FC",
        }
    }

    /// (x-axis, y-axis) labels.
    pub fn axes(&self) -> (&'static str, &'static str) {
        match self {
            PlotKind::Volcano => ("log2FoldChange", "nl_padj"),
            PlotKind::MeanExpression => ("baseMean", "log2FoldChange"),
        }
    }

    pub fn log_x(&self) -> bool {
        matches!(self, PlotKind::MeanExpression)
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotKind::Volcano => f.write_str("volcano"),
            PlotKind::MeanExpression => f.write_str("mean-expression"),
        }
    }
}

impl FromStr for PlotKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "volcano" => Ok(PlotKind::Volcano),
            "mean-expression" | "logplot" => Ok(PlotKind::MeanExpression),
            other => Err(format!("unknown plot '{}'", other)),
        }
    }
}

/// One plotted point with its hover data.
///
/// `point_index` is the position the chart reports back on click.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScatterPoint {
    pub point_index: usize,
    pub pas_name: String,
    pub gene_name: String,
    pub x: f64,
    pub y: f64,
}

/// Chart-ready scatter data with its layout hints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScatterSeries {
    pub plot: PlotKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub log_x: bool,
    pub points: Vec<ScatterPoint>,
}

/// Summary counts for a loaded dataset.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DatasetStats {
    /// Number of stored records.
    pub records: usize,
    /// Number of distinct gene names.
    pub genes: usize,
    /// Genes that map to more than one site; gene search resolves these to
    /// their first site only.
    pub multi_site_genes: usize,
    /// Records left off at least one scatter chart for lack of
    /// log2FoldChange, padj or baseMean.
    pub unplottable: usize,
}
