use serde::{Deserialize, Serialize};

/// Column holding the polyadenylation-site identifier.
pub const COL_PAS_NAME: &str = "pas_name";
/// Column holding the gene symbol.
pub const COL_GENE_NAME: &str = "gene_name";
/// Column holding the DESeq2 log2 fold change.
pub const COL_LOG2_FOLD_CHANGE: &str = "log2FoldChange";
/// Column holding the adjusted p-value.
pub const COL_PADJ: &str = "padj";
/// Column holding the mean of normalized counts.
pub const COL_BASE_MEAN: &str = "baseMean";
/// Column holding mean TPM in the projection compartment.
pub const COL_PROJECTION_TPM: &str = "Projection_Mean_TPM";
/// Column holding mean TPM in the soma compartment.
pub const COL_SOMA_TPM: &str = "Soma_Mean_TPM";

/// Every column a dataset source must provide, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    COL_PAS_NAME,
    COL_GENE_NAME,
    COL_LOG2_FOLD_CHANGE,
    COL_PADJ,
    COL_BASE_MEAN,
    COL_PROJECTION_TPM,
    COL_SOMA_TPM,
];

/// One row of the differential-expression dataset.
///
/// `pas_name` is unique per row; `gene_name` is not, since a gene can have
/// several measured polyadenylation sites. Statistics DESeq2 reports as `NA`
/// (or that fall outside their valid range) are `None`; such a row is still
/// selectable by gene but has no point on the chart missing that value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Position of the row in the source table, 0-based.
    pub ordinal: usize,
    pub pas_name: String,
    pub gene_name: String,
    pub log2_fold_change: Option<f64>,
    /// Adjusted p-value in `(0, 1]`.
    pub adjusted_p_value: Option<f64>,
    /// `-ln(adjusted_p_value)`, computed once at load.
    pub neg_log_adjusted_p_value: Option<f64>,
    /// Mean of normalized counts, `>= 0`.
    pub base_mean: Option<f64>,
    /// `None` when the source cell was empty or `NA`.
    pub projection_mean_tpm: Option<f64>,
    /// `None` when the source cell was empty or `NA`.
    pub soma_mean_tpm: Option<f64>,
}

/// An adjusted p-value, if it lies in `(0, 1]`.
pub fn valid_adjusted_p_value(padj: f64) -> Option<f64> {
    (padj > 0.0 && padj <= 1.0).then_some(padj)
}

/// A mean or TPM value, if it is finite and not negative.
pub fn valid_non_negative(value: f64) -> Option<f64> {
    (value.is_finite() && value >= 0.0).then_some(value)
}

/// Negative natural log of an adjusted p-value.
///
/// Returns `None` unless `padj` lies in `(0, 1]`, which keeps the volcano
/// y-axis finite and non-negative.
pub fn neg_log_adjusted_p_value(padj: f64) -> Option<f64> {
    valid_adjusted_p_value(padj).map(|p| -p.ln())
}

/// Parse a numeric CSV cell, treating empty, `NA` and `NaN` cells as missing.
pub fn parse_measurement(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() || cell.eq_ignore_ascii_case("na") {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| !v.is_nan())
}
