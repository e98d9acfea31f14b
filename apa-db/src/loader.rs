//! CSV loading for the dataset store.
//!
//! The source is a headered CSV as exported from the DESeq2 analysis. Columns
//! are located by name, so extra columns (such as an unnamed row-index column)
//! and any column order are accepted. Required columns:
//!
//! ```text
//! pas_name,gene_name,log2FoldChange,padj,baseMean,Projection_Mean_TPM,Soma_Mean_TPM
//! ```
//!
//! Every row with a `pas_name` is stored under its source position, so the
//! point index a chart reports for the source table maps back to the same row.
//! Cells that are empty, `NA`, non-numeric or out of range (`padj` outside
//! `(0, 1]`, negative `baseMean` or TPM) are stored as NULL. Rows without a
//! `pas_name` are skipped but still use up their position.

use crate::{schema, storage_error, DatasetStore};
use apa_core::error::{DashError, Result};
use apa_core::record::{
    neg_log_adjusted_p_value, parse_measurement, valid_adjusted_p_value, valid_non_negative,
    COL_BASE_MEAN, COL_GENE_NAME,
    COL_LOG2_FOLD_CHANGE, COL_PADJ, COL_PAS_NAME, COL_PROJECTION_TPM, COL_SOMA_TPM,
    REQUIRED_COLUMNS,
};
use flate2::read::GzDecoder;
use rusqlite::{params, Connection, ErrorCode};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::rc::Rc;

/// Positions of the required columns within a CSV header.
struct ColumnMap {
    pas_name: usize,
    gene_name: usize,
    log2_fold_change: usize,
    padj: usize,
    base_mean: usize,
    projection_tpm: usize,
    soma_tpm: usize,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|name| find(*name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(DashError::DataUnavailable(format!(
                "missing required column(s): {}",
                missing.join(", ")
            )));
        }

        // Every lookup below succeeded in the scan above.
        let col = |name: &str| find(name).unwrap_or_default();
        Ok(Self {
            pas_name: col(COL_PAS_NAME),
            gene_name: col(COL_GENE_NAME),
            log2_fold_change: col(COL_LOG2_FOLD_CHANGE),
            padj: col(COL_PADJ),
            base_mean: col(COL_BASE_MEAN),
            projection_tpm: col(COL_PROJECTION_TPM),
            soma_tpm: col(COL_SOMA_TPM),
        })
    }

    /// Extract a row, or `None` if it has no site identifier.
    fn parse_row<'r>(&self, r: &'r csv::StringRecord) -> Option<ParsedRow<'r>> {
        let cell = |i: usize| r.get(i).unwrap_or("").trim();

        let pas_name = cell(self.pas_name);
        if pas_name.is_empty() {
            return None;
        }

        let mut out_of_range = 0;
        let mut checked = |i: usize, valid: fn(f64) -> Option<f64>| {
            let value = parse_measurement(cell(i))?;
            let checked = valid(value);
            if checked.is_none() {
                out_of_range += 1;
            }
            checked
        };
        let log2_fold_change = checked(self.log2_fold_change, |v| v.is_finite().then_some(v));
        let padj = checked(self.padj, valid_adjusted_p_value);
        let base_mean = checked(self.base_mean, valid_non_negative);
        let projection_tpm = checked(self.projection_tpm, valid_non_negative);
        let soma_tpm = checked(self.soma_tpm, valid_non_negative);

        Some(ParsedRow {
            pas_name,
            gene_name: cell(self.gene_name),
            log2_fold_change,
            padj,
            neg_log_padj: padj.and_then(neg_log_adjusted_p_value),
            base_mean,
            projection_tpm,
            soma_tpm,
            out_of_range,
        })
    }
}

struct ParsedRow<'r> {
    pas_name: &'r str,
    gene_name: &'r str,
    log2_fold_change: Option<f64>,
    padj: Option<f64>,
    neg_log_padj: Option<f64>,
    base_mean: Option<f64>,
    projection_tpm: Option<f64>,
    soma_tpm: Option<f64>,
    /// Numeric cells dropped for lying outside their valid range.
    out_of_range: usize,
}

impl ParsedRow<'_> {
    /// True when the row is missing from at least one scatter chart.
    fn is_unplottable(&self) -> bool {
        self.log2_fold_change.is_none() || self.neg_log_padj.is_none() || self.base_mean.is_none()
    }
}

/// Tallies reported once a load finishes.
#[derive(Debug, Default)]
struct LoadCounts {
    loaded: usize,
    missing_pas_name: usize,
    unplottable: usize,
    out_of_range: usize,
}

fn unavailable(err: impl std::fmt::Display) -> DashError {
    DashError::DataUnavailable(err.to_string())
}

impl DatasetStore {
    /// Load the dataset from a CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// pas_name,gene_name,log2FoldChange,padj,baseMean,Projection_Mean_TPM,Soma_Mean_TPM
    /// ENSRNOG00000016516-1,Camk2a,2.31,0.0004,1520.3,88.1,41.7
    /// ```
    pub fn from_csv(csv_data: &str) -> Result<Self> {
        Self::from_reader(csv_data.as_bytes())
    }

    /// Load the dataset from a CSV file. Paths ending in `.gz` are gunzipped.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| DashError::DataUnavailable(format!("{}: {}", path.display(), e)))?;
        log::info!("[APA] loader: reading {}", path.display());
        if path.extension().is_some_and(|ext| ext == "gz") {
            Self::from_reader(GzDecoder::new(file))
        } else {
            Self::from_reader(BufReader::new(file))
        }
    }

    /// Load the dataset from any CSV byte stream.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut conn = Connection::open_in_memory().map_err(storage_error)?;
        conn.execute_batch(schema::create_schema())
            .map_err(storage_error)?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers().map_err(unavailable)?.clone();
        let columns = ColumnMap::from_headers(&headers)?;

        let tx = conn.transaction().map_err(storage_error)?;
        let mut counts = LoadCounts::default();
        let mut positions = 0usize;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO records
                     (ordinal, pas_name, gene_name, log2_fold_change, padj, neg_log_padj,
                      base_mean, projection_mean_tpm, soma_mean_tpm)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                )
                .map_err(storage_error)?;

            for result in rdr.records() {
                let r = result.map_err(unavailable)?;
                let ordinal = positions;
                positions += 1;

                let Some(row) = columns.parse_row(&r) else {
                    counts.missing_pas_name += 1;
                    continue;
                };
                stmt.execute(params![
                    ordinal as i64,
                    row.pas_name,
                    row.gene_name,
                    row.log2_fold_change,
                    row.padj,
                    row.neg_log_padj,
                    row.base_mean,
                    row.projection_tpm,
                    row.soma_tpm,
                ])
                .map_err(|e| match e.sqlite_error_code() {
                    Some(ErrorCode::ConstraintViolation) => DashError::DataUnavailable(format!(
                        "duplicate pas_name {}",
                        row.pas_name
                    )),
                    _ => storage_error(e),
                })?;

                counts.loaded += 1;
                counts.out_of_range += row.out_of_range;
                if row.is_unplottable() {
                    counts.unplottable += 1;
                }
            }
        }
        tx.commit().map_err(storage_error)?;

        if counts.missing_pas_name > 0 {
            log::warn!(
                "[APA] loader: skipped {} rows without a pas_name",
                counts.missing_pas_name
            );
        }
        if counts.out_of_range > 0 {
            log::warn!(
                "[APA] loader: stored {} out-of-range values as NULL (padj outside (0, 1], negative baseMean or TPM)",
                counts.out_of_range
            );
        }
        if counts.unplottable > 0 {
            log::warn!(
                "[APA] loader: {} records lack log2FoldChange/padj/baseMean and are left off a chart",
                counts.unplottable
            );
        }
        if counts.loaded == 0 {
            return Err(DashError::DataUnavailable(
                "dataset has no records".to_string(),
            ));
        }
        log::info!(
            "[APA] loader: loaded {} records over {} positions",
            counts.loaded,
            positions
        );

        Ok(Self {
            conn: Rc::new(conn),
            len: positions,
        })
    }
}
