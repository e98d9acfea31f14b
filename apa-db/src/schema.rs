//! SQL schema for the in-memory dataset.
//!
//! The schema is applied as a single batch when the store is created.

/// Returns the full SQL schema as a single batch string.
///
/// `records` holds one row per polyadenylation site. `ordinal` is the
/// 0-based position of the row in the source table, which is also the point
/// index a chart reports on click. Statistics that are `NA` or out of range
/// are NULL; such rows are left off the affected chart but keep their
/// ordinal.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS records (
        ordinal INTEGER PRIMARY KEY,
        pas_name TEXT NOT NULL UNIQUE,
        gene_name TEXT NOT NULL,
        log2_fold_change REAL,
        padj REAL,
        neg_log_padj REAL,
        base_mean REAL,
        projection_mean_tpm REAL,
        soma_mean_tpm REAL
    );
    CREATE INDEX IF NOT EXISTS idx_records_gene ON records(gene_name, ordinal);
    "#
}
