//! Typed lookups and plot queries against the dataset store.
//!
//! Every multi-row query returns rows in `ordinal` order, the order of the
//! source table. Scatter points carry their row's ordinal as `point_index`, so
//! a chart click maps straight back to [`DatasetStore::get_by_index`] even
//! when rows without plottable values are left off the chart.

use crate::models::{DatasetStats, PlotKind, ScatterPoint, ScatterSeries};
use crate::{storage_error, DatasetStore};
use apa_core::error::{DashError, Result};
use apa_core::record::Record;
use rusqlite::{params, OptionalExtension, Row};

const RECORD_COLUMNS: &str = "ordinal, pas_name, gene_name, log2_fold_change, padj, \
     neg_log_padj, base_mean, projection_mean_tpm, soma_mean_tpm";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<Record> {
    let ordinal: i64 = row.get(0)?;
    Ok(Record {
        ordinal: ordinal as usize,
        pas_name: row.get(1)?,
        gene_name: row.get(2)?,
        log2_fold_change: row.get(3)?,
        adjusted_p_value: row.get(4)?,
        neg_log_adjusted_p_value: row.get(5)?,
        base_mean: row.get(6)?,
        projection_mean_tpm: row.get(7)?,
        soma_mean_tpm: row.get(8)?,
    })
}

impl DatasetStore {
    /// Get the record at source position `index`.
    ///
    /// Fails with `IndexOutOfRange` when `index` is outside `[0, len)`, and
    /// with `NotFound` for a position whose source row had no `pas_name`.
    pub fn get_by_index(&self, index: usize) -> Result<Record> {
        if index >= self.len {
            return Err(DashError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        self.conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM records WHERE ordinal = ?1"),
                params![index as i64],
                record_from_row,
            )
            .optional()
            .map_err(storage_error)?
            .ok_or_else(|| DashError::NotFound(format!("point {}", index)))
    }

    /// Get the first record, in dataset order, whose gene is `gene_name`.
    ///
    /// Genes with several sites resolve to the lowest-ordinal site only.
    pub fn get_first_by_gene_name(&self, gene_name: &str) -> Result<Record> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {RECORD_COLUMNS} FROM records
                     WHERE gene_name = ?1
                     ORDER BY ordinal
                     LIMIT 1"
                ),
                params![gene_name],
                record_from_row,
            )
            .optional()
            .map_err(storage_error)?
            .ok_or_else(|| DashError::NotFound(format!("gene {}", gene_name)))
    }

    /// Get the record with the given site identifier.
    pub fn get_by_pas_name(&self, pas_name: &str) -> Result<Record> {
        self.conn
            .query_row(
                &format!("SELECT {RECORD_COLUMNS} FROM records WHERE pas_name = ?1"),
                params![pas_name],
                record_from_row,
            )
            .optional()
            .map_err(storage_error)?
            .ok_or_else(|| DashError::NotFound(format!("site {}", pas_name)))
    }

    /// Get every record for a gene, in dataset order. Empty if the gene is absent.
    pub fn query_by_gene_name(&self, gene_name: &str) -> Result<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM records WHERE gene_name = ?1 ORDER BY ordinal"
            ))
            .map_err(storage_error)?;
        let rows = stmt
            .query_map(params![gene_name], record_from_row)
            .map_err(storage_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_error)?;
        Ok(rows)
    }

    /// Distinct gene names in order of first appearance (dropdown options).
    pub fn gene_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT gene_name FROM records
                 GROUP BY gene_name
                 ORDER BY MIN(ordinal)",
            )
            .map_err(storage_error)?;
        let names = stmt
            .query_map([], |row| row.get(0))
            .map_err(storage_error)?
            .collect::<rusqlite::Result<Vec<String>>>()
            .map_err(storage_error)?;
        log::info!("[APA] query: gene_names returned {} genes", names.len());
        Ok(names)
    }

    /// Points for one of the scatter charts, in source order.
    ///
    /// Rows missing either axis value are left out; the mean-expression chart
    /// also leaves out `baseMean = 0`, which has no place on its log x-axis.
    pub fn query_points(&self, plot: PlotKind) -> Result<Vec<ScatterPoint>> {
        let (x, y, filter) = match plot {
            PlotKind::Volcano => ("log2_fold_change", "neg_log_padj", ""),
            PlotKind::MeanExpression => ("base_mean", "log2_fold_change", "AND base_mean > 0"),
        };
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT ordinal, pas_name, gene_name, {x}, {y} FROM records
                 WHERE {x} IS NOT NULL AND {y} IS NOT NULL {filter}
                 ORDER BY ordinal"
            ))
            .map_err(storage_error)?;
        let points = stmt
            .query_map([], |row| {
                let ordinal: i64 = row.get(0)?;
                Ok(ScatterPoint {
                    point_index: ordinal as usize,
                    pas_name: row.get(1)?,
                    gene_name: row.get(2)?,
                    x: row.get(3)?,
                    y: row.get(4)?,
                })
            })
            .map_err(storage_error)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(storage_error)?;
        log::info!("[APA] query: {} returned {} points", plot, points.len());
        Ok(points)
    }

    /// Volcano chart points: x = log2FoldChange, y = -ln(padj).
    pub fn query_volcano_points(&self) -> Result<Vec<ScatterPoint>> {
        self.query_points(PlotKind::Volcano)
    }

    /// Mean-expression chart points: x = baseMean, y = log2FoldChange.
    pub fn query_mean_expression_points(&self) -> Result<Vec<ScatterPoint>> {
        self.query_points(PlotKind::MeanExpression)
    }

    /// Scatter points bundled with the chart's title and axis hints.
    pub fn query_series(&self, plot: PlotKind) -> Result<ScatterSeries> {
        let (x_label, y_label) = plot.axes();
        Ok(ScatterSeries {
            plot,
            title: plot.title().to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            log_x: plot.log_x(),
            points: self.query_points(plot)?,
        })
    }

    /// Record, gene, multi-site gene and unplottable record counts.
    pub fn stats(&self) -> Result<DatasetStats> {
        let (records, unplottable): (i64, i64) = self
            .conn
            .query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(log2_fold_change IS NULL OR neg_log_padj IS NULL
                                     OR base_mean IS NULL), 0)
                 FROM records",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(storage_error)?;
        let (genes, multi_site_genes): (i64, i64) = self
            .conn
            .query_row(
                "SELECT COUNT(*), COALESCE(SUM(sites > 1), 0)
                 FROM (SELECT COUNT(*) AS sites FROM records GROUP BY gene_name)",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(storage_error)?;
        Ok(DatasetStats {
            records: records as usize,
            genes: genes as usize,
            multi_site_genes: multi_site_genes as usize,
            unplottable: unplottable as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::THREE_ROWS;
    use crate::models::PlotKind;
    use crate::DatasetStore;
    use apa_core::error::DashError;

    fn store() -> DatasetStore {
        DatasetStore::from_csv(THREE_ROWS).unwrap()
    }

    #[test]
    fn get_by_index_returns_row_at_position() {
        let store = store();
        for (i, pas) in ["A", "B", "C"].iter().enumerate() {
            let record = store.get_by_index(i).unwrap();
            assert_eq!(record.ordinal, i);
            assert_eq!(&record.pas_name, pas);
        }
    }

    #[test]
    fn get_by_index_out_of_range() {
        assert_eq!(
            store().get_by_index(3),
            Err(DashError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[test]
    fn get_first_by_gene_name_prefers_dataset_order() {
        let record = store().get_first_by_gene_name("G1").unwrap();
        assert_eq!(record.pas_name, "A");
        assert_eq!(record.gene_name, "G1");
    }

    #[test]
    fn get_first_by_gene_name_not_found() {
        assert!(matches!(
            store().get_first_by_gene_name("G9"),
            Err(DashError::NotFound(_))
        ));
    }

    #[test]
    fn get_by_pas_name_is_exact() {
        let store = store();
        assert_eq!(store.get_by_pas_name("B").unwrap().ordinal, 1);
        assert!(matches!(
            store.get_by_pas_name("b"),
            Err(DashError::NotFound(_))
        ));
    }

    #[test]
    fn query_by_gene_name_returns_all_sites() {
        let store = store();
        let sites: Vec<String> = store
            .query_by_gene_name("G1")
            .unwrap()
            .into_iter()
            .map(|r| r.pas_name)
            .collect();
        assert_eq!(sites, vec!["A", "B"]);
        assert!(store.query_by_gene_name("G9").unwrap().is_empty());
    }

    #[test]
    fn gene_names_are_distinct_in_first_appearance_order() {
        assert_eq!(store().gene_names().unwrap(), vec!["G1", "G2"]);
    }

    #[test]
    fn volcano_points_use_neg_log_padj() {
        let points = store().query_volcano_points().unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].point_index, 0);
        assert!((points[0].x - 1.5).abs() < f64::EPSILON);
        assert!((points[0].y - 4.6052).abs() < 1e-3);
    }

    #[test]
    fn mean_expression_points_use_base_mean() {
        let points = store().query_mean_expression_points().unwrap();
        let c = &points[2];
        assert_eq!(c.pas_name, "C");
        assert!((c.x - 8.25).abs() < f64::EPSILON);
        assert!((c.y - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn series_carries_layout_hints() {
        let series = store().query_series(PlotKind::MeanExpression).unwrap();
        assert_eq!(series.title, "baseMean vs log2FC");
        assert!(series.log_x);
        assert_eq!(series.points.len(), 3);
    }

    #[test]
    fn stats_count_multi_site_genes() {
        let stats = store().stats().unwrap();
        assert_eq!(stats.records, 3);
        assert_eq!(stats.genes, 2);
        assert_eq!(stats.multi_site_genes, 1);
        assert_eq!(stats.unplottable, 0);
    }

    #[test]
    fn points_keep_source_index_around_unplottable_rows() {
        let store = DatasetStore::from_csv(
            "\
pas_name,gene_name,log2FoldChange,padj,baseMean,Projection_Mean_TPM,Soma_Mean_TPM
A,G1,1.5,0.01,120,10,5
B,G2,0.3,NA,0,3,7
C,G3,0.1,0.9,8.25,1,1
",
        )
        .unwrap();

        let indices = |plot| -> Vec<usize> {
            store
                .query_points(plot)
                .unwrap()
                .iter()
                .map(|p| p.point_index)
                .collect()
        };
        assert_eq!(indices(PlotKind::Volcano), vec![0, 2]);
        assert_eq!(indices(PlotKind::MeanExpression), vec![0, 2]);

        for point in store.query_volcano_points().unwrap() {
            assert_eq!(store.get_by_index(point.point_index).unwrap().pas_name, point.pas_name);
        }
        assert_eq!(store.stats().unwrap().unplottable, 1);
    }
}
