//! Read-only dataset commands: statistics, dropdown options and scatter data.

use apa_db::models::PlotKind;
use apa_db::DatasetStore;
use log::info;
use std::io::Write;
use std::path::Path;

/// Print record, gene and multi-site gene counts.
pub fn run_summary<W: Write>(store: &DatasetStore, out: &mut W) -> anyhow::Result<()> {
    let stats = store.stats()?;
    writeln!(out, "records: {}", stats.records)?;
    writeln!(out, "genes: {}", stats.genes)?;
    writeln!(
        out,
        "genes with multiple sites: {} (gene search shows the first site)",
        stats.multi_site_genes
    )?;
    writeln!(
        out,
        "records missing from a chart: {} (still selectable by gene)",
        stats.unplottable
    )?;
    Ok(())
}

/// Print the gene dropdown options, one per line.
pub fn run_genes<W: Write>(store: &DatasetStore, out: &mut W) -> anyhow::Result<()> {
    for gene in store.gene_names()? {
        writeln!(out, "{}", gene)?;
    }
    Ok(())
}

/// Write one scatter chart's data as JSON, to `output` or to `out`.
pub fn run_points<W: Write>(
    store: &DatasetStore,
    plot: PlotKind,
    output: Option<&Path>,
    out: &mut W,
) -> anyhow::Result<()> {
    let series = store.query_series(plot)?;
    match output {
        Some(path) => {
            let file = std::fs::File::create(path)?;
            serde_json::to_writer(std::io::BufWriter::new(file), &series)?;
            info!(
                "Wrote {} {} points to {}",
                series.points.len(),
                plot,
                path.display()
            );
        }
        None => {
            serde_json::to_writer(&mut *out, &series)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
