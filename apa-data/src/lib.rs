//! Selection resolution and compartment summaries.
//!
//! This crate turns an [`InteractionEvent`](apa_core::event::InteractionEvent)
//! into the data a bar chart needs: the event is resolved to one dataset row,
//! and the row's Soma/Projection TPM values are packaged as a two-bar figure.

pub mod resolver;
pub mod summary;

pub use resolver::SelectionResolver;
pub use summary::{BarFigure, BarRow, CompartmentSummaryBuilder};

#[cfg(test)]
pub(crate) mod fixtures {
    use apa_db::DatasetStore;

    pub fn three_row_store() -> DatasetStore {
        DatasetStore::from_csv(
            "\
pas_name,gene_name,log2FoldChange,padj,baseMean,Projection_Mean_TPM,Soma_Mean_TPM
A,G1,1.5,0.01,120.0,10,5
B,G1,-0.7,0.2,45.5,3,7
C,G2,0.1,0.9,8.25,1,1
",
        )
        .unwrap()
    }
}
