//! Resolve interaction events to dataset rows.

use apa_core::error::Result;
use apa_core::event::InteractionEvent;
use apa_core::record::Record;
use apa_db::DatasetStore;

/// Resolves an interaction event to exactly one record.
///
/// Point clicks carry the plot position of the clicked point, so they are
/// looked up by ordinal; the scatter charts are built from the same store in
/// the same order. Gene selections return the first site of the gene in
/// dataset order.
#[derive(Clone)]
pub struct SelectionResolver {
    store: DatasetStore,
}

impl SelectionResolver {
    pub fn new(store: DatasetStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Resolve `event`, propagating the store's lookup error unchanged.
    pub fn resolve(&self, event: &InteractionEvent) -> Result<Record> {
        let record = match event {
            InteractionEvent::PointClick { ordinal_index } => {
                self.store.get_by_index(*ordinal_index)?
            }
            InteractionEvent::CategorySelect { gene_name } => {
                self.store.get_first_by_gene_name(gene_name)?
            }
        };
        log::debug!("[APA] resolver: {:?} -> {}", event, record.pas_name);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::SelectionResolver;
    use crate::fixtures::three_row_store;
    use apa_core::error::DashError;
    use apa_core::event::InteractionEvent;

    fn click(i: usize) -> InteractionEvent {
        InteractionEvent::PointClick { ordinal_index: i }
    }

    fn select(gene: &str) -> InteractionEvent {
        InteractionEvent::CategorySelect {
            gene_name: gene.to_string(),
        }
    }

    #[test]
    fn point_click_resolves_every_position() {
        let store = three_row_store();
        let resolver = SelectionResolver::new(store.clone());
        for i in 0..store.len() {
            assert_eq!(
                resolver.resolve(&click(i)).unwrap(),
                store.get_by_index(i).unwrap()
            );
        }
    }

    #[test]
    fn category_select_returns_matching_gene() {
        let resolver = SelectionResolver::new(three_row_store());
        for gene in ["G1", "G2"] {
            assert_eq!(resolver.resolve(&select(gene)).unwrap().gene_name, gene);
        }
    }

    #[test]
    fn category_select_tie_breaks_on_first_row() {
        let resolver = SelectionResolver::new(three_row_store());
        assert_eq!(resolver.resolve(&select("G1")).unwrap().pas_name, "A");
    }

    #[test]
    fn category_select_reaches_gene_with_na_padj() {
        let store = apa_db::DatasetStore::from_csv(
            "\
pas_name,gene_name,log2FoldChange,padj,baseMean,Projection_Mean_TPM,Soma_Mean_TPM
A,G1,1.5,0.01,120,10,5
B,G2,NA,NA,45.5,3,7
C,G3,0.1,0.9,8.25,1,1
",
        )
        .unwrap();
        let resolver = SelectionResolver::new(store);

        let b = resolver.resolve(&select("G2")).unwrap();
        assert_eq!(b.pas_name, "B");
        assert_eq!(b.adjusted_p_value, None);
        assert_eq!(resolver.resolve(&click(2)).unwrap().pas_name, "C");
    }

    #[test]
    fn failures_propagate_store_errors() {
        let resolver = SelectionResolver::new(three_row_store());
        assert_eq!(
            resolver.resolve(&click(3)),
            Err(DashError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(matches!(
            resolver.resolve(&select("G9")),
            Err(DashError::NotFound(_))
        ));
    }
}
