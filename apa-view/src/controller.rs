//! Routes interaction events from every bound source to the bar summary.
//!
//! Events are handled one at a time, each to completion (resolve, build,
//! publish) before the next is accepted, so the output always reflects the
//! most recently completed event. A failed event leaves the output untouched.

use crate::source::ViewSource;
use crate::state::{ViewOutput, ViewState};
use apa_core::error::{DashError, Result};
use apa_core::event::{event_from_payload, InteractionEvent};
use apa_core::record::Record;
use apa_data::{CompartmentSummaryBuilder, SelectionResolver};

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// No event (absent payload, cleared dropdown); output unchanged.
    Idle,
    /// A new output was published.
    Published,
    /// The event was rejected and the previous output kept.
    Retained(DashError),
}

/// Single owner of the shared bar summary output.
///
/// States: `Default` until the first event resolves, then `Selected` with
/// the latest resolved record.
pub struct ViewBindingController {
    resolver: SelectionResolver,
    builder: CompartmentSummaryBuilder,
    default_output: ViewOutput,
    state: ViewState,
    output: ViewOutput,
    revision: u64,
}

impl ViewBindingController {
    /// Create a controller showing the row identified by `default_pas`.
    ///
    /// The default output is computed once here. Fails if the default row is
    /// missing or lacks TPM values.
    pub fn new(
        resolver: SelectionResolver,
        builder: CompartmentSummaryBuilder,
        default_pas: &str,
    ) -> Result<Self> {
        let default_record = resolver.store().get_by_pas_name(default_pas)?;
        let figure = builder.figure(&default_record, builder.title(None))?;
        let default_output = ViewOutput {
            figure,
            readout: default_record.pas_name,
        };
        log::info!(
            "[APA] controller: default output from {} bound to {} sources",
            default_pas,
            ViewSource::ALL.len()
        );
        Ok(Self {
            resolver,
            builder,
            output: default_output.clone(),
            default_output,
            state: ViewState::Default,
            revision: 0,
        })
    }

    /// Handle one event from `source`. `None` means no interaction yet.
    pub fn dispatch(&mut self, source: ViewSource, event: Option<InteractionEvent>) -> Dispatch {
        let Some(event) = event else {
            log::debug!("[APA] controller: {} sent no event", source);
            return Dispatch::Idle;
        };

        match self.run(source, &event) {
            Ok((record, output)) => {
                self.state = ViewState::Selected(record);
                self.output = output;
                self.revision += 1;
                log::debug!(
                    "[APA] controller: {} published {} (revision {})",
                    source,
                    self.output.readout,
                    self.revision
                );
                Dispatch::Published
            }
            Err(err) => {
                log::warn!("[APA] controller: {} event rejected: {}", source, err);
                Dispatch::Retained(err)
            }
        }
    }

    /// Handle a raw view-layer payload from `source`.
    pub fn dispatch_payload(
        &mut self,
        source: ViewSource,
        payload: Option<&serde_json::Value>,
    ) -> Dispatch {
        match event_from_payload(payload) {
            Ok(event) => self.dispatch(source, event),
            Err(err) => {
                log::warn!("[APA] controller: {} payload rejected: {}", source, err);
                Dispatch::Retained(err)
            }
        }
    }

    fn run(&self, source: ViewSource, event: &InteractionEvent) -> Result<(Record, ViewOutput)> {
        if !source.accepts(event) {
            return Err(DashError::InvalidPayload(format!(
                "{} cannot emit {:?}",
                source, event
            )));
        }
        let record = self.resolver.resolve(event)?;
        let figure = self
            .builder
            .figure(&record, self.builder.title(Some(&record)))?;
        let output = ViewOutput {
            figure,
            readout: record.pas_name.clone(),
        };
        Ok((record, output))
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// The output currently displayed.
    pub fn output(&self) -> &ViewOutput {
        &self.output
    }

    pub fn default_output(&self) -> &ViewOutput {
        &self.default_output
    }

    /// Number of outputs published since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apa_core::compartment::Compartment;
    use apa_data::BarRow;
    use apa_db::DatasetStore;
    use serde_json::json;

    const THREE_ROWS: &str = "\
pas_name,gene_name,log2FoldChange,padj,baseMean,Projection_Mean_TPM,Soma_Mean_TPM
A,G1,1.5,0.01,120.0,10,5
B,G1,-0.7,0.2,45.5,3,7
C,G2,0.1,0.9,8.25,1,1
D,G3,0.4,0.3,60.0,,2
";

    fn controller() -> ViewBindingController {
        let store = DatasetStore::from_csv(THREE_ROWS).unwrap();
        ViewBindingController::new(
            SelectionResolver::new(store),
            CompartmentSummaryBuilder::new("B"),
            "B",
        )
        .unwrap()
    }

    fn click(i: usize) -> Option<InteractionEvent> {
        Some(InteractionEvent::PointClick { ordinal_index: i })
    }

    fn select(gene: &str) -> Option<InteractionEvent> {
        Some(InteractionEvent::CategorySelect {
            gene_name: gene.to_string(),
        })
    }

    fn bars(output: &ViewOutput) -> [(Compartment, f64); 2] {
        output.figure.rows.map(|BarRow { compartment, tpm }| (compartment, tpm))
    }

    #[test]
    fn starts_in_default_state() {
        let c = controller();
        assert_eq!(c.state(), &ViewState::Default);
        assert_eq!(c.revision(), 0);
        assert_eq!(c.output(), c.default_output());
        assert_eq!(c.output().readout, "B");
        assert_eq!(c.output().figure.title, "B");
        assert_eq!(
            bars(c.output()),
            [(Compartment::Soma, 7.0), (Compartment::Projection, 3.0)]
        );
    }

    #[test]
    fn missing_default_row_fails_construction() {
        let store = DatasetStore::from_csv(THREE_ROWS).unwrap();
        let result = ViewBindingController::new(
            SelectionResolver::new(store),
            CompartmentSummaryBuilder::new("Z"),
            "Z",
        );
        assert!(matches!(result, Err(DashError::NotFound(_))));
    }

    #[test]
    fn end_to_end_scenario() {
        let mut c = controller();

        assert_eq!(c.dispatch(ViewSource::GeneSearch, select("G1")), Dispatch::Published);
        assert_eq!(c.output().readout, "A");
        assert_eq!(c.output().figure.title, "G1");

        assert_eq!(c.dispatch(ViewSource::Volcano, click(2)), Dispatch::Published);
        assert_eq!(c.output().readout, "C");
        assert_eq!(
            bars(c.output()),
            [(Compartment::Soma, 1.0), (Compartment::Projection, 1.0)]
        );
        assert_eq!(c.state().selected().map(|r| r.pas_name.as_str()), Some("C"));
        assert_eq!(c.revision(), 2);
    }

    #[test]
    fn all_sources_drive_the_same_output() {
        let mut c = controller();
        c.dispatch(ViewSource::Volcano, click(0));
        assert_eq!(c.output().readout, "A");
        c.dispatch(ViewSource::MeanExpression, click(1));
        assert_eq!(c.output().readout, "B");
        c.dispatch(ViewSource::GeneSearch, select("G2"));
        assert_eq!(c.output().readout, "C");
    }

    #[test]
    fn failed_resolution_retains_previous_output() {
        let mut c = controller();
        c.dispatch(ViewSource::Volcano, click(0));
        let before = c.output().clone();

        assert_eq!(
            c.dispatch(ViewSource::Volcano, click(99)),
            Dispatch::Retained(DashError::IndexOutOfRange { index: 99, len: 4 })
        );
        assert!(matches!(
            c.dispatch(ViewSource::GeneSearch, select("G9")),
            Dispatch::Retained(DashError::NotFound(_))
        ));
        assert_eq!(c.output(), &before);
        assert_eq!(c.state().selected().map(|r| r.pas_name.as_str()), Some("A"));
        assert_eq!(c.revision(), 1);
    }

    #[test]
    fn failure_before_any_selection_keeps_default() {
        let mut c = controller();
        assert!(matches!(
            c.dispatch(ViewSource::GeneSearch, select("G9")),
            Dispatch::Retained(_)
        ));
        assert_eq!(c.state(), &ViewState::Default);
        assert_eq!(c.output(), c.default_output());
    }

    #[test]
    fn malformed_record_is_retained() {
        let mut c = controller();
        assert!(matches!(
            c.dispatch(ViewSource::Volcano, click(3)),
            Dispatch::Retained(DashError::MalformedRecord { .. })
        ));
        assert_eq!(c.state(), &ViewState::Default);
    }

    #[test]
    fn same_event_twice_is_idempotent() {
        let mut c = controller();
        c.dispatch(ViewSource::GeneSearch, select("G1"));
        let first = c.output().clone();
        c.dispatch(ViewSource::GeneSearch, select("G1"));
        assert_eq!(c.output(), &first);
        assert_eq!(c.revision(), 2);
    }

    #[test]
    fn absent_payload_is_idle() {
        let mut c = controller();
        assert_eq!(c.dispatch(ViewSource::Volcano, None), Dispatch::Idle);
        assert_eq!(c.dispatch_payload(ViewSource::Volcano, None), Dispatch::Idle);
        assert_eq!(
            c.dispatch_payload(ViewSource::GeneSearch, Some(&serde_json::Value::Null)),
            Dispatch::Idle
        );
        assert_eq!(
            c.dispatch_payload(ViewSource::GeneSearch, Some(&json!({"selectedValue": null}))),
            Dispatch::Idle
        );
        assert_eq!(c.state(), &ViewState::Default);
    }

    #[test]
    fn payloads_resolve_like_events() {
        let mut c = controller();
        c.dispatch_payload(ViewSource::MeanExpression, Some(&json!({"pointIndex": 2})));
        assert_eq!(c.output().readout, "C");
        c.dispatch_payload(
            ViewSource::Volcano,
            Some(&json!({"points": [{"pointNumber": 1, "curveNumber": 0}]})),
        );
        assert_eq!(c.output().readout, "B");
        c.dispatch_payload(ViewSource::GeneSearch, Some(&json!({"selectedValue": "G1"})));
        assert_eq!(c.output().readout, "A");
    }

    #[test]
    fn mismatched_source_is_rejected() {
        let mut c = controller();
        assert!(matches!(
            c.dispatch(ViewSource::GeneSearch, click(0)),
            Dispatch::Retained(DashError::InvalidPayload(_))
        ));
        assert!(matches!(
            c.dispatch_payload(ViewSource::Volcano, Some(&json!({"bogus": true}))),
            Dispatch::Retained(DashError::InvalidPayload(_))
        ));
        assert_eq!(c.revision(), 0);
    }
}
