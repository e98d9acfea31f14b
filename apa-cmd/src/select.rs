//! Commands that push interaction events through the view controller.

use apa_core::event::InteractionEvent;
use apa_view::{Dispatch, ViewBindingController, ViewOutput, ViewSource};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// Resolve a single selection and print the resulting output as JSON.
///
/// A click index is routed through the volcano chart, a gene name through the
/// gene dropdown. Unlike replay, a rejected selection is an error here.
pub fn run_select<W: Write>(
    controller: &mut ViewBindingController,
    index: Option<usize>,
    gene: Option<String>,
    out: &mut W,
) -> anyhow::Result<()> {
    let (source, event) = match (index, gene) {
        (Some(ordinal_index), _) => (
            ViewSource::Volcano,
            InteractionEvent::PointClick { ordinal_index },
        ),
        (None, Some(gene_name)) => (
            ViewSource::GeneSearch,
            InteractionEvent::CategorySelect { gene_name },
        ),
        (None, None) => anyhow::bail!("either --index or --gene is required"),
    };

    if let Dispatch::Retained(err) = controller.dispatch(source, Some(event)) {
        return Err(err.into());
    }
    serde_json::to_writer(&mut *out, controller.output())?;
    writeln!(out)?;
    Ok(())
}

/// One line of a replay file.
#[derive(Debug, Deserialize)]
struct ReplayLine {
    source: ViewSource,
    #[serde(default)]
    payload: Option<serde_json::Value>,
}

/// Result of one replayed line, printed as a JSON line.
#[derive(Debug, Serialize)]
struct ReplayStep<'a> {
    line: usize,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    revision: u64,
    output: &'a ViewOutput,
}

/// Counts reported at the end of a replay.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub published: usize,
    pub idle: usize,
    pub rejected: usize,
}

/// Replay newline-delimited `{"source": ..., "payload": ...}` events.
///
/// The displayed output is printed after every line. Unparseable lines and
/// rejected events are reported and the replay continues.
pub fn run_replay<R: BufRead, W: Write>(
    controller: &mut ViewBindingController,
    input: R,
    out: &mut W,
) -> anyhow::Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (i, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        let (outcome, error) = match serde_json::from_str::<ReplayLine>(&line) {
            Ok(step) => match controller.dispatch_payload(step.source, step.payload.as_ref()) {
                Dispatch::Published => {
                    summary.published += 1;
                    ("published", None)
                }
                Dispatch::Idle => {
                    summary.idle += 1;
                    ("idle", None)
                }
                Dispatch::Retained(err) => {
                    summary.rejected += 1;
                    ("retained", Some(err.to_string()))
                }
            },
            Err(err) => {
                warn!("Line {}: not a replay event: {}", line_no, err);
                summary.rejected += 1;
                ("retained", Some(format!("unreadable line: {}", err)))
            }
        };

        let step = ReplayStep {
            line: line_no,
            outcome,
            error,
            revision: controller.revision(),
            output: controller.output(),
        };
        serde_json::to_writer(&mut *out, &step)?;
        writeln!(out)?;
    }

    info!(
        "Replay complete: {} published, {} idle, {} rejected",
        summary.published, summary.idle, summary.rejected
    );
    Ok(summary)
}
