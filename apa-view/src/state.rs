//! Displayed state and the output handed back to the view layer.

use apa_core::record::Record;
use apa_data::BarFigure;
use serde::Serialize;

/// What the bar summary is currently showing.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Nothing selected yet; the configured default row is shown.
    Default,
    /// The record resolved from the most recent successful event.
    Selected(Record),
}

impl ViewState {
    pub fn selected(&self) -> Option<&Record> {
        match self {
            ViewState::Default => None,
            ViewState::Selected(record) => Some(record),
        }
    }
}

/// Everything the view layer renders for the bar summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewOutput {
    /// Bar chart data.
    pub figure: BarFigure,
    /// Site identifier of the displayed record, for the text readout.
    pub readout: String,
}
