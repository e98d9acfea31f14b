/// Error types for the APA explorer
use thiserror::Error;

/// Main error type shared by the store, the selection pipeline and the view
/// controller.
///
/// `DataUnavailable` is fatal at startup. `IndexOutOfRange`, `NotFound` and
/// `InvalidPayload` are recoverable: the controller keeps the output it was
/// already showing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DashError {
    /// Dataset source unreachable, unreadable or missing required columns
    #[error("Dataset unavailable: {0}")]
    DataUnavailable(String),

    /// Clicked point index outside the plotted range
    #[error("Point index {index} out of range (dataset has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    /// No record matches the requested key
    #[error("No record found for {0}")]
    NotFound(String),

    /// A record is missing a measurement the summary needs
    #[error("Malformed record {pas_name}: missing {field}")]
    MalformedRecord { pas_name: String, field: &'static str },

    /// The view layer sent a payload in none of the accepted shapes
    #[error("Invalid interaction payload: {0}")]
    InvalidPayload(String),

    /// Unexpected failure of the backing store after a successful load
    #[error("Storage error: {0}")]
    Storage(String),
}

impl DashError {
    /// True for errors that only reject a single interaction.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            DashError::IndexOutOfRange { .. }
                | DashError::NotFound(_)
                | DashError::MalformedRecord { .. }
                | DashError::InvalidPayload(_)
        )
    }
}

/// Type alias for Results using DashError
pub type Result<T> = std::result::Result<T, DashError>;
