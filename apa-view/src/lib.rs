//! View bindings for the differential-expression explorer.
//!
//! This crate provides:
//! - `source`: the interactive components that can fire events
//! - `state`: the displayed state and the output handed back to the view
//! - `controller`: `ViewBindingController`, which routes every event source
//!   to the single shared bar summary

pub mod controller;
pub mod source;
pub mod state;

pub use controller::{Dispatch, ViewBindingController};
pub use source::ViewSource;
pub use state::{ViewOutput, ViewState};
