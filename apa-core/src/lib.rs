//! Core types for the APA differential-expression explorer.
//!
//! - `record`: one row of the differential-expression dataset
//! - `compartment`: the Soma/Projection measurement pair
//! - `event`: interaction events and the raw payloads the view layer sends
//! - `error`: the error taxonomy shared by every crate in the workspace

pub mod compartment;
pub mod error;
pub mod event;
pub mod record;
