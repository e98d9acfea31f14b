use serde::{Deserialize, Serialize};
use std::fmt;

/// Cellular compartment a TPM measurement was taken in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compartment {
    Soma,
    Projection,
}

impl Compartment {
    /// Display order used by the bar summary.
    pub const ORDER: [Compartment; 2] = [Compartment::Soma, Compartment::Projection];

    pub fn label(&self) -> &'static str {
        match self {
            Compartment::Soma => "Soma",
            Compartment::Projection => "Projection",
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single compartment measurement in TPM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompartmentSample {
    pub compartment: Compartment,
    pub value: f64,
}

impl CompartmentSample {
    pub fn new(compartment: Compartment, value: f64) -> Self {
        Self { compartment, value }
    }
}
