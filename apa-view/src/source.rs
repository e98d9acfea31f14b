//! Interactive components that feed the bar summary.

use apa_core::event::InteractionEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A component whose interactions update the bar summary.
///
/// Serialized as the component id the view layer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewSource {
    /// Volcano scatter (log2FC vs -ln padj).
    #[serde(rename = "volcano")]
    Volcano,
    /// baseMean vs log2FC scatter.
    #[serde(rename = "logplot")]
    MeanExpression,
    /// Searchable gene dropdown.
    #[serde(rename = "gene-selection")]
    GeneSearch,
}

impl ViewSource {
    /// Every bound source.
    pub const ALL: [ViewSource; 3] = [
        ViewSource::Volcano,
        ViewSource::MeanExpression,
        ViewSource::GeneSearch,
    ];

    pub fn component_id(&self) -> &'static str {
        match self {
            ViewSource::Volcano => "volcano",
            ViewSource::MeanExpression => "logplot",
            ViewSource::GeneSearch => "gene-selection",
        }
    }

    /// Charts emit point clicks; the dropdown emits gene selections.
    pub fn accepts(&self, event: &InteractionEvent) -> bool {
        match (self, event) {
            (ViewSource::Volcano | ViewSource::MeanExpression, InteractionEvent::PointClick { .. }) => true,
            (ViewSource::GeneSearch, InteractionEvent::CategorySelect { .. }) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ViewSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.component_id())
    }
}

impl FromStr for ViewSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewSource::ALL
            .into_iter()
            .find(|source| source.component_id() == s)
            .ok_or_else(|| format!("unknown view source '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_ids_round_trip() {
        for source in ViewSource::ALL {
            assert_eq!(source.component_id().parse::<ViewSource>(), Ok(source));
        }
        assert!("bars".parse::<ViewSource>().is_err());
    }

    #[test]
    fn charts_accept_clicks_and_dropdown_accepts_genes() {
        let click = InteractionEvent::PointClick { ordinal_index: 0 };
        let select = InteractionEvent::CategorySelect {
            gene_name: "G1".to_string(),
        };
        assert!(ViewSource::Volcano.accepts(&click));
        assert!(ViewSource::MeanExpression.accepts(&click));
        assert!(!ViewSource::GeneSearch.accepts(&click));
        assert!(ViewSource::GeneSearch.accepts(&select));
        assert!(!ViewSource::Volcano.accepts(&select));
    }
}
