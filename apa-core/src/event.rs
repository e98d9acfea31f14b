//! Interaction events and the raw payloads the view layer delivers.
//!
//! The view layer hands over one of three JSON shapes:
//!
//! ```text
//! {"pointIndex": 2}                        point click
//! {"selectedValue": "Camk2a"}              dropdown selection (null when cleared)
//! {"points": [{"pointNumber": 2, ...}]}    native chart click data
//! ```
//!
//! A JSON `null` (or no payload at all) means no interaction has happened yet.

use crate::error::{DashError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// A user interaction that selects exactly one dataset row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionEvent {
    /// Click on a plotted point; the index is the point's plot order.
    PointClick { ordinal_index: usize },
    /// Gene chosen from the search dropdown.
    CategorySelect { gene_name: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct PointIndexPayload {
    #[serde(rename = "pointIndex")]
    point_index: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
struct SelectedValuePayload {
    // Present but nullable: `{}` must not parse as a cleared dropdown.
    #[serde(rename = "selectedValue", deserialize_with = "nullable")]
    selected_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ClickDataPayload {
    points: Vec<ClickPoint>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ClickPoint {
    #[serde(rename = "pointNumber")]
    point_number: usize,
}

fn nullable<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// A raw view-layer payload in one of the accepted shapes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum EventPayload {
    PointIndex(PointIndexPayload),
    SelectedValue(SelectedValuePayload),
    ClickData(ClickDataPayload),
}

impl EventPayload {
    fn into_event(self) -> Option<InteractionEvent> {
        match self {
            EventPayload::PointIndex(p) => Some(InteractionEvent::PointClick {
                ordinal_index: p.point_index,
            }),
            EventPayload::SelectedValue(p) => p
                .selected_value
                .map(|gene_name| InteractionEvent::CategorySelect { gene_name }),
            EventPayload::ClickData(p) => p.points.first().map(|point| {
                InteractionEvent::PointClick {
                    ordinal_index: point.point_number,
                }
            }),
        }
    }
}

/// Translate a view-layer payload into an interaction event.
///
/// Returns `Ok(None)` for an absent or `null` payload, a cleared dropdown and
/// click data without points. Any other shape is `InvalidPayload`.
pub fn event_from_payload(payload: Option<&serde_json::Value>) -> Result<Option<InteractionEvent>> {
    let value = match payload {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(v) => v,
    };
    let parsed = EventPayload::deserialize(value)
        .map_err(|_| DashError::InvalidPayload(value.to_string()))?;
    Ok(parsed.into_event())
}
