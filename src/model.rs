use serde::{Deserialize, Serialize};

/// Numeric identifier assigned to an event by the remote service
pub type EventId = i64;

/// Prefix used for row identity markers in the rendered table
pub const ROW_MARKER_PREFIX: &str = "event_";

/// A scheduled event confirmed by the remote service.
///
/// Dates travel as ISO-format strings and are not interpreted client-side;
/// the remote service is the validator of record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Server-assigned identifier, unique within the collection
    pub id: EventId,
    pub event_name: String,
    pub start_date: String,
    pub end_date: String,
}

/// Field values for an event the server has not yet confirmed.
///
/// Used as the request body for create and update; never carries an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub event_name: String,
    pub start_date: String,
    pub end_date: String,
}

impl Event {
    /// The identity marker carried by this event's rendered row
    pub fn row_marker(&self) -> String {
        format!("{}{}", ROW_MARKER_PREFIX, self.id)
    }

    /// The editable field values of this event
    pub fn draft(&self) -> EventDraft {
        EventDraft {
            event_name: self.event_name.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

/// Recover the numeric event id from a row marker.
///
/// Markers come from the UI as text; comparisons against stored ids happen
/// only after this numeric coercion.
pub fn parse_row_marker(marker: &str) -> Option<EventId> {
    marker.strip_prefix(ROW_MARKER_PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_marker_round_trips_through_text() {
        let event = Event {
            id: 3,
            event_name: "Standup".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-01".to_string(),
        };
        let marker = event.row_marker();
        assert_eq!(marker, "event_3");
        assert_eq!(parse_row_marker(&marker), Some(3));
    }

    #[test]
    fn parse_rejects_foreign_markers() {
        assert_eq!(parse_row_marker("row_3"), None);
        assert_eq!(parse_row_marker("event_"), None);
        assert_eq!(parse_row_marker("event_abc"), None);
    }

    #[test]
    fn wire_format_uses_camel_case() {
        let event = Event {
            id: 7,
            event_name: "Standup".to_string(),
            start_date: "2024-01-01".to_string(),
            end_date: "2024-01-02".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["eventName"], "Standup");
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["endDate"], "2024-01-02");
    }
}
