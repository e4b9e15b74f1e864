//! Human-readable summary of an EONET events payload.
//!
//! Reads only the fields it needs and falls back to placeholders when they
//! are missing; the payload itself is never validated.

use serde_json::Value;
use std::fmt;

const UNKNOWN: &str = "Unknown";

/// One event, reduced to what a person wants to see.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    /// 1-based position in the listing.
    pub index: usize,
    pub id: String,
    pub title: String,
    /// Title of the first category, or "Unknown".
    pub category: String,
    /// Date of the latest geometry, else the first one, else "Unknown".
    pub date: String,
    /// Coordinates of the latest geometry (for points: `[lon, lat]`).
    pub coordinates: Option<Vec<f64>>,
    pub magnitude: Option<f64>,
    pub magnitude_unit: Option<String>,
    pub link: String,
}

/// Summarizes the `events` array of an EONET response. Anything else yields an empty list.
pub fn summarize(payload: &Value) -> Vec<EventSummary> {
    let events = match payload.get("events").and_then(Value::as_array) {
        Some(ev) => ev,
        None => return Vec::new(),
    };
    events
        .iter()
        .enumerate()
        .map(|(i, ev)| summarize_event(i + 1, ev))
        .collect()
}

fn summarize_event(index: usize, ev: &Value) -> EventSummary {
    let geometry = ev.get("geometry").and_then(Value::as_array);
    let latest = geometry.and_then(|g| g.last());
    let first = geometry.and_then(|g| g.first());

    let date = latest
        .and_then(|g| str_field(g, "date"))
        .or_else(|| first.and_then(|g| str_field(g, "date")))
        .unwrap_or(UNKNOWN)
        .to_string();

    // Polygons carry nested arrays and yield None.
    let coordinates = latest
        .and_then(|g| g.get("coordinates"))
        .and_then(Value::as_array)
        .and_then(|c| c.iter().map(Value::as_f64).collect::<Option<Vec<_>>>());

    let category = ev
        .get("categories")
        .and_then(Value::as_array)
        .and_then(|c| c.first())
        .and_then(|c| str_field(c, "title"))
        .unwrap_or(UNKNOWN)
        .to_string();

    EventSummary {
        index,
        id: str_field(ev, "id").unwrap_or_default().to_string(),
        title: str_field(ev, "title").unwrap_or(UNKNOWN).to_string(),
        category,
        date,
        coordinates,
        magnitude: latest
            .and_then(|g| g.get("magnitudeValue"))
            .and_then(Value::as_f64),
        magnitude_unit: latest
            .and_then(|g| str_field(g, "magnitudeUnit"))
            .map(str::to_string),
        link: str_field(ev, "link").unwrap_or_default().to_string(),
    }
}

fn str_field<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key).and_then(Value::as_str)
}

impl fmt::Display for EventSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} ({})", self.index, self.title, self.category)?;
        write!(f, "\n   - Date: {}", self.date)?;
        if let Some(m) = self.magnitude {
            let unit = self.magnitude_unit.as_deref().unwrap_or("kts");
            write!(f, "\n   - Magnitude: {} {}", m, unit)?;
        }
        if let Some([lon, lat, ..]) = self.coordinates.as_deref() {
            write!(f, "\n   - Location: [{}, {}]", lon, lat)?;
        }
        if !self.link.is_empty() {
            write!(f, "\n   - More info: {}", self.link)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wildfire() -> Value {
        json!({
            "id": "EONET_6512",
            "title": "Wildfire in Utah",
            "link": "https://eonet.gsfc.nasa.gov/api/v3/events/EONET_6512",
            "categories": [{"id": "wildfires", "title": "Wildfires"}],
            "geometry": [
                {"date": "2024-09-01T00:00:00Z", "type": "Point", "coordinates": [-112.1, 38.2],
                 "magnitudeValue": null, "magnitudeUnit": null},
                {"date": "2024-09-03T00:00:00Z", "type": "Point", "coordinates": [-112.3, 38.4],
                 "magnitudeValue": 1250.0, "magnitudeUnit": "acres"}
            ]
        })
    }

    #[test]
    fn summarize_uses_latest_geometry() {
        let s = summarize(&json!({"events": [wildfire()]}));
        assert_eq!(s.len(), 1);
        let e = &s[0];
        assert_eq!(e.index, 1);
        assert_eq!(e.id, "EONET_6512");
        assert_eq!(e.category, "Wildfires");
        assert_eq!(e.date, "2024-09-03T00:00:00Z");
        assert_eq!(e.coordinates.as_deref(), Some(&[-112.3, 38.4][..]));
        assert_eq!(e.magnitude, Some(1250.0));
        assert_eq!(e.magnitude_unit.as_deref(), Some("acres"));
    }

    #[test]
    fn summarize_tolerates_missing_fields() {
        let s = summarize(&json!({"events": [{"id": "EONET_1"}]}));
        let e = &s[0];
        assert_eq!(e.title, "Unknown");
        assert_eq!(e.category, "Unknown");
        assert_eq!(e.date, "Unknown");
        assert!(e.coordinates.is_none());
        assert!(e.magnitude.is_none());
    }

    #[test]
    fn summarize_without_events_is_empty() {
        assert!(summarize(&json!({"title": "EONET Events"})).is_empty());
        assert!(summarize(&json!([1, 2, 3])).is_empty());
        assert!(summarize(&json!({"events": "nope"})).is_empty());
    }

    #[test]
    fn polygon_coordinates_are_dropped() {
        let ev = json!({"geometry": [{"date": "d", "coordinates": [[[1.0, 2.0]]]}]});
        let s = summarize(&json!({"events": [ev]}));
        assert!(s[0].coordinates.is_none());
    }

    #[test]
    fn display_lists_details() {
        let s = summarize(&json!({"events": [wildfire()]}));
        let text = s[0].to_string();
        assert!(text.starts_with("1. Wildfire in Utah (Wildfires)"));
        assert!(text.contains("   - Date: 2024-09-03T00:00:00Z"));
        assert!(text.contains("   - Magnitude: 1250 acres"));
        assert!(text.contains("   - Location: [-112.3, 38.4]"));
        assert!(text.contains("   - More info: https://eonet.gsfc.nasa.gov/api/v3/events/EONET_6512"));
    }
}
