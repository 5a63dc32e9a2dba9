//! Serialized form of an event.
//!
//! ```json
//! {"id":"event_1728000000000_k3j9x0a1b","name":"Trip","date":"2025-10-11",
//!  "location":"Paris","weather":null,"createdAt":"2025-10-04T12:00:00.000Z",
//!  "updatedAt":"2025-10-04T12:00:00.000Z","status":"upcoming"}
//! ```
//!
//! `status` is written so the stored payload can be inspected by hand. It is
//! ignored when reading: the status of a loaded event depends on today's
//! date, not on the day it was saved.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::event::{Event, EventLocation, EventStatus};
use crate::weather::WeatherSnapshot;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: String,
    pub name: String,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub location: EventLocation,
    #[serde(default)]
    pub weather: Option<WeatherSnapshot>,
    #[serde(with = "iso_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_timestamp")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "advisory_status")]
    pub status: Option<EventStatus>,
}

impl EventRecord {
    pub fn from_event(event: &Event, today: NaiveDate) -> Self {
        EventRecord {
            id: event.id.clone(),
            name: event.name.clone(),
            date: event.date,
            location: event.location.clone(),
            weather: event.weather.clone(),
            created_at: event.created_at,
            updated_at: event.updated_at,
            status: Some(event.status_on(today)),
        }
    }

    pub fn into_event(self) -> Event {
        Event {
            id: self.id,
            name: self.name,
            date: self.date,
            location: self.location,
            weather: self.weather,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Unknown or malformed status values are dropped rather than failing the
/// whole record.
fn advisory_status<'de, D>(deserializer: D) -> Result<Option<EventStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Calendar dates. Written as `YYYY-MM-DD`; also read from full ISO-8601
/// date-times as produced by browsers (`2025-10-11T00:00:00.000Z`), taking
/// the local calendar date of that instant.
mod iso_date {
    use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse(&s).ok_or_else(|| de::Error::custom(format!("invalid date '{}'", s)))
    }

    pub(super) fn parse(s: &str) -> Option<NaiveDate> {
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Some(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Local).date_naive());
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|dt| dt.date())
    }
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix.
mod iso_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| de::Error::custom(format!("invalid timestamp '{}': {}", s, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_record_field_names() {
        let created = Utc.with_ymd_and_hms(2025, 10, 4, 12, 0, 0).unwrap();
        let event = Event {
            id: "event_1_a".to_string(),
            name: "Trip".to_string(),
            date: day(2025, 10, 11),
            location: EventLocation::from("Paris"),
            weather: None,
            created_at: created,
            updated_at: created,
        };

        let json = serde_json::to_value(EventRecord::from_event(&event, day(2025, 10, 4))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "event_1_a",
                "name": "Trip",
                "date": "2025-10-11",
                "location": "Paris",
                "weather": null,
                "createdAt": "2025-10-04T12:00:00.000Z",
                "updatedAt": "2025-10-04T12:00:00.000Z",
                "status": "upcoming"
            })
        );
    }

    #[test]
    fn test_reads_browser_date_strings() {
        assert_eq!(iso_date::parse("2025-10-11"), Some(day(2025, 10, 11)));
        assert_eq!(iso_date::parse("2025-10-11T12:00:00.000Z"), Some(day(2025, 10, 11)));
        assert_eq!(iso_date::parse("2025-10-11T08:30:00"), Some(day(2025, 10, 11)));
        assert_eq!(iso_date::parse("next tuesday"), None);
    }

    #[test]
    fn test_unknown_status_is_ignored() {
        let raw = r#"{"id":"e","name":"n","date":"2025-10-11","location":"x",
            "createdAt":"2025-10-04T12:00:00.000Z","updatedAt":"2025-10-04T12:00:00.000Z",
            "status":"someday"}"#;
        let record: EventRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.status, None);
        assert_eq!(record.weather, None);
    }

    #[test]
    fn test_invalid_timestamp_is_rejected() {
        let raw = r#"{"id":"e","name":"n","date":"2025-10-11","location":"x",
            "createdAt":"yesterday","updatedAt":"2025-10-04T12:00:00.000Z"}"#;
        assert!(serde_json::from_str::<EventRecord>(raw).is_err());
    }
}
