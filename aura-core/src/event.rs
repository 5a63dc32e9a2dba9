//! Event types.
//!
//! An `Event` is a plain record. Its status is never stored on it: callers
//! derive it from the event date and a "today" supplied by a `Clock`.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::weather::WeatherSnapshot;

/// A user-scheduled occasion tied to a location and a calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: String,
    pub name: String,
    /// Calendar date; time of day carries no meaning.
    pub date: NaiveDate,
    pub location: EventLocation,
    /// Captured when the event is created or edited, never refreshed.
    pub weather: Option<WeatherSnapshot>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    pub fn status_on(&self, today: NaiveDate) -> EventStatus {
        EventStatus::for_date(self.date, today)
    }

    /// Days until the event (positive) or since it (negative).
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }

    /// e.g. "Today", "Tomorrow", "In 3 days", "2 days ago"
    pub fn relative_time(&self, today: NaiveDate) -> String {
        match self.days_until(today) {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            -1 => "Yesterday".to_string(),
            d if d > 0 => format!("In {} days", d),
            d => format!("{} days ago", d.abs()),
        }
    }

    /// e.g. "Jan 15, 2025"
    pub fn formatted_date(&self) -> String {
        self.date.format("%b %-d, %Y").to_string()
    }

    /// Apply the provided fields. Returns true if the date changed.
    pub(crate) fn apply(&mut self, updates: EventUpdate) -> bool {
        let mut date_changed = false;

        if let Some(name) = updates.name {
            self.name = name;
        }
        if let Some(date) = updates.date {
            date_changed = date != self.date;
            self.date = date;
        }
        if let Some(location) = updates.location {
            self.location = location;
        }
        if let Some(weather) = updates.weather {
            self.weather = Some(weather);
        }

        date_changed
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Where an event is relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Today,
    Past,
}

impl EventStatus {
    pub fn for_date(date: NaiveDate, today: NaiveDate) -> Self {
        use std::cmp::Ordering;

        match date.cmp(&today) {
            Ordering::Greater => EventStatus::Upcoming,
            Ordering::Equal => EventStatus::Today,
            Ordering::Less => EventStatus::Past,
        }
    }

    /// Upcoming events include those happening today.
    pub fn is_upcoming(self) -> bool {
        matches!(self, EventStatus::Upcoming | EventStatus::Today)
    }

    pub fn is_past(self) -> bool {
        self == EventStatus::Past
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Today => "today",
            EventStatus::Past => "past",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event location: either free text or a named place with coordinates.
///
/// The store does not interpret it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventLocation {
    Text(String),
    Place {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coordinates: Option<Coordinates>,
        #[serde(
            default,
            rename = "displayName",
            skip_serializing_if = "Option::is_none"
        )]
        display_name: Option<String>,
    },
}

impl EventLocation {
    pub fn display_name(&self) -> &str {
        match self {
            EventLocation::Text(text) => text.as_str(),
            EventLocation::Place {
                name, display_name, ..
            } => {
                if !name.trim().is_empty() {
                    name.as_str()
                } else if let Some(display) = display_name.as_deref().filter(|d| !d.trim().is_empty()) {
                    display
                } else {
                    "Unknown location"
                }
            }
        }
    }

    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            EventLocation::Text(_) => None,
            EventLocation::Place { coordinates, .. } => *coordinates,
        }
    }

    /// True when nothing usable was entered.
    pub fn is_blank(&self) -> bool {
        match self {
            EventLocation::Text(text) => text.trim().is_empty(),
            EventLocation::Place {
                name, display_name, ..
            } => {
                name.trim().is_empty()
                    && display_name.as_deref().is_none_or(|d| d.trim().is_empty())
            }
        }
    }
}

impl From<&str> for EventLocation {
    fn from(text: &str) -> Self {
        EventLocation::Text(text.to_string())
    }
}

impl From<String> for EventLocation {
    fn from(text: String) -> Self {
        EventLocation::Text(text)
    }
}

impl fmt::Display for EventLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Fields to change on an existing event. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventUpdate {
    pub name: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<EventLocation>,
    pub weather: Option<WeatherSnapshot>,
}

impl EventUpdate {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn location(mut self, location: impl Into<EventLocation>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }
}

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate an event id: `event_<unix millis>_<9 random base36 chars>`.
pub fn generate_event_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();

    format!("event_{}_{}", now.timestamp_millis(), suffix)
}
