//! The event store.
//!
//! Owns the event collection and the only write path to the events slot.
//! Every mutation rewrites the whole snapshot; a failed write keeps the
//! change in memory and is reported back as a warning.

mod record;

pub use record::EventRecord;

use std::collections::HashSet;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{AuraError, AuraResult};
use crate::event::{generate_event_id, Event, EventLocation, EventStatus, EventUpdate};
use crate::storage::{Storage, EVENTS_KEY};
use crate::weather::WeatherSnapshot;

/// Result of a mutation. The mutation always applies in memory; `warning`
/// is set when the snapshot could not be written.
#[derive(Debug)]
#[must_use]
pub struct Persisted<T> {
    pub value: T,
    pub warning: Option<AuraError>,
}

impl<T> Persisted<T> {
    pub fn is_durable(&self) -> bool {
        self.warning.is_none()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EventsCount {
    pub total: usize,
    pub upcoming: usize,
    pub past: usize,
}

pub struct EventStore<S, C = SystemClock> {
    storage: S,
    clock: C,
    events: Vec<Event>,
}

impl<S: Storage> EventStore<S> {
    /// Open the store against `storage`, using the system clock.
    pub fn open(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: Storage, C: Clock> EventStore<S, C> {
    /// Open the store, loading any saved snapshot. A missing or unreadable
    /// snapshot yields an empty store.
    pub fn with_clock(storage: S, clock: C) -> Self {
        let events = load_events(&storage);
        EventStore {
            storage,
            clock,
            events,
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn status_of(&self, event: &Event) -> EventStatus {
        event.status_on(self.today())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add_event(
        &mut self,
        name: impl Into<String>,
        date: NaiveDate,
        location: impl Into<EventLocation>,
        weather: Option<WeatherSnapshot>,
    ) -> Persisted<Event> {
        let now = self.clock.now();

        let mut id = generate_event_id(now);
        while self.events.iter().any(|e| e.id == id) {
            id = generate_event_id(now);
        }

        let event = Event {
            id,
            name: name.into(),
            date,
            location: location.into(),
            weather,
            created_at: now,
            updated_at: now,
        };
        debug!(id = %event.id, status = %self.status_of(&event), "adding event");

        self.events.push(event.clone());
        Persisted {
            value: event,
            warning: self.persist(),
        }
    }

    /// Returns `None` if no event has this id.
    pub fn update_event(&mut self, id: &str, updates: EventUpdate) -> Option<Persisted<Event>> {
        let now = self.clock.now();
        let today = self.clock.today();
        let event = self.events.iter_mut().find(|e| e.id == id)?;

        if event.apply(updates) {
            debug!(id, status = %event.status_on(today), "event date changed");
        }

        // updated_at must advance even if the clock has not
        event.updated_at = if now > event.updated_at {
            now
        } else {
            event.updated_at + Duration::milliseconds(1)
        };

        let event = event.clone();
        Some(Persisted {
            value: event,
            warning: self.persist(),
        })
    }

    /// Remove the event with this id. Unknown ids are not an error; the value
    /// reports whether anything was removed.
    pub fn delete_event(&mut self, id: &str) -> Persisted<bool> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        let removed = self.events.len() != before;

        if !removed {
            debug!(id, "delete: no such event");
        }

        Persisted {
            value: removed,
            warning: self.persist(),
        }
    }

    pub fn clear_all(&mut self) -> Persisted<()> {
        self.events.clear();
        Persisted {
            value: (),
            warning: self.persist(),
        }
    }

    /// Upcoming and today's events, soonest first. Events on the same date
    /// keep insertion order.
    pub fn upcoming_events(&self) -> Vec<&Event> {
        let today = self.today();
        let mut events: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.status_on(today).is_upcoming())
            .collect();
        events.sort_by_key(|e| e.date);
        events
    }

    /// Past events, most recent first.
    pub fn past_events(&self) -> Vec<&Event> {
        let today = self.today();
        let mut events: Vec<&Event> = self
            .events
            .iter()
            .filter(|e| e.status_on(today).is_past())
            .collect();
        events.sort_by(|a, b| b.date.cmp(&a.date));
        events
    }

    /// All events, latest date first.
    pub fn all_events(&self) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by(|a, b| b.date.cmp(&a.date));
        events
    }

    pub fn event_by_id(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn events_count(&self) -> EventsCount {
        let today = self.today();
        let (upcoming, past) = self.events.iter().fold((0, 0), |(up, past), e| {
            match e.status_on(today) {
                EventStatus::Past => (up, past + 1),
                EventStatus::Upcoming | EventStatus::Today => (up + 1, past),
            }
        });

        EventsCount {
            total: self.events.len(),
            upcoming,
            past,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    fn persist(&self) -> Option<AuraError> {
        match self.save() {
            Ok(()) => None,
            Err(e) => {
                warn!(error = %e, "could not save events; changes are kept in memory only");
                Some(e)
            }
        }
    }

    fn save(&self) -> AuraResult<()> {
        let today = self.today();
        let records: Vec<EventRecord> = self
            .events
            .iter()
            .map(|e| EventRecord::from_event(e, today))
            .collect();

        let json = serde_json::to_string(&records)
            .map_err(|e| AuraError::Serialization(e.to_string()))?;
        self.storage.set(EVENTS_KEY, &json)?;

        debug!(count = records.len(), "saved events");
        Ok(())
    }
}

fn load_events<S: Storage>(storage: &S) -> Vec<Event> {
    match read_events(storage) {
        Ok(events) => {
            debug!(count = events.len(), "loaded events");
            events
        }
        Err(e) => {
            warn!(error = %e, "could not load saved events; starting empty");
            Vec::new()
        }
    }
}

fn read_events<S: Storage>(storage: &S) -> AuraResult<Vec<Event>> {
    let raw = match storage.get(EVENTS_KEY)? {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(Vec::new()),
    };

    let records: Vec<EventRecord> =
        serde_json::from_str(&raw).map_err(|e| AuraError::Serialization(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut events = Vec::with_capacity(records.len());
    for record in records {
        if !seen.insert(record.id.clone()) {
            warn!(id = %record.id, "skipping saved event with duplicate id");
            continue;
        }
        events.push(record.into_event());
    }

    Ok(events)
}
