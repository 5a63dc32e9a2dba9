//! Event presentation adapter.
//!
//! Sits between user actions (submit a form, press delete) and the
//! `EventStore`. After every mutation both lists are queried again from the
//! store; view state is never patched in place.

use chrono::NaiveDate;
use tracing::debug;

use crate::clock::Clock;
use crate::error::{AuraError, AuraResult, ValidationError};
use crate::event::{Event, EventLocation, EventUpdate};
use crate::storage::Storage;
use crate::store::{EventStore, EventsCount, Persisted};
use crate::weather::WeatherSnapshot;

/// Data entered in the create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub date: NaiveDate,
    pub location: EventLocation,
    pub weather: Option<WeatherSnapshot>,
}

impl EventForm {
    pub fn new(name: impl Into<String>, date: NaiveDate, location: impl Into<EventLocation>) -> Self {
        EventForm {
            name: name.into(),
            date,
            location: location.into(),
            weather: None,
        }
    }

    pub fn with_weather(mut self, weather: WeatherSnapshot) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Pre-fill the form from an existing event.
    pub fn from_event(event: &Event) -> Self {
        EventForm {
            name: event.name.clone(),
            date: event.date,
            location: event.location.clone(),
            weather: event.weather.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.location.is_blank() {
            return Err(ValidationError::MissingLocation);
        }
        Ok(())
    }

    fn into_update(self) -> EventUpdate {
        let update = EventUpdate::default()
            .name(self.name.trim())
            .date(self.date)
            .location(self.location);
        match self.weather {
            Some(weather) => update.weather(weather),
            None => update,
        }
    }
}

/// Asks the user to confirm a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Cancelled,
    /// The value is false if the id was not in the store.
    Deleted(Persisted<bool>),
}

pub struct EventsView<S, C> {
    store: EventStore<S, C>,
    upcoming: Vec<Event>,
    past: Vec<Event>,
}

impl<S: Storage, C: Clock> EventsView<S, C> {
    pub fn mount(store: EventStore<S, C>) -> Self {
        let mut view = EventsView {
            store,
            upcoming: Vec::new(),
            past: Vec::new(),
        };
        view.refresh();
        view
    }

    pub fn upcoming(&self) -> &[Event] {
        &self.upcoming
    }

    pub fn past(&self) -> &[Event] {
        &self.past
    }

    pub fn counts(&self) -> EventsCount {
        self.store.events_count()
    }

    pub fn store(&self) -> &EventStore<S, C> {
        &self.store
    }

    /// Re-derive both lists from the store.
    pub fn refresh(&mut self) {
        self.upcoming = self.store.upcoming_events().into_iter().cloned().collect();
        self.past = self.store.past_events().into_iter().cloned().collect();
        debug!(upcoming = self.upcoming.len(), past = self.past.len(), "refreshed event lists");
    }

    /// Create an event, or update `editing` when set. Invalid forms are
    /// rejected before the store is touched.
    pub fn submit(&mut self, form: EventForm, editing: Option<&str>) -> AuraResult<Persisted<Event>> {
        form.validate()?;

        let saved = match editing {
            Some(id) => self
                .store
                .update_event(id, form.into_update())
                .ok_or_else(|| AuraError::EventNotFound(id.to_string()))?,
            None => self.store.add_event(
                form.name.trim().to_string(),
                form.date,
                form.location,
                form.weather,
            ),
        };

        self.refresh();
        Ok(saved)
    }

    pub fn delete(&mut self, id: &str, confirm: &mut impl Confirm) -> DeleteOutcome {
        let prompt = match self.store.event_by_id(id) {
            Some(event) => format!("Delete \"{}\"?", event.name),
            None => format!("Delete event {}?", id),
        };

        if !confirm.confirm(&prompt) {
            return DeleteOutcome::Cancelled;
        }

        let deleted = self.store.delete_event(id);
        self.refresh();
        DeleteOutcome::Deleted(deleted)
    }

    pub fn clear(&mut self, confirm: &mut impl Confirm) -> Option<Persisted<()>> {
        let count = self.store.events_count().total;
        if !confirm.confirm(&format!("Delete all {} events?", count)) {
            return None;
        }

        let cleared = self.store.clear_all();
        self.refresh();
        Some(cleared)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::storage::MemoryStorage;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 4).unwrap()
    }

    fn days(n: i64) -> NaiveDate {
        today() + Duration::days(n)
    }

    fn mount(storage: &MemoryStorage) -> EventsView<MemoryStorage, FixedClock> {
        EventsView::mount(EventStore::with_clock(storage.clone(), FixedClock::on(today())))
    }

    fn names(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_mount_loads_existing_events() {
        let storage = MemoryStorage::new();
        {
            let mut view = mount(&storage);
            let _ = view.submit(EventForm::new("Hiking Trip", days(7), "Denver"), None).unwrap();
            let _ = view.submit(EventForm::new("Picnic", days(-2), "Austin"), None).unwrap();
        }

        let view = mount(&storage);
        assert_eq!(names(view.upcoming()), vec!["Hiking Trip"]);
        assert_eq!(names(view.past()), vec!["Picnic"]);
    }

    #[test]
    fn test_submit_create_refreshes_lists() {
        let mut view = mount(&MemoryStorage::new());
        let created = view
            .submit(EventForm::new("  Camping  ", days(3), "Seattle"), None)
            .unwrap()
            .into_value();

        assert_eq!(created.name, "Camping");
        assert_eq!(view.upcoming(), &[created]);
        assert!(view.past().is_empty());
    }

    #[test]
    fn test_submit_edit_updates_existing_event() {
        let mut view = mount(&MemoryStorage::new());
        let created = view
            .submit(EventForm::new("Camping", days(3), "Seattle"), None)
            .unwrap()
            .into_value();

        let mut form = EventForm::from_event(&created);
        form.date = days(-1);
        let _ = view.submit(form, Some(&created.id)).unwrap();

        assert!(view.upcoming().is_empty());
        assert_eq!(view.past().len(), 1);
        assert_eq!(view.past()[0].id, created.id);
        assert_eq!(view.counts().total, 1);
    }

    #[test]
    fn test_edit_without_weather_keeps_snapshot() {
        let weather = WeatherSnapshot::new(
            20.0,
            8.0,
            10.0,
            3.0,
            45.0,
            "Perfect weather for outdoor activities! Don't forget sunscreen.",
        );
        let mut view = mount(&MemoryStorage::new());
        let created = view
            .submit(EventForm::new("Beach", days(2), "Miami").with_weather(weather.clone()), None)
            .unwrap()
            .into_value();

        let edited = view
            .submit(EventForm::new("Beach day", days(2), "Miami"), Some(&created.id))
            .unwrap()
            .into_value();
        assert_eq!(edited.weather, Some(weather));
    }

    #[test]
    fn test_submit_rejects_invalid_forms() {
        let storage = MemoryStorage::new();
        let mut view = mount(&storage);

        let err = view.submit(EventForm::new("   ", days(1), "Paris"), None).unwrap_err();
        assert!(matches!(err, AuraError::Validation(ValidationError::EmptyName)));

        let err = view.submit(EventForm::new("Trip", days(1), ""), None).unwrap_err();
        assert!(matches!(err, AuraError::Validation(ValidationError::MissingLocation)));

        assert_eq!(view.counts().total, 0);
        assert_eq!(storage.get(crate::storage::EVENTS_KEY).unwrap(), None);
    }

    #[test]
    fn test_submit_edit_unknown_id() {
        let mut view = mount(&MemoryStorage::new());
        let err = view
            .submit(EventForm::new("Trip", days(1), "Paris"), Some("missing"))
            .unwrap_err();
        assert!(matches!(err, AuraError::EventNotFound(id) if id == "missing"));
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let mut view = mount(&MemoryStorage::new());
        let created = view
            .submit(EventForm::new("Camping", days(3), "Seattle"), None)
            .unwrap()
            .into_value();

        let mut prompts = Vec::new();
        let outcome = view.delete(&created.id, &mut |prompt: &str| {
            prompts.push(prompt.to_string());
            false
        });
        assert!(matches!(outcome, DeleteOutcome::Cancelled));
        assert_eq!(prompts, vec!["Delete \"Camping\"?".to_string()]);
        assert_eq!(view.upcoming().len(), 1);

        let outcome = view.delete(&created.id, &mut |_: &str| true);
        assert!(matches!(outcome, DeleteOutcome::Deleted(ref d) if d.value));
        assert!(view.upcoming().is_empty());
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut view = mount(&MemoryStorage::new());
        let _ = view.submit(EventForm::new("A", days(1), "x"), None).unwrap();
        let _ = view.submit(EventForm::new("B", days(-1), "x"), None).unwrap();

        assert!(view.clear(&mut |_: &str| false).is_none());
        assert_eq!(view.counts().total, 2);

        assert!(view.clear(&mut |_: &str| true).is_some());
        assert!(view.upcoming().is_empty());
        assert!(view.past().is_empty());
    }
}
