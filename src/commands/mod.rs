pub mod ask;
pub mod clear;
pub mod count;
pub mod delete;
pub mod edit;
pub mod events;
pub mod ideas;
pub mod locations;
pub mod new;
pub mod show;

use anyhow::{Context, Result};
use aura_core::location;
use aura_core::storage::FileStorage;
use aura_core::view::EventsView;
use aura_core::weather::{SimulatedWeather, WeatherSource};
use aura_core::{AuraError, EventLocation, EventStore, Persisted, SystemClock, WeatherSnapshot};
use chrono::NaiveDate;
use dialoguer::Confirm;
use owo_colors::OwoColorize;

use crate::config::AuraConfig;
use crate::utils::tui;

pub type View = EventsView<FileStorage, SystemClock>;

pub fn storage(config: &AuraConfig) -> FileStorage {
    FileStorage::new(config.data_path())
}

pub fn open_view(config: &AuraConfig) -> View {
    EventsView::mount(EventStore::open(storage(config)))
}

/// Print a non-fatal storage warning after a mutation.
pub fn report<T>(saved: &Persisted<T>) {
    if let Some(warning) = &saved.warning {
        eprintln!(
            "  {}",
            format!("Warning: {} (changes may not survive a restart)", warning).yellow()
        );
    }
}

/// Ask for confirmation unless `yes` was given.
pub fn confirmer(yes: bool) -> impl FnMut(&str) -> bool {
    move |prompt: &str| {
        yes || Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}

/// Resolve `--location`/`--city` into an event location. A free-text
/// location that names a predefined city gets its coordinates.
pub fn resolve_location(text: Option<String>, city: Option<String>) -> Result<Option<EventLocation>> {
    if let Some(city) = city {
        let found = location::by_city(&city).with_context(|| {
            let suggestions: Vec<&str> = location::search(&city).iter().map(|l| l.city).collect();
            if suggestions.is_empty() {
                format!("Unknown city '{}'. Run `aura locations` to list them.", city)
            } else {
                format!("Unknown city '{}'. Did you mean: {}?", city, suggestions.join(", "))
            }
        })?;
        return Ok(Some(found.to_event_location()));
    }

    Ok(text.map(|text| match location::by_city(&text) {
        Some(known) => known.to_event_location(),
        None => EventLocation::Text(text),
    }))
}

/// Fetch a weather snapshot for the given place and date.
pub fn fetch_weather(location: &EventLocation, date: NaiveDate) -> WeatherSnapshot {
    tui::while_spinning(&format!("Fetching weather for {}...", location), || {
        SimulatedWeather.snapshot(location.coordinates(), date)
    })
}

/// Turn a validation failure into a readable message.
pub fn describe(err: AuraError) -> anyhow::Error {
    match err {
        AuraError::Validation(v) => anyhow::anyhow!("{}", v.to_string().red()),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_city_text_gets_coordinates() {
        let location = resolve_location(Some("denver".to_string()), None).unwrap().unwrap();
        assert_eq!(location.display_name(), "Denver");
        assert!(location.coordinates().is_some());
    }

    #[test]
    fn test_resolve_free_text() {
        let location = resolve_location(Some("Grandma's house".to_string()), None).unwrap();
        assert_eq!(location, Some(EventLocation::Text("Grandma's house".to_string())));
    }

    #[test]
    fn test_resolve_unknown_city_suggests() {
        let err = resolve_location(None, Some("San".to_string())).unwrap_err();
        assert!(err.to_string().contains("San Francisco"));
    }

    #[test]
    fn test_confirmer_yes_skips_prompt() {
        let mut confirm = confirmer(true);
        assert!(confirm("Delete?"));
    }
}
