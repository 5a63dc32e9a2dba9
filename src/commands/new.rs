use anyhow::Result;
use aura_core::view::EventForm;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{describe, fetch_weather, report, resolve_location, View};
use crate::utils::date::parse_date;

pub struct NewArgs {
    pub name: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub weather: bool,
}

pub fn run(view: &mut View, args: NewArgs) -> Result<()> {
    let interactive = args.name.is_none() || args.date.is_none();

    // --- Name ---
    let name = match args.name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("  Name")
            .interact_text()?,
    };

    // --- Date ---
    let date = match args.date {
        Some(d) => parse_date(&d)?,
        None => prompt_date()?,
    };

    // --- Location ---
    let location = match resolve_location(args.location, args.city)? {
        Some(location) => Some(location),
        None if interactive => {
            let text: String = Input::new()
                .with_prompt("  Where?")
                .allow_empty(true)
                .interact_text()?;
            resolve_location(Some(text), None)?
        }
        None => None,
    };
    let location = location.unwrap_or_else(|| String::new().into());

    // --- Weather ---
    let mut form = EventForm::new(name, date, location);
    if let Err(e) = form.validate() {
        anyhow::bail!("{}", e.to_string().red());
    }
    if args.weather {
        let weather = fetch_weather(&form.location, date);
        form = form.with_weather(weather);
    }

    let saved = view.submit(form, None).map_err(describe)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", saved.value.name).green());
    println!("  {}", saved.value.id.dimmed());
    report(&saved);

    Ok(())
}

/// Prompt for a date, retrying on parse errors.
fn prompt_date() -> Result<chrono::NaiveDate> {
    loop {
        let input: String = Input::new()
            .with_prompt("  When?")
            .interact_text()?;
        match parse_date(&input) {
            Ok(date) => return Ok(date),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aura_core::storage::FileStorage;
    use aura_core::view::EventsView;
    use aura_core::EventStore;

    #[test]
    fn test_new_with_weather_attaches_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut view = EventsView::mount(EventStore::open(FileStorage::new(dir.path())));

        run(
            &mut view,
            NewArgs {
                name: Some("Hiking Trip".to_string()),
                date: Some("2030-10-11".to_string()),
                location: None,
                city: Some("Denver".to_string()),
                weather: true,
            },
        )
        .unwrap();

        let reloaded = EventStore::open(FileStorage::new(dir.path()));
        let events = reloaded.all_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name, "Hiking Trip");
        assert!(events[0].location.coordinates().is_some());
        assert!(events[0].weather.as_ref().and_then(|w| w.temperature()).is_some());
    }
}
