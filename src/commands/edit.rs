use anyhow::Result;
use aura_core::view::EventForm;
use dialoguer::Input;
use owo_colors::OwoColorize;

use super::{describe, fetch_weather, report, resolve_location, View};
use crate::render::RenderOn;
use crate::utils::date::parse_date;

pub struct EditArgs {
    pub id: String,
    pub name: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
    pub city: Option<String>,
    pub weather: bool,
}

impl EditArgs {
    fn has_changes(&self) -> bool {
        self.name.is_some()
            || self.date.is_some()
            || self.location.is_some()
            || self.city.is_some()
            || self.weather
    }
}

pub fn run(view: &mut View, args: EditArgs) -> Result<()> {
    let Some(event) = view.store().event_by_id(&args.id) else {
        anyhow::bail!("Event '{}' not found. List ids with: aura events --all", args.id);
    };

    let mut form = EventForm::from_event(event);
    // Weather is only replaced when asked for
    form.weather = None;

    if args.has_changes() {
        if let Some(name) = args.name {
            form.name = name;
        }
        if let Some(date) = args.date {
            form.date = parse_date(&date)?;
        }
        if let Some(location) = resolve_location(args.location, args.city)? {
            form.location = location;
        }
    } else {
        prompt_changes(&mut form)?;
    }

    if args.weather {
        form.weather = Some(fetch_weather(&form.location, form.date));
    }

    let saved = view.submit(form, Some(&args.id)).map_err(describe)?;

    println!("{}", format!("  Updated: {}", saved.value.name).yellow());
    println!("{}", saved.value.render_on(view.store().today()));
    report(&saved);

    Ok(())
}

/// Walk through each field with the current value pre-filled.
fn prompt_changes(form: &mut EventForm) -> Result<()> {
    form.name = Input::new()
        .with_prompt("  Name")
        .with_initial_text(form.name.clone())
        .interact_text()?;

    loop {
        let input: String = Input::new()
            .with_prompt("  When?")
            .with_initial_text(form.date.format("%Y-%m-%d").to_string())
            .interact_text()?;
        match parse_date(&input) {
            Ok(date) => {
                form.date = date;
                break;
            }
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }

    let current = form.location.display_name().to_string();
    let text: String = Input::new()
        .with_prompt("  Where?")
        .with_initial_text(current.clone())
        .interact_text()?;
    if text != current {
        if let Some(location) = resolve_location(Some(text), None)? {
            form.location = location;
        }
    }

    Ok(())
}
