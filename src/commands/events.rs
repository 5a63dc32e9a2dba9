use anyhow::Result;
use owo_colors::OwoColorize;

use super::View;
use crate::render::{Render, RenderOn};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Upcoming,
    Past,
    All,
}

pub fn run(view: &View, listing: Listing) -> Result<()> {
    let today = view.store().today();

    let (title, events) = match listing {
        Listing::Upcoming => ("Upcoming", view.upcoming().iter().collect::<Vec<_>>()),
        Listing::Past => ("Past", view.past().iter().collect()),
        Listing::All => ("All events", view.store().all_events()),
    };

    println!("{} {}", title.bold(), format!("({})", view.counts().render()).dimmed());

    if events.is_empty() {
        println!("{}", "  No events found".dimmed());
        if listing == Listing::Upcoming {
            println!(
                "{}",
                "  Create one with: aura new \"Hiking Trip\" --date tomorrow --city Denver".dimmed()
            );
        }
        return Ok(());
    }

    for event in events {
        println!("{}", event.render_on(today));
        println!("{:>15}{}", "", event.id.dimmed());
    }

    Ok(())
}
