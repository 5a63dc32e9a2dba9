use anyhow::Result;
use aura_core::view::DeleteOutcome;
use owo_colors::OwoColorize;

use super::{confirmer, report, View};

pub fn run(view: &mut View, id: &str, yes: bool) -> Result<()> {
    let name = view.store().event_by_id(id).map(|e| e.name.clone());

    match view.delete(id, &mut confirmer(yes)) {
        DeleteOutcome::Cancelled => println!("{}", "  Cancelled".dimmed()),
        DeleteOutcome::Deleted(deleted) => {
            match (&name, deleted.value) {
                (Some(name), true) => println!("{}", format!("  Deleted: {}", name).red()),
                _ => println!("{}", format!("  No event with id {}", id).dimmed()),
            }
            report(&deleted);
        }
    }

    Ok(())
}
