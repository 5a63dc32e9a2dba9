use anyhow::Result;
use owo_colors::OwoColorize;

use super::{confirmer, report, View};

pub fn run(view: &mut View, yes: bool) -> Result<()> {
    let total = view.counts().total;
    if total == 0 {
        println!("{}", "Nothing to clear".dimmed());
        return Ok(());
    }

    match view.clear(&mut confirmer(yes)) {
        Some(cleared) => {
            println!(
                "{}",
                format!("  Deleted {} {}", total, if total == 1 { "event" } else { "events" }).red()
            );
            report(&cleared);
        }
        None => println!("{}", "  Cancelled".dimmed()),
    }

    Ok(())
}
