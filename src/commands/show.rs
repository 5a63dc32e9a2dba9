use anyhow::Result;

use super::View;
use crate::render::render_details;

pub fn run(view: &View, id: &str) -> Result<()> {
    let store = view.store();
    let Some(event) = store.event_by_id(id) else {
        anyhow::bail!("Event '{}' not found. List ids with: aura events --all", id);
    };

    println!("{}", render_details(event, store.today()));
    Ok(())
}
