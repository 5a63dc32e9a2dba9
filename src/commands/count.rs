use anyhow::Result;

use super::View;
use crate::render::Render;

pub fn run(view: &View, json: bool) -> Result<()> {
    let counts = view.counts();

    if json {
        println!("{}", serde_json::to_string(&counts)?);
    } else {
        println!("{}", counts.render());
    }

    Ok(())
}
