use anyhow::Result;
use aura_core::forecast::{self, WeeklyForecast};
use owo_colors::OwoColorize;

use super::View;
use crate::chat::{self, ChatMessage, ChatRelay, FALLBACK_REPLY};
use crate::config::AuraConfig;
use crate::utils::tui;

pub async fn run(view: &View, config: &AuraConfig) -> Result<()> {
    let weekly = WeeklyForecast::sample();
    let messages = [
        ChatMessage::system(forecast::IDEAS_INSTRUCTION),
        ChatMessage::user(forecast::ideas_prompt(&weekly)),
    ];

    let session_id = chat::session_id(view.store().storage())?;
    let relay = ChatRelay::new(&config.api_base)?;

    let reply = match tui::awaiting("Generating...", relay.send(&session_id, &messages)).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::warn!(error = %e, "could not fetch activity ideas");
            println!("{}", FALLBACK_REPLY.yellow());
            return Ok(());
        }
    };

    let ideas = forecast::parse_ideas(&reply);
    if ideas.is_empty() {
        println!("{}", "Aura had no suggestions this time.".dimmed());
        return Ok(());
    }

    println!("{}", "Aura's Suggestions".bold());
    for idea in ideas {
        println!("  • {}", idea);
    }

    Ok(())
}
