use anyhow::Result;
use aura_core::forecast::{self, WeeklyForecast};
use owo_colors::OwoColorize;

use super::View;
use crate::chat::{self, ChatMessage, ChatRelay};
use crate::config::AuraConfig;
use crate::utils::tui;

pub async fn run(view: &View, config: &AuraConfig, question: &str, day: Option<&str>) -> Result<()> {
    if question.trim().is_empty() {
        anyhow::bail!("Ask Aura something, e.g.: aura ask \"Will my hike get rained out?\"");
    }

    let store = view.store();
    let today = store.today();
    let selected_day = day.map_or_else(|| forecast::weekday_name(today), str::to_string);
    let context = forecast::weather_context(&WeeklyForecast::sample(), &selected_day, view.upcoming(), today);
    tracing::debug!(%context, "weather context");

    let messages = [
        ChatMessage::system(forecast::ASSISTANT_INSTRUCTION),
        ChatMessage::user(forecast::chat_prompt(&context, question.trim())),
    ];

    let session_id = chat::session_id(store.storage())?;
    let relay = ChatRelay::new(&config.api_base)?;

    match tui::awaiting("Asking Aura...", relay.send(&session_id, &messages)).await {
        Ok(reply) => {
            println!("{}", "Aura".bold().magenta());
            println!("{}", reply.trim());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", "Aura could not answer right now.".red());
            Err(e)
        }
    }
}
