//! TUI rendering traits for aura types.
//!
//! Extension traits that add colored terminal rendering to aura-core types
//! using owo_colors.

use aura_core::weather::metric_label;
use aura_core::{Event, EventStatus, EventsCount, WeatherSnapshot};
use chrono::NaiveDate;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Rendering that depends on the current date.
pub trait RenderOn {
    fn render_on(&self, today: NaiveDate) -> String;
}

impl Render for EventStatus {
    fn render(&self) -> String {
        match self {
            EventStatus::Today => "today".yellow().to_string(),
            EventStatus::Upcoming => "upcoming".magenta().to_string(),
            EventStatus::Past => "past".dimmed().to_string(),
        }
    }
}

impl Render for WeatherSnapshot {
    fn render(&self) -> String {
        format!(
            "{}°F • Wind {} mph • Rain {}%",
            metric_label(self.temperature()),
            metric_label(self.wind_speed()),
            metric_label(self.chance_of_rain())
        )
    }
}

impl Render for EventsCount {
    fn render(&self) -> String {
        format!(
            "{} total, {} upcoming, {} past",
            self.total.bold(),
            self.upcoming.magenta(),
            self.past.dimmed()
        )
    }
}

/// Badge shown next to an event name (e.g. "Today", "In 3 days")
fn badge(event: &Event, today: NaiveDate) -> String {
    let label = format!("[{}]", event.relative_time(today));
    match event.status_on(today) {
        EventStatus::Today => label.yellow().to_string(),
        EventStatus::Upcoming => label.magenta().to_string(),
        EventStatus::Past => label.dimmed().to_string(),
    }
}

impl RenderOn for Event {
    /// One-line summary, e.g. "Oct 11, 2025  Hiking Trip [In 7 days] @ Denver"
    fn render_on(&self, today: NaiveDate) -> String {
        let mut line = format!(
            "{:>13}  {} {} {}",
            self.formatted_date().dimmed(),
            self.name.bold(),
            badge(self, today),
            format!("@ {}", self.location).dimmed()
        );

        if let Some(weather) = &self.weather {
            line.push_str(&format!("\n{:>15}{}", "", weather.render().cyan()));
        }

        line
    }
}

/// Full details for a single event.
pub fn render_details(event: &Event, today: NaiveDate) -> String {
    let mut lines = vec![
        format!("{} {}", event.name.bold(), badge(event, today)),
        format!("  {} {}", "id:".dimmed(), event.id),
        format!("  {} {}", "date:".dimmed(), event.formatted_date()),
        format!("  {} {}", "status:".dimmed(), event.status_on(today).render()),
        format!("  {} {}", "location:".dimmed(), event.location),
    ];

    if let Some(c) = event.location.coordinates() {
        lines.push(format!("  {} {:.4}, {:.4}", "coordinates:".dimmed(), c.lat, c.lng));
    }

    match &event.weather {
        Some(w) => {
            lines.push(format!("  {} {}", "weather:".dimmed(), w.render()));
            lines.push(format!(
                "  {} UV {} • Humidity {}%",
                " ".repeat(8),
                metric_label(w.uv_index()),
                metric_label(w.humidity())
            ));
            if let Some(recommendation) = w.recommendation() {
                lines.push(format!("  {} {}", " ".repeat(8), recommendation.italic()));
            }
        }
        None => lines.push(format!("  {} {}", "weather:".dimmed(), "(none)".dimmed())),
    }

    lines.push(format!(
        "  {} {}",
        "created:".dimmed(),
        event.created_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
    ));
    lines.push(format!(
        "  {} {}",
        "updated:".dimmed(),
        event.updated_at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
    ));

    lines.join("\n")
}
