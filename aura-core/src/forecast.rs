//! Weekly forecast and the weather context handed to the chat assistant.

use chrono::NaiveDate;

use crate::event::Event;
use crate::weather::metric_label;

pub const ASSISTANT_INSTRUCTION: &str = "You are Aura, a friendly, witty and empathetic AI weather assistant. \
Be concise and practical. Use the provided weather context.";

pub const IDEAS_INSTRUCTION: &str = "You are Aura, a friendly and helpful AI weather assistant. \
Your personality is a bit witty and empathetic. Your goal is to give creative and practical \
activity ideas based on the weather.";

#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    pub day: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Degrees Celsius.
    pub temp: i32,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyForecast {
    pub name: &'static str,
    pub temp: i32,
    pub wind: i32,
    pub rain: i32,
    pub days: Vec<DailyForecast>,
}

impl WeeklyForecast {
    /// Sample week for Central Jakarta, the dashboard's default forecast.
    pub fn sample() -> Self {
        let day = |day, title, subtitle, temp, description| DailyForecast {
            day,
            title,
            subtitle,
            temp,
            description,
        };

        WeeklyForecast {
            name: "Central Jakarta",
            temp: 10,
            wind: 19,
            rain: 40,
            days: vec![
                day("sunday", "Clear Skies", "with Gentle Breeze", 11,
                    "A beautiful sunny day with a gentle breeze from the west. Perfect for outdoor activities."),
                day("monday", "Cloudy", "with Overcast Skies", 13,
                    "Expect overcast skies throughout the day. A bit gloomy, but no rain expected. Temperatures will be mild."),
                day("tuesday", "Thunderstorms", "in the Afternoon", 14,
                    "A calm morning will give way to afternoon thunderstorms. It's best to stay indoors. Chance of rain is 80%."),
                day("wednesday", "Storm", "with Heavy Rain", 10,
                    "Partly cloudy with occasional showers. Wind from the east 11 to 21 mph. Rain chance is 40%."),
                day("thursday", "Sunny", "and Very Warm", 19,
                    "A perfect sunny day. Temperatures will be much warmer than usual. Great for a day at the beach."),
                day("friday", "Windy", "with Strong Gusts", 12,
                    "Be prepared for strong winds throughout the day, with gusts reaching up to 40 mph."),
                day("saturday", "Light Snow", "in the Evening", 8,
                    "Colder temperatures will bring light snow in the evening. Accumulation will be minimal."),
            ],
        }
    }

    /// e.g. "sunday: Clear Skies (11°C), monday: Cloudy (13°C)"
    pub fn context_line(&self) -> String {
        self.days
            .iter()
            .map(|d| format!("{}: {} ({}°C)", d.day, d.title, d.temp))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Case-insensitive lookup by weekday name.
    pub fn day(&self, name: &str) -> Option<&DailyForecast> {
        self.days.iter().find(|d| d.day.eq_ignore_ascii_case(name.trim()))
    }

    /// Opening sentence for the selected day, e.g.
    /// "Today is wednesday. The weather is 'Storm with Heavy Rain' with a
    /// temperature of 10°C. Partly cloudy..."
    pub fn day_summary(&self, day: &str) -> String {
        let day = day.trim().to_lowercase();
        match self.day(&day) {
            Some(d) => format!(
                "Today is {}. The weather is '{} {}' with a temperature of {}°C. {}",
                day, d.title, d.subtitle, d.temp, d.description
            ),
            None => format!("Today is {}. No detailed weather data found for this day.", day),
        }
    }
}

/// Lowercase weekday name of a date, as used for forecast days.
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string().to_lowercase()
}

/// Weather context for the assistant: the selected day's summary, the
/// weekly forecast, then the given upcoming events and their snapshots.
pub fn weather_context(
    forecast: &WeeklyForecast,
    selected_day: &str,
    events: &[Event],
    today: NaiveDate,
) -> String {
    let mut lines = vec![
        forecast.day_summary(selected_day),
        format!(
            "Location: {} (now {}°C, wind {} km/h, rain {}%)",
            forecast.name, forecast.temp, forecast.wind, forecast.rain
        ),
        format!("Weekly forecast: {}", forecast.context_line()),
    ];

    if !events.is_empty() {
        lines.push("Upcoming events:".to_string());
    }

    for event in events {
        let mut line = format!(
            "- {} at {} on {} ({})",
            event.name,
            event.location,
            event.formatted_date(),
            event.relative_time(today)
        );
        if let Some(w) = &event.weather {
            line.push_str(&format!(
                ": {}°F, wind {} mph, rain {}%, UV {}, humidity {}%",
                metric_label(w.temperature()),
                metric_label(w.wind_speed()),
                metric_label(w.chance_of_rain()),
                metric_label(w.uv_index()),
                metric_label(w.humidity())
            ));
        }
        lines.push(line);
    }

    lines.join("\n")
}

/// User message for a free-text question.
pub fn chat_prompt(context: &str, question: &str) -> String {
    format!(
        "Given the current weather context:\n{}\n\nAnswer the user's question:\n\"{}\"",
        context, question
    )
}

/// User message asking for activity ideas for the week.
pub fn ideas_prompt(forecast: &WeeklyForecast) -> String {
    format!(
        "Here is the upcoming weekly weather forecast: {}. Based on this, suggest 3 fun and diverse \
activity ideas for the user. Present them as a list.",
        forecast.context_line()
    )
}

/// Split a list-style reply into items, dropping blank lines and bullet
/// markers.
pub fn parse_ideas(reply: &str) -> Vec<String> {
    reply
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix("* ")
                .or_else(|| line.strip_prefix("- "))
                .or_else(|| line.strip_prefix('*'))
                .unwrap_or(line)
                .to_string()
        })
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventLocation;
    use crate::weather::WeatherSnapshot;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_context_line() {
        let line = WeeklyForecast::sample().context_line();
        assert!(line.starts_with("sunday: Clear Skies (11°C), monday: Cloudy (13°C)"));
        assert!(line.ends_with("saturday: Light Snow (8°C)"));
    }

    #[test]
    fn test_day_summary() {
        let forecast = WeeklyForecast::sample();
        assert_eq!(
            forecast.day_summary("Wednesday"),
            "Today is wednesday. The weather is 'Storm with Heavy Rain' with a temperature of 10°C. \
Partly cloudy with occasional showers. Wind from the east 11 to 21 mph. Rain chance is 40%."
        );
        assert_eq!(
            forecast.day_summary("someday"),
            "Today is someday. No detailed weather data found for this day."
        );
    }

    #[test]
    fn test_weekday_name() {
        assert_eq!(weekday_name(NaiveDate::from_ymd_opt(2025, 10, 4).unwrap()), "saturday");
    }

    #[test]
    fn test_weather_context_includes_events() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        let created = Utc.with_ymd_and_hms(2025, 10, 1, 9, 0, 0).unwrap();
        let event = Event {
            id: "e".to_string(),
            name: "Hiking Trip".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 11).unwrap(),
            location: EventLocation::from("Denver"),
            weather: Some(WeatherSnapshot::new(21.0, 7.0, 15.0, 5.0, 48.0, "")),
            created_at: created,
            updated_at: created,
        };

        let context = weather_context(&WeeklyForecast::sample(), "thursday", &[event], today);
        assert!(context.starts_with(
            "Today is thursday. The weather is 'Sunny and Very Warm' with a temperature of 19°C."
        ));
        assert!(context.contains("Weekly forecast: sunday: Clear Skies"));
        assert!(context.contains(
            "- Hiking Trip at Denver on Oct 11, 2025 (In 7 days): 21°F, wind 7 mph, rain 15%, UV 5, humidity 48%"
        ));
    }

    #[test]
    fn test_weather_context_without_events() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 4).unwrap();
        let context = weather_context(&WeeklyForecast::sample(), "saturday", &[], today);
        assert!(!context.contains("Upcoming events"));
    }

    #[test]
    fn test_chat_prompt_shape() {
        assert_eq!(
            chat_prompt("ctx", "Will it rain?"),
            "Given the current weather context:\nctx\n\nAnswer the user's question:\n\"Will it rain?\""
        );
    }

    #[test]
    fn test_parse_ideas() {
        let reply = "* Visit the beach on Thursday\n\n- Museum day Tuesday\n*Kite flying Friday\n";
        assert_eq!(
            parse_ideas(reply),
            vec![
                "Visit the beach on Thursday".to_string(),
                "Museum day Tuesday".to_string(),
                "Kite flying Friday".to_string(),
            ]
        );
    }
}
