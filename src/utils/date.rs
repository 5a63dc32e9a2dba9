//! Event date input.

use anyhow::Result;
use chrono::NaiveDate;

/// Expand common abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    const ABBREVIATIONS: [(&str, &str); 22] = [
        ("mon", "monday"),
        ("tue", "tuesday"),
        ("tues", "tuesday"),
        ("wed", "wednesday"),
        ("thu", "thursday"),
        ("thur", "thursday"),
        ("thurs", "thursday"),
        ("fri", "friday"),
        ("sat", "saturday"),
        ("sun", "sunday"),
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("sept", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| full.to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse an event date: `YYYY-MM-DD`, or natural language like
/// "tomorrow" or "next fri". Any time of day is dropped.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }

    fuzzydate::parse(&expand_abbreviations(input))
        .map(|dt| dt.date())
        .map_err(|_| anyhow::anyhow!("Could not parse date: \"{}\"", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_date(" 2025-10-26 ").unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 26).unwrap()
        );
    }

    #[test]
    fn test_parse_relative_date() {
        let today = chrono::Local::now().date_naive();
        let tomorrow = parse_date("tomorrow").unwrap();
        assert!(tomorrow > today);
    }

    #[test]
    fn test_expand_abbreviations() {
        assert_eq!(expand_abbreviations("Next Fri"), "next friday");
        assert_eq!(expand_abbreviations("oct 11"), "october 11");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_date("whenever").is_err());
    }
}
