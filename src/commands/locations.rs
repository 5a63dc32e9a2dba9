use anyhow::{Context, Result};
use aura_core::location::{self, PredefinedLocation};
use owo_colors::OwoColorize;

pub fn run(query: Option<String>, near: Option<String>) -> Result<()> {
    if let Some(near) = near {
        let (lat, lng) = parse_point(&near)?;
        let nearest = location::find_nearest(lat, lng);
        let distance = location::haversine_km(lat, lng, nearest.lat, nearest.lng);

        println!("{} {}", render(nearest), format!("({:.0} km away)", distance).dimmed());
        return Ok(());
    }

    match query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            let matches = location::search(q);
            if matches.is_empty() {
                println!("{}", format!("No locations match '{}'", q).dimmed());
            }
            for l in matches {
                println!("{}", render(l));
            }
        }
        None => {
            for (region, members) in location::by_region() {
                println!("{}", region.bold());
                for l in members {
                    println!("{}", render(l));
                }
            }
        }
    }

    Ok(())
}

fn render(l: &PredefinedLocation) -> String {
    format!(
        "  {} {} {}",
        l.display_name(),
        format!("({:.4}, {:.4})", l.lat, l.lng).dimmed(),
        l.timezone.dimmed()
    )
}

/// Parse "LAT,LNG".
fn parse_point(input: &str) -> Result<(f64, f64)> {
    let (lat, lng) = input
        .split_once(',')
        .with_context(|| format!("Expected LAT,LNG but got '{}'", input))?;

    let lat: f64 = lat.trim().parse().with_context(|| format!("Invalid latitude '{}'", lat))?;
    let lng: f64 = lng.trim().parse().with_context(|| format!("Invalid longitude '{}'", lng))?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        anyhow::bail!("Coordinates out of range: {}, {}", lat, lng);
    }

    Ok((lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("37.8, -122.27").unwrap(), (37.8, -122.27));
        assert!(parse_point("37.8").is_err());
        assert!(parse_point("north,south").is_err());
        assert!(parse_point("91,0").is_err());
    }
}
