//! Weather snapshots attached to events.

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::event::Coordinates;

/// Point-in-time weather metrics for an event's location and date.
///
/// The store never interprets a snapshot, it only records whether one is
/// present. The JSON is kept exactly as it was read so payloads written by
/// other clients (fractional readings, extra keys) survive a load and save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherSnapshot(Value);

impl WeatherSnapshot {
    pub fn new(
        temperature: f64,
        wind_speed: f64,
        chance_of_rain: f64,
        uv_index: f64,
        humidity: f64,
        recommendation: impl Into<String>,
    ) -> Self {
        WeatherSnapshot(json!({
            "temperature": number(temperature),
            "windSpeed": number(wind_speed),
            "chanceOfRain": number(chance_of_rain),
            "uvIndex": number(uv_index),
            "humidity": number(humidity),
            "recommendation": recommendation.into(),
        }))
    }

    pub fn temperature(&self) -> Option<f64> {
        self.metric("temperature")
    }

    pub fn wind_speed(&self) -> Option<f64> {
        self.metric("windSpeed")
    }

    pub fn chance_of_rain(&self) -> Option<f64> {
        self.metric("chanceOfRain")
    }

    pub fn uv_index(&self) -> Option<f64> {
        self.metric("uvIndex")
    }

    pub fn humidity(&self) -> Option<f64> {
        self.metric("humidity")
    }

    pub fn recommendation(&self) -> Option<&str> {
        self.0.get("recommendation").and_then(Value::as_str)
    }

    /// Numbers, or numbers written as strings.
    fn metric(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Whole readings are written as integers, matching what browsers store.
fn number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        json!(value as i64)
    } else {
        json!(value)
    }
}

/// Display form of an optional metric: "18.5", "21", or "?".
pub fn metric_label(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

/// Supplies a snapshot for a location and date.
pub trait WeatherSource {
    fn snapshot(&self, coordinates: Option<Coordinates>, date: NaiveDate) -> WeatherSnapshot;
}

const RECOMMENDATIONS: [&str; 5] = [
    "Perfect weather for outdoor activities! Don't forget sunscreen.",
    "Might want to bring an umbrella, there's a chance of rain.",
    "Great conditions for your event! Enjoy the pleasant weather.",
    "A bit windy, but overall good conditions for outdoor activities.",
    "Cool weather expected - dress in layers for comfort.",
];

/// Random values in plausible ranges. Stands in for a forecast API.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedWeather;

impl WeatherSource for SimulatedWeather {
    fn snapshot(&self, _coordinates: Option<Coordinates>, _date: NaiveDate) -> WeatherSnapshot {
        let mut rng = rand::rng();

        WeatherSnapshot::new(
            f64::from(rng.random_range(15..30_i32)),
            f64::from(rng.random_range(5..25_i32)),
            f64::from(rng.random_range(0..100_i32)),
            f64::from(rng.random_range(0..11_i32)),
            f64::from(rng.random_range(40..80_i32)),
            RECOMMENDATIONS[rng.random_range(0..RECOMMENDATIONS.len())],
        )
    }
}

impl<F> WeatherSource for F
where
    F: Fn(Option<Coordinates>, NaiveDate) -> WeatherSnapshot,
{
    fn snapshot(&self, coordinates: Option<Coordinates>, date: NaiveDate) -> WeatherSnapshot {
        self(coordinates, date)
    }
}
