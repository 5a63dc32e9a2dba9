//! Predefined locations.
//!
//! A fixed catalogue of major US cities used for location pickers and for
//! snapping arbitrary coordinates to a known place.

use crate::event::{Coordinates, EventLocation};

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredefinedLocation {
    pub city: &'static str,
    pub state: &'static str,
    pub region: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub timezone: &'static str,
}

impl PredefinedLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }

    /// e.g. "Denver, Colorado"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }

    pub fn to_event_location(&self) -> EventLocation {
        EventLocation::Place {
            name: self.city.to_string(),
            coordinates: Some(self.coordinates()),
            display_name: Some(self.display_name()),
        }
    }
}

macro_rules! location {
    ($city:expr, $state:expr, $region:expr, $lat:expr, $lng:expr, $tz:expr) => {
        PredefinedLocation {
            city: $city,
            state: $state,
            region: $region,
            lat: $lat,
            lng: $lng,
            timezone: $tz,
        }
    };
}

pub const PREDEFINED_LOCATIONS: &[PredefinedLocation] = &[
    // West Coast
    location!("Los Angeles", "California", "West", 34.0522, -118.2437, "America/Los_Angeles"),
    location!("San Francisco", "California", "West", 37.7749, -122.4194, "America/Los_Angeles"),
    location!("San Diego", "California", "West", 32.7157, -117.1611, "America/Los_Angeles"),
    location!("Seattle", "Washington", "West", 47.6062, -122.3321, "America/Los_Angeles"),
    location!("Portland", "Oregon", "West", 45.5152, -122.6784, "America/Los_Angeles"),
    location!("Las Vegas", "Nevada", "West", 36.1699, -115.1398, "America/Los_Angeles"),
    // Mountain
    location!("Denver", "Colorado", "Mountain", 39.7392, -104.9903, "America/Denver"),
    location!("Phoenix", "Arizona", "Mountain", 33.4484, -112.0740, "America/Phoenix"),
    location!("Salt Lake City", "Utah", "Mountain", 40.7608, -111.8910, "America/Denver"),
    // Midwest
    location!("Chicago", "Illinois", "Midwest", 41.8781, -87.6298, "America/Chicago"),
    location!("Detroit", "Michigan", "Midwest", 42.3314, -83.0458, "America/Detroit"),
    location!("Minneapolis", "Minnesota", "Midwest", 44.9778, -93.2650, "America/Chicago"),
    location!("Kansas City", "Missouri", "Midwest", 39.0997, -94.5786, "America/Chicago"),
    // South
    location!("Houston", "Texas", "South", 29.7604, -95.3698, "America/Chicago"),
    location!("Dallas", "Texas", "South", 32.7767, -96.7970, "America/Chicago"),
    location!("Austin", "Texas", "South", 30.2672, -97.7431, "America/Chicago"),
    location!("Atlanta", "Georgia", "South", 33.7490, -84.3880, "America/New_York"),
    location!("Miami", "Florida", "South", 25.7617, -80.1918, "America/New_York"),
    location!("New Orleans", "Louisiana", "South", 29.9511, -90.0715, "America/Chicago"),
    // Northeast
    location!("New York", "New York", "Northeast", 40.7128, -74.0060, "America/New_York"),
    location!("Boston", "Massachusetts", "Northeast", 42.3601, -71.0589, "America/New_York"),
    location!("Philadelphia", "Pennsylvania", "Northeast", 39.9526, -75.1652, "America/New_York"),
    location!("Washington DC", "District of Columbia", "Northeast", 38.9072, -77.0369, "America/New_York"),
    location!("Baltimore", "Maryland", "Northeast", 39.2904, -76.6122, "America/New_York"),
];

/// Great-circle distance in kilometres.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// The catalogue entry closest to the given point. Ties go to the earlier entry.
pub fn find_nearest(lat: f64, lng: f64) -> &'static PredefinedLocation {
    let mut nearest = &PREDEFINED_LOCATIONS[0];
    let mut min = haversine_km(lat, lng, nearest.lat, nearest.lng);

    for location in &PREDEFINED_LOCATIONS[1..] {
        let distance = haversine_km(lat, lng, location.lat, location.lng);
        if distance < min {
            min = distance;
            nearest = location;
        }
    }

    nearest
}

/// Case-insensitive substring match on city, state or region. An empty
/// query matches everything.
pub fn search(query: &str) -> Vec<&'static PredefinedLocation> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return PREDEFINED_LOCATIONS.iter().collect();
    }

    PREDEFINED_LOCATIONS
        .iter()
        .filter(|l| {
            l.city.to_lowercase().contains(&term)
                || l.state.to_lowercase().contains(&term)
                || l.region.to_lowercase().contains(&term)
        })
        .collect()
}

/// Locations grouped by region, in catalogue order.
pub fn by_region() -> Vec<(&'static str, Vec<&'static PredefinedLocation>)> {
    let mut groups: Vec<(&'static str, Vec<&'static PredefinedLocation>)> = Vec::new();

    for location in PREDEFINED_LOCATIONS {
        match groups.iter_mut().find(|(region, _)| *region == location.region) {
            Some((_, members)) => members.push(location),
            None => groups.push((location.region, vec![location])),
        }
    }

    groups
}

pub fn by_city(name: &str) -> Option<&'static PredefinedLocation> {
    PREDEFINED_LOCATIONS
        .iter()
        .find(|l| l.city.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_size() {
        assert_eq!(PREDEFINED_LOCATIONS.len(), 24);
    }

    #[test]
    fn test_haversine_known_distance() {
        // New York to Los Angeles is roughly 3936 km.
        let d = haversine_km(40.7128, -74.0060, 34.0522, -118.2437);
        assert!((d - 3936.0).abs() < 10.0, "got {}", d);
        assert_eq!(haversine_km(10.0, 10.0, 10.0, 10.0), 0.0);
    }

    #[test]
    fn test_find_nearest() {
        // Oakland snaps to San Francisco
        assert_eq!(find_nearest(37.8044, -122.2712).city, "San Francisco");
        // Fort Worth snaps to Dallas
        assert_eq!(find_nearest(32.7555, -97.3308).city, "Dallas");
    }

    #[test]
    fn test_search() {
        let texas: Vec<&str> = search("TEXAS").iter().map(|l| l.city).collect();
        assert_eq!(texas, vec!["Houston", "Dallas", "Austin"]);

        assert_eq!(search("  ").len(), 24);
        assert_eq!(search("midwest").len(), 4);
        assert!(search("atlantis").is_empty());
    }

    #[test]
    fn test_by_region_preserves_order() {
        let regions: Vec<&str> = by_region().iter().map(|(r, _)| *r).collect();
        assert_eq!(regions, vec!["West", "Mountain", "Midwest", "South", "Northeast"]);

        let total: usize = by_region().iter().map(|(_, l)| l.len()).sum();
        assert_eq!(total, 24);
    }

    #[test]
    fn test_by_city() {
        assert_eq!(by_city("salt lake city").map(|l| l.state), Some("Utah"));
        assert!(by_city("Springfield").is_none());
    }

    #[test]
    fn test_to_event_location() {
        let denver = by_city("Denver").unwrap().to_event_location();
        assert_eq!(denver.display_name(), "Denver");
        assert_eq!(denver.coordinates().map(|c| c.lat), Some(39.7392));
    }
}
