//! Route request and provider response types.
//!
//! [`RouteDescription`] mirrors the subset of the Directions JSON that the core
//! reads. Every other field of a route alternative is kept in `extra` so the
//! cached document stays a faithful copy of what the provider returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Free-text location, used as either origin or destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Address {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
        }
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            other => Err(format!("unsupported travel mode: {other}")),
        }
    }
}

/// How the departure timestamp of a [`RouteRequest`] is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeparturePolicy {
    /// Depart at the moment each request is built.
    #[default]
    Now,
    /// Always depart at a fixed instant, typically process start.
    FrozenAt(DateTime<Utc>),
}

impl DeparturePolicy {
    pub fn departure_time(&self) -> DateTime<Utc> {
        match self {
            DeparturePolicy::Now => Utc::now(),
            DeparturePolicy::FrozenAt(at) => *at,
        }
    }
}

/// A pending directions lookup. Built on selection and consumed immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: Address,
    pub destination: Address,
    pub mode: TravelMode,
    pub departure_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewPolyline {
    pub points: String,
}

/// One route alternative returned by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAlternative {
    #[serde(default)]
    pub summary: Option<String>,
    pub overview_polyline: OverviewPolyline,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RouteAlternative {
    pub fn from_points(points: impl Into<String>) -> Self {
        Self {
            summary: None,
            overview_polyline: OverviewPolyline {
                points: points.into(),
            },
            extra: serde_json::Map::new(),
        }
    }
}

/// Raw route description: the provider's alternatives, primary first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteDescription {
    pub routes: Vec<RouteAlternative>,
}

impl RouteDescription {
    /// Single-alternative description, mostly useful for tests and fixtures.
    pub fn single(points: impl Into<String>) -> Self {
        Self {
            routes: vec![RouteAlternative::from_points(points)],
        }
    }

    /// Encoded geometry of the primary alternative. No ranking: index 0 always wins.
    pub fn primary_geometry(&self) -> Option<&str> {
        self.routes
            .first()
            .map(|r| r.overview_polyline.points.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_alternative_keeps_unknown_fields() {
        let raw = r#"{
            "routes": [
                {
                    "summary": "Av. Rio Branco",
                    "overview_polyline": { "points": "_p~iF~ps|U" },
                    "legs": [{ "distance": { "value": 1200 } }]
                },
                { "overview_polyline": { "points": "??" } }
            ]
        }"#;

        let description: RouteDescription = serde_json::from_str(raw).unwrap();
        assert_eq!(description.primary_geometry(), Some("_p~iF~ps|U"));
        assert!(description.routes[0].extra.contains_key("legs"));

        let round = serde_json::to_value(&description).unwrap();
        assert_eq!(round["routes"][0]["legs"][0]["distance"]["value"], 1200);
    }

    #[test]
    fn test_frozen_departure_never_moves() {
        let at = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let policy = DeparturePolicy::FrozenAt(at);
        assert_eq!(policy.departure_time(), at);
        assert_eq!(policy.departure_time(), at);
        assert!(DeparturePolicy::Now.departure_time() > at);
    }

    #[test]
    fn test_travel_mode_parse() {
        assert_eq!("Driving".parse::<TravelMode>().unwrap(), TravelMode::Driving);
        assert!("teleport".parse::<TravelMode>().is_err());
    }
}
