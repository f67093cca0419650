use serde::{Deserialize, Serialize};

use crate::geo::{haversine_km, round_km};

// --- Geo Types ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    #[serde(alias = "lng")]
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Both components finite (no NaN, no infinities).
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(self.lat, self.lon, other.lat, other.lon)
    }
}

// --- Enums ---

/// Which dataset a place was ingested from. Serialized with the tags
/// existing clients already expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceSource {
    #[serde(rename = "tourism_csv")]
    Tabular,
    #[serde(rename = "park")]
    Park,
    #[serde(rename = "fitness")]
    Fitness,
}

impl PlaceSource {
    /// Prefix used when synthesizing ids for this source.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Self::Tabular => "csv",
            Self::Park => "park",
            Self::Fitness => "fit",
        }
    }
}

impl std::fmt::Display for PlaceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tabular => write!(f, "tourism_csv"),
            Self::Park => write!(f, "park"),
            Self::Fitness => write!(f, "fitness"),
        }
    }
}

/// Catalog partition a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    /// Tabular attractions and parks merged.
    #[default]
    Attractions,
    Fitness,
}

impl Pool {
    /// Parse the client's `viewMode`. Anything other than `"fitness"` falls back
    /// to attractions.
    pub fn from_view_mode(mode: Option<&str>) -> Self {
        match mode {
            Some("fitness") => Self::Fitness,
            _ => Self::Attractions,
        }
    }
}

impl std::fmt::Display for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attractions => write!(f, "attractions"),
            Self::Fitness => write!(f, "fitness"),
        }
    }
}

// --- Place ---

/// Canonical point of interest. Every `Place` held by a catalog has finite
/// coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub source: PlaceSource,
    pub name: String,
    pub description: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub website: Option<String>,
    /// Coarse tag such as "outdoor". `None` means unknown, never `""`.
    pub category: Option<String>,
}

impl Place {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Lower-cased `name address description`, the text a query is matched against.
    pub fn haystack(&self) -> String {
        format!("{} {} {}", self.name, self.address, self.description).to_lowercase()
    }
}

// --- Display record ---

/// What leaves the core: a place plus its rounded distance from the origin.
/// Ranking internals (text score) are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceView {
    pub id: String,
    pub name: String,
    pub address: String,
    pub description: String,
    pub website: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub distance_km: Option<f64>,
    pub source: PlaceSource,
}

impl PlaceView {
    pub fn from_place(place: &Place, distance_km: Option<f64>) -> Self {
        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            address: place.address.clone(),
            description: place.description.clone(),
            website: place.website.clone(),
            category: place.category.clone(),
            distance_km: distance_km.map(round_km),
            source: place.source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_place() -> Place {
        Place {
            id: "park-7".to_string(),
            source: PlaceSource::Park,
            name: "Kowloon Park".to_string(),
            description: "Garden".to_string(),
            address: "22 Austin Road, Tsim Sha Tsui".to_string(),
            latitude: 22.3018,
            longitude: 114.1703,
            website: None,
            category: Some("outdoor".to_string()),
        }
    }

    #[test]
    fn pool_from_view_mode_defaults_to_attractions() {
        assert_eq!(Pool::from_view_mode(Some("fitness")), Pool::Fitness);
        assert_eq!(Pool::from_view_mode(Some("attractions")), Pool::Attractions);
        assert_eq!(Pool::from_view_mode(Some("museums")), Pool::Attractions);
        assert_eq!(Pool::from_view_mode(Some("Fitness")), Pool::Attractions);
        assert_eq!(Pool::from_view_mode(None), Pool::Attractions);
    }

    #[test]
    fn geo_point_validity() {
        assert!(GeoPoint::new(22.3, 114.1).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 114.1).is_valid());
        assert!(!GeoPoint::new(22.3, f64::INFINITY).is_valid());
    }

    #[test]
    fn haystack_is_lowercased_name_address_description() {
        assert_eq!(
            sample_place().haystack(),
            "kowloon park 22 austin road, tsim sha tsui garden"
        );
    }

    #[test]
    fn view_serializes_category_as_type_and_rounds_distance() {
        let view = PlaceView::from_place(&sample_place(), Some(1.23456));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["type"], "outdoor");
        assert_eq!(json["source"], "park");
        assert_eq!(json["distance_km"], 1.23);
        assert!(json.get("category").is_none());
        assert!(json.get("text_score").is_none());
    }

    #[test]
    fn view_without_origin_has_null_distance() {
        let view = PlaceView::from_place(&sample_place(), None);
        let json = serde_json::to_value(&view).unwrap();
        assert!(json["distance_km"].is_null());
    }
}
