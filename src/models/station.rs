use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// One station or sampling point after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationRecord {
    #[validate(length(min = 1))]
    pub preferred_name: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat_dd: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon_dd: Option<f64>,

    pub lat_dm: Option<String>,
    pub lon_dm: Option<String>,
    pub sweref99_n: Option<String>,
    pub sweref99_e: Option<String>,

    /// Uncertainty radius in metres
    pub radius: u32,

    pub local_id: Option<String>,
    pub station_group_id: Option<String>,
    pub synonyms: Option<String>,

    /// Other canonical attributes carried through unchanged (comment, county, ...)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

impl StationRecord {
    pub fn new(preferred_name: String, position: Option<GeoPoint>, radius: u32) -> Self {
        Self {
            preferred_name,
            lat_dd: position.map(|p| p.lat),
            lon_dd: position.map(|p| p.lon),
            lat_dm: None,
            lon_dm: None,
            sweref99_n: None,
            sweref99_e: None,
            radius,
            local_id: None,
            station_group_id: None,
            synonyms: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn position(&self) -> Option<GeoPoint> {
        match (self.lat_dd, self.lon_dd) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => None,
        }
    }

    /// Records without a position cannot be placed on a map
    pub fn is_placeable(&self) -> bool {
        self.position().is_some()
    }
}
