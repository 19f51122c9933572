use crate::models::GeoPoint;

/// A coordinate in traditional GIS axis order: `x` is easting or longitude,
/// `y` is northing or latitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar SWEREF99 TM coordinate from its northing and easting
    pub fn from_northing_easting(northing: f64, easting: f64) -> Self {
        Self::new(easting, northing)
    }

    /// Geographic coordinate from longitude/latitude in degrees
    pub fn from_lonlat(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat)
    }
}

impl From<Coordinate> for GeoPoint {
    fn from(coord: Coordinate) -> Self {
        GeoPoint::new(coord.y, coord.x)
    }
}

impl From<GeoPoint> for Coordinate {
    fn from(point: GeoPoint) -> Self {
        Coordinate::from_lonlat(point.lon, point.lat)
    }
}
