pub mod coordinate;
pub mod gauss_kruger;
pub mod proj4_backend;
#[cfg(feature = "proj")]
pub mod proj_backend;

pub use coordinate::Coordinate;
pub use gauss_kruger::{GaussKruger, GridParameters};
pub use proj4_backend::Proj4Converter;
#[cfg(feature = "proj")]
pub use proj_backend::ProjConverter;

use crate::error::Result;

/// Converts planar coordinates into WGS84 longitude/latitude.
///
/// Input and output both use `x` for the easting/longitude axis and `y` for
/// the northing/latitude axis, whatever order the CRS definition declares.
pub trait ProjectionConverter {
    fn source_epsg(&self) -> u16;

    fn target_epsg(&self) -> u16;

    fn transform(&self, coord: Coordinate) -> Result<Coordinate>;

    /// Transforms multiple coordinates in bulk
    fn transform_many(&self, coords: &[Coordinate]) -> Result<Vec<Coordinate>> {
        coords.iter().map(|&coord| self.transform(coord)).collect()
    }
}

/// Default SWEREF99 TM to WGS84 converter for this build: libproj with the
/// `proj` feature, otherwise proj4rs. `GaussKruger` stays available as an
/// independent reference.
pub fn sweref99_converter() -> Result<Box<dyn ProjectionConverter>> {
    #[cfg(feature = "proj")]
    {
        Ok(Box::new(ProjConverter::sweref99_to_wgs84()?))
    }
    #[cfg(not(feature = "proj"))]
    {
        Ok(Box::new(Proj4Converter::sweref99_to_wgs84()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_converter_codes() {
        let converter = sweref99_converter().unwrap();
        assert_eq!(converter.source_epsg(), 3006);
        assert_eq!(converter.target_epsg(), 4326);
    }

    #[test]
    fn test_transform_many_keeps_order() {
        let converter = sweref99_converter().unwrap();
        let coords = [
            Coordinate::from_northing_easting(6_580_822.0, 674_032.0),
            Coordinate::from_northing_easting(6_175_000.0, 375_000.0),
        ];
        let out = converter.transform_many(&coords).unwrap();

        assert_eq!(out.len(), 2);
        assert!(out[0].y > out[1].y);
        assert!(out[0].x > out[1].x);
    }

    #[test]
    fn test_default_converter_agrees_with_series() {
        let converter = sweref99_converter().unwrap();
        let series = GaussKruger::sweref99_tm();
        let grid = Coordinate::from_northing_easting(6_175_000.0, 375_000.0);

        let a = converter.transform(grid).unwrap();
        let b = series.grid_to_geodetic(grid).unwrap();
        assert!((a.x - b.x).abs() < 0.00001);
        assert!((a.y - b.y).abs() < 0.00001);
    }
}
