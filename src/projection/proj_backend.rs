use crate::error::{ProcessingError, Result};
use crate::projection::coordinate::Coordinate;
use crate::projection::ProjectionConverter;
use crate::utils::constants::{SWEREF99_EPSG, WGS84_EPSG};
use proj::Proj;

/// PROJ-backed transformer between two EPSG coordinate reference systems
pub struct ProjConverter {
    proj: Proj,
    from_epsg: u16,
    to_epsg: u16,
}

impl ProjConverter {
    pub fn new(from_epsg: u16, to_epsg: u16) -> Result<Self> {
        let from = format!("EPSG:{}", from_epsg);
        let to = format!("EPSG:{}", to_epsg);

        // new_known_crs normalizes both ends to x=lon/easting, y=lat/northing
        let proj = Proj::new_known_crs(&from, &to, None)
            .map_err(|e| ProcessingError::Projection(format!("Failed to create projection: {}", e)))?;

        Ok(Self {
            proj,
            from_epsg,
            to_epsg,
        })
    }

    pub fn sweref99_to_wgs84() -> Result<Self> {
        Self::new(SWEREF99_EPSG, WGS84_EPSG)
    }
}

impl ProjectionConverter for ProjConverter {
    fn source_epsg(&self) -> u16 {
        self.from_epsg
    }

    fn target_epsg(&self) -> u16 {
        self.to_epsg
    }

    fn transform(&self, coord: Coordinate) -> Result<Coordinate> {
        let (x, y) = self
            .proj
            .convert((coord.x, coord.y))
            .map_err(|e| ProcessingError::Projection(format!("Transformation failed: {}", e)))?;

        Ok(Coordinate::new(x, y))
    }
}
