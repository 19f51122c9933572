use crate::error::{ProcessingError, Result};
use crate::projection::coordinate::Coordinate;
use crate::projection::ProjectionConverter;
use crate::utils::constants::{SWEREF99_EPSG, SWEREF99_PROJ_STRING, WGS84_EPSG, WGS84_PROJ_STRING};
use proj4rs::proj::Proj;
use proj4rs::transform::transform;

/// Pure Rust transformer between two CRSs given as PROJ.4 strings
pub struct Proj4Converter {
    from: Proj,
    to: Proj,
    from_epsg: u16,
    to_epsg: u16,
    from_geographic: bool,
    to_geographic: bool,
}

impl Proj4Converter {
    pub fn new(from: (u16, &str), to: (u16, &str)) -> Result<Self> {
        let build = |definition: &str| {
            Proj::from_proj_string(definition).map_err(|e| {
                ProcessingError::Projection(format!(
                    "Failed to create projection '{}': {}",
                    definition, e
                ))
            })
        };

        Ok(Self {
            from: build(from.1)?,
            to: build(to.1)?,
            from_epsg: from.0,
            to_epsg: to.0,
            from_geographic: is_geographic(from.1),
            to_geographic: is_geographic(to.1),
        })
    }

    pub fn sweref99_to_wgs84() -> Result<Self> {
        Self::new(
            (SWEREF99_EPSG, SWEREF99_PROJ_STRING),
            (WGS84_EPSG, WGS84_PROJ_STRING),
        )
    }
}

fn is_geographic(definition: &str) -> bool {
    definition
        .split_whitespace()
        .any(|p| p == "+proj=longlat" || p == "+proj=latlong")
}

impl ProjectionConverter for Proj4Converter {
    fn source_epsg(&self) -> u16 {
        self.from_epsg
    }

    fn target_epsg(&self) -> u16 {
        self.to_epsg
    }

    fn transform(&self, coord: Coordinate) -> Result<Coordinate> {
        // Geographic ends are in radians
        let mut point = if self.from_geographic {
            (coord.x.to_radians(), coord.y.to_radians(), 0.0)
        } else {
            (coord.x, coord.y, 0.0)
        };

        transform(&self.from, &self.to, &mut point)
            .map_err(|e| ProcessingError::Projection(format!("Transformation failed: {}", e)))?;

        let (x, y) = if self.to_geographic {
            (point.0.to_degrees(), point.1.to_degrees())
        } else {
            (point.0, point.1)
        };
        if !x.is_finite() || !y.is_finite() {
            return Err(ProcessingError::Projection(format!(
                "Transformation produced a non-finite coordinate: ({}, {})",
                x, y
            )));
        }
        Ok(Coordinate::new(x, y))
    }
}
