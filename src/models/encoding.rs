use crate::models::Dataset;
use crate::utils::constants::{LAT_DD, LAT_DM, SWEREF99_N};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positional encoding carried by a dataset.
///
/// Classified once per dataset, in priority order: decimal degrees,
/// then degrees with decimal minutes, then SWEREF99 TM.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CoordinateEncoding {
    Direct,
    DegreeMinute,
    Projected,
    Undetected,
}

impl CoordinateEncoding {
    pub fn detect(dataset: &Dataset) -> Self {
        if dataset.any_truthy(LAT_DD) {
            CoordinateEncoding::Direct
        } else if dataset.any_truthy(LAT_DM) {
            CoordinateEncoding::DegreeMinute
        } else if dataset.any_truthy(SWEREF99_N) {
            CoordinateEncoding::Projected
        } else {
            CoordinateEncoding::Undetected
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CoordinateEncoding::Direct => "WGS84 decimal degrees",
            CoordinateEncoding::DegreeMinute => "WGS84 degrees and decimal minutes",
            CoordinateEncoding::Projected => "SWEREF99 TM",
            CoordinateEncoding::Undetected => "undetected",
        }
    }
}

impl fmt::Display for CoordinateEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
