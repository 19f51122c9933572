pub mod dataset;
pub mod encoding;
pub mod station;

pub use dataset::Dataset;
pub use encoding::CoordinateEncoding;
pub use station::{GeoPoint, StationRecord};
