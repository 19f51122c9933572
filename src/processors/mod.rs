pub mod coordinate_normalizer;
pub mod pipeline;
pub mod radius_filler;
pub mod record_projection;
pub mod row_sanitizer;
pub mod schema_mapper;

pub use coordinate_normalizer::{CoordinateNormalizer, NormalizedCoordinates};
pub use pipeline::{PipelineOutput, PipelineReport, Source, StationPipeline};
pub use radius_filler::{fill_radius, parse_radius, RadiusFill};
pub use record_projection::{
    map_markers, overlay_markers, project_records, submission_records, MapMarker, OverlayMarker,
};
pub use row_sanitizer::eliminate_empty_rows;
pub use schema_mapper::SchemaMapper;
