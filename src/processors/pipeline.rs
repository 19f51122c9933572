use crate::error::Result;
use crate::models::{CoordinateEncoding, Dataset, StationRecord};
use crate::processors::coordinate_normalizer::CoordinateNormalizer;
use crate::processors::radius_filler::fill_radius;
use crate::processors::record_projection::project_records;
use crate::processors::row_sanitizer::eliminate_empty_rows;
use crate::processors::schema_mapper::SchemaMapper;
use crate::utils::constants::{
    DEFAULT_RADIUS, SYNONYMS, SYNONYM_DISPLAY_DELIMITER, SYNONYM_SOURCE_DELIMITER,
};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Where a dataset came from; decides the header table and sanitizing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Source {
    /// Master station register, read-only ground truth
    Register,
    /// Uploaded spreadsheet template
    Template,
}

impl Source {
    fn schema(&self) -> SchemaMapper {
        match self {
            Source::Register => SchemaMapper::register(),
            Source::Template => SchemaMapper::template(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Register => write!(f, "register"),
            Source::Template => write!(f, "template"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub source: Source,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub encoding: CoordinateEncoding,
    pub unplaced_rows: usize,
    pub defaulted_radii: usize,
    pub records: usize,
}

impl PipelineReport {
    pub fn summary(&self) -> String {
        format!(
            "Source: {}\n\
             Rows read: {}\n\
             Empty rows dropped: {}\n\
             Coordinate encoding: {}\n\
             Records: {}\n\
             Records without position: {}\n\
             Default radius applied: {}",
            self.source,
            self.rows_read,
            self.rows_dropped,
            self.encoding,
            self.records,
            self.unplaced_rows,
            self.defaulted_radii
        )
    }
}

#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub records: Vec<StationRecord>,
    pub report: PipelineReport,
}

/// Runs one dataset through mapping, sanitizing, normalization, radius
/// filling and projection
pub struct StationPipeline {
    normalizer: CoordinateNormalizer,
    default_radius: u32,
}

impl StationPipeline {
    pub fn new() -> Result<Self> {
        Ok(Self {
            normalizer: CoordinateNormalizer::new()?,
            default_radius: DEFAULT_RADIUS,
        })
    }

    pub fn with_normalizer(normalizer: CoordinateNormalizer) -> Self {
        Self {
            normalizer,
            default_radius: DEFAULT_RADIUS,
        }
    }

    pub fn with_default_radius(mut self, default_radius: u32) -> Self {
        self.default_radius = default_radius;
        self
    }

    pub fn run(&self, mut dataset: Dataset, source: Source) -> Result<PipelineOutput> {
        let rows_read = dataset.len();

        source.schema().map_columns(&mut dataset);

        let rows_dropped = match source {
            Source::Template => eliminate_empty_rows(&mut dataset),
            Source::Register => {
                dataset.map_column(SYNONYMS, |v| {
                    v.replace(SYNONYM_SOURCE_DELIMITER, SYNONYM_DISPLAY_DELIMITER)
                });
                0
            }
        };

        let coordinates = self.normalizer.normalize(&dataset)?;
        let radius = fill_radius(&dataset, self.default_radius)?;
        let records = project_records(&dataset, &coordinates, &radius.radii)?;

        let report = PipelineReport {
            source,
            rows_read,
            rows_dropped,
            encoding: coordinates.encoding,
            unplaced_rows: coordinates.unplaced_rows(),
            defaulted_radii: radius.defaulted,
            records: records.len(),
        };
        info!(
            %source,
            records = report.records,
            encoding = %report.encoding,
            unplaced = report.unplaced_rows,
            "Normalized station dataset"
        );

        Ok(PipelineOutput { records, report })
    }
}
