use crate::error::Result;
use crate::models::StationRecord;
use crate::processors::PipelineReport;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

#[derive(Serialize)]
struct RecordDocument<'a> {
    report: &'a PipelineReport,
    records: &'a [StationRecord],
}

/// Write normalized records and their pipeline report as pretty JSON
pub fn write_records(records: &[StationRecord], report: &PipelineReport, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &RecordDocument { report, records })?;

    info!(path = %path.display(), records = records.len(), "Wrote normalized records");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoordinateEncoding, GeoPoint};
    use crate::processors::Source;
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_write_records() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("records.json");
        let records = vec![StationRecord::new(
            "Station A".to_string(),
            Some(GeoPoint::new(60.205667, 18.392667)),
            1200,
        )];
        let report = PipelineReport {
            source: Source::Template,
            rows_read: 2,
            rows_dropped: 1,
            encoding: CoordinateEncoding::DegreeMinute,
            unplaced_rows: 0,
            defaulted_radii: 1,
            records: 1,
        };

        write_records(&records, &report, &path)?;

        let json: Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(json["report"]["encoding"], "DegreeMinute");
        assert_eq!(json["records"][0]["preferred_name"], "Station A");
        assert_eq!(json["records"][0]["lat_dd"], 60.205667);
        assert_eq!(json["records"][0]["radius"], 1200);
        Ok(())
    }
}
