use crate::error::{ProcessingError, Result};
use crate::models::{Dataset, StationRecord};
use crate::processors::coordinate_normalizer::NormalizedCoordinates;
use crate::utils::constants::{
    LAT_DD, LAT_DM, LOCAL_ID, LON_DD, LON_DM, PREFERRED_NAME, RADIUS, STATION_GROUP_ID,
    SWEREF99_E, SWEREF99_N, SYNONYMS,
};
use crate::utils::coordinates::is_blank;
use serde::Serialize;
use std::collections::BTreeMap;
use validator::Validate;

/// Columns that map onto dedicated `StationRecord` fields
const RECORD_COLUMNS: &[&str] = &[
    PREFERRED_NAME,
    LAT_DD,
    LON_DD,
    LAT_DM,
    LON_DM,
    SWEREF99_N,
    SWEREF99_E,
    RADIUS,
    LOCAL_ID,
    STATION_GROUP_ID,
    SYNONYMS,
];

/// Column pairs that can carry a position
const POSITION_COLUMNS: &[(&str, &str)] = &[
    (LAT_DD, LON_DD),
    (LAT_DM, LON_DM),
    (SWEREF99_N, SWEREF99_E),
];

/// Build validated records from a normalized dataset.
///
/// Fails when the name column or every position column pair is absent.
pub fn project_records(
    dataset: &Dataset,
    coordinates: &NormalizedCoordinates,
    radii: &[u32],
) -> Result<Vec<StationRecord>> {
    if !dataset.has_column(PREFERRED_NAME) {
        return Err(ProcessingError::missing_column(PREFERRED_NAME, "station dataset"));
    }
    if !POSITION_COLUMNS
        .iter()
        .any(|(a, b)| dataset.has_column(a) && dataset.has_column(b))
    {
        return Err(ProcessingError::missing_column(LAT_DD, "station dataset"));
    }
    if coordinates.positions.len() != dataset.len() || radii.len() != dataset.len() {
        return Err(ProcessingError::InvalidFormat(format!(
            "{} rows but {} positions and {} radii",
            dataset.len(),
            coordinates.positions.len(),
            radii.len()
        )));
    }

    (0..dataset.len())
        .map(|row| {
            let text = |column: &str| {
                dataset
                    .value(row, column)
                    .filter(|v| !is_blank(v))
                    .map(|v| v.trim().to_string())
            };

            let mut record = StationRecord::new(
                text(PREFERRED_NAME).unwrap_or_default(),
                coordinates.positions[row],
                radii[row],
            );
            record.lat_dm = text(LAT_DM);
            record.lon_dm = text(LON_DM);
            record.sweref99_n = text(SWEREF99_N);
            record.sweref99_e = text(SWEREF99_E);
            record.local_id = text(LOCAL_ID);
            record.station_group_id = text(STATION_GROUP_ID);
            record.synonyms = text(SYNONYMS);
            record.attributes = dataset
                .columns()
                .iter()
                .filter(|c| !RECORD_COLUMNS.contains(&c.as_str()))
                .filter_map(|c| text(c.as_str()).map(|v| (c.clone(), v)))
                .collect::<BTreeMap<_, _>>();

            record
                .validate()
                .map_err(|source| ProcessingError::InvalidRecord { row, source })?;
            Ok(record)
        })
        .collect()
}

/// Register marker row:
/// (lat, lon, name, id, id group, synonyms, radius, lat DM, lon DM, SWEREF N, SWEREF E)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker(
    pub f64,
    pub f64,
    pub String,
    pub String,
    pub String,
    pub String,
    pub u32,
    pub String,
    pub String,
    pub String,
    pub String,
);

impl MapMarker {
    pub fn from_record(record: &StationRecord) -> Option<Self> {
        let position = record.position()?;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        Some(MapMarker(
            position.lat,
            position.lon,
            record.preferred_name.clone(),
            text(&record.local_id),
            text(&record.station_group_id),
            text(&record.synonyms),
            record.radius,
            text(&record.lat_dm),
            text(&record.lon_dm),
            text(&record.sweref99_n),
            text(&record.sweref99_e),
        ))
    }
}

/// Uploaded-station marker row: (lat, lon, name)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayMarker(pub f64, pub f64, pub String);

impl OverlayMarker {
    pub fn from_record(record: &StationRecord) -> Option<Self> {
        let position = record.position()?;
        Some(OverlayMarker(
            position.lat,
            position.lon,
            record.preferred_name.clone(),
        ))
    }
}

pub fn map_markers(records: &[StationRecord]) -> Vec<MapMarker> {
    records.iter().filter_map(MapMarker::from_record).collect()
}

pub fn overlay_markers(records: &[StationRecord]) -> Vec<OverlayMarker> {
    records.iter().filter_map(OverlayMarker::from_record).collect()
}

/// Records for the register API; an unplaced record rejects the batch
pub fn submission_records(records: &[StationRecord]) -> Result<Vec<&StationRecord>> {
    records
        .iter()
        .enumerate()
        .map(|(row, record)| {
            if record.is_placeable() {
                Ok(record)
            } else {
                Err(ProcessingError::MissingData(format!(
                    "row {} ('{}') has no position and cannot be submitted",
                    row, record.preferred_name
                )))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CoordinateEncoding, GeoPoint};
    use pretty_assertions::assert_eq;

    fn coords(positions: Vec<Option<GeoPoint>>) -> NormalizedCoordinates {
        NormalizedCoordinates {
            encoding: CoordinateEncoding::Direct,
            positions,
        }
    }

    #[test]
    fn test_projects_fields_and_attributes() {
        let ds = Dataset::from_str_rows(
            &["preferred_name", "lat_dd", "lon_dd", "local_id", "synonyms", "comment", "MEDIA"],
            &[&["Ån", "59.1", "18.1", "42", "Ån; Ån Nedre", "ny", ""]],
        );
        let records =
            project_records(&ds, &coords(vec![Some(GeoPoint::new(59.1, 18.1))]), &[800]).unwrap();

        let r = &records[0];
        assert_eq!(r.preferred_name, "Ån");
        assert_eq!(r.position(), Some(GeoPoint::new(59.1, 18.1)));
        assert_eq!(r.radius, 800);
        assert_eq!(r.local_id.as_deref(), Some("42"));
        assert_eq!(r.station_group_id, None);
        assert_eq!(r.attributes.get("comment").map(String::as_str), Some("ny"));
        assert!(!r.attributes.contains_key("MEDIA"));
    }

    #[test]
    fn test_missing_name_column() {
        let ds = Dataset::from_str_rows(&["lat_dd", "lon_dd"], &[&["59.1", "18.1"]]);
        let err = project_records(&ds, &coords(vec![None]), &[1200]).unwrap_err();
        assert!(matches!(err, ProcessingError::MissingColumn { ref column, .. } if column == "preferred_name"));
    }

    #[test]
    fn test_missing_position_columns() {
        let ds = Dataset::from_str_rows(&["preferred_name", "lat_dm"], &[&["A", ""]]);
        let err = project_records(&ds, &coords(vec![None]), &[1200]).unwrap_err();
        assert!(matches!(err, ProcessingError::MissingColumn { .. }));
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        let ds = Dataset::from_str_rows(&["preferred_name", "lat_dd", "lon_dd"], &[&["A", "6012.34", "18"]]);
        let err = project_records(&ds, &coords(vec![Some(GeoPoint::new(6012.34, 18.0))]), &[1200])
            .unwrap_err();
        assert!(matches!(err, ProcessingError::InvalidRecord { row: 0, .. }));
    }

    #[test]
    fn test_marker_tuple_order() {
        let mut record = StationRecord::new("Station A".to_string(), Some(GeoPoint::new(60.2, 18.3)), 1200);
        record.local_id = Some("17".to_string());
        record.station_group_id = Some("3".to_string());
        record.lat_dm = Some("6012.00".to_string());

        let json = serde_json::to_string(&MapMarker::from_record(&record).unwrap()).unwrap();
        assert_eq!(
            json,
            r#"[60.2,18.3,"Station A","17","3","",1200,"6012.00","","",""]"#
        );

        let json = serde_json::to_string(&OverlayMarker::from_record(&record).unwrap()).unwrap();
        assert_eq!(json, r#"[60.2,18.3,"Station A"]"#);
    }

    #[test]
    fn test_unplaced_records_omitted_from_maps() {
        let placed = StationRecord::new("A".to_string(), Some(GeoPoint::new(60.0, 18.0)), 1200);
        let unplaced = StationRecord::new("B".to_string(), None, 1200);
        let records = vec![placed, unplaced];

        assert_eq!(map_markers(&records).len(), 1);
        assert_eq!(overlay_markers(&records).len(), 1);
        assert!(submission_records(&records).is_err());
        assert_eq!(submission_records(&records[..1]).unwrap().len(), 1);
    }
}
