use crate::error::{ProcessingError, Result};
use crate::models::{CoordinateEncoding, Dataset, GeoPoint};
use crate::projection::{sweref99_converter, Coordinate, ProjectionConverter};
use crate::utils::constants::{LAT_DD, LAT_DM, LON_DD, LON_DM, SWEREF99_E, SWEREF99_N};
use crate::utils::coordinates::{decmin_to_decdeg, is_blank, parse_decimal, round_coordinate};
use tracing::{debug, warn};

/// Decimal-degree positions for every row of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCoordinates {
    pub encoding: CoordinateEncoding,
    pub positions: Vec<Option<GeoPoint>>,
}

impl NormalizedCoordinates {
    pub fn unplaced_rows(&self) -> usize {
        self.positions.iter().filter(|p| p.is_none()).count()
    }
}

pub struct CoordinateNormalizer {
    converter: Box<dyn ProjectionConverter>,
}

impl CoordinateNormalizer {
    pub fn new() -> Result<Self> {
        Ok(Self {
            converter: sweref99_converter()?,
        })
    }

    pub fn with_converter(converter: Box<dyn ProjectionConverter>) -> Self {
        Self { converter }
    }

    /// Detect the dataset's encoding once and convert every row with it
    pub fn normalize(&self, dataset: &Dataset) -> Result<NormalizedCoordinates> {
        let encoding = CoordinateEncoding::detect(dataset);
        debug!(%encoding, rows = dataset.len(), "Detected coordinate encoding");

        let positions = match encoding {
            CoordinateEncoding::Direct => {
                read_pairs(dataset, LAT_DD, LON_DD, parse_decimal)?
                    .into_iter()
                    .map(|pair| pair.map(|(lat, lon)| GeoPoint::new(lat, lon)))
                    .collect()
            }
            CoordinateEncoding::DegreeMinute => {
                read_pairs(dataset, LAT_DM, LON_DM, decmin_to_decdeg)?
                    .into_iter()
                    .map(|pair| {
                        pair.map(|(lat, lon)| {
                            GeoPoint::new(round_coordinate(lat), round_coordinate(lon))
                        })
                    })
                    .collect()
            }
            CoordinateEncoding::Projected => self.project(dataset)?,
            CoordinateEncoding::Undetected => {
                warn!(
                    rows = dataset.len(),
                    "No coordinate columns carry values; rows cannot be placed on a map"
                );
                vec![None; dataset.len()]
            }
        };

        let normalized = NormalizedCoordinates {
            encoding,
            positions,
        };
        let unplaced = normalized.unplaced_rows();
        if unplaced > 0 && encoding != CoordinateEncoding::Undetected {
            warn!(unplaced, %encoding, "Rows without a position in the detected encoding");
        }
        Ok(normalized)
    }

    fn project(&self, dataset: &Dataset) -> Result<Vec<Option<GeoPoint>>> {
        let pairs = read_pairs(dataset, SWEREF99_N, SWEREF99_E, parse_decimal)?;

        let grid: Vec<Coordinate> = pairs
            .iter()
            .flatten()
            .map(|&(northing, easting)| Coordinate::from_northing_easting(northing, easting))
            .collect();
        let mut converted = self.converter.transform_many(&grid)?.into_iter();

        Ok(pairs
            .iter()
            .map(|pair| {
                pair.and_then(|_| converted.next()).map(|geo| {
                    let point = GeoPoint::from(geo);
                    GeoPoint::new(round_coordinate(point.lat), round_coordinate(point.lon))
                })
            })
            .collect())
    }
}

/// Parse a (first, second) column pair per row.
///
/// A row blank in both cells has no position. A row with only one cell
/// filled, or a cell that does not parse, rejects the whole dataset.
fn read_pairs<F>(
    dataset: &Dataset,
    first: &str,
    second: &str,
    parse: F,
) -> Result<Vec<Option<(f64, f64)>>>
where
    F: Fn(&str) -> Option<f64>,
{
    for column in [first, second] {
        if !dataset.has_column(column) {
            return Err(ProcessingError::missing_column(column, "coordinate pair"));
        }
    }

    (0..dataset.len())
        .map(|row| {
            let a = dataset.value(row, first).unwrap_or("");
            let b = dataset.value(row, second).unwrap_or("");

            match (is_blank(a), is_blank(b)) {
                (true, true) => {
                    debug!(row, column = first, "Row has no position");
                    Ok(None)
                }
                _ => Ok(Some((
                    parse_cell(row, first, a, &parse)?,
                    parse_cell(row, second, b, &parse)?,
                ))),
            }
        })
        .collect()
}

fn parse_cell<F>(row: usize, column: &str, value: &str, parse: &F) -> Result<f64>
where
    F: Fn(&str) -> Option<f64>,
{
    parse(value).ok_or_else(|| ProcessingError::InvalidCoordinate {
        row,
        column: column.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::GaussKruger;
    use pretty_assertions::assert_eq;

    fn normalizer() -> CoordinateNormalizer {
        CoordinateNormalizer::with_converter(Box::new(GaussKruger::sweref99_tm()))
    }

    #[test]
    fn test_direct_mode_with_comma_separator() {
        let ds = Dataset::from_str_rows(
            &["preferred_name", "lat_dd", "lon_dd"],
            &[&["A", "60,205667", "18.392667"], &["B", "59.5", "17,25"]],
        );
        let out = normalizer().normalize(&ds).unwrap();

        assert_eq!(out.encoding, CoordinateEncoding::Direct);
        assert_eq!(
            out.positions,
            vec![
                Some(GeoPoint::new(60.205667, 18.392667)),
                Some(GeoPoint::new(59.5, 17.25)),
            ]
        );
    }

    #[test]
    fn test_direct_mode_is_not_rounded() {
        let ds = Dataset::from_str_rows(&["lat_dd", "lon_dd"], &[&["60.12345678", "18.87654321"]]);
        let out = normalizer().normalize(&ds).unwrap();
        assert_eq!(out.positions[0], Some(GeoPoint::new(60.12345678, 18.87654321)));
    }

    #[test]
    fn test_degree_minute_mode() {
        let ds = Dataset::from_str_rows(
            &["lat_dd", "lon_dd", "lat_dm", "lon_dm"],
            &[&["", "", "6012.34", "01823.56"], &["", "", "57 30,00", "1145"]],
        );
        let out = normalizer().normalize(&ds).unwrap();

        assert_eq!(out.encoding, CoordinateEncoding::DegreeMinute);
        assert_eq!(out.positions[0], Some(GeoPoint::new(60.205667, 18.392667)));
        assert_eq!(out.positions[1], Some(GeoPoint::new(57.5, 11.75)));
    }

    #[test]
    fn test_projected_mode() {
        let ds = Dataset::from_str_rows(
            &["sweref99_n", "sweref99_e"],
            &[&["6580822", "674032"], &["", ""], &["6175000", "375000"]],
        );
        let out = normalizer().normalize(&ds).unwrap();

        assert_eq!(out.encoding, CoordinateEncoding::Projected);
        assert_eq!(out.positions[0], Some(GeoPoint::new(59.330231, 18.05919)));
        assert_eq!(out.positions[1], None);
        assert_eq!(out.positions[2], Some(GeoPoint::new(55.704635, 13.010759)));
        assert_eq!(out.unplaced_rows(), 1);
    }

    #[test]
    fn test_direct_mode_ignores_other_encodings_per_row() {
        // Row 1 only has degree-minutes; the dataset is classified as direct
        let ds = Dataset::from_str_rows(
            &["lat_dd", "lon_dd", "lat_dm", "lon_dm"],
            &[&["59.1", "18.1", "", ""], &["", "", "6012.34", "01823.56"]],
        );
        let out = normalizer().normalize(&ds).unwrap();

        assert_eq!(out.encoding, CoordinateEncoding::Direct);
        assert_eq!(out.positions[1], None);
    }

    #[test]
    fn test_undetected_leaves_rows_unplaced() {
        let ds = Dataset::from_str_rows(&["preferred_name", "lat_dd"], &[&["A", ""], &["B", " "]]);
        let out = normalizer().normalize(&ds).unwrap();

        assert_eq!(out.encoding, CoordinateEncoding::Undetected);
        assert_eq!(out.positions, vec![None, None]);
    }

    #[test]
    fn test_unparseable_value_is_an_error() {
        let ds = Dataset::from_str_rows(&["lat_dd", "lon_dd"], &[&["59.1", "18.1"], &["59.x", "18.0"]]);
        let err = normalizer().normalize(&ds).unwrap_err();

        match err {
            ProcessingError::InvalidCoordinate { row, column, value } => {
                assert_eq!(row, 1);
                assert_eq!(column, "lat_dd");
                assert_eq!(value, "59.x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_half_filled_pair_is_an_error() {
        let ds = Dataset::from_str_rows(&["lat_dm", "lon_dm"], &[&["6012.34", ""]]);
        assert!(matches!(
            normalizer().normalize(&ds),
            Err(ProcessingError::InvalidCoordinate { row: 0, .. })
        ));
    }

    #[test]
    fn test_missing_partner_column() {
        let ds = Dataset::from_str_rows(&["lat_dd"], &[&["59.1"]]);
        assert!(matches!(
            normalizer().normalize(&ds),
            Err(ProcessingError::MissingColumn { .. })
        ));
    }
}
