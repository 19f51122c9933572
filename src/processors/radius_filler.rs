use crate::error::{ProcessingError, Result};
use crate::models::Dataset;
use crate::utils::constants::RADIUS;
use crate::utils::coordinates::is_blank;
use tracing::debug;

/// Radius per row, and how many of them fell back to the default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadiusFill {
    pub radii: Vec<u32>,
    pub defaulted: usize,
}

/// Parse one radius cell. Missing, blank and zero radii take `default`;
/// `None` means the cell holds something that is not a whole number of metres;
/// negative radii land here too.
pub fn parse_radius(value: Option<&str>, default: u32) -> Option<u32> {
    match value.map(str::trim) {
        None => Some(default),
        Some(v) if is_blank(v) => Some(default),
        Some(v) => match v.parse::<u32>().ok()? {
            0 => Some(default),
            radius => Some(radius),
        },
    }
}

fn is_defaulted(value: Option<&str>) -> bool {
    value
        .map(str::trim)
        .map_or(true, |v| v.is_empty() || v.parse::<u32>() == Ok(0))
}

pub fn fill_radius(dataset: &Dataset, default: u32) -> Result<RadiusFill> {
    if !dataset.has_column(RADIUS) {
        debug!(default, "No radius column, using default for every row");
        return Ok(RadiusFill {
            radii: vec![default; dataset.len()],
            defaulted: dataset.len(),
        });
    }

    let mut defaulted = 0;
    let radii = (0..dataset.len())
        .map(|row| {
            let value = dataset.value(row, RADIUS);
            let radius = parse_radius(value, default).ok_or_else(|| {
                ProcessingError::InvalidRadius {
                    row,
                    value: value.unwrap_or_default().to_string(),
                }
            })?;
            if is_defaulted(value) {
                defaulted += 1;
            }
            Ok(radius)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RadiusFill { radii, defaulted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_radius_defaults() {
        let values = [Some(""), Some("500"), Some("0"), None, Some("1200")];
        let parsed: Vec<Option<u32>> = values.iter().map(|v| parse_radius(*v, 1200)).collect();
        assert_eq!(
            parsed,
            vec![Some(1200), Some(500), Some(1200), Some(1200), Some(1200)]
        );
    }

    #[test]
    fn test_parse_radius_rejects_non_numeric() {
        assert_eq!(parse_radius(Some("abc"), 1200), None);
        assert_eq!(parse_radius(Some("-5"), 1200), None);
        assert_eq!(parse_radius(Some(" 250 "), 1200), Some(250));
    }

    #[test]
    fn test_fill_without_column() {
        let ds = Dataset::from_str_rows(&["preferred_name"], &[&["A"], &["B"]]);
        let fill = fill_radius(&ds, 1200).unwrap();
        assert_eq!(fill.radii, vec![1200, 1200]);
        assert_eq!(fill.defaulted, 2);
    }

    #[test]
    fn test_fill_mixes_explicit_and_default() {
        let ds = Dataset::from_str_rows(
            &["preferred_name", "radius"],
            &[&["A", ""], &["B", "500"], &["C", "0"], &["D"], &["E", "1200"]],
        );
        let fill = fill_radius(&ds, 1200).unwrap();
        assert_eq!(fill.radii, vec![1200, 500, 1200, 1200, 1200]);
        assert_eq!(fill.defaulted, 3);
    }

    #[test]
    fn test_fill_invalid_value() {
        let ds = Dataset::from_str_rows(&["radius"], &[&["100"], &["1 km"]]);
        match fill_radius(&ds, 1200) {
            Err(ProcessingError::InvalidRadius { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "1 km");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_fill_rejects_negative_radius() {
        let ds = Dataset::from_str_rows(&["preferred_name", "radius"], &[&["A", "-5"]]);
        assert!(matches!(
            fill_radius(&ds, 1200),
            Err(ProcessingError::InvalidRadius { row: 0, ref value }) if value == "-5"
        ));
    }
}
