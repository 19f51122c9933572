use crate::utils::constants::{COORDINATE_DECIMALS, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Cells that carry no value: empty or whitespace only
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Parse a decimal number written with either `.` or `,` as separator.
///
/// Returns `None` for blank or non-numeric input; callers attach row context.
///
/// # Examples
/// ```
/// use station_register::utils::coordinates::parse_decimal;
///
/// assert_eq!(parse_decimal("60,205667"), parse_decimal("60.205667"));
/// assert_eq!(parse_decimal(""), None);
/// ```
pub fn parse_decimal(value: &str) -> Option<f64> {
    let normalized = value.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Convert degrees and decimal minutes (`DDMM.mm`) into decimal degrees.
///
/// Internal whitespace is ignored, so `"60 12,34"` reads as `6012.34`.
///
/// # Examples
/// ```
/// use station_register::utils::coordinates::decmin_to_decdeg;
///
/// let decimal = decmin_to_decdeg("6012.34").unwrap();
/// assert!((decimal - 60.205667).abs() < 0.000001);
/// ```
pub fn decmin_to_decdeg(value: &str) -> Option<f64> {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    let pos = parse_decimal(&compact)?;
    Some((pos / 100.0).floor() + pos.rem_euclid(100.0) / 60.0)
}

/// Round to the number of decimals kept for derived coordinates
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_DECIMALS);
    (value * factor).round() / factor
}

pub fn is_valid_latitude(latitude: f64) -> bool {
    (MIN_LAT..=MAX_LAT).contains(&latitude)
}

pub fn is_valid_longitude(longitude: f64) -> bool {
    (MIN_LON..=MAX_LON).contains(&longitude)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decmin_to_decdeg() {
        assert_eq!(round_coordinate(decmin_to_decdeg("6012.34").unwrap()), 60.205667);
        assert_eq!(round_coordinate(decmin_to_decdeg("01823.56").unwrap()), 18.392667);
        assert_eq!(round_coordinate(decmin_to_decdeg("5730").unwrap()), 57.5);
    }

    #[test]
    fn test_decmin_whitespace_and_comma() {
        let expected = decmin_to_decdeg("6012.34").unwrap();
        assert_eq!(decmin_to_decdeg("60 12,34"), Some(expected));
        assert_eq!(decmin_to_decdeg(" 6012,34 "), Some(expected));
    }

    #[test]
    fn test_decmin_invalid() {
        assert_eq!(decmin_to_decdeg(""), None);
        assert_eq!(decmin_to_decdeg("60°12'"), None);
    }

    #[test]
    fn test_parse_decimal_locale() {
        assert_eq!(parse_decimal("60,205667"), Some(60.205667));
        assert_eq!(parse_decimal("60.205667"), Some(60.205667));
        assert_eq!(parse_decimal("  18.5 "), Some(18.5));
        assert_eq!(parse_decimal("   "), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
    }

    #[test]
    fn test_round_coordinate() {
        assert_eq!(round_coordinate(60.205_666_666_7), 60.205667);
        assert_eq!(round_coordinate(-0.127_499_9), -0.1275);
    }

    #[test]
    fn test_bounds() {
        assert!(is_valid_latitude(59.33));
        assert!(!is_valid_latitude(91.0));
        assert!(is_valid_longitude(-180.0));
        assert!(!is_valid_longitude(181.0));
    }
}
