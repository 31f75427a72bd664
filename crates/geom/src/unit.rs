//! Page units and fixed-point value conversion

use std::fmt;

use crate::error::{GeomError, GeomResult};

/// Real-world unit of a page's measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageUnit {
    /// Centimeters ("cm")
    Cm,
    /// Inches ("in")
    #[default]
    Inch,
}

impl PageUnit {
    /// Parse a unit name, case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cm" => Some(PageUnit::Cm),
            "in" => Some(PageUnit::Inch),
            _ => None,
        }
    }
}

impl fmt::Display for PageUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageUnit::Cm => write!(f, "cm"),
            PageUnit::Inch => write!(f, "in"),
        }
    }
}

/// Format a unit-1000 fixed-point value as a numeric string with up to
/// three decimals, trailing zeros trimmed ("8500" becomes "8.5").
pub fn format_value(value: i32) -> String {
    let sign = if value < 0 { "-" } else { "" };
    let magnitude = value.unsigned_abs();
    let whole = magnitude / 1000;
    let frac = magnitude % 1000;

    if frac == 0 {
        return format!("{}{}", sign, whole);
    }

    let mut s = format!("{}{}.{:03}", sign, whole, frac);
    while s.ends_with('0') {
        s.pop();
    }
    s
}

/// Parse a numeric string into a unit-1000 fixed-point value.
///
/// An empty or absent value is a hard error: the template format requires
/// explicit numeric attributes wherever a measurement is used.
pub fn parse_value(s: &str) -> GeomResult<i32> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(GeomError::EmptyValue);
    }

    let number: f64 = trimmed
        .parse()
        .map_err(|_| GeomError::InvalidValue(trimmed.to_string()))?;
    if !number.is_finite() {
        return Err(GeomError::InvalidValue(trimmed.to_string()));
    }

    Ok((number * 1000.0).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_unit() {
        assert_eq!(PageUnit::parse("cm"), Some(PageUnit::Cm));
        assert_eq!(PageUnit::parse("CM"), Some(PageUnit::Cm));
        assert_eq!(PageUnit::parse("in"), Some(PageUnit::Inch));
        assert_eq!(PageUnit::parse("In"), Some(PageUnit::Inch));
        assert_eq!(PageUnit::parse("mm"), None);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(8500), "8.5");
        assert_eq!(format_value(11000), "11");
        assert_eq!(format_value(250), "0.25");
        assert_eq!(format_value(1), "0.001");
        assert_eq!(format_value(0), "0");
        assert_eq!(format_value(-500), "-0.5");
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("8.5"), Ok(8500));
        assert_eq!(parse_value("11"), Ok(11000));
        assert_eq!(parse_value(" 0.25 "), Ok(250));
        assert_eq!(parse_value("-0.5"), Ok(-500));
    }

    #[test]
    fn test_parse_value_rejects_garbage() {
        assert_eq!(parse_value(""), Err(GeomError::EmptyValue));
        assert_eq!(parse_value("   "), Err(GeomError::EmptyValue));
        assert!(matches!(parse_value("abc"), Err(GeomError::InvalidValue(_))));
        assert!(matches!(parse_value("1,5"), Err(GeomError::InvalidValue(_))));
    }

    #[test]
    fn test_round_trip() {
        for v in [0, 1, 250, 500, 8500, 11000, 29700, -1234] {
            assert_eq!(parse_value(&format_value(v)), Ok(v));
        }
    }
}
