//! Margin and spacing values

use crate::error::{GeomError, GeomResult};
use crate::unit::parse_value;

/// Four-sided inset applied to an area's bounds before laying out content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeInsets {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl EdgeInsets {
    pub fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self { left, right, top, bottom }
    }

    /// Same inset on all four sides
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// True when all four sides carry the same value
    pub fn is_uniform(&self) -> bool {
        self.left == self.right && self.left == self.top && self.left == self.bottom
    }

    /// Parse a comma-separated list of 1, 2, or 4 unit values (a 3-value
    /// form is also accepted).
    ///
    /// The fill order is left, right, top, bottom with each missing value
    /// repeating the previous one: `"10,20"` yields left=10 and right,
    /// top, bottom all 20. This matches the historical behavior of the
    /// format rather than the CSS pairing rule; see DESIGN.md.
    pub fn parse(s: &str) -> GeomResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() > 4 {
            return Err(GeomError::BadMarginCount(parts.len()));
        }

        let left = parse_value(parts[0])?;
        let right = match parts.get(1) {
            Some(p) => parse_value(p)?,
            None => left,
        };
        let top = match parts.get(2) {
            Some(p) => parse_value(p)?,
            None => right,
        };
        let bottom = match parts.get(3) {
            Some(p) => parse_value(p)?,
            None => top,
        };

        Ok(Self::new(left, right, top, bottom))
    }
}

/// Two-dimensional gap used when subdividing an area into children
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Spacing {
    pub width: i32,
    pub height: i32,
}

impl Spacing {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Same gap in both dimensions
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value)
    }

    /// True when both dimensions carry the same value
    pub fn is_uniform(&self) -> bool {
        self.width == self.height
    }

    /// Parse a comma-separated list of 1 or 2 unit values; the height
    /// defaults to the width.
    pub fn parse(s: &str) -> GeomResult<Self> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() > 2 {
            return Err(GeomError::BadSpacingCount(parts.len()));
        }

        let width = parse_value(parts[0])?;
        let height = match parts.get(1) {
            Some(p) => parse_value(p)?,
            None => width,
        };

        Ok(Self::new(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins_one_value() {
        let m = EdgeInsets::parse("10").unwrap();
        assert_eq!(m, EdgeInsets::uniform(10_000));
    }

    #[test]
    fn test_margins_two_values() {
        // The second value repeats into top and bottom, not the CSS rule.
        let m = EdgeInsets::parse("10,20").unwrap();
        assert_eq!(m, EdgeInsets::new(10_000, 20_000, 20_000, 20_000));
    }

    #[test]
    fn test_margins_three_values() {
        let m = EdgeInsets::parse("10,20,30").unwrap();
        assert_eq!(m, EdgeInsets::new(10_000, 20_000, 30_000, 30_000));
    }

    #[test]
    fn test_margins_four_values() {
        let m = EdgeInsets::parse("10,20,30,40").unwrap();
        assert_eq!(m, EdgeInsets::new(10_000, 20_000, 30_000, 40_000));
    }

    #[test]
    fn test_margins_too_many_values() {
        assert_eq!(
            EdgeInsets::parse("1,2,3,4,5"),
            Err(GeomError::BadMarginCount(5))
        );
    }

    #[test]
    fn test_margins_bad_component() {
        assert!(EdgeInsets::parse("10,x").is_err());
        assert!(EdgeInsets::parse("").is_err());
    }

    #[test]
    fn test_spacing_parse() {
        assert_eq!(Spacing::parse("0.25").unwrap(), Spacing::uniform(250));
        assert_eq!(Spacing::parse("0.25,0.5").unwrap(), Spacing::new(250, 500));
        assert_eq!(
            Spacing::parse("1,2,3"),
            Err(GeomError::BadSpacingCount(3))
        );
    }

    #[test]
    fn test_uniform_checks() {
        assert!(EdgeInsets::uniform(5).is_uniform());
        assert!(!EdgeInsets::new(1, 2, 1, 1).is_uniform());
        assert!(Spacing::uniform(5).is_uniform());
        assert!(!Spacing::new(1, 2).is_uniform());
    }
}
