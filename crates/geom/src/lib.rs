//! Kontura Geometry
//!
//! Page-space geometry primitives and unit conversion.
//!
//! All coordinates use the unit-1000 fixed-point convention: an integer
//! equal to the real-world measurement (in the page's unit) times 1000,
//! so an 8.5 inch page width is stored as 8500.

mod error;
mod insets;
mod unit;

pub use error::{GeomError, GeomResult};
pub use insets::{EdgeInsets, Spacing};
pub use unit::{format_value, parse_value, PageUnit};

/// A point in page-unit space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in page-unit space
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Check if a point is inside the rectangle, edges inclusive
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Shrink the rectangle by the given insets on all four sides.
    ///
    /// The result may have negative width or height when the insets exceed
    /// the rectangle; callers must tolerate the degenerate case.
    pub fn inset(&self, insets: &EdgeInsets) -> Rect {
        Rect {
            x: self.x + insets.left,
            y: self.y + insets.top,
            width: self.width - insets.left - insets.right,
            height: self.height - insets.top - insets.bottom,
        }
    }

    /// Check if the rectangle has no usable interior
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inclusive_edges() {
        let r = Rect::new(10, 10, 100, 50);
        assert!(r.contains(Point::new(10, 10)));
        assert!(r.contains(Point::new(110, 60)));
        assert!(r.contains(Point::new(110, 10)));
        assert!(r.contains(Point::new(10, 60)));
        assert!(!r.contains(Point::new(9, 10)));
        assert!(!r.contains(Point::new(111, 60)));
        assert!(!r.contains(Point::new(10, 61)));
    }

    #[test]
    fn test_inset() {
        let r = Rect::new(0, 0, 1000, 2000);
        let inner = r.inset(&EdgeInsets::new(100, 200, 300, 400));
        assert_eq!(inner, Rect::new(100, 300, 700, 1300));
    }

    #[test]
    fn test_inset_degenerate() {
        let r = Rect::new(0, 0, 100, 100);
        let inner = r.inset(&EdgeInsets::uniform(80));
        assert!(inner.is_degenerate());
        assert!(!inner.contains(Point::new(80, 80)));
    }
}
