//! Area node representation

use std::fmt;
use std::rc::Rc;

use kontura_geom::{EdgeInsets, Point, Rect, Spacing};
use smallvec::SmallVec;

/// Unique identifier for an area in the layout tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AreaId(pub u32);

impl AreaId {
    /// Create a new area ID
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for AreaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AreaId({})", self.0)
    }
}

/// Orientation of a binary split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitOrientation {
    /// Top/bottom split (template "V")
    #[default]
    Vertical,
    /// Left/right split (template "H")
    Horizontal,
}

impl SplitOrientation {
    /// Parse the template orientation code
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "V" => Some(SplitOrientation::Vertical),
            "H" => Some(SplitOrientation::Horizontal),
            _ => None,
        }
    }

    /// Template orientation code
    pub fn as_str(&self) -> &'static str {
        match self {
            SplitOrientation::Vertical => "V",
            SplitOrientation::Horizontal => "H",
        }
    }
}

/// Decoded image pixel data
#[derive(Debug, Clone)]
pub struct ImagePixels {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// RGBA pixel data, 4 bytes per pixel
    pub data: Vec<u8>,
}

/// Display handle for an image shown in a slot.
///
/// The pixel data is owned by the image pipeline; areas and paint
/// commands only share it read-only through the `Rc`.
#[derive(Debug, Clone)]
pub struct ImageRef {
    /// Source path the image was loaded from
    pub source: String,
    /// Decoded RGBA pixels (None while loading or after a failed decode)
    pub pixels: Option<Rc<ImagePixels>>,
}

/// Variant data of an area
#[derive(Debug, Clone)]
pub enum AreaKind {
    /// Leaf slot holding at most one displayed image
    Image { image: Option<ImageRef> },
    /// Regular rows x columns subdivision, children row-major
    Grid { rows: u32, columns: u32 },
    /// Binary subdivision at a percentage along one axis
    Split {
        orientation: SplitOrientation,
        percent: u32,
        /// Geometry is current; cleared when percent, orientation, or
        /// bounds change
        valid: bool,
    },
}

impl AreaKind {
    /// Short variant name for logging and tree dumps
    pub fn name(&self) -> &'static str {
        match self {
            AreaKind::Image { .. } => "image",
            AreaKind::Grid { .. } => "grid",
            AreaKind::Split { .. } => "split",
        }
    }

    /// Number of children this variant must own
    pub fn expected_children(&self) -> usize {
        match self {
            AreaKind::Image { .. } => 0,
            AreaKind::Grid { rows, columns } => (*rows as usize) * (*columns as usize),
            AreaKind::Split { .. } => 2,
        }
    }
}

/// A node in the area tree
#[derive(Debug, Clone)]
pub struct AreaNode {
    /// Unique identifier
    pub id: AreaId,
    /// Variant data
    pub kind: AreaKind,
    /// Rectangle in page-unit space, assigned by the parent during layout
    pub bounds: Rect,
    /// Inset applied before computing the usable inner rectangle
    pub margins: EdgeInsets,
    /// Gap used when subdividing into children
    pub spacing: Spacing,
    /// Outline thickness in page units
    pub border_width: i32,
    /// Containing area (None for the root); lookup only, never ownership
    pub parent: Option<AreaId>,
    /// Distance from the root
    pub depth: u32,
    /// Path string from the root ("" for the root, then one letter per
    /// child index)
    pub location: String,
    /// Owned child areas, fixed length per variant
    pub children: SmallVec<[AreaId; 8]>,
}

impl AreaNode {
    /// Create a new node
    pub fn new(id: AreaId, kind: AreaKind) -> Self {
        Self {
            id,
            kind,
            bounds: Rect::default(),
            margins: EdgeInsets::default(),
            spacing: Spacing::default(),
            border_width: 0,
            parent: None,
            depth: 0,
            location: String::new(),
            children: SmallVec::new(),
        }
    }

    /// The bounds shrunk by the margins; may be degenerate
    pub fn bounds_in_margin(&self) -> Rect {
        self.bounds.inset(&self.margins)
    }

    /// True iff the point falls within the bounds reduced by the margins,
    /// all four edges inclusive
    pub fn hit(&self, p: Point) -> bool {
        self.bounds_in_margin().contains(p)
    }

    pub fn is_image(&self) -> bool {
        matches!(self.kind, AreaKind::Image { .. })
    }

    pub fn is_grid(&self) -> bool {
        matches!(self.kind, AreaKind::Grid { .. })
    }

    pub fn is_split(&self) -> bool {
        matches!(self.kind, AreaKind::Split { .. })
    }

    /// Displayed image, if this is an image slot with one
    pub fn image(&self) -> Option<&ImageRef> {
        match &self.kind {
            AreaKind::Image { image } => image.as_ref(),
            _ => None,
        }
    }
}

/// Location path component for a child index: letters a-z, then a
/// bracketed numeric form beyond 26 children.
pub fn location_suffix(index: usize) -> String {
    if index < 26 {
        ((b'a' + index as u8) as char).to_string()
    } else {
        format!("[{}]", index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_suffix() {
        assert_eq!(location_suffix(0), "a");
        assert_eq!(location_suffix(25), "z");
        assert_eq!(location_suffix(26), "[26]");
        assert_eq!(location_suffix(100), "[100]");
    }

    #[test]
    fn test_orientation_codes() {
        assert_eq!(SplitOrientation::parse("V"), Some(SplitOrientation::Vertical));
        assert_eq!(SplitOrientation::parse("h"), Some(SplitOrientation::Horizontal));
        assert_eq!(SplitOrientation::parse("X"), None);
        assert_eq!(SplitOrientation::Vertical.as_str(), "V");
    }

    #[test]
    fn test_expected_children() {
        assert_eq!(AreaKind::Image { image: None }.expected_children(), 0);
        assert_eq!(AreaKind::Grid { rows: 2, columns: 3 }.expected_children(), 6);
        let split = AreaKind::Split {
            orientation: SplitOrientation::Vertical,
            percent: 50,
            valid: false,
        };
        assert_eq!(split.expected_children(), 2);
    }

    #[test]
    fn test_hit_respects_margins() {
        let mut node = AreaNode::new(AreaId::new(1), AreaKind::Image { image: None });
        node.bounds = Rect::new(0, 0, 1000, 1000);
        node.margins = EdgeInsets::uniform(100);
        assert!(node.hit(Point::new(100, 100)));
        assert!(node.hit(Point::new(900, 900)));
        assert!(!node.hit(Point::new(99, 100)));
        assert!(!node.hit(Point::new(901, 900)));
    }
}
