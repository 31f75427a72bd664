//! Area element vocabulary
//!
//! Maps between template element names and area variants. The reader
//! asks this module whether a name is an area element; the writer asks
//! which name a variant serializes under.

use kontura_layout::AreaKind;

pub const IMAGE_ELEMENT: &str = "imageLayout";
pub const GRID_ELEMENT: &str = "gridLayout";
pub const SPLIT_ELEMENT: &str = "splitLayout";

/// True iff the name is one of the recognized area elements
pub fn is_area_element(name: &str) -> bool {
    matches!(name, IMAGE_ELEMENT | GRID_ELEMENT | SPLIT_ELEMENT)
}

/// The element name an area variant serializes under
pub fn element_name(kind: &AreaKind) -> &'static str {
    match kind {
        AreaKind::Image { .. } => IMAGE_ELEMENT,
        AreaKind::Grid { .. } => GRID_ELEMENT,
        AreaKind::Split { .. } => SPLIT_ELEMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognized_names() {
        assert!(is_area_element("imageLayout"));
        assert!(is_area_element("gridLayout"));
        assert!(is_area_element("splitLayout"));
        assert!(!is_area_element("bogusLayout"));
        assert!(!is_area_element("IMAGELAYOUT"));
    }

    #[test]
    fn test_element_names() {
        assert_eq!(element_name(&AreaKind::Image { image: None }), "imageLayout");
        assert_eq!(
            element_name(&AreaKind::Grid { rows: 1, columns: 1 }),
            "gridLayout"
        );
    }
}
