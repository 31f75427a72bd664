//! Page layout
//!
//! Owns the root area tree plus the page dimensions, unit, and
//! description, and coordinates bounds propagation into the tree.

use std::fmt;

use kontura_geom::{EdgeInsets, PageUnit, Rect, Spacing};
use log::debug;

use crate::error::{LayoutError, LayoutResult};
use crate::node::{AreaId, AreaKind, ImageRef, SplitOrientation};
use crate::tree::AreaTree;

/// Default outline thickness in page units
pub const DEFAULT_BORDER_WIDTH: i32 = 10;

/// Default percentage for newly created splits
pub const DEFAULT_SPLIT_PERCENT: u32 = 50;

// US Letter defaults for inch pages
const LETTER_WIDTH: i32 = 8_500;
const LETTER_HEIGHT: i32 = 11_000;
const INCH_MARGIN: i32 = 500;
const INCH_SPACING: i32 = 250;

// A4 defaults for metric pages
const A4_WIDTH: i32 = 21_000;
const A4_HEIGHT: i32 = 29_700;
const CM_MARGIN: i32 = 1_000;
const CM_SPACING: i32 = 500;

/// A single printable page: dimensions, unit, optional description, and
/// the owned area tree.
pub struct PageLayout {
    tree: AreaTree,
    width: i32,
    height: i32,
    unit: PageUnit,
    description: Option<String>,
}

impl PageLayout {
    /// Create a page with the default layout for the unit: a single
    /// full-page image slot with the standard margin and spacing.
    pub fn new(unit: PageUnit) -> Self {
        let (width, height, margin, spacing) = match unit {
            PageUnit::Inch => (LETTER_WIDTH, LETTER_HEIGHT, INCH_MARGIN, INCH_SPACING),
            PageUnit::Cm => (A4_WIDTH, A4_HEIGHT, CM_MARGIN, CM_SPACING),
        };

        let mut tree = AreaTree::new();
        let root = tree.root_id();
        // A fresh tree always has a valid image root; these cannot fail.
        let _ = tree.set_margins(root, EdgeInsets::uniform(margin));
        let _ = tree.set_spacing(root, Spacing::uniform(spacing));
        let _ = tree.set_border_width(root, DEFAULT_BORDER_WIDTH);
        let _ = tree.set_bounds(root, Rect::new(0, 0, width, height));

        Self {
            tree,
            width,
            height,
            unit,
            description: None,
        }
    }

    /// Assemble a page from parsed parts, installing the tree: root
    /// bounds from the page size, border widths, full revalidation, and
    /// depth/location propagation from the root.
    pub fn from_parts(
        width: i32,
        height: i32,
        unit: PageUnit,
        description: Option<String>,
        tree: AreaTree,
    ) -> LayoutResult<Self> {
        let mut page = Self {
            tree,
            width,
            height,
            unit,
            description,
        };

        let root = page.tree.root_id();
        for id in std::iter::once(root).chain(page.tree.descendants(root)) {
            page.tree.set_border_width(id, DEFAULT_BORDER_WIDTH)?;
        }
        page.reset_root_bounds()?;
        page.tree.propagate_tree_meta(root)?;
        Ok(page)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn unit(&self) -> PageUnit {
        self.unit
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// The owned area tree
    pub fn tree(&self) -> &AreaTree {
        &self.tree
    }

    /// Mutable access to the area tree.
    ///
    /// Callers making structural edits through this must revalidate
    /// afterwards; prefer the page-level operations below.
    pub fn tree_mut(&mut self) -> &mut AreaTree {
        &mut self.tree
    }

    /// The root area ID
    pub fn root_id(&self) -> AreaId {
        self.tree.root_id()
    }

    fn reset_root_bounds(&mut self) -> LayoutResult<()> {
        let root = self.tree.root_id();
        self.tree
            .set_bounds(root, Rect::new(0, 0, self.width, self.height))?;
        self.tree.revalidate(root)
    }

    /// Set the page width, rederiving the whole tree's geometry
    pub fn set_page_width(&mut self, width: i32) -> LayoutResult<()> {
        self.width = width;
        self.reset_root_bounds()
    }

    /// Set the page height, rederiving the whole tree's geometry
    pub fn set_page_height(&mut self, height: i32) -> LayoutResult<()> {
        self.height = height;
        self.reset_root_bounds()
    }

    /// Change the page unit. The stored measurements are reinterpreted in
    /// the new unit, not converted.
    pub fn set_page_unit(&mut self, unit: PageUnit) -> LayoutResult<()> {
        self.unit = unit;
        self.reset_root_bounds()
    }

    /// Set an area's margins and recompute the affected subtree
    pub fn set_margins(&mut self, id: AreaId, margins: EdgeInsets) -> LayoutResult<()> {
        self.tree.set_margins(id, margins)?;
        self.tree.revalidate(id)
    }

    /// Set an area's margins from a value list string
    pub fn set_margins_str(&mut self, id: AreaId, s: &str) -> LayoutResult<()> {
        self.tree.set_margins_str(id, s)?;
        self.tree.revalidate(id)
    }

    /// Set an area's spacing and recompute the affected subtree
    pub fn set_spacing(&mut self, id: AreaId, spacing: Spacing) -> LayoutResult<()> {
        self.tree.set_spacing(id, spacing)?;
        self.tree.revalidate(id)
    }

    /// Set an area's spacing from a value list string
    pub fn set_spacing_str(&mut self, id: AreaId, s: &str) -> LayoutResult<()> {
        self.tree.set_spacing_str(id, s)?;
        self.tree.revalidate(id)
    }

    /// Replace an area's variant in place, preserving as much downstream
    /// state as possible: the new area keeps the old one's bounds,
    /// margins, spacing, and border width, and images displayed anywhere
    /// in the old subtree flow onto the new subtree's slots in document
    /// order. Returns the replacement's id.
    pub fn convert_area(&mut self, id: AreaId, kind: AreaKind) -> LayoutResult<AreaId> {
        let (bounds, margins, spacing, border_width, parent) = {
            let node = self
                .tree
                .get(id)
                .ok_or(LayoutError::AreaNotFound(id.0))?;
            (
                node.bounds,
                node.margins,
                node.spacing,
                node.border_width,
                node.parent,
            )
        };

        // Harvest displayed images before the old subtree goes away
        let images: Vec<ImageRef> = self
            .tree
            .image_slots(id)
            .into_iter()
            .filter_map(|slot| self.tree.get(slot).and_then(|n| n.image().cloned()))
            .collect();

        let new_id = match kind {
            AreaKind::Image { image } => {
                let slot = self.tree.create_image_area();
                self.tree.set_image(slot, image)?;
                slot
            }
            AreaKind::Grid { rows, columns } => self.tree.create_grid_area(rows, columns)?,
            AreaKind::Split {
                orientation,
                percent,
                ..
            } => self.tree.create_split_area(orientation, percent)?,
        };

        {
            let node = self
                .tree
                .get_mut(new_id)
                .ok_or(LayoutError::AreaNotFound(new_id.0))?;
            node.bounds = bounds;
            node.margins = margins;
            node.spacing = spacing;
            node.border_width = border_width;
        }
        for child in self.tree.descendants(new_id) {
            self.tree.set_border_width(child, border_width)?;
        }

        match parent {
            Some(parent_id) => {
                if !self.tree.replace_child(parent_id, id, new_id)? {
                    return Err(LayoutError::InvalidOperation(format!(
                        "area {} is not a child of area {}",
                        id.0, parent_id.0
                    )));
                }
            }
            None => self.tree.set_root(new_id)?,
        }

        self.tree.revalidate(new_id)?;

        // Re-seed harvested images positionally
        let slots = self.tree.image_slots(new_id);
        for (slot, image) in slots.into_iter().zip(images) {
            self.tree.set_image(slot, Some(image))?;
        }

        debug!(
            "converted area {} to {} (now area {})",
            id.0,
            self.tree
                .get(new_id)
                .map(|n| n.kind.name())
                .unwrap_or("?"),
            new_id.0
        );
        Ok(new_id)
    }

    /// Convenience for creating new splits
    pub fn split_area(
        &mut self,
        id: AreaId,
        orientation: SplitOrientation,
    ) -> LayoutResult<AreaId> {
        self.convert_area(
            id,
            AreaKind::Split {
                orientation,
                percent: DEFAULT_SPLIT_PERCENT,
                valid: false,
            },
        )
    }

    /// Recompute the entire tree's geometry from the root
    pub fn revalidate(&mut self) -> LayoutResult<()> {
        let root = self.tree.root_id();
        self.tree.revalidate(root)
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new(PageUnit::Inch)
    }
}

impl fmt::Debug for PageLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "page {}x{} {}", self.width, self.height, self.unit)?;
        write!(f, "{:?}", self.tree)
    }
}
