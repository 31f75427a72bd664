//! Area tree structure
//!
//! The tree owns every node in an arena map; parent links are plain ids
//! used only for lookups, so child destruction always flows downward
//! through `remove_subtree`.

use std::fmt;

use kontura_geom::{EdgeInsets, Point, Rect, Spacing};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::error::{LayoutError, LayoutResult};
use crate::node::{location_suffix, AreaId, AreaKind, AreaNode, ImageRef, SplitOrientation};
use crate::{grid, split};

/// Area tree that owns all nodes
pub struct AreaTree {
    /// All areas in the tree
    nodes: FxHashMap<AreaId, AreaNode>,
    /// Next available area ID
    next_id: u32,
    /// Root area
    root_id: AreaId,
}

impl AreaTree {
    /// Create a new tree with a single image-slot root
    pub fn new() -> Self {
        let root_id = AreaId::new(0);
        let root = AreaNode::new(root_id, AreaKind::Image { image: None });

        let mut nodes = FxHashMap::default();
        nodes.insert(root_id, root);

        Self {
            nodes,
            next_id: 1,
            root_id,
        }
    }

    /// Get the root area ID
    pub fn root_id(&self) -> AreaId {
        self.root_id
    }

    /// Get an area by ID
    pub fn get(&self, id: AreaId) -> Option<&AreaNode> {
        self.nodes.get(&id)
    }

    /// Get a mutable area by ID
    pub fn get_mut(&mut self, id: AreaId) -> Option<&mut AreaNode> {
        self.nodes.get_mut(&id)
    }

    fn node(&self, id: AreaId) -> LayoutResult<&AreaNode> {
        self.nodes.get(&id).ok_or(LayoutError::AreaNotFound(id.0))
    }

    fn node_mut(&mut self, id: AreaId) -> LayoutResult<&mut AreaNode> {
        self.nodes.get_mut(&id).ok_or(LayoutError::AreaNotFound(id.0))
    }

    /// Get the number of areas in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Create a detached area of the given kind, without children.
    ///
    /// Variant parameters are validated here; the caller attaches the
    /// children afterwards (the template parser) or uses one of the
    /// allocating constructors below.
    pub fn create_area(&mut self, kind: AreaKind) -> LayoutResult<AreaId> {
        match kind {
            AreaKind::Grid { rows, columns } if rows < 1 || columns < 1 => {
                return Err(LayoutError::InvalidGridShape { rows, columns });
            }
            AreaKind::Split { percent, .. } if percent > 100 => {
                return Err(LayoutError::InvalidSplitPercent(percent));
            }
            _ => {}
        }

        let id = AreaId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, AreaNode::new(id, kind));
        Ok(id)
    }

    /// Create a detached empty image slot
    pub fn create_image_area(&mut self) -> AreaId {
        let id = AreaId::new(self.next_id);
        self.next_id += 1;
        self.nodes
            .insert(id, AreaNode::new(id, AreaKind::Image { image: None }));
        id
    }

    /// Create a detached grid area populated with rows*columns image slots
    pub fn create_grid_area(&mut self, rows: u32, columns: u32) -> LayoutResult<AreaId> {
        let id = self.create_area(AreaKind::Grid { rows, columns })?;
        let slots: Vec<AreaId> = (0..rows * columns)
            .map(|_| self.create_image_area())
            .collect();
        self.attach_children(id, slots)?;
        Ok(id)
    }

    /// Create a detached split area populated with two image slots
    pub fn create_split_area(
        &mut self,
        orientation: SplitOrientation,
        percent: u32,
    ) -> LayoutResult<AreaId> {
        let id = self.create_area(AreaKind::Split {
            orientation,
            percent,
            valid: false,
        })?;
        let slots = vec![self.create_image_area(), self.create_image_area()];
        self.attach_children(id, slots)?;
        Ok(id)
    }

    /// Attach children to an area, in order.
    ///
    /// The count must match the variant's subdivision exactly, each child
    /// must exist, and neither the parent nor any child may already be
    /// wired up; violating any of these is a programming error reported
    /// loudly rather than patched over.
    pub fn attach_children(&mut self, parent_id: AreaId, children: Vec<AreaId>) -> LayoutResult<()> {
        let expected = {
            let parent = self.node(parent_id)?;
            if !parent.children.is_empty() {
                return Err(LayoutError::InvalidOperation(format!(
                    "area {} already has children",
                    parent_id.0
                )));
            }
            parent.kind.expected_children()
        };
        if children.len() != expected {
            return Err(LayoutError::ChildCountMismatch {
                expected,
                actual: children.len(),
            });
        }

        for &child_id in &children {
            let child = self.node_mut(child_id)?;
            if child.parent.is_some() {
                return Err(LayoutError::InvalidOperation(format!(
                    "area {} is already attached",
                    child_id.0
                )));
            }
            child.parent = Some(parent_id);
        }

        self.node_mut(parent_id)?.children = SmallVec::from_vec(children);
        Ok(())
    }

    /// Remove an area and all of its descendants from the arena.
    ///
    /// The caller is responsible for removing the id from its parent's
    /// child list first, if it has one.
    pub fn remove_subtree(&mut self, id: AreaId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend(node.children.iter().copied());
            }
        }
    }

    /// Re-root the tree onto the given area.
    ///
    /// Any previous root subtree is dropped; depth and location are
    /// re-derived for the whole new tree.
    pub fn set_root(&mut self, id: AreaId) -> LayoutResult<()> {
        // Detach from a previous parent, if any
        let old_parent = self.node(id)?.parent;
        if let Some(parent_id) = old_parent {
            if let Some(parent) = self.get_mut(parent_id) {
                parent.children.retain(|c| *c != id);
            }
        }

        let old_root = self.root_id;
        if old_root != id && self.nodes.contains_key(&old_root) {
            self.remove_subtree(old_root);
        }

        self.root_id = id;
        let root = self.node_mut(id)?;
        root.parent = None;
        root.depth = 0;
        root.location.clear();
        self.propagate_tree_meta(id)
    }

    /// Recompute depth and location strings for all descendants of `id`,
    /// from `id`'s own values. Called after every structural change.
    pub fn propagate_tree_meta(&mut self, id: AreaId) -> LayoutResult<()> {
        let (depth, location, children) = {
            let node = self.node(id)?;
            (node.depth, node.location.clone(), node.children.clone())
        };

        for (index, &child_id) in children.iter().enumerate() {
            {
                let child = self.node_mut(child_id)?;
                child.parent = Some(id);
                child.depth = depth + 1;
                child.location = format!("{}{}", location, location_suffix(index));
            }
            self.propagate_tree_meta(child_id)?;
        }
        Ok(())
    }

    /// Set an area's bounds. A split whose rectangle actually changes is
    /// marked for geometry recompute.
    pub fn set_bounds(&mut self, id: AreaId, bounds: Rect) -> LayoutResult<()> {
        let node = self.node_mut(id)?;
        let changed = node.bounds != bounds;
        node.bounds = bounds;
        if changed {
            if let AreaKind::Split { valid, .. } = &mut node.kind {
                *valid = false;
            }
        }
        Ok(())
    }

    /// Mark an area's geometry stale (splits only; other variants always
    /// recompute)
    fn invalidate(&mut self, id: AreaId) -> LayoutResult<()> {
        if let AreaKind::Split { valid, .. } = &mut self.node_mut(id)?.kind {
            *valid = false;
        }
        Ok(())
    }

    /// Set all four margins to the same value
    pub fn set_margins_uniform(&mut self, id: AreaId, value: i32) -> LayoutResult<()> {
        self.set_margins(id, EdgeInsets::uniform(value))
    }

    /// Set the four margins
    pub fn set_margins(&mut self, id: AreaId, margins: EdgeInsets) -> LayoutResult<()> {
        self.node_mut(id)?.margins = margins;
        self.invalidate(id)
    }

    /// Set the margins from a comma-separated value list (1, 2, or 4
    /// values; see [`EdgeInsets::parse`] for the fill rule)
    pub fn set_margins_str(&mut self, id: AreaId, s: &str) -> LayoutResult<()> {
        let margins = EdgeInsets::parse(s)?;
        self.set_margins(id, margins)
    }

    /// Set the subdivision spacing
    pub fn set_spacing(&mut self, id: AreaId, spacing: Spacing) -> LayoutResult<()> {
        self.node_mut(id)?.spacing = spacing;
        self.invalidate(id)
    }

    /// Set the spacing from a comma-separated value list (1 or 2 values)
    pub fn set_spacing_str(&mut self, id: AreaId, s: &str) -> LayoutResult<()> {
        let spacing = Spacing::parse(s)?;
        self.set_spacing(id, spacing)
    }

    /// Set the outline thickness
    pub fn set_border_width(&mut self, id: AreaId, width: i32) -> LayoutResult<()> {
        self.node_mut(id)?.border_width = width;
        Ok(())
    }

    /// Put an image into a slot (or clear it with None)
    pub fn set_image(&mut self, id: AreaId, image: Option<ImageRef>) -> LayoutResult<()> {
        match &mut self.node_mut(id)?.kind {
            AreaKind::Image { image: slot } => {
                *slot = image;
                Ok(())
            }
            other => Err(LayoutError::InvalidOperation(format!(
                "area {} is a {}, not an image slot",
                id.0,
                other.name()
            ))),
        }
    }

    /// Recompute the children's bounds of `id` from its own bounds,
    /// margins, spacing, and variant parameters, recursively revalidating
    /// the whole subtree.
    pub fn revalidate(&mut self, id: AreaId) -> LayoutResult<()> {
        match self.node(id)?.kind {
            AreaKind::Image { .. } => Ok(()),
            AreaKind::Grid { .. } => grid::revalidate(self, id),
            AreaKind::Split { .. } => split::revalidate(self, id),
        }
    }

    /// Change a grid's subdivision, transferring children positionally on
    /// the overlapping row/column region and recomputing geometry.
    pub fn set_grid_shape(&mut self, id: AreaId, rows: u32, columns: u32) -> LayoutResult<()> {
        if rows < 1 || columns < 1 {
            return Err(LayoutError::InvalidGridShape { rows, columns });
        }

        let (old_rows, old_columns) = match &self.node(id)?.kind {
            AreaKind::Grid { rows, columns } => (*rows, *columns),
            other => {
                return Err(LayoutError::InvalidOperation(format!(
                    "area {} is a {}, not a grid",
                    id.0,
                    other.name()
                )))
            }
        };
        if (old_rows, old_columns) == (rows, columns) {
            return Ok(());
        }

        self.node_mut(id)?.kind = AreaKind::Grid { rows, columns };
        grid::reshape(self, id, old_rows, old_columns, rows, columns)?;
        self.revalidate(id)?;
        self.propagate_tree_meta(id)
    }

    /// Change a split's percentage. Setting the current value is a no-op;
    /// out-of-range values are rejected, not clamped.
    pub fn set_split_percent(&mut self, id: AreaId, percent: u32) -> LayoutResult<()> {
        if percent > 100 {
            return Err(LayoutError::InvalidSplitPercent(percent));
        }
        match &mut self.node_mut(id)?.kind {
            AreaKind::Split {
                percent: current,
                valid,
                ..
            } => {
                if *current == percent {
                    return Ok(());
                }
                *current = percent;
                *valid = false;
            }
            other => {
                return Err(LayoutError::InvalidOperation(format!(
                    "area {} is a {}, not a split",
                    id.0,
                    other.name()
                )))
            }
        }
        self.revalidate(id)
    }

    /// Change a split's orientation. Setting the current value is a no-op.
    pub fn set_split_orientation(
        &mut self,
        id: AreaId,
        orientation: SplitOrientation,
    ) -> LayoutResult<()> {
        match &mut self.node_mut(id)?.kind {
            AreaKind::Split {
                orientation: current,
                valid,
                ..
            } => {
                if *current == orientation {
                    return Ok(());
                }
                *current = orientation;
                *valid = false;
            }
            other => {
                return Err(LayoutError::InvalidOperation(format!(
                    "area {} is a {}, not a split",
                    id.0,
                    other.name()
                )))
            }
        }
        self.revalidate(id)
    }

    /// The immediate child of `id` containing the point, if any. Does not
    /// recurse; callers descend by repeated calls.
    pub fn child_at(&self, id: AreaId, p: Point) -> Option<AreaId> {
        let node = self.get(id)?;
        node.children
            .iter()
            .copied()
            .find(|&child_id| self.get(child_id).is_some_and(|c| c.hit(p)))
    }

    /// The deepest area containing the point, starting from the root
    pub fn deepest_at(&self, p: Point) -> Option<AreaId> {
        let root = self.get(self.root_id)?;
        if !root.hit(p) {
            return None;
        }

        let mut current = self.root_id;
        while let Some(child) = self.child_at(current, p) {
            current = child;
        }
        Some(current)
    }

    /// Substitute `new_id` for `old_id` among `parent_id`'s children,
    /// re-deriving the new subtree's parent, depth, and location. The old
    /// subtree is removed from the arena. Returns whether `old_id` was
    /// found.
    pub fn replace_child(
        &mut self,
        parent_id: AreaId,
        old_id: AreaId,
        new_id: AreaId,
    ) -> LayoutResult<bool> {
        let index = {
            let parent = self.node(parent_id)?;
            match parent.children.iter().position(|c| *c == old_id) {
                Some(i) => i,
                None => return Ok(false),
            }
        };

        let (depth, location) = {
            let parent = self.node(parent_id)?;
            (
                parent.depth + 1,
                format!("{}{}", parent.location, location_suffix(index)),
            )
        };

        self.node_mut(parent_id)?.children[index] = new_id;
        {
            let new_node = self.node_mut(new_id)?;
            new_node.parent = Some(parent_id);
            new_node.depth = depth;
            new_node.location = location;
        }
        self.propagate_tree_meta(new_id)?;
        self.remove_subtree(old_id);
        Ok(true)
    }

    /// All descendants of an area, depth-first (the area itself excluded)
    pub fn descendants(&self, id: AreaId) -> Vec<AreaId> {
        let mut result = Vec::new();
        self.collect_descendants(id, &mut result);
        result
    }

    fn collect_descendants(&self, id: AreaId, result: &mut Vec<AreaId>) {
        if let Some(node) = self.get(id) {
            for &child_id in &node.children {
                result.push(child_id);
                self.collect_descendants(child_id, result);
            }
        }
    }

    /// Image-slot leaves of the subtree rooted at `id`, in document order
    pub fn image_slots(&self, id: AreaId) -> Vec<AreaId> {
        let mut result = Vec::new();
        if self.get(id).is_some_and(|n| n.is_image()) {
            result.push(id);
        }
        for descendant in self.descendants(id) {
            if self.get(descendant).is_some_and(|n| n.is_image()) {
                result.push(descendant);
            }
        }
        result
    }

    /// Pretty print the tree for debugging
    pub fn pretty_print(&self) -> String {
        let mut output = String::new();
        self.print_node(self.root_id, &mut output);
        output
    }

    fn print_node(&self, id: AreaId, output: &mut String) {
        if let Some(node) = self.get(id) {
            let indent = "  ".repeat(node.depth as usize);
            let label = if node.location.is_empty() {
                "(root)"
            } else {
                node.location.as_str()
            };
            let detail = match &node.kind {
                AreaKind::Image { image: Some(image) } => format!(" {}", image.source),
                AreaKind::Image { image: None } => String::new(),
                AreaKind::Grid { rows, columns } => format!(" {}x{}", rows, columns),
                AreaKind::Split {
                    orientation,
                    percent,
                    ..
                } => format!(" {} {}%", orientation.as_str(), percent),
            };
            output.push_str(&format!(
                "{}{} {}{} [{},{} {}x{}]\n",
                indent,
                label,
                node.kind.name(),
                detail,
                node.bounds.x,
                node.bounds.y,
                node.bounds.width,
                node.bounds.height
            ));

            for &child_id in &node.children {
                self.print_node(child_id, output);
            }
        }
    }
}

impl Default for AreaTree {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AreaTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pretty_print())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_meta_consistent(tree: &AreaTree) {
        for id in std::iter::once(tree.root_id()).chain(tree.descendants(tree.root_id())) {
            let node = tree.get(id).unwrap();
            match node.parent {
                None => {
                    assert_eq!(id, tree.root_id());
                    assert_eq!(node.depth, 0);
                    assert_eq!(node.location, "");
                }
                Some(parent_id) => {
                    let parent = tree.get(parent_id).unwrap();
                    let index = parent.children.iter().position(|c| *c == id).unwrap();
                    assert_eq!(node.depth, parent.depth + 1);
                    assert_eq!(
                        node.location,
                        format!("{}{}", parent.location, location_suffix(index))
                    );
                }
            }
        }
    }

    #[test]
    fn test_new_tree_has_image_root() {
        let tree = AreaTree::new();
        assert_eq!(tree.len(), 1);
        assert!(tree.get(tree.root_id()).unwrap().is_image());
    }

    #[test]
    fn test_grid_creation_and_meta() {
        let mut tree = AreaTree::new();
        let grid = tree.create_grid_area(2, 2).unwrap();
        tree.set_root(grid).unwrap();

        let root = tree.get(tree.root_id()).unwrap();
        assert_eq!(root.children.len(), 4);
        assert_meta_consistent(&tree);

        let locations: Vec<String> = root
            .children
            .iter()
            .map(|c| tree.get(*c).unwrap().location.clone())
            .collect();
        assert_eq!(locations, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_nested_meta_propagation() {
        let mut tree = AreaTree::new();
        let split = tree.create_split_area(SplitOrientation::Vertical, 50).unwrap();
        tree.set_root(split).unwrap();

        // Replace the second split child with a grid
        let old = tree.get(split).unwrap().children[1];
        let grid = tree.create_grid_area(1, 2).unwrap();
        assert!(tree.replace_child(split, old, grid).unwrap());
        assert!(tree.get(old).is_none());

        assert_meta_consistent(&tree);
        let grid_node = tree.get(grid).unwrap();
        assert_eq!(grid_node.location, "b");
        assert_eq!(grid_node.depth, 1);
        let cell = tree.get(grid_node.children[1]).unwrap();
        assert_eq!(cell.location, "bb");
        assert_eq!(cell.depth, 2);
    }

    #[test]
    fn test_replace_child_not_found() {
        let mut tree = AreaTree::new();
        let split = tree.create_split_area(SplitOrientation::Vertical, 50).unwrap();
        tree.set_root(split).unwrap();

        let stranger = tree.create_image_area();
        let replacement = tree.create_image_area();
        assert!(!tree.replace_child(split, stranger, replacement).unwrap());
    }

    #[test]
    fn test_attach_children_count_mismatch() {
        let mut tree = AreaTree::new();
        let grid = tree
            .create_area(AreaKind::Grid { rows: 2, columns: 2 })
            .unwrap();
        let slots = vec![tree.create_image_area()];
        let err = tree.attach_children(grid, slots).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::ChildCountMismatch { expected: 4, actual: 1 }
        ));
    }

    #[test]
    fn test_attach_children_twice_fails() {
        let mut tree = AreaTree::new();
        let split = tree.create_split_area(SplitOrientation::Vertical, 50).unwrap();
        let slots = vec![tree.create_image_area(), tree.create_image_area()];
        assert!(tree.attach_children(split, slots).is_err());
    }

    #[test]
    fn test_create_area_validates_params() {
        let mut tree = AreaTree::new();
        assert!(matches!(
            tree.create_area(AreaKind::Grid { rows: 0, columns: 2 }),
            Err(LayoutError::InvalidGridShape { .. })
        ));
        assert!(matches!(
            tree.create_area(AreaKind::Split {
                orientation: SplitOrientation::Vertical,
                percent: 101,
                valid: false,
            }),
            Err(LayoutError::InvalidSplitPercent(101))
        ));
    }

    #[test]
    fn test_deepest_at_descends() {
        let mut tree = AreaTree::new();
        let grid = tree.create_grid_area(2, 2).unwrap();
        tree.set_root(grid).unwrap();
        tree.set_bounds(grid, Rect::new(0, 0, 1000, 1000)).unwrap();
        tree.revalidate(grid).unwrap();

        let top_left = tree.deepest_at(Point::new(10, 10)).unwrap();
        assert_eq!(tree.get(top_left).unwrap().location, "a");
        let bottom_right = tree.deepest_at(Point::new(990, 990)).unwrap();
        assert_eq!(tree.get(bottom_right).unwrap().location, "d");
        assert!(tree.deepest_at(Point::new(2000, 2000)).is_none());
    }

    #[test]
    fn test_set_image_on_non_slot_fails() {
        let mut tree = AreaTree::new();
        let grid = tree.create_grid_area(1, 1).unwrap();
        assert!(tree.set_image(grid, None).is_err());
    }

    #[test]
    fn test_remove_subtree_drops_descendants() {
        let mut tree = AreaTree::new();
        let grid = tree.create_grid_area(2, 2).unwrap();
        tree.set_root(grid).unwrap();
        assert_eq!(tree.len(), 5);

        tree.remove_subtree(grid);
        assert!(tree.is_empty());
    }
}
