//! Split area geometry
//!
//! Lays out a binary subdivision at a percentage along one axis.

use kontura_geom::Rect;

use crate::error::{LayoutError, LayoutResult};
use crate::node::{AreaId, AreaKind, SplitOrientation};
use crate::tree::AreaTree;

/// Recompute the two child rectangles of a split area.
///
/// A no-op while the split is marked valid; the flag is cleared whenever
/// percent, orientation, or the split's own bounds change. The leading
/// child gets `floor((axis - spacing) * percent / 100)`, the trailing
/// child the rest, so the two children plus the spacing always cover the
/// inner rectangle exactly.
pub(crate) fn revalidate(tree: &mut AreaTree, id: AreaId) -> LayoutResult<()> {
    let (orientation, percent, valid, inner, spacing, children) = {
        let node = tree
            .get(id)
            .ok_or(LayoutError::AreaNotFound(id.0))?;
        let (orientation, percent, valid) = match node.kind {
            AreaKind::Split {
                orientation,
                percent,
                valid,
            } => (orientation, percent, valid),
            _ => {
                return Err(LayoutError::InvalidOperation(format!(
                    "area {} is not a split",
                    id.0
                )))
            }
        };
        (
            orientation,
            percent,
            valid,
            node.bounds_in_margin(),
            node.spacing,
            node.children.clone(),
        )
    };

    if children.len() != 2 {
        return Err(LayoutError::ChildCountMismatch {
            expected: 2,
            actual: children.len(),
        });
    }

    if valid {
        return Ok(());
    }

    let (first, second) = match orientation {
        SplitOrientation::Vertical => {
            let usable = (inner.height - spacing.height).max(0);
            let lead = usable * percent as i32 / 100;
            (
                Rect::new(inner.x, inner.y, inner.width, lead),
                Rect::new(
                    inner.x,
                    inner.y + lead + spacing.height,
                    inner.width,
                    inner.height - spacing.height - lead,
                ),
            )
        }
        SplitOrientation::Horizontal => {
            let usable = (inner.width - spacing.width).max(0);
            let lead = usable * percent as i32 / 100;
            (
                Rect::new(inner.x, inner.y, lead, inner.height),
                Rect::new(
                    inner.x + lead + spacing.width,
                    inner.y,
                    inner.width - spacing.width - lead,
                    inner.height,
                ),
            )
        }
    };

    tree.set_bounds(children[0], first)?;
    tree.set_bounds(children[1], second)?;
    tree.revalidate(children[0])?;
    tree.revalidate(children[1])?;

    if let Some(AreaKind::Split { valid, .. }) = tree.get_mut(id).map(|n| &mut n.kind) {
        *valid = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kontura_geom::Spacing;

    fn split_tree(orientation: SplitOrientation, percent: u32) -> (AreaTree, AreaId) {
        let mut tree = AreaTree::new();
        let split = tree.create_split_area(orientation, percent).unwrap();
        tree.set_root(split).unwrap();
        tree.set_bounds(split, Rect::new(0, 0, 1000, 900)).unwrap();
        (tree, split)
    }

    #[test]
    fn test_vertical_split_bounds() {
        let (mut tree, split) = split_tree(SplitOrientation::Vertical, 30);
        tree.set_spacing(split, Spacing::new(0, 100)).unwrap();
        tree.revalidate(split).unwrap();

        let node = tree.get(split).unwrap();
        let first = tree.get(node.children[0]).unwrap().bounds;
        let second = tree.get(node.children[1]).unwrap().bounds;

        // floor((900 - 100) * 30 / 100) = 240
        assert_eq!(first, Rect::new(0, 0, 1000, 240));
        assert_eq!(second, Rect::new(0, 340, 1000, 560));
        assert_eq!(first.height + 100 + second.height, 900);
    }

    #[test]
    fn test_horizontal_split_bounds() {
        let (mut tree, split) = split_tree(SplitOrientation::Horizontal, 50);
        tree.set_spacing(split, Spacing::new(100, 0)).unwrap();
        tree.revalidate(split).unwrap();

        let node = tree.get(split).unwrap();
        let first = tree.get(node.children[0]).unwrap().bounds;
        let second = tree.get(node.children[1]).unwrap().bounds;

        assert_eq!(first, Rect::new(0, 0, 450, 900));
        assert_eq!(second, Rect::new(550, 0, 450, 900));
        assert_eq!(first.width + 100 + second.width, 1000);
    }

    #[test]
    fn test_same_value_is_noop() {
        let (mut tree, split) = split_tree(SplitOrientation::Vertical, 50);
        tree.revalidate(split).unwrap();

        // Setting the current percent must not invalidate
        tree.set_split_percent(split, 50).unwrap();
        match tree.get(split).unwrap().kind {
            AreaKind::Split { valid, .. } => assert!(valid),
            _ => unreachable!(),
        }

        tree.set_split_percent(split, 60).unwrap();
        match tree.get(split).unwrap().kind {
            AreaKind::Split { percent, valid, .. } => {
                assert_eq!(percent, 60);
                // revalidate ran, geometry is current again
                assert!(valid);
            }
            _ => unreachable!(),
        }
        let first = tree.get(tree.get(split).unwrap().children[0]).unwrap();
        assert_eq!(first.bounds.height, 540);
    }

    #[test]
    fn test_bounds_change_invalidates() {
        let (mut tree, split) = split_tree(SplitOrientation::Vertical, 50);
        tree.revalidate(split).unwrap();

        tree.set_bounds(split, Rect::new(0, 0, 1000, 500)).unwrap();
        match tree.get(split).unwrap().kind {
            AreaKind::Split { valid, .. } => assert!(!valid),
            _ => unreachable!(),
        }
        tree.revalidate(split).unwrap();
        let first = tree.get(tree.get(split).unwrap().children[0]).unwrap();
        assert_eq!(first.bounds.height, 250);
    }

    #[test]
    fn test_out_of_range_percent_rejected() {
        let (mut tree, split) = split_tree(SplitOrientation::Vertical, 50);
        assert!(matches!(
            tree.set_split_percent(split, 101),
            Err(LayoutError::InvalidSplitPercent(101))
        ));
        // Prior value untouched
        match tree.get(split).unwrap().kind {
            AreaKind::Split { percent, .. } => assert_eq!(percent, 50),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_degenerate_spacing_larger_than_axis() {
        let (mut tree, split) = split_tree(SplitOrientation::Vertical, 50);
        tree.set_bounds(split, Rect::new(0, 0, 1000, 50)).unwrap();
        tree.set_spacing(split, Spacing::new(0, 100)).unwrap();
        // Must not panic; children may be degenerate
        tree.revalidate(split).unwrap();
        let node = tree.get(split).unwrap();
        assert_eq!(tree.get(node.children[0]).unwrap().bounds.height, 0);
    }

    #[test]
    fn test_orientation_change_relayouts() {
        let (mut tree, split) = split_tree(SplitOrientation::Vertical, 50);
        tree.revalidate(split).unwrap();

        tree.set_split_orientation(split, SplitOrientation::Horizontal)
            .unwrap();
        let node = tree.get(split).unwrap();
        let first = tree.get(node.children[0]).unwrap().bounds;
        assert_eq!(first, Rect::new(0, 0, 500, 900));
    }
}
