//! Grid area geometry
//!
//! Lays out a regular rows x columns subdivision and transfers children
//! positionally when the grid is reshaped.

use kontura_geom::Rect;
use log::debug;
use smallvec::SmallVec;

use crate::error::{LayoutError, LayoutResult};
use crate::node::{AreaId, AreaKind};
use crate::tree::AreaTree;

/// Recompute the cell bounds of a grid area and revalidate its subtree.
///
/// Each cell gets `(inner - (n-1)*spacing) / n` of the inner rectangle in
/// each dimension; integer division drops the remainder rather than
/// redistributing it. Cells are placed row-major with the spacing as gap.
pub(crate) fn revalidate(tree: &mut AreaTree, id: AreaId) -> LayoutResult<()> {
    let (rows, columns, inner, spacing, children) = {
        let node = tree
            .get(id)
            .ok_or(LayoutError::AreaNotFound(id.0))?;
        let (rows, columns) = match node.kind {
            AreaKind::Grid { rows, columns } => (rows, columns),
            _ => {
                return Err(LayoutError::InvalidOperation(format!(
                    "area {} is not a grid",
                    id.0
                )))
            }
        };
        (
            rows,
            columns,
            node.bounds_in_margin(),
            node.spacing,
            node.children.clone(),
        )
    };

    if rows == 0 || columns == 0 {
        // Degenerate shape from mid-edit state: drop to no children
        debug!("grid {} has zero rows or columns, clearing children", id.0);
        for child in children {
            tree.remove_subtree(child);
        }
        if let Some(node) = tree.get_mut(id) {
            node.children.clear();
        }
        return Ok(());
    }

    let expected = (rows as usize) * (columns as usize);
    if children.len() != expected {
        return Err(LayoutError::ChildCountMismatch {
            expected,
            actual: children.len(),
        });
    }

    let cell_width = ((inner.width - (columns as i32 - 1) * spacing.width) / columns as i32).max(0);
    let cell_height = ((inner.height - (rows as i32 - 1) * spacing.height) / rows as i32).max(0);

    for row in 0..rows as i32 {
        for column in 0..columns as i32 {
            let child = children[(row * columns as i32 + column) as usize];
            let cell = Rect::new(
                inner.x + column * (cell_width + spacing.width),
                inner.y + row * (cell_height + spacing.height),
                cell_width,
                cell_height,
            );
            tree.set_bounds(child, cell)?;
            tree.revalidate(child)?;
        }
    }

    Ok(())
}

/// Rebuild a grid's child array for a new shape.
///
/// Children on the overlapping row/column region keep their subtree (the
/// child previously at (r, c) stays at (r, c)); slots outside it are
/// dropped, new slots become empty image areas. Content moved across a
/// simultaneous rows-for-columns trade is not repacked; that is a known,
/// deliberate limitation.
pub(crate) fn reshape(
    tree: &mut AreaTree,
    id: AreaId,
    old_rows: u32,
    old_columns: u32,
    new_rows: u32,
    new_columns: u32,
) -> LayoutResult<()> {
    let old_children = tree
        .get(id)
        .ok_or(LayoutError::AreaNotFound(id.0))?
        .children
        .clone();
    let old_expected = (old_rows as usize) * (old_columns as usize);
    if old_children.len() != old_expected {
        return Err(LayoutError::ChildCountMismatch {
            expected: old_expected,
            actual: old_children.len(),
        });
    }

    let mut new_children: SmallVec<[AreaId; 8]> = SmallVec::new();
    for row in 0..new_rows {
        for column in 0..new_columns {
            if row < old_rows && column < old_columns {
                new_children.push(old_children[(row * old_columns + column) as usize]);
            } else {
                let slot = tree.create_image_area();
                new_children.push(slot);
            }
        }
    }

    // Drop old children outside the overlap
    for row in 0..old_rows {
        for column in 0..old_columns {
            if row >= new_rows || column >= new_columns {
                tree.remove_subtree(old_children[(row * old_columns + column) as usize]);
            }
        }
    }

    for &child in &new_children {
        if let Some(node) = tree.get_mut(child) {
            node.parent = Some(id);
        }
    }
    if let Some(node) = tree.get_mut(id) {
        node.children = new_children;
    }
    Ok(())
}
