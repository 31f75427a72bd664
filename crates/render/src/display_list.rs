//! Display List
//!
//! Converts a page layout to paint commands in window-pixel space.

use std::rc::Rc;

use kontura_layout::{AreaId, AreaTree, ImagePixels, PageLayout};

use crate::canvas::{CanvasTransform, PxRect};
use crate::paint::RenderColor;

const PAGE_COLOR: RenderColor = RenderColor::white();
const EMPTY_SLOT_COLOR: RenderColor = RenderColor::rgb(244, 244, 244);
const OUTLINE_COLOR: RenderColor = RenderColor::rgb(96, 96, 96);
const SELECTION_COLOR: RenderColor = RenderColor::rgb(0, 120, 212);

/// A display list of paint commands
#[derive(Debug, Default, Clone)]
pub struct DisplayList {
    pub commands: Vec<PaintCommand>,
}

/// A paint command
#[derive(Debug, Clone)]
pub enum PaintCommand {
    /// Fill a rectangle with a solid color
    FillRect { rect: PxRect, color: RenderColor },
    /// Outline a rectangle
    StrokeRect {
        rect: PxRect,
        width: f32,
        color: RenderColor,
    },
    /// Draw decoded image pixels
    DrawImage {
        rect: PxRect,
        pixels: Rc<ImagePixels>,
    },
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: PaintCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Build a display list for a page.
///
/// The page background is painted first, then each area's content and
/// outline followed by its children; the selected area's highlight is
/// painted after its whole subtree so it stays visible on top.
pub fn build_display_list(
    page: &PageLayout,
    transform: &CanvasTransform,
    selected: Option<AreaId>,
    draw_outlines: bool,
) -> DisplayList {
    let mut list = DisplayList::new();

    list.push(PaintCommand::FillRect {
        rect: transform.rect_to_px(kontura_geom::Rect::new(0, 0, page.width(), page.height())),
        color: PAGE_COLOR,
    });

    paint_area(
        &mut list,
        page.tree(),
        page.root_id(),
        transform,
        selected,
        draw_outlines,
    );
    list
}

fn paint_area(
    list: &mut DisplayList,
    tree: &AreaTree,
    id: AreaId,
    transform: &CanvasTransform,
    selected: Option<AreaId>,
    draw_outlines: bool,
) {
    let node = match tree.get(id) {
        Some(node) => node,
        None => return,
    };

    let inner = node.bounds_in_margin();
    if !inner.is_degenerate() {
        let inner_px = transform.rect_to_px(inner);

        if node.is_image() {
            match node.image().and_then(|image| image.pixels.clone()) {
                Some(pixels) => {
                    let rect = fit_image(inner_px, pixels.width, pixels.height);
                    list.push(PaintCommand::DrawImage { rect, pixels });
                }
                None => {
                    list.push(PaintCommand::FillRect {
                        rect: inner_px,
                        color: EMPTY_SLOT_COLOR,
                    });
                }
            }
        }

        if draw_outlines {
            let width = (node.border_width as f32 * transform.scale()).max(1.0);
            list.push(PaintCommand::StrokeRect {
                rect: inner_px,
                width,
                color: OUTLINE_COLOR,
            });
        }
    }

    for &child in &node.children {
        paint_area(list, tree, child, transform, selected, draw_outlines);
    }

    // Selection on top of the subtree
    if selected == Some(id) && !inner.is_degenerate() {
        list.push(PaintCommand::StrokeRect {
            rect: transform.rect_to_px(inner),
            width: 3.0,
            color: SELECTION_COLOR,
        });
    }
}

/// Largest aspect-preserving rectangle for an image inside a slot,
/// centered in both dimensions
fn fit_image(slot: PxRect, image_width: u32, image_height: u32) -> PxRect {
    if image_width == 0 || image_height == 0 {
        return slot;
    }
    let scale = (slot.width / image_width as f32).min(slot.height / image_height as f32);
    let width = image_width as f32 * scale;
    let height = image_height as f32 * scale;
    PxRect::new(
        slot.x + (slot.width - width) / 2.0,
        slot.y + (slot.height - height) / 2.0,
        width,
        height,
    )
}
