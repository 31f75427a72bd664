//! Page canvas transform
//!
//! Maps between page-unit space and window-pixel space. The page is
//! fitted into the window with a uniform scale and some padding; the
//! inverse mapping turns pointer positions back into page coordinates
//! for hit tests.

use kontura_geom::{Point, Rect};

/// A rectangle in window-pixel space
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PxRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PxRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

/// Uniform page-to-window transform
#[derive(Debug, Clone, Copy)]
pub struct CanvasTransform {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
}

impl CanvasTransform {
    /// Fit a page into a window, centered, with the given pixel padding
    /// on every side. Degenerate page or window sizes fall back to an
    /// identity-ish transform instead of dividing by zero.
    pub fn fit(
        page_width: i32,
        page_height: i32,
        window_width: u32,
        window_height: u32,
        padding: f32,
    ) -> Self {
        let usable_w = (window_width as f32 - 2.0 * padding).max(1.0);
        let usable_h = (window_height as f32 - 2.0 * padding).max(1.0);

        if page_width <= 0 || page_height <= 0 {
            return Self {
                scale: 1.0,
                offset_x: padding,
                offset_y: padding,
            };
        }

        let scale = (usable_w / page_width as f32).min(usable_h / page_height as f32);
        let offset_x = (window_width as f32 - page_width as f32 * scale) / 2.0;
        let offset_y = (window_height as f32 - page_height as f32 * scale) / 2.0;

        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Map a page-unit point to window pixels
    pub fn page_to_px(&self, p: Point) -> (f32, f32) {
        (
            self.offset_x + p.x as f32 * self.scale,
            self.offset_y + p.y as f32 * self.scale,
        )
    }

    /// Map a page-unit rectangle to window pixels
    pub fn rect_to_px(&self, r: Rect) -> PxRect {
        let (x, y) = self.page_to_px(Point::new(r.x, r.y));
        PxRect::new(x, y, r.width as f32 * self.scale, r.height as f32 * self.scale)
    }

    /// Map a window-pixel position back to page units
    pub fn px_to_page(&self, x: f32, y: f32) -> Point {
        Point::new(
            ((x - self.offset_x) / self.scale).round() as i32,
            ((y - self.offset_y) / self.scale).round() as i32,
        )
    }
}
