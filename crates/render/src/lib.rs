//! Kontura Render Engine
//!
//! Painting and display list generation.

mod canvas;
mod display_list;
mod paint;
mod sdl_backend;

pub use canvas::{CanvasTransform, PxRect};
pub use display_list::{build_display_list, DisplayList, PaintCommand};
pub use paint::RenderColor;
pub use sdl_backend::SdlBackend;

/// Trait for render backends
pub trait RenderBackend {
    /// Clear the screen with a color
    fn clear(&mut self, color: RenderColor);

    /// Execute a display list
    fn render(&mut self, display_list: &DisplayList);

    /// Present the rendered frame
    fn present(&mut self);

    /// Get the window width
    fn width(&self) -> u32;

    /// Get the window height
    fn height(&self) -> u32;
}
