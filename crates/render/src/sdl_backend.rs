//! SDL2 Render Backend
//!
//! Implements rendering using SDL2.

use log::warn;
use sdl2::pixels::{Color as SdlColor, PixelFormatEnum};
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{BlendMode, Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::Sdl;

use kontura_layout::ImagePixels;

use crate::canvas::PxRect;
use crate::display_list::{DisplayList, PaintCommand};
use crate::paint::RenderColor;
use crate::RenderBackend;

/// SDL2-based render backend
pub struct SdlBackend {
    sdl_context: Sdl,
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
}

impl SdlBackend {
    /// Create a new SDL backend with a window
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();

        Ok(Self {
            sdl_context,
            canvas,
            texture_creator,
            width,
            height,
        })
    }

    /// Get the SDL context for event handling
    pub fn sdl_context(&self) -> &Sdl {
        &self.sdl_context
    }

    /// Record a new window size after a resize event
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Draw a filled rectangle
    fn draw_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: RenderColor) {
        self.canvas
            .set_draw_color(SdlColor::RGBA(color.r, color.g, color.b, color.a));
        let rect = SdlRect::new(x, y, w, h);
        let _ = self.canvas.fill_rect(rect);
    }

    /// Draw a rectangle outline as four filled strips
    fn stroke_rect(&mut self, rect: &PxRect, width: f32, color: RenderColor) {
        let x = rect.x as i32;
        let y = rect.y as i32;
        let w = rect.width.max(0.0) as u32;
        let h = rect.height.max(0.0) as u32;
        let t = (width.max(1.0)) as u32;

        self.draw_rect(x, y, w, t, color);
        self.draw_rect(x, y + h as i32 - t as i32, w, t, color);
        self.draw_rect(x, y, t, h, color);
        self.draw_rect(x + w as i32 - t as i32, y, t, h, color);
    }

    /// Draw decoded image pixels, streamed into a texture
    fn draw_image(&mut self, rect: &PxRect, img: &ImagePixels) {
        if img.width == 0 || img.height == 0 || img.data.is_empty() {
            return;
        }

        let mut texture = match self.texture_creator.create_texture_streaming(
            PixelFormatEnum::RGBA32,
            img.width,
            img.height,
        ) {
            Ok(t) => t,
            Err(e) => {
                warn!("texture creation failed: {}", e);
                return;
            }
        };
        texture.set_blend_mode(BlendMode::Blend);

        let pitch = (img.width * 4) as usize;
        if let Err(e) = texture.update(None, &img.data, pitch) {
            warn!("texture upload failed: {}", e);
            return;
        }

        let dst_rect = SdlRect::new(
            rect.x as i32,
            rect.y as i32,
            rect.width.max(0.0) as u32,
            rect.height.max(0.0) as u32,
        );
        let _ = self.canvas.copy(&texture, None, dst_rect);
    }
}

impl RenderBackend for SdlBackend {
    fn clear(&mut self, color: RenderColor) {
        self.canvas
            .set_draw_color(SdlColor::RGBA(color.r, color.g, color.b, color.a));
        self.canvas.clear();
    }

    fn render(&mut self, display_list: &DisplayList) {
        for command in &display_list.commands {
            match command {
                PaintCommand::FillRect { rect, color } => {
                    self.draw_rect(
                        rect.x as i32,
                        rect.y as i32,
                        rect.width.max(0.0) as u32,
                        rect.height.max(0.0) as u32,
                        *color,
                    );
                }
                PaintCommand::StrokeRect { rect, width, color } => {
                    self.stroke_rect(rect, *width, *color);
                }
                PaintCommand::DrawImage { rect, pixels } => {
                    self.draw_image(rect, pixels);
                }
            }
        }
    }

    fn present(&mut self) {
        self.canvas.present();
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}
