//! Kontura Viewer Shell
//!
//! Viewer window, event handling, and interactive layout editing.

mod event;
mod image_loader;
mod library;

pub use image_loader::{load_image, rotate_quarter, ImageLoadError};
pub use library::ImageLibrary;

use std::path::PathBuf;
use std::rc::Rc;

use log::{debug, error, info, warn};

use kontura_layout::{AreaId, AreaKind, ImageRef, PageLayout, SplitOrientation};
use kontura_render::{
    build_display_list, CanvasTransform, RenderBackend, RenderColor, SdlBackend,
};
use kontura_template::save_template;

use crate::event::{poll_events, Modifiers, MouseButton, ViewerEvent};

/// Window padding around the page, in pixels
const CANVAS_PADDING: f32 = 24.0;

const WINDOW_BACKGROUND: RenderColor = RenderColor::rgb(48, 48, 48);

/// Viewer configuration
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: String::from("Kontura"),
        }
    }
}

/// Viewer window state
pub struct Viewer {
    pub config: ViewerConfig,
    backend: SdlBackend,
    page: PageLayout,
    transform: CanvasTransform,
    library: ImageLibrary,
    selected: Option<AreaId>,
    draw_outlines: bool,
    template_path: Option<PathBuf>,
}

impl Viewer {
    /// Create a new viewer window for a page layout
    pub fn new(
        config: ViewerConfig,
        page: PageLayout,
        library: ImageLibrary,
        template_path: Option<PathBuf>,
    ) -> Result<Self, String> {
        let backend = SdlBackend::new(&config.title, config.width, config.height)?;
        let transform = CanvasTransform::fit(
            page.width(),
            page.height(),
            config.width,
            config.height,
            CANVAS_PADDING,
        );

        Ok(Self {
            config,
            backend,
            page,
            transform,
            library,
            selected: None,
            draw_outlines: true,
            template_path,
        })
    }

    /// Run the viewer event loop
    pub fn run(&mut self) -> Result<(), String> {
        'running: loop {
            for event in poll_events() {
                match event {
                    ViewerEvent::Quit => break 'running,

                    ViewerEvent::KeyDown { scancode, modifiers } => {
                        if self.handle_key(scancode, modifiers) {
                            break 'running;
                        }
                    }

                    ViewerEvent::MouseDown { x, y, button } => {
                        if button == MouseButton::Left {
                            self.handle_click(x, y);
                        }
                    }

                    ViewerEvent::WindowResize { width, height } => {
                        self.config.width = width;
                        self.config.height = height;
                        self.backend.set_size(width, height);
                        self.refit();
                    }
                }
            }

            self.render();

            // ~60 FPS without busy-waiting
            std::thread::sleep(std::time::Duration::from_millis(16));
        }

        Ok(())
    }

    /// Handle a key press
    ///
    /// Returns true if the viewer should quit.
    fn handle_key(&mut self, scancode: u32, _modifiers: Modifiers) -> bool {
        use crate::event::{
            SCANCODE_DOWN, SCANCODE_ESCAPE, SCANCODE_G, SCANCODE_H, SCANCODE_I, SCANCODE_LEFT,
            SCANCODE_N, SCANCODE_O, SCANCODE_P, SCANCODE_Q, SCANCODE_R, SCANCODE_RIGHT,
            SCANCODE_S, SCANCODE_SPACE, SCANCODE_UP, SCANCODE_V, SCANCODE_X,
        };

        match scancode {
            SCANCODE_Q => return true,

            SCANCODE_ESCAPE => {
                if self.selected.is_some() {
                    self.selected = None;
                } else {
                    return true;
                }
            }

            SCANCODE_SPACE | SCANCODE_N => self.show_library_image(true),
            SCANCODE_P => self.show_library_image(false),
            SCANCODE_X => self.clear_selected_image(),
            SCANCODE_R => self.rotate_selected_image(),

            SCANCODE_I => self.convert_selected(AreaKind::Image { image: None }),
            SCANCODE_G => self.convert_selected(AreaKind::Grid { rows: 2, columns: 2 }),
            SCANCODE_V => self.set_split(SplitOrientation::Vertical),
            SCANCODE_H => self.set_split(SplitOrientation::Horizontal),

            SCANCODE_UP => self.adjust_selected(1, 0),
            SCANCODE_DOWN => self.adjust_selected(-1, 0),
            SCANCODE_RIGHT => self.adjust_selected(0, 1),
            SCANCODE_LEFT => self.adjust_selected(0, -1),

            SCANCODE_O => {
                self.draw_outlines = !self.draw_outlines;
            }

            SCANCODE_S => self.save(),

            _ => {}
        }

        false
    }

    /// Handle a mouse click: select the deepest area under the pointer
    fn handle_click(&mut self, x: f32, y: f32) {
        let point = self.transform.px_to_page(x, y);
        self.selected = self.page.tree().deepest_at(point);
        match self.selected {
            Some(id) => {
                if let Some(node) = self.page.tree().get(id) {
                    debug!(
                        "selected {} area \"{}\" at {:?}",
                        node.kind.name(),
                        node.location,
                        point
                    );
                }
            }
            None => debug!("click outside the page at {:?}", point),
        }
    }

    /// Put the next or previous library image into the selected slot
    fn show_library_image(&mut self, forward: bool) {
        let Some(id) = self.selected_image_slot() else {
            return;
        };

        let path = if forward {
            self.library.next()
        } else {
            self.library.prev()
        };
        let Some(path) = path.map(PathBuf::from) else {
            warn!("image library is empty");
            return;
        };

        match load_image(&path) {
            Ok(pixels) => {
                let image = ImageRef {
                    source: path.display().to_string(),
                    pixels: Some(pixels),
                };
                if let Err(e) = self.page.tree_mut().set_image(id, Some(image)) {
                    error!("failed to show image: {}", e);
                }
            }
            Err(e) => error!("{}", e),
        }
    }

    fn clear_selected_image(&mut self) {
        if let Some(id) = self.selected_image_slot() {
            let _ = self.page.tree_mut().set_image(id, None);
        }
    }

    /// Rotate the displayed image in the selected slot a quarter turn
    fn rotate_selected_image(&mut self) {
        let Some(id) = self.selected_image_slot() else {
            return;
        };

        let rotated = self
            .page
            .tree()
            .get(id)
            .and_then(|node| node.image())
            .and_then(|image| {
                image.pixels.as_ref().map(|pixels| ImageRef {
                    source: image.source.clone(),
                    pixels: Some(Rc::new(rotate_quarter(pixels))),
                })
            });

        if let Some(image) = rotated {
            let _ = self.page.tree_mut().set_image(id, Some(image));
        }
    }

    /// Replace the selected area's variant, keeping displayed images
    fn convert_selected(&mut self, kind: AreaKind) {
        let Some(id) = self.selected else {
            return;
        };
        match self.page.convert_area(id, kind) {
            Ok(new_id) => self.selected = Some(new_id),
            Err(e) => error!("convert failed: {}", e),
        }
    }

    /// Make the selected area a split, or re-orient an existing one
    fn set_split(&mut self, orientation: SplitOrientation) {
        let Some(id) = self.selected else {
            return;
        };
        if self.page.tree().get(id).is_some_and(|n| n.is_split()) {
            if let Err(e) = self.page.tree_mut().set_split_orientation(id, orientation) {
                error!("orientation change failed: {}", e);
            }
            return;
        }
        match self.page.split_area(id, orientation) {
            Ok(new_id) => self.selected = Some(new_id),
            Err(e) => error!("split failed: {}", e),
        }
    }

    /// Adjust the selected area's subdivision parameters: rows/percent on
    /// the vertical axis, columns on the horizontal axis
    fn adjust_selected(&mut self, vertical: i32, horizontal: i32) {
        let Some(id) = self.selected else {
            return;
        };
        let kind = match self.page.tree().get(id) {
            Some(node) => node.kind.clone(),
            None => return,
        };

        let result = match kind {
            AreaKind::Grid { rows, columns } => {
                let rows = (rows as i32 + vertical).max(1) as u32;
                let columns = (columns as i32 + horizontal).max(1) as u32;
                self.page.tree_mut().set_grid_shape(id, rows, columns)
            }
            AreaKind::Split { percent, .. } => {
                let percent = (percent as i32 + vertical * 5).clamp(0, 100) as u32;
                self.page.tree_mut().set_split_percent(id, percent)
            }
            AreaKind::Image { .. } => return,
        };

        if let Err(e) = result {
            error!("adjust failed: {}", e);
        }
    }

    /// Save the layout back to its template file
    fn save(&mut self) {
        let path = self
            .template_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("layout.xml"));
        match save_template(&self.page, &path) {
            Ok(()) => info!("saved {}", path.display()),
            Err(e) => error!("save failed: {}", e),
        }
    }

    /// The selected area if it is an image slot
    fn selected_image_slot(&self) -> Option<AreaId> {
        let id = self.selected?;
        self.page.tree().get(id).filter(|n| n.is_image())?;
        Some(id)
    }

    /// Refit the page into the current window
    fn refit(&mut self) {
        self.transform = CanvasTransform::fit(
            self.page.width(),
            self.page.height(),
            self.config.width,
            self.config.height,
            CANVAS_PADDING,
        );
    }

    /// Render the viewer
    fn render(&mut self) {
        self.backend.clear(WINDOW_BACKGROUND);

        let display_list =
            build_display_list(&self.page, &self.transform, self.selected, self.draw_outlines);
        self.backend.render(&display_list);

        self.backend.present();
    }
}
