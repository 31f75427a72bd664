//! Image Loading
//!
//! Loads and decodes images from files into shared pixel buffers.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use image::GenericImageView;
use kontura_layout::ImagePixels;
use log::debug;
use thiserror::Error;

/// Image loading error
#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: String,
        source: image::ImageError,
    },
}

/// Load and decode an image file to shared RGBA pixel data
pub fn load_image(path: &Path) -> Result<Rc<ImagePixels>, ImageLoadError> {
    let bytes = fs::read(path).map_err(|source| ImageLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let img = image::load_from_memory(&bytes).map_err(|source| ImageLoadError::Decode {
        path: path.display().to_string(),
        source,
    })?;

    let (width, height) = img.dimensions();
    let data = img.to_rgba8().into_raw();
    debug!("decoded {} ({}x{})", path.display(), width, height);

    Ok(Rc::new(ImagePixels {
        width,
        height,
        data,
    }))
}

/// Rotate pixels a quarter turn clockwise
pub fn rotate_quarter(img: &ImagePixels) -> ImagePixels {
    let w = img.width as usize;
    let h = img.height as usize;
    let mut data = vec![0u8; img.data.len()];

    for y in 0..h {
        for x in 0..w {
            let src = (y * w + x) * 4;
            // (x, y) lands at (h-1-y, x) in the rotated image
            let dst = (x * h + (h - 1 - y)) * 4;
            data[dst..dst + 4].copy_from_slice(&img.data[src..src + 4]);
        }
    }

    ImagePixels {
        width: img.height,
        height: img.width,
        data,
    }
}
