//! Background image loading

use std::path::Path;

use image::error::{ParameterError, ParameterErrorKind};

use crate::renderer::{Rgba, Surface, colors};
use crate::sim::Rect;

/// Decode an image file into a surface
pub fn load_background(path: impl AsRef<Path>) -> Result<Surface, image::ImageError> {
    let path = path.as_ref();
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Surface::from_rgba8(width, height, rgba.as_raw()).ok_or_else(|| {
        image::ImageError::Parameter(ParameterError::from_kind(
            ParameterErrorKind::DimensionMismatch,
        ))
    })
}

/// Generated stand-in background: night-sky gradient with faint horizontal bands
pub fn procedural_background(width: u32, height: u32) -> Surface {
    let mut surface = Surface::new(width, height);
    surface.fill_gradient(colors::SKY_TOP, colors::SKY_BOTTOM);

    let band = Rgba::new(255, 255, 255, 12);
    let w = surface.width() as i32;
    let h = surface.height() as i32;
    let spacing = (h / 8).max(4);
    let mut y = spacing / 2;
    while y < h {
        surface.fill_rect(Rect::new(0, y, w, (spacing / 6).max(1)), band);
        y += spacing;
    }
    surface
}

/// Load the configured background, falling back to the generated one
pub fn background_or_fallback(path: impl AsRef<Path>, width: u32, height: u32) -> Surface {
    let path = path.as_ref();
    match load_background(path) {
        Ok(surface) => {
            log::info!(
                "Loaded background {} ({}x{})",
                path.display(),
                surface.width(),
                surface.height()
            );
            surface
        }
        Err(e) => {
            log::warn!("Failed to load background {}: {}, using generated one", path.display(), e);
            procedural_background(width, height)
        }
    }
}
