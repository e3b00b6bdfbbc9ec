//! CPU-side RGBA surfaces
//!
//! Everything is drawn into plain pixel buffers: the zoomed world view, the
//! cached background and the final output frame.

use std::path::Path;

use bytemuck::{Pod, Zeroable};
use glam::IVec2;

use crate::sim::Rect;

/// 8-bit RGBA color, laid out to be byte-castable
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Source-over blend of `self` onto `dst`, with an extra opacity multiplier
    #[inline]
    pub fn blend_over(self, dst: Rgba, opacity: u8) -> Rgba {
        let a = self.a as u32 * opacity as u32 / 255;
        if a == 255 {
            return self.with_alpha(255);
        }
        if a == 0 {
            return dst;
        }
        let inv = 255 - a;
        let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv) / 255) as u8;
        Rgba::new(
            mix(self.r, dst.r),
            mix(self.g, dst.g),
            mix(self.b, dst.b),
            (a + dst.a as u32 * inv / 255).min(255) as u8,
        )
    }

    /// Linear interpolation between two colors
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const PLATFORM: Rgba = Rgba::rgb(90, 96, 120);
    pub const HAZARD: Rgba = Rgba::rgb(220, 60, 60);
    pub const CHECKPOINT: Rgba = Rgba::rgb(80, 200, 120);
    pub const EXIT: Rgba = Rgba::rgb(250, 210, 80);
    pub const SIGN: Rgba = Rgba::rgb(160, 120, 70);
    pub const ORB: Rgba = Rgba::rgb(120, 200, 255);
    pub const BOSS: Rgba = Rgba::rgb(150, 40, 160);
    pub const PLAYER: Rgba = Rgba::rgb(240, 240, 250);
    pub const SKY_TOP: Rgba = Rgba::rgb(12, 14, 32);
    pub const SKY_BOTTOM: Rgba = Rgba::rgb(46, 30, 70);
}

/// An owned RGBA pixel buffer
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Create a surface filled with opaque black. Zero dimensions are raised to 1.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, colors::BLACK)
    }

    pub fn filled(width: u32, height: u32, color: Rgba) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Wrap raw RGBA bytes. Returns `None` if the length does not match.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if width == 0 || height == 0 || bytes.len() != (width * height * 4) as usize {
            return None;
        }
        let pixels = bytemuck::cast_slice::<u8, Rgba>(bytes).to_vec();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width as i32, self.height as i32)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgba> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[(y as u32 * self.width + x as u32) as usize])
    }

    pub fn fill(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, blending by the color's alpha. Clipped to the surface.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some(area) = rect.clip(&self.rect()) else {
            return;
        };
        let width = self.width as usize;
        for y in area.top()..area.bottom() {
            let row = y as usize * width;
            for x in area.left()..area.right() {
                let px = &mut self.pixels[row + x as usize];
                *px = color.blend_over(*px, 255);
            }
        }
    }

    /// Draw a rectangle outline `thickness` pixels wide, inside the rect
    pub fn stroke_rect(&mut self, rect: Rect, color: Rgba, thickness: i32) {
        let t = thickness.max(1).min(rect.w.min(rect.h).max(1));
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - t, rect.w, t), color);
        self.fill_rect(Rect::new(rect.x, rect.y + t, t, rect.h - 2 * t), color);
        self.fill_rect(Rect::new(rect.right() - t, rect.y + t, t, rect.h - 2 * t), color);
    }

    /// Copy `src` with its top-left at `pos`, blending with `opacity`
    pub fn blit(&mut self, src: &Surface, pos: IVec2, opacity: u8) {
        if opacity == 0 {
            return;
        }
        let dst_area = Rect::new(pos.x, pos.y, src.width as i32, src.height as i32);
        let Some(area) = dst_area.clip(&self.rect()) else {
            return;
        };
        let width = self.width as usize;
        let src_width = src.width as usize;
        for y in area.top()..area.bottom() {
            let sy = (y - pos.y) as usize;
            for x in area.left()..area.right() {
                let sx = (x - pos.x) as usize;
                let s = src.pixels[sy * src_width + sx];
                let d = &mut self.pixels[y as usize * width + x as usize];
                *d = s.blend_over(*d, opacity);
            }
        }
    }

    /// Nearest-neighbour resample to a new size (each dimension at least 1)
    pub fn scaled(&self, width: u32, height: u32) -> Surface {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.width && height == self.height {
            return self.clone();
        }
        let mut pixels = Vec::with_capacity((width * height) as usize);
        for y in 0..height {
            let sy = (y as u64 * self.height as u64 / height as u64) as u32;
            let row = (sy * self.width) as usize;
            for x in 0..width {
                let sx = (x as u64 * self.width as u64 / width as u64) as usize;
                pixels.push(self.pixels[row + sx]);
            }
        }
        Surface {
            width,
            height,
            pixels,
        }
    }

    /// Fill with a vertical gradient, `top` at row 0
    pub fn fill_gradient(&mut self, top: Rgba, bottom: Rgba) {
        let h = self.height;
        let width = self.width as usize;
        for y in 0..h {
            let t = if h > 1 { y as f32 / (h - 1) as f32 } else { 0.0 };
            let color = top.lerp(bottom, t);
            let row = y as usize * width;
            self.pixels[row..row + width].fill(color);
        }
    }

    /// Write the surface as a PNG file
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        image::save_buffer(
            path,
            self.as_bytes(),
            self.width,
            self.height,
            image::ExtendedColorType::Rgba8,
        )
    }
}
