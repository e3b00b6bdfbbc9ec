//! Zoomable camera centered on the player
//!
//! The camera is derived from the player position every frame and never
//! carried as authoritative state. All world-to-screen math uses the integer
//! origin computed here so the speedline burst and the renderer agree on
//! what is visible.

use glam::{IVec2, UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM, PARALLAX_FACTOR, ZOOM_STEP};

/// Zoom factor, always inside `[MIN_ZOOM, MAX_ZOOM]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Zoom(f32);

impl Zoom {
    /// Clamp into range. NaN and infinities fall back to 1.0.
    pub fn new(value: f32) -> Self {
        if value.is_finite() {
            Self(value.clamp(MIN_ZOOM, MAX_ZOOM))
        } else {
            Self(1.0)
        }
    }

    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }

    /// One step closer (bigger world)
    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + ZOOM_STEP)
    }

    /// One step out (more of the world visible)
    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - ZOOM_STEP)
    }
}

impl Default for Zoom {
    fn default() -> Self {
        Self(1.0)
    }
}

impl From<f32> for Zoom {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Zoom> for f32 {
    fn from(zoom: Zoom) -> Self {
        zoom.0
    }
}

/// The visible world rectangle for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World coordinate of the viewport's top-left corner
    pub origin: IVec2,
    /// Visible world size: screen size divided by zoom
    pub viewport: Vec2,
    pub zoom: Zoom,
}

impl Camera {
    /// Center the zoomed viewport on `center`
    pub fn compute(center: IVec2, zoom: Zoom, screen: UVec2) -> Self {
        let viewport = screen.as_vec2() / zoom.get();
        let half = (viewport / 2.0).floor().as_ivec2();
        Self {
            origin: center - half,
            viewport,
            zoom,
        }
    }

    /// Pixel size of the intermediate zoomed surface (truncated, at least 1)
    pub fn surface_size(&self) -> UVec2 {
        self.viewport.as_uvec2().max(UVec2::ONE)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.origin.x
    }

    /// Right edge of the visible area in whole world pixels
    pub fn right(&self) -> i32 {
        (self.origin.x as f32 + self.viewport.x) as i32
    }

    /// World space to zoomed-surface space
    #[inline]
    pub fn world_to_screen(&self, world: IVec2) -> IVec2 {
        world - self.origin
    }

    /// World space to output-resolution space (used by the UI layer)
    pub fn world_to_output(&self, world: Vec2) -> Vec2 {
        (world - self.origin.as_vec2()) * self.zoom.get()
    }
}

/// Top-left positions of background tiles covering the viewport.
///
/// The tile row scrolls at `PARALLAX_FACTOR` of the camera speed and wraps
/// horizontally. One extra tile is placed to the left of the start so a
/// negative offset never leaves a gap at the left edge.
pub fn parallax_tiles(camera_x: i32, tile: UVec2, viewport: Vec2) -> Vec<IVec2> {
    let tile = tile.max(UVec2::ONE).as_ivec2();
    let offset = (-(camera_x as f32) * PARALLAX_FACTOR) as i32;
    let x_start = offset.rem_euclid(tile.x) - tile.x;

    let mut tiles = Vec::new();
    let mut x = x_start;
    while (x as f32) < viewport.x {
        let mut y = 0;
        while (y as f32) < viewport.y {
            tiles.push(IVec2::new(x, y));
            y += tile.y;
        }
        x += tile.x;
    }
    tiles
}

/// Whether something at `screen_pos` with `size` shows on the viewport.
/// Objects are kept until they are a full sprite size past an edge.
#[inline]
pub fn is_visible(screen_pos: IVec2, size: IVec2, viewport: Vec2) -> bool {
    let pos = screen_pos.as_vec2();
    -(size.x as f32) < pos.x
        && pos.x < viewport.x
        && -(size.y as f32) < pos.y
        && pos.y < viewport.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SCREEN: UVec2 = UVec2::new(800, 600);

    #[test]
    fn test_viewport_at_unit_zoom() {
        let cam = Camera::compute(IVec2::new(400, 300), Zoom::default(), SCREEN);
        assert_eq!(cam.viewport, Vec2::new(800.0, 600.0));
        assert_eq!(cam.origin, IVec2::ZERO);
        assert_eq!(cam.surface_size(), SCREEN);
    }

    #[test]
    fn test_viewport_scales_with_zoom() {
        let cam = Camera::compute(IVec2::new(0, 0), Zoom::new(2.0), SCREEN);
        assert_eq!(cam.viewport, Vec2::new(400.0, 300.0));
        assert_eq!(cam.origin, IVec2::new(-200, -150));

        let cam = Camera::compute(IVec2::new(0, 0), Zoom::new(0.5), SCREEN);
        assert_eq!(cam.viewport, Vec2::new(1600.0, 1200.0));
        assert_eq!(cam.right() - cam.left(), 1600);
    }

    #[test]
    fn test_zoom_clamped() {
        assert_eq!(Zoom::new(0.1).get(), 0.5);
        assert_eq!(Zoom::new(5.0).get(), 2.0);
        assert_eq!(Zoom::new(f32::NAN).get(), 1.0);
        assert_eq!(Zoom::new(-3.0).get(), 0.5);
        assert_eq!(Zoom::new(2.0).zoom_in().get(), 2.0);
        assert_eq!(Zoom::new(0.5).zoom_out().get(), 0.5);
    }

    #[test]
    fn test_zoom_steps_return_home() {
        let mut zoom = Zoom::default();
        for _ in 0..5 {
            zoom = zoom.zoom_out();
        }
        assert!((zoom.get() - 0.5).abs() < 1e-4);
        for _ in 0..5 {
            zoom = zoom.zoom_in();
        }
        assert!((zoom.get() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_serde_clamps() {
        let zoom: Zoom = serde_json::from_str("7.5").expect("number");
        assert_eq!(zoom.get(), 2.0);
        assert_eq!(serde_json::to_string(&Zoom::new(1.5)).expect("json"), "1.5");
    }

    #[test]
    fn test_parallax_left_pad() {
        // Camera at 0: offset 0, first tile starts one tile left
        let tiles = parallax_tiles(0, UVec2::new(100, 600), Vec2::new(800.0, 600.0));
        assert_eq!(tiles.first(), Some(&IVec2::new(-100, 0)));
        assert_eq!(tiles.len(), 9);

        // Camera at 60: offset -30 wraps to 70, start at -30
        let tiles = parallax_tiles(60, UVec2::new(100, 600), Vec2::new(800.0, 600.0));
        assert_eq!(tiles.first(), Some(&IVec2::new(-30, 0)));
    }

    #[test]
    fn test_culling_margin() {
        let vp = Vec2::new(800.0, 600.0);
        let size = IVec2::new(40, 60);
        assert!(is_visible(IVec2::new(0, 0), size, vp));
        assert!(is_visible(IVec2::new(-39, 10), size, vp));
        assert!(!is_visible(IVec2::new(-40, 10), size, vp));
        assert!(is_visible(IVec2::new(799, 10), size, vp));
        assert!(!is_visible(IVec2::new(800, 10), size, vp));
        assert!(!is_visible(IVec2::new(10, -60), size, vp));
    }

    proptest! {
        #[test]
        fn prop_parallax_covers_viewport(
            camera_x in -100_000i32..100_000,
            tw in 16u32..400,
            th in 16u32..400,
            zoom in 0.5f32..2.0,
        ) {
            let viewport = SCREEN.as_vec2() / zoom;
            let tiles = parallax_tiles(camera_x, UVec2::new(tw, th), viewport);
            let min_x = tiles.iter().map(|t| t.x).min().unwrap_or(i32::MAX);
            let max_right = tiles.iter().map(|t| t.x + tw as i32).max().unwrap_or(i32::MIN);
            let max_bottom = tiles.iter().map(|t| t.y + th as i32).max().unwrap_or(i32::MIN);
            prop_assert!(min_x <= 0);
            prop_assert!(min_x > -2 * tw as i32);
            prop_assert!(max_right as f32 >= viewport.x);
            prop_assert!(max_bottom as f32 >= viewport.y);
            // Columns are contiguous: every column start is a whole number of tiles from the first
            prop_assert!(tiles.iter().all(|t| (t.x - min_x) % tw as i32 == 0));
        }

        #[test]
        fn prop_viewport_is_screen_over_zoom(z in -10.0f32..10.0) {
            let zoom = Zoom::new(z);
            let cam = Camera::compute(IVec2::ZERO, zoom, SCREEN);
            prop_assert!(zoom.get() >= 0.5 && zoom.get() <= 2.0);
            prop_assert!((cam.viewport.x - 800.0 / zoom.get()).abs() < 1e-3);
            prop_assert!((cam.viewport.y - 600.0 / zoom.get()).abs() < 1e-3);
        }
    }
}
