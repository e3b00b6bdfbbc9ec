//! Zoom-scaled background with a single-entry cache
//!
//! Rescaling the full background is the most expensive thing a frame can do,
//! so the scaled copy is kept until the zoom changes.

use glam::UVec2;

use super::camera::Zoom;
use super::surface::Surface;

/// One cached `(key, value)` pair, recomputed only when the key changes
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
    computes: u64,
}

impl<K: PartialEq + Copy, V> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            entry: None,
            computes: 0,
        }
    }

    /// Return the cached value for `key`, computing it on a miss
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce(K) -> V) -> &V {
        let hit = matches!(&self.entry, Some((cached, _)) if *cached == key);
        if !hit {
            self.entry = None;
        }
        let computes = &mut self.computes;
        let (_, value) = self.entry.get_or_insert_with(|| {
            *computes += 1;
            (key, compute(key))
        });
        value
    }

    /// How many times the value has been computed
    pub fn computes(&self) -> u64 {
        self.computes
    }
}

impl<K: PartialEq + Copy, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// The source background and its copy scaled for the current zoom
#[derive(Debug, Clone)]
pub struct BackgroundCache {
    source: Surface,
    /// Keyed by the raw zoom value; exact equality decides a hit
    scaled: Memo<f32, Surface>,
}

impl BackgroundCache {
    pub fn new(source: Surface) -> Self {
        Self {
            source,
            scaled: Memo::new(),
        }
    }

    /// Size of the source scaled by `zoom`, each side at least one pixel
    pub fn scaled_size(&self, zoom: Zoom) -> UVec2 {
        let z = zoom.get();
        UVec2::new(
            ((self.source.width() as f32 * z) as u32).max(1),
            ((self.source.height() as f32 * z) as u32).max(1),
        )
    }

    /// Background scaled for `zoom`, rescaled only if the zoom changed
    pub fn get(&mut self, zoom: Zoom) -> &Surface {
        let size = self.scaled_size(zoom);
        let source = &self.source;
        self.scaled.get_or_compute(zoom.get(), |z| {
            log::debug!("Rescaling background to {}x{} for zoom {:.2}", size.x, size.y, z);
            source.scaled(size.x, size.y)
        })
    }

    /// Number of rescales performed so far
    pub fn rescales(&self) -> u64 {
        self.scaled.computes()
    }

    pub fn source(&self) -> &Surface {
        &self.source
    }
}
