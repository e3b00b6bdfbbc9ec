//! Frame composition for the play scene
//!
//! World layer and speedlines go onto an intermediate surface the size of the
//! zoomed viewport; that surface is scaled to the output resolution and the UI
//! is drawn on top at full resolution.

use glam::IVec2;

use super::background::BackgroundCache;
use super::camera::{is_visible, parallax_tiles};
use super::hud::{HudStrings, TextPainter, draw_hud, draw_sign, hud_lines};
use super::surface::{Rgba, Surface, colors};
use crate::sim::{PlayScene, SpriteKind};

/// What ended up on screen, for diagnostics and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub tiles: usize,
    pub sprites_drawn: usize,
    pub sprites_culled: usize,
    pub speedlines_drawn: usize,
}

fn sprite_color(kind: SpriteKind) -> Rgba {
    match kind {
        SpriteKind::Platform => colors::PLATFORM,
        SpriteKind::Hazard => colors::HAZARD,
        SpriteKind::Checkpoint => colors::CHECKPOINT,
        SpriteKind::Exit => colors::EXIT,
        SpriteKind::Sign => colors::SIGN,
        SpriteKind::Orb => colors::ORB,
        SpriteKind::Boss => colors::BOSS,
        SpriteKind::Player => colors::PLAYER,
    }
}

/// Render state owned alongside a play scene
pub struct SceneRenderer {
    background: BackgroundCache,
    /// Zoomed world view, reused while its size is unchanged
    view: Surface,
    pub strings: HudStrings,
    pub show_hud: bool,
}

impl SceneRenderer {
    pub fn new(background: Surface) -> Self {
        Self {
            background: BackgroundCache::new(background),
            view: Surface::new(1, 1),
            strings: HudStrings::default(),
            show_hud: true,
        }
    }

    pub fn background(&self) -> &BackgroundCache {
        &self.background
    }

    /// Draw the scene into `target` (the fixed-resolution output)
    pub fn render(
        &mut self,
        scene: &PlayScene,
        target: &mut Surface,
        painter: &mut dyn TextPainter,
    ) -> FrameStats {
        let camera = scene.camera;
        let mut stats = FrameStats::default();

        let size = camera.surface_size();
        if self.view.width() != size.x || self.view.height() != size.y {
            self.view = Surface::new(size.x, size.y);
        } else {
            self.view.fill(colors::BLACK);
        }

        // Background
        let tile = self.background.get(camera.zoom);
        for pos in parallax_tiles(camera.origin.x, tile.size().as_uvec2(), camera.viewport) {
            self.view.blit(tile, pos, 255);
            stats.tiles += 1;
        }

        // World
        for sprite in scene.level.sprites() {
            let screen = camera.world_to_screen(sprite.rect.pos());
            if !is_visible(screen, sprite.rect.size(), camera.viewport) {
                stats.sprites_culled += 1;
                continue;
            }
            let rect = sprite.rect.translated(-camera.origin);
            self.view.fill_rect(rect, sprite_color(sprite.kind));
            stats.sprites_drawn += 1;
        }

        // Speedlines
        for line in &scene.speedlines {
            let alpha = line.draw_alpha();
            if alpha == 0 {
                continue;
            }
            let rect = line.rect().translated(-camera.origin);
            self.view.fill_rect(rect, colors::WHITE.with_alpha(alpha));
            stats.speedlines_drawn += 1;
        }

        let scaled = self.view.scaled(target.width(), target.height());
        target.blit(&scaled, IVec2::ZERO, 255);

        // UI at output resolution
        if self.show_hud {
            let lines = hud_lines(
                &self.strings,
                scene.level.number,
                camera.zoom.get(),
                scene.level.player.gravity(),
            );
            draw_hud(target, painter, &lines);
        }
        if let Some(sign) = scene.level.active_sign() {
            draw_sign(target, painter, sign, &camera);
        }

        stats
    }
}
