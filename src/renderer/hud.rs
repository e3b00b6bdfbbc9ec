//! UI layer: instructions, gravity indicator and sign messages
//!
//! Drawn straight onto the output frame after the zoomed world has been
//! scaled up, so text size does not follow the zoom (sign boxes do, on purpose).
//! Glyph rasterization is behind `TextPainter`; fonts are loaded elsewhere.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::surface::{Rgba, Surface, colors};
use crate::sim::{Gravity, Rect, Sign};

/// HUD text table. Localized tables deserialize into this; `{}` is replaced
/// by the level number or zoom value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HudStrings {
    pub level: String,
    #[serde(rename = "move")]
    pub move_hint: String,
    pub jump: String,
    pub sprint: String,
    pub flip_gravity: String,
    pub reset: String,
    pub pause: String,
    pub zoom: String,
    pub down: String,
    pub up: String,
}

impl Default for HudStrings {
    fn default() -> Self {
        Self {
            level: "Level {}".into(),
            move_hint: "A/D - Move".into(),
            jump: "SPACE - Jump".into(),
            sprint: "SHIFT - Sprint".into(),
            flip_gravity: "L / Click - Flip gravity".into(),
            reset: "R - Reset".into(),
            pause: "ESC - Pause".into(),
            zoom: "Z/C - Zoom ({}x)".into(),
            down: "Gravity: DOWN".into(),
            up: "Gravity: UP".into(),
        }
    }
}

/// Draws text onto a surface
pub trait TextPainter {
    /// Pixel size `text` occupies at `size`
    fn measure(&self, text: &str, size: u32) -> IVec2;

    /// Draw `text` with its top-left at `pos`
    fn draw(&mut self, target: &mut Surface, text: &str, pos: IVec2, size: u32, color: Rgba);
}

/// Placeholder painter: every visible character becomes a solid block.
/// Used when no font has been provided.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockTextPainter;

impl BlockTextPainter {
    fn advance(size: u32) -> i32 {
        (size as i32 / 2).max(1)
    }
}

impl TextPainter for BlockTextPainter {
    fn measure(&self, text: &str, size: u32) -> IVec2 {
        IVec2::new(text.chars().count() as i32 * Self::advance(size), size as i32)
    }

    fn draw(&mut self, target: &mut Surface, text: &str, pos: IVec2, size: u32, color: Rgba) {
        let advance = Self::advance(size);
        let glyph_w = (advance - advance / 4).max(1);
        let glyph_h = (size as i32 * 2 / 3).max(1);
        let top = pos.y + (size as i32 - glyph_h) / 2;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = pos.x + i as i32 * advance;
            target.fill_rect(Rect::new(x, top, glyph_w, glyph_h), color);
        }
    }
}

pub const HUD_FONT_SIZE: u32 = 30;
pub const HUD_LINE_HEIGHT: i32 = 30;
const HUD_MARGIN: i32 = 10;
const HUD_LIST_TOP: i32 = 40;

/// One positioned line of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct HudLine {
    pub text: String,
    pub pos: IVec2,
}

/// Lay out the HUD: gravity indicator on top, instruction list below it
pub fn hud_lines(strings: &HudStrings, level: u32, zoom: f32, gravity: Gravity) -> Vec<HudLine> {
    let gravity_text = match gravity {
        Gravity::Down => &strings.down,
        Gravity::Up => &strings.up,
    };
    let instructions = [
        strings.level.replace("{}", &level.to_string()),
        strings.move_hint.clone(),
        strings.jump.clone(),
        strings.sprint.clone(),
        strings.flip_gravity.clone(),
        strings.reset.clone(),
        strings.pause.clone(),
        strings.zoom.replace("{}", &format!("{:.1}", zoom)),
    ];

    let mut lines = Vec::with_capacity(instructions.len() + 1);
    lines.push(HudLine {
        text: gravity_text.clone(),
        pos: IVec2::new(HUD_MARGIN, HUD_MARGIN),
    });
    lines.extend(instructions.into_iter().enumerate().map(|(i, text)| HudLine {
        text,
        pos: IVec2::new(HUD_MARGIN, HUD_LIST_TOP + i as i32 * HUD_LINE_HEIGHT),
    }));
    lines
}

pub fn draw_hud(target: &mut Surface, painter: &mut dyn TextPainter, lines: &[HudLine]) {
    for line in lines {
        painter.draw(target, &line.text, line.pos, HUD_FONT_SIZE, colors::WHITE);
    }
}

/// Geometry of a sign's message box in output pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignLayout {
    pub font_size: u32,
    pub background: Rect,
    pub border: i32,
    pub text_pos: IVec2,
}

/// Place a sign's message box above the sign, following camera and zoom
pub fn sign_layout(sign: &Sign, camera: &Camera, painter: &dyn TextPainter) -> SignLayout {
    let zoom = camera.zoom.get();
    let font_size = ((32.0 * zoom) as u32).max(36);
    let anchor = camera.world_to_output(Vec2::new(sign.rect.x as f32, sign.rect.y as f32 - 40.0));

    let text = painter.measure(&sign.message, font_size);
    let mut background = Rect::new(0, 0, text.x, text.y)
        .inflate((20.0 * zoom) as i32, (10.0 * zoom) as i32);
    background.set_center(anchor.as_ivec2());

    SignLayout {
        font_size,
        background,
        border: ((2.0 * zoom) as i32).max(1),
        text_pos: IVec2::new(
            background.x + (10.0 * zoom) as i32,
            background.y + (5.0 * zoom) as i32,
        ),
    }
}

pub fn draw_sign(target: &mut Surface, painter: &mut dyn TextPainter, sign: &Sign, camera: &Camera) {
    let layout = sign_layout(sign, camera, painter);
    target.fill_rect(layout.background, colors::BLACK);
    target.stroke_rect(layout.background, colors::WHITE, layout.border);
    painter.draw(target, &sign.message, layout.text_pos, layout.font_size, colors::WHITE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::Zoom;
    use glam::UVec2;

    #[test]
    fn test_hud_layout() {
        let lines = hud_lines(&HudStrings::default(), 3, 1.25, Gravity::Up);
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0].text, "Gravity: UP");
        assert_eq!(lines[0].pos, IVec2::new(10, 10));
        assert_eq!(lines[1].text, "Level 3");
        assert_eq!(lines[1].pos, IVec2::new(10, 40));
        assert_eq!(lines[8].pos, IVec2::new(10, 40 + 7 * 30));
        assert!(lines[8].text.contains("1.2") || lines[8].text.contains("1.3"));
    }

    #[test]
    fn test_localized_table_fills_missing_keys() {
        let strings: HudStrings =
            serde_json::from_str(r#"{ "level": "Niveau {}", "move": "A/D - Bouger" }"#)
                .expect("json");
        assert_eq!(strings.move_hint, "A/D - Bouger");
        assert_eq!(strings.jump, HudStrings::default().jump);
        let lines = hud_lines(&strings, 2, 1.0, Gravity::Down);
        assert_eq!(lines[1].text, "Niveau 2");
    }

    #[test]
    fn test_sign_layout_follows_zoom() {
        let painter = BlockTextPainter;
        let sign = Sign::new(Rect::new(100, 200, 40, 60), "hi");

        let camera = Camera::compute(IVec2::new(100, 200), Zoom::new(1.0), UVec2::new(800, 600));
        let layout = sign_layout(&sign, &camera, &painter);
        assert_eq!(layout.font_size, 36);
        assert_eq!(layout.border, 2);
        // Anchor: (100 - (-300), 200 - (-100) - 40) = (400, 260)
        assert_eq!(layout.background.center(), IVec2::new(400, 260));

        let camera = Camera::compute(IVec2::new(100, 200), Zoom::new(2.0), UVec2::new(800, 600));
        let layout = sign_layout(&sign, &camera, &painter);
        assert_eq!(layout.font_size, 64);
        assert_eq!(layout.border, 4);
    }

    #[test]
    fn test_block_painter_draws_inside_measure() {
        let mut painter = BlockTextPainter;
        let mut target = Surface::new(100, 40);
        painter.draw(&mut target, "ab", IVec2::ZERO, 30, colors::WHITE);
        let size = painter.measure("ab", 30);
        assert_eq!(size, IVec2::new(30, 30));
        assert_eq!(target.get(2, 15), Some(colors::WHITE));
        assert_eq!(target.get(50, 15), Some(colors::BLACK));
    }
}
