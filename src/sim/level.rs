//! Level entities consumed by the play loop
//!
//! Level files are parsed elsewhere; this module only holds the runtime
//! entities and a couple of built-in layouts used by the demo runner and tests.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::player::Player;
use super::rect::Rect;
use crate::consts::KILL_MARGIN;

/// A static solid rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// Non-solid areas that react when the player touches them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TriggerKind {
    /// Kills the player on contact
    Hazard,
    /// Moves the respawn point
    Checkpoint,
    /// Completes the level
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    pub rect: Rect,
    pub kind: TriggerKind,
}

/// Bob amplitude (pixels) and angular rate (radians per tick) for orbs
const ORB_BOB_AMPLITUDE: f32 = 6.0;
const ORB_BOB_RATE: f32 = 0.08;

/// A collectible that hovers in place until picked up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub rect: Rect,
    pub collected: bool,
    anchor_y: i32,
    ticks: u32,
}

impl Orb {
    pub fn new(center: IVec2) -> Self {
        let rect = Rect::from_center(center, 20, 20);
        Self {
            rect,
            collected: false,
            anchor_y: rect.y,
            ticks: 0,
        }
    }

    pub fn update(&mut self) {
        if self.collected {
            return;
        }
        self.ticks = self.ticks.wrapping_add(1);
        let bob = (self.ticks as f32 * ORB_BOB_RATE).sin() * ORB_BOB_AMPLITUDE;
        self.rect.y = self.anchor_y + bob.round() as i32;
    }
}

/// A hostile entity that drifts toward the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub rect: Rect,
    /// Pixels per tick
    pub speed: f32,
    remainder: Vec2,
}

impl Boss {
    pub fn new(rect: Rect, speed: f32) -> Self {
        Self {
            rect,
            speed,
            remainder: Vec2::ZERO,
        }
    }

    /// Step toward the target's center
    pub fn update(&mut self, target: &Rect) {
        let to_target = (target.center() - self.rect.center()).as_vec2();
        let step = to_target.normalize_or_zero() * self.speed.min(to_target.length());
        self.remainder += step;
        let whole = self.remainder.trunc();
        self.remainder -= whole;
        self.rect = self.rect.translated(whole.as_ivec2());
    }
}

/// A stationary sign; its message is shown while the player touches it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sign {
    pub rect: Rect,
    pub message: String,
}

impl Sign {
    pub fn new(rect: Rect, message: impl Into<String>) -> Self {
        Self {
            rect,
            message: message.into(),
        }
    }
}

/// What a renderable rect represents (the renderer picks colors)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Platform,
    Hazard,
    Checkpoint,
    Exit,
    Sign,
    Orb,
    Boss,
    Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub rect: Rect,
    pub kind: SpriteKind,
}

/// A loaded level and everything living in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub number: u32,
    pub player: Player,
    /// Solid geometry, resolved in order
    pub platforms: Vec<Platform>,
    pub triggers: Vec<Trigger>,
    pub orbs: Vec<Orb>,
    pub bosses: Vec<Boss>,
    pub signs: Vec<Sign>,
    /// Index into `signs` of the sign the player is touching
    #[serde(skip)]
    pub active_sign: Option<usize>,
    /// Set once the exit has been reached
    #[serde(skip)]
    pub completed: bool,
}

impl Level {
    pub fn new(number: u32, spawn: IVec2) -> Self {
        Self {
            number,
            player: Player::new(spawn),
            platforms: Vec::new(),
            triggers: Vec::new(),
            orbs: Vec::new(),
            bosses: Vec::new(),
            signs: Vec::new(),
            active_sign: None,
            completed: false,
        }
    }

    pub fn with_platform(mut self, rect: Rect) -> Self {
        self.platforms.push(Platform::new(rect));
        self
    }

    pub fn with_trigger(mut self, rect: Rect, kind: TriggerKind) -> Self {
        self.triggers.push(Trigger { rect, kind });
        self
    }

    pub fn with_orb(mut self, center: IVec2) -> Self {
        self.orbs.push(Orb::new(center));
        self
    }

    pub fn with_boss(mut self, rect: Rect, speed: f32) -> Self {
        self.bosses.push(Boss::new(rect, speed));
        self
    }

    pub fn with_sign(mut self, rect: Rect, message: impl Into<String>) -> Self {
        self.signs.push(Sign::new(rect, message));
        self
    }

    pub fn active_sign(&self) -> Option<&Sign> {
        self.active_sign.and_then(|i| self.signs.get(i))
    }

    pub fn update_orbs(&mut self) {
        for orb in &mut self.orbs {
            orb.update();
        }
    }

    pub fn update_bosses(&mut self) {
        let target = self.player.rect;
        for boss in &mut self.bosses {
            boss.update(&target);
        }
    }

    /// Extent of the solid geometry, grown by the kill margin.
    /// Leaving this area counts as falling out of the world.
    pub fn bounds(&self) -> Option<Rect> {
        self.platforms
            .iter()
            .map(|p| p.rect)
            .reduce(|a, b| a.union(&b))
            .map(|r| r.inflate(KILL_MARGIN * 2, KILL_MARGIN * 2))
    }

    /// Every renderable rect, back to front
    pub fn sprites(&self) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(
            self.platforms.len()
                + self.triggers.len()
                + self.signs.len()
                + self.orbs.len()
                + self.bosses.len()
                + 1,
        );
        sprites.extend(self.platforms.iter().map(|p| Sprite {
            rect: p.rect,
            kind: SpriteKind::Platform,
        }));
        sprites.extend(self.triggers.iter().map(|t| Sprite {
            rect: t.rect,
            kind: match t.kind {
                TriggerKind::Hazard => SpriteKind::Hazard,
                TriggerKind::Checkpoint => SpriteKind::Checkpoint,
                TriggerKind::Exit => SpriteKind::Exit,
            },
        }));
        sprites.extend(self.signs.iter().map(|s| Sprite {
            rect: s.rect,
            kind: SpriteKind::Sign,
        }));
        sprites.extend(self.orbs.iter().filter(|o| !o.collected).map(|o| Sprite {
            rect: o.rect,
            kind: SpriteKind::Orb,
        }));
        sprites.extend(self.bosses.iter().map(|b| Sprite {
            rect: b.rect,
            kind: SpriteKind::Boss,
        }));
        sprites.push(Sprite {
            rect: self.player.rect,
            kind: SpriteKind::Player,
        });
        sprites
    }
}

/// Supplies levels by number. Level file formats live behind this trait.
pub trait LevelSource {
    fn load(&self, number: u32) -> Option<Level>;
}

/// Hand-built layouts for the headless runner and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLevels;

impl BuiltinLevels {
    pub const COUNT: u32 = 2;
}

impl LevelSource for BuiltinLevels {
    fn load(&self, number: u32) -> Option<Level> {
        let level = match number {
            1 => Level::new(1, IVec2::new(100, 440))
                .with_platform(Rect::new(0, 500, 2400, 60))
                .with_platform(Rect::new(0, 0, 2400, 60))
                .with_platform(Rect::new(700, 380, 200, 120))
                .with_platform(Rect::new(1300, 60, 160, 200))
                .with_trigger(Rect::new(1000, 480, 120, 20), TriggerKind::Hazard)
                .with_trigger(Rect::new(1600, 400, 20, 100), TriggerKind::Checkpoint)
                .with_trigger(Rect::new(2300, 380, 60, 120), TriggerKind::Exit)
                .with_orb(IVec2::new(500, 420))
                .with_orb(IVec2::new(1200, 120))
                .with_sign(Rect::new(250, 440, 40, 60), "Click or press L to flip gravity"),
            2 => Level::new(2, IVec2::new(100, 440))
                .with_platform(Rect::new(0, 500, 3200, 60))
                .with_platform(Rect::new(0, 0, 3200, 60))
                .with_platform(Rect::new(900, 300, 300, 200))
                .with_trigger(Rect::new(1400, 60, 200, 20), TriggerKind::Hazard)
                .with_trigger(Rect::new(3100, 380, 60, 120), TriggerKind::Exit)
                .with_orb(IVec2::new(1050, 260))
                .with_boss(Rect::new(2200, 200, 80, 80), 1.5)
                .with_sign(Rect::new(250, 440, 40, 60), "Something is following you"),
            _ => return None,
        };
        Some(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boss_moves_toward_target() {
        let mut boss = Boss::new(Rect::new(200, 0, 40, 40), 2.0);
        let target = Rect::new(0, 0, 40, 40);
        for _ in 0..10 {
            boss.update(&target);
        }
        assert_eq!(boss.rect.x, 180);
        assert_eq!(boss.rect.y, 0);
    }

    #[test]
    fn test_boss_does_not_overshoot() {
        let mut boss = Boss::new(Rect::new(1, 0, 40, 40), 5.0);
        boss.update(&Rect::new(0, 0, 40, 40));
        assert_eq!(boss.rect.x, 0);
    }

    #[test]
    fn test_orb_bobs_around_anchor() {
        let mut orb = Orb::new(IVec2::new(0, 0));
        let anchor = orb.rect.y;
        for _ in 0..200 {
            orb.update();
            assert!((orb.rect.y - anchor).abs() <= ORB_BOB_AMPLITUDE as i32);
        }
    }

    #[test]
    fn test_sprites_skip_collected_orbs_and_end_with_player() {
        let mut level = BuiltinLevels.load(1).expect("level 1");
        let before = level.sprites().len();
        level.orbs[0].collected = true;
        let sprites = level.sprites();
        assert_eq!(sprites.len(), before - 1);
        assert_eq!(sprites.last().map(|s| s.kind), Some(SpriteKind::Player));
    }

    #[test]
    fn test_builtin_levels() {
        assert!(BuiltinLevels.load(1).is_some());
        assert!(BuiltinLevels.load(BuiltinLevels::COUNT).is_some());
        assert!(BuiltinLevels.load(BuiltinLevels::COUNT + 1).is_none());
    }
}
