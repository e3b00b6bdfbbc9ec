//! Speedlines: short-lived streaks fired across the screen on a gravity flip
//!
//! A speedline moves at constant velocity and fades linearly to transparent
//! over its lifetime. The owning collection drops it the tick its age reaches
//! the lifetime; speedlines are never recycled.

use std::ops::RangeInclusive;

use glam::{IVec2, Vec2};
use rand::Rng;

use super::player::Gravity;
use super::rect::Rect;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq)]
pub struct Speedline {
    /// Center in world space
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub age: u32,
    pub lifetime: u32,
    pub thickness: i32,
    pub length: i32,
    /// Base opacity before fading (150..=255)
    pub opacity: u8,
}

impl Speedline {
    /// Create a speedline at `pos` heading along `direction`.
    ///
    /// A zero or non-finite direction falls back to straight down, and a zero
    /// lifetime is raised to one tick.
    pub fn spawn(pos: Vec2, direction: Vec2, lifetime: u32, rng: &mut impl Rng) -> Self {
        let direction = direction.try_normalize().unwrap_or(Vec2::Y);
        let speed = rng.random_range(SPEEDLINE_MIN_SPEED..SPEEDLINE_MAX_SPEED);
        Self {
            pos,
            vel: direction * speed,
            age: 0,
            lifetime: lifetime.max(1),
            thickness: rng.random_range(SPEEDLINE_MIN_THICKNESS..=SPEEDLINE_MAX_THICKNESS),
            length: rng.random_range(SPEEDLINE_MIN_LENGTH..=SPEEDLINE_MAX_LENGTH),
            opacity: rng.random_range(SPEEDLINE_MIN_OPACITY..=u8::MAX),
        }
    }

    /// Age by one tick and move. Returns false once the lifetime is used up.
    pub fn advance(&mut self) -> bool {
        if self.age < self.lifetime {
            self.age += 1;
        }
        self.pos += self.vel;
        self.is_alive()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }

    /// Fade alpha: 255 when fresh, 0 at the end of the lifetime
    pub fn alpha(&self) -> u8 {
        let t = self.age as f32 / self.lifetime as f32;
        (255.0 * (1.0 - t)).clamp(0.0, 255.0) as u8
    }

    /// Opacity actually drawn (base opacity scaled by the fade)
    pub fn draw_alpha(&self) -> u8 {
        ((self.opacity as u32 * self.alpha() as u32) / 255) as u8
    }

    /// Bounding rect: a vertical bar `thickness` wide and `length` tall
    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos.as_ivec2(), self.thickness, self.length)
    }
}

/// Spawn one burst of speedlines.
///
/// Lines are scattered over `x_range` (the visible width), within the
/// vertical spread around `center_y`, plus a small per-line jitter. All lines
/// in a burst travel in the current gravity direction. Returns the number spawned.
pub fn spawn_burst(
    lines: &mut Vec<Speedline>,
    rng: &mut impl Rng,
    x_range: RangeInclusive<i32>,
    center_y: i32,
    gravity: Gravity,
    lifetime: u32,
) -> usize {
    let count = rng.random_range(BURST_MIN..=BURST_MAX) as usize;
    let direction = gravity.direction();
    let (left, right) = (*x_range.start(), *x_range.end());
    let (left, right) = (left.min(right), left.max(right));

    lines.reserve(count);
    for _ in 0..count {
        let x = rng.random_range(left..=right);
        let y = center_y + rng.random_range(-BURST_VERTICAL_SPREAD..=BURST_VERTICAL_SPREAD);
        let jitter = IVec2::new(
            rng.random_range(-BURST_JITTER_X..=BURST_JITTER_X),
            rng.random_range(-BURST_JITTER_Y..=BURST_JITTER_Y),
        );
        let pos = (IVec2::new(x, y) + jitter).as_vec2();
        lines.push(Speedline::spawn(pos, direction, lifetime, rng));
    }
    log::debug!("Speedline burst: {} lines, direction {}", count, gravity.sign());
    count
}

/// Advance every line and drop the expired ones
pub fn advance_all(lines: &mut Vec<Speedline>) {
    lines.retain_mut(|line| line.advance());
}
