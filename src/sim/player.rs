//! The player entity
//!
//! Position is an integer rect (world pixels); sub-pixel motion is carried in
//! a remainder so slow speeds still move the rect over several ticks.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::level::Platform;
use super::rect::Rect;
use crate::consts::*;

/// Direction gravity pulls the player. Only two states exist, so a zero or
/// interpolated direction cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gravity {
    #[default]
    Down,
    Up,
}

impl Gravity {
    /// +1 for down (screen y grows downward), -1 for up
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Gravity::Down => 1,
            Gravity::Up => -1,
        }
    }

    #[inline]
    pub fn sign_f32(self) -> f32 {
        self.sign() as f32
    }

    pub fn flipped(self) -> Self {
        match self {
            Gravity::Down => Gravity::Up,
            Gravity::Up => Gravity::Down,
        }
    }

    /// Unit vector pointing "down" for this gravity
    pub fn direction(self) -> Vec2 {
        Vec2::new(0.0, self.sign_f32())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Velocity in pixels per tick
    pub velocity: Vec2,
    /// Horizontal speed applied while a direction key is held
    pub current_speed: f32,
    pub is_sprinting: bool,
    pub on_ground: bool,
    gravity: Gravity,
    /// Set by `flip_gravity`, cleared only by the frame that consumes it
    just_flipped: bool,
    /// Sub-pixel motion not yet applied to `rect`
    remainder: Vec2,
    /// Where `reset_position` puts the player (moved by checkpoints)
    spawn: IVec2,
}

impl Player {
    /// Create a player standing with its top-left corner at `spawn`
    pub fn new(spawn: IVec2) -> Self {
        Self {
            rect: Rect::new(spawn.x, spawn.y, PLAYER_WIDTH, PLAYER_HEIGHT),
            velocity: Vec2::ZERO,
            current_speed: PLAYER_SPEED,
            is_sprinting: false,
            on_ground: false,
            gravity: Gravity::Down,
            just_flipped: false,
            remainder: Vec2::ZERO,
            spawn,
        }
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity
    }

    /// +1 when gravity points down, -1 when it points up
    pub fn gravity_direction(&self) -> i32 {
        self.gravity.sign()
    }

    pub fn spawn(&self) -> IVec2 {
        self.spawn
    }

    pub fn set_spawn(&mut self, spawn: IVec2) {
        self.spawn = spawn;
    }

    pub fn center(&self) -> IVec2 {
        self.rect.center()
    }

    /// Update sprint state and move `current_speed` one step toward the
    /// matching limit. The speed never leaves `[PLAYER_SPEED, SPRINT_SPEED]`.
    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.is_sprinting = sprinting;
        self.current_speed = if sprinting {
            (self.current_speed + SPRINT_ACCELERATION).min(SPRINT_SPEED)
        } else {
            (self.current_speed - SPRINT_ACCELERATION * SPRINT_DECELERATION_FACTOR)
                .max(PLAYER_SPEED)
        };
    }

    /// Apply horizontal movement for this tick
    pub fn update(&mut self, horizontal_velocity: f32) {
        self.velocity.x = horizontal_velocity;
        self.remainder.x += horizontal_velocity;
        let step = self.remainder.x.trunc();
        self.remainder.x -= step;
        self.rect.x += step as i32;
    }

    /// Integrate gravity and resolve vertical contact with platforms.
    ///
    /// Single pass over the platforms; the player lands on surfaces in the
    /// gravity direction and bumps its head on surfaces against it.
    pub fn apply_physics(&mut self, platforms: &[Platform]) {
        let sign = self.gravity.sign_f32();
        self.velocity.y = (self.velocity.y + GRAVITY * sign).clamp(-MAX_FALL_SPEED, MAX_FALL_SPEED);

        self.remainder.y += self.velocity.y;
        let step = self.remainder.y.trunc();
        self.remainder.y -= step;
        self.rect.y += step as i32;

        // Edge is fixed by this tick's motion; contacts zero the velocity
        let moving_down = match self.gravity {
            Gravity::Down => self.velocity.y >= 0.0,
            Gravity::Up => self.velocity.y > 0.0,
        };
        for platform in platforms {
            if !self.rect.intersects(&platform.rect) {
                continue;
            }
            if moving_down {
                self.rect.set_bottom(platform.rect.top());
            } else {
                self.rect.set_top(platform.rect.bottom());
            }
            self.velocity.y = 0.0;
            self.remainder.y = 0.0;
        }

        self.on_ground = self.standing_on(platforms);
        if self.on_ground && self.velocity.y * sign > 0.0 {
            self.velocity.y = 0.0;
            self.remainder.y = 0.0;
        }
    }

    /// True if a platform is directly under the player's feet (in the gravity direction)
    pub fn standing_on(&self, platforms: &[Platform]) -> bool {
        let probe = self.rect.translated(IVec2::new(0, self.gravity.sign()));
        platforms.iter().any(|p| probe.intersects(&p.rect))
    }

    /// Flip gravity and raise the one-shot flip flag
    pub fn flip_gravity(&mut self) {
        self.gravity = self.gravity.flipped();
        self.on_ground = false;
        self.just_flipped = true;
    }

    /// Jump against gravity; ignored while airborne
    pub fn jump(&mut self) {
        if self.on_ground {
            self.velocity.y = -JUMP_STRENGTH * self.gravity.sign_f32();
            self.remainder.y = 0.0;
            self.on_ground = false;
        }
    }

    /// Return to the spawn point with default gravity and speed.
    /// A pending flip flag is left for the frame to consume.
    pub fn reset_position(&mut self) {
        self.rect.x = self.spawn.x;
        self.rect.y = self.spawn.y;
        self.velocity = Vec2::ZERO;
        self.remainder = Vec2::ZERO;
        self.gravity = Gravity::Down;
        self.current_speed = PLAYER_SPEED;
        self.on_ground = false;
    }

    pub fn just_flipped(&self) -> bool {
        self.just_flipped
    }

    pub fn reset_flip_flag(&mut self) {
        self.just_flipped = false;
    }

    /// Read and clear the flip flag in one step
    pub fn take_flip(&mut self) -> bool {
        std::mem::take(&mut self.just_flipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Vec<Platform> {
        vec![Platform::new(Rect::new(-500, 100, 1000, 40))]
    }

    #[test]
    fn test_player_lands_on_platform() {
        let platforms = floor();
        let mut player = Player::new(IVec2::new(0, 0));
        for _ in 0..60 {
            player.apply_physics(&platforms);
        }
        assert_eq!(player.rect.bottom(), 100);
        assert!(player.on_ground);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn test_flip_sets_flag_once() {
        let mut player = Player::new(IVec2::ZERO);
        assert_eq!(player.gravity_direction(), 1);
        player.flip_gravity();
        assert_eq!(player.gravity_direction(), -1);
        assert!(player.take_flip());
        assert!(!player.take_flip());
        assert!(!player.just_flipped());
    }

    #[test]
    fn test_jump_requires_ground() {
        let platforms = floor();
        let mut player = Player::new(IVec2::new(0, 40));
        player.jump();
        assert_eq!(player.velocity.y, 0.0);

        player.apply_physics(&platforms);
        assert!(player.on_ground);
        player.jump();
        assert!(player.velocity.y < 0.0);
    }

    #[test]
    fn test_inverted_gravity_falls_up() {
        let ceiling = vec![Platform::new(Rect::new(-500, -200, 1000, 40))];
        let mut player = Player::new(IVec2::ZERO);
        player.flip_gravity();
        for _ in 0..60 {
            player.apply_physics(&ceiling);
        }
        assert_eq!(player.rect.top(), -160);
        assert!(player.on_ground);
    }

    #[test]
    fn test_sprint_speed_stays_in_range() {
        let mut player = Player::new(IVec2::ZERO);
        for _ in 0..100 {
            player.set_sprinting(true);
            assert!(player.current_speed <= SPRINT_SPEED);
        }
        assert_eq!(player.current_speed, SPRINT_SPEED);
        for _ in 0..100 {
            player.set_sprinting(false);
            assert!(player.current_speed >= PLAYER_SPEED);
        }
        assert_eq!(player.current_speed, PLAYER_SPEED);
    }

    #[test]
    fn test_head_bump_on_uneven_ceiling() {
        let ceiling = vec![
            Platform::new(Rect::new(-20, 0, 40, 100)),
            Platform::new(Rect::new(20, 0, 40, 110)),
        ];
        let mut player = Player::new(IVec2::new(0, 112));
        player.velocity.y = -15.0;
        player.apply_physics(&ceiling);
        assert_eq!(player.rect.top(), 110);
        assert!(ceiling.iter().all(|p| !player.rect.intersects(&p.rect)));
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn test_head_bump_on_uneven_floor_when_inverted() {
        let floor = vec![
            Platform::new(Rect::new(-20, 10, 40, 100)),
            Platform::new(Rect::new(20, 0, 40, 110)),
        ];
        let mut player = Player::new(IVec2::new(0, -12));
        player.flip_gravity();
        player.velocity.y = 15.0;
        player.apply_physics(&floor);
        assert_eq!(player.rect.bottom(), 0);
        assert!(floor.iter().all(|p| !player.rect.intersects(&p.rect)));
    }

    #[test]
    fn test_subpixel_motion_accumulates() {
        let mut player = Player::new(IVec2::ZERO);
        player.update(0.5);
        assert_eq!(player.rect.x, 0);
        player.update(0.5);
        assert_eq!(player.rect.x, 1);
    }
}
