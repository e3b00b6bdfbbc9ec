//! Player-vs-level collision
//!
//! Two passes per tick. The horizontal pre-pass runs right after horizontal
//! movement and only pushes along x. The full pass runs after vertical physics
//! and owns every gameplay side effect (deaths, pickups, checkpoints, exits).
//! Each pass visits every platform once; nothing iterates until stable, so a
//! pile of overlapping platforms costs one sweep.

use glam::IVec2;

use super::event::{DeathCause, GameEvent};
use super::level::{Level, Platform, TriggerKind};
use super::player::Player;
use super::rect::Rect;
use crate::consts::{PLAYER_HEIGHT, PLAYER_WIDTH};
use crate::session::Session;

/// Push the player out of platforms along x only.
///
/// The side is chosen by comparing centers: a player whose center is strictly
/// left of the platform's center exits to the left, otherwise to the right.
pub fn horizontal_prepass(player: &mut Player, platforms: &[Platform]) {
    for platform in platforms {
        if !player.rect.intersects(&platform.rect) {
            continue;
        }
        if player.rect.center_x() < platform.rect.center_x() {
            player.rect.set_right(platform.rect.left());
        } else {
            player.rect.set_left(platform.rect.right());
        }
    }
}

/// Resolve remaining penetration and apply level triggers.
///
/// Outcomes are recorded on the session. A death resets the player and ends
/// the pass for this tick.
pub fn handle_collisions(level: &mut Level, session: &mut Session) {
    resolve_vertical(&mut level.player, &level.platforms);

    if let Some(bounds) = level.bounds() {
        if !bounds.intersects(&level.player.rect) {
            kill(level, session, DeathCause::OutOfBounds);
            return;
        }
    }

    let player_rect = level.player.rect;
    for i in 0..level.triggers.len() {
        let trigger = level.triggers[i];
        if !trigger.rect.intersects(&player_rect) {
            continue;
        }
        match trigger.kind {
            TriggerKind::Hazard => {
                kill(level, session, DeathCause::Hazard);
                return;
            }
            TriggerKind::Checkpoint => {
                let spawn = checkpoint_spawn(&trigger.rect);
                if level.player.spawn() != spawn {
                    level.player.set_spawn(spawn);
                    session.record(GameEvent::CheckpointReached { spawn });
                }
            }
            TriggerKind::Exit => {
                if !level.completed {
                    level.completed = true;
                    session.record(GameEvent::LevelComplete {
                        level: level.number,
                    });
                }
            }
        }
    }

    if level.bosses.iter().any(|b| b.rect.intersects(&player_rect)) {
        kill(level, session, DeathCause::Boss);
        return;
    }

    for (index, orb) in level.orbs.iter_mut().enumerate() {
        if !orb.collected && orb.rect.intersects(&player_rect) {
            orb.collected = true;
            session.record(GameEvent::OrbCollected { index });
        }
    }

    level.active_sign = level
        .signs
        .iter()
        .position(|s| s.rect.intersects(&player_rect));
}

/// Single pass over the platforms pushing the player out vertically
fn resolve_vertical(player: &mut Player, platforms: &[Platform]) {
    for platform in platforms {
        if !player.rect.intersects(&platform.rect) {
            continue;
        }
        if player.rect.center_y() < platform.rect.center_y() {
            player.rect.set_bottom(platform.rect.top());
        } else {
            player.rect.set_top(platform.rect.bottom());
        }
        player.velocity.y = 0.0;
    }
}

/// Respawn standing on the checkpoint's base
fn checkpoint_spawn(rect: &Rect) -> IVec2 {
    IVec2::new(
        rect.center_x() - PLAYER_WIDTH / 2,
        rect.bottom() - PLAYER_HEIGHT,
    )
}

/// Respawn the player; whatever it was touching no longer applies
fn kill(level: &mut Level, session: &mut Session, cause: DeathCause) {
    level.player.reset_position();
    level.active_sign = None;
    session.record(GameEvent::PlayerDied { cause });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn level_with_floor() -> Level {
        Level::new(1, IVec2::new(0, 440)).with_platform(Rect::new(-1000, 500, 3000, 60))
    }

    #[test]
    fn test_prepass_push_left() {
        let platforms = vec![Platform::new(Rect::new(100, 0, 100, 100))];
        let mut player = Player::new(IVec2::new(70, 10));
        horizontal_prepass(&mut player, &platforms);
        assert_eq!(player.rect.right(), 100);
    }

    #[test]
    fn test_prepass_push_right() {
        let platforms = vec![Platform::new(Rect::new(100, 0, 100, 100))];
        let mut player = Player::new(IVec2::new(190, 10));
        horizontal_prepass(&mut player, &platforms);
        assert_eq!(player.rect.left(), 200);
    }

    #[test]
    fn test_prepass_equal_centers_exit_right() {
        // Player center 150 == platform center 150: not strictly less, exits right
        let platforms = vec![Platform::new(Rect::new(100, 0, 100, 100))];
        let mut player = Player::new(IVec2::new(130, 10));
        horizontal_prepass(&mut player, &platforms);
        assert_eq!(player.rect.left(), 200);
    }

    #[test]
    fn test_prepass_leaves_vertical_state() {
        let platforms = vec![Platform::new(Rect::new(100, 0, 100, 100))];
        let mut player = Player::new(IVec2::new(70, 10));
        player.velocity.y = 3.0;
        horizontal_prepass(&mut player, &platforms);
        assert_eq!(player.rect.y, 10);
        assert_eq!(player.velocity.y, 3.0);
    }

    #[test]
    fn test_hazard_kills_and_resets() {
        let mut level = level_with_floor().with_trigger(Rect::new(300, 480, 50, 20), TriggerKind::Hazard);
        let mut session = Session::default();
        level.player.rect.x = 310;
        handle_collisions(&mut level, &mut session);
        assert_eq!(level.player.rect.pos(), IVec2::new(0, 440));
        assert_eq!(session.deaths, 1);
        assert_eq!(
            session.events(),
            &[GameEvent::PlayerDied {
                cause: DeathCause::Hazard
            }]
        );
    }

    #[test]
    fn test_death_clears_active_sign() {
        let mut level = level_with_floor()
            .with_sign(Rect::new(300, 440, 40, 60), "careful")
            .with_trigger(Rect::new(300, 480, 50, 20), TriggerKind::Hazard);
        let mut session = Session::default();
        level.player.rect.x = 310;
        level.active_sign = Some(0);
        handle_collisions(&mut level, &mut session);
        assert_eq!(session.deaths, 1);
        assert!(level.active_sign().is_none());
    }

    #[test]
    fn test_checkpoint_moves_spawn_once() {
        let mut level =
            level_with_floor().with_trigger(Rect::new(400, 400, 20, 100), TriggerKind::Checkpoint);
        let mut session = Session::default();
        level.player.rect.x = 395;
        handle_collisions(&mut level, &mut session);
        handle_collisions(&mut level, &mut session);
        assert_eq!(level.player.spawn(), IVec2::new(390, 440));
        assert_eq!(session.events().len(), 1);
    }

    #[test]
    fn test_exit_completes_once() {
        let mut level = level_with_floor().with_trigger(Rect::new(0, 400, 60, 100), TriggerKind::Exit);
        let mut session = Session::default();
        handle_collisions(&mut level, &mut session);
        handle_collisions(&mut level, &mut session);
        assert!(level.completed);
        assert_eq!(session.events(), &[GameEvent::LevelComplete { level: 1 }]);
    }

    #[test]
    fn test_falling_out_of_world() {
        let mut level = level_with_floor();
        let mut session = Session::default();
        level.player.rect.y = 5000;
        handle_collisions(&mut level, &mut session);
        assert_eq!(level.player.rect.y, 440);
        assert_eq!(session.deaths, 1);
    }

    #[test]
    fn test_boss_contact_kills() {
        let mut level = level_with_floor().with_boss(Rect::new(10, 450, 40, 40), 1.0);
        let mut session = Session::default();
        level.player.set_spawn(IVec2::new(-500, 440));
        handle_collisions(&mut level, &mut session);
        assert_eq!(level.player.rect.x, -500);
        assert_eq!(session.deaths, 1);
    }

    #[test]
    fn test_orb_pickup_and_sign() {
        let mut level = level_with_floor()
            .with_orb(IVec2::new(20, 470))
            .with_sign(Rect::new(0, 440, 40, 60), "hello");
        let mut session = Session::default();
        handle_collisions(&mut level, &mut session);
        assert!(level.orbs[0].collected);
        assert_eq!(session.orbs_collected, 1);
        assert_eq!(level.active_sign().map(|s| s.message.as_str()), Some("hello"));

        level.player.rect.x = 200;
        handle_collisions(&mut level, &mut session);
        assert!(level.active_sign().is_none());
        assert_eq!(session.orbs_collected, 1);
    }

    #[test]
    fn test_vertical_residual_resolved() {
        let mut level = level_with_floor();
        let mut session = Session::default();
        level.player.rect.y = 460;
        level.player.velocity.y = 4.0;
        handle_collisions(&mut level, &mut session);
        assert_eq!(level.player.rect.bottom(), 500);
        assert_eq!(level.player.velocity.y, 0.0);
    }

    proptest! {
        #[test]
        fn prop_prepass_single_platform_clears_overlap(
            px in -200i32..200,
            py in -50i32..50,
        ) {
            let platform = Platform::new(Rect::new(0, 0, 100, 100));
            let mut player = Player::new(IVec2::new(px, py));
            let overlapped = player.rect.intersects(&platform.rect);
            horizontal_prepass(&mut player, std::slice::from_ref(&platform));
            prop_assert!(!player.rect.intersects(&platform.rect));
            if overlapped {
                prop_assert!(
                    player.rect.right() == platform.rect.left()
                        || player.rect.left() == platform.rect.right()
                );
            } else {
                prop_assert_eq!(player.rect.x, px);
            }
        }
    }
}
