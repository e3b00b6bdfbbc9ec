//! Fixed-step play loop
//!
//! One call to `PlayScene::update` is one frame of simulation. The phases run
//! in a fixed order and never re-enter:
//!
//! input events -> sprint/speed -> horizontal move -> horizontal pre-pass ->
//! vertical physics -> full collision pass -> orbs, bosses -> flip burst ->
//! speedline advance -> camera recompute
//!
//! Horizontal correction happens before vertical physics so a diagonal move
//! into a platform corner always resolves x first, then y.

use glam::UVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{handle_collisions, horizontal_prepass};
use super::event::GameEvent;
use super::level::Level;
use super::speedline::{Speedline, advance_all, spawn_burst};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::renderer::camera::{Camera, Zoom};
use crate::session::{Overlay, Session};

/// Discrete key/button presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    FlipGravity,
    Jump,
    Reset,
    Pause,
    ZoomIn,
    ZoomOut,
}

/// Input for a single frame: presses since the last frame plus held keys
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub events: Vec<InputEvent>,
    pub left: bool,
    pub right: bool,
    pub sprint: bool,
}

impl FrameInput {
    pub fn with_event(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Copy of the held state with no presses (for extra substeps)
    pub fn held_only(&self) -> Self {
        Self {
            events: Vec::new(),
            ..*self
        }
    }
}

/// The running level plus the visual state that belongs to it
#[derive(Debug, Clone)]
pub struct PlayScene {
    pub level: Level,
    pub speedlines: Vec<Speedline>,
    /// Camera for the frame just simulated
    pub camera: Camera,
    zoom: Zoom,
    screen: UVec2,
    rng: Pcg32,
    speedline_lifetime: u32,
    particles: bool,
    /// Frames simulated so far
    pub frame: u64,
}

impl PlayScene {
    /// Start a level, picking up the zoom the session carries
    pub fn new(level: Level, session: &Session) -> Self {
        let zoom = session.zoom_level;
        let screen = UVec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        let camera = Camera::compute(level.player.center(), zoom, screen);
        log::info!("Starting level {} at zoom {:.1}", level.number, zoom.get());
        Self {
            level,
            speedlines: Vec::new(),
            camera,
            zoom,
            screen,
            rng: Pcg32::seed_from_u64(session.settings.seed),
            speedline_lifetime: session.settings.effective_lifetime(),
            particles: session.settings.particles,
            frame: 0,
        }
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn screen(&self) -> UVec2 {
        self.screen
    }

    /// Simulate one frame
    pub fn update(&mut self, input: &FrameInput, session: &mut Session) {
        self.frame += 1;

        self.handle_events(input, session);
        if session.is_paused() {
            // The pause overlay takes over from the next frame on. A flip
            // pressed alongside the pause still bursts now.
            self.camera = self.compute_camera();
            if self.level.player.take_flip() {
                self.spawn_flip_burst(session);
            }
            return;
        }

        let player = &mut self.level.player;
        player.set_sprinting(input.sprint);

        let mut x_velocity = 0.0;
        if input.left {
            x_velocity -= player.current_speed;
        }
        if input.right {
            x_velocity += player.current_speed;
        }
        player.update(x_velocity);

        horizontal_prepass(&mut self.level.player, &self.level.platforms);
        self.level.player.apply_physics(&self.level.platforms);
        handle_collisions(&mut self.level, session);

        self.level.update_orbs();
        self.level.update_bosses();

        if self.level.player.take_flip() {
            self.spawn_flip_burst(session);
        }
        advance_all(&mut self.speedlines);

        self.camera = self.compute_camera();
    }

    fn handle_events(&mut self, input: &FrameInput, session: &mut Session) {
        for event in &input.events {
            match event {
                InputEvent::FlipGravity => self.level.player.flip_gravity(),
                InputEvent::Jump => self.level.player.jump(),
                InputEvent::Reset => self.level.player.reset_position(),
                InputEvent::Pause => session.push_overlay(Overlay::Paused),
                InputEvent::ZoomIn => self.set_zoom(self.zoom.zoom_in(), session),
                InputEvent::ZoomOut => self.set_zoom(self.zoom.zoom_out(), session),
            }
        }
    }

    fn set_zoom(&mut self, zoom: Zoom, session: &mut Session) {
        self.zoom = zoom;
        session.zoom_level = zoom;
        session.record(GameEvent::ZoomChanged {
            zoom_milli: (zoom.get() * 1000.0).round() as u32,
        });
    }

    fn compute_camera(&self) -> Camera {
        Camera::compute(self.level.player.center(), self.zoom, self.screen)
    }

    /// Screen-wide burst for the flip that happened this frame. Uses the
    /// camera the renderer is about to use, derived from the resolved player.
    fn spawn_flip_burst(&mut self, session: &mut Session) {
        let player = &self.level.player;
        session.record(GameEvent::GravityFlipped {
            direction: player.gravity_direction(),
        });
        if !self.particles {
            return;
        }
        let camera = self.compute_camera();
        spawn_burst(
            &mut self.speedlines,
            &mut self.rng,
            camera.left()..=camera.right(),
            player.rect.center_y(),
            player.gravity(),
            self.speedline_lifetime,
        );
    }
}
