//! State manager and fixed timestep driver
//!
//! `Game` owns the session, the running play scene and where levels come
//! from. Overlays on the session freeze the scene; a completed level is
//! replaced by the next one from the source.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::renderer::{FrameStats, SceneRenderer, Surface, TextPainter};
use crate::session::Session;
use crate::sim::{FrameInput, InputEvent, LevelSource, PlayScene};

/// Longest frame time fed into the accumulator, in seconds
const MAX_FRAME_DT: f32 = 0.1;

/// Converts variable frame times into whole simulation ticks
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    accumulator: f32,
    max_substeps: u32,
}

impl FixedTimestep {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        }
    }

    /// Add `dt` seconds and return how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < self.max_substeps {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        substeps
    }

    /// Time carried over to the next frame
    pub fn remainder(&self) -> f32 {
        self.accumulator
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new()
    }
}

/// Gameplay outcomes accumulate on `session()`; the log is bounded by
/// [`crate::session::MAX_EVENT_LOG`], so callers may read or drain it at their own pace.
pub struct Game<S: LevelSource> {
    session: Session,
    scene: PlayScene,
    renderer: SceneRenderer,
    source: S,
    timestep: FixedTimestep,
    /// Presses waiting for the next tick
    pending: Vec<InputEvent>,
    finished: bool,
}

impl<S: LevelSource> Game<S> {
    /// Start at level 1. Returns `None` if the source has no first level.
    pub fn new(session: Session, source: S, background: Surface) -> Option<Self> {
        let Some(level) = source.load(1) else {
            log::error!("Level source has no level 1");
            return None;
        };
        let scene = PlayScene::new(level, &session);
        let mut renderer = SceneRenderer::new(background);
        renderer.show_hud = session.settings.show_hud;
        Some(Self {
            session,
            scene,
            renderer,
            source,
            timestep: FixedTimestep::new(),
            pending: Vec::new(),
            finished: false,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn scene(&self) -> &PlayScene {
        &self.scene
    }

    pub fn renderer(&self) -> &SceneRenderer {
        &self.renderer
    }

    /// Set once the last level has been completed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run one simulation tick
    pub fn frame(&mut self, input: &FrameInput) {
        if self.finished {
            return;
        }

        if self.session.is_paused() {
            if input.events.contains(&InputEvent::Pause) {
                self.session.pop_overlay();
                log::debug!("Resumed");
            }
            return;
        }

        self.scene.update(input, &mut self.session);

        if self.scene.level.completed {
            self.next_level();
        }
    }

    fn next_level(&mut self) {
        let next = self.scene.level.number + 1;
        match self.source.load(next) {
            Some(level) => {
                // Picks up the zoom the finished level left in the session
                self.scene = PlayScene::new(level, &self.session);
            }
            None => {
                log::info!(
                    "All levels complete ({} orbs, {} deaths)",
                    self.session.orbs_collected,
                    self.session.deaths
                );
                self.finished = true;
            }
        }
    }

    /// Advance by a real frame time. Presses go to the first tick only; later
    /// ticks of the same frame see held keys alone. Returns ticks run.
    pub fn run_frame(&mut self, dt: f32, input: &FrameInput) -> u32 {
        self.pending.extend_from_slice(&input.events);

        let substeps = self.timestep.advance(dt);
        for i in 0..substeps {
            let mut step = input.held_only();
            if i == 0 {
                step.events = std::mem::take(&mut self.pending);
            }
            self.frame(&step);
        }
        substeps
    }

    /// Draw the current scene into `target`
    pub fn render(&mut self, target: &mut Surface, painter: &mut dyn TextPainter) -> FrameStats {
        self.renderer.render(&self.scene, target, painter)
    }
}
