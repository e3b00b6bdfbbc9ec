//! State that outlives a single scene
//!
//! The session is handed to each scene by `&mut` reference. It carries the
//! zoom level across scene changes, the overlay stack (pause) and the event
//! log the play loop writes gameplay outcomes into.

use std::path::Path;

use crate::renderer::camera::Zoom;
use crate::settings::Settings;
use crate::sim::event::GameEvent;

/// Events kept before the oldest are dropped
pub const MAX_EVENT_LOG: usize = 256;

/// Scenes pushed on top of the play scene. While one is present the play
/// loop is frozen; its UI is drawn elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Paused,
}

#[derive(Debug)]
pub struct Session {
    /// Zoom shared by every play scene; written back on each zoom input
    pub zoom_level: Zoom,
    pub settings: Settings,
    pub orbs_collected: u32,
    pub deaths: u32,
    overlays: Vec<Overlay>,
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            zoom_level: Zoom::new(settings.effective_zoom()),
            settings,
            orbs_collected: 0,
            deaths: 0,
            overlays: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn push_overlay(&mut self, overlay: Overlay) {
        log::debug!("Push overlay {:?}", overlay);
        self.overlays.push(overlay);
    }

    pub fn pop_overlay(&mut self) -> Option<Overlay> {
        self.overlays.pop()
    }

    pub fn is_paused(&self) -> bool {
        self.overlays.contains(&Overlay::Paused)
    }

    /// Record a gameplay outcome
    pub fn record(&mut self, event: GameEvent) {
        match event {
            GameEvent::PlayerDied { cause } => {
                self.deaths += 1;
                log::info!("Player died ({:?}), deaths: {}", cause, self.deaths);
            }
            GameEvent::OrbCollected { .. } => {
                self.orbs_collected += 1;
                log::debug!("Orb collected, total: {}", self.orbs_collected);
            }
            GameEvent::CheckpointReached { spawn } => {
                log::info!("Checkpoint reached at {}", spawn);
            }
            GameEvent::LevelComplete { level } => log::info!("Level {} complete", level),
            GameEvent::GravityFlipped { .. } | GameEvent::ZoomChanged { .. } => {
                log::debug!("{:?}", event);
            }
        }
        if self.events.len() >= MAX_EVENT_LOG {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Events recorded since the last drain, oldest first. Only the latest
    /// `MAX_EVENT_LOG` are kept; the counters cover everything.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Write the current zoom into the persisted settings
    pub fn persist(&mut self, path: impl AsRef<Path>) {
        self.settings.zoom_level = self.zoom_level.get();
        self.settings.save(path);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::event::DeathCause;

    #[test]
    fn test_session_reads_saved_zoom() {
        let settings = Settings {
            zoom_level: 1.5,
            ..Default::default()
        };
        let session = Session::new(settings);
        assert_eq!(session.zoom_level.get(), 1.5);
    }

    #[test]
    fn test_overlay_stack() {
        let mut session = Session::default();
        assert!(!session.is_paused());
        session.push_overlay(Overlay::Paused);
        assert!(session.is_paused());
        assert_eq!(session.pop_overlay(), Some(Overlay::Paused));
        assert!(!session.is_paused());
    }

    #[test]
    fn test_record_counts_outcomes() {
        let mut session = Session::default();
        session.record(GameEvent::PlayerDied {
            cause: DeathCause::Hazard,
        });
        session.record(GameEvent::OrbCollected { index: 0 });
        assert_eq!(session.deaths, 1);
        assert_eq!(session.orbs_collected, 1);
        assert_eq!(session.drain_events().len(), 2);
        assert!(session.events().is_empty());
    }

    #[test]
    fn test_event_log_is_bounded() {
        let mut session = Session::default();
        for index in 0..MAX_EVENT_LOG + 10 {
            session.record(GameEvent::OrbCollected { index });
        }
        assert_eq!(session.events().len(), MAX_EVENT_LOG);
        assert_eq!(session.events()[0], GameEvent::OrbCollected { index: 10 });
        assert_eq!(session.orbs_collected as usize, MAX_EVENT_LOG + 10);
    }

    #[test]
    fn test_persist_writes_zoom() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.json");
        let mut session = Session::default();
        session.zoom_level = Zoom::new(0.5);
        session.persist(&path);
        assert_eq!(Settings::load(&path).zoom_level, 0.5);
    }
}
