//! Software rendering
//!
//! Draws into CPU-side RGBA surfaces. The world is rendered at the zoomed
//! viewport size and scaled to the output; the UI is drawn at output size.

pub mod background;
pub mod camera;
pub mod hud;
pub mod scene;
pub mod surface;

pub use background::{BackgroundCache, Memo};
pub use camera::{Camera, Zoom, is_visible, parallax_tiles};
pub use hud::{BlockTextPainter, HudStrings, TextPainter};
pub use scene::{FrameStats, SceneRenderer};
pub use surface::{Rgba, Surface, colors};
