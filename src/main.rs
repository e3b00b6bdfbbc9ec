//! Flipline headless runner
//!
//! Plays the built-in levels with a scripted input sequence at the fixed
//! timestep, optionally writing the last rendered frame to a PNG.
//!
//! Usage: `flipline [frames] [out.png]`

use flipline::assets::background_or_fallback;
use flipline::consts::{SCREEN_HEIGHT, SCREEN_WIDTH, SIM_DT};
use flipline::renderer::{BlockTextPainter, Surface};
use flipline::settings::SETTINGS_FILE;
use flipline::sim::{BuiltinLevels, FrameInput, InputEvent};
use flipline::{Game, Session, Settings};

const DEFAULT_FRAMES: u64 = 600;

/// Input for frame `n` of the demo run
fn scripted_input(n: u64) -> FrameInput {
    let mut input = FrameInput {
        right: true,
        sprint: (120..240).contains(&(n % 600)),
        ..Default::default()
    };
    if n % 90 == 45 {
        input.events.push(InputEvent::FlipGravity);
    }
    if n % 60 == 20 {
        input.events.push(InputEvent::Jump);
    }
    match n % 600 {
        300 => input.events.push(InputEvent::ZoomIn),
        320 => input.events.push(InputEvent::ZoomOut),
        // Pause and resume
        500 | 520 => input.events.push(InputEvent::Pause),
        _ => {}
    }
    input
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let frames = match args.next() {
        Some(arg) => arg.parse().unwrap_or_else(|_| {
            log::warn!("Invalid frame count {:?}, using {}", arg, DEFAULT_FRAMES);
            DEFAULT_FRAMES
        }),
        None => DEFAULT_FRAMES,
    };
    let output = args.next();

    log::info!("Flipline (native) starting, {} frames", frames);

    let settings = Settings::load(SETTINGS_FILE);
    let background = background_or_fallback(&settings.background_path, SCREEN_WIDTH, SCREEN_HEIGHT);
    let session = Session::new(settings);

    let Some(mut game) = Game::new(session, BuiltinLevels, background) else {
        log::error!("No levels to play");
        return;
    };

    let mut target = Surface::new(SCREEN_WIDTH, SCREEN_HEIGHT);
    let mut painter = BlockTextPainter;
    for n in 0..frames {
        game.run_frame(SIM_DT, &scripted_input(n));
        game.render(&mut target, &mut painter);
        if game.is_finished() {
            log::info!("Finished after {} frames", n + 1);
            break;
        }
    }

    let session = game.session();
    log::info!(
        "Level {}, {} orbs, {} deaths, zoom {:.1}",
        game.scene().level.number,
        session.orbs_collected,
        session.deaths,
        session.zoom_level.get()
    );

    if let Some(path) = output {
        match target.save_png(&path) {
            Ok(()) => log::info!("Saved frame to {}", path),
            Err(e) => log::error!("Failed to save frame to {}: {}", path, e),
        }
    }

    game.into_session().persist(SETTINGS_FILE);
}
