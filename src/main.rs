//! Dodge Danger entry point
//!
//! Native headless build: the autopilot plays against a recording renderer
//! for a fixed wall-clock duration, then settings are persisted.
//!
//! Usage: `dodge-danger [seconds]`. The settings file lives in
//! `$DODGE_DANGER_DIR` (default: the working directory).

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use dodge_danger::app::{Autopilot, RunLoop};
use dodge_danger::consts::*;
use dodge_danger::input::{Action, InputEvent};
use dodge_danger::persistence::JsonFileStore;
use dodge_danger::platform::{HeadlessPlatform, Ticks, WindowEvent};
use dodge_danger::renderer::RecordingRenderer;
use dodge_danger::{Screen, Session, Settings, SimConfig};

const DEFAULT_RUN_SECONDS: u64 = 10;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Dodge Danger (headless) starting...");

    let run_for = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .map_or(Duration::from_secs(DEFAULT_RUN_SECONDS), Duration::from_secs);

    let dir = std::env::var_os("DODGE_DANGER_DIR")
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    let mut store = JsonFileStore::open(JsonFileStore::path_for(&dir, USER_DEFAULTS_NAME));
    let settings = Settings::load(&store);

    let seed: u64 = rand::random();
    let mut session = Session::new(
        SimConfig::default(),
        settings,
        seed,
        HeadlessPlatform::default(),
    );
    let mut renderer = RecordingRenderer::new(false);
    let mut run_loop = match RunLoop::new(&mut renderer) {
        Ok(run_loop) => run_loop,
        Err(e) => {
            log::error!("Renderer setup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (width, height) = (session.settings().window_width, session.settings().window_height);
    let resized = WindowEvent::Resized { width, height };
    run_loop.handle_window_event(&mut session, &mut renderer, resized);
    run_loop.handle_window_event(&mut session, &mut renderer, WindowEvent::Shown);

    let ticks = Ticks::default();
    let mut pilot = Autopilot::default();
    while ticks.now() < run_for && !session.should_quit() {
        // Start a new run whenever the previous one ended
        if matches!(session.screen(), Screen::Menu | Screen::Lost) {
            session.handle_input(InputEvent::press(Action::Confirm));
        }
        for event in pilot.drive(&session) {
            session.handle_input(event);
        }

        let report = run_loop.frame(&mut session, &mut renderer, ticks.now());
        if !report.delay.is_zero() {
            std::thread::sleep(report.delay);
        }
    }

    log::info!(
        "Ran {:.1}s: {} frames, {} games, score {}",
        ticks.now().as_secs_f32(),
        renderer.frames_submitted(),
        session.games_played(),
        session.game().map_or(0, |g| g.score)
    );

    if let Err(e) = session.shutdown(&mut store) {
        log::error!("Failed to save settings to {}: {e}", store.path().display());
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
