//! Run loop glue: frame pacing, per-frame update/draw and the autopilot
//!
//! The loop owns no game state. Each real frame it lets the session catch up
//! on simulation ticks, draws the scene when the window is visible, and
//! reports how long to sleep when presentation doesn't already throttle.

use std::time::Duration;

use glam::Vec3;

use crate::consts::*;
use crate::input::{Action, InputEvent};
use crate::platform::{Platform, WindowEvent};
use crate::renderer::{CubeGeometry, RenderError, Renderer, draw_scene};
use crate::session::{Screen, Session};
use crate::sim::Game;

/// Caps the frame rate at `MAX_FPS_RATE` when vsync can't
#[derive(Debug, Clone)]
pub struct FramePacer {
    target: Duration,
    last_runloop_time: Option<Duration>,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(MAX_FPS_RATE)
    }
}

impl FramePacer {
    pub fn new(max_fps: u32) -> Self {
        Self {
            target: Duration::from_secs(1) / max_fps.max(1),
            last_runloop_time: None,
        }
    }

    pub fn target(&self) -> Duration {
        self.target
    }

    /// Forget the previous frame, e.g. after the window was hidden
    pub fn reset(&mut self) {
        self.last_runloop_time = None;
    }

    /// How long to sleep after a frame finished at `now`
    pub fn delay_after_frame(&mut self, now: Duration) -> Duration {
        let delay = match self.last_runloop_time {
            Some(last) => self.target.saturating_sub(now.saturating_sub(last)),
            None => Duration::ZERO,
        };
        self.last_runloop_time = Some(now + delay);
        delay
    }
}

/// Result of one run loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub ticks: u32,
    pub drew: bool,
    /// Time to sleep before the next frame
    pub delay: Duration,
}

pub struct RunLoop {
    pacer: FramePacer,
    geometry: CubeGeometry,
}

impl RunLoop {
    /// Upload cube geometry; fails if the backend can't create buffers
    pub fn new(renderer: &mut dyn Renderer) -> Result<Self, RenderError> {
        let geometry = CubeGeometry::upload(renderer)?;
        log::debug!("Cube geometry uploaded: {geometry:?}");
        Ok(Self {
            pacer: FramePacer::default(),
            geometry,
        })
    }

    pub fn geometry(&self) -> &CubeGeometry {
        &self.geometry
    }

    pub fn frame<P: Platform>(
        &mut self,
        session: &mut Session<P>,
        renderer: &mut dyn Renderer,
        now: Duration,
    ) -> FrameReport {
        let ticks = session.update(now);

        let drew = session.needs_to_draw_scene();
        if drew {
            draw_scene(renderer, session, &self.geometry);
            renderer.submit_frame();
        }

        let delay = if !drew || !renderer.vsync() {
            self.pacer.delay_after_frame(now)
        } else {
            Duration::ZERO
        };

        FrameReport { ticks, drew, delay }
    }

    pub fn handle_window_event<P: Platform>(
        &mut self,
        session: &mut Session<P>,
        renderer: &mut dyn Renderer,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::Resized { width, height } => renderer.update_viewport(width, height),
            WindowEvent::Shown | WindowEvent::Hidden => self.pacer.reset(),
            _ => {}
        }
        session.handle_window_event(event);
    }
}

/// Depth ahead of the player the autopilot reacts to
const AUTOPILOT_LOOKAHEAD: f32 = 12.0;
/// Lateral clearance the autopilot keeps from cubes
const AUTOPILOT_CLEARANCE: f32 = CUBE_MAGNITUDE * 2.0 + 0.3;
/// Distance from a wall at which the autopilot stops steering into it
const AUTOPILOT_WALL_MARGIN: f32 = 1.0;

/// Steering decision for a single frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Steer {
    #[default]
    Straight,
    Left,
    Right,
}

/// Demo player that dodges the closest threatening cube
///
/// Emits press/release events only when its steering changes, like a
/// player holding a key down.
#[derive(Debug, Default)]
pub struct Autopilot {
    steer: Steer,
}

impl Autopilot {
    pub fn steer(&self) -> Steer {
        self.steer
    }

    /// Input events for this frame; empty unless steering changed
    pub fn drive<P: Platform>(&mut self, session: &Session<P>) -> Vec<InputEvent> {
        let next = match (session.screen(), session.game()) {
            (Screen::Playing, Some(game)) => Self::choose(game),
            _ => Steer::Straight,
        };
        if next == self.steer {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        match self.steer {
            Steer::Left => events.push(InputEvent::release(Action::MoveLeft)),
            Steer::Right => events.push(InputEvent::release(Action::MoveRight)),
            Steer::Straight => {}
        }
        match next {
            Steer::Left => events.push(InputEvent::press(Action::MoveLeft)),
            Steer::Right => events.push(InputEvent::press(Action::MoveRight)),
            Steer::Straight => {}
        }
        self.steer = next;
        events
    }

    fn choose(game: &Game) -> Steer {
        let player = game.player_position;

        let threat = game
            .alive_cubes()
            .filter(|c| c.position.z < player.z && player.z - c.position.z < AUTOPILOT_LOOKAHEAD)
            .filter(|c| (c.position.x - player.x).abs() < AUTOPILOT_CLEARANCE)
            .min_by(|a, b| {
                (player.z - a.position.z)
                    .partial_cmp(&(player.z - b.position.z))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(cube) = threat else {
            return Steer::Straight;
        };

        let preferred = Self::away_from(player, cube.position);
        let wall = MAX_BOUNDARY_X_MAGNITUDE - AUTOPILOT_WALL_MARGIN;
        match preferred {
            Steer::Left if player.x <= -wall => Steer::Right,
            Steer::Right if player.x >= wall => Steer::Left,
            steer => steer,
        }
    }

    fn away_from(player: Vec3, cube: Vec3) -> Steer {
        if cube.x > player.x {
            Steer::Left
        } else if cube.x < player.x {
            Steer::Right
        } else if player.x > 0.0 {
            Steer::Left
        } else {
            Steer::Right
        }
    }
}
