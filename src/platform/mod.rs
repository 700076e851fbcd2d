//! Platform abstraction layer
//!
//! Handles the narrow set of platform services the game consumes:
//! - Screen idle (sleep) control
//! - Window events
//! - Monotonic time for the run loop

use std::time::{Duration, Instant};

/// Platform services called by the session
pub trait Platform {
    /// Allow or prevent the display from sleeping
    fn set_allows_screen_idling(&mut self, allows: bool);

    /// A gamepad was plugged in; rescan devices
    fn poll_new_gamepads(&mut self) {}
}

/// Window events forwarded to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Resized { width: u32, height: u32 },
    FocusGained,
    FocusLost,
    Shown,
    Hidden,
    DeviceConnected,
}

/// Platform without a display; records the idle state only
#[derive(Debug, Default)]
pub struct HeadlessPlatform {
    allows_screen_idling: bool,
    idle_toggles: u32,
    gamepad_polls: u32,
}

impl HeadlessPlatform {
    pub fn allows_screen_idling(&self) -> bool {
        self.allows_screen_idling
    }

    /// Number of idle toggles requested so far
    pub fn idle_toggles(&self) -> u32 {
        self.idle_toggles
    }

    /// Number of device rescans requested so far
    pub fn gamepad_polls(&self) -> u32 {
        self.gamepad_polls
    }
}

impl Platform for HeadlessPlatform {
    fn set_allows_screen_idling(&mut self, allows: bool) {
        log::debug!("Screen idling {}", if allows { "allowed" } else { "prevented" });
        self.allows_screen_idling = allows;
        self.idle_toggles += 1;
    }

    fn poll_new_gamepads(&mut self) {
        log::debug!("Rescanning gamepads");
        self.gamepad_polls += 1;
    }
}

/// Monotonic time since launch
#[derive(Debug, Clone, Copy)]
pub struct Ticks {
    start: Instant,
}

impl Default for Ticks {
    fn default() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Ticks {
    pub fn now(&self) -> Duration {
        self.start.elapsed()
    }
}
