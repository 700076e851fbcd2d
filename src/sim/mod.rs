//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by cube index)
//! - No rendering or platform dependencies

pub mod clock;
pub mod config;
pub mod level;
pub mod state;
pub mod tick;

pub use clock::SimClock;
pub use config::{ConfigError, DifficultyBand, SimConfig, WarningBand};
pub use level::generate_level;
pub use state::{Cube, Game, GameSeries, OverlayChoice};
pub use tick::{TickOutcome, tick};
