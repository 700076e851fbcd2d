//! Dodge Danger - An endless-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, movement, collisions, clock)
//! - `session`: Menu/play/pause/lost state machine around the simulation
//! - `input`: Keyboard and gamepad events mapped to semantic actions
//! - `renderer`: Backend-neutral draw interface and scene drawing
//! - `platform`: Screen-idle control and window events
//! - `persistence`: Key-value settings store
//! - `settings`: High score and window preferences

pub mod app;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Screen, Session};
pub use settings::Settings;
pub use sim::{SimClock, SimConfig};

use glam::Vec3;

/// RGBA color
pub type Color = [f32; 4];

/// Game configuration constants
pub mod consts {
    use glam::Vec3;
    use std::time::Duration;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// `SIM_DT` as a duration, used by the accumulator
    pub const SIM_INTERVAL: Duration = Duration::from_nanos(16_666_667);
    /// Maximum ticks run per real frame to prevent spiral of death
    pub const MAX_CATCH_UP_TICKS: u32 = 25;
    /// Frame rate cap when vsync is off or nothing is drawn
    pub const MAX_FPS_RATE: u32 = 120;

    /// Corridor half-width on the x-axis
    pub const MAX_BOUNDARY_X_MAGNITUDE: f32 = 8.0;
    /// Extra width of the rendered walls beyond the corridor
    pub const MAX_BOUNDARY_RENDER_GAP: f32 = 0.2;

    /// Player half-extent
    pub const PLAYER_MAGNITUDE: f32 = 0.05;
    /// Cube half-extent
    pub const CUBE_MAGNITUDE: f32 = 1.0;

    /// Player defaults
    pub const PLAYER_INITIAL_SPEED: f32 = 4.0;
    pub const PLAYER_START_POSITION: Vec3 = Vec3::new(0.0, 0.0, 20.0);

    /// Seconds before the "Dodge!" prompt disappears
    pub const INSTRUCTION_DURATION: f64 = 4.0;

    /// Cubes further than this ahead of the player are not drawn
    pub const CUBE_PLAYER_DIST_AWAY: f32 = 100.0;
    /// Cubes closer than this get the front-face cross
    pub const CUBE_PLAYER_CROSS_DIST_AWAY: f32 = 40.0;
    /// Far plane of the projection, used to stretch the walls
    pub const PROJECTION_FAR_VIEW_DISTANCE: f32 = 10000.0;

    /// Settings store
    pub const USER_DEFAULTS_NAME: &str = "dodgedanger";
    pub const HIGH_SCORE_KEY: &str = "high_score";
    pub const FULLSCREEN_KEY: &str = "fullscreen";
    pub const WINDOW_WIDTH_KEY: &str = "window_width";
    pub const WINDOW_HEIGHT_KEY: &str = "window_height";
}

/// Colors shared by the simulation and the scene
pub mod colors {
    use crate::Color;

    pub const MARKER: Color = [0.0, 1.0, 0.0, 1.0];
    pub const WARNING: Color = [1.0, 1.0, 0.0, 1.0];
    pub const WALLS: Color = [0.0, 1.0, 0.0, 1.0];
    pub const TEXT: Color = [1.0, 1.0, 1.0, 1.0];

    /// Palette obstacle cubes are drawn from
    pub const CUBE_PALETTE: [Color; 5] = [
        [0.0, 1.0, 0.0, 1.0],
        [0.0, 0.0, 1.0, 1.0],
        [0.7, 0.0, 0.0, 1.0],
        [1.0, 0.0, 1.0, 1.0],
        [0.2, 0.2, 0.5, 1.0],
    ];
}

/// Length of the diagonal of a square with the given half-extent
#[inline]
pub fn half_diagonal(magnitude: f32) -> f32 {
    (magnitude * magnitude + magnitude * magnitude).sqrt()
}

/// Collision threshold: player diagonal plus cube diagonal
#[inline]
pub fn player_cube_diagonal_sum_distance() -> f32 {
    half_diagonal(consts::PLAYER_MAGNITUDE) + half_diagonal(consts::CUBE_MAGNITUDE)
}

/// Lateral x coordinate of a corridor bucket
#[inline]
pub fn bucket_x(bucket: u32) -> f32 {
    -consts::MAX_BOUNDARY_X_MAGNITUDE
        + consts::CUBE_MAGNITUDE
        + bucket as f32 * (consts::CUBE_MAGNITUDE * 2.0)
}

/// Number of cube-wide lateral buckets across the corridor
#[inline]
pub fn lateral_bucket_count() -> u32 {
    ((consts::MAX_BOUNDARY_X_MAGNITUDE * 2.0) / (consts::CUBE_MAGNITUDE * 2.0)) as u32
}

/// True if the point is within `distance` of the player along -z
#[inline]
pub fn within_depth(player: Vec3, point: Vec3, distance: f32) -> bool {
    point.z >= player.z - distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_threshold() {
        let expected = 0.05_f32 * 2.0_f32.sqrt() + 2.0_f32.sqrt();
        assert!((player_cube_diagonal_sum_distance() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_buckets_span_corridor() {
        assert_eq!(lateral_bucket_count(), 8);
        assert!((bucket_x(0) + 7.0).abs() < 1e-6);
        assert!((bucket_x(7) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn test_sim_interval_matches_dt() {
        assert!((consts::SIM_INTERVAL.as_secs_f32() - consts::SIM_DT).abs() < 1e-6);
    }
}
