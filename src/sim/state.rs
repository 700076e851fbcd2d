//! Game state and core simulation types

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::Color;
use crate::colors;
use crate::consts::*;

/// An obstacle cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    pub position: Vec3,
    pub color: Color,
    /// Passed by the player; skipped until the pool is regenerated
    pub dead: bool,
    /// Predicted to collide with the player
    pub warning: bool,
}

impl Default for Cube {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            color: colors::MARKER,
            dead: true,
            warning: false,
        }
    }
}

impl Cube {
    /// The cube at index 0
    pub fn marker() -> Self {
        Self {
            position: Vec3::ZERO,
            color: colors::MARKER,
            dead: false,
            warning: false,
        }
    }
}

/// Which option of the pause/lost overlay is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OverlayChoice {
    /// Resume or Play Again
    #[default]
    Continue,
    Exit,
}

impl OverlayChoice {
    pub fn toggled(self) -> Self {
        match self {
            OverlayChoice::Continue => OverlayChoice::Exit,
            OverlayChoice::Exit => OverlayChoice::Continue,
        }
    }
}

/// A single run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub player_position: Vec3,
    pub player_speed: f32,
    pub score: u32,
    /// Seconds of unpaused play
    pub timer: f64,
    /// Fixed-size pool; index 0 is the marker cube
    cubes: Box<[Cube]>,
    pub paused: bool,
    pub player_lost: bool,
    pub moving_left: bool,
    pub moving_right: bool,
    pub overlay_choice: OverlayChoice,
    /// Show the "Dodge!" prompt
    pub render_instruction: bool,
}

impl Game {
    /// Allocate the cube pool; cubes are placed by the level generator
    pub fn new(capacity: usize) -> Self {
        Self {
            player_position: PLAYER_START_POSITION,
            player_speed: PLAYER_INITIAL_SPEED,
            score: 0,
            timer: 0.0,
            cubes: vec![Cube::default(); capacity].into_boxed_slice(),
            paused: false,
            player_lost: false,
            moving_left: false,
            moving_right: false,
            overlay_choice: OverlayChoice::default(),
            render_instruction: true,
        }
    }

    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Mutable access to the pool; the length never changes
    pub fn cubes_mut(&mut self) -> &mut [Cube] {
        &mut self.cubes
    }

    pub fn capacity(&self) -> usize {
        self.cubes.len()
    }

    pub fn alive_cubes(&self) -> impl Iterator<Item = &Cube> {
        self.cubes.iter().filter(|c| !c.dead)
    }

    /// Simulation only advances while neither paused nor lost
    pub fn is_running(&self) -> bool {
        !self.paused && !self.player_lost
    }
}

/// Wraps the current game across restarts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSeries {
    pub games_played: u32,
    pub game: Game,
}

impl GameSeries {
    pub fn new(game: Game) -> Self {
        Self {
            games_played: 0,
            game,
        }
    }

    /// Swap in a fresh game, keeping the count
    pub fn restart(&mut self, game: Game) {
        self.game = game;
    }
}
