//! Procedural level generation
//!
//! Fills the cube pool with rows of obstacles receding down -z. Rows get wider
//! as more cubes are placed; each cube takes a distinct lateral bucket within
//! its row.

use glam::Vec3;
use rand::Rng;

use super::config::SimConfig;
use super::state::{Cube, Game};
use crate::consts::*;
use crate::{bucket_x, colors, lateral_bucket_count};

/// Place a new batch of cubes in `game.cubes[starting_index..]`
///
/// Always resets the player to the start position and re-places the marker
/// cube at the origin. The batch never starts before index 1 so the marker
/// survives, and its first row sits `batch_gap` diameters behind the marker.
pub fn generate_level(
    game: &mut Game,
    starting_index: usize,
    config: &SimConfig,
    rng: &mut impl Rng,
) {
    game.player_position = PLAYER_START_POSITION;

    let cubes = game.cubes_mut();
    let capacity = cubes.len();
    if capacity == 0 {
        return;
    }
    cubes[0] = Cube::marker();

    let buckets = lateral_bucket_count();
    let diameter = CUBE_MAGNITUDE * 2.0;
    let mut depth = -diameter * config.batch_gap as f32;
    let mut index = starting_index.max(1);
    let mut used = vec![false; buckets as usize];

    while index < capacity {
        let remaining = (capacity - index) as u32;
        let max_per_row = config.max_per_row(index).clamp(1, buckets);
        let row_size = rng.random_range(1..=max_per_row).min(remaining);

        used.fill(false);
        for _ in 0..row_size {
            let bucket = loop {
                let candidate = rng.random_range(0..buckets);
                if !used[candidate as usize] {
                    used[candidate as usize] = true;
                    break candidate;
                }
            };

            let palette = &colors::CUBE_PALETTE;
            let color = palette[rng.random_range(0..palette.len())];
            cubes[index] = Cube {
                position: Vec3::new(bucket_x(bucket), 0.0, depth),
                color,
                dead: false,
                warning: false,
            };
            index += 1;
        }

        let extra_gap = if config.max_extra_row_gap > 0 {
            rng.random_range(0..config.max_extra_row_gap)
        } else {
            0
        };
        depth -= diameter * (2 + extra_gap) as f32;
    }
}
