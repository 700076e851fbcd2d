//! Fixed timestep simulation tick
//!
//! Moves the player, consumes passed cubes, detects collisions and flags cubes
//! the player is on course to hit.

use glam::Vec3;
use rand::Rng;

use super::config::{SimConfig, WarningBand};
use super::level::generate_level;
use super::state::Game;
use crate::consts::*;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Cubes consumed by the player this tick
    pub passed: u32,
    /// The player hit a cube
    pub lost: bool,
    /// Every cube was gone and the pool was refilled
    pub regenerated: bool,
}

/// Advance the game by one fixed timestep
///
/// `collision_distance` is the precomputed player/cube diagonal sum.
pub fn tick(
    game: &mut Game,
    config: &SimConfig,
    collision_distance: f32,
    dt: f32,
    rng: &mut impl Rng,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if !game.is_running() {
        return outcome;
    }

    game.timer += f64::from(dt);
    if game.timer >= INSTRUCTION_DURATION {
        game.render_instruction = false;
    }

    let delta = movement_vector(game, dt * game.player_speed);
    game.player_position += delta;
    let player = game.player_position;

    let mut score = game.score;
    let mut speed = game.player_speed;
    let mut found_alive = false;
    for cube in game.cubes_mut().iter_mut() {
        if cube.dead {
            continue;
        }
        // Still counts as alive on the tick it gets consumed
        found_alive = true;

        let distance = cube.position.distance(player);
        if distance <= collision_distance {
            outcome.lost = true;
            break;
        } else if has_passed(player, cube.position) {
            cube.dead = true;
            outcome.passed += 1;
            score += 1;
            if speed < config.speed_cap {
                speed = (speed + config.speed_increase).min(config.speed_cap);
            }
        } else if let Some(band) = warning_band(config, distance, collision_distance) {
            cube.warning = predicts_collision(
                player,
                delta,
                cube.position,
                collision_distance,
                band.max_iterations,
            );
        } else {
            cube.warning = false;
        }
    }

    game.score = score;
    game.player_speed = speed;

    if outcome.lost {
        game.player_lost = true;
    } else if !found_alive {
        log::info!("All cubes passed, regenerating level (score {})", game.score);
        generate_level(game, 0, config, rng);
        outcome.regenerated = true;
    }

    outcome
}

/// Forward motion blended with lateral intent, cancelled at the walls
pub fn movement_vector(game: &Game, step: f32) -> Vec3 {
    let lateral = match (game.moving_left, game.moving_right) {
        (false, true) => 1.0,
        (true, false) => -1.0,
        _ => 0.0,
    };
    let delta = Vec3::new(lateral, 0.0, -1.0).normalize() * step;

    let next_x = game.player_position.x + delta.x;
    if next_x.abs() + PLAYER_MAGNITUDE <= MAX_BOUNDARY_X_MAGNITUDE {
        delta
    } else {
        Vec3::new(0.0, 0.0, -step)
    }
}

/// The player's leading edge has reached the cube's far edge
#[inline]
pub fn has_passed(player: Vec3, cube: Vec3) -> bool {
    player.z - PLAYER_MAGNITUDE < cube.z + CUBE_MAGNITUDE
}

fn warning_band(config: &SimConfig, distance: f32, collision_distance: f32) -> Option<WarningBand> {
    config
        .warning
        .filter(|band| distance <= collision_distance * band.factor)
}

/// Replay `delta` forward and report whether the player hits the cube before
/// passing it
fn predicts_collision(
    player: Vec3,
    delta: Vec3,
    cube: Vec3,
    collision_distance: f32,
    max_iterations: u32,
) -> bool {
    let mut future = player + delta;
    for _ in 0..max_iterations {
        future += delta;
        if cube.distance(future) <= collision_distance {
            return true;
        }
        if has_passed(future, cube) {
            return false;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player_cube_diagonal_sum_distance;
    use crate::sim::state::Cube;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn alive(x: f32, y: f32, z: f32) -> Cube {
        Cube {
            position: Vec3::new(x, y, z),
            color: crate::colors::CUBE_PALETTE[1],
            dead: false,
            warning: false,
        }
    }

    /// Game with only the given cubes alive; the marker slot stays dead
    fn game_with(cubes: &[Cube]) -> Game {
        let mut game = Game::new(cubes.len() + 1);
        game.cubes_mut()[1..].copy_from_slice(cubes);
        game
    }

    fn step(game: &mut Game, config: &SimConfig, dt: f32) -> TickOutcome {
        let mut rng = Pcg32::seed_from_u64(1);
        tick(game, config, player_cube_diagonal_sum_distance(), dt, &mut rng)
    }

    #[test]
    fn test_passing_cube_scores() {
        let config = SimConfig::dodge_danger();
        let mut game = game_with(&[alive(4.0, 0.0, 18.0)]);

        let outcome = step(&mut game, &config, 0.25);

        assert_eq!(outcome.passed, 1);
        assert!(!outcome.lost);
        assert!(!outcome.regenerated);
        assert!(game.cubes()[1].dead);
        assert_eq!(game.score, 1);
        assert!((game.player_speed - 4.2).abs() < 1e-5);
    }

    #[test]
    fn test_regenerates_after_last_cube_consumed() {
        let config = SimConfig::classic();
        let mut game = game_with(&[alive(4.0, 0.0, 18.0)]);
        step(&mut game, &config, 0.25);
        assert_eq!(game.alive_cubes().count(), 0);

        let outcome = step(&mut game, &config, SIM_DT);

        assert!(outcome.regenerated);
        assert_eq!(game.capacity(), 2);
        assert_eq!(game.alive_cubes().count(), 2);
        assert_eq!(game.player_position, PLAYER_START_POSITION);
        assert_eq!(game.score, 1);
    }

    #[test]
    fn test_collision_loses_without_scoring() {
        let config = SimConfig::dodge_danger();
        let mut game = game_with(&[alive(0.0, 0.0, 19.0), alive(4.0, 0.0, 25.0)]);

        let outcome = step(&mut game, &config, SIM_DT);

        assert!(outcome.lost);
        assert!(game.player_lost);
        assert_eq!(outcome.passed, 0);
        assert_eq!(game.score, 0);
        assert_eq!(game.player_speed, PLAYER_INITIAL_SPEED);
        // Scan stops at the first collision
        assert!(!game.cubes()[2].dead);
    }

    #[test]
    fn test_speed_increases_once_per_cube() {
        let config = SimConfig::dodge_danger();
        let mut game = game_with(&[
            alive(4.0, 0.0, 25.0),
            alive(-4.0, 0.0, 25.0),
            alive(6.0, 0.0, 25.0),
        ]);

        let outcome = step(&mut game, &config, SIM_DT);

        let mut expected = PLAYER_INITIAL_SPEED;
        for _ in 0..3 {
            expected = (expected + config.speed_increase).min(config.speed_cap);
        }
        assert_eq!(outcome.passed, 3);
        assert_eq!(game.score, 3);
        assert_eq!(game.player_speed, expected);
    }

    #[test]
    fn test_speed_clamped_at_cap() {
        let config = SimConfig::dodge_danger();
        let mut game = game_with(&[alive(4.0, 0.0, 25.0), alive(-4.0, 0.0, 25.0)]);
        game.player_speed = 19.9;

        let outcome = step(&mut game, &config, SIM_DT);

        assert_eq!(outcome.passed, 2);
        assert_eq!(game.score, 2);
        assert_eq!(game.player_speed, config.speed_cap);
    }

    #[test]
    fn test_warning_on_course_cube() {
        let config = SimConfig::dodge_danger();
        let mut game = game_with(&[alive(0.0, 0.0, 14.0), alive(4.0, 0.0, 14.0)]);
        game.cubes_mut()[2].warning = true;

        step(&mut game, &config, SIM_DT);

        assert!(game.cubes()[1].warning);
        assert!(!game.cubes()[2].warning);
    }

    #[test]
    fn test_far_cube_warning_cleared() {
        let config = SimConfig::dodge_danger();
        let mut game = game_with(&[alive(0.0, 0.0, -100.0)]);
        game.cubes_mut()[1].warning = true;

        step(&mut game, &config, SIM_DT);

        assert!(!game.cubes()[1].warning);
    }

    #[test]
    fn test_no_warnings_without_band() {
        let config = SimConfig::classic();
        let mut game = game_with(&[alive(0.0, 0.0, 14.0)]);

        step(&mut game, &config, SIM_DT);

        assert!(!game.cubes()[1].warning);
    }

    #[test]
    fn test_instruction_hidden_after_duration() {
        let config = SimConfig::dodge_danger();
        let mut game = game_with(&[alive(0.0, 50.0, -1.0e6)]);

        for _ in 0..7 {
            step(&mut game, &config, 0.5);
        }
        assert!(game.render_instruction);
        step(&mut game, &config, 0.5);
        assert!(!game.render_instruction);
    }

    #[test]
    fn test_wall_blocks_lateral_motion() {
        let mut game = game_with(&[]);
        game.player_position.x = 7.9;
        game.moving_right = true;
        let delta = movement_vector(&game, 1.0);
        assert_eq!(delta, Vec3::new(0.0, 0.0, -1.0));

        game.moving_right = false;
        game.moving_left = true;
        let delta = movement_vector(&game, 1.0);
        assert!(delta.x < 0.0);
        assert!(delta.z < 0.0);
    }

    #[test]
    fn test_both_directions_cancel() {
        let mut game = game_with(&[]);
        game.moving_left = true;
        game.moving_right = true;
        assert_eq!(movement_vector(&game, 2.0), Vec3::new(0.0, 0.0, -2.0));
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_corridor(
            moves in prop::collection::vec((any::<bool>(), any::<bool>()), 1..200),
            speed in 4.0f32..20.0,
        ) {
            let config = SimConfig::dodge_danger();
            let mut game = game_with(&[alive(0.0, 50.0, -1.0e6)]);
            game.player_speed = speed;
            for (left, right) in moves {
                game.moving_left = left;
                game.moving_right = right;
                step(&mut game, &config, SIM_DT);
                prop_assert!(game.player_position.x.abs() <= MAX_BOUNDARY_X_MAGNITUDE);
            }
        }

        #[test]
        fn prop_paused_or_lost_is_noop(
            paused in any::<bool>(),
            dt in 0.001f32..1.0,
            seed in any::<u64>(),
        ) {
            let config = SimConfig::classic();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut game = Game::new(config.capacity);
            generate_level(&mut game, 1, &config, &mut rng);
            game.paused = paused;
            game.player_lost = !paused;
            game.moving_right = true;
            let before = game.clone();

            let outcome = tick(
                &mut game,
                &config,
                player_cube_diagonal_sum_distance(),
                dt,
                &mut rng,
            );

            prop_assert_eq!(outcome, TickOutcome::default());
            prop_assert_eq!(game.player_position, before.player_position);
            prop_assert_eq!(game.score, before.score);
            prop_assert_eq!(game.player_speed, before.player_speed);
            prop_assert_eq!(game.timer, before.timer);
            prop_assert_eq!(game.cubes(), before.cubes());
        }
    }
}
