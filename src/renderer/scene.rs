//! Scene drawing
//!
//! Builds one frame from session state: the main menu when no game exists,
//! otherwise the corridor, cubes, HUD and the pause/lost overlays.

use glam::{Mat4, Vec3};

use super::vertex::{CUBE_CROSSED_INDEX_COUNT, CUBE_OUTLINE_INDEX_COUNT, CubeGeometry};
use super::{Renderer, TextAlign};
use crate::consts::*;
use crate::platform::Platform;
use crate::session::Session;
use crate::sim::{Game, OverlayChoice};
use crate::{Color, colors, within_depth};

/// Depth text is placed at
const TEXT_DEPTH: f32 = -70.0;
const MENU_DIMMED: Color = [1.0, 1.0, 1.0, 0.5];
const OVERLAY_DIMMED: Color = [1.0, 1.0, 1.0, 0.7];

fn text_at(x: f32, y: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, TEXT_DEPTH))
}

fn highlight(selected: bool, dimmed: Color) -> Color {
    if selected { colors::TEXT } else { dimmed }
}

/// Draw the current frame
pub fn draw_scene<P: Platform>(
    renderer: &mut dyn Renderer,
    session: &Session<P>,
    geometry: &CubeGeometry,
) {
    match session.game() {
        None => draw_menu(renderer, session.play_option_selected()),
        Some(game) => {
            draw_corridor(renderer, game, geometry);
            draw_hud(renderer, game);
            if game.player_lost {
                draw_lost_overlay(renderer, game.overlay_choice, session.high_score());
            } else if game.paused {
                draw_overlay(renderer, game.overlay_choice, "Resume");
            }
        }
    }
}

fn draw_menu(renderer: &mut dyn Renderer, play_selected: bool) {
    renderer.draw_text(
        text_at(0.0, 16.0),
        colors::TEXT,
        0.015,
        "Dodge Danger",
        TextAlign::Center,
    );

    let play = text_at(0.0, 5.0);
    renderer.draw_text(
        play,
        highlight(play_selected, MENU_DIMMED),
        0.01,
        "Play",
        TextAlign::Center,
    );
    renderer.draw_text(
        play * Mat4::from_translation(Vec3::new(0.0, -5.0, 0.0)),
        highlight(!play_selected, MENU_DIMMED),
        0.01,
        "Quit",
        TextAlign::Center,
    );
}

fn draw_corridor(renderer: &mut dyn Renderer, game: &Game, geometry: &CubeGeometry) {
    let player = game.player_position;
    let view = Mat4::from_translation(-player);

    // Walls stretch from the player to the far plane
    let walls = view
        * Mat4::from_scale(Vec3::new(
            MAX_BOUNDARY_X_MAGNITUDE + MAX_BOUNDARY_RENDER_GAP,
            1.0,
            player.z + PROJECTION_FAR_VIEW_DISTANCE,
        ));
    renderer.draw_lines_by_indices(
        walls,
        geometry.vertices,
        geometry.line_indices,
        CUBE_OUTLINE_INDEX_COUNT,
        colors::WALLS,
    );

    // Slightly narrow so neighbours don't share an edge
    let narrow = Mat4::from_scale(Vec3::new(0.99, 1.0, 1.0));
    for cube in game.cubes() {
        if cube.dead || !within_depth(player, cube.position, CUBE_PLAYER_DIST_AWAY) {
            continue;
        }
        let color = if cube.warning { colors::WARNING } else { cube.color };
        let index_count = if within_depth(player, cube.position, CUBE_PLAYER_CROSS_DIST_AWAY) {
            CUBE_CROSSED_INDEX_COUNT
        } else {
            CUBE_OUTLINE_INDEX_COUNT
        };
        renderer.draw_lines_by_indices(
            view * Mat4::from_translation(cube.position) * narrow,
            geometry.vertices,
            geometry.line_indices,
            index_count,
            color,
        );
    }
}

fn draw_hud(renderer: &mut dyn Renderer, game: &Game) {
    renderer.draw_text(
        text_at(-25.0, 26.0),
        colors::TEXT,
        0.008,
        &format!("Score: {}", game.score),
        TextAlign::Left,
    );

    if game.render_instruction {
        let marker_warned = game.cubes().first().is_some_and(|c| c.warning);
        let color = if marker_warned { colors::WARNING } else { colors::TEXT };
        renderer.draw_text(text_at(0.0, 14.0), color, 0.01, "Dodge!", TextAlign::Center);
    }
}

fn draw_lost_overlay(renderer: &mut dyn Renderer, choice: OverlayChoice, high_score: u32) {
    renderer.draw_text(
        text_at(-25.0, 22.0),
        colors::TEXT,
        0.008,
        &format!("High Score: {high_score}"),
        TextAlign::Left,
    );
    draw_overlay(renderer, choice, "Play Again");
}

fn draw_overlay(renderer: &mut dyn Renderer, choice: OverlayChoice, continue_label: &str) {
    renderer.draw_text(
        text_at(0.0, 5.0),
        highlight(choice == OverlayChoice::Continue, OVERLAY_DIMMED),
        0.01,
        continue_label,
        TextAlign::Center,
    );
    renderer.draw_text(
        text_at(0.0, -5.0),
        highlight(choice == OverlayChoice::Exit, OVERLAY_DIMMED),
        0.01,
        "Exit",
        TextAlign::Center,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Action, InputEvent};
    use crate::platform::HeadlessPlatform;
    use crate::renderer::RecordingRenderer;
    use crate::settings::Settings;
    use crate::sim::SimConfig;

    fn setup() -> (Session, RecordingRenderer, CubeGeometry) {
        let session = Session::new(
            SimConfig::classic(),
            Settings::default(),
            3,
            HeadlessPlatform::default(),
        );
        let mut renderer = RecordingRenderer::new(true);
        let geometry = CubeGeometry::upload(&mut renderer).unwrap();
        (session, renderer, geometry)
    }

    fn frame(session: &Session, renderer: &mut RecordingRenderer, geometry: &CubeGeometry) {
        draw_scene(renderer, session, geometry);
        renderer.submit_frame();
    }

    #[test]
    fn test_menu_highlights_play() {
        let (mut session, mut renderer, geometry) = setup();
        frame(&session, &mut renderer, &geometry);
        assert_eq!(renderer.texts(), vec!["Dodge Danger", "Play", "Quit"]);
        assert_eq!(renderer.text_color("Play"), Some(colors::TEXT));
        assert_eq!(renderer.text_color("Quit"), Some(MENU_DIMMED));

        session.handle_input(InputEvent::press(Action::ToggleSelection));
        frame(&session, &mut renderer, &geometry);
        assert_eq!(renderer.text_color("Quit"), Some(colors::TEXT));
    }

    #[test]
    fn test_game_frame_draws_walls_nearby_cubes_and_hud() {
        let (mut session, mut renderer, geometry) = setup();
        session.handle_input(InputEvent::press(Action::Confirm));
        frame(&session, &mut renderer, &geometry);

        let game = session.game().unwrap();
        let player = game.player_position;
        let visible = game
            .alive_cubes()
            .filter(|c| c.position.z >= player.z - CUBE_PLAYER_DIST_AWAY)
            .count();
        // Walls plus one draw per visible cube
        assert_eq!(renderer.line_draws().count(), visible + 1);
        assert!(visible < game.capacity());
        assert_eq!(renderer.texts(), vec!["Score: 0", "Dodge!"]);
    }

    #[test]
    fn test_far_cubes_skip_front_cross() {
        let (mut session, mut renderer, geometry) = setup();
        session.handle_input(InputEvent::press(Action::Confirm));
        frame(&session, &mut renderer, &geometry);

        let counts: Vec<u32> = renderer.line_draws().skip(1).map(|(_, n, _)| n).collect();
        assert!(counts.contains(&CUBE_CROSSED_INDEX_COUNT));
        assert!(counts.contains(&CUBE_OUTLINE_INDEX_COUNT));
    }

    #[test]
    fn test_warned_cube_drawn_yellow() {
        let (mut session, mut renderer, geometry) = setup();
        session.handle_input(InputEvent::press(Action::Confirm));
        session.game_mut().unwrap().cubes_mut()[0].warning = true;
        frame(&session, &mut renderer, &geometry);

        assert_eq!(renderer.text_color("Dodge!"), Some(colors::WARNING));
        assert!(renderer.line_draws().any(|(_, _, color)| color == colors::WARNING));
    }

    #[test]
    fn test_pause_overlay() {
        let (mut session, mut renderer, geometry) = setup();
        session.handle_input(InputEvent::press(Action::Confirm));
        session.handle_input(InputEvent::press(Action::Cancel));
        session.handle_input(InputEvent::press(Action::ToggleSelection));
        frame(&session, &mut renderer, &geometry);

        assert_eq!(renderer.text_color("Resume"), Some(OVERLAY_DIMMED));
        assert_eq!(renderer.text_color("Exit"), Some(colors::TEXT));
    }

    #[test]
    fn test_lost_overlay_shows_high_score() {
        let (mut session, mut renderer, geometry) = setup();
        session.handle_input(InputEvent::press(Action::Confirm));
        let game = session.game_mut().unwrap();
        game.player_lost = true;
        frame(&session, &mut renderer, &geometry);

        let texts = renderer.texts();
        assert!(texts.contains(&"High Score: 0"));
        assert!(texts.contains(&"Play Again"));
        assert_eq!(renderer.text_color("Play Again"), Some(colors::TEXT));
    }
}
