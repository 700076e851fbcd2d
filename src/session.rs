//! Session state and the menu/play/pause/lost state machine
//!
//! The session exclusively owns the current game (if any). Input and window
//! handlers mutate it in place; the fixed-timestep clock drives the simulation.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::{Action, InputEvent};
use crate::persistence::{KeyValueStore, PersistenceError};
use crate::platform::{HeadlessPlatform, Platform, WindowEvent};
use crate::player_cube_diagonal_sum_distance;
use crate::settings::Settings;
use crate::sim::{Game, GameSeries, OverlayChoice, SimClock, SimConfig, generate_level, tick};

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// No active game
    Menu,
    Playing,
    Paused,
    Lost,
}

pub struct Session<P: Platform = HeadlessPlatform> {
    config: SimConfig,
    series: Option<GameSeries>,
    rng: Pcg32,
    clock: SimClock,
    /// Player diagonal plus cube diagonal
    collision_distance: f32,
    settings: Settings,
    /// Main menu highlight: Play (true) or Quit (false)
    play_option_selected: bool,
    needs_to_draw_scene: bool,
    quit_requested: bool,
    platform: P,
}

impl<P: Platform> Session<P> {
    /// Start on the main menu with Play highlighted
    pub fn new(config: SimConfig, settings: Settings, seed: u64, platform: P) -> Self {
        if let Err(e) = config.validate() {
            log::warn!("Simulation config: {e}");
        }
        log::info!(
            "Session started (seed {seed}, {} cubes, high score {})",
            config.capacity,
            settings.high_score
        );
        Self {
            config,
            series: None,
            rng: Pcg32::seed_from_u64(seed),
            clock: SimClock::default(),
            collision_distance: player_cube_diagonal_sum_distance(),
            settings,
            play_option_selected: true,
            needs_to_draw_scene: true,
            quit_requested: false,
            platform,
        }
    }

    pub fn screen(&self) -> Screen {
        match &self.series {
            None => Screen::Menu,
            Some(series) if series.game.player_lost => Screen::Lost,
            Some(series) if series.game.paused => Screen::Paused,
            Some(_) => Screen::Playing,
        }
    }

    pub fn game(&self) -> Option<&Game> {
        self.series.as_ref().map(|s| &s.game)
    }

    pub fn game_mut(&mut self) -> Option<&mut Game> {
        self.series.as_mut().map(|s| &mut s.game)
    }

    pub fn games_played(&self) -> u32 {
        self.series.as_ref().map_or(0, |s| s.games_played)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn high_score(&self) -> u32 {
        self.settings.high_score
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn play_option_selected(&self) -> bool {
        self.play_option_selected
    }

    pub fn needs_to_draw_scene(&self) -> bool {
        self.needs_to_draw_scene
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Run the simulation ticks owed at wall-clock time `now`
    pub fn update(&mut self, now: Duration) -> u32 {
        let mut clock = std::mem::take(&mut self.clock);
        let ticks = clock.advance(now, |dt| self.step(dt));
        self.clock = clock;
        ticks
    }

    /// One fixed simulation step; no-op on the menu
    pub fn step(&mut self, dt: f32) {
        let Some(series) = self.series.as_mut() else {
            return;
        };
        let outcome = tick(
            &mut series.game,
            &self.config,
            self.collision_distance,
            dt,
            &mut self.rng,
        );

        if outcome.lost {
            series.games_played += 1;
            let score = series.game.score;
            if score > self.settings.high_score {
                self.settings.high_score = score;
            }
            log::info!(
                "Game over: score {score}, high score {}, games played {}",
                self.settings.high_score,
                series.games_played
            );
            self.platform.set_allows_screen_idling(true);
        }
    }

    /// Feed a semantic input event through the state machine
    pub fn handle_input(&mut self, event: InputEvent) {
        if !event.pressed {
            if let Some(game) = self.game_mut() {
                match event.action {
                    Action::MoveLeft => game.moving_left = false,
                    Action::MoveRight => game.moving_right = false,
                    _ => {}
                }
            }
            return;
        }

        let screen = self.screen();
        log::debug!("{:?} on {:?}", event.action, screen);
        match (screen, event.action) {
            (Screen::Menu, Action::ToggleSelection) => {
                self.play_option_selected = !self.play_option_selected;
            }
            (Screen::Menu, Action::Confirm | Action::Start) => {
                if self.play_option_selected {
                    self.new_game();
                } else {
                    log::info!("Quit selected");
                    self.quit_requested = true;
                }
            }

            (Screen::Playing, Action::Cancel | Action::Start) => self.pause(),
            (Screen::Playing, Action::MoveLeft) => {
                if let Some(game) = self.game_mut() {
                    game.moving_left = true;
                }
            }
            (Screen::Playing, Action::MoveRight) => {
                if let Some(game) = self.game_mut() {
                    game.moving_right = true;
                }
            }

            (Screen::Paused, Action::Cancel) => self.resume(),
            (Screen::Paused | Screen::Lost, Action::ToggleSelection) => {
                if let Some(game) = self.game_mut() {
                    game.overlay_choice = game.overlay_choice.toggled();
                }
            }
            (Screen::Paused, Action::Confirm | Action::Start) => match self.overlay_choice() {
                OverlayChoice::Continue => self.resume(),
                OverlayChoice::Exit => self.destroy_game(),
            },

            (Screen::Lost, Action::Cancel) => self.destroy_game(),
            (Screen::Lost, Action::Confirm | Action::Start) => match self.overlay_choice() {
                OverlayChoice::Continue => self.new_game(),
                OverlayChoice::Exit => self.destroy_game(),
            },

            _ => {}
        }
    }

    /// React to window/platform events
    pub fn handle_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Resized { width, height } => {
                self.settings.window_width = width;
                self.settings.window_height = height;
            }
            WindowEvent::FocusGained => {}
            WindowEvent::FocusLost => {
                if self.screen() == Screen::Playing {
                    log::debug!("Focus lost, pausing");
                    self.pause();
                }
            }
            WindowEvent::Shown => self.needs_to_draw_scene = true,
            WindowEvent::Hidden => self.needs_to_draw_scene = false,
            WindowEvent::DeviceConnected => self.platform.poll_new_gamepads(),
        }
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.settings.fullscreen = fullscreen;
    }

    /// Persist settings and release the session
    pub fn shutdown(self, store: &mut dyn KeyValueStore) -> Result<(), PersistenceError> {
        log::info!(
            "Shutting down (high score {}, games played {})",
            self.settings.high_score,
            self.games_played()
        );
        self.settings.save(store)
    }

    fn overlay_choice(&self) -> OverlayChoice {
        self.game().map(|g| g.overlay_choice).unwrap_or_default()
    }

    /// Fresh run; keeps the series (and its count) when playing again
    fn new_game(&mut self) {
        let mut game = Game::new(self.config.capacity);
        generate_level(&mut game, 1, &self.config, &mut self.rng);
        match self.series.as_mut() {
            Some(series) => series.restart(game),
            None => self.series = Some(GameSeries::new(game)),
        }
        log::info!("New game (games played {})", self.games_played());
        self.platform.set_allows_screen_idling(false);
    }

    fn destroy_game(&mut self) {
        self.series = None;
        log::debug!("Back to menu");
        self.platform.set_allows_screen_idling(true);
    }

    fn pause(&mut self) {
        if let Some(game) = self.game_mut() {
            game.paused = true;
        }
        self.platform.set_allows_screen_idling(true);
    }

    fn resume(&mut self) {
        if let Some(game) = self.game_mut() {
            game.paused = false;
        }
        self.platform.set_allows_screen_idling(false);
    }
}
