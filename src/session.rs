//! Screen flow and the presentation contract
//!
//! The session owns the current run and forwards simulation events to a
//! [`Presenter`]. Ticking only happens on the Playing screen; entering it
//! always starts from a fresh [`GameState`].

use crate::renderer::scene::{self, Frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Theme, tick};

/// Which screen the game is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
}

/// Receives what the core reports to the page
pub trait Presenter {
    /// Live score, at most every tenth frame
    fn report_score(&mut self, score: u64);
    /// Once per theme transition
    fn report_theme_changed(&mut self, theme: Theme);
    /// Once per run
    fn report_game_over(&mut self, final_score: u64);
    /// Once per pickup
    fn report_collect(&mut self) {}
    /// Once per jump impulse
    fn report_jump(&mut self) {}
    /// A level signpost was put on the street
    fn report_level(&mut self, _level: u32) {}
}

/// Game session: current screen, player, and run state
#[derive(Debug)]
pub struct Session {
    screen: Screen,
    player_name: String,
    state: GameState,
    settings: Settings,
    /// Last score reported, to keep reports non-decreasing
    last_reported_score: u64,
    /// Events waiting for the next `advance`
    pending: Vec<GameEvent>,
}

impl Session {
    pub fn new(seed: u64, settings: Settings) -> Self {
        Self {
            screen: Screen::Menu,
            player_name: String::new(),
            state: GameState::new(seed),
            settings,
            last_reported_score: 0,
            pending: Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Begin a new run from scratch
    pub fn start(&mut self, player_name: &str, seed: u64) {
        self.player_name = player_name.to_string();
        self.state = GameState::new(seed);
        self.screen = Screen::Playing;
        self.last_reported_score = 0;
        // The page resets its HUD to the new run
        self.pending.clear();
        self.pending.push(GameEvent::Score(0));
        self.pending.push(GameEvent::ThemeChanged(self.state.theme));
        log::info!("Run started for {} (seed {})", self.player_name, seed);
    }

    /// Leave the game-over screen (or abandon a run) for the menu
    pub fn return_to_menu(&mut self) {
        self.screen = Screen::Menu;
        self.pending.clear();
    }

    pub fn jump_pressed(&mut self) {
        if self.screen == Screen::Playing {
            self.state.input.on_jump_pressed();
        }
    }

    pub fn jump_released(&mut self) {
        self.state.input.on_jump_released();
    }

    /// Run one display frame.
    ///
    /// Updates the run, reports its events, and composes the frame to draw.
    /// Returns `None` when nothing should be drawn: not playing, or the run
    /// ended during this update.
    pub fn advance<P: Presenter>(&mut self, presenter: &mut P) -> Option<Frame> {
        if self.screen != Screen::Playing {
            return None;
        }

        tick(&mut self.state);
        self.pending.extend(self.state.drain_events());
        self.dispatch(presenter);

        if self.state.is_over() {
            self.screen = Screen::GameOver;
            return None;
        }

        Some(scene::compose(&mut self.state, &self.settings))
    }

    fn dispatch<P: Presenter>(&mut self, presenter: &mut P) {
        for event in self.pending.drain(..) {
            match event {
                GameEvent::Score(score) => {
                    if score == 0 || score >= self.last_reported_score {
                        self.last_reported_score = score;
                        presenter.report_score(score);
                    }
                }
                GameEvent::ThemeChanged(theme) => presenter.report_theme_changed(theme),
                GameEvent::Jumped => presenter.report_jump(),
                GameEvent::Collected(_) => presenter.report_collect(),
                GameEvent::LevelReached(level) => {
                    log::info!("Level {} reached", level);
                    presenter.report_level(level);
                }
                GameEvent::GameOver { final_score } => {
                    log::info!("{} scored {}", self.player_name, final_score);
                    presenter.report_game_over(final_score);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::{Obstacle, ObstacleKind};
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        scores: Vec<u64>,
        themes: Vec<Theme>,
        game_overs: Vec<u64>,
        collects: u32,
        jumps: u32,
        levels: Vec<u32>,
    }

    impl Presenter for Recorder {
        fn report_score(&mut self, score: u64) {
            self.scores.push(score);
        }
        fn report_theme_changed(&mut self, theme: Theme) {
            self.themes.push(theme);
        }
        fn report_game_over(&mut self, final_score: u64) {
            self.game_overs.push(final_score);
        }
        fn report_collect(&mut self) {
            self.collects += 1;
        }
        fn report_jump(&mut self) {
            self.jumps += 1;
        }
        fn report_level(&mut self, level: u32) {
            self.levels.push(level);
        }
    }

    fn wall() -> Obstacle {
        Obstacle {
            kind: ObstacleKind::Car,
            pos: Vec2::new(RUNNER_X, GROUND_Y - 35.0),
            size: Vec2::new(90.0, 35.0),
            paint: 0,
            passed: false,
        }
    }

    #[test]
    fn test_menu_does_not_tick() {
        let mut session = Session::new(1, Settings::default());
        let mut recorder = Recorder::default();
        assert_eq!(session.screen(), Screen::Menu);
        assert!(session.advance(&mut recorder).is_none());
        assert_eq!(session.state().frame, 0);
        assert!(recorder.scores.is_empty());
    }

    #[test]
    fn test_start_reports_reset() {
        let mut session = Session::new(1, Settings::default());
        let mut recorder = Recorder::default();
        session.start("Lily", 99);
        assert_eq!(session.player_name(), "Lily");

        let frame = session.advance(&mut recorder);
        assert!(frame.is_some());
        assert_eq!(recorder.scores, vec![0, 1]);
        assert_eq!(recorder.themes, vec![Theme::StreetMorning]);
    }

    #[test]
    fn test_game_over_reported_once_and_not_rendered() {
        let mut session = Session::new(1, Settings::default());
        let mut recorder = Recorder::default();
        session.start("Theo", 5);
        session.state.obstacles.push(wall());

        assert!(session.advance(&mut recorder).is_none());
        assert_eq!(session.screen(), Screen::GameOver);
        assert_eq!(recorder.game_overs, vec![0]);

        // Further frames are ignored
        for _ in 0..10 {
            assert!(session.advance(&mut recorder).is_none());
        }
        assert_eq!(recorder.game_overs.len(), 1);
    }

    #[test]
    fn test_restart_fully_resets() {
        let mut session = Session::new(1, Settings::default());
        let mut recorder = Recorder::default();
        session.start("Theo", 5);
        for _ in 0..500 {
            session.jump_pressed();
            session.advance(&mut recorder);
            session.jump_released();
            if session.screen() != Screen::Playing {
                break;
            }
        }
        session.state.score = 3500;
        session.state.theme = Theme::MerryMode;

        session.start("Theo", 6);
        let state = session.state();
        assert_eq!(session.screen(), Screen::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, BASE_SPEED);
        assert_eq!(state.frame, 0);
        assert_eq!(state.theme, Theme::StreetMorning);
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.next_level_sign, 1);
        assert_eq!(state.scenery[0].pos.x, 0.0);
        assert!(!state.input.held);
    }

    #[test]
    fn test_jump_reaches_presenter() {
        let mut session = Session::new(1, Settings::default());
        let mut recorder = Recorder::default();
        session.start("Lily", 8);
        session.jump_pressed();
        session.advance(&mut recorder);
        session.jump_released();
        assert_eq!(recorder.jumps, 1);
    }

    #[test]
    fn test_jump_ignored_on_menu() {
        let mut session = Session::new(1, Settings::default());
        session.jump_pressed();
        assert!(!session.state().input.held);
    }

    #[test]
    fn test_return_to_menu() {
        let mut session = Session::new(1, Settings::default());
        let mut recorder = Recorder::default();
        session.start("Lily", 8);
        session.return_to_menu();
        assert_eq!(session.screen(), Screen::Menu);
        assert!(session.advance(&mut recorder).is_none());
        assert!(recorder.scores.is_empty());
    }

    #[test]
    fn test_level_signpost_reaches_presenter() {
        let mut session = Session::new(1, Settings::default());
        let mut recorder = Recorder::default();
        session.start("Theo", 12);
        session.state.score = POINTS_PER_LEVEL;

        for _ in 0..600 {
            session.state.obstacles.clear();
            session.advance(&mut recorder);
            if !recorder.levels.is_empty() {
                break;
            }
        }
        assert_eq!(recorder.levels, vec![2]);
    }
}
