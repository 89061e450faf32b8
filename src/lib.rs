//! Magic Dash - A festive endless-runner arcade game
//!
//! Core modules:
//! - `sim`: Per-frame simulation (physics, spawning, collisions, game state)
//! - `session`: Menu / Playing / GameOver screens and the presentation contract
//! - `renderer`: Procedural scene composition and the WebGPU pipeline
//! - `platform`: Browser input mapping and LocalStorage access
//! - `highscores`, `settings`, `ui`: Presentation-layer state

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use highscores::HighScores;
pub use session::{Presenter, Screen, Session};
pub use settings::{QualityPreset, Settings};

/// Game configuration constants
///
/// All distances are in screen pixels of the fixed 800x450 viewport, all
/// rates are per rendered frame. The simulation has no delta-time scaling.
pub mod consts {
    /// Logical viewport size
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 450.0;

    /// Y coordinate of the road surface (screen space, y grows downward)
    pub const GROUND_Y: f32 = 380.0;

    /// Downward acceleration added to vertical velocity every frame
    pub const GRAVITY: f32 = 0.9;
    /// Vertical velocity applied on jump (negative = up)
    pub const JUMP_FORCE: f32 = -15.0;
    /// Frames a jump press stays buffered
    pub const JUMP_BUFFER_FRAMES: u32 = 6;

    /// Runner sprite box
    pub const RUNNER_X: f32 = 100.0;
    pub const RUNNER_WIDTH: f32 = 30.0;
    pub const RUNNER_HEIGHT: f32 = 50.0;

    /// World scroll speed at run start and its per-frame growth
    pub const BASE_SPEED: f32 = 6.0;
    pub const SPEED_INCREMENT: f32 = 0.001;
    /// Scenery scrolls slower than the road for parallax
    pub const SCENERY_PARALLAX: f32 = 0.5;

    /// Score earned per frame survived and per pickup
    pub const SCORE_PER_FRAME: u64 = 1;
    pub const COLLECT_BONUS: u64 = 50;
    /// Score span of one level
    pub const POINTS_PER_LEVEL: u64 = 1000;
    /// Live score is reported on frames divisible by this
    pub const SCORE_REPORT_INTERVAL: u64 = 10;

    /// Pool sizes
    pub const SNOW_POOL_SIZE: usize = 200;
    pub const STREAMER_COUNT: usize = 10;
    pub const MAX_PARTICLES: usize = 256;
}

/// Frame-count driven sine used by every cosmetic oscillator
#[inline]
pub fn wave(frame: u64, rate: f32, phase: f32) -> f32 {
    (frame as f32 * rate + phase).sin()
}
