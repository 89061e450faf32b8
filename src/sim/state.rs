//! Game state and core simulation types
//!
//! Everything that changes between frames lives in [`GameState`]. A run is
//! started by building a fresh state, so nothing leaks from the previous run.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::input::JumpInput;
use super::theme::Theme;
use super::{ambient, spawn};
use crate::consts::*;

/// Whether the current run is still going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    /// Terminal: a collision ended the run
    Over,
}

/// Runner contact with the road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Grounded,
    Airborne,
}

/// The player-controlled gingerbread runner
#[derive(Debug, Clone)]
pub struct Runner {
    /// Top-left of the sprite box
    pub pos: Vec2,
    pub size: Vec2,
    /// Vertical velocity (pixels/frame, positive = down)
    pub vel_y: f32,
    pub stance: Stance,
    /// Cosmetic spin while airborne (radians)
    pub rotation: f32,
    /// Cosmetic leg swing (radians)
    pub limb_swing: f32,
}

impl Default for Runner {
    fn default() -> Self {
        Self {
            pos: Vec2::new(RUNNER_X, GROUND_Y - RUNNER_HEIGHT),
            size: Vec2::new(RUNNER_WIDTH, RUNNER_HEIGHT),
            vel_y: 0.0,
            stance: Stance::Grounded,
            rotation: 0.0,
            limb_swing: 0.0,
        }
    }
}

impl Runner {
    pub fn sprite(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Feet touching (or below) the road
    pub fn on_ground(&self) -> bool {
        self.pos.y + self.size.y >= GROUND_Y
    }

    /// Bottom-center, where jump dust comes from
    pub fn feet(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x / 2.0, self.pos.y + self.size.y)
    }
}

/// Street furniture the runner must jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Cone,
    Bin,
    Postbox,
    Barrier,
    Fence,
    Car,
}

/// A collidable obstacle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Index into the car paint palette (only meaningful for cars)
    pub paint: u8,
    /// Set once the runner has cleared it. Not read by gameplay.
    pub passed: bool,
}

impl Obstacle {
    pub fn sprite(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Bonus pickups, most common first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectibleKind {
    CandyCane,
    Present,
    Star,
}

/// A floating bonus item
#[derive(Debug, Clone)]
pub struct Collectible {
    pub kind: CollectibleKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Resting height the item bobs around
    pub base_y: f32,
    /// Per-item phase so neighbours don't bob in sync
    pub float_phase: f32,
    pub collected: bool,
}

impl Collectible {
    pub fn sprite(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Palette slot for a particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleColor {
    Dust,
    Gold,
    Amber,
}

/// A particle for visual effects
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Edge length of the square, shrinks every frame
    pub size: f32,
    pub color: ParticleColor,
    /// Frames remaining
    pub life: u32,
    pub max_life: u32,
}

/// Decorative scenery behind the road
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneryKind {
    House,
    Shop,
    Tree,
    MarketStall,
    Snowman,
    Lamp,
    GingerbreadHouse,
    /// Marks the start of a new level
    LevelSign { level: u32 },
}

/// A background object. `pos.y` is the ground line it stands on.
#[derive(Debug, Clone)]
pub struct Scenery {
    pub kind: SceneryKind,
    pub pos: Vec2,
    pub size: Vec2,
    /// Style variant (wall color etc.), 0..5
    pub variant: u8,
}

impl Scenery {
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}

/// Snow color, re-derived from the theme every frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnowTint {
    White,
    /// Confetti hue in degrees
    Hue(f32),
}

/// One flake of the recycled weather pool
#[derive(Debug, Clone)]
pub struct SnowFlake {
    pub pos: Vec2,
    pub size: f32,
    /// Fall speed (pixels/frame)
    pub speed: f32,
    /// Horizontal swing phase
    pub swing: f32,
    pub tint: SnowTint,
}

/// Party streamer drawn in party themes
#[derive(Debug, Clone)]
pub struct Streamer {
    pub pos: Vec2,
    pub hue: f32,
    pub phase: f32,
}

/// The occasional sleigh crossing the sky
#[derive(Debug, Clone, Default)]
pub struct Flyby {
    pub active: bool,
    pub pos: Vec2,
}

/// Things the presentation layer hears about
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Throttled live score
    Score(u64),
    ThemeChanged(Theme),
    Jumped,
    Collected(CollectibleKind),
    /// A level signpost was queued
    LevelReached(u32),
    /// Terminal, raised once per run
    GameOver { final_score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: RunPhase,
    /// Frames simulated this run
    pub frame: u64,
    pub score: u64,
    /// Current world scroll speed (pixels/frame)
    pub speed: f32,
    /// Sum of per-frame speeds
    pub distance: f32,
    /// Theme as of the last score update
    pub theme: Theme,
    pub input: JumpInput,
    pub runner: Runner,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Ordered left to right; appended at the back, expired from the front
    pub scenery: VecDeque<Scenery>,
    /// Fixed-size pool, never reallocated
    pub snow: Vec<SnowFlake>,
    pub streamers: Vec<Streamer>,
    pub flyby: Flyby,
    /// Frames until the next obstacle
    pub obstacle_timer: f32,
    /// Frames until the next collectible
    pub collectible_timer: f32,
    /// Next level boundary (in thousands of points) to mark with a signpost
    pub next_level_sign: u32,
    /// Pending notifications, drained by the session each frame
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh run with the given seed
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let snow = ambient::snow_pool(&mut rng);
        let streamers = ambient::streamers(&mut rng);
        let scenery = spawn::fill_street(&mut rng);

        Self {
            seed,
            rng,
            phase: RunPhase::Running,
            frame: 0,
            score: 0,
            speed: BASE_SPEED,
            distance: 0.0,
            theme: Theme::StreetMorning,
            input: JumpInput::default(),
            runner: Runner::default(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            particles: Vec::new(),
            scenery,
            snow,
            streamers,
            flyby: Flyby::default(),
            obstacle_timer: 0.0,
            collectible_timer: 0.0,
            next_level_sign: 1,
            events: Vec::new(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == RunPhase::Over
    }

    /// Add particles, dropping any that would exceed the cap
    pub fn emit_particles(&mut self, particles: impl IntoIterator<Item = Particle>) {
        let room = MAX_PARTICLES.saturating_sub(self.particles.len());
        self.particles.extend(particles.into_iter().take(room));
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_run_defaults() {
        let state = GameState::new(42);
        assert_eq!(state.phase, RunPhase::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.speed, BASE_SPEED);
        assert_eq!(state.theme, Theme::StreetMorning);
        assert!(state.runner.on_ground());
        assert_eq!(state.runner.stance, Stance::Grounded);
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.snow.len(), SNOW_POOL_SIZE);
        assert_eq!(state.streamers.len(), STREAMER_COUNT);
        assert!(!state.scenery.is_empty());
    }

    #[test]
    fn test_particle_cap() {
        let mut state = GameState::new(1);
        let particle = Particle {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: 1.0,
            color: ParticleColor::Dust,
            life: 5,
            max_life: 5,
        };
        state.emit_particles(std::iter::repeat_n(particle, MAX_PARTICLES + 40));
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn test_same_seed_same_street() {
        let a = GameState::new(7);
        let b = GameState::new(7);
        let xs = |s: &GameState| s.scenery.iter().map(|o| o.pos.x).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(3);
        state.events.push(GameEvent::Jumped);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
        assert!(state.events.is_empty());
    }
}
