//! Per-frame simulation module
//!
//! All gameplay logic lives here:
//! - Fixed per-frame step, no delta time
//! - Seeded RNG per run
//! - No rendering or platform dependencies

pub mod ambient;
pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod theme;
pub mod tick;

pub use collision::{Insets, Rect, collectible_hitbox, obstacle_hitbox, runner_hitbox};
pub use input::JumpInput;
pub use state::{
    Collectible, CollectibleKind, Flyby, GameEvent, GameState, Obstacle, ObstacleKind, Particle,
    ParticleColor, RunPhase, Runner, Scenery, SceneryKind, SnowFlake, SnowTint, Stance, Streamer,
};
pub use theme::Theme;
pub use tick::tick;
