//! Cosmetic effects: particles, snow, streamers and the sleigh flyby
//!
//! None of this feeds back into gameplay.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{
    CollectibleKind, Flyby, Particle, ParticleColor, SnowFlake, SnowTint, Streamer,
};
use super::theme::Theme;
use crate::consts::*;
use crate::wave;

/// Per-frame particle shrink factor
const PARTICLE_DECAY: f32 = 0.9;

/// Flyby cadence: it appears when `frame % PERIOD == PHASE`
const FLYBY_PERIOD: u64 = 1500;
const FLYBY_PHASE: u64 = 600;
const FLYBY_SPEED: f32 = 2.5;
const FLYBY_EXIT_X: f32 = -400.0;

/// Snow visible at a score never exceeds this by default
pub const DEFAULT_SNOW_CAP: usize = 150;

fn particle(pos: Vec2, vel: Vec2, size: f32, color: ParticleColor, life: u32) -> Particle {
    Particle {
        pos,
        vel,
        size,
        color,
        life,
        max_life: life,
    }
}

/// Puff of road dust when the runner takes off
pub fn dust_burst(rng: &mut impl Rng, feet: Vec2) -> Vec<Particle> {
    (0..5)
        .map(|_| {
            let vel = Vec2::new(rng.random_range(-2.0..2.0), rng.random_range(0.0..2.0));
            particle(feet, vel, 4.0, ParticleColor::Dust, 15)
        })
        .collect()
}

/// Burst of sparkles where a collectible was picked up
pub fn sparkle_burst(rng: &mut impl Rng, center: Vec2, kind: CollectibleKind) -> Vec<Particle> {
    let color = if kind == CollectibleKind::Star {
        ParticleColor::Gold
    } else {
        ParticleColor::Amber
    };
    (0..8)
        .map(|_| {
            let vel = Vec2::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0));
            particle(center, vel, 5.0, color, 20)
        })
        .collect()
}

/// Single trailing sparkle from somewhere inside the runner's box
pub fn aura_sparkle(rng: &mut impl Rng, origin: Vec2, size: Vec2) -> Particle {
    let pos = origin + Vec2::new(rng.random_range(0.0..size.x), rng.random_range(0.0..size.y));
    let vel = Vec2::new(rng.random_range(-3.0..-2.0), rng.random_range(-0.5..0.5));
    particle(pos, vel, 2.0, ParticleColor::Amber, 10)
}

/// Move, shrink and age particles; drop the dead ones
pub fn update_particles(particles: &mut Vec<Particle>) {
    for p in particles.iter_mut() {
        p.pos += p.vel;
        p.size *= PARTICLE_DECAY;
        p.life = p.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

/// Full weather pool scattered over the screen
pub fn snow_pool(rng: &mut impl Rng) -> Vec<SnowFlake> {
    (0..SNOW_POOL_SIZE)
        .map(|_| SnowFlake {
            pos: Vec2::new(
                rng.random_range(0.0..GAME_WIDTH),
                rng.random_range(0.0..GAME_HEIGHT),
            ),
            size: rng.random_range(1.0..4.0),
            speed: rng.random_range(1.0..3.0),
            swing: rng.random_range(0.0..TAU),
            tint: SnowTint::White,
        })
        .collect()
}

/// Fall, drift with the world, swing, and wrap around the screen
pub fn update_snow(
    snow: &mut [SnowFlake],
    rng: &mut impl Rng,
    world_speed: f32,
    frame: u64,
    theme: Theme,
) {
    for (i, flake) in snow.iter_mut().enumerate() {
        flake.pos.y += flake.speed;
        flake.pos.x -= world_speed * 0.1;
        flake.pos.x += wave(frame, 0.05, flake.swing) * 0.5;

        flake.tint = if theme == Theme::MerryMode {
            SnowTint::Hue(((i as u64 * 30 + frame) % 360) as f32)
        } else {
            SnowTint::White
        };

        if flake.pos.y > GAME_HEIGHT {
            flake.pos.y = -10.0;
            flake.pos.x = rng.random_range(0.0..GAME_WIDTH);
        }
        if flake.pos.x < 0.0 {
            flake.pos.x = GAME_WIDTH;
        }
    }
}

/// How many flakes to draw: more snow as the score climbs, up to `cap`
pub fn visible_snow(score: u64, cap: usize) -> usize {
    ((score / 50) as usize).min(cap).min(SNOW_POOL_SIZE)
}

pub fn streamers(rng: &mut impl Rng) -> Vec<Streamer> {
    (0..STREAMER_COUNT)
        .map(|_| Streamer {
            pos: Vec2::new(
                rng.random_range(0.0..GAME_WIDTH),
                rng.random_range(0.0..GAME_HEIGHT / 2.0),
            ),
            hue: rng.random_range(0.0..360.0),
            phase: rng.random_range(0.0..TAU),
        })
        .collect()
}

/// Launch the sleigh on its cadence and fly it across
pub fn update_flyby(flyby: &mut Flyby, rng: &mut impl Rng, frame: u64) {
    if !flyby.active && frame % FLYBY_PERIOD == FLYBY_PHASE {
        flyby.active = true;
        flyby.pos = Vec2::new(GAME_WIDTH + 200.0, 40.0 + rng.random_range(0.0..60.0));
        log::debug!("Sleigh flyby at frame {}", frame);
    }
    if flyby.active {
        flyby.pos.x -= FLYBY_SPEED;
        if flyby.pos.x < FLYBY_EXIT_X {
            flyby.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particles_shrink_and_expire() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut particles = dust_burst(&mut rng, Vec2::new(115.0, 380.0));
        assert_eq!(particles.len(), 5);

        update_particles(&mut particles);
        assert!((particles[0].size - 3.6).abs() < 1e-5);
        assert_eq!(particles[0].life, 14);

        for _ in 0..14 {
            update_particles(&mut particles);
        }
        assert!(particles.is_empty());
    }

    #[test]
    fn test_sparkle_color_by_kind() {
        let mut rng = Pcg32::seed_from_u64(2);
        let star = sparkle_burst(&mut rng, Vec2::ZERO, CollectibleKind::Star);
        let cane = sparkle_burst(&mut rng, Vec2::ZERO, CollectibleKind::CandyCane);
        assert_eq!(star.len(), 8);
        assert!(star.iter().all(|p| p.color == ParticleColor::Gold));
        assert!(cane.iter().all(|p| p.color == ParticleColor::Amber));
    }

    #[test]
    fn test_snow_wraps_instead_of_growing() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut snow = snow_pool(&mut rng);
        for frame in 0..2000 {
            update_snow(&mut snow, &mut rng, 8.0, frame, Theme::StreetMorning);
        }
        assert_eq!(snow.len(), SNOW_POOL_SIZE);
        for flake in &snow {
            assert!(flake.pos.y <= GAME_HEIGHT + 3.0);
            assert!(flake.pos.x >= -1.0 && flake.pos.x <= GAME_WIDTH + 1.0);
        }
    }

    #[test]
    fn test_snow_turns_to_confetti_in_merry_mode() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut snow = snow_pool(&mut rng);
        update_snow(&mut snow, &mut rng, 6.0, 10, Theme::MerryMode);
        assert_eq!(snow[0].tint, SnowTint::Hue(10.0));
        assert_eq!(snow[1].tint, SnowTint::Hue(40.0));

        update_snow(&mut snow, &mut rng, 6.0, 11, Theme::StreetNight);
        assert!(snow.iter().all(|f| f.tint == SnowTint::White));
    }

    #[test]
    fn test_visible_snow_scales_and_caps() {
        assert_eq!(visible_snow(0, DEFAULT_SNOW_CAP), 0);
        assert_eq!(visible_snow(500, DEFAULT_SNOW_CAP), 10);
        assert_eq!(visible_snow(1_000_000, DEFAULT_SNOW_CAP), DEFAULT_SNOW_CAP);
        assert_eq!(visible_snow(1_000_000, 10_000), SNOW_POOL_SIZE);
    }

    #[test]
    fn test_flyby_cycle() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut flyby = Flyby::default();
        update_flyby(&mut flyby, &mut rng, 599);
        assert!(!flyby.active);

        update_flyby(&mut flyby, &mut rng, 600);
        assert!(flyby.active);
        assert!(flyby.pos.y >= 40.0 && flyby.pos.y < 100.0);

        let mut frame = 601;
        while flyby.active {
            update_flyby(&mut flyby, &mut rng, frame);
            frame += 1;
        }
        // (1000 + 400) / 2.5 frames to cross
        assert!(frame - 600 >= 560);
        assert!(flyby.pos.x < FLYBY_EXIT_X);
    }
}
