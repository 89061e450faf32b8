//! Procedural generation of obstacles, collectibles and scenery
//!
//! Kinds are picked by a single uniform roll against fixed cumulative weights.

use std::collections::VecDeque;
use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{
    Collectible, CollectibleKind, GameEvent, GameState, Obstacle, ObstacleKind, Scenery,
    SceneryKind,
};
use crate::consts::*;

/// Shortest gap between obstacles (frames)
pub const MIN_OBSTACLE_DELAY: f32 = 25.0;
/// Number of car paint colors to choose from
pub const CAR_PAINTS: u8 = 6;

/// Scenery is appended once the last object is this close to the right edge
const SCENERY_LOOKAHEAD: f32 = GAME_WIDTH + 50.0;
/// Scenery is dropped once fully this far past the left edge
const SCENERY_CULL_X: f32 = -100.0;

impl ObstacleKind {
    /// Cone 20%, bin 20%, postbox 15%, barrier 20%, fence 15%, car 10%
    pub fn from_roll(roll: f32) -> Self {
        match roll {
            r if r < 0.20 => ObstacleKind::Cone,
            r if r < 0.40 => ObstacleKind::Bin,
            r if r < 0.55 => ObstacleKind::Postbox,
            r if r < 0.75 => ObstacleKind::Barrier,
            r if r < 0.90 => ObstacleKind::Fence,
            _ => ObstacleKind::Car,
        }
    }

    pub fn size(self) -> Vec2 {
        match self {
            ObstacleKind::Cone => Vec2::new(25.0, 25.0),
            ObstacleKind::Bin => Vec2::new(35.0, 50.0),
            ObstacleKind::Postbox => Vec2::new(25.0, 55.0),
            ObstacleKind::Barrier => Vec2::new(60.0, 30.0),
            ObstacleKind::Fence => Vec2::new(30.0, 40.0),
            ObstacleKind::Car => Vec2::new(90.0, 35.0),
        }
    }
}

impl CollectibleKind {
    /// Cane 50%, present 30%, star 20%
    pub fn from_roll(roll: f32) -> Self {
        match roll {
            r if r < 0.5 => CollectibleKind::CandyCane,
            r if r < 0.8 => CollectibleKind::Present,
            _ => CollectibleKind::Star,
        }
    }
}

/// Frames until the next obstacle: shorter as the world speeds up
pub fn obstacle_delay(speed: f32, jitter: f32) -> f32 {
    (40.0 + jitter - speed * 1.5).max(MIN_OBSTACLE_DELAY)
}

/// A new obstacle standing on the road just past the right edge
pub fn generate_obstacle(rng: &mut impl Rng) -> Obstacle {
    let kind = ObstacleKind::from_roll(rng.random());
    let size = kind.size();
    let paint = if kind == ObstacleKind::Car {
        rng.random_range(0..CAR_PAINTS)
    } else {
        0
    };
    let x = GAME_WIDTH + 100.0 + rng.random_range(0.0..300.0);

    Obstacle {
        kind,
        pos: Vec2::new(x, GROUND_Y - size.y),
        size,
        paint,
        passed: false,
    }
}

/// A new collectible floating somewhere above the road
pub fn generate_collectible(rng: &mut impl Rng) -> Collectible {
    let y = GROUND_Y - 80.0 - rng.random_range(0.0..60.0);
    let kind = CollectibleKind::from_roll(rng.random());
    let x = GAME_WIDTH + 50.0 + rng.random_range(0.0..200.0);

    Collectible {
        kind,
        pos: Vec2::new(x, y),
        size: Vec2::splat(30.0),
        base_y: y,
        float_phase: rng.random_range(0.0..TAU),
        collected: false,
    }
}

/// Frames until the next collectible (not speed dependent)
pub fn collectible_delay(rng: &mut impl Rng) -> f32 {
    80.0 + rng.random_range(0.0..150.0)
}

/// A random decoration with its kind-specific footprint
fn random_scenery(rng: &mut impl Rng, x: f32) -> Scenery {
    let roll: f32 = rng.random();
    let (kind, size) = match roll {
        r if r < 0.45 => (
            SceneryKind::House,
            Vec2::new(80.0, 100.0 + rng.random_range(0.0..50.0)),
        ),
        r if r < 0.55 => (
            SceneryKind::Shop,
            Vec2::new(100.0, 80.0 + rng.random_range(0.0..30.0)),
        ),
        r if r < 0.60 => (SceneryKind::GingerbreadHouse, Vec2::new(90.0, 90.0)),
        r if r < 0.70 => (SceneryKind::MarketStall, Vec2::new(70.0, 60.0)),
        r if r < 0.85 => (
            SceneryKind::Tree,
            Vec2::new(60.0, 120.0 + rng.random_range(0.0..40.0)),
        ),
        r if r < 0.95 => (SceneryKind::Snowman, Vec2::new(40.0, 50.0)),
        _ => (SceneryKind::Lamp, Vec2::new(10.0, 120.0)),
    };

    Scenery {
        kind,
        pos: Vec2::new(x, GROUND_Y),
        size,
        variant: rng.random_range(0..5),
    }
}

/// Signpost announcing `level`
pub fn level_sign(x: f32, level: u32) -> Scenery {
    Scenery {
        kind: SceneryKind::LevelSign { level },
        pos: Vec2::new(x, GROUND_Y),
        size: Vec2::new(40.0, 80.0),
        variant: 0,
    }
}

/// Append a random decoration a short random gap after the current tail
/// (or at `fallback_x` when the street is empty)
pub fn append_scenery(scenery: &mut VecDeque<Scenery>, rng: &mut impl Rng, fallback_x: f32) {
    let x = match scenery.back() {
        Some(tail) => tail.right() + 20.0 + rng.random_range(0.0..50.0),
        None => fallback_x,
    };
    scenery.push_back(random_scenery(rng, x));
}

/// Scenery covering the visible street at run start
pub fn fill_street(rng: &mut impl Rng) -> VecDeque<Scenery> {
    let mut scenery = VecDeque::new();
    let mut offset = 0.0;
    while offset < GAME_WIDTH + 200.0 {
        append_scenery(&mut scenery, rng, offset);
        offset += 100.0;
    }
    scenery
}

/// Scroll scenery, drop what left the screen, and top up the right edge.
///
/// Once the score crosses the next multiple of 1000 the next slot is a
/// signpost for the new level instead of a random decoration.
pub fn update_scenery(state: &mut GameState) {
    let shift = state.speed * SCENERY_PARALLAX;
    for obj in state.scenery.iter_mut() {
        obj.pos.x -= shift;
    }
    // Objects are ordered left to right, so expired ones are at the front
    while state
        .scenery
        .front()
        .is_some_and(|obj| obj.right() < SCENERY_CULL_X)
    {
        state.scenery.pop_front();
    }

    let tail_near_edge = match state.scenery.back() {
        Some(tail) => tail.pos.x < SCENERY_LOOKAHEAD,
        None => true,
    };
    if !tail_near_edge {
        return;
    }

    let next_level_score = u64::from(state.next_level_sign) * POINTS_PER_LEVEL;
    if state.score >= next_level_score {
        let level = state.next_level_sign + 1;
        state.scenery.push_back(level_sign(GAME_WIDTH + 150.0, level));
        state.next_level_sign += 1;
        state.events.push(GameEvent::LevelReached(level));
        log::debug!("Level {} signpost queued at score {}", level, state.score);
    } else {
        append_scenery(&mut state.scenery, &mut state.rng, GAME_WIDTH + 100.0);
    }
}

/// Count down both spawn timers and spawn what is due
pub fn update_spawners(state: &mut GameState) {
    state.obstacle_timer -= 1.0;
    if state.obstacle_timer <= 0.0 {
        let jitter = state.rng.random_range(0.0..50.0);
        state.obstacle_timer = obstacle_delay(state.speed, jitter);
        let obstacle = generate_obstacle(&mut state.rng);
        log::debug!("Spawned {:?} at x={:.0}", obstacle.kind, obstacle.pos.x);
        state.obstacles.push(obstacle);
    }

    state.collectible_timer -= 1.0;
    if state.collectible_timer <= 0.0 {
        let collectible = generate_collectible(&mut state.rng);
        state.collectibles.push(collectible);
        state.collectible_timer = collectible_delay(&mut state.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_obstacle_catalogue_weights() {
        assert_eq!(ObstacleKind::from_roll(0.0), ObstacleKind::Cone);
        assert_eq!(ObstacleKind::from_roll(0.19), ObstacleKind::Cone);
        assert_eq!(ObstacleKind::from_roll(0.2), ObstacleKind::Bin);
        assert_eq!(ObstacleKind::from_roll(0.5), ObstacleKind::Postbox);
        assert_eq!(ObstacleKind::from_roll(0.6), ObstacleKind::Barrier);
        assert_eq!(ObstacleKind::from_roll(0.8), ObstacleKind::Fence);
        assert_eq!(ObstacleKind::from_roll(0.95), ObstacleKind::Car);
    }

    #[test]
    fn test_collectible_catalogue_weights() {
        assert_eq!(CollectibleKind::from_roll(0.1), CollectibleKind::CandyCane);
        assert_eq!(CollectibleKind::from_roll(0.5), CollectibleKind::Present);
        assert_eq!(CollectibleKind::from_roll(0.79), CollectibleKind::Present);
        assert_eq!(CollectibleKind::from_roll(0.8), CollectibleKind::Star);
    }

    #[test]
    fn test_obstacle_delay_shrinks_with_speed_and_floors() {
        let slow = obstacle_delay(6.0, 25.0);
        let fast = obstacle_delay(12.0, 25.0);
        assert!(fast < slow);
        assert_eq!(obstacle_delay(100.0, 49.0), MIN_OBSTACLE_DELAY);
    }

    #[test]
    fn test_generated_obstacles_stand_on_ground_offscreen() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let obstacle = generate_obstacle(&mut rng);
            assert_eq!(obstacle.pos.y + obstacle.size.y, GROUND_Y);
            assert!(obstacle.pos.x >= GAME_WIDTH + 100.0);
            assert!(obstacle.pos.x < GAME_WIDTH + 400.0);
            assert!(obstacle.paint < CAR_PAINTS);
            assert!(!obstacle.passed);
        }
    }

    #[test]
    fn test_generated_collectibles_float_in_band() {
        let mut rng = Pcg32::seed_from_u64(12);
        for _ in 0..200 {
            let c = generate_collectible(&mut rng);
            assert!(c.base_y <= GROUND_Y - 80.0 && c.base_y > GROUND_Y - 140.0);
            assert_eq!(c.pos.y, c.base_y);
            assert!(!c.collected);
        }
    }

    #[test]
    fn test_fill_street_is_append_ordered() {
        let mut rng = Pcg32::seed_from_u64(5);
        let street = fill_street(&mut rng);
        assert_eq!(street.len(), 10);
        assert_eq!(street[0].pos.x, 0.0);
        for pair in street.iter().collect::<Vec<_>>().windows(2) {
            let gap = pair[1].pos.x - pair[0].right();
            assert!((20.0..70.0).contains(&gap), "gap {gap}");
        }
    }

    #[test]
    fn test_level_sign_forced_after_threshold() {
        let mut state = GameState::new(9);
        state.scenery.clear();
        state.scenery.push_back(level_sign(GAME_WIDTH - 10.0, 1));
        state.score = 1000;

        update_scenery(&mut state);

        let tail = state.scenery.back().unwrap();
        assert_eq!(tail.kind, SceneryKind::LevelSign { level: 2 });
        assert_eq!(state.next_level_sign, 2);
        assert!(state.events.contains(&GameEvent::LevelReached(2)));

        // Same score again once the sign nears the edge: back to random decorations
        if let Some(sign) = state.scenery.back_mut() {
            sign.pos.x = GAME_WIDTH - 10.0;
        }
        update_scenery(&mut state);
        assert!(!matches!(
            state.scenery.back().unwrap().kind,
            SceneryKind::LevelSign { .. }
        ));
    }

    #[test]
    fn test_scenery_waits_for_tail() {
        let mut state = GameState::new(9);
        state.scenery.clear();
        state.scenery.push_back(level_sign(GAME_WIDTH + 400.0, 1));
        update_scenery(&mut state);
        assert_eq!(state.scenery.len(), 1);
    }

    #[test]
    fn test_expired_scenery_dropped_from_front() {
        let mut state = GameState::new(9);
        state.scenery.clear();
        state.scenery.push_back(level_sign(-139.0, 1));
        state.scenery.push_back(level_sign(GAME_WIDTH + 400.0, 1));
        update_scenery(&mut state);
        assert_eq!(state.scenery.len(), 1);
        assert!(state.scenery[0].pos.x > GAME_WIDTH);
    }

    #[test]
    fn test_empty_street_restarts_at_right_edge() {
        let mut state = GameState::new(9);
        state.scenery.clear();
        update_scenery(&mut state);
        assert_eq!(state.scenery.len(), 1);
        assert_eq!(state.scenery[0].pos.x, GAME_WIDTH + 100.0);
    }

    #[test]
    fn test_spawners_fire_on_first_frame() {
        let mut state = GameState::new(21);
        update_spawners(&mut state);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.collectibles.len(), 1);
        assert!(state.obstacle_timer >= MIN_OBSTACLE_DELAY);
        assert!(state.collectible_timer >= 80.0);
    }
}
