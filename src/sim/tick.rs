//! One simulation frame
//!
//! Fixed per-frame step (no delta time): the game runs at display rate. Order
//! within a frame is input → physics → world/spawning → collisions → score.

use super::ambient;
use super::collision::{collectible_hitbox, obstacle_hitbox, runner_hitbox};
use super::spawn;
use super::state::{GameEvent, GameState, RunPhase, Stance};
use super::theme::Theme;
use crate::consts::*;
use crate::wave;

/// Advance the run by one frame. Does nothing once the run is over.
pub fn tick(state: &mut GameState) {
    if state.phase != RunPhase::Running {
        return;
    }

    update_runner(state);
    update_world(state);

    if resolve_obstacles(state) {
        return;
    }
    resolve_collectibles(state);
    ambient::update_particles(&mut state.particles);

    update_score(state);
    state.frame += 1;
}

/// Jump, gravity, landing, and the cosmetic pose
fn update_runner(state: &mut GameState) {
    let on_ground = state.runner.on_ground();

    if on_ground && state.input.wants_jump() {
        state.runner.vel_y = JUMP_FORCE;
        state.runner.stance = Stance::Airborne;
        state.input.consume();

        let dust = ambient::dust_burst(&mut state.rng, state.runner.feet());
        state.emit_particles(dust);
        state.events.push(GameEvent::Jumped);
    }
    state.input.decay();

    let runner = &mut state.runner;
    runner.vel_y += GRAVITY;
    runner.pos.y += runner.vel_y;

    if on_ground {
        runner.limb_swing = wave(state.frame, 0.4, 0.0) * 0.6;
        runner.rotation = 0.0;
    } else {
        runner.limb_swing = 0.5;
        runner.rotation += 0.05;
    }

    if runner.pos.y + runner.size.y > GROUND_Y {
        runner.pos.y = GROUND_Y - runner.size.y;
        runner.vel_y = 0.0;
        runner.stance = Stance::Grounded;
    }
}

/// Speed ramp, scenery, weather, flyby and spawn timers
fn update_world(state: &mut GameState) {
    state.speed += SPEED_INCREMENT;
    state.distance += state.speed;

    spawn::update_scenery(state);
    ambient::update_snow(
        &mut state.snow,
        &mut state.rng,
        state.speed,
        state.frame,
        state.theme,
    );
    ambient::update_flyby(&mut state.flyby, &mut state.rng, state.frame);
    spawn::update_spawners(state);
}

/// Scroll obstacles and test them against the runner.
///
/// Returns true when a hit ended the run; the rest of the frame is skipped.
fn resolve_obstacles(state: &mut GameState) -> bool {
    let hitbox = runner_hitbox(state.runner.sprite());
    let speed = state.speed;
    let runner_left = state.runner.pos.x;

    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos.x -= speed;

        if hitbox.overlaps(&obstacle_hitbox(obstacle.sprite())) {
            state.phase = RunPhase::Over;
            state.events.push(GameEvent::GameOver {
                final_score: state.score,
            });
            log::info!(
                "Run over: hit {:?} at score {} (speed {:.2})",
                obstacle.kind,
                state.score,
                state.speed
            );
            return true;
        }

        if obstacle.sprite().right() < runner_left {
            obstacle.passed = true;
        }
    }
    state.obstacles.retain(|o| o.sprite().right() >= 0.0);
    false
}

/// Scroll and bob collectibles, award the ones the runner touches
fn resolve_collectibles(state: &mut GameState) {
    let hitbox = runner_hitbox(state.runner.sprite());
    let speed = state.speed;
    let frame = state.frame;
    let mut pickups = Vec::new();

    for item in state.collectibles.iter_mut() {
        item.pos.x -= speed;
        item.pos.y = item.base_y + wave(frame, 0.1, item.float_phase) * 5.0;

        if !item.collected && hitbox.overlaps(&collectible_hitbox(item.sprite())) {
            item.collected = true;
            pickups.push((item.kind, item.sprite().center()));
        }
    }
    state
        .collectibles
        .retain(|c| !c.collected && c.sprite().right() >= 0.0);

    for (kind, center) in pickups {
        state.score += COLLECT_BONUS;
        let sparkles = ambient::sparkle_burst(&mut state.rng, center, kind);
        state.emit_particles(sparkles);
        state.events.push(GameEvent::Collected(kind));
    }
}

/// Per-frame score, throttled report, and theme transitions
fn update_score(state: &mut GameState) {
    state.score += SCORE_PER_FRAME;
    if state.frame % SCORE_REPORT_INTERVAL == 0 {
        state.events.push(GameEvent::Score(state.score));
    }

    let theme = Theme::for_score(state.score);
    if theme != state.theme {
        log::info!("Theme {:?} -> {:?} at score {}", state.theme, theme, state.score);
        state.theme = theme;
        state.events.push(GameEvent::ThemeChanged(theme));
    }
}
