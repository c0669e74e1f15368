//! Procedural spawning of obstacles, power-ups and coins
//!
//! Called once per tick with the tier limits read that tick. When a
//! collectible list is at its cap the Bernoulli trial is skipped outright,
//! so no RNG value is drawn for it.

use rand::Rng;

use super::abilities::PowerUpKind;
use super::state::{Collectible, CollectibleKind, Obstacle, SimulationState};
use crate::config::WorldConfig;
use crate::settings::TierLimits;

/// Chance that a coin is a high-value coin
const RARE_COIN_CHANCE: f64 = 0.1;
const RARE_COIN_VALUE: u32 = 5;
/// Collectibles enter slightly past the right edge
const COLLECTIBLE_SPAWN_MARGIN: f32 = 20.0;

/// Run every spawn rule once
pub fn spawn(state: &mut SimulationState, config: &WorldConfig, limits: &TierLimits) {
    spawn_obstacle(state, config);
    spawn_power_up(state, config, limits);
    spawn_coin(state, config, limits);
}

/// Spawn an obstacle once the newest one has scrolled `pipe_spacing` in
pub fn spawn_obstacle(state: &mut SimulationState, config: &WorldConfig) -> bool {
    let due = match state.obstacles.last() {
        None => true,
        Some(last) => last.x < config.world_width - config.pipe_spacing,
    };
    if !due {
        return false;
    }

    let min_top = config.min_gap_top;
    let max_top = config.max_gap_top().max(min_top);
    let gap_top = state.rng.random_range(min_top..=max_top);

    let styles = state.biome.profile().obstacle_styles;
    let style = styles[state.rng.random_range(0..styles.len())];

    let id = state.next_entity_id();
    debug_assert!(
        state
            .obstacles
            .last()
            .is_none_or(|last| last.x <= config.world_width),
        "obstacle list must stay x-monotonic"
    );
    state.obstacles.push(Obstacle {
        id,
        x: config.world_width,
        gap_top,
        gap_height: config.gap_height,
        passed: false,
        style,
        biome: state.biome,
    });
    true
}

/// Vertical band where collectibles may appear
fn collectible_y(state: &mut SimulationState, config: &WorldConfig) -> f32 {
    let low = config.min_gap_top;
    let high = (config.floor_y() - config.min_gap_top).max(low);
    state.rng.random_range(low..=high)
}

/// Probability clamped to a valid Bernoulli parameter
#[inline]
fn chance(base: f64, multiplier: f32) -> f64 {
    (base * multiplier as f64).clamp(0.0, 1.0)
}

pub fn spawn_power_up(state: &mut SimulationState, config: &WorldConfig, limits: &TierLimits) -> bool {
    if state.power_ups.len() >= limits.max_power_ups {
        return false;
    }
    let p = chance(limits.power_up_chance, state.biome.profile().power_up_multiplier);
    if !state.rng.random_bool(p) {
        return false;
    }

    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    let y = collectible_y(state, config);
    let id = state.next_entity_id();
    state.power_ups.push(Collectible {
        id,
        x: config.world_width + COLLECTIBLE_SPAWN_MARGIN,
        y,
        kind: CollectibleKind::PowerUp(kind),
        collected: false,
        anim_ticks: 0,
    });
    true
}

pub fn spawn_coin(state: &mut SimulationState, config: &WorldConfig, limits: &TierLimits) -> bool {
    if state.coins.len() >= limits.max_coins {
        return false;
    }
    let p = chance(limits.coin_chance, state.biome.profile().coin_multiplier);
    if !state.rng.random_bool(p) {
        return false;
    }

    let value = if state.rng.random_bool(RARE_COIN_CHANCE) {
        RARE_COIN_VALUE
    } else {
        1
    };
    let y = collectible_y(state, config);
    let id = state.next_entity_id();
    state.coins.push(Collectible {
        id,
        x: config.world_width + COLLECTIBLE_SPAWN_MARGIN,
        y,
        kind: CollectibleKind::Coin { value },
        collected: false,
        anim_ticks: 0,
    });
    true
}
