//! Collision resolution
//!
//! Tests the avatar against the world bounds and every live entity list.
//! Reports what was touched; the tick decides the consequences.

use glam::Vec2;

use super::abilities::{Countdowns, Effect};
use super::geometry::{Circle, Rect, spans_overlap};
use super::state::{AvatarState, Collectible, FatalCollision, Obstacle};
use crate::config::WorldConfig;
use crate::consts::*;
use crate::skins::SkinCoefficients;

/// Result of a collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    /// First fatal contact found (ground, then ceiling, then obstacles)
    pub fatal: Option<FatalCollision>,
    /// Indices into the power-up list
    pub power_ups: Vec<usize>,
    /// Indices into the coin list
    pub coins: Vec<usize>,
}

/// Ground half-plane (touching counts)
#[inline]
pub fn hits_ground(avatar: &Circle, config: &WorldConfig) -> bool {
    avatar.bottom() >= config.floor_y()
}

/// Ceiling half-plane (touching counts)
#[inline]
pub fn hits_ceiling(avatar: &Circle) -> bool {
    avatar.top() <= 0.0
}

/// Avatar vs one obstacle: horizontal reject, then gap band test
pub fn hits_obstacle(avatar: &Circle, obstacle: &Obstacle, pipe_width: f32) -> bool {
    if !spans_overlap(avatar.left(), avatar.right(), obstacle.x, obstacle.x + pipe_width) {
        return false;
    }
    avatar.top() < obstacle.gap_top || avatar.bottom() > obstacle.gap_bottom()
}

/// Solid parts of an obstacle: upper and lower pipe
pub fn obstacle_rects(obstacle: &Obstacle, config: &WorldConfig) -> [Rect; 2] {
    let left = obstacle.x;
    let right = obstacle.x + config.pipe_width;
    [
        Rect::new(Vec2::new(left, 0.0), Vec2::new(right, obstacle.gap_top)),
        Rect::new(
            Vec2::new(left, obstacle.gap_bottom()),
            Vec2::new(right, config.floor_y()),
        ),
    ]
}

/// True if a shot touches either pipe of an obstacle
pub fn projectile_hits_obstacle(shot: &Circle, obstacle: &Obstacle, config: &WorldConfig) -> bool {
    obstacle_rects(obstacle, config)
        .iter()
        .any(|rect| !rect.is_empty() && shot.intersects_rect(rect))
}

/// Coin pickup radius: mega beats magnet beats the base radius
pub fn coin_pickup_radius(countdowns: &Countdowns, magnet_bonus: f32) -> f32 {
    if countdowns.is_active(Effect::MegaMode) {
        MEGA_PICKUP_RADIUS
    } else if countdowns.is_active(Effect::Magnet) {
        MAGNET_PICKUP_RADIUS * magnet_bonus
    } else {
        COIN_PICKUP_RADIUS
    }
}

/// Test the avatar against bounds, obstacles, power-ups and coins
///
/// Pickup detection ignores invulnerability; already-collected entries are
/// skipped.
pub fn resolve(
    avatar: &AvatarState,
    obstacles: &[Obstacle],
    power_ups: &[Collectible],
    coins: &[Collectible],
    config: &WorldConfig,
    skin: &SkinCoefficients,
) -> CollisionReport {
    let circle = avatar.circle();

    let fatal = if hits_ground(&circle, config) {
        Some(FatalCollision::Ground)
    } else if hits_ceiling(&circle) {
        Some(FatalCollision::Ceiling)
    } else if obstacles
        .iter()
        .any(|o| hits_obstacle(&circle, o, config.pipe_width))
    {
        Some(FatalCollision::Obstacle)
    } else {
        None
    };

    let in_range = |list: &[Collectible], range: f32| -> Vec<usize> {
        list.iter()
            .enumerate()
            .filter(|(_, c)| !c.collected && circle.within_range(c.pos(), range))
            .map(|(i, _)| i)
            .collect()
    };

    let coin_radius = coin_pickup_radius(&avatar.abilities.countdowns, skin.magnet);
    CollisionReport {
        fatal,
        power_ups: in_range(power_ups, POWER_UP_PICKUP_RADIUS),
        coins: in_range(coins, coin_radius),
    }
}
