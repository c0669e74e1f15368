//! Per-session world constants
//!
//! Supplied by the host at session start. Missing JSON keys fall back to the
//! compile-time defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SkyhopError};

/// Immutable world parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub world_width: f32,
    pub world_height: f32,
    pub ground_height: f32,
    /// Downward acceleration added to vy each tick
    pub gravity: f32,
    /// Vertical velocity set by a jump (negative = up)
    pub jump_impulse: f32,
    /// Base scroll speed (units per tick)
    pub world_speed: f32,
    pub gap_height: f32,
    pub pipe_width: f32,
    /// Horizontal distance between consecutive obstacles
    pub pipe_spacing: f32,
    pub min_gap_top: f32,
    pub avatar_x: f32,
    pub avatar_radius: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            world_speed: WORLD_SPEED,
            gap_height: GAP_HEIGHT,
            pipe_width: PIPE_WIDTH,
            pipe_spacing: PIPE_SPACING,
            min_gap_top: MIN_GAP_TOP,
            avatar_x: AVATAR_X,
            avatar_radius: AVATAR_RADIUS,
        }
    }
}

impl WorldConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Y coordinate of the ground surface
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.world_height - self.ground_height
    }

    /// Largest gap-top offset the spawner may draw
    #[inline]
    pub fn max_gap_top(&self) -> f32 {
        self.floor_y() - self.gap_height - self.min_gap_top
    }

    /// Reject configs that cannot produce a playable world
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("world_width", self.world_width),
            ("world_height", self.world_height),
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("jump_impulse", self.jump_impulse),
            ("world_speed", self.world_speed),
            ("gap_height", self.gap_height),
            ("pipe_width", self.pipe_width),
            ("pipe_spacing", self.pipe_spacing),
            ("min_gap_top", self.min_gap_top),
            ("avatar_x", self.avatar_x),
            ("avatar_radius", self.avatar_radius),
        ];
        if let Some((name, _)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SkyhopError::InvalidConfig(format!("{name} must be finite")));
        }

        if self.world_width <= 0.0 || self.world_height <= 0.0 {
            return Err(SkyhopError::InvalidConfig(
                "world dimensions must be positive".to_string(),
            ));
        }
        if self.ground_height < 0.0 || self.ground_height >= self.world_height {
            return Err(SkyhopError::InvalidConfig(format!(
                "ground_height {} outside [0, {})",
                self.ground_height, self.world_height
            )));
        }
        if self.jump_impulse >= 0.0 {
            return Err(SkyhopError::InvalidConfig(
                "jump_impulse must be negative (upward)".to_string(),
            ));
        }
        if self.gap_height <= self.avatar_radius * 2.0 {
            return Err(SkyhopError::InvalidConfig(format!(
                "gap_height {} too small for avatar radius {}",
                self.gap_height, self.avatar_radius
            )));
        }
        if self.max_gap_top() < self.min_gap_top {
            return Err(SkyhopError::InvalidConfig(format!(
                "gap band does not fit: max gap top {} < min gap top {}",
                self.max_gap_top(),
                self.min_gap_top
            )));
        }
        if self.pipe_width <= 0.0 || self.pipe_spacing <= 0.0 || self.world_speed <= 0.0 {
            return Err(SkyhopError::InvalidConfig(
                "pipe width, spacing and world speed must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
