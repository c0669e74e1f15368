//! Biome profiles
//!
//! A biome decides which obstacle styles may spawn, how often collectibles
//! appear, and which weather the renderer should draw.

use serde::{Deserialize, Serialize};

/// Cosmetic obstacle type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstacleStyle {
    Pipe,
    Tree,
    Cactus,
    Pillar,
    Icicle,
    Crystal,
    Basalt,
}

/// Weather overlay (render-only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Clear,
    Rain,
    Sandstorm,
    Snow,
    Ash,
}

/// Environment the run takes place in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Biome {
    #[default]
    Meadow,
    Desert,
    Arctic,
    Volcano,
}

/// Spawn-relevant parameters of a biome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeProfile {
    pub obstacle_styles: &'static [ObstacleStyle],
    pub power_up_multiplier: f32,
    pub coin_multiplier: f32,
    pub weather: &'static [Weather],
}

impl Biome {
    pub const ALL: [Biome; 4] = [Biome::Meadow, Biome::Desert, Biome::Arctic, Biome::Volcano];

    pub fn profile(self) -> BiomeProfile {
        match self {
            Biome::Meadow => BiomeProfile {
                obstacle_styles: &[ObstacleStyle::Pipe, ObstacleStyle::Tree],
                power_up_multiplier: 1.0,
                coin_multiplier: 1.0,
                weather: &[Weather::Clear, Weather::Rain],
            },
            Biome::Desert => BiomeProfile {
                obstacle_styles: &[ObstacleStyle::Cactus, ObstacleStyle::Pillar],
                power_up_multiplier: 0.8,
                coin_multiplier: 1.5,
                weather: &[Weather::Clear, Weather::Sandstorm],
            },
            Biome::Arctic => BiomeProfile {
                obstacle_styles: &[ObstacleStyle::Icicle, ObstacleStyle::Crystal],
                power_up_multiplier: 1.2,
                coin_multiplier: 0.8,
                weather: &[Weather::Snow],
            },
            Biome::Volcano => BiomeProfile {
                obstacle_styles: &[ObstacleStyle::Basalt, ObstacleStyle::Pillar, ObstacleStyle::Crystal],
                power_up_multiplier: 1.5,
                coin_multiplier: 1.2,
                weather: &[Weather::Ash, Weather::Clear],
            },
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "meadow" => Some(Biome::Meadow),
            "desert" => Some(Biome::Desert),
            "arctic" => Some(Biome::Arctic),
            "volcano" => Some(Biome::Volcano),
            _ => None,
        }
    }
}
