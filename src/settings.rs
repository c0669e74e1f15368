//! Player settings and performance tiers
//!
//! The active tier's limits are read by the spawner every tick, so changing
//! the tier mid-run takes effect on the next tick.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::error::{Result, SkyhopError};
use crate::skins;

/// Performance tier levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PerformanceTier {
    Low,
    #[default]
    Medium,
    High,
}

/// Population caps and per-tick spawn probabilities for a tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierLimits {
    pub max_particles: usize,
    pub max_power_ups: usize,
    pub max_coins: usize,
    /// Bernoulli probability per tick before the biome multiplier
    pub power_up_chance: f64,
    pub coin_chance: f64,
}

impl PerformanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerformanceTier::Low => "Low",
            PerformanceTier::Medium => "Medium",
            PerformanceTier::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(PerformanceTier::Low),
            "medium" | "med" => Some(PerformanceTier::Medium),
            "high" => Some(PerformanceTier::High),
            _ => None,
        }
    }

    pub fn limits(&self) -> TierLimits {
        match self {
            PerformanceTier::Low => TierLimits {
                max_particles: 60,
                max_power_ups: 1,
                max_coins: 4,
                power_up_chance: 0.002,
                coin_chance: 0.010,
            },
            PerformanceTier::Medium => TierLimits {
                max_particles: 150,
                max_power_ups: 2,
                max_coins: 8,
                power_up_chance: 0.003,
                coin_chance: 0.015,
            },
            PerformanceTier::High => TierLimits {
                max_particles: 300,
                max_power_ups: 3,
                max_coins: 12,
                power_up_chance: 0.004,
                coin_chance: 0.020,
            },
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Performance tier (population caps, spawn rates)
    pub tier: PerformanceTier,
    /// Particle effects (jump puffs, explosions, sparkles)
    pub particles: bool,
    /// Equipped skin id (see [`crate::skins`])
    pub skin: String,
    /// Selected biome
    pub biome: Biome,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tier: PerformanceTier::Medium,
            particles: true,
            skin: skins::DEFAULT_SKIN.to_string(),
            biome: Biome::Meadow,
        }
    }
}

impl Settings {
    /// Override one field by name (command-line `--key value` pairs)
    pub fn set_option(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "tier" => {
                self.tier = PerformanceTier::from_str(value)
                    .ok_or_else(|| SkyhopError::InvalidConfig(format!("unknown tier '{value}'")))?;
            }
            "biome" => {
                self.biome = Biome::from_str(value)
                    .ok_or_else(|| SkyhopError::InvalidConfig(format!("unknown biome '{value}'")))?;
            }
            "skin" => {
                if !skins::known_skins().any(|id| id.eq_ignore_ascii_case(value)) {
                    let known: Vec<_> = skins::known_skins().collect();
                    return Err(SkyhopError::InvalidConfig(format!(
                        "unknown skin '{value}' (known: {})",
                        known.join(", ")
                    )));
                }
                self.skin = value.to_lowercase();
            }
            "particles" => {
                self.particles = match value.to_lowercase().as_str() {
                    "on" | "true" | "1" => true,
                    "off" | "false" | "0" => false,
                    _ => {
                        return Err(SkyhopError::InvalidConfig(format!(
                            "particles expects on/off, got '{value}'"
                        )));
                    }
                };
            }
            _ => return Err(SkyhopError::InvalidConfig(format!("unknown option '{key}'"))),
        }
        Ok(())
    }

    /// Effective limits (particle cap is zero when particles are off)
    pub fn limits(&self) -> TierLimits {
        let mut limits = self.tier.limits();
        if !self.particles {
            limits.max_particles = 0;
        }
        limits
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
            Err(e) => Err(SkyhopError::Io(e)),
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved");
        Ok(())
    }
}
