//! Per-skin ability coefficients
//!
//! Skins only differ in a handful of multipliers. The integrator, resolver
//! and ability machine take a [`SkinCoefficients`] and never look at skin ids.

use serde::{Deserialize, Serialize};

/// Multipliers a skin applies to the avatar's abilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinCoefficients {
    /// Scales the jump impulse
    pub jump: f32,
    /// Scales gravity
    pub gravity: f32,
    /// Scales the magnet coin pickup radius
    pub magnet: f32,
    /// Scales standalone shield duration
    pub shield: f32,
}

impl Default for SkinCoefficients {
    fn default() -> Self {
        Self {
            jump: 1.0,
            gravity: 1.0,
            magnet: 1.0,
            shield: 1.0,
        }
    }
}

/// Built-in coefficient table, keyed by skin id
const SKIN_TABLE: &[(&str, SkinCoefficients)] = &[
    (
        "feather",
        SkinCoefficients {
            jump: 0.9,
            gravity: 0.85,
            magnet: 1.0,
            shield: 1.0,
        },
    ),
    (
        "rocket",
        SkinCoefficients {
            jump: 1.15,
            gravity: 1.1,
            magnet: 1.0,
            shield: 1.0,
        },
    ),
    (
        "magnetron",
        SkinCoefficients {
            jump: 1.0,
            gravity: 1.0,
            magnet: 1.4,
            shield: 1.0,
        },
    ),
    (
        "guardian",
        SkinCoefficients {
            jump: 1.0,
            gravity: 1.0,
            magnet: 1.0,
            shield: 1.5,
        },
    ),
];

/// Look up a skin's coefficients; unknown ids get the neutral set
pub fn coefficients_for(skin_id: &str) -> SkinCoefficients {
    SKIN_TABLE
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(skin_id))
        .map(|(_, c)| *c)
        .unwrap_or_default()
}

/// Id of the neutral skin
pub const DEFAULT_SKIN: &str = "default";

/// Every selectable skin id, the neutral one first
pub fn known_skins() -> impl Iterator<Item = &'static str> {
    std::iter::once(DEFAULT_SKIN).chain(SKIN_TABLE.iter().map(|(id, _)| *id))
}
