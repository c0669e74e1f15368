//! Simulation state and entity types
//!
//! Everything the tick mutates lives in [`SimulationState`]; there is no
//! module-level mutable state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::abilities::{Abilities, Combo, PowerUpKind};
use super::geometry::Circle;
use crate::biome::{Biome, ObstacleStyle};
use crate::config::WorldConfig;
use crate::skins::SkinCoefficients;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Avatar hovering, waiting for the first jump
    Ready,
    /// Active gameplay
    Playing,
    /// Paused by the player or by a tick fault
    Paused,
    /// Run ended
    GameOver,
}

/// What killed the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FatalCollision {
    Ground,
    Ceiling,
    Obstacle,
}

/// The player's avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarState {
    pub pos: Vec2,
    /// Velocity (only y is integrated; x stays 0)
    pub vel: Vec2,
    pub radius: f32,
    /// Presentation tilt (radians), derived from vy
    pub tilt: f32,
    pub abilities: Abilities,
}

impl AvatarState {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            pos: Vec2::new(config.avatar_x, config.floor_y() / 2.0),
            vel: Vec2::ZERO,
            radius: config.avatar_radius,
            tilt: 0.0,
            abilities: Abilities::default(),
        }
    }

    #[inline]
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// A pair of pipes with a gap between them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Y of the gap's upper edge
    pub gap_top: f32,
    pub gap_height: f32,
    /// Scored already
    pub passed: bool,
    pub style: ObstacleStyle,
    pub biome: Biome,
}

impl Obstacle {
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }
}

/// Power-up or coin payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    PowerUp(PowerUpKind),
    Coin { value: u32 },
}

/// A floating pickup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub kind: CollectibleKind,
    /// Picked up this tick; culled on the next lifecycle pass
    pub collected: bool,
    /// Ticks since spawn (bobbing/spin animation)
    pub anim_ticks: u32,
}

impl Collectible {
    #[inline]
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// Particle categories (explosion and sparkle fall under gravity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Jump puff
    Puff,
    /// Score pop
    Score,
    /// Hit / death burst
    Explosion,
    /// Pickup glitter
    Sparkle,
}

impl ParticleKind {
    #[inline]
    pub fn has_gravity(self) -> bool {
        matches!(self, ParticleKind::Explosion | ParticleKind::Sparkle)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life (ticks)
    pub life: u32,
    pub max_life: u32,
    pub color: u32,
    pub size: f32,
    pub kind: ParticleKind,
}

/// A shot fired by the avatar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Events emitted during a tick (audio, persistence, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RunStarted,
    Jumped,
    ShotFired,
    PipePassed { points: u64 },
    CoinCollected { value: u64 },
    PowerUpCollected { kind: PowerUpKind },
    ComboTriggered { combo: Combo },
    BonusScored { points: u64 },
    /// Fatal contact ignored because the avatar was invulnerable
    ShieldAbsorbed { cause: FatalCollision },
    Died { score: u64, cause: FatalCollision },
}

/// Complete simulation state, owned by the driver
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub avatar: AvatarState,
    /// Spawn order = ascending x
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<Collectible>,
    pub coins: Vec<Collectible>,
    pub particles: Vec<Particle>,
    pub projectiles: Vec<Projectile>,
    pub score: u64,
    /// Coins collected this run (after multipliers)
    pub coins_collected: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub biome: Biome,
    pub skin: SkinCoefficients,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
    pub rng: Pcg32,
    next_id: u32,
}

impl SimulationState {
    /// New run with an entropy-seeded RNG
    pub fn new(config: &WorldConfig, biome: Biome, skin: SkinCoefficients) -> Self {
        Self::with_rng(config, biome, skin, Pcg32::from_rng(&mut rand::rng()))
    }

    /// New run with a fixed seed (reproducible tests)
    pub fn with_seed(config: &WorldConfig, seed: u64) -> Self {
        Self::with_rng(
            config,
            Biome::default(),
            SkinCoefficients::default(),
            Pcg32::seed_from_u64(seed),
        )
    }

    fn with_rng(config: &WorldConfig, biome: Biome, skin: SkinCoefficients, rng: Pcg32) -> Self {
        Self {
            avatar: AvatarState::new(config),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            coins: Vec::new(),
            particles: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            coins_collected: 0,
            time_ticks: 0,
            phase: GamePhase::Ready,
            biome,
            skin,
            events: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Back to a fresh Ready state, keeping biome, skin and RNG stream
    pub fn reset(&mut self, config: &WorldConfig) {
        self.avatar = AvatarState::new(config);
        self.obstacles.clear();
        self.power_ups.clear();
        self.coins.clear();
        self.particles.clear();
        self.projectiles.clear();
        self.score = 0;
        self.coins_collected = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Ready;
        self.events.clear();
        self.next_id = 1;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_ready() {
        let config = WorldConfig::default();
        let state = SimulationState::with_seed(&config, 1);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.avatar.pos.x, config.avatar_x);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_reset_clears_run() {
        let config = WorldConfig::default();
        let mut state = SimulationState::with_seed(&config, 1);
        state.score = 12;
        state.phase = GamePhase::GameOver;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x: 10.0,
            gap_top: 100.0,
            gap_height: 120.0,
            passed: false,
            style: ObstacleStyle::Pipe,
            biome: Biome::Meadow,
        });
        state.reset(&config);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.next_entity_id(), 1);
    }

    #[test]
    fn test_particle_gravity_categories() {
        assert!(ParticleKind::Explosion.has_gravity());
        assert!(ParticleKind::Sparkle.has_gravity());
        assert!(!ParticleKind::Puff.has_gravity());
        assert!(!ParticleKind::Score.has_gravity());
    }
}
