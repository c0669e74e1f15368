//! Simulation module
//!
//! All gameplay logic lives here:
//! - Fixed timestep only (one call to [`tick`] per accepted frame)
//! - All mutable state in [`SimulationState`]
//! - No rendering, audio or platform dependencies

pub mod abilities;
pub mod collision;
pub mod geometry;
pub mod lifecycle;
pub mod physics;
pub mod spawner;
pub mod state;
pub mod tick;

pub use abilities::{Abilities, ActiveMode, Combo, Countdowns, Effect, PickupOutcome, PowerUpKind};
pub use collision::{CollisionReport, resolve};
pub use geometry::{Circle, Rect};
pub use state::{
    AvatarState, Collectible, CollectibleKind, FatalCollision, GameEvent, GamePhase, Obstacle,
    Particle, ParticleKind, Projectile, SimulationState,
};
pub use tick::{TickInput, tick};
