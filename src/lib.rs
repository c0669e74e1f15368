//! Skyhop - a side-scrolling gap runner
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (physics, spawning, collisions, abilities)
//! - `driver`: Frame-paced game loop with input debouncing and fault recovery
//! - `config`: Per-session world constants
//! - `settings`: Performance tiers and player preferences
//! - `progress`: Best score / coin totals fed by simulation events

pub mod biome;
pub mod config;
pub mod driver;
pub mod error;
pub mod progress;
pub mod settings;
pub mod sim;
pub mod skins;

pub use config::WorldConfig;
pub use driver::{GameDriver, HudSnapshot};
pub use error::{Result, SkyhopError};
pub use progress::Progress;
pub use settings::{PerformanceTier, Settings, TierLimits};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Simulation rate (ticks per second)
    pub const TICK_RATE_HZ: u32 = 60;
    /// Minimum wall-clock gap between two accepted ticks
    pub const TICK_INTERVAL: Duration = Duration::from_micros(1_000_000 / TICK_RATE_HZ as u64);

    /// Jump debounce (wall clock, independent of ticks)
    pub const JUMP_COOLDOWN: Duration = Duration::from_millis(100);
    /// Shoot reload (wall clock)
    pub const SHOOT_RELOAD: Duration = Duration::from_millis(400);

    /// World defaults
    pub const WORLD_WIDTH: f32 = 320.0;
    pub const WORLD_HEIGHT: f32 = 480.0;
    pub const GROUND_HEIGHT: f32 = 80.0;
    pub const GRAVITY: f32 = 0.119;
    pub const JUMP_IMPULSE: f32 = -3.83;
    pub const WORLD_SPEED: f32 = 1.6;
    pub const GAP_HEIGHT: f32 = 130.0;
    pub const PIPE_WIDTH: f32 = 52.0;
    pub const PIPE_SPACING: f32 = 170.0;
    /// Minimum distance between a gap edge and the ceiling/ground
    pub const MIN_GAP_TOP: f32 = 50.0;

    /// Avatar defaults
    pub const AVATAR_X: f32 = 80.0;
    pub const AVATAR_RADIUS: f32 = 12.0;

    /// Per-category scroll factors (power-ups and coins lag behind for depth)
    pub const OBSTACLE_SCROLL: f32 = 1.0;
    pub const POWER_UP_SCROLL: f32 = 0.7;
    pub const COIN_SCROLL: f32 = 0.8;
    /// Collectibles are culled once x reaches this
    pub const COLLECTIBLE_CULL_X: f32 = -20.0;

    /// Pickup radii (centre distance)
    pub const POWER_UP_PICKUP_RADIUS: f32 = 28.0;
    pub const COIN_PICKUP_RADIUS: f32 = 20.0;
    pub const MAGNET_PICKUP_RADIUS: f32 = 50.0;
    pub const MEGA_PICKUP_RADIUS: f32 = 80.0;

    /// Downward acceleration for explosion/sparkle particles (per tick)
    pub const PARTICLE_GRAVITY: f32 = 0.15;
    /// Fraction of the particle cap kept when a burst would overflow it
    pub const PARTICLE_KEEP_RATIO: f32 = 0.7;

    /// Projectile speed (per tick, rightward)
    pub const PROJECTILE_SPEED: f32 = 6.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;
}
