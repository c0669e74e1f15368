//! Advancing and culling transient entities
//!
//! Obstacles, power-ups and coins scroll left at different rates. Particles
//! and projectiles move by their own velocity.
//!
//! Scrolled entities are culled once x reaches their category threshold
//! (`x <= threshold`): `-pipe_width` for obstacles, `-20` for collectibles.

use glam::Vec2;
use rand::Rng;

use super::collision::projectile_hits_obstacle;
use super::geometry::Circle;
use super::state::{Collectible, Obstacle, Particle, ParticleKind, Projectile, SimulationState};
use crate::config::WorldConfig;
use crate::consts::*;
use crate::settings::TierLimits;

/// Scroll obstacles and cull the ones fully off-screen
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, step: f32, pipe_width: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= step * OBSTACLE_SCROLL;
    }
    obstacles.retain(|o| o.x > -pipe_width);
}

/// Scroll collectibles, tick their animation clock, cull collected/off-screen
pub fn advance_collectibles(collectibles: &mut Vec<Collectible>, step: f32, factor: f32) {
    collectibles.retain(|c| !c.collected);
    for collectible in collectibles.iter_mut() {
        collectible.x -= step * factor;
        collectible.anim_ticks = collectible.anim_ticks.wrapping_add(1);
    }
    collectibles.retain(|c| c.x > COLLECTIBLE_CULL_X);
}

/// Move particles, apply fall for explosion/sparkle, cull at zero life
pub fn advance_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        if particle.kind.has_gravity() {
            particle.vel.y += PARTICLE_GRAVITY;
        }
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| p.life > 0);
}

/// Append a batch without ever exceeding `cap`
///
/// If the batch would overflow, the oldest particles are dropped first so
/// that only `floor(cap * 0.7)` remain before the batch goes in.
pub fn insert_particles(particles: &mut Vec<Particle>, batch: Vec<Particle>, cap: usize) {
    if batch.is_empty() {
        return;
    }
    if particles.len() + batch.len() > cap {
        let keep = ((cap as f32 * PARTICLE_KEEP_RATIO).floor() as usize).min(particles.len());
        let excess = particles.len() - keep;
        particles.drain(..excess);
    }
    let room = cap.saturating_sub(particles.len());
    particles.extend(batch.into_iter().take(room));
}

/// Drop the oldest entries beyond `cap`
pub fn trim_oldest<T>(items: &mut Vec<T>, cap: usize) -> usize {
    let excess = items.len().saturating_sub(cap);
    items.drain(..excess);
    excess
}

/// Bring capped lists back under the current limits (tier may have shrunk)
pub fn enforce_caps(state: &mut SimulationState, limits: &TierLimits) {
    let dropped = trim_oldest(&mut state.particles, limits.max_particles)
        + trim_oldest(&mut state.power_ups, limits.max_power_ups)
        + trim_oldest(&mut state.coins, limits.max_coins);
    if dropped > 0 {
        log::debug!("Trimmed {} entities to tier caps", dropped);
    }
}

/// Burst shape for each category: (count, speed, life ticks, size, color)
fn burst_params(kind: ParticleKind) -> (usize, f32, u32, f32, u32) {
    match kind {
        ParticleKind::Puff => (5, 1.0, 18, 3.0, 0xEEEEEE),
        ParticleKind::Score => (8, 1.5, 24, 2.5, 0xFFD54F),
        ParticleKind::Explosion => (20, 3.0, 40, 4.0, 0xFF7043),
        ParticleKind::Sparkle => (12, 2.0, 30, 2.0, 0x80DEEA),
    }
}

/// Spawn a radial burst of `kind` particles at `origin`
pub fn emit_burst(state: &mut SimulationState, kind: ParticleKind, origin: Vec2, cap: usize) {
    if cap == 0 {
        return;
    }
    let (count, speed, life, size, color) = burst_params(kind);
    let mut batch = Vec::with_capacity(count);
    for _ in 0..count {
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let magnitude = speed * state.rng.random_range(0.5f32..=1.0);
        let max_life = life + state.rng.random_range(0..=life / 2);
        batch.push(Particle {
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * magnitude,
            life: max_life,
            max_life,
            color,
            size,
            kind,
        });
    }
    insert_particles(&mut state.particles, batch, cap);
}

/// Move shots; drop the ones past the right edge or blocked by a pipe.
/// Returns impact points for hit bursts.
pub fn advance_projectiles(
    projectiles: &mut Vec<Projectile>,
    obstacles: &[Obstacle],
    config: &WorldConfig,
) -> Vec<Vec2> {
    let mut impacts = Vec::new();
    projectiles.retain_mut(|shot| {
        shot.pos += shot.vel;
        if shot.pos.x - PROJECTILE_RADIUS > config.world_width {
            return false;
        }
        let circle = Circle::new(shot.pos, PROJECTILE_RADIUS);
        if obstacles
            .iter()
            .any(|o| projectile_hits_obstacle(&circle, o, config))
        {
            impacts.push(shot.pos);
            return false;
        }
        true
    });
    impacts
}
