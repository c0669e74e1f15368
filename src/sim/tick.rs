//! Fixed-step simulation tick
//!
//! Order within a tick: trim lists to the current caps, integrate avatar,
//! spawn, advance/cull, resolve collisions and pickups, then step the ability
//! countdowns. A duration
//! granted this tick therefore already reads one less when the tick ends.

use glam::Vec2;

use super::abilities::PickupOutcome;
use super::collision::{self, CollisionReport};
use super::lifecycle;
use super::physics;
use super::spawner;
use super::state::{
    CollectibleKind, FatalCollision, GameEvent, GamePhase, ParticleKind, Projectile,
    SimulationState,
};
use crate::config::WorldConfig;
use crate::consts::*;
use crate::settings::TierLimits;

/// Accepted (already debounced) input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub jump: bool,
    pub shoot: bool,
}

/// Advance the simulation by one tick
pub fn tick(state: &mut SimulationState, input: &TickInput, config: &WorldConfig, limits: &TierLimits) {
    state.events.clear();
    if state.phase == GamePhase::Paused {
        return;
    }

    // Limits are re-read every tick; a shrunken tier trims surplus first
    lifecycle::enforce_caps(state, limits);

    match state.phase {
        GamePhase::Paused => return,
        GamePhase::GameOver => {
            // Let the death burst settle
            lifecycle::advance_particles(&mut state.particles);
            return;
        }
        GamePhase::Ready => {
            lifecycle::advance_particles(&mut state.particles);
            if !input.jump {
                return;
            }
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::RunStarted);
            log::info!("Run started");
        }
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    let speed = state.avatar.abilities.active_mode().speed_multiplier();
    let skin = state.skin;
    let cap = limits.max_particles;

    // Avatar
    if input.jump {
        physics::jump(&mut state.avatar, config, &skin);
        state.events.push(GameEvent::Jumped);
        let at = state.avatar.pos + Vec2::new(-state.avatar.radius, state.avatar.radius * 0.5);
        lifecycle::emit_burst(state, ParticleKind::Puff, at, cap);
    }
    if input.shoot {
        state.projectiles.push(Projectile {
            pos: state.avatar.pos + Vec2::new(state.avatar.radius, 0.0),
            vel: Vec2::new(PROJECTILE_SPEED, 0.0),
        });
        state.events.push(GameEvent::ShotFired);
    }
    physics::integrate(&mut state.avatar, config, &skin, speed);

    // Spawning
    spawner::spawn(state, config, limits);

    // Lifecycle
    let step = config.world_speed * speed;
    lifecycle::advance_obstacles(&mut state.obstacles, step, config.pipe_width);
    lifecycle::advance_collectibles(&mut state.power_ups, step, POWER_UP_SCROLL);
    lifecycle::advance_collectibles(&mut state.coins, step, COIN_SCROLL);
    lifecycle::advance_particles(&mut state.particles);
    let impacts = lifecycle::advance_projectiles(&mut state.projectiles, &state.obstacles, config);
    for at in impacts {
        lifecycle::emit_burst(state, ParticleKind::Explosion, at, cap);
    }

    // Collisions
    let report = collision::resolve(
        &state.avatar,
        &state.obstacles,
        &state.power_ups,
        &state.coins,
        config,
        &skin,
    );
    collect_pickups(state, &report, cap);
    score_passed_obstacles(state, config, cap);
    if let Some(cause) = report.fatal {
        handle_fatal(state, cause, config, cap);
    }

    // Countdowns step after resolution
    state.avatar.abilities.tick_down();
}

fn collect_pickups(state: &mut SimulationState, report: &CollisionReport, cap: usize) {
    let skin = state.skin;

    for &i in &report.power_ups {
        let item = &mut state.power_ups[i];
        item.collected = true;
        let (kind, pos) = (item.kind, item.pos());
        let CollectibleKind::PowerUp(kind) = kind else {
            continue;
        };

        state.events.push(GameEvent::PowerUpCollected { kind });
        match state.avatar.abilities.on_pickup(kind, &skin) {
            PickupOutcome::Combo(combo) => {
                log::debug!("Combo {:?} at tick {}", combo, state.time_ticks);
                state.events.push(GameEvent::ComboTriggered { combo });
            }
            PickupOutcome::Bonus(points) => {
                state.score += points;
                state.events.push(GameEvent::BonusScored { points });
            }
            PickupOutcome::Timed { .. } => {}
        }
        lifecycle::emit_burst(state, ParticleKind::Sparkle, pos, cap);
    }

    let multiplier = state.avatar.abilities.score_multiplier();
    for &i in &report.coins {
        let item = &mut state.coins[i];
        item.collected = true;
        let (kind, pos) = (item.kind, item.pos());
        let CollectibleKind::Coin { value } = kind else {
            continue;
        };

        let value = u64::from(value) * multiplier;
        state.coins_collected += value;
        state.events.push(GameEvent::CoinCollected { value });
        lifecycle::emit_burst(state, ParticleKind::Score, pos, cap);
    }
}

/// Award points for every obstacle whose right edge the avatar has cleared
fn score_passed_obstacles(state: &mut SimulationState, config: &WorldConfig, cap: usize) {
    let avatar_x = state.avatar.pos.x;
    let mut newly_passed = 0u64;
    for obstacle in state.obstacles.iter_mut() {
        if !obstacle.passed && obstacle.x + config.pipe_width < avatar_x {
            obstacle.passed = true;
            newly_passed += 1;
        }
    }

    let multiplier = state.avatar.abilities.score_multiplier();
    for _ in 0..newly_passed {
        state.score += multiplier;
        state.events.push(GameEvent::PipePassed { points: multiplier });
        let at = state.avatar.pos - Vec2::new(0.0, state.avatar.radius * 2.0);
        lifecycle::emit_burst(state, ParticleKind::Score, at, cap);
    }
}

fn handle_fatal(state: &mut SimulationState, cause: FatalCollision, config: &WorldConfig, cap: usize) {
    let avatar = &mut state.avatar;
    if avatar.abilities.invulnerable() {
        match cause {
            FatalCollision::Ground => {
                avatar.pos.y = config.floor_y() - avatar.radius;
                avatar.vel.y = avatar.vel.y.min(0.0);
            }
            FatalCollision::Ceiling => {
                avatar.pos.y = avatar.radius;
                avatar.vel.y = avatar.vel.y.max(0.0);
            }
            // Phase through pipes
            FatalCollision::Obstacle => {}
        }
        state.events.push(GameEvent::ShieldAbsorbed { cause });
        return;
    }

    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::Died {
        score: state.score,
        cause,
    });
    log::info!(
        "Run over at tick {}: score={}, coins={}, cause={:?}",
        state.time_ticks,
        state.score,
        state.coins_collected,
        cause
    );
    let at = state.avatar.pos;
    lifecycle::emit_burst(state, ParticleKind::Explosion, at, cap);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biome::{Biome, ObstacleStyle};
    use crate::settings::PerformanceTier;
    use crate::sim::abilities::{Effect, PowerUpKind};
    use crate::sim::state::{Collectible, Obstacle};

    /// Limits with spawning of collectibles disabled
    fn quiet_limits() -> TierLimits {
        quiet_limits_for(PerformanceTier::Medium)
    }

    fn quiet_limits_for(tier: PerformanceTier) -> TierLimits {
        TierLimits {
            power_up_chance: 0.0,
            coin_chance: 0.0,
            ..tier.limits()
        }
    }

    fn playing_state(config: &WorldConfig) -> SimulationState {
        let mut state = SimulationState::with_seed(config, 42);
        state.phase = GamePhase::Playing;
        state
    }

    fn power_up_at(state: &mut SimulationState, kind: PowerUpKind) {
        let id = state.next_entity_id();
        let pos = state.avatar.pos;
        state.power_ups.push(Collectible {
            id,
            // Scrolls 0.7 * speed before resolution; stays in range
            x: pos.x + 2.0,
            y: pos.y,
            kind: CollectibleKind::PowerUp(kind),
            collected: false,
            anim_ticks: 0,
        });
    }

    /// Park an obstacle far to the right so the spawner stays idle
    fn block_spawner(state: &mut SimulationState, config: &WorldConfig) {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            x: config.world_width + 10_000.0,
            gap_top: 150.0,
            gap_height: config.gap_height,
            passed: false,
            style: ObstacleStyle::Pipe,
            biome: Biome::Meadow,
        });
    }

    fn obstacle_at(x: f32, gap_top: f32, config: &WorldConfig) -> Obstacle {
        Obstacle {
            id: 77,
            x,
            gap_top,
            gap_height: config.gap_height,
            passed: false,
            style: ObstacleStyle::Pipe,
            biome: Biome::Meadow,
        }
    }

    #[test]
    fn test_ready_waits_for_jump() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = SimulationState::with_seed(&config, 1);
        let y = state.avatar.pos.y;

        tick(&mut state, &TickInput::default(), &config, &limits);
        assert_eq!(state.phase, GamePhase::Ready);
        assert_eq!(state.avatar.pos.y, y);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &TickInput { jump: true, shoot: false }, &config, &limits);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::RunStarted));
        assert!(state.events.contains(&GameEvent::Jumped));
        assert!(state.avatar.pos.y < y);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_jump_and_gravity_in_one_tick() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        state.avatar.pos.y = 240.0;
        state.avatar.vel.y = 0.0;

        tick(&mut state, &TickInput { jump: true, shoot: false }, &config, &limits);
        assert!((state.avatar.vel.y - (-3.711)).abs() < 1e-4);
        assert!((state.avatar.pos.y - 236.289).abs() < 1e-3);
    }

    #[test]
    fn test_combo_granted_this_tick_reads_one_less() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        state.avatar.abilities.countdowns.set(Effect::ComboWindow, 180);
        state.avatar.abilities.last_power_up = Some(PowerUpKind::Shield);
        power_up_at(&mut state, PowerUpKind::Slow);

        tick(&mut state, &TickInput::default(), &config, &limits);

        let c = &state.avatar.abilities.countdowns;
        assert_eq!(c.get(Effect::SuperMode), 599);
        assert_eq!(c.get(Effect::Shield), 599);
        assert_eq!(c.get(Effect::ComboWindow), 0);
        assert_eq!(state.avatar.abilities.last_power_up, None);
        assert!(state.events.iter().any(|e| matches!(e, GameEvent::ComboTriggered { .. })));
        assert!(state.power_ups[0].collected);

        // Collected entries are culled on the next pass
        tick(&mut state, &TickInput::default(), &config, &limits);
        assert!(state.power_ups.is_empty());
    }

    #[test]
    fn test_star_bonus_adds_score() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        power_up_at(&mut state, PowerUpKind::Star);
        tick(&mut state, &TickInput::default(), &config, &limits);
        assert_eq!(state.score, 5);
        assert!(state.events.contains(&GameEvent::BonusScored { points: 5 }));
    }

    #[test]
    fn test_ground_death() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        state.avatar.pos.y = config.floor_y() - config.avatar_radius - 0.5;
        state.avatar.vel.y = 3.0;

        tick(&mut state, &TickInput::default(), &config, &limits);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::Died {
                cause: FatalCollision::Ground,
                ..
            }
        )));
        assert!(!state.particles.is_empty());

        // Frozen afterwards apart from particles
        let y = state.avatar.pos.y;
        tick(&mut state, &TickInput { jump: true, shoot: false }, &config, &limits);
        assert_eq!(state.avatar.pos.y, y);
    }

    #[test]
    fn test_shield_absorbs_ground() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        state.avatar.abilities.countdowns.set(Effect::Shield, 50);
        state.avatar.pos.y = config.floor_y() - config.avatar_radius - 0.5;
        state.avatar.vel.y = 3.0;

        tick(&mut state, &TickInput::default(), &config, &limits);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.avatar.pos.y, config.floor_y() - config.avatar_radius);
        assert_eq!(state.avatar.vel.y, 0.0);
        assert!(state.events.contains(&GameEvent::ShieldAbsorbed {
            cause: FatalCollision::Ground
        }));
    }

    #[test]
    fn test_passing_obstacle_scores_once() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        state.obstacles.insert(
            0,
            Obstacle {
                id: 99,
                x: config.avatar_x - config.pipe_width + 0.5,
                gap_top: 100.0,
                gap_height: config.gap_height,
                passed: false,
                style: ObstacleStyle::Pipe,
                biome: Biome::Meadow,
            },
        );
        // Keep the avatar inside the gap
        state.avatar.pos.y = 165.0;
        state.avatar.vel.y = -1.0;
        state.avatar.abilities.countdowns.set(Effect::DoublePoints, 100);

        tick(&mut state, &TickInput::default(), &config, &limits);
        assert_eq!(state.score, 2);
        assert!(state.obstacles[0].passed);

        tick(&mut state, &TickInput::default(), &config, &limits);
        assert_eq!(state.score, 2);
    }

    #[test]
    fn test_shot_spawns_projectile() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        tick(&mut state, &TickInput { jump: false, shoot: true }, &config, &limits);
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.events.contains(&GameEvent::ShotFired));
    }

    #[test]
    fn test_countdowns_never_increase_across_quiet_ticks() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        state.avatar.abilities.countdowns.set(Effect::Rainbow, 30);
        state.avatar.abilities.countdowns.set(Effect::Magnet, 10);
        let mut prev = state.avatar.abilities.countdowns;
        for _ in 0..40 {
            let input = TickInput {
                jump: state.avatar.vel.y > 1.0,
                shoot: false,
            };
            tick(&mut state, &input, &config, &limits);
            let now = state.avatar.abilities.countdowns;
            for (effect, ticks) in now.iter() {
                assert!(ticks <= prev.get(effect));
            }
            prev = now;
        }
        assert_eq!(prev.get(Effect::Magnet), 0);
    }

    #[test]
    fn test_particle_cap_held_over_long_run() {
        let config = WorldConfig::default();
        let limits = TierLimits {
            max_particles: 30,
            power_up_chance: 0.5,
            coin_chance: 0.5,
            ..PerformanceTier::High.limits()
        };
        let mut state = playing_state(&config);
        // Invulnerable so the run continues
        state.avatar.abilities.countdowns.set(Effect::GodMode, 10_000);
        for i in 0..600 {
            tick(&mut state, &TickInput { jump: i % 20 == 0, shoot: false }, &config, &limits);
            assert!(state.particles.len() <= limits.max_particles);
            assert!(state.power_ups.len() <= limits.max_power_ups);
            assert!(state.coins.len() <= limits.max_coins);
            assert!(state.obstacles.windows(2).all(|w| w[0].x < w[1].x));
        }
    }

    #[test]
    fn test_shield_passes_through_obstacle() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        // Avatar at y=200 sits well above a gap starting at 300
        state.obstacles.insert(0, obstacle_at(70.0, 300.0, &config));
        state.avatar.abilities.countdowns.set(Effect::Shield, 50);

        tick(&mut state, &TickInput::default(), &config, &limits);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::ShieldAbsorbed {
            cause: FatalCollision::Obstacle
        }));
        // No clamp: only gravity moved the avatar
        assert!((state.avatar.pos.y - (200.0 + config.gravity)).abs() < 1e-4);

        // Without protection the same contact is fatal
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        state.obstacles.insert(0, obstacle_at(70.0, 300.0, &config));
        tick(&mut state, &TickInput::default(), &config, &limits);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::Died {
                cause: FatalCollision::Obstacle,
                ..
            }
        )));
    }

    #[test]
    fn test_ceiling_death() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        state.avatar.pos.y = config.avatar_radius + 0.5;
        state.avatar.vel.y = -3.0;

        tick(&mut state, &TickInput::default(), &config, &limits);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::Died {
                cause: FatalCollision::Ceiling,
                ..
            }
        )));
    }

    #[test]
    fn test_mode_speed_scales_scroll_and_physics() {
        let config = WorldConfig::default();
        let limits = quiet_limits();

        for (effect, speed) in [(Effect::GodMode, 1.6f32), (Effect::Slow, 0.5), (Effect::Shield, 1.0)] {
            let mut state = playing_state(&config);
            block_spawner(&mut state, &config);
            state.obstacles.insert(0, obstacle_at(200.0, 150.0, &config));
            let id = state.next_entity_id();
            state.coins.push(Collectible {
                id,
                x: 250.0,
                y: 60.0,
                kind: CollectibleKind::Coin { value: 1 },
                collected: false,
                anim_ticks: 0,
            });
            state.avatar.abilities.countdowns.set(effect, 100);
            let y = state.avatar.pos.y;

            tick(&mut state, &TickInput::default(), &config, &limits);

            let step = config.world_speed * speed;
            assert!((state.obstacles[0].x - (200.0 - step)).abs() < 1e-4, "{effect:?}");
            assert!((state.coins[0].x - (250.0 - step * COIN_SCROLL)).abs() < 1e-4, "{effect:?}");
            let vy = config.gravity * speed;
            assert!((state.avatar.vel.y - vy).abs() < 1e-5, "{effect:?}");
            assert!((state.avatar.pos.y - (y + vy * speed)).abs() < 1e-4, "{effect:?}");
        }
    }

    #[test]
    fn test_shrunken_caps_trim_existing_entities() {
        let config = WorldConfig::default();
        let mut state = playing_state(&config);
        block_spawner(&mut state, &config);
        state.avatar.pos.y = 100.0;
        for i in 0..3 {
            let id = state.next_entity_id();
            state.power_ups.push(Collectible {
                id,
                x: 260.0 + 10.0 * i as f32,
                y: 380.0,
                kind: CollectibleKind::PowerUp(PowerUpKind::Magnet),
                collected: false,
                anim_ticks: 0,
            });
        }
        lifecycle::emit_burst(&mut state, ParticleKind::Explosion, Vec2::new(150.0, 150.0), 300);
        assert_eq!(state.particles.len(), 20);

        let shrunk = TierLimits {
            max_particles: 0,
            ..quiet_limits_for(PerformanceTier::Low)
        };
        tick(&mut state, &TickInput::default(), &config, &shrunk);
        assert!(state.particles.is_empty());
        assert_eq!(state.power_ups.len(), 1);
        // Newest survives
        assert_eq!(state.power_ups[0].y, 380.0);
        assert!(state.power_ups[0].x > 275.0);
    }

    #[test]
    fn test_paused_is_inert() {
        let config = WorldConfig::default();
        let limits = quiet_limits();
        let mut state = playing_state(&config);
        state.phase = GamePhase::Paused;
        tick(&mut state, &TickInput { jump: true, shoot: true }, &config, &limits);
        assert_eq!(state.time_ticks, 0);
        assert!(state.events.is_empty());
        assert!(state.projectiles.is_empty());
    }
}
