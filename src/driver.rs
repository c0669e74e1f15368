//! Frame-paced game loop driver
//!
//! The host calls [`GameDriver::frame`] once per display refresh. At most one
//! simulation tick runs per call, and only when at least one tick interval of
//! wall-clock time has passed since the last accepted tick. Rendering reads
//! the state through shared borrows between frames.

use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use crate::config::WorldConfig;
use crate::consts::*;
use crate::error::{Result, SkyhopError};
use crate::settings::Settings;
use crate::sim::{ActiveMode, Countdowns, GameEvent, GamePhase, SimulationState, TickInput, tick};
use crate::skins;

/// Wall-clock rate limiter for discrete inputs
#[derive(Debug, Clone)]
pub struct Cooldown {
    period: Duration,
    last: Option<Instant>,
}

impl Cooldown {
    pub fn new(period: Duration) -> Self {
        Self { period, last: None }
    }

    /// Accept if the period has elapsed since the last accepted request
    pub fn try_accept(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.period => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Copyable counters for HUD/UI, taken after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub coins: u64,
    pub mode: ActiveMode,
    pub invulnerable: bool,
    pub countdowns: Countdowns,
    pub obstacles: usize,
    pub power_ups: usize,
    pub coins_alive: usize,
    pub particles: usize,
}

/// Owns the simulation and everything that feeds it
pub struct GameDriver {
    config: WorldConfig,
    settings: Settings,
    state: SimulationState,
    jump_gate: Cooldown,
    shoot_gate: Cooldown,
    pending: TickInput,
    tick_interval: Duration,
    last_tick: Option<Instant>,
    /// Phase to return to on resume
    resume_phase: Option<GamePhase>,
    fault: Option<SkyhopError>,
}

impl GameDriver {
    pub fn new(config: WorldConfig, settings: Settings) -> Result<Self> {
        let state = SimulationState::new(&config, settings.biome, skins::coefficients_for(&settings.skin));
        Self::with_state(config, settings, state)
    }

    /// Drive an existing state (e.g. one built with a fixed seed)
    pub fn with_state(config: WorldConfig, settings: Settings, state: SimulationState) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Session: tier={}, biome={:?}, skin={}",
            settings.tier.as_str(),
            settings.biome,
            settings.skin
        );
        Ok(Self {
            config,
            settings,
            state,
            jump_gate: Cooldown::new(JUMP_COOLDOWN),
            shoot_gate: Cooldown::new(SHOOT_RELOAD),
            pending: TickInput::default(),
            tick_interval: TICK_INTERVAL,
            last_tick: None,
            resume_phase: None,
            fault: None,
        })
    }

    /// Debounced jump; requests inside the cooldown are dropped
    pub fn request_jump(&mut self, now: Instant) -> bool {
        if !matches!(self.state.phase, GamePhase::Ready | GamePhase::Playing) {
            return false;
        }
        if !self.jump_gate.try_accept(now) {
            return false;
        }
        self.pending.jump = true;
        true
    }

    /// Reload-gated shot
    pub fn request_shoot(&mut self, now: Instant) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        if !self.shoot_gate.try_accept(now) {
            return false;
        }
        self.pending.shoot = true;
        true
    }

    /// Run at most one tick; returns whether a tick ran
    pub fn frame(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.tick_interval {
                return false;
            }
        }
        self.last_tick = Some(now);

        let input = std::mem::take(&mut self.pending);
        // Limits are re-read every tick so tier changes apply immediately
        let limits = self.settings.limits();
        let backup = self.state.clone();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            tick(&mut self.state, &input, &self.config, &limits);
        }));
        if let Err(payload) = result {
            self.recover(backup, panic_message(payload.as_ref()));
        }
        true
    }

    /// Roll back to the pre-tick state and park in a safe pause
    fn recover(&mut self, backup: SimulationState, message: String) {
        let failed = &self.state;
        log::error!(
            "Tick {} panicked: {} (phase={:?}, score={}, abilities={:?}, obstacles={}, power_ups={}, coins={}, particles={})",
            backup.time_ticks + 1,
            message,
            backup.phase,
            backup.score,
            backup.avatar.abilities.countdowns.active().collect::<Vec<_>>(),
            failed.obstacles.len(),
            failed.power_ups.len(),
            failed.coins.len(),
            failed.particles.len(),
        );

        self.state = backup;
        self.state.events.clear();
        self.state.phase = GamePhase::Paused;
        self.resume_phase = None;
        self.pending = TickInput::default();
        self.fault = Some(SkyhopError::TickPanicked {
            tick: self.state.time_ticks + 1,
            message,
        });
    }

    pub fn pause(&mut self) {
        if matches!(self.state.phase, GamePhase::Ready | GamePhase::Playing) {
            self.resume_phase = Some(self.state.phase);
            self.state.phase = GamePhase::Paused;
            log::info!("Paused");
        }
    }

    /// Resume a player pause; a faulted session needs [`Self::restart`]
    pub fn resume(&mut self) -> bool {
        if self.fault.is_some() || self.state.phase != GamePhase::Paused {
            return false;
        }
        match self.resume_phase.take() {
            Some(phase) => {
                self.state.phase = phase;
                self.last_tick = None;
                log::info!("Resumed");
                true
            }
            None => false,
        }
    }

    /// Start a fresh run (also clears a fault)
    pub fn restart(&mut self) {
        self.state.skin = skins::coefficients_for(&self.settings.skin);
        self.state.biome = self.settings.biome;
        self.state.reset(&self.config);
        self.pending = TickInput::default();
        self.jump_gate.reset();
        self.shoot_gate.reset();
        self.last_tick = None;
        self.resume_phase = None;
        if let Some(fault) = self.fault.take() {
            log::info!("Restarting after fault: {}", fault);
        } else {
            log::info!("Restarting");
        }
    }

    /// Read-only view for the renderer
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Events from the most recent tick
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn hud(&self) -> HudSnapshot {
        let s = &self.state;
        HudSnapshot {
            tick: s.time_ticks,
            phase: s.phase,
            score: s.score,
            coins: s.coins_collected,
            mode: s.avatar.abilities.active_mode(),
            invulnerable: s.avatar.abilities.invulnerable(),
            countdowns: s.avatar.abilities.countdowns,
            obstacles: s.obstacles.len(),
            power_ups: s.power_ups.len(),
            coins_alive: s.coins.len(),
            particles: s.particles.len(),
        }
    }

    pub fn fault(&self) -> Option<&SkyhopError> {
        self.fault.as_ref()
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Tier and particle changes take effect on the next tick
    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
