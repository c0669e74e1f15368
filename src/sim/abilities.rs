//! Timed abilities and power-up combos
//!
//! Every effect is a tick countdown. A pickup either opens a combo window or,
//! if one is already open, may complete a recipe with the previous pickup.
//! Combos replace the second pickup's own effect.

use serde::{Deserialize, Serialize};

use crate::skins::SkinCoefficients;

/// Ticks a pickup keeps the combo window open
pub const COMBO_WINDOW_TICKS: u32 = 180;

/// Standalone durations (ticks)
pub const SHIELD_TICKS: u32 = 300;
pub const SLOW_TICKS: u32 = 300;
pub const MAGNET_TICKS: u32 = 420;
pub const DOUBLE_POINTS_TICKS: u32 = 480;
pub const RAINBOW_TICKS: u32 = 360;

/// Combo durations (ticks)
pub const SUPER_TICKS: u32 = 600;
pub const MEGA_TICKS: u32 = 480;
pub const GOD_TICKS: u32 = 900;

/// Star bonus points by tier
pub const STAR_BONUS_BASE: u64 = 5;
pub const STAR_BONUS_DOUBLE: u64 = 10;
pub const STAR_BONUS_MEGA: u64 = 15;

/// Named countdown slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    Shield,
    Slow,
    Magnet,
    DoublePoints,
    Rainbow,
    ComboWindow,
    SuperMode,
    MegaMode,
    GodMode,
}

impl Effect {
    pub const COUNT: usize = 9;
    pub const ALL: [Effect; Effect::COUNT] = [
        Effect::Shield,
        Effect::Slow,
        Effect::Magnet,
        Effect::DoublePoints,
        Effect::Rainbow,
        Effect::ComboWindow,
        Effect::SuperMode,
        Effect::MegaMode,
        Effect::GodMode,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Fixed set of effect countdowns, one slot per [`Effect`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdowns {
    ticks: [u32; Effect::COUNT],
}

impl Countdowns {
    #[inline]
    pub fn get(&self, effect: Effect) -> u32 {
        self.ticks[effect.index()]
    }

    /// Overwrite a countdown (durations reset, they never stack)
    #[inline]
    pub fn set(&mut self, effect: Effect, ticks: u32) {
        self.ticks[effect.index()] = ticks;
    }

    #[inline]
    pub fn is_active(&self, effect: Effect) -> bool {
        self.get(effect) > 0
    }

    /// Advance every countdown by one tick, clamped at zero
    pub fn tick_down(&mut self) {
        for t in self.ticks.iter_mut() {
            *t = t.saturating_sub(1);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Effect, u32)> + '_ {
        Effect::ALL.iter().map(|&e| (e, self.get(e)))
    }

    /// Effects with time remaining
    pub fn active(&self) -> impl Iterator<Item = (Effect, u32)> + '_ {
        self.iter().filter(|(_, t)| *t > 0)
    }
}

/// Power-up kinds that can spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Shield,
    Slow,
    Magnet,
    DoublePoints,
    Rainbow,
    /// Instant score bonus
    Star,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Shield,
        PowerUpKind::Slow,
        PowerUpKind::Magnet,
        PowerUpKind::DoublePoints,
        PowerUpKind::Rainbow,
        PowerUpKind::Star,
    ];

    /// Countdown slot and base duration for timed kinds; `None` for Star
    pub fn timed_effect(self) -> Option<(Effect, u32)> {
        match self {
            PowerUpKind::Shield => Some((Effect::Shield, SHIELD_TICKS)),
            PowerUpKind::Slow => Some((Effect::Slow, SLOW_TICKS)),
            PowerUpKind::Magnet => Some((Effect::Magnet, MAGNET_TICKS)),
            PowerUpKind::DoublePoints => Some((Effect::DoublePoints, DOUBLE_POINTS_TICKS)),
            PowerUpKind::Rainbow => Some((Effect::Rainbow, RAINBOW_TICKS)),
            PowerUpKind::Star => None,
        }
    }
}

/// Combined effects unlocked by two pickups inside the combo window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combo {
    /// shield + slow
    Super,
    /// magnet + double points
    Mega,
    /// rainbow + shield
    God,
}

const COMBO_RECIPES: [(PowerUpKind, PowerUpKind, Combo); 3] = [
    (PowerUpKind::Shield, PowerUpKind::Slow, Combo::Super),
    (PowerUpKind::Magnet, PowerUpKind::DoublePoints, Combo::Mega),
    (PowerUpKind::Rainbow, PowerUpKind::Shield, Combo::God),
];

/// Recipe for an unordered pair of kinds
pub fn combo_for(a: PowerUpKind, b: PowerUpKind) -> Option<Combo> {
    COMBO_RECIPES
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, combo)| *combo)
}

impl Combo {
    fn apply(self, countdowns: &mut Countdowns) {
        match self {
            Combo::Super => {
                countdowns.set(Effect::SuperMode, SUPER_TICKS);
                countdowns.set(Effect::Shield, SUPER_TICKS);
            }
            Combo::Mega => {
                countdowns.set(Effect::MegaMode, MEGA_TICKS);
                countdowns.set(Effect::Magnet, MEGA_TICKS);
                // Mega supersedes double points
                countdowns.set(Effect::DoublePoints, 0);
            }
            Combo::God => {
                countdowns.set(Effect::GodMode, GOD_TICKS);
                countdowns.set(Effect::Rainbow, GOD_TICKS);
                countdowns.set(Effect::Shield, GOD_TICKS);
            }
        }
    }
}

/// Mode that drives the speed multiplier, highest priority first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActiveMode {
    God,
    Super,
    Rainbow,
    Slow,
    Normal,
}

impl ActiveMode {
    /// Global speed multiplier for physics and scrolling
    pub fn speed_multiplier(self) -> f32 {
        match self {
            ActiveMode::God => 1.6,
            ActiveMode::Super => 1.4,
            ActiveMode::Rainbow => 1.25,
            ActiveMode::Slow => 0.5,
            ActiveMode::Normal => 1.0,
        }
    }
}

/// What a pickup did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    Combo(Combo),
    Timed { effect: Effect, ticks: u32 },
    Bonus(u64),
}

/// Countdowns plus the combo memory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    pub countdowns: Countdowns,
    pub last_power_up: Option<PowerUpKind>,
}

impl Abilities {
    pub fn active_mode(&self) -> ActiveMode {
        let c = &self.countdowns;
        if c.is_active(Effect::GodMode) {
            ActiveMode::God
        } else if c.is_active(Effect::SuperMode) {
            ActiveMode::Super
        } else if c.is_active(Effect::Rainbow) {
            ActiveMode::Rainbow
        } else if c.is_active(Effect::Slow) {
            ActiveMode::Slow
        } else {
            ActiveMode::Normal
        }
    }

    /// Magnet, double points and mega never protect on their own
    pub fn invulnerable(&self) -> bool {
        let c = &self.countdowns;
        c.is_active(Effect::Shield)
            || c.is_active(Effect::Rainbow)
            || c.is_active(Effect::SuperMode)
            || c.is_active(Effect::GodMode)
    }

    /// Score multiplier for passed obstacles and coin values
    pub fn score_multiplier(&self) -> u64 {
        if self.countdowns.is_active(Effect::MegaMode) {
            3
        } else if self.countdowns.is_active(Effect::DoublePoints) {
            2
        } else {
            1
        }
    }

    fn star_bonus(&self) -> u64 {
        if self.countdowns.is_active(Effect::MegaMode) {
            STAR_BONUS_MEGA
        } else if self.countdowns.is_active(Effect::DoublePoints) {
            STAR_BONUS_DOUBLE
        } else {
            STAR_BONUS_BASE
        }
    }

    /// Resolve a power-up pickup
    pub fn on_pickup(&mut self, kind: PowerUpKind, skin: &SkinCoefficients) -> PickupOutcome {
        if self.countdowns.is_active(Effect::ComboWindow) {
            if let Some(combo) = self.last_power_up.and_then(|last| combo_for(last, kind)) {
                combo.apply(&mut self.countdowns);
                self.countdowns.set(Effect::ComboWindow, 0);
                self.last_power_up = None;
                log::debug!("Combo {:?} triggered by {:?}", combo, kind);
                return PickupOutcome::Combo(combo);
            }
        }

        let outcome = match kind.timed_effect() {
            Some((effect, base)) => {
                let ticks = if effect == Effect::Shield {
                    (base as f32 * skin.shield).round() as u32
                } else {
                    base
                };
                self.countdowns.set(effect, ticks);
                PickupOutcome::Timed { effect, ticks }
            }
            None => PickupOutcome::Bonus(self.star_bonus()),
        };

        self.last_power_up = Some(kind);
        self.countdowns.set(Effect::ComboWindow, COMBO_WINDOW_TICKS);
        outcome
    }

    /// End-of-tick countdown step
    pub fn tick_down(&mut self) {
        self.countdowns.tick_down();
    }
}
