//! Avatar integration
//!
//! Semi-implicit Euler, one call per tick:
//! `vy += gravity * speed * skin_gravity; y += vy * speed`

use super::state::AvatarState;
use crate::config::WorldConfig;
use crate::skins::SkinCoefficients;

/// Tilt limits (radians): nose-up and nose-down
pub const MAX_TILT_UP: f32 = -0.45;
pub const MAX_TILT_DOWN: f32 = 1.4;
/// Radians of tilt per unit of vy
const TILT_PER_VY: f32 = 0.12;

/// Overwrite vertical velocity with the jump impulse
///
/// Not additive: a jump while falling fast fully resets vy.
pub fn jump(avatar: &mut AvatarState, config: &WorldConfig, skin: &SkinCoefficients) {
    avatar.vel.y = config.jump_impulse * skin.jump;
}

/// Advance the avatar by one tick
pub fn integrate(
    avatar: &mut AvatarState,
    config: &WorldConfig,
    skin: &SkinCoefficients,
    speed_multiplier: f32,
) {
    avatar.vel.y += config.gravity * speed_multiplier * skin.gravity;
    avatar.pos.y += avatar.vel.y * speed_multiplier;
    avatar.tilt = tilt_for(avatar.vel.y);
    sanitize(avatar, config);
}

/// Presentation tilt for a vertical velocity
#[inline]
pub fn tilt_for(vy: f32) -> f32 {
    (vy * TILT_PER_VY).clamp(MAX_TILT_UP, MAX_TILT_DOWN)
}

/// Non-finite state is a programmer error: panic in debug, recover in release
pub fn sanitize(avatar: &mut AvatarState, config: &WorldConfig) {
    let finite = avatar.pos.is_finite() && avatar.vel.is_finite();
    debug_assert!(finite, "non-finite avatar state: {:?}", avatar);
    if !finite {
        log::warn!("Non-finite avatar state {:?}, recentering", avatar.pos);
        avatar.pos.x = config.avatar_x;
        avatar.pos.y = config.floor_y() / 2.0;
        avatar.vel = glam::Vec2::ZERO;
        avatar.tilt = 0.0;
    }
}
