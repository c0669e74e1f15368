//! Circle / rectangle primitives
//!
//! Screen-space coordinates: x grows right, y grows down.

use glam::Vec2;

/// A circle (the avatar's collision shape, pickups, projectiles)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.radius
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.radius
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.radius
    }

    /// True if `point` is strictly closer than `range` to the centre
    #[inline]
    pub fn within_range(&self, point: Vec2, range: f32) -> bool {
        self.center.distance_squared(point) < range * range
    }

    /// Circle vs rectangle overlap (closest-point test, touching counts)
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        let closest = self.center.clamp(rect.min, rect.max);
        self.center.distance_squared(closest) <= self.radius * self.radius
    }
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle with zero or negative extent on either axis
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.max.x <= self.min.x || self.max.y <= self.min.y
    }
}

/// Closed 1D interval overlap: `[a0, a1]` vs `[b0, b1]`
#[inline]
pub fn spans_overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> bool {
    a0 <= b1 && b0 <= a1
}
