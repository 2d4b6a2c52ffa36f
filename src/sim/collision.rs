//! Collision detection
//!
//! Everything in the arena is a circle, so one overlap test covers
//! projectile-vs-enemy and enemy-vs-player.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A collision circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// True iff the distance between centers is strictly less than the sum of radii.
///
/// Circles that exactly touch do not intersect.
#[inline]
pub fn intersects(a: Circle, b: Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}
