//! Arena geometry
//!
//! The arena is an axis-aligned rectangle with its origin at the top-left
//! corner. Enemies enter from its four edges, projectiles die when they leave it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The bounded play field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the arena (where the player stands)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Inclusive bounds check; points on the border are still inside
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= 0.0 && point.x <= self.width && point.y >= 0.0 && point.y <= self.height
    }
}

/// One of the four arena edges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Length of this edge in the given arena
    pub fn length(&self, arena: &Arena) -> f32 {
        match self {
            Edge::Top | Edge::Bottom => arena.width,
            Edge::Left | Edge::Right => arena.height,
        }
    }

    /// Point on this edge at distance `along` from its start.
    ///
    /// Horizontal edges run left to right, vertical edges top to bottom.
    pub fn point_on(&self, arena: &Arena, along: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(along, 0.0),
            Edge::Right => Vec2::new(arena.width, along),
            Edge::Bottom => Vec2::new(along, arena.height),
            Edge::Left => Vec2::new(0.0, along),
        }
    }
}
