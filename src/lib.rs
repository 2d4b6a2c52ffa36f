//! Horde Hold - a single-screen arcade survival game
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, economy, round progression)
//! - `session`: Session lifecycle, inbound commands and the render surface
//! - `timer`: Periodic timers owned by the session
//! - `tuning`: Data-driven arena and cadence configuration

pub mod session;
pub mod sim;
pub mod timer;
pub mod tuning;

pub use session::{Command, FrameStatus, RenderView, Renderer, RunSummary, Session};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one reference frame)
    pub const SIM_DT_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap the accumulator will absorb
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Default arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 15.0;
    pub const PLAYER_BASE_HEALTH: u32 = 100;

    /// Projectile defaults (speed is per tick)
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    pub const PROJECTILE_SPEED: f32 = 7.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 20.0;
    /// Damage dealt when an enemy reaches the player
    pub const CONTACT_DAMAGE: u32 = 33;

    /// Economy
    pub const KILL_REWARD: u32 = 10;
    pub const AMMO_COST: u32 = 20;
    pub const AMMO_PACK: u32 = 5;
    pub const HEALTH_PERK_COST: u32 = 200;
    pub const HEALTH_PERK_MAX_HEALTH: u32 = 200;
    pub const MEDKIT_COST: u32 = 300;

    /// Round escalation
    pub const ROUND_SPEED_STEP: f32 = 0.2;
    /// From this round on the spawn count doubles
    pub const SURGE_ROUND: u32 = 6;
    pub const SURGE_MULTIPLIER: u32 = 2;

    /// Cadences (milliseconds)
    pub const SPAWN_INTERVAL_MS: f64 = 1000.0;
    pub const ROUND_INTERVAL_MS: f64 = 85_000.0;
    pub const RAPID_FIRE_INTERVAL_MS: f64 = 150.0;
    /// Catch-up cap for a periodic timer that fell behind
    pub const MAX_TIMER_CATCHUP: u32 = 8;
}

/// Heading angle (radians) from `from` toward `to`
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector for an angle
#[inline]
pub fn unit_from_angle(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}
