//! Simulation module
//!
//! All gameplay logic lives here. No rendering, no clocks:
//! - One tick is one fixed step
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod arena;
pub mod collision;
pub mod economy;
pub mod spawner;
pub mod state;
pub mod tick;

pub use arena::{Arena, Edge};
pub use collision::{Circle, intersects};
pub use spawner::{spawn_batch, spawn_enemy, spawn_wave};
pub use state::{
    Difficulty, DifficultyProfile, Enemy, GameEvent, GamePhase, GameState, Perk, Player,
    Projectile, Purchase, RoundState,
};
pub use tick::tick;
