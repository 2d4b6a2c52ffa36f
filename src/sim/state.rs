//! Game state and core simulation types
//!
//! Everything one session mutates lives in [`GameState`]. Resetting a session
//! means building a fresh one.

use std::collections::BTreeSet;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::Circle;
use crate::consts::*;
use crate::{heading, unit_from_angle};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a difficulty to be picked
    Idle,
    /// Active gameplay
    Running,
    /// Shop overlay open; spawning and rounds suspended
    Paused,
    /// Run ended
    GameOver,
}

/// Difficulty presets, fixed for the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
    Veteran,
}

/// Starting values a difficulty fixes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub ammo: u32,
    pub enemy_speed: f32,
    pub spawn_count: u32,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
            Difficulty::Veteran => "veteran",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "hard" => Some(Difficulty::Hard),
            "veteran" => Some(Difficulty::Veteran),
            _ => None,
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                ammo: 10,
                enemy_speed: 1.5,
                spawn_count: 1,
            },
            Difficulty::Hard => DifficultyProfile {
                ammo: 8,
                enemy_speed: 2.0,
                spawn_count: 1,
            },
            Difficulty::Veteran => DifficultyProfile {
                ammo: 5,
                enemy_speed: 2.5,
                spawn_count: 2,
            },
        }
    }
}

/// One-shot upgrades the player can own
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Perk {
    /// Max health raised to 200
    HealthUpgrade,
}

/// Things the shop sells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purchase {
    Ammo,
    HealthPerk,
    Medkit,
}

impl Purchase {
    pub fn cost(&self) -> u32 {
        match self {
            Purchase::Ammo => AMMO_COST,
            Purchase::HealthPerk => HEALTH_PERK_COST,
            Purchase::Medkit => MEDKIT_COST,
        }
    }
}

/// The stationary player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: u32,
    pub max_health: u32,
    pub ammo: u32,
    pub money: u32,
    pub perks: BTreeSet<Perk>,
}

impl Player {
    pub fn new(pos: Vec2, ammo: u32) -> Self {
        Self {
            pos,
            radius: PLAYER_RADIUS,
            health: PLAYER_BASE_HEALTH,
            max_health: PLAYER_BASE_HEALTH,
            ammo,
            money: 0,
            perks: BTreeSet::new(),
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }

    pub fn has_perk(&self, perk: Perk) -> bool {
        self.perks.contains(&perk)
    }
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Displacement per tick, fixed at creation
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    /// Projectile leaving `origin` toward `target` at `speed` per tick
    pub fn aimed(id: u32, origin: Vec2, target: Vec2, speed: f32) -> Self {
        Self {
            id,
            pos: origin,
            vel: unit_from_angle(heading(origin, target)) * speed,
            radius: PROJECTILE_RADIUS,
        }
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// A homing enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Distance covered per tick, captured at spawn
    pub speed: f32,
    pub radius: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, speed: f32) -> Self {
        Self {
            id,
            pos,
            speed,
            radius: ENEMY_RADIUS,
        }
    }

    /// Re-aim at `target` and advance one tick
    pub fn step_toward(&mut self, target: Vec2) {
        self.pos += unit_from_angle(heading(self.pos, target)) * self.speed;
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// Round progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// Current round (1-based)
    pub round: u32,
    /// Speed given to enemies spawned from now on
    pub enemy_speed: f32,
    /// Enemies per spawn tick this round
    pub spawn_count: u32,
    /// Spawn count fixed by the difficulty
    pub base_spawn_count: u32,
}

impl RoundState {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            round: 1,
            enemy_speed: profile.enemy_speed,
            spawn_count: profile.spawn_count,
            base_spawn_count: profile.spawn_count,
        }
    }

    /// Move to the next round
    pub fn advance(&mut self) {
        self.round += 1;
        self.enemy_speed += ROUND_SPEED_STEP;
        self.spawn_count = if self.round >= SURGE_ROUND {
            self.base_spawn_count * SURGE_MULTIPLIER
        } else {
            self.base_spawn_count
        };
    }
}

/// Things that happened, for the presentation layer (sound, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Fired { projectile_id: u32 },
    EnemyKilled { enemy_id: u32, reward: u32 },
    PlayerHit { enemy_id: u32, health: u32 },
    RoundAdvanced { round: u32 },
    Purchased { item: Purchase },
    GameOver { round: u32, money: u32 },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub difficulty: Difficulty,
    pub arena: Arena,
    pub phase: GamePhase,
    pub player: Player,
    /// Live projectiles in fire order
    pub projectiles: Vec<Projectile>,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub round: RoundState,
    /// Developer override: enemies reaching the player deal no damage
    pub invincible: bool,
    pub kills: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seed the RNG started from
    pub seed: u64,
    pub rng: Pcg32,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Fresh state for a difficulty, still Idle
    pub fn new(difficulty: Difficulty, arena: Arena, seed: u64) -> Self {
        let profile = difficulty.profile();
        Self {
            difficulty,
            arena,
            phase: GamePhase::Idle,
            player: Player::new(arena.center(), profile.ammo),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            round: RoundState::new(&profile),
            invincible: false,
            kills: 0,
            time_ticks: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reserve `count` consecutive entity IDs, returning the first
    pub fn reserve_ids(&mut self, count: u32) -> u32 {
        let first = self.next_id;
        self.next_id += count;
        first
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Shop actions are open while playing or with the overlay up
    pub fn shop_open(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    /// Enter the terminal phase once health is gone. Returns false if the run
    /// is not live, the player still has health, or the run already ended.
    pub(crate) fn enter_game_over(&mut self) -> bool {
        if !self.shop_open() || self.player.health > 0 {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver {
            round: self.round.round,
            money: self.player.money,
        });
        log::info!(
            "Game over on round {} with ${} ({} kills)",
            self.round.round,
            self.player.money,
            self.kills
        );
        true
    }
}
