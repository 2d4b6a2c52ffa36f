//! Game session
//!
//! A [`Session`] owns everything one play-through touches: the game state,
//! the periodic timers and the queue of inbound commands. The host drives it
//! by calling [`Session::frame`] with a monotonic clock and keeps scheduling
//! frames while it returns [`FrameStatus::Continue`].

use std::collections::VecDeque;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::economy;
use crate::sim::{
    Arena, Difficulty, Enemy, GameEvent, GamePhase, GameState, Player, Projectile, Purchase,
    RoundState, spawn_wave, tick,
};
use crate::timer::Timers;
use crate::tuning::Tuning;

/// Inbound events from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Begin a run (only from Idle)
    Start(Difficulty),
    /// Start over with the same difficulty
    Restart,
    /// Abandon the run and go back to difficulty selection
    ChangeDifficulty,
    /// Single shot toward a point
    Fire { x: f32, y: f32 },
    /// Fire now and keep firing at the rapid-fire cadence
    HoldFire { x: f32, y: f32 },
    ReleaseFire,
    BuyAmmo,
    BuyHealthPerk,
    BuyMedkit,
    /// Shop overlay: pauses spawning, rounds and motion
    OpenShop,
    CloseShop,
    DevToggleInvincibility,
    DevSetAmmo(u32),
    DevAddCurrency(u32),
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Halted,
}

/// Read-only view handed to the renderer once per frame
#[derive(Debug, Clone, Copy)]
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub arena: Arena,
    pub player: &'a Player,
    pub projectiles: &'a [Projectile],
    pub enemies: &'a [Enemy],
    pub round: &'a RoundState,
}

/// Draw-only outbound surface
pub trait Renderer {
    fn render(&mut self, view: &RenderView<'_>);
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub round: u32,
    pub money: u32,
    pub kills: u32,
    pub health: u32,
    pub ticks: u64,
}

/// One play session
pub struct Session {
    tuning: Tuning,
    state: GameState,
    timers: Timers,
    queue: VecDeque<Command>,
    accumulator: f64,
    last_time: Option<f64>,
    /// Held fire target for rapid fire
    aim: Option<Vec2>,
}

impl Session {
    pub fn new(tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        let seed = Self::pick_seed(&tuning);
        Self {
            state: GameState::new(Difficulty::default(), tuning.arena(), seed),
            timers: Timers::new(
                tuning.spawn_interval_ms,
                tuning.round_interval_ms,
                tuning.rapid_fire_interval_ms,
            ),
            tuning,
            queue: VecDeque::new(),
            accumulator: 0.0,
            last_time: None,
            aim: None,
        }
    }

    fn pick_seed(tuning: &Tuning) -> u64 {
        tuning.seed.unwrap_or_else(|| rand::rng().random())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Queue a command for the next frame
    pub fn push(&mut self, command: Command) {
        self.queue.push_back(command);
    }

    /// Apply a command now. Returns false when it was rejected.
    pub fn handle(&mut self, command: Command, now: f64) -> bool {
        match command {
            Command::Start(difficulty) => {
                if self.state.phase != GamePhase::Idle {
                    return false;
                }
                self.begin(difficulty, now);
                true
            }
            Command::Restart => {
                if self.state.phase == GamePhase::Idle {
                    return false;
                }
                self.begin(self.state.difficulty, now);
                true
            }
            Command::ChangeDifficulty => {
                if self.state.phase == GamePhase::Idle {
                    return false;
                }
                self.reset_to(self.state.difficulty);
                log::info!("Back to difficulty selection");
                true
            }
            Command::Fire { x, y } => economy::fire(&mut self.state, Vec2::new(x, y)),
            Command::HoldFire { x, y } => {
                if !self.state.is_running() {
                    return false;
                }
                let target = Vec2::new(x, y);
                self.aim = Some(target);
                self.timers.rapid_fire.arm(now);
                economy::fire(&mut self.state, target)
            }
            Command::ReleaseFire => {
                let held = self.aim.take().is_some() || self.timers.rapid_fire.is_armed();
                self.timers.rapid_fire.cancel();
                held
            }
            Command::BuyAmmo => economy::buy(&mut self.state, Purchase::Ammo),
            Command::BuyHealthPerk => economy::buy(&mut self.state, Purchase::HealthPerk),
            Command::BuyMedkit => economy::buy(&mut self.state, Purchase::Medkit),
            Command::OpenShop => self.pause(now),
            Command::CloseShop => self.resume(now),
            Command::DevToggleInvincibility => economy::dev_toggle_invincibility(&mut self.state),
            Command::DevSetAmmo(ammo) => economy::dev_set_ammo(&mut self.state, ammo),
            Command::DevAddCurrency(amount) => economy::dev_add_currency(&mut self.state, amount),
        }
    }

    /// Run one frame: drain commands, fire due timers, step the simulation
    /// and render.
    pub fn frame(&mut self, now: f64, renderer: &mut impl Renderer) -> FrameStatus {
        while let Some(command) = self.queue.pop_front() {
            self.handle(command, now);
        }

        let status = match self.state.phase {
            GamePhase::Idle | GamePhase::Paused => {
                self.last_time = Some(now);
                FrameStatus::Continue
            }
            GamePhase::GameOver => FrameStatus::Halted,
            GamePhase::Running => {
                self.run_timers(now);
                self.run_ticks(now);
                if self.state.phase == GamePhase::GameOver {
                    self.enter_game_over();
                    FrameStatus::Halted
                } else {
                    FrameStatus::Continue
                }
            }
        };

        renderer.render(&self.view());
        status
    }

    pub fn view(&self) -> RenderView<'_> {
        RenderView {
            phase: self.state.phase,
            arena: self.state.arena,
            player: &self.state.player,
            projectiles: &self.state.projectiles,
            enemies: &self.state.enemies,
            round: &self.state.round,
        }
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            difficulty: self.state.difficulty,
            phase: self.state.phase,
            round: self.state.round.round,
            money: self.state.player.money,
            kills: self.state.kills,
            health: self.state.player.health,
            ticks: self.state.time_ticks,
        }
    }

    /// Stop every timer after a fatal hit. Safe to call repeatedly.
    fn enter_game_over(&mut self) -> bool {
        let entered = self.state.enter_game_over();
        if self.state.phase == GamePhase::GameOver {
            self.timers.cancel_all();
            self.aim = None;
        }
        entered
    }

    /// Total re-initialization, then Running
    fn begin(&mut self, difficulty: Difficulty, now: f64) {
        self.reset_to(difficulty);
        self.state.phase = GamePhase::Running;
        self.timers.arm_gameplay(now);
        self.last_time = Some(now);
        log::info!("Starting {} run (seed {})", difficulty.as_str(), self.state.seed);
    }

    /// Fresh Idle state; all timers stopped
    fn reset_to(&mut self, difficulty: Difficulty) {
        self.timers.cancel_all();
        let seed = Self::pick_seed(&self.tuning);
        self.state = GameState::new(difficulty, self.tuning.arena(), seed);
        self.accumulator = 0.0;
        self.last_time = None;
        self.aim = None;
    }

    fn pause(&mut self, now: f64) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.state.phase = GamePhase::Paused;
        self.timers.suspend_gameplay(now);
        self.timers.rapid_fire.cancel();
        self.aim = None;
        log::info!("Shop open, game paused");
        true
    }

    fn resume(&mut self, now: f64) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        self.state.phase = GamePhase::Running;
        self.timers.resume_gameplay(now);
        self.accumulator = 0.0;
        self.last_time = Some(now);
        log::info!("Shop closed, game resumed");
        true
    }

    fn run_timers(&mut self, now: f64) {
        for _ in 0..self.timers.spawn.poll(now) {
            spawn_wave(&mut self.state);
        }
        for _ in 0..self.timers.round.poll(now) {
            economy::advance_round(&mut self.state);
        }
        let shots = self.timers.rapid_fire.poll(now);
        if let Some(target) = self.aim {
            for _ in 0..shots {
                economy::fire(&mut self.state, target);
            }
        }
    }

    /// Fixed-step accumulator; one tick at a time, never past GameOver
    fn run_ticks(&mut self, now: f64) {
        let last = self.last_time.unwrap_or(now);
        let dt = (now - last).clamp(0.0, MAX_FRAME_MS);
        self.last_time = Some(now);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.tuning.tick_ms && substeps < MAX_SUBSTEPS {
            tick(&mut self.state);
            self.accumulator -= self.tuning.tick_ms;
            substeps += 1;
            if !self.state.is_running() {
                break;
            }
        }
    }
}
