//! Horde Hold entry point
//!
//! Native headless host: plays one run with a simple autopilot on a simulated
//! 60 Hz clock and prints the run summary as JSON.
//!
//! Usage: `horde-hold [easy|hard|veteran] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use glam::Vec2;
    use horde_hold::consts::{HEALTH_PERK_COST, MEDKIT_COST};
    use horde_hold::sim::{Difficulty, GameEvent, GamePhase, GameState, Perk};
    use horde_hold::{Command, FrameStatus, RenderView, Renderer, Session, Tuning};

    /// Ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;
    /// Frames between autopilot shots
    const FIRE_COOLDOWN_FRAMES: u64 = 12;

    /// Logs one status line per simulated second
    struct LogRenderer {
        frames: u64,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, view: &RenderView<'_>) {
            self.frames += 1;
            if !self.frames.is_multiple_of(60) {
                return;
            }
            log::info!(
                "[{:>5}s] round {} | hp {}/{} | ammo {} | ${} | {} enemies, {} shots | {:?}",
                self.frames / 60,
                view.round.round,
                view.player.health,
                view.player.max_health,
                view.player.ammo,
                view.player.money,
                view.enemies.len(),
                view.projectiles.len(),
                view.phase
            );
        }
    }

    /// Picks commands from the current state
    struct Autopilot {
        cooldown: u64,
    }

    impl Autopilot {
        fn decide(&mut self, state: &GameState) -> Vec<Command> {
            let mut commands = Vec::new();
            if state.phase != GamePhase::Running {
                return commands;
            }
            let player = &state.player;

            if player.health * 2 < player.max_health {
                if !player.has_perk(Perk::HealthUpgrade) && player.money >= HEALTH_PERK_COST {
                    commands.push(Command::BuyHealthPerk);
                } else if player.money >= MEDKIT_COST {
                    commands.push(Command::BuyMedkit);
                }
            }
            if player.ammo == 0 {
                commands.push(Command::BuyAmmo);
            }

            self.cooldown = self.cooldown.saturating_sub(1);
            if self.cooldown == 0 {
                if let Some(target) = nearest_enemy(state) {
                    commands.push(Command::Fire {
                        x: target.x,
                        y: target.y,
                    });
                    self.cooldown = FIRE_COOLDOWN_FRAMES;
                }
            }
            commands
        }
    }

    fn nearest_enemy(state: &GameState) -> Option<Vec2> {
        let center = state.player.pos;
        state
            .enemies
            .iter()
            .map(|e| e.pos)
            .min_by(|a, b| {
                a.distance_squared(center)
                    .partial_cmp(&b.distance_squared(center))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    pub fn run() {
        let mut args = std::env::args().skip(1);
        let difficulty = match args.next() {
            Some(name) => Difficulty::parse(&name).unwrap_or_else(|| {
                log::warn!("Unknown difficulty '{}', using easy", name);
                Difficulty::Easy
            }),
            None => Difficulty::Easy,
        };
        let tuning = match args.next() {
            Some(path) => Tuning::load(Path::new(&path)),
            None => Tuning::default(),
        };

        let frame_ms = tuning.tick_ms;
        let mut session = Session::new(tuning);
        let mut renderer = LogRenderer { frames: 0 };
        let mut autopilot = Autopilot { cooldown: 0 };

        let mut now = 0.0;
        session.push(Command::Start(difficulty));

        for _ in 0..MAX_FRAMES {
            for command in autopilot.decide(session.state()) {
                session.push(command);
            }
            let status = session.frame(now, &mut renderer);

            for event in session.drain_events() {
                match event {
                    GameEvent::RoundAdvanced { round } => log::info!("Round {} begins", round),
                    GameEvent::PlayerHit { health, .. } => log::debug!("Hit! {} hp left", health),
                    GameEvent::Purchased { item } => log::debug!("Bought {:?}", item),
                    _ => {}
                }
            }

            if status == FrameStatus::Halted {
                break;
            }
            now += frame_ms;
        }

        match serde_json::to_string_pretty(&session.summary()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not encode run summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Horde Hold (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `Session` directly
}
