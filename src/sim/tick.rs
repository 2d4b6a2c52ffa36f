//! Fixed timestep simulation tick
//!
//! One tick moves projectiles, resolves hits, then walks the horde toward the
//! player. Spawning and round escalation run on their own timers.

use super::collision::intersects;
use super::economy;
use super::state::GameState;

/// Advance the game state by one tick
pub fn tick(state: &mut GameState) {
    // Only Running mutates; Paused frames still render
    if !state.is_running() {
        return;
    }

    state.time_ticks += 1;

    advance_projectiles(state);
    resolve_projectile_hits(state);
    advance_enemies(state);
}

/// Move projectiles and drop the ones that left the arena
fn advance_projectiles(state: &mut GameState) {
    let arena = state.arena;
    for projectile in &mut state.projectiles {
        projectile.pos += projectile.vel;
    }
    state.projectiles.retain(|p| arena.contains(p.pos));
}

/// Each projectile kills at most one enemy, the first one in spawn order
fn resolve_projectile_hits(state: &mut GameState) {
    let enemies = &mut state.enemies;
    let mut killed = Vec::new();

    state.projectiles.retain(|projectile| {
        let hit = enemies
            .iter()
            .position(|enemy| intersects(projectile.circle(), enemy.circle()));
        match hit {
            Some(index) => {
                killed.push(enemies.remove(index).id);
                false
            }
            None => true,
        }
    });

    for enemy_id in killed {
        economy::reward_kill(state, enemy_id);
    }
}

/// Home every enemy on the player; contact removes the enemy and hurts
fn advance_enemies(state: &mut GameState) {
    let target = state.player.pos;
    let player = state.player.circle();

    let mut i = 0;
    while i < state.enemies.len() {
        let enemy = &mut state.enemies[i];
        enemy.step_toward(target);
        if !intersects(enemy.circle(), player) {
            i += 1;
            continue;
        }

        let enemy = state.enemies.remove(i);
        if economy::apply_contact_damage(state, enemy.id) {
            // Run is over; leave the rest of the horde where it stands
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::arena::Arena;
    use crate::sim::state::{Difficulty, Enemy, GameEvent, GamePhase, Projectile};
    use glam::Vec2;

    fn running() -> GameState {
        let mut state = GameState::new(Difficulty::Easy, Arena::new(800.0, 600.0), 42);
        state.phase = GamePhase::Running;
        state
    }

    fn add_enemy(state: &mut GameState, pos: Vec2, speed: f32) -> u32 {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, pos, speed));
        id
    }

    fn add_projectile(state: &mut GameState, pos: Vec2, vel: Vec2) {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
        });
    }

    #[test]
    fn test_tick_noop_unless_running() {
        let mut state = running();
        add_enemy(&mut state, Vec2::new(0.0, 300.0), 1.5);
        state.phase = GamePhase::Paused;
        tick(&mut state);
        assert_eq!(state.enemies[0].pos, Vec2::new(0.0, 300.0));
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_projectile_moves_and_leaves_arena() {
        let mut state = running();
        add_projectile(&mut state, Vec2::new(795.0, 300.0), Vec2::new(7.0, 0.0));
        add_projectile(&mut state, Vec2::new(400.0, 300.0), Vec2::new(7.0, 0.0));
        tick(&mut state);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].pos, Vec2::new(407.0, 300.0));
    }

    #[test]
    fn test_projectile_kills_first_enemy_only() {
        let mut state = running();
        // Two enemies stacked on the projectile's path
        let first = add_enemy(&mut state, Vec2::new(110.0, 100.0), 0.0);
        let second = add_enemy(&mut state, Vec2::new(112.0, 100.0), 0.0);
        add_projectile(&mut state, Vec2::new(100.0, 100.0), Vec2::new(7.0, 0.0));

        resolve_after_move(&mut state);

        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, second);
        assert_eq!(state.player.money, KILL_REWARD);
        assert!(
            state
                .events
                .contains(&GameEvent::EnemyKilled { enemy_id: first, reward: KILL_REWARD })
        );
    }

    fn resolve_after_move(state: &mut GameState) {
        advance_projectiles(state);
        resolve_projectile_hits(state);
    }

    #[test]
    fn test_n_kills_pay_ten_each() {
        let mut state = running();
        for i in 0..4 {
            let y = 50.0 + i as f32 * 100.0;
            add_enemy(&mut state, Vec2::new(60.0, y), 0.0);
            add_projectile(&mut state, Vec2::new(40.0, y), Vec2::new(7.0, 0.0));
        }
        tick(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.money, 4 * KILL_REWARD);
        assert_eq!(state.kills, 4);
    }

    #[test]
    fn test_enemy_contact_damages_and_removes() {
        let mut state = running();
        // 36 away: after a 1.5 step it is inside 15 + 20
        add_enemy(&mut state, Vec2::new(436.0, 300.0), 1.5);
        tick(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health, 100 - CONTACT_DAMAGE);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_fatal_hit_stops_sweep() {
        let mut state = running();
        state.player.health = 20;
        let killer = add_enemy(&mut state, Vec2::new(436.0, 300.0), 1.5);
        let bystander = add_enemy(&mut state, Vec2::new(364.0, 300.0), 1.5);

        tick(&mut state);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.player.health, 0);
        assert!(state.enemies.iter().all(|e| e.id != killer));
        // Sweep ended before the second enemy moved or hit
        let rest = state.enemies.iter().find(|e| e.id == bystander).map(|e| e.pos);
        assert_eq!(rest, Some(Vec2::new(364.0, 300.0)));

        let ticks = state.time_ticks;
        tick(&mut state);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_invincible_player_still_clears_contact() {
        let mut state = running();
        state.invincible = true;
        add_enemy(&mut state, Vec2::new(436.0, 300.0), 1.5);
        tick(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.health, 100);
    }

    #[test]
    fn test_enemies_home_on_player() {
        let mut state = running();
        add_enemy(&mut state, Vec2::new(400.0, 0.0), 2.0);
        for _ in 0..10 {
            tick(&mut state);
        }
        let e = &state.enemies[0];
        assert!((e.pos.x - 400.0).abs() < 1e-3);
        assert!((e.pos.y - 20.0).abs() < 1e-3);
    }
}
