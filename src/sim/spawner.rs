//! Enemy spawning
//!
//! Enemies appear at a random point on a random arena edge and carry the
//! round speed that was current when they spawned.

use rand::Rng;

use super::arena::{Arena, Edge};
use super::state::{Enemy, GameState, RoundState};

/// Create one enemy on a uniformly chosen edge
pub fn spawn_enemy(id: u32, arena: &Arena, speed: f32, rng: &mut impl Rng) -> Enemy {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let along = rng.random::<f32>() * edge.length(arena);
    Enemy::new(id, edge.point_on(arena, along), speed)
}

/// Enemies for one spawn tick, with consecutive ids from `first_id`
pub fn spawn_batch(
    round: &RoundState,
    arena: &Arena,
    rng: &mut impl Rng,
    first_id: u32,
) -> Vec<Enemy> {
    (0..round.spawn_count)
        .map(|i| spawn_enemy(first_id + i, arena, round.enemy_speed, rng))
        .collect()
}

/// Spawn a batch into the live state. Returns the number spawned.
pub fn spawn_wave(state: &mut GameState) -> usize {
    if !state.is_running() {
        return 0;
    }
    let first_id = state.reserve_ids(state.round.spawn_count);
    let batch = spawn_batch(&state.round, &state.arena, &mut state.rng, first_id);
    let count = batch.len();
    state.enemies.extend(batch);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Difficulty, GamePhase};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn on_border(arena: &Arena, e: &Enemy) -> bool {
        let p = e.pos;
        let on_x_edge = (p.x == 0.0 || p.x == arena.width) && p.y >= 0.0 && p.y < arena.height;
        let on_y_edge = (p.y == 0.0 || p.y == arena.height) && p.x >= 0.0 && p.x < arena.width;
        on_x_edge || on_y_edge
    }

    #[test]
    fn test_spawned_enemies_start_on_border() {
        let arena = Arena::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..500 {
            let e = spawn_enemy(id, &arena, 1.5, &mut rng);
            assert!(on_border(&arena, &e), "enemy {} off border at {:?}", id, e.pos);
            assert_eq!(e.speed, 1.5);
        }
    }

    #[test]
    fn test_all_edges_used() {
        let arena = Arena::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(99);
        let mut seen = [false; 4];
        for id in 0..400 {
            let p = spawn_enemy(id, &arena, 1.0, &mut rng).pos;
            if p.y == 0.0 {
                seen[0] = true;
            } else if p.x == arena.width {
                seen[1] = true;
            } else if p.y == arena.height {
                seen[2] = true;
            } else if p.x == 0.0 {
                seen[3] = true;
            }
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_batch_size_follows_round() {
        let arena = Arena::new(800.0, 600.0);
        let mut rng = Pcg32::seed_from_u64(3);
        let mut round = RoundState::new(&Difficulty::Easy.profile());
        let batch = spawn_batch(&round, &arena, &mut rng, 1);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, 1);

        for _ in 0..5 {
            round.advance();
        }
        let batch = spawn_batch(&round, &arena, &mut rng, 10);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].id, 11);
        assert!(batch.iter().all(|e| (e.speed - round.enemy_speed).abs() < 1e-6));
    }

    #[test]
    fn test_no_spawn_unless_running() {
        let mut state = GameState::new(Difficulty::Easy, Arena::new(800.0, 600.0), 5);
        assert_eq!(spawn_wave(&mut state), 0);

        state.phase = GamePhase::Running;
        assert_eq!(spawn_wave(&mut state), 1);

        state.phase = GamePhase::Paused;
        assert_eq!(spawn_wave(&mut state), 0);

        state.phase = GamePhase::GameOver;
        assert_eq!(spawn_wave(&mut state), 0);
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_round_advance_leaves_live_enemies_alone() {
        let mut state = GameState::new(Difficulty::Easy, Arena::new(800.0, 600.0), 5);
        state.phase = GamePhase::Running;
        spawn_wave(&mut state);
        state.round.advance();
        spawn_wave(&mut state);
        assert_eq!(state.enemies[0].speed, 1.5);
        assert!(state.enemies[1].speed > state.enemies[0].speed);
    }
}
