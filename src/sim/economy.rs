//! Economy and progression
//!
//! Ammo, currency, health and perks. Every action here is a silent no-op when
//! it is not allowed; the returned `bool` only tells the caller whether it
//! took effect.

use glam::Vec2;

use super::state::{GameEvent, GameState, Perk, Projectile, Purchase};
use crate::consts::*;

/// Fire one projectile from the player toward `target`
pub fn fire(state: &mut GameState, target: Vec2) -> bool {
    if !state.is_running() || state.player.ammo == 0 {
        return false;
    }
    state.player.ammo -= 1;
    let id = state.next_entity_id();
    let projectile = Projectile::aimed(id, state.player.pos, target, PROJECTILE_SPEED);
    state.projectiles.push(projectile);
    state.events.push(GameEvent::Fired { projectile_id: id });
    true
}

/// Credit a kill
pub fn reward_kill(state: &mut GameState, enemy_id: u32) {
    state.kills += 1;
    state.player.money = state.player.money.saturating_add(KILL_REWARD);
    state.events.push(GameEvent::EnemyKilled {
        enemy_id,
        reward: KILL_REWARD,
    });
}

/// Buy an item from the shop
pub fn buy(state: &mut GameState, item: Purchase) -> bool {
    if !state.shop_open() {
        return false;
    }
    let cost = item.cost();
    if state.player.money < cost {
        return false;
    }

    let player = &mut state.player;
    match item {
        Purchase::Ammo => {
            player.ammo = player.ammo.saturating_add(AMMO_PACK);
        }
        Purchase::HealthPerk => {
            if !player.perks.insert(Perk::HealthUpgrade) {
                return false;
            }
            player.max_health = HEALTH_PERK_MAX_HEALTH;
            player.health = HEALTH_PERK_MAX_HEALTH;
        }
        Purchase::Medkit => {
            player.health = player.max_health;
        }
    }
    player.money -= cost;

    log::debug!("Bought {:?} for ${} (${} left)", item, cost, player.money);
    state.events.push(GameEvent::Purchased { item });
    true
}

/// An enemy reached the player. Returns true if the hit ended the run.
pub fn apply_contact_damage(state: &mut GameState, enemy_id: u32) -> bool {
    if state.invincible {
        return false;
    }
    let player = &mut state.player;
    player.health = player.health.saturating_sub(CONTACT_DAMAGE);
    let health = player.health;
    state.events.push(GameEvent::PlayerHit { enemy_id, health });

    if health == 0 {
        state.enter_game_over();
        return true;
    }
    false
}

/// Escalate to the next round
pub fn advance_round(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    state.round.advance();
    log::info!(
        "Round {}: enemy speed {:.1}, {} per spawn",
        state.round.round,
        state.round.enemy_speed,
        state.round.spawn_count
    );
    state.events.push(GameEvent::RoundAdvanced {
        round: state.round.round,
    });
    true
}

/// Developer override: toggle contact-damage immunity
pub fn dev_toggle_invincibility(state: &mut GameState) -> bool {
    if !state.shop_open() {
        return false;
    }
    state.invincible = !state.invincible;
    log::debug!("Invincibility {}", if state.invincible { "on" } else { "off" });
    true
}

/// Developer override: set the ammo count
pub fn dev_set_ammo(state: &mut GameState, ammo: u32) -> bool {
    if !state.shop_open() {
        return false;
    }
    state.player.ammo = ammo;
    log::debug!("Ammo set to {}", ammo);
    true
}

/// Developer override: add currency
pub fn dev_add_currency(state: &mut GameState, amount: u32) -> bool {
    if !state.shop_open() {
        return false;
    }
    state.player.money = state.player.money.saturating_add(amount);
    log::debug!("Added ${} (now ${})", amount, state.player.money);
    true
}
