//! Per-tick match simulation
//!
//! Advances one frame of active gameplay: player and formation movement,
//! shooting, bullet travel and collision resolution.

use super::collision::{Borders, overlaps};
use super::state::{Barrier, Bullet, MatchState, Ship};
use crate::audio::Cue;
use crate::consts::IMMUNITY_TICKS;

/// Input commands for a single tick, polled once per frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held: move left
    pub left: bool,
    /// Held: move right
    pub right: bool,
    /// Held: fire
    pub fire: bool,
    /// Pressed this tick: confirm (enter)
    pub confirm: bool,
    /// Pressed this tick: cancel/backspace
    pub cancel: bool,
    /// Pressed this tick: difficulty up
    pub difficulty_up: bool,
    /// Pressed this tick: difficulty down
    pub difficulty_down: bool,
    /// Pressed this tick: show recent vs top scores
    pub toggle_scores: bool,
    /// Letter typed this tick
    pub letter: Option<char>,
}

/// What a tick of play ended with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Continue,
    /// Last alive enemy destroyed
    Won,
    /// Player hit points reached 0
    Lost,
}

/// Result of resolving one enemy bullet against the player side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EnemyShot {
    Miss,
    Absorbed,
    Fatal,
}

/// Advance the match by one tick
pub fn tick(state: &mut MatchState, input: &TickInput, now: f64) -> MatchOutcome {
    state.immunity_ticks = state.immunity_ticks.saturating_sub(1);

    move_player(state, input);
    move_enemies(state);

    if update_enemy_fire(state, now) {
        return MatchOutcome::Lost;
    }
    if update_player_fire(state, input, now) {
        return MatchOutcome::Won;
    }
    MatchOutcome::Continue
}

/// Left/right movement, blocked while touching the side border
fn move_player(state: &mut MatchState, input: &TickInput) {
    let player = &mut state.player;
    if input.right && !overlaps(&player.rect, &state.borders.right) {
        player.rect.pos.x += player.speed;
    }
    if input.left && !overlaps(&player.rect, &state.borders.left) {
        player.rect.pos.x -= player.speed;
    }
}

/// Lock-step formation movement. Any alive enemy touching a side border
/// turns the whole formation around.
fn move_enemies(state: &mut MatchState) {
    let borders = &state.borders;
    if state
        .enemies
        .iter_alive()
        .any(|e| overlaps(&e.rect, &borders.left))
    {
        state.enemy_direction = 1.0;
    } else if state
        .enemies
        .iter_alive()
        .any(|e| overlaps(&e.rect, &borders.right))
    {
        state.enemy_direction = -1.0;
    }

    let direction = state.enemy_direction;
    for column in state.enemies.cells.iter_mut() {
        for ship in column.iter_mut().filter(|s| s.is_alive()) {
            ship.rect.pos.x += ship.speed * direction;
        }
    }
}

/// Fire eligible enemies, then resolve and advance every enemy bullet.
/// Returns true if the player died.
fn update_enemy_fire(state: &mut MatchState, now: f64) -> bool {
    let cooldown = state.params.enemy_fire_cooldown;

    for col in 0..state.enemies.cells.len() {
        for row in 0..state.enemies.cells[col].len() {
            let bottom_most = state.enemies.is_bottom_most(col, row);
            let ship = &mut state.enemies.cells[col][row];

            if bottom_most
                && ship.is_alive()
                && !ship.bullet.active
                && now - ship.last_shot >= cooldown
                && ship.fire(now)
            {
                state.cues.push(Cue::EnemyFire);
            }

            if !ship.bullet.active {
                continue;
            }

            let shot = resolve_enemy_bullet(
                &mut ship.bullet,
                &mut state.player,
                &mut state.immunity_ticks,
                &mut state.barriers,
                &state.borders,
                &mut state.cues,
            );
            if shot == EnemyShot::Fatal {
                return true;
            }
            if ship.bullet.active {
                ship.bullet.step();
            }
        }
    }
    false
}

/// Check an enemy bullet against the player, barriers and bottom border
fn resolve_enemy_bullet(
    bullet: &mut Bullet,
    player: &mut Ship,
    immunity_ticks: &mut u32,
    barriers: &mut [Barrier],
    borders: &Borders,
    cues: &mut Vec<Cue>,
) -> EnemyShot {
    // Immune players let bullets pass straight through
    if *immunity_ticks == 0 && overlaps(&bullet.rect, &player.rect) {
        bullet.active = false;
        *immunity_ticks = IMMUNITY_TICKS;
        if player.damage() {
            log::debug!("Player destroyed");
            cues.push(Cue::PlayerDeath);
            return EnemyShot::Fatal;
        }
        log::debug!("Player hit, {} hp left", player.hp);
        cues.push(Cue::PlayerHit);
        return EnemyShot::Absorbed;
    }

    if hit_barrier(bullet, barriers, cues) {
        return EnemyShot::Absorbed;
    }

    if overlaps(&bullet.rect, &borders.bottom) {
        bullet.active = false;
    }
    EnemyShot::Miss
}

/// Spawn, resolve and advance the player's bullet. Returns true if the last
/// enemy was destroyed.
fn update_player_fire(state: &mut MatchState, input: &TickInput, now: f64) -> bool {
    if input.fire && state.player.is_alive() && state.player.fire(now) {
        let cue = state.next_fire_cue();
        state.cues.push(cue);
    }

    let bullet = &mut state.player.bullet;
    if !bullet.active {
        return false;
    }

    if hit_barrier(bullet, &mut state.barriers, &mut state.cues) {
        return false;
    }

    let (columns, rows) = (state.enemies.columns, state.enemies.rows);
    let target = state.enemies.cells[..columns]
        .iter_mut()
        .flat_map(|column| column[..rows].iter_mut())
        .find(|e| e.is_alive() && overlaps(&e.rect, &bullet.rect));

    if let Some(enemy) = target {
        bullet.active = false;
        if enemy.damage() {
            state.cues.push(Cue::EnemyKilled);
        } else {
            state.cues.push(Cue::EnemyHit);
        }
        return state.enemies.alive_count() == 0;
    }

    if overlaps(&bullet.rect, &state.borders.top) {
        bullet.active = false;
        return false;
    }

    bullet.step();
    false
}

/// Let the first standing barrier in the bullet's way absorb it
fn hit_barrier(bullet: &mut Bullet, barriers: &mut [Barrier], cues: &mut Vec<Cue>) -> bool {
    let Some(barrier) = barriers
        .iter_mut()
        .find(|b| b.is_standing() && overlaps(&b.rect, &bullet.rect))
    else {
        return false;
    };

    bullet.active = false;
    if barrier.absorb() {
        cues.push(Cue::ShieldBreak);
    } else {
        cues.push(Cue::ShieldAbsorb);
    }
    true
}
