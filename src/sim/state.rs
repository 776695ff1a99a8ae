//! Match state and core entity types
//!
//! Everything the simulation mutates during a tick lives in [`MatchState`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::anim::{Animation, ease_in_quad, ease_out_cubic};
use super::collision::{Borders, Rect};
use crate::audio::{Cue, FIRE_VARIANTS};
use crate::consts::*;
use crate::tuning::{Difficulty, RoundParams};

/// Top-level screen of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Title, nickname entry and score list
    StartScreen,
    /// Difficulty selection
    ModeSelect,
    /// Active gameplay
    Playing,
    /// Round over
    EndScreen { winner: bool },
}

/// Which side fired a bullet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Vertical travel direction (screen y grows downward)
    pub fn direction(&self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Enemy => 1.0,
        }
    }
}

/// A bullet slot. Each ship owns exactly one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    pub active: bool,
    pub side: Side,
    /// Pixels per tick
    pub speed: f32,
}

impl Bullet {
    pub fn new(side: Side, speed: f32) -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, BULLET_WIDTH, BULLET_HEIGHT),
            active: false,
            side,
            speed,
        }
    }

    /// Activate the bullet centered horizontally on `origin`
    pub fn spawn_at(&mut self, origin: Vec2) {
        self.rect = Rect::new(
            origin.x - BULLET_WIDTH / 2.0,
            origin.y,
            BULLET_WIDTH,
            BULLET_HEIGHT,
        );
        self.active = true;
    }

    /// Move one tick along the owner's direction
    pub fn step(&mut self) {
        self.rect.pos.y += self.speed * self.side.direction();
    }
}

/// Player or enemy ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    /// Horizontal speed (pixels/tick)
    pub speed: f32,
    pub hp: u32,
    pub bullet: Bullet,
    /// Timestamp of the last shot (seconds)
    pub last_shot: f64,
}

impl Default for Ship {
    fn default() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, SHIP_SIZE, SHIP_SIZE),
            speed: 0.0,
            hp: 0,
            bullet: Bullet::new(Side::Enemy, 0.0),
            last_shot: 0.0,
        }
    }
}

impl Ship {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Spawn this ship's bullet at its center. Returns false if the slot is
    /// still in use.
    pub fn fire(&mut self, now: f64) -> bool {
        if self.bullet.active {
            return false;
        }
        self.bullet.spawn_at(self.rect.center());
        self.last_shot = now;
        true
    }

    /// Remove one hit point, returns true if this killed the ship
    pub fn damage(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }
}

/// Visual state of a barrier, from its remaining hit points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierTier {
    Intact,
    Cracked,
    Crumbling,
    Destroyed,
}

/// A destructible shield between the player and the enemies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barrier {
    pub rect: Rect,
    pub hp: u32,
    pub max_hp: u32,
}

impl Barrier {
    pub fn new(rect: Rect, max_hp: u32) -> Self {
        Self {
            rect,
            hp: max_hp,
            max_hp,
        }
    }

    pub fn is_standing(&self) -> bool {
        self.hp > 0
    }

    /// Absorb one bullet, returns true if the barrier broke
    pub fn absorb(&mut self) -> bool {
        self.hp = self.hp.saturating_sub(1);
        self.hp == 0
    }

    pub fn tier(&self) -> BarrierTier {
        if self.hp == 0 || self.max_hp == 0 {
            return BarrierTier::Destroyed;
        }
        let fraction = self.hp as f32 / self.max_hp as f32;
        if fraction > 2.0 / 3.0 {
            BarrierTier::Intact
        } else if fraction > 1.0 / 3.0 {
            BarrierTier::Cracked
        } else {
            BarrierTier::Crumbling
        }
    }
}

/// Fixed-capacity enemy formation indexed `[column][row]`
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyGrid {
    pub cells: [[Ship; GRID_ROWS]; GRID_COLUMNS],
    /// Columns in use this round
    pub columns: usize,
    /// Rows in use this round
    pub rows: usize,
}

impl Default for EnemyGrid {
    fn default() -> Self {
        Self {
            cells: [[Ship::default(); GRID_ROWS]; GRID_COLUMNS],
            columns: 0,
            rows: 0,
        }
    }
}

impl EnemyGrid {
    /// Lay out a fresh formation in the top-left of the playfield
    pub fn populate(&mut self, params: &RoundParams) {
        *self = Self::default();
        self.columns = params.columns.min(GRID_COLUMNS);
        self.rows = params.rows.min(GRID_ROWS);

        for col in 0..self.columns {
            for row in 0..self.rows {
                let x = BORDER_THICKNESS + 5.0 + col as f32 * ENEMY_SPACING_X;
                let y = ENEMY_TOP + row as f32 * ENEMY_SPACING_Y;
                self.cells[col][row] = Ship {
                    rect: Rect::new(x, y, SHIP_SIZE, SHIP_SIZE),
                    speed: params.enemy_speed,
                    hp: 1,
                    bullet: Bullet::new(Side::Enemy, params.enemy_bullet_speed),
                    last_shot: 0.0,
                };
            }
        }
    }

    pub fn in_extent(&self, col: usize, row: usize) -> bool {
        col < self.columns && row < self.rows
    }

    /// Alive enemies inside the active extent
    pub fn iter_alive(&self) -> impl Iterator<Item = &Ship> {
        self.cells[..self.columns]
            .iter()
            .flat_map(move |column| column[..self.rows].iter())
            .filter(|ship| ship.is_alive())
    }

    pub fn alive_count(&self) -> usize {
        self.iter_alive().count()
    }

    /// True when no alive enemy sits below `(col, row)` in its column
    pub fn is_bottom_most(&self, col: usize, row: usize) -> bool {
        if !self.in_extent(col, row) {
            return false;
        }
        self.cells[col][row + 1..self.rows]
            .iter()
            .all(|ship| !ship.is_alive())
    }
}

/// Complete state of one match
#[derive(Debug, Clone)]
pub struct MatchState {
    pub stage: Stage,
    pub difficulty: Difficulty,
    /// 1-based level within the current run
    pub level: u32,
    pub winner: bool,
    pub score: u64,
    pub player: Ship,
    pub enemies: EnemyGrid,
    pub barriers: Vec<Barrier>,
    pub borders: Borders,
    /// Ticks of damage immunity remaining
    pub immunity_ticks: u32,
    /// Shared horizontal direction of the formation (+1 right, -1 left)
    pub enemy_direction: f32,
    /// Parameters the current round was set up with
    pub params: RoundParams,
    /// Player rising into place at round start
    pub enter_anim: Animation,
    /// Player launching off the top after a win
    pub exit_anim: Animation,
    /// Cues emitted since the host last drained them
    pub cues: Vec<Cue>,
    fire_variant: u8,
    rng: Pcg32,
}

impl MatchState {
    pub fn new(seed: u64, params: RoundParams) -> Self {
        Self {
            stage: Stage::StartScreen,
            difficulty: Difficulty::default(),
            level: 1,
            winner: false,
            score: 0,
            player: Ship::default(),
            enemies: EnemyGrid::default(),
            barriers: Vec::new(),
            borders: Borders::default(),
            immunity_ticks: 0,
            enemy_direction: 1.0,
            params,
            enter_anim: Animation::new(ENTER_DURATION),
            exit_anim: Animation::new(EXIT_DURATION),
            cues: Vec::new(),
            fire_variant: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Reset every entity for a new round
    pub fn reset_round(&mut self, params: RoundParams, now: f64) {
        self.params = params;
        self.winner = false;
        self.immunity_ticks = 0;
        self.enemy_direction = 1.0;

        self.player = Ship {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - SHIP_SIZE / 2.0,
                SCREEN_HEIGHT - SHIP_SIZE - BORDER_THICKNESS,
                SHIP_SIZE,
                SHIP_SIZE,
            ),
            speed: PLAYER_SPEED,
            hp: params.player_hp,
            bullet: Bullet::new(Side::Player, PLAYER_BULLET_SPEED),
            last_shot: now,
        };

        self.enemies.populate(&params);
        // Stagger cooldown clocks so the formation doesn't fire in unison
        let cooldown = params.enemy_fire_cooldown;
        for column in self.enemies.cells.iter_mut() {
            for ship in column.iter_mut().filter(|s| s.is_alive()) {
                let offset = if cooldown > 0.0 {
                    self.rng.random_range(0.0..cooldown)
                } else {
                    0.0
                };
                ship.last_shot = now - offset;
            }
        }

        let spacing = SCREEN_WIDTH / (BARRIER_COUNT as f32 + 1.0);
        let y = self.player.rect.top() - BARRIER_CLEARANCE - BARRIER_HEIGHT;
        self.barriers = (0..BARRIER_COUNT)
            .map(|i| {
                let x = spacing * (i as f32 + 1.0) - BARRIER_WIDTH / 2.0;
                Barrier::new(
                    Rect::new(x, y, BARRIER_WIDTH, BARRIER_HEIGHT),
                    params.barrier_hp,
                )
            })
            .filter(|b| b.is_standing())
            .collect();

        self.exit_anim.running = false;
        self.enter_anim.start(now);
    }

    /// Next cue in the player fire rotation
    pub fn next_fire_cue(&mut self) -> Cue {
        let cue = Cue::PlayerFire(self.fire_variant);
        self.fire_variant = (self.fire_variant + 1) % FIRE_VARIANTS;
        cue
    }

    /// Take all pending cues
    pub fn drain_cues(&mut self) -> Vec<Cue> {
        std::mem::take(&mut self.cues)
    }

    /// Player opacity: flickers while immune
    pub fn player_opacity(&self) -> f32 {
        if self.immunity_ticks > 0 && (self.immunity_ticks / 6) % 2 == 0 {
            0.35
        } else {
            1.0
        }
    }

    /// Where the player should be drawn, including enter/exit offsets
    pub fn player_draw_rect(&self, now: f64) -> Rect {
        let rect = self.player.rect;
        if self.exit_anim.running {
            let t = ease_in_quad(self.exit_anim.progress(now));
            return rect.translate(Vec2::new(0.0, -t * (rect.bottom() + SHIP_SIZE)));
        }
        if self.enter_anim.running {
            let t = ease_out_cubic(self.enter_anim.progress(now));
            return rect.translate(Vec2::new(0.0, (1.0 - t) * (SHIP_SIZE + BORDER_THICKNESS)));
        }
        rect
    }
}

/// Two-frame enemy sprite flip-book
pub fn enemy_sprite_frame(now: f64) -> u32 {
    ((now / SPRITE_FRAME_SECS).max(0.0) as u64 % 2) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn fresh(now: f64) -> MatchState {
        let params = Tuning::default().params(Difficulty::Normal, 1);
        let mut state = MatchState::new(7, params);
        state.reset_round(params, now);
        state
    }

    #[test]
    fn test_reset_round_lays_out_entities() {
        let state = fresh(0.0);
        assert_eq!(state.player.hp, 3);
        assert_eq!(state.enemies.alive_count(), 5 * 2);
        assert_eq!(state.barriers.len(), BARRIER_COUNT);
        assert!(state.enter_anim.running);
        assert!(!state.player.bullet.active);
        // Player sits on the bottom border
        assert_eq!(state.player.rect.bottom(), SCREEN_HEIGHT - BORDER_THICKNESS);
    }

    #[test]
    fn test_cooldowns_are_staggered_into_the_past() {
        let state = fresh(100.0);
        let cooldown = state.params.enemy_fire_cooldown;
        for ship in state.enemies.iter_alive() {
            assert!(ship.last_shot <= 100.0);
            assert!(ship.last_shot > 100.0 - cooldown);
        }
    }

    #[test]
    fn test_bottom_most_tracks_deaths() {
        let mut state = fresh(0.0);
        assert!(state.enemies.is_bottom_most(0, 1));
        assert!(!state.enemies.is_bottom_most(0, 0));

        state.enemies.cells[0][1].hp = 0;
        assert!(state.enemies.is_bottom_most(0, 0));
        // Outside the active extent nothing fires
        assert!(!state.enemies.is_bottom_most(GRID_COLUMNS - 1, 0));
    }

    #[test]
    fn test_ship_fires_once_per_slot() {
        let mut ship = fresh(0.0).player;
        assert!(ship.fire(1.0));
        assert!(!ship.fire(2.0));
        assert_eq!(ship.last_shot, 1.0);
        assert_eq!(ship.bullet.rect.center().x, ship.rect.center().x);
    }

    #[test]
    fn test_barrier_tiers() {
        let mut barrier = Barrier::new(Rect::new(0.0, 0.0, 10.0, 10.0), 6);
        assert_eq!(barrier.tier(), BarrierTier::Intact);
        barrier.absorb();
        barrier.absorb();
        assert_eq!(barrier.tier(), BarrierTier::Cracked);
        barrier.absorb();
        barrier.absorb();
        assert_eq!(barrier.tier(), BarrierTier::Crumbling);
        barrier.absorb();
        assert!(barrier.absorb());
        assert_eq!(barrier.tier(), BarrierTier::Destroyed);
        assert!(!barrier.is_standing());
    }

    #[test]
    fn test_fire_cue_rotation() {
        let mut state = fresh(0.0);
        let cues: Vec<_> = (0..4).map(|_| state.next_fire_cue()).collect();
        assert_eq!(
            cues,
            [Cue::PlayerFire(0), Cue::PlayerFire(1), Cue::PlayerFire(2), Cue::PlayerFire(0)]
        );
    }

    #[test]
    fn test_player_flickers_while_immune() {
        let mut state = fresh(0.0);
        assert_eq!(state.player_opacity(), 1.0);
        state.immunity_ticks = IMMUNITY_TICKS;
        let opacities: Vec<_> = (0..12)
            .map(|i| {
                state.immunity_ticks = IMMUNITY_TICKS - i;
                state.player_opacity()
            })
            .collect();
        assert!(opacities.contains(&0.35));
        assert!(opacities.contains(&1.0));
    }

    #[test]
    fn test_player_enters_from_below() {
        let state = fresh(0.0);
        let start = state.player_draw_rect(0.0);
        let settled = state.player_draw_rect(ENTER_DURATION);
        assert!(start.top() > state.player.rect.top());
        assert_eq!(settled, state.player.rect);
    }

    #[test]
    fn test_sprite_frame_toggles_each_second() {
        assert_eq!(enemy_sprite_frame(0.2), 0);
        assert_eq!(enemy_sprite_frame(1.2), 1);
        assert_eq!(enemy_sprite_frame(2.5), 0);
    }
}
