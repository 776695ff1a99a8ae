//! Frame composition for each stage

use super::{
    BLACK, Canvas, Color, GREEN, GREY, ORANGE, RED, Sprite, WHITE, YELLOW, with_alpha,
};
use crate::consts::{NAME_LEN, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::highscores::ScoreEntry;
use crate::sim::{BarrierTier, Game, MatchState, ScoreView, Stage, enemy_sprite_frame};
use crate::tuning::Difficulty;

const TITLE_SIZE: f32 = 48.0;
const TEXT_SIZE: f32 = 24.0;
const HUD_SIZE: f32 = 18.0;

/// Draw one complete frame of `game` as of `now`
pub fn draw_frame(game: &Game, canvas: &mut impl Canvas, now: f64) {
    canvas.clear(BLACK);

    match game.stage() {
        Stage::StartScreen => draw_start_screen(game, canvas),
        Stage::ModeSelect => draw_mode_select(game.state.difficulty, canvas),
        Stage::Playing => {
            draw_playfield(&game.state, canvas, now);
            draw_hud(&game.state, canvas);
        }
        Stage::EndScreen { winner } => {
            // Keep the field visible so the launch-off animation plays out
            draw_playfield(&game.state, canvas, now);
            draw_end_screen(game, winner, canvas);
        }
    }

    if let Some(transition) = &game.transition {
        let wipe = transition.wipe_rect(now, SCREEN_WIDTH, SCREEN_HEIGHT);
        canvas.fill_rect(wipe, BLACK);
    }
}

fn draw_centered(canvas: &mut impl Canvas, text: &str, y: f32, size: f32, color: Color) {
    let width = canvas.measure_text(text, size);
    canvas.draw_text(text, (SCREEN_WIDTH - width) / 2.0, y, size, color);
}

fn draw_start_screen(game: &Game, canvas: &mut impl Canvas) {
    draw_centered(canvas, "SPACE INVADERS", 120.0, TITLE_SIZE, GREEN);
    draw_centered(canvas, "ENTER YOUR NAME", 240.0, TEXT_SIZE, WHITE);

    let mut slots = game.name.clone();
    while slots.chars().count() < NAME_LEN {
        slots.push('_');
    }
    draw_centered(canvas, &slots, 280.0, TITLE_SIZE, YELLOW);

    draw_score_panel(game, canvas, 400.0);
    draw_centered(canvas, "TAB: SWITCH LIST   ENTER: CONTINUE", 740.0, HUD_SIZE, GREY);
}

fn draw_mode_select(current: Difficulty, canvas: &mut impl Canvas) {
    draw_centered(canvas, "SELECT DIFFICULTY", 160.0, TITLE_SIZE, GREEN);
    for (i, difficulty) in Difficulty::ALL.iter().enumerate() {
        let selected = *difficulty == current;
        let label = if selected {
            format!("> {} <", difficulty.as_str())
        } else {
            difficulty.as_str().to_string()
        };
        let color = if selected { YELLOW } else { GREY };
        draw_centered(canvas, &label, 300.0 + i as f32 * 60.0, TEXT_SIZE, color);
    }
    draw_centered(canvas, "UP/DOWN: CHANGE   ENTER: START   BACKSPACE: BACK", 740.0, HUD_SIZE, GREY);
}

fn barrier_color(tier: BarrierTier) -> Option<Color> {
    match tier {
        BarrierTier::Intact => Some(GREEN),
        BarrierTier::Cracked => Some(YELLOW),
        BarrierTier::Crumbling => Some(ORANGE),
        BarrierTier::Destroyed => None,
    }
}

fn draw_playfield(state: &MatchState, canvas: &mut impl Canvas, now: f64) {
    for border in state.borders.all() {
        canvas.fill_rect(*border, GREY);
    }

    for barrier in &state.barriers {
        if let Some(color) = barrier_color(barrier.tier()) {
            canvas.fill_rect(barrier.rect, color);
        }
    }

    let frame = enemy_sprite_frame(now);
    for enemy in state.enemies.iter_alive() {
        canvas.draw_sprite(Sprite::Enemy, frame, enemy.rect, WHITE);
    }
    // Bullets already in flight keep drawing after their shooter dies
    for column in &state.enemies.cells {
        for enemy in column.iter().filter(|e| e.bullet.active) {
            canvas.draw_sprite(Sprite::EnemyBullet, 0, enemy.bullet.rect, WHITE);
        }
    }

    let player = &state.player;
    if player.is_alive() {
        let tint = with_alpha(WHITE, state.player_opacity());
        canvas.draw_sprite(Sprite::Player, 0, state.player_draw_rect(now), tint);
    }
    if player.bullet.active {
        canvas.draw_sprite(Sprite::PlayerBullet, 0, player.bullet.rect, WHITE);
    }
}

fn draw_hud(state: &MatchState, canvas: &mut impl Canvas) {
    let score = format!("SCORE {}", state.score);
    canvas.draw_text(&score, 20.0, 14.0, HUD_SIZE, WHITE);

    let level = format!("{} LEVEL {}", state.difficulty.as_str(), state.level);
    draw_centered(canvas, &level, 14.0, HUD_SIZE, GREY);

    let hp = format!("HP {}", state.player.hp);
    let width = canvas.measure_text(&hp, HUD_SIZE);
    let color = if state.player.hp <= 1 { RED } else { WHITE };
    canvas.draw_text(&hp, SCREEN_WIDTH - 20.0 - width, 14.0, HUD_SIZE, color);
}

fn draw_end_screen(game: &Game, winner: bool, canvas: &mut impl Canvas) {
    let state = &game.state;
    let final_level = game.settings.tuning.is_final_level(state.level);
    let (title, color) = match (winner, final_level) {
        (true, true) => ("VICTORY", GREEN),
        (true, false) => ("LEVEL CLEARED", GREEN),
        (false, _) => ("GAME OVER", RED),
    };
    draw_centered(canvas, title, 160.0, TITLE_SIZE, color);
    draw_centered(canvas, &format!("SCORE {}", state.score), 230.0, TEXT_SIZE, WHITE);

    let run_over = !winner || final_level;
    if run_over {
        if let Some(rank) = game.last_rank {
            draw_centered(canvas, &format!("NEW HIGH SCORE #{}", rank), 270.0, TEXT_SIZE, YELLOW);
        }
        draw_score_panel(game, canvas, 340.0);
    }

    let hint = if run_over {
        "ENTER: TITLE SCREEN"
    } else {
        "ENTER: NEXT LEVEL"
    };
    draw_centered(canvas, hint, 740.0, HUD_SIZE, GREY);
}

fn draw_score_panel(game: &Game, canvas: &mut impl Canvas, top: f32) {
    let (heading, entries): (&str, &[ScoreEntry]) = match game.score_view {
        ScoreView::Recent => ("RECENT GAMES", &game.ledger.recent),
        ScoreView::Top => ("HIGH SCORES", &game.ledger.top),
    };
    draw_centered(canvas, heading, top, TEXT_SIZE, WHITE);

    if entries.is_empty() {
        draw_centered(canvas, "NO SCORES YET", top + 40.0, HUD_SIZE, GREY);
        return;
    }
    for (i, entry) in entries.iter().enumerate() {
        let line = format!("{}. {:<3} {:>6}", i + 1, entry.name, entry.score);
        draw_centered(canvas, &line, top + 40.0 + i as f32 * 28.0, HUD_SIZE, GREY);
    }
}
