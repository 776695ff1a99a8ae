//! End-to-end match scenarios driven through the public API

use invaders::audio::Cue;
use invaders::consts::TICK_DT;
use invaders::highscores::LedgerPaths;
use invaders::sim::{Game, Stage, TickInput};
use invaders::{Difficulty, ScoreLedger, Settings};
use tempfile::TempDir;

fn press(f: impl FnOnce(&mut TickInput)) -> TickInput {
    let mut input = TickInput::default();
    f(&mut input);
    input
}

/// Run idle ticks until no wipe is in flight
fn settle(game: &mut Game, now: &mut f64) {
    while game.transition.is_some() {
        *now += TICK_DT;
        game.tick(&TickInput::default(), *now);
    }
}

/// Drive the menus from the start screen into level 1
fn start_match(game: &mut Game, name: &str, difficulty: Difficulty, now: &mut f64) {
    for c in name.chars() {
        *now += TICK_DT;
        game.tick(&press(|i| i.letter = Some(c)), *now);
    }
    game.tick(&press(|i| i.confirm = true), *now);
    settle(game, now);
    assert_eq!(game.stage(), Stage::ModeSelect);

    while game.state.difficulty != difficulty {
        *now += TICK_DT;
        game.tick(&press(|i| i.difficulty_up = true), *now);
    }
    game.tick(&press(|i| i.confirm = true), *now);
    settle(game, now);
    assert_eq!(game.stage(), Stage::Playing);
}

/// Leave a single live enemy on the field
fn isolate_one_enemy(game: &mut Game) -> (usize, usize) {
    for column in game.state.enemies.cells.iter_mut() {
        for ship in column.iter_mut() {
            ship.hp = 0;
            ship.bullet.active = false;
        }
    }
    game.state.enemies.cells[0][0].hp = 1;
    (0, 0)
}

#[test]
fn test_normal_win_scores_bonus() {
    let mut game = Game::new(Settings::default(), ScoreLedger::new());
    let mut now = 0.0;
    start_match(&mut game, "ace", Difficulty::Normal, &mut now);
    assert_eq!(game.state.player.hp, 3);

    let (col, row) = isolate_one_enemy(&mut game);
    // Line the shot up with the enemy, below it
    let enemy = game.state.enemies.cells[col][row].rect;
    let mut origin = enemy.center();
    origin.y = enemy.bottom() + 20.0;
    game.state.player.bullet.spawn_at(origin);

    for _ in 0..60 {
        now += TICK_DT;
        game.tick(&TickInput::default(), now);
        if game.stage() != Stage::Playing {
            break;
        }
    }

    assert_eq!(game.state.enemies.cells[col][row].hp, 0);
    assert_eq!(game.stage(), Stage::EndScreen { winner: true });
    assert!(game.state.winner);
    assert_eq!(game.state.score, 100);
    assert!(game.state.drain_cues().contains(&Cue::Victory));
}

#[test]
fn test_fatal_hit_records_zero_on_disk() {
    let dir = TempDir::new().unwrap();
    let mut settings = Settings::default();
    settings.ledger = LedgerPaths {
        recent: dir.path().join("recent.txt"),
        top: dir.path().join("top.txt"),
    };
    let ledger = ScoreLedger::load(&settings.ledger).unwrap();
    let paths = settings.ledger.clone();
    let mut game = Game::new(settings, ledger);

    let mut now = 0.0;
    start_match(&mut game, "bob", Difficulty::Normal, &mut now);
    game.state.score = 400;
    game.state.player.hp = 1;
    game.state.immunity_ticks = 0;

    let (col, row) = isolate_one_enemy(&mut game);
    let target = game.state.player.rect.center();
    game.state.enemies.cells[col][row].bullet.spawn_at(target);

    now += TICK_DT;
    game.tick(&TickInput::default(), now);

    assert_eq!(game.state.player.hp, 0);
    assert_eq!(game.stage(), Stage::EndScreen { winner: false });

    let reloaded = ScoreLedger::load(&paths).unwrap();
    assert_eq!(reloaded.recent.len(), 1);
    assert_eq!(reloaded.recent[0].name, "BOB");
    assert_eq!(reloaded.recent[0].score, 0);
    assert_eq!(reloaded.top, reloaded.recent);
}

#[test]
fn test_transition_switch_happens_once_at_half() {
    let mut game = Game::new(Settings::default(), ScoreLedger::new());
    game.name = "ABC".into();
    let duration = game.settings.transition_duration;

    let t0 = 2.0;
    game.tick(&press(|i| i.confirm = true), t0);
    assert!(game.transition.is_some());

    let mut now = t0;
    let mut switched = None;
    let mut switches = 0;
    let mut stage = game.stage();
    while now < t0 + duration * 2.0 {
        let before = now;
        now += TICK_DT;
        game.tick(&TickInput::default(), now);
        if game.stage() != stage {
            switches += 1;
            switched.get_or_insert((before, now));
            stage = game.stage();
        }
    }

    assert_eq!(switches, 1);
    assert_eq!(stage, Stage::ModeSelect);
    let (before, at) = switched.unwrap();
    assert!(at - t0 >= duration / 2.0);
    assert!(before - t0 < duration / 2.0);
    assert!(game.transition.is_none());
}

#[test]
fn test_loser_returns_to_start_and_can_play_again() {
    let mut game = Game::new(Settings::default(), ScoreLedger::new());
    let mut now = 0.0;
    start_match(&mut game, "zed", Difficulty::Extreme, &mut now);
    assert_eq!(game.state.player.hp, 1);

    let target = game.state.player.rect.center();
    game.state.barriers.clear();
    game.state.enemies.cells[0][0].bullet.spawn_at(target);
    now += TICK_DT;
    game.tick(&TickInput::default(), now);
    assert_eq!(game.stage(), Stage::EndScreen { winner: false });

    game.tick(&press(|i| i.confirm = true), now);
    settle(&mut game, &mut now);
    assert_eq!(game.stage(), Stage::StartScreen);
    assert_eq!(game.name, "ZED");

    // Nickname is kept, confirm goes straight on
    game.tick(&press(|i| i.confirm = true), now);
    settle(&mut game, &mut now);
    assert_eq!(game.stage(), Stage::ModeSelect);
    // Difficulty is remembered too
    assert_eq!(game.state.difficulty, Difficulty::Extreme);
}
