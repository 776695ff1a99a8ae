//! Invaders headless entry point
//!
//! Runs a self-playing session through the platform, audio and renderer
//! contracts at a fixed 60 Hz step. Nothing is drawn or played; set
//! `RUST_LOG=debug` (or `trace`) to follow along.
//!
//! Usage: `invaders [SETTINGS] [MAX_SECONDS]`

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;

use invaders::audio::{AudioManager, LogBackend};
use invaders::consts::TICK_DT;
use invaders::platform::{Clock, FixedStepClock, Key, Keyboard, poll_input};
use invaders::renderer::{LogCanvas, draw_frame};
use invaders::sim::{Game, Stage};
use invaders::{ScoreLedger, Settings};

#[derive(Parser)]
#[command(name = "invaders")]
#[command(about = "Run a self-playing Space Invaders session headless")]
struct Args {
    /// Settings file (JSON)
    #[arg(default_value = "invaders.json")]
    settings: PathBuf,

    /// Stop after this many simulated seconds
    #[arg(default_value_t = 300.0)]
    max_seconds: f64,
}

const PILOT_NAME: &str = "CPU";
/// Frames between menu key presses, long enough for a wipe to finish
const MENU_DELAY: u64 = 60;

/// Keyboard driven by a simple autopilot that looks at the game
#[derive(Default)]
struct AutoPilot {
    down: HashSet<Key>,
    pressed: HashSet<Key>,
    letter: Option<char>,
    frame: u64,
}

impl AutoPilot {
    /// Decide which keys are held/pressed for the next tick
    fn update(&mut self, game: &Game) {
        self.frame += 1;
        self.down.clear();
        self.pressed.clear();
        self.letter = None;

        let menu_beat = self.frame % MENU_DELAY == 0;
        match game.stage() {
            Stage::StartScreen if menu_beat => {
                let typed = game.name.len();
                match PILOT_NAME.chars().nth(typed) {
                    Some(c) => self.letter = Some(c),
                    None => {
                        self.pressed.insert(Key::Enter);
                    }
                }
            }
            Stage::ModeSelect | Stage::EndScreen { .. } if menu_beat => {
                self.pressed.insert(Key::Enter);
            }
            Stage::Playing => self.steer(game),
            _ => {}
        }
    }

    /// Chase the nearest enemy column and keep firing
    fn steer(&mut self, game: &Game) {
        self.down.insert(Key::Fire);
        let x = game.state.player.rect.center().x;
        let target = game
            .state
            .enemies
            .iter_alive()
            .map(|e| e.rect.center().x)
            .min_by(|a, b| (a - x).abs().total_cmp(&(b - x).abs()));
        if let Some(target) = target {
            if target > x + 2.0 {
                self.down.insert(Key::Right);
            } else if target < x - 2.0 {
                self.down.insert(Key::Left);
            }
        }
    }
}

impl Keyboard for AutoPilot {
    fn is_down(&self, key: Key) -> bool {
        self.down.contains(&key)
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn letter_pressed(&self) -> Option<char> {
        self.letter
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();
    let max_seconds = args.max_seconds;

    let settings = Settings::load(&args.settings);
    let ledger = ScoreLedger::open(&settings.ledger);

    let mut audio = AudioManager::new(LogBackend::default());
    audio.set_master_volume(settings.master_volume);
    audio.set_sfx_volume(settings.sfx_volume);
    audio.set_muted(settings.muted);

    let mut game = Game::new(settings, ledger);
    let mut pilot = AutoPilot::default();
    let mut canvas = LogCanvas::default();
    let mut clock = FixedStepClock::default();
    let mut runs_finished = 0;

    log::info!("Invaders starting, autopilot for up to {}s", max_seconds);

    'frames: while clock.now() < max_seconds {
        // Host frames arrive at the nominal rate in headless mode
        for _ in 0..clock.feed(TICK_DT) {
            let now = clock.advance();
            pilot.update(&game);
            let before = game.stage();
            game.tick(&poll_input(&pilot), now);
            audio.play_all(game.state.drain_cues());

            let after = game.stage();
            if before != after && after == Stage::StartScreen && game.transition.is_some() {
                runs_finished += 1;
                log::info!("Run {} finished", runs_finished);
                break 'frames;
            }
        }
        draw_frame(&game, &mut canvas, clock.now());
    }

    log::info!(
        "Stopped at {:.1}s on {:?}, level {}, score {}",
        clock.now(),
        game.stage(),
        game.state.level,
        game.state.score
    );
    for (i, entry) in game.ledger.top.iter().enumerate() {
        log::info!("#{} {} {}", i + 1, entry.name, entry.score);
    }
    log::info!(
        "{} draw calls, {} sounds, ledger {}",
        canvas.calls,
        audio.backend().played,
        if game.ledger.is_persistent() { "saved" } else { "in memory" }
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["invaders"]).unwrap();
        assert_eq!(args.settings, PathBuf::from("invaders.json"));
        assert_eq!(args.max_seconds, 300.0);
    }

    #[test]
    fn test_bad_duration_is_rejected() {
        assert!(Args::try_parse_from(["invaders", "custom.json", "abc"]).is_err());
        let args = Args::try_parse_from(["invaders", "custom.json", "12.5"]).unwrap();
        assert_eq!(args.max_seconds, 12.5);
    }
}
