//! Stage state machine
//!
//! [`Game`] is the session context: it owns the match, the score ledger and
//! the settings, and decides which stage logic runs each tick. Stage switches
//! all go through [`Game::set_stage`], which runs the entry hook exactly once.

use super::anim::Transition;
use super::state::{MatchState, Stage};
use super::tick::{MatchOutcome, TickInput, tick};
use crate::audio::Cue;
use crate::consts::NAME_LEN;
use crate::highscores::ScoreLedger;
use crate::settings::Settings;

/// Which list the score panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreView {
    #[default]
    Recent,
    Top,
}

impl ScoreView {
    pub fn toggled(self) -> Self {
        match self {
            ScoreView::Recent => ScoreView::Top,
            ScoreView::Top => ScoreView::Recent,
        }
    }
}

/// Session context driving the whole application
pub struct Game {
    pub state: MatchState,
    pub ledger: ScoreLedger,
    pub settings: Settings,
    /// Nickname typed on the start screen
    pub name: String,
    /// Wipe in flight, if any
    pub transition: Option<Transition>,
    pub score_view: ScoreView,
    /// Rank reached by the last recorded game
    pub last_rank: Option<usize>,
    /// Next level starts on the coming switch to `Playing`
    advance_level: bool,
}

impl Game {
    pub fn new(settings: Settings, ledger: ScoreLedger) -> Self {
        let params = settings.tuning.params(Default::default(), 1);
        Self {
            state: MatchState::new(settings.seed, params),
            ledger,
            settings,
            name: String::new(),
            transition: None,
            score_view: ScoreView::default(),
            last_rank: None,
            advance_level: false,
        }
    }

    pub fn stage(&self) -> Stage {
        self.state.stage
    }

    /// Switch stage immediately and run its entry hook
    pub fn set_stage(&mut self, stage: Stage, now: f64) {
        log::info!("Stage {:?} -> {:?}", self.state.stage, stage);
        self.state.stage = stage;
        self.on_enter(stage, now);
    }

    /// Start a wipe that switches to `target` at its halfway point. Ignored
    /// while another wipe is in flight.
    pub fn begin_transition(&mut self, target: Stage, now: f64) -> bool {
        if self.transition.is_some() {
            return false;
        }
        log::debug!("Transition to {:?} started", target);
        self.transition = Some(Transition::begin(
            target,
            self.settings.wipe_direction,
            self.settings.transition_duration,
            now,
        ));
        true
    }

    /// Advance the whole application by one tick
    pub fn tick(&mut self, input: &TickInput, now: f64) {
        let commit = self.transition.as_mut().and_then(|t| t.advance(now));
        if let Some(target) = commit {
            self.set_stage(target, now);
        }
        if self.transition.as_ref().is_some_and(Transition::is_finished) {
            self.transition = None;
        }

        self.state.enter_anim.advance(now);
        self.state.exit_anim.advance(now);

        let accepts_input = self.transition.is_none();
        match self.state.stage {
            Stage::StartScreen if accepts_input => self.tick_start_screen(input, now),
            Stage::ModeSelect if accepts_input => self.tick_mode_select(input, now),
            Stage::Playing => self.tick_playing(input, now),
            Stage::EndScreen { winner } if accepts_input => self.tick_end_screen(input, winner, now),
            _ => {}
        }
    }

    fn on_enter(&mut self, stage: Stage, now: f64) {
        match stage {
            Stage::StartScreen => {
                self.state.score = 0;
                self.state.level = 1;
                self.advance_level = false;
            }
            Stage::ModeSelect => {}
            Stage::Playing => {
                if std::mem::take(&mut self.advance_level) {
                    self.state.level += 1;
                }
                let params = self
                    .settings
                    .tuning
                    .params(self.state.difficulty, self.state.level);
                log::info!(
                    "Round {} on {}: {}x{} enemies, {} hp",
                    self.state.level,
                    self.state.difficulty.as_str(),
                    params.columns,
                    params.rows,
                    params.player_hp
                );
                self.state.reset_round(params, now);
            }
            Stage::EndScreen { winner } => {
                self.state.winner = winner;
            }
        }
    }

    fn tick_start_screen(&mut self, input: &TickInput, now: f64) {
        if input.toggle_scores {
            self.score_view = self.score_view.toggled();
        }

        if let Some(letter) = input.letter.filter(char::is_ascii_alphabetic) {
            if self.name.len() < NAME_LEN {
                self.name.push(letter.to_ascii_uppercase());
                self.state.cues.push(Cue::MenuMove);
            } else {
                self.state.cues.push(Cue::NoOp);
            }
        }

        if input.cancel {
            let cue = if self.name.pop().is_some() {
                Cue::MenuMove
            } else {
                Cue::NoOp
            };
            self.state.cues.push(cue);
        }

        if input.confirm {
            if self.name.len() == NAME_LEN {
                self.state.cues.push(Cue::Confirm);
                self.begin_transition(Stage::ModeSelect, now);
            } else {
                self.state.cues.push(Cue::NoOp);
            }
        }
    }

    fn tick_mode_select(&mut self, input: &TickInput, now: f64) {
        let difficulty = self.state.difficulty;
        let step = if input.difficulty_up {
            Some(difficulty.harder())
        } else if input.difficulty_down {
            Some(difficulty.easier())
        } else {
            None
        };
        match step {
            Some(Some(next)) => {
                self.state.difficulty = next;
                self.state.cues.push(Cue::MenuMove);
            }
            Some(None) => self.state.cues.push(Cue::NoOp),
            None => {}
        }

        if input.cancel {
            self.begin_transition(Stage::StartScreen, now);
        } else if input.confirm {
            self.state.level = 1;
            self.state.score = 0;
            self.state.cues.push(Cue::Confirm);
            self.begin_transition(Stage::Playing, now);
        }
    }

    fn tick_playing(&mut self, input: &TickInput, now: f64) {
        match tick(&mut self.state, input, now) {
            MatchOutcome::Continue => {}
            MatchOutcome::Won => self.win(now),
            MatchOutcome::Lost => self.lose(now),
        }
    }

    fn tick_end_screen(&mut self, input: &TickInput, winner: bool, now: f64) {
        if input.toggle_scores {
            self.score_view = self.score_view.toggled();
        }
        if !input.confirm {
            return;
        }

        self.state.cues.push(Cue::Confirm);
        if winner && !self.settings.tuning.is_final_level(self.state.level) {
            self.advance_level = self.begin_transition(Stage::Playing, now);
        } else {
            self.begin_transition(Stage::StartScreen, now);
        }
    }

    fn win(&mut self, now: f64) {
        let bonus = self.state.difficulty.win_bonus();
        self.state.score += bonus;
        self.state.exit_anim.start(now);
        self.state.cues.push(Cue::Victory);
        log::info!(
            "Level {} cleared (+{}), score {}",
            self.state.level,
            bonus,
            self.state.score
        );
        self.set_stage(Stage::EndScreen { winner: true }, now);

        if self.settings.tuning.is_final_level(self.state.level) {
            self.record(self.state.score);
        }
    }

    fn lose(&mut self, now: f64) {
        let recorded = self
            .settings
            .loss_score_policy
            .recorded_score(self.state.score);
        log::info!("Player lost on level {}, recording {}", self.state.level, recorded);
        self.state.score = recorded;
        self.set_stage(Stage::EndScreen { winner: false }, now);
        self.record(recorded);
    }

    fn record(&mut self, score: u64) {
        self.last_rank = self.ledger.record(&self.name, score);
    }
}
