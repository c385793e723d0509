//! The game session: single owner of one `GameState`.
//!
//! Intents that the rules (or the roll-animation lock) refuse are silent no-ops:
//! the state is left exactly as it was and the refusal is only counted in
//! `SessionStats`. Hosts are expected to grey out illegal controls using
//! `legal_mask()`.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use yh_core::{
    apply_action, is_yahtzee, legal_action_mask, lower_total, upper_bonus, upper_total,
    validate_state, Action, ApplyError, Category, ChanceKind, Config, ConfigError, DiceSource,
    GameState, LegalMask, MAX_ROLLS, RULESET_ID,
};
use yh_logging::{
    now_ms, GameOverEventV1, HoldEventV1, NdjsonError, NdjsonWriter, ResetEventV1, RollEventV1,
    ScoreEventV1, VersionInfoV1,
};

use crate::clock::{Clock, SystemClock};
use crate::feedback::{Cue, Feedback, NullFeedback};
use crate::roll_lock::{RollLock, RollTicket};

pub const DEFAULT_ROLL_ANIMATION: Duration = Duration::from_millis(400);

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("event log: {0}")]
    EventLog(#[from] NdjsonError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionStats {
    pub games_started: u64,
    pub rolls: u64,
    pub holds: u64,
    pub scores: u64,
    /// Intents refused by the rules or by the roll lock.
    pub refused: u64,
    pub feedback_errors: u64,
    pub log_errors: u64,
}

/// What a successful `score_category` banked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReceipt {
    pub category: Category,
    pub points: u32,
    /// 100 when this score also earned a joker bonus, else 0.
    pub yahtzee_bonus_awarded: u32,
    pub game_over: bool,
}

pub struct Session {
    state: GameState,
    dice: DiceSource,
    lock: RollLock,
    roll_animation: Duration,
    clock: Box<dyn Clock>,
    feedback: Box<dyn Feedback>,
    sound_enabled: bool,
    haptic_enabled: bool,
    muted: bool,
    events: Option<NdjsonWriter>,
    game_id: u64,
    stats: SessionStats,
}

impl Session {
    pub fn new(dice: DiceSource) -> Self {
        Self {
            state: GameState::new(),
            dice,
            lock: RollLock::new(),
            roll_animation: DEFAULT_ROLL_ANIMATION,
            clock: Box::new(SystemClock),
            feedback: Box::new(NullFeedback),
            sound_enabled: true,
            haptic_enabled: true,
            muted: false,
            events: None,
            game_id: 0,
            stats: SessionStats {
                games_started: 1,
                ..SessionStats::default()
            },
        }
    }

    /// Build a session from config: dice source, animation length, feedback
    /// flags and (if configured) the NDJSON event log.
    pub fn from_config(cfg: &Config) -> Result<Self, SessionError> {
        let dice = match (cfg.session.chance, cfg.session.seed) {
            (ChanceKind::Rng, Some(seed)) => DiceSource::new_rng(seed),
            (ChanceKind::Rng, None) => DiceSource::from_entropy(),
            (ChanceKind::Deterministic, Some(seed)) => DiceSource::new_deterministic(seed),
            (ChanceKind::Deterministic, None) => {
                return Err(ConfigError::Invalid(
                    "session.seed is required when session.chance is deterministic",
                )
                .into());
            }
        };
        let mut s = Self::new(dice).with_roll_animation(cfg.session.roll_animation());
        s.sound_enabled = cfg.feedback.sound_enabled;
        s.haptic_enabled = cfg.feedback.haptic_enabled;
        if let Some(path) = &cfg.logging.events_path {
            let w = NdjsonWriter::open_append_with_flush(path, cfg.logging.flush_every_lines)?;
            s = s.with_event_log(w);
        }
        Ok(s)
    }

    pub fn with_roll_animation(mut self, d: Duration) -> Self {
        self.roll_animation = d;
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_feedback(mut self, feedback: impl Feedback + 'static) -> Self {
        self.feedback = Box::new(feedback);
        self
    }

    pub fn with_event_log(mut self, w: NdjsonWriter) -> Self {
        self.events = Some(w);
        self
    }

    // --- observers ---

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn total_score(&self) -> u32 {
        self.state.total_score()
    }

    pub fn is_rolling(&self) -> bool {
        self.lock.is_active(self.clock.now())
    }

    pub fn legal_mask(&self) -> LegalMask {
        legal_action_mask(&self.state, self.is_rolling())
    }

    /// Preview of what `cat` would bank now; `None` if it is already scored or
    /// nothing has been rolled this round.
    pub fn potential_score(&self, cat: Category) -> Option<u32> {
        if self.state.scorecard.is_scored(cat) || !self.state.has_rolled() {
            return None;
        }
        Some(yh_core::potential_score(&self.state.dice_values(), cat))
    }

    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Flip mute and return the new value.
    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    // --- transitions ---

    /// Roll every unheld die. Returns the animation ticket, or `None` if the roll
    /// was refused (no rolls left, game over, or a roll animation in flight).
    ///
    /// Hosts with a timer can call `finish_roll(ticket)` after `roll_animation`;
    /// hosts without one can rely on `poll()` / the deadline.
    pub fn roll_dice(&mut self) -> Option<RollTicket> {
        if self.is_rolling() {
            self.stats.refused += 1;
            return None;
        }
        let next = match apply_action(self.state, Action::Roll, &mut self.dice) {
            Ok(s) => s,
            Err(_) => {
                self.stats.refused += 1;
                return None;
            }
        };
        self.state = next;
        self.stats.rolls += 1;
        let ticket = self.lock.arm(self.clock.now(), self.roll_animation);
        self.cue(Cue::Roll);

        let ev = RollEventV1 {
            event: "roll",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id,
            round: self.state.current_round,
            rolls_left: self.state.rolls_left,
            dice: self.state.dice_values(),
            held: self.state.dice.map(|d| d.is_held),
        };
        self.log(&ev);
        Some(ticket)
    }

    /// Flip the held flag of die `die_id`. Refused before the first roll of a
    /// round and while a roll animation is in flight.
    pub fn toggle_hold(&mut self, die_id: u8) -> bool {
        if self.is_rolling() {
            self.stats.refused += 1;
            return false;
        }
        let next = match apply_action(self.state, Action::ToggleHold(die_id), &mut self.dice) {
            Ok(s) => s,
            Err(_) => {
                self.stats.refused += 1;
                return false;
            }
        };
        self.state = next;
        self.stats.holds += 1;
        self.cue(Cue::Select);

        let ev = HoldEventV1 {
            event: "hold",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id,
            round: self.state.current_round,
            die: die_id,
            held: self.state.dice[die_id as usize].is_held,
        };
        self.log(&ev);
        true
    }

    /// Bank `cat` with the dice on the table. Any roll animation in flight is
    /// cancelled first, whether or not the score is accepted.
    pub fn score_category(&mut self, cat: Category) -> Option<ScoreReceipt> {
        self.lock.cancel();

        let prev = self.state;
        let next = match apply_action(prev, Action::Score(cat), &mut self.dice) {
            Ok(s) => s,
            Err(_) => {
                self.stats.refused += 1;
                return None;
            }
        };
        self.state = next;
        self.stats.scores += 1;

        let dice = prev.dice_values();
        let receipt = ScoreReceipt {
            category: cat,
            points: next.scorecard.get(cat).unwrap_or(0),
            yahtzee_bonus_awarded: next.yahtzee_bonus - prev.yahtzee_bonus,
            game_over: next.is_game_over,
        };
        self.cue(if is_yahtzee(&dice) {
            Cue::Yahtzee
        } else {
            Cue::Score
        });

        let ev = ScoreEventV1 {
            event: "score",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id,
            round: prev.current_round,
            category: cat.key(),
            points: receipt.points,
            yahtzee_bonus_awarded: receipt.yahtzee_bonus_awarded,
            dice,
            rolls_used: MAX_ROLLS - prev.rolls_left,
        };
        self.log(&ev);

        if receipt.game_over {
            let card = &self.state.scorecard;
            let ev = GameOverEventV1 {
                event: "game_over",
                ts_ms: now_ms(),
                v: VersionInfoV1::new(RULESET_ID),
                game_id: self.game_id,
                total_score: self.state.total_score(),
                upper_total: upper_total(card),
                upper_bonus: upper_bonus(card),
                lower_total: lower_total(card),
                yahtzee_bonus: self.state.yahtzee_bonus,
            };
            self.log(&ev);
        }
        Some(receipt)
    }

    /// Start a fresh game. Cancels any roll animation in flight.
    pub fn reset_game(&mut self) {
        self.lock.cancel();
        let prev = self.state;
        self.state = GameState::new();
        self.game_id += 1;
        self.stats.games_started += 1;

        let ev = ResetEventV1 {
            event: "reset",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            game_id: self.game_id,
            previous_round: prev.current_round,
            previous_game_over: prev.is_game_over,
        };
        self.log(&ev);
    }

    /// Resume from a saved snapshot. Invalid snapshots are rejected and the
    /// current game is kept.
    pub fn restore(&mut self, state: GameState) -> Result<(), ApplyError> {
        validate_state(&state)?;
        self.lock.cancel();
        self.state = state;
        Ok(())
    }

    // --- roll lock ---

    /// Deferred end of a roll animation. Stale tickets are ignored.
    pub fn finish_roll(&mut self, ticket: RollTicket) -> bool {
        self.lock.finish(ticket)
    }

    /// Clear the roll lock if its deadline has passed.
    pub fn poll(&mut self) -> bool {
        self.lock.poll(self.clock.now())
    }

    /// Flush the event log, if any.
    pub fn flush(&mut self) -> Result<(), SessionError> {
        if let Some(w) = self.events.as_mut() {
            w.flush()?;
        }
        Ok(())
    }

    fn cue(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        if self.sound_enabled && self.feedback.play(cue).is_err() {
            self.stats.feedback_errors += 1;
        }
        if self.haptic_enabled && self.feedback.pulse(cue.haptic()).is_err() {
            self.stats.feedback_errors += 1;
        }
    }

    fn log<T: Serialize>(&mut self, ev: &T) {
        if let Some(w) = self.events.as_mut() {
            if w.write_event(ev).is_err() {
                self.stats.log_errors += 1;
            }
        }
    }
}
