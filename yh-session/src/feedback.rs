//! Sound and haptic cues.
//!
//! Cues are fire-and-forget: a backend error is counted by the session and
//! otherwise ignored; it never blocks or undoes a transition.

use thiserror::Error;

/// Sound cue, keyed by what just happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Roll,
    Select,
    Score,
    Yahtzee,
}

/// Haptic pulse strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Haptic {
    Light,
    Medium,
    Success,
}

impl Cue {
    pub fn key(self) -> &'static str {
        match self {
            Cue::Roll => "roll",
            Cue::Select => "select",
            Cue::Score => "score",
            Cue::Yahtzee => "yahtzee",
        }
    }

    /// Haptic pulse paired with this cue.
    pub fn haptic(self) -> Haptic {
        match self {
            Cue::Roll => Haptic::Medium,
            Cue::Select => Haptic::Light,
            Cue::Score | Cue::Yahtzee => Haptic::Success,
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("feedback backend unavailable: {0}")]
    Unavailable(String),
}

/// Sound/haptics backend.
pub trait Feedback {
    fn play(&mut self, cue: Cue) -> Result<(), FeedbackError>;

    fn pulse(&mut self, haptic: Haptic) -> Result<(), FeedbackError> {
        let _ = haptic;
        Ok(())
    }
}

/// Discards every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeedback;

impl Feedback for NullFeedback {
    fn play(&mut self, _cue: Cue) -> Result<(), FeedbackError> {
        Ok(())
    }
}
