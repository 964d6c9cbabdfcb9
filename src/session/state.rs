use std::fmt;

use crate::oracle::{Profession, Verdict};

/// The three states of a verdict session.
///
/// Each check flows through: IDLE → LOADING → RESULT → IDLE
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading { profession: Profession },
    Result { profession: Profession, verdict: Verdict },
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Idle => write!(f, "IDLE"),
            SessionState::Loading { .. } => write!(f, "LOADING"),
            SessionState::Result { .. } => write!(f, "RESULT"),
        }
    }
}

/// Why an action left the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Submit with empty or whitespace-only input.
    EmptyProfession,
    /// Submit while a check is running or a result is on screen.
    Busy,
    /// Resolve without a pending check.
    NotLoading,
    /// Check-again without a result to clear.
    NoResult,
}

/// The result of applying an action to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// IDLE → LOADING.
    Started(Profession),
    /// LOADING → RESULT.
    Resolved { profession: Profession, verdict: Verdict },
    /// RESULT → IDLE.
    Reset,
    /// No state change.
    Ignored(Ignored),
}

/// Owns the single session state and applies transitions to it.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The profession and verdict currently on screen, if any.
    pub fn result(&self) -> Option<(&Profession, Verdict)> {
        match &self.state {
            SessionState::Result { profession, verdict } => Some((profession, *verdict)),
            _ => None,
        }
    }

    /// IDLE → LOADING, guarded by non-empty input.
    pub fn submit(&mut self, input: &str) -> Transition {
        if !matches!(self.state, SessionState::Idle) {
            return Transition::Ignored(Ignored::Busy);
        }
        let Some(profession) = Profession::parse(input) else {
            return Transition::Ignored(Ignored::EmptyProfession);
        };
        self.state = SessionState::Loading {
            profession: profession.clone(),
        };
        Transition::Started(profession)
    }

    /// LOADING → RESULT, carrying over the pending profession.
    pub fn resolve(&mut self, verdict: Verdict) -> Transition {
        match std::mem::take(&mut self.state) {
            SessionState::Loading { profession } => {
                self.state = SessionState::Result {
                    profession: profession.clone(),
                    verdict,
                };
                Transition::Resolved { profession, verdict }
            }
            other => {
                self.state = other;
                Transition::Ignored(Ignored::NotLoading)
            }
        }
    }

    /// RESULT → IDLE. Loading cannot be cancelled.
    pub fn check_again(&mut self) -> Transition {
        match self.state {
            SessionState::Result { .. } => {
                self.state = SessionState::Idle;
                Transition::Reset
            }
            SessionState::Loading { .. } => Transition::Ignored(Ignored::Busy),
            SessionState::Idle => Transition::Ignored(Ignored::NoResult),
        }
    }
}
