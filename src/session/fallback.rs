use std::fmt;

use rand::Rng;
use tracing::warn;

use crate::oracle::{OracleError, Verdict};

/// Where a displayed verdict came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictSource {
    Oracle,
    Fallback,
}

impl fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerdictSource::Oracle => write!(f, "oracle"),
            VerdictSource::Fallback => write!(f, "fallback"),
        }
    }
}

/// Turns an oracle outcome into something that can always be shown.
#[derive(Debug, Clone, Copy)]
pub struct FallbackPolicy {
    yes_probability: f64,
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        Self {
            yes_probability: 0.7,
        }
    }
}

impl FallbackPolicy {
    /// Probability is clamped into `[0, 1]`; NaN falls back to the default.
    pub fn new(yes_probability: f64) -> Self {
        if yes_probability.is_nan() {
            return Self::default();
        }
        Self {
            yes_probability: yes_probability.clamp(0.0, 1.0),
        }
    }

    pub fn yes_probability(&self) -> f64 {
        self.yes_probability
    }

    /// Weighted coin flip used when the oracle could not be reached.
    pub fn random_verdict<R: Rng + ?Sized>(&self, rng: &mut R) -> Verdict {
        if rng.gen_bool(self.yes_probability) {
            Verdict::Yes
        } else {
            Verdict::No
        }
    }

    /// Unavailable oracles get a random verdict; malformed replies read as NO.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        outcome: Result<Verdict, OracleError>,
        rng: &mut R,
    ) -> (Verdict, VerdictSource) {
        match outcome {
            Ok(verdict) => (verdict, VerdictSource::Oracle),
            Err(err @ OracleError::Unavailable(_)) => {
                let verdict = self.random_verdict(rng);
                warn!(error = %err, %verdict, "oracle call failed, using random fallback");
                (verdict, VerdictSource::Fallback)
            }
            Err(err @ OracleError::Malformed(_)) => {
                warn!(error = %err, "oracle reply unreadable, defaulting to NO");
                (Verdict::No, VerdictSource::Oracle)
            }
        }
    }
}
