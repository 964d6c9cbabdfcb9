use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use super::fallback::{FallbackPolicy, VerdictSource};
use super::state::{Session, Transition};
use crate::gemini::ContentGenerator;
use crate::oracle::{Oracle, Profession};

/// Fixed "thinking" time shown before any verdict, however fast the oracle is.
pub const PACING_DELAY: Duration = Duration::from_secs(10);

/// Drives a [`Session`] through submit → paced oracle query → result.
pub struct VerdictPipeline<G> {
    oracle: Oracle<G>,
    session: Session,
    fallback: FallbackPolicy,
    rng: StdRng,
}

impl<G: ContentGenerator> VerdictPipeline<G> {
    pub fn new(oracle: Oracle<G>, fallback: FallbackPolicy) -> Self {
        Self::with_rng(oracle, fallback, StdRng::from_entropy())
    }

    /// Same as [`new`](Self::new) with a caller-supplied RNG (seeded in tests).
    pub fn with_rng(oracle: Oracle<G>, fallback: FallbackPolicy, rng: StdRng) -> Self {
        Self {
            oracle,
            session: Session::new(),
            fallback,
            rng,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Submit a profession and wait for the verdict.
    ///
    /// `on_loading` is called once the session enters LOADING; whatever it
    /// returns is dropped before the session leaves it, so decorations tied
    /// to the returned value never outlive the loading phase.
    pub async fn submit<F, D>(&mut self, input: &str, on_loading: F) -> Transition
    where
        F: FnOnce(&Profession) -> D,
    {
        let profession = match self.session.submit(input) {
            Transition::Started(profession) => profession,
            other => {
                debug!(?other, "submit ignored");
                return other;
            }
        };
        info!(%profession, "checking profession");

        let decoration = on_loading(&profession);
        let started = Instant::now();
        let (outcome, ()) = tokio::join!(self.oracle.query(&profession), sleep(PACING_DELAY));
        drop(decoration);

        let (verdict, source) = self.fallback.decide(outcome, &mut self.rng);
        info!(
            %profession,
            %verdict,
            %source,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "verdict ready"
        );
        if source == VerdictSource::Fallback {
            debug!("verdict came from the fallback draw");
        }
        self.session.resolve(verdict)
    }

    /// RESULT → IDLE.
    pub fn check_again(&mut self) -> Transition {
        let t = self.session.check_again();
        debug!(?t, "check again");
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::types::{Candidate, GenerateContentResponse, Part};
    use crate::gemini::{Content, GeminiError, GenerateContentRequest};
    use crate::oracle::Verdict;
    use crate::session::{Ignored, SessionState};
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Replays a queue of canned replies, optionally after a delay.
    struct ScriptedGenerator {
        replies: RefCell<VecDeque<Result<String, ()>>>,
        latency: Duration,
    }

    impl ScriptedGenerator {
        fn new(replies: Vec<Result<&str, ()>>) -> Self {
            Self {
                replies: RefCell::new(
                    replies
                        .into_iter()
                        .map(|r| r.map(str::to_string))
                        .collect(),
                ),
                latency: Duration::ZERO,
            }
        }

        fn slow(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }
    }

    impl ContentGenerator for ScriptedGenerator {
        async fn generate_content(
            &self,
            _req: &GenerateContentRequest,
        ) -> Result<GenerateContentResponse, GeminiError> {
            if !self.latency.is_zero() {
                sleep(self.latency).await;
            }
            let reply = self.replies.borrow_mut().pop_front().unwrap_or(Err(()));
            match reply {
                Ok(text) => Ok(GenerateContentResponse {
                    candidates: vec![Candidate {
                        content: Some(Content {
                            role: Some("model".into()),
                            parts: vec![Part { text }],
                        }),
                        finish_reason: Some("STOP".into()),
                    }],
                    usage_metadata: None,
                }),
                Err(()) => Err(GeminiError::ApiError {
                    status: 503,
                    message: "unavailable".into(),
                }),
            }
        }
    }

    fn pipeline(generator: ScriptedGenerator, yes_probability: f64) -> VerdictPipeline<ScriptedGenerator> {
        VerdictPipeline::with_rng(
            Oracle::new(generator),
            FallbackPolicy::new(yes_probability),
            StdRng::seed_from_u64(7),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn welder_end_to_end() {
        let mut p = pipeline(ScriptedGenerator::new(vec![Ok(r#"{"result":"yes"}"#)]), 0.7);
        let started = Instant::now();

        let t = p.submit("Welder", |_| ()).await;

        assert!(started.elapsed() >= PACING_DELAY);
        assert!(matches!(t, Transition::Resolved { verdict: Verdict::Yes, .. }));
        let (profession, verdict) = p.session().result().unwrap();
        assert_eq!(profession.as_str(), "Welder");
        assert_eq!(verdict, Verdict::Yes);

        assert_eq!(p.check_again(), Transition::Reset);
        assert_eq!(p.session().state(), &SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn fast_oracle_still_waits_full_pacing_delay() {
        let mut p = pipeline(ScriptedGenerator::new(vec![Ok(r#"{"result":"NO"}"#)]), 0.7);
        let started = Instant::now();
        p.submit("Accountant", |_| ()).await;
        let elapsed = started.elapsed();
        assert!(elapsed >= PACING_DELAY, "resolved after {elapsed:?}");
        assert!(elapsed < PACING_DELAY + Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_oracle_runs_concurrently_with_pacing() {
        let generator = ScriptedGenerator::new(vec![Ok(r#"{"result":"NO"}"#)])
            .slow(Duration::from_secs(12));
        let mut p = pipeline(generator, 0.7);
        let started = Instant::now();
        p.submit("Pilot", |_| ()).await;
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(12));
        assert!(elapsed < Duration::from_secs(13), "delays were serialized: {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_never_starts_loading() {
        let mut p = pipeline(ScriptedGenerator::new(vec![]), 0.7);
        let called = Cell::new(false);
        let started = Instant::now();

        let t = p.submit("   ", |_| called.set(true)).await;

        assert_eq!(t, Transition::Ignored(Ignored::EmptyProfession));
        assert!(!called.get());
        assert_eq!(p.session().state(), &SessionState::Idle);
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn failed_oracle_still_yields_a_verdict() {
        let mut p = pipeline(ScriptedGenerator::new(vec![Err(())]), 1.0);
        let t = p.submit("Translator", |_| ()).await;
        assert!(matches!(t, Transition::Resolved { verdict: Verdict::Yes, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_reply_resolves_to_no() {
        let mut p = pipeline(ScriptedGenerator::new(vec![Ok("definitely")]), 1.0);
        let t = p.submit("Translator", |_| ()).await;
        assert!(matches!(t, Transition::Resolved { verdict: Verdict::No, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_failures_always_resolve() {
        let mut p = pipeline(ScriptedGenerator::new(vec![]), 0.7);
        for _ in 0..5 {
            let t = p.submit("Cashier", |_| ()).await;
            assert!(matches!(t, Transition::Resolved { .. }));
            assert_eq!(p.check_again(), Transition::Reset);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn loading_decoration_is_dropped_before_result() {
        struct Flag(Rc<Cell<bool>>);
        impl Drop for Flag {
            fn drop(&mut self) {
                self.0.set(true);
            }
        }

        let dropped = Rc::new(Cell::new(false));
        let seen = RefCell::new(None);
        let mut p = pipeline(ScriptedGenerator::new(vec![Ok(r#"{"result":"NO"}"#)]), 0.7);

        p.submit("Barista", |profession| {
            *seen.borrow_mut() = Some(profession.to_string());
            Flag(dropped.clone())
        })
        .await;

        assert!(dropped.get());
        assert_eq!(seen.borrow().as_deref(), Some("Barista"));
    }

    #[tokio::test(start_paused = true)]
    async fn new_check_after_reset_is_independent() {
        let mut p = pipeline(
            ScriptedGenerator::new(vec![Ok(r#"{"result":"YES"}"#), Ok(r#"{"result":"NO"}"#)]),
            0.7,
        );
        p.submit("Welder", |_| ()).await;
        assert_eq!(p.session().result().unwrap().1, Verdict::Yes);

        // A result must be cleared before the next check.
        assert_eq!(
            p.submit("Nurse", |_| ()).await,
            Transition::Ignored(Ignored::Busy)
        );

        p.check_again();
        p.submit("Nurse", |_| ()).await;
        let (profession, verdict) = p.session().result().unwrap();
        assert_eq!(profession.as_str(), "Nurse");
        assert_eq!(verdict, Verdict::No);
    }
}
