mod fallback;
mod pipeline;
mod state;

pub use fallback::FallbackPolicy;
pub use pipeline::{PACING_DELAY, VerdictPipeline};
pub use state::{Ignored, Session, Transition};
#[cfg(test)]
pub use state::SessionState;
