pub mod client;
pub mod error;
pub mod types;

pub use client::{API_BASE_URL, ContentGenerator, DEFAULT_MODEL, GeminiClient};
pub use error::GeminiError;
pub use types::{Content, GenerateContentRequest, GenerationConfig, Schema};
