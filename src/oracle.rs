//! The verdict oracle: turns a profession into a YES/NO answer from Gemini.
//!
//! [`Oracle::query`] never substitutes a fallback itself. Transport problems
//! come back as [`OracleError::Unavailable`], unusable payloads as
//! [`OracleError::Malformed`]; the session layer decides what to show.

use std::fmt;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::gemini::{
    Content, ContentGenerator, GeminiError, GenerateContentRequest, GenerationConfig, Schema,
};

pub const SYSTEM_INSTRUCTION: &str = "You are an oracle that predicts the future of professions in the age of AI. \
Your answers must be concise and direct. For any given profession, you must determine if AI is likely to take over that job. \
You must only respond with 'YES' or 'NO' in a JSON format with a 'result' key.";

/// A trimmed, non-empty profession as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profession(String);

impl Profession {
    /// Returns `None` for empty or whitespace-only input.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Yes,
    No,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Yes => write!(f, "YES"),
            Verdict::No => write!(f, "NO"),
        }
    }
}

#[derive(Debug, Error)]
pub enum OracleError {
    /// The request never produced a usable HTTP response.
    #[error("oracle unavailable: {0}")]
    Unavailable(#[from] GeminiError),

    /// A response arrived but did not carry a readable `result` field.
    #[error("malformed oracle response: {0}")]
    Malformed(String),
}

/// The structured payload the model is constrained to produce.
#[derive(Debug, Deserialize)]
pub struct OracleAnswer {
    pub result: String,
}

impl OracleAnswer {
    pub fn parse(text: &str) -> Result<Self, OracleError> {
        serde_json::from_str(text.trim())
            .map_err(|e| OracleError::Malformed(format!("{e}: {}", text.trim())))
    }

    /// Only a case-insensitive `YES` counts as yes.
    pub fn verdict(&self) -> Verdict {
        if self.result.trim().eq_ignore_ascii_case("YES") {
            Verdict::Yes
        } else {
            Verdict::No
        }
    }
}

pub fn user_prompt(profession: &Profession) -> String {
    format!("Will AI take the job of a {profession}?")
}

/// Builds the schema-constrained request for one profession.
pub fn build_request(profession: &Profession) -> GenerateContentRequest {
    let mut properties = serde_json::Map::new();
    properties.insert(
        "result".into(),
        serde_json::json!({
            "type": "STRING",
            "description": "The answer. Must be either \"YES\" or \"NO\".",
        }),
    );

    GenerateContentRequest {
        system_instruction: Some(Content::system(SYSTEM_INSTRUCTION)),
        contents: vec![Content::user(user_prompt(profession))],
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".into()),
            response_schema: Some(Schema {
                schema_type: "OBJECT".into(),
                description: None,
                properties: Some(properties),
                required: vec!["result".into()],
            }),
        }),
    }
}

pub struct Oracle<G> {
    generator: G,
}

impl<G: ContentGenerator> Oracle<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub async fn query(&self, profession: &Profession) -> Result<Verdict, OracleError> {
        let req = build_request(profession);
        let response = self.generator.generate_content(&req).await?;

        let text = response
            .text()
            .ok_or_else(|| OracleError::Malformed("response carried no text".into()))?;
        let answer = OracleAnswer::parse(&text)?;
        let verdict = answer.verdict();
        debug!(%profession, raw = %answer.result, %verdict, "oracle answered");
        Ok(verdict)
    }
}
