//! Result card export: PNG download and social share.
//!
//! Both modes re-render the card from the current session every time.
//! Failures never reach the user: [`Exporter::export_or_log`] logs them and
//! carries on, and the same action can simply be tried again.

mod card;
mod font;
mod share;

use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, info};

use card::Card;
use font::Typeface;
pub use share::{SystemOpener, UrlOpener, share_text, share_url};

use crate::oracle::Profession;
use crate::session::Session;
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Download,
    Share,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("nothing to export: no verdict on screen")]
    NoResult,

    #[error("failed to load card font: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("failed to render card: {0}")]
    Render(#[from] image::ImageError),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open share intent: {0}")]
    Open(std::io::Error),
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub share_url: Option<String>,
}

/// `ai-job-result-<slug>.png`, slug being the lower-cased profession with
/// whitespace runs collapsed to single hyphens.
///
/// Path separators (`/` and `\`) also become hyphens, so the file always
/// lands directly in the output directory.
pub fn artifact_filename(profession: &Profession) -> String {
    let slug = profession
        .as_str()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .replace(['/', '\\'], "-");
    format!("ai-job-result-{slug}.png")
}

pub struct Exporter<O> {
    output_dir: PathBuf,
    opener: O,
}

impl Exporter<SystemOpener> {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self::with_opener(output_dir, SystemOpener)
    }
}

impl<O: UrlOpener> Exporter<O> {
    pub fn with_opener(output_dir: impl Into<PathBuf>, opener: O) -> Self {
        Self {
            output_dir: output_dir.into(),
            opener,
        }
    }

    #[cfg(test)]
    pub(crate) fn opener(&self) -> &O {
        &self.opener
    }

    /// Render the session's result and download or share it.
    pub async fn export(
        &self,
        session: &Session,
        theme: Theme,
        mode: ExportMode,
    ) -> Result<ExportReport, ExportError> {
        let (profession, verdict) = session.result().ok_or(ExportError::NoResult)?;

        let card = Card {
            profession,
            verdict,
            theme,
        };
        let png = card.to_png(&Typeface::load()?)?;

        let path = self.output_dir.join(artifact_filename(profession));
        tokio::fs::write(&path, &png)
            .await
            .map_err(|source| ExportError::Write {
                path: path.clone(),
                source,
            })?;
        info!(path = %path.display(), bytes = png.len(), "card saved");

        let share_url = match mode {
            ExportMode::Download => None,
            ExportMode::Share => {
                let url = share_url(&share_text(profession, verdict));
                self.opener.open(&url).map_err(ExportError::Open)?;
                info!(%url, "share intent opened");
                Some(url)
            }
        };

        Ok(ExportReport { path, share_url })
    }

    /// Like [`export`](Self::export), but failures are logged and dropped.
    pub async fn export_or_log(
        &self,
        session: &Session,
        theme: Theme,
        mode: ExportMode,
    ) -> Option<ExportReport> {
        match self.export(session, theme, mode).await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(error = %e, ?mode, "export failed");
                None
            }
        }
    }
}
