use std::io::Write;

use anyhow::Result;
use console::Style;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::export::{ExportMode, Exporter, SystemOpener, UrlOpener};
use crate::gemini::{ContentGenerator, GeminiClient};
use crate::oracle::Oracle;
use crate::session::{FallbackPolicy, Ignored, Transition, VerdictPipeline};
use crate::theme::Theme;
use crate::ui::{self, LoadingProgress};

/// The interactive shell around the verdict pipeline.
pub struct App<G, O> {
    pipeline: VerdictPipeline<G>,
    exporter: Exporter<O>,
    theme: Theme,
}

impl App<GeminiClient, SystemOpener> {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let client = GeminiClient::with_base_url(
            config.api_key.clone(),
            config.model.clone(),
            config.base_url.clone(),
            config.request_timeout(),
        )?;
        let fallback = FallbackPolicy::new(config.fallback_yes_probability);
        debug!(
            model = client.model(),
            fallback_yes = fallback.yes_probability(),
            "oracle ready"
        );
        if config.api_key.trim().is_empty() {
            debug!("no API key configured, every verdict will come from the fallback");
        }
        let pipeline = VerdictPipeline::new(Oracle::new(client), fallback);
        Ok(Self::new(
            pipeline,
            Exporter::new(config.output_dir.clone()),
            config.theme,
        ))
    }
}

impl<G: ContentGenerator, O: UrlOpener> App<G, O> {
    pub fn new(pipeline: VerdictPipeline<G>, exporter: Exporter<O>, theme: Theme) -> Self {
        Self {
            pipeline,
            exporter,
            theme,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &crate::session::SessionState {
        self.pipeline.session().state()
    }

    /// Run one paced check with the loading display, then show the card.
    pub async fn check(&mut self, input: &str) -> Transition {
        let t = self
            .pipeline
            .submit(input, LoadingProgress::start)
            .await;
        if let Transition::Resolved { profession, verdict } = &t {
            ui::print_card(profession, *verdict, self.theme);
        }
        t
    }

    /// Download or share the card on screen. Failures are only logged.
    pub async fn export(&self, mode: ExportMode) {
        if let Some(report) = self
            .exporter
            .export_or_log(self.pipeline.session(), self.theme, mode)
            .await
        {
            ui::print_export(&report);
        }
    }

    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        debug!(theme = %self.theme, "theme toggled");
    }

    /// One-shot mode: check, then export as requested.
    pub async fn ask(&mut self, profession: &str, download: bool, share: bool) {
        if let Transition::Ignored(Ignored::EmptyProfession) = self.check(profession).await {
            hint("Enter a profession to ask the oracle.");
            return;
        }
        if share {
            self.export(ExportMode::Share).await;
        } else if download {
            self.export(ExportMode::Download).await;
        }
    }

    /// Interactive mode, reading commands line by line until `q` or EOF.
    pub async fn play<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        banner(self.theme);

        loop {
            if self.pipeline.session().result().is_none() {
                prompt("ENTER YOUR PROFESSION")?;
                let Some(line) = lines.next_line().await? else {
                    break;
                };
                if let Transition::Ignored(Ignored::EmptyProfession) = self.check(&line).await {
                    hint("The oracle needs a profession.");
                }
                continue;
            }

            ui::print_result_menu(self.theme);
            prompt("")?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "c" => {
                    self.pipeline.check_again();
                    banner(self.theme);
                }
                "d" => self.export(ExportMode::Download).await,
                "s" => self.export(ExportMode::Share).await,
                "t" => {
                    self.toggle_theme();
                    if let Some((profession, verdict)) = self.pipeline.session().result() {
                        ui::print_card(profession, verdict, self.theme);
                    }
                }
                "q" => break,
                _ => {}
            }
        }
        Ok(())
    }
}

fn banner(theme: Theme) {
    let accent = theme.accent().bold();
    println!();
    println!("{}", accent.apply_to("WILL AI TAKE MY JOB?"));
}

fn prompt(label: &str) -> std::io::Result<()> {
    let accent = Style::new().bold();
    if label.is_empty() {
        print!("{} ", accent.apply_to(">"));
    } else {
        print!("{} {} ", accent.apply_to(label), accent.apply_to(">"));
    }
    std::io::stdout().flush()
}

fn hint(message: &str) {
    println!("  {}", Style::new().dim().apply_to(message));
}
