//! Interface de terminal: barra de progresso do carregamento e cartão de resultado.
//!
//! Usa `indicatif` para a barra e `console` para estilização com cores.
//! O [`LoadingProgress`] é dono do seu timer: ao ser descartado (`Drop`), a
//! tarefa de animação é abortada e a barra é limpa.

use std::time::Duration;

use console::{Style, measure_text_width};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval};

use crate::export::ExportReport;
use crate::oracle::{Profession, Verdict};
use crate::session::PACING_DELAY;
use crate::theme::Theme;

const LOADING_TEXT: &str = "ANALYZING FUTURE EMPLOYMENT MATRIX";
const PROGRESS_TICK: Duration = Duration::from_millis(100);
const ELLIPSIS_TICK: Duration = Duration::from_millis(500);

/// Percentual (0 a 100) da janela de carregamento decorrido em `elapsed`.
pub fn progress_percent(elapsed: Duration, window: Duration) -> u64 {
    if window.is_zero() {
        return 100;
    }
    let pct = elapsed.as_millis() * 100 / window.as_millis();
    pct.min(100) as u64
}

/// Reticências em laço: "", ".", "..", "..." e recomeça.
pub fn ellipsis(elapsed: Duration) -> &'static str {
    const FRAMES: [&str; 4] = ["", ".", "..", "..."];
    let step = elapsed.as_millis() / ELLIPSIS_TICK.as_millis();
    FRAMES[(step % FRAMES.len() as u128) as usize]
}

/// Indicador visual da fase de carregamento.
///
/// Avança de 0 a 100% ao longo de [`PACING_DELAY`], independente da
/// latência real do oráculo.
pub struct LoadingProgress {
    // Barra do indicatif, compartilhada com a tarefa de animação.
    pb: ProgressBar,
    // Tarefa que atualiza a barra; abortada no Drop.
    ticker: JoinHandle<()>,
}

impl LoadingProgress {
    /// Inicia a animação para a profissão informada.
    pub fn start(profession: &Profession) -> Self {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::with_template("{msg}\n[{bar:40.green}] {pos:>3}%")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▉ "),
        );
        pb.println(format!("  Checking: {}", profession.as_str().to_uppercase()));
        Self::with_bar(pb)
    }

    /// Anima uma barra já construída (ex.: `ProgressBar::hidden()` em testes).
    pub fn with_bar(pb: ProgressBar) -> Self {
        pb.set_message(LOADING_TEXT);
        let bar = pb.clone();
        let ticker = tokio::spawn(async move {
            let started = Instant::now();
            let mut ticks = interval(PROGRESS_TICK);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticks.tick().await;
                let elapsed = started.elapsed();
                bar.set_position(progress_percent(elapsed, PACING_DELAY));
                bar.set_message(format!("{LOADING_TEXT}{}", ellipsis(elapsed)));
            }
        });
        Self { pb, ticker }
    }
}

impl Drop for LoadingProgress {
    fn drop(&mut self) {
        self.ticker.abort();
        self.pb.finish_and_clear();
    }
}

/// Imprime o cartão de resultado no terminal.
pub fn print_card(profession: &Profession, verdict: Verdict, theme: Theme) {
    let muted = Style::new().dim();
    let accent = theme.accent();
    let title = profession.as_str().to_uppercase();
    let verdict_text = format!("{verdict}");

    let inner = [
        "Will AI take the job of a...",
        title.as_str(),
        "The oracle says:",
        verdict_text.as_str(),
    ]
    .iter()
    .map(|s| measure_text_width(s))
    .max()
    .unwrap_or(0)
        + 8;

    let border = accent.apply_to(format!("+{}+", "-".repeat(inner)));
    let row = |text: String, width: usize| {
        let pad = inner.saturating_sub(width);
        let left = pad / 2;
        format!(
            "{}{}{}{}{}",
            accent.apply_to("|"),
            " ".repeat(left),
            text,
            " ".repeat(pad - left),
            accent.apply_to("|")
        )
    };

    println!();
    println!("{border}");
    println!("{}", row(String::new(), 0));
    println!(
        "{}",
        row(muted.apply_to("Will AI take the job of a...").to_string(), 28)
    );
    println!(
        "{}",
        row(Style::new().bold().apply_to(&title).to_string(), measure_text_width(&title))
    );
    println!("{}", row(muted.apply_to("The oracle says:").to_string(), 16));
    println!(
        "{}",
        row(
            theme.verdict_style(verdict).apply_to(&verdict_text).to_string(),
            verdict_text.len()
        )
    );
    println!("{}", row(String::new(), 0));
    println!("{border}");
}

/// Confirma uma exportação concluída.
pub fn print_export(report: &ExportReport) {
    let green = Style::new().green().bold();
    println!(
        "  {} Saved {}",
        green.apply_to("✓"),
        report.path.display()
    );
    if let Some(url) = &report.share_url {
        println!("  {} Share link opened: {url}", green.apply_to("↗"));
    }
}

/// Menu exibido enquanto um resultado está na tela.
pub fn print_result_menu(theme: Theme) {
    let key = theme.accent();
    println!(
        "  {}heck again   {}ownload   {}hare   {}heme   {}uit",
        key.apply_to("[c]"),
        key.apply_to("[d]"),
        key.apply_to("[s]"),
        key.apply_to("[t]"),
        key.apply_to("[q]"),
    );
}
