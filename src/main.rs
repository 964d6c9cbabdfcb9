mod app;
mod cli;
mod config;
mod error;
mod export;
mod gemini;
mod oracle;
mod session;
mod theme;
mod ui;

use clap::Parser;
use tokio::io::BufReader;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use app::App;
use cli::{Cli, Command};
use config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut config = AppConfig::load()?;
    if let Some(theme) = cli.theme {
        config.theme = theme.into();
    }
    if let Some(model) = cli.model {
        config.model = model;
    }
    if let Some(dir) = cli.out_dir {
        config.output_dir = dir;
    }
    debug!(
        model = %config.model,
        theme = %config.theme,
        output_dir = %config.output_dir.display(),
        "configuration loaded"
    );

    let mut app = App::from_config(&config)?;
    match cli.command {
        Command::Ask {
            profession,
            download,
            share,
        } => app.ask(&profession, download, share).await,
        Command::Play => app.play(BufReader::new(tokio::io::stdin())).await?,
    }

    Ok(())
}

/// Filter used when `RUST_LOG` is unset. Oracle fallbacks log at `warn`.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "will_ai_take_my_job=debug"
    } else {
        "will_ai_take_my_job=warn"
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
