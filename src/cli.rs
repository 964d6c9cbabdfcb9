//! Interface de linha de comando baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (ask, play)
//! e flags globais (--theme, --model, --out-dir, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::theme::Theme;

/// Will AI take my job? Ask the oracle and get a shareable verdict card.
#[derive(Debug, Parser)]
#[command(name = "will-ai-take-my-job", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Tema do cartão e do terminal.
    #[arg(long, global = true)]
    pub theme: Option<ThemeArg>,

    /// Modelo Gemini a consultar (ex.: gemini-2.5-flash).
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Diretório onde os cartões exportados são gravados.
    #[arg(long, global = true)]
    pub out_dir: Option<PathBuf>,

    /// Habilita logs de diagnóstico (nível debug) no stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,
}

/// Argumento de tema aceito pela CLI, mapeado para [`Theme`] internamente.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pergunta ao oráculo uma única vez e imprime o cartão.
    Ask {
        /// Sua profissão.
        profession: String,

        /// Grava o cartão como PNG.
        #[arg(long)]
        download: bool,

        /// Grava o cartão e abre o link de compartilhamento.
        #[arg(long)]
        share: bool,
    },

    /// Modo interativo: pergunta, mostra o cartão e oferece exportar.
    Play,
}
