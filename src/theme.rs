//! Tema visual (escuro/claro) compartilhado pelo terminal e pelo cartão exportado.

use std::fmt;

use console::Style;
use serde::Deserialize;

use crate::oracle::Verdict;

/// Cor RGB de 8 bits por canal.
pub type Rgb = [u8; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Cores usadas para desenhar o cartão de resultado.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub border: Rgb,
    pub muted: Rgb,
    pub profession: Rgb,
    pub yes: Rgb,
    pub no: Rgb,
}

impl Palette {
    pub fn verdict(&self, verdict: Verdict) -> Rgb {
        match verdict {
            Verdict::Yes => self.yes,
            Verdict::No => self.no,
        }
    }
}

const DARK: Palette = Palette {
    background: [0x11, 0x18, 0x27],
    border: [0x9C, 0xA3, 0xAF],
    muted: [0x9C, 0xA3, 0xAF],
    profession: [0xFF, 0xFF, 0xFF],
    yes: [0xEF, 0x44, 0x44],
    no: [0x4A, 0xDE, 0x80],
};

const LIGHT: Palette = Palette {
    background: [0xFF, 0xFF, 0xFF],
    border: [0x00, 0x00, 0x00],
    muted: [0x4B, 0x55, 0x63],
    profession: [0x00, 0x00, 0x00],
    yes: [0xDC, 0x26, 0x26],
    no: [0x16, 0xA3, 0x4A],
};

impl Theme {
    pub fn toggle(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }

    /// Estilo de terminal para o veredito, aproximando as cores do cartão.
    pub fn verdict_style(self, verdict: Verdict) -> Style {
        match (self, verdict) {
            (_, Verdict::Yes) => Style::new().red().bold(),
            (Theme::Dark, Verdict::No) => Style::new().green().bright().bold(),
            (Theme::Light, Verdict::No) => Style::new().green().bold(),
        }
    }

    /// Cor de destaque para títulos e bordas no terminal.
    pub fn accent(self) -> Style {
        match self {
            Theme::Dark => Style::new().green().bright(),
            Theme::Light => Style::new().bold(),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}
