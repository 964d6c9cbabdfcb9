//! Configuração carregada a partir de `willai.toml`.
//!
//! A struct [`AppConfig`] contém todos os parâmetros configuráveis.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! As variáveis de ambiente `GEMINI_API_KEY` e `API_KEY` têm precedência
//! sobre o arquivo para a chave da API.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::AppError;
use crate::gemini::{API_BASE_URL, DEFAULT_MODEL};
use crate::theme::Theme;

pub const CONFIG_FILE: &str = "willai.toml";

/// Variáveis consultadas para a chave da API, em ordem de prioridade.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Configuração de nível superior carregada de `willai.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Chave da API Gemini. Vazia significa "sempre usar o fallback".
    #[serde(default)]
    pub api_key: String,

    /// Modelo consultado pelo oráculo.
    #[serde(default = "default_model")]
    pub model: String,

    /// URL base da API (útil para proxies e testes).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Tempo máximo de uma requisição, em segundos.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Tema inicial do cartão e do terminal.
    #[serde(default)]
    pub theme: Theme,

    /// Diretório onde os cartões exportados são gravados.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Probabilidade de YES quando o oráculo está indisponível.
    #[serde(default = "default_fallback_yes_probability")]
    pub fallback_yes_probability: f64,
}

// Valor padrão para o modelo: "gemini-2.5-flash".
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    API_BASE_URL.to_string()
}

// Valor padrão para o timeout: 30s.
fn default_request_timeout_secs() -> u64 {
    30
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

// Valor padrão para o fallback: 70% YES.
fn default_fallback_yes_probability() -> f64 {
    0.7
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            theme: Theme::default(),
            output_dir: default_output_dir(),
            fallback_yes_probability: default_fallback_yes_probability(),
        }
    }
}

impl AppConfig {
    /// Carrega `willai.toml` do diretório atual e aplica o ambiente.
    pub fn load() -> Result<Self, AppError> {
        let mut config = Self::load_from(Path::new(CONFIG_FILE))?;
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Lê um arquivo específico. Usa valores padrão se o arquivo não existir.
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        let config = if path.exists() {
            let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str::<AppConfig>(&contents)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Variável de ambiente tem precedência sobre o arquivo para a chave API.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .find(|key| !key.trim().is_empty())
        {
            self.api_key = key;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.request_timeout_secs == 0 {
            return Err(AppError::Config(
                "request_timeout_secs must be positive".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.fallback_yes_probability) {
            return Err(AppError::Config(format!(
                "fallback_yes_probability must be within 0..=1, got {}",
                self.fallback_yes_probability
            )));
        }
        if self.model.trim().is_empty() {
            return Err(AppError::Config("model must not be empty".into()));
        }
        Ok(())
    }
}
