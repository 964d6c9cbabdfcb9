//! Tipos de erro para o cliente da API Gemini.
//!
//! Define [`GeminiError`] com variantes para credencial ausente, rate limiting,
//! erros da API e erros de rede. Usa `thiserror` para derivar `Display` e
//! `Error` a partir dos atributos `#[error(...)]`.

use thiserror::Error;

/// Erros que podem ocorrer ao interagir com a API Gemini.
///
/// - [`MissingApiKey`](GeminiError::MissingApiKey): nenhuma credencial configurada
/// - [`RateLimited`](GeminiError::RateLimited): o servidor retornou HTTP 429
/// - [`ApiError`](GeminiError::ApiError): qualquer outro erro HTTP (4xx/5xx)
/// - [`NetworkError`](GeminiError::NetworkError): falha na camada de rede
#[derive(Debug, Error)]
pub enum GeminiError {
    /// Nenhuma chave de API foi configurada; a requisição nem é enviada.
    #[error("no API key configured")]
    MissingApiKey,

    /// O servidor retornou HTTP 429.
    /// O campo `retry_after_ms` vem do cabeçalho `retry-after`, quando presente.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Erro retornado pela API (ex.: 400 chave inválida, 500 erro interno).
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Falha de rede subjacente (DNS, conexão recusada, timeout, corpo inválido).
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
