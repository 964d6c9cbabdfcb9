//! Tipos de dados para requisições e respostas do endpoint `generateContent`.
//!
//! Todas as structs derivam `Serialize` e `Deserialize` e usam `camelCase`
//! no JSON, conforme o formato esperado pela API Gemini `v1beta`.

use serde::{Deserialize, Serialize};

/// Corpo da requisição para `models/{model}:generateContent`.
///
/// Contém a instrução de sistema, a conversa e a configuração de geração
/// (tipo MIME e schema da resposta estruturada).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Instrução de sistema que define a persona e o contrato de saída.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    /// Mensagens que compõem a conversa.
    pub contents: Vec<Content>,
    /// Restrições de geração (formato JSON, schema).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

/// Uma mensagem: papel opcional e lista de partes textuais.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Papel do remetente: "user" ou "model". Ausente na instrução de sistema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Partes textuais da mensagem.
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Mensagem do usuário com uma única parte de texto.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".into()),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Instrução de sistema (sem papel).
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Uma parte textual de uma mensagem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: String,
}

/// Configuração de geração enviada junto com a requisição.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Tipo MIME da resposta (ex.: "application/json").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Schema que restringe a resposta estruturada.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Schema>,
}

/// Subconjunto do schema OpenAPI aceito pela Gemini.
///
/// O campo `schema_type` é serializado como `"type"` no JSON via `serde(rename)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    /// "OBJECT", "STRING", ...
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Propriedades de um objeto, em ordem de declaração.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

/// Resposta retornada por `generateContent`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidatos gerados; normalmente apenas um.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Estatísticas de uso de tokens, quando informadas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Concatena o texto das partes do primeiro candidato.
    ///
    /// Retorna `None` se não houver candidato ou se o texto estiver vazio.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .as_ref()?
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Um candidato de resposta.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// Motivo da parada (ex.: "STOP", "SAFETY"). `None` se omitido.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Estatísticas de consumo de tokens para uma chamada.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}
