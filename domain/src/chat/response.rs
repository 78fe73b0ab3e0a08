//! Chat response value objects
//!
//! - [`ChatResponse`] - the body returned by `POST /chat`
//! - [`Source`] - one regulation/article record used to build the answer

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a 2xx body could not be turned into a [`ChatResponse`]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResponseShapeError {
    #[error("response has no answer")]
    MissingAnswer,

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Answer returned by the regulatory backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated answer text
    pub answer: String,
    /// Documents retrieved to ground the answer
    #[serde(default)]
    pub sources: Vec<Source>,
    /// Normative references cited by the answer, rendered verbatim
    #[serde(default)]
    pub citations: Vec<String>,
    /// False when the backend found too little normative context
    #[serde(default = "default_sufficient")]
    pub has_sufficient_context: bool,
    /// Server timestamp, kept opaque
    #[serde(default)]
    pub timestamp: String,
}

fn default_sufficient() -> bool {
    true
}

impl ChatResponse {
    /// Build a response from a decoded JSON body.
    ///
    /// The body is accepted only if `answer` is a non-empty string; every
    /// other field falls back to its default when absent.
    pub fn from_value(value: serde_json::Value) -> Result<Self, ResponseShapeError> {
        let has_answer = value
            .get("answer")
            .and_then(|a| a.as_str())
            .is_some_and(|a| !a.is_empty());
        if !has_answer {
            return Err(ResponseShapeError::MissingAnswer);
        }
        serde_json::from_value(value).map_err(|e| ResponseShapeError::Malformed(e.to_string()))
    }

    pub fn has_citations(&self) -> bool {
        !self.citations.is_empty()
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }

    /// Whether the answer mentions an article (`artigo` / `art.`)
    pub fn mentions_article(&self) -> bool {
        let lower = self.answer.to_lowercase();
        lower.contains("artigo") || lower.contains("art.")
    }
}

/// A source document record.
///
/// The backend may send either this flat shape or a retrieved chunk
/// `{text, metadata: {...}, chunk_id, score}`; both deserialize here.
/// `fonte`, `norma`, `numero_norma`, `ano` and `tema` are required in
/// either shape, so a record with a missing or mistyped one is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SourceRepr")]
pub struct Source {
    pub fonte: String,
    pub norma: String,
    pub numero_norma: String,
    pub artigo: Option<String>,
    pub ano: i32,
    pub tema: String,
    pub url: Option<String>,
    /// Chunk text, when the backend sent the chunk shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Retrieval similarity, when the backend sent the chunk shape
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Source {
    /// `{norma} {numero_norma}/{ano}` followed by ` - Art. {artigo}` when known
    pub fn reference(&self) -> String {
        let mut reference = format!("{} {}/{}", self.norma, self.numero_norma, self.ano);
        if let Some(artigo) = self.artigo.as_deref().filter(|a| !a.is_empty()) {
            reference.push_str(&format!(" - Art. {}", artigo));
        }
        reference
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceRepr {
    Chunk {
        #[serde(default)]
        text: Option<String>,
        metadata: SourceFields,
        #[serde(default)]
        score: Option<f32>,
    },
    Flat(SourceFields),
}

#[derive(Deserialize)]
struct SourceFields {
    fonte: String,
    norma: String,
    numero_norma: String,
    #[serde(default)]
    artigo: Option<String>,
    ano: i32,
    tema: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    excerpt: Option<String>,
    #[serde(default)]
    score: Option<f32>,
}

impl From<SourceRepr> for Source {
    fn from(repr: SourceRepr) -> Self {
        let (fields, text, chunk_score) = match repr {
            SourceRepr::Chunk {
                text,
                metadata,
                score,
            } => (metadata, text, score),
            SourceRepr::Flat(fields) => (fields, None, None),
        };
        Source {
            fonte: fields.fonte,
            norma: fields.norma,
            numero_norma: fields.numero_norma,
            artigo: fields.artigo,
            ano: fields.ano,
            tema: fields.tema,
            url: fields.url,
            excerpt: text.or(fields.excerpt),
            score: chunk_score.or(fields.score),
        }
    }
}
