//! Output format value object

use serde::{Deserialize, Serialize};

/// How a chat response is printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Answer, citations, sources and warnings (default)
    #[default]
    Full,
    /// Only the answer text
    Answer,
    /// The raw response as JSON
    Json,
}
