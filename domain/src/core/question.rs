//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question to be sent to the regulatory backend (Value Object)
///
/// The content must contain at least one non-whitespace character. The text
/// is kept exactly as typed; trimming is only used for the emptiness check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question, returning None if it is blank
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Create a new question, failing with [`DomainError::InvalidQuestion`] if blank
    pub fn parse(content: impl Into<String>) -> Result<Self, DomainError> {
        Self::try_new(content)
            .ok_or_else(|| DomainError::InvalidQuestion("question cannot be empty".to_string()))
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Question::parse(s)
    }
}

impl TryFrom<&str> for Question {
    type Error = DomainError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Question::parse(s)
    }
}

impl From<Question> for String {
    fn from(q: Question) -> Self {
        q.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_creation() {
        let q = Question::parse("Quais são as regras do Pix?").unwrap();
        assert_eq!(q.content(), "Quais são as regras do Pix?");
    }

    #[test]
    fn test_try_new_blank() {
        assert!(Question::try_new("").is_none());
        assert!(Question::try_new("   ").is_none());
        assert!(Question::try_new("\n\t ").is_none());
    }

    #[test]
    fn test_content_is_not_trimmed() {
        let q = Question::try_new("  limite do Pix?  ").unwrap();
        assert_eq!(q.content(), "  limite do Pix?  ");
    }

    #[test]
    fn test_parse_blank_is_error() {
        let err = Question::parse(" ").unwrap_err();
        assert!(err.is_question_error());
    }

    #[test]
    fn test_serde_rejects_blank() {
        assert!(serde_json::from_str::<Question>("\"  \"").is_err());
        let q: Question = serde_json::from_str("\"O que é PSP?\"").unwrap();
        assert_eq!(serde_json::to_string(&q).unwrap(), "\"O que é PSP?\"");
    }
}
