//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Invalid domain: {0} (expected 'pix' or 'open_finance')")]
    InvalidDomain(String),

    #[error("top_k must be between 1 and 10, got {0}")]
    InvalidTopK(u8),

    #[error("min_score must be between 0.0 and 1.0, got {0}")]
    InvalidMinScore(f32),
}

impl DomainError {
    /// Check if this error was caused by the user's question text
    pub fn is_question_error(&self) -> bool {
        matches!(self, DomainError::InvalidQuestion(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_domain_display() {
        let error = DomainError::InvalidDomain("boleto".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid domain: boleto (expected 'pix' or 'open_finance')"
        );
    }

    #[test]
    fn test_is_question_error() {
        assert!(DomainError::InvalidQuestion("empty".to_string()).is_question_error());
        assert!(!DomainError::InvalidTopK(0).is_question_error());
        assert!(!DomainError::InvalidMinScore(1.5).is_question_error());
    }
}
