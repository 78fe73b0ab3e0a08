//! Outgoing chat query

use crate::core::error::DomainError;
use crate::core::question::Question;
use crate::core::regulatory_domain::RegulatoryDomain;
use serde::{Deserialize, Serialize};

/// Optional retrieval overrides understood by the backend.
///
/// Unset values are omitted from the request body so the backend applies its
/// own defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RetrievalOptions {
    /// Number of documents to retrieve (1..=10)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u8>,
    /// Minimum similarity score (0.0..=1.0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<f32>,
}

impl RetrievalOptions {
    pub const MAX_TOP_K: u8 = 10;

    /// Check the ranges the backend enforces, before any request is made
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(k) = self.top_k
            && !(1..=Self::MAX_TOP_K).contains(&k)
        {
            return Err(DomainError::InvalidTopK(k));
        }
        if let Some(score) = self.min_score
            && !(0.0..=1.0).contains(&score)
        {
            return Err(DomainError::InvalidMinScore(score));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.top_k.is_none() && self.min_score.is_none()
    }
}

/// A single submission: the body of `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatQuery {
    pub question: Question,
    pub domain: RegulatoryDomain,
    #[serde(flatten)]
    pub options: RetrievalOptions,
}

impl ChatQuery {
    pub fn new(question: Question, domain: RegulatoryDomain) -> Self {
        Self {
            question,
            domain,
            options: RetrievalOptions::default(),
        }
    }

    /// Attach retrieval overrides, validating their ranges
    pub fn with_options(mut self, options: RetrievalOptions) -> Result<Self, DomainError> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn question(s: &str) -> Question {
        Question::parse(s).unwrap()
    }

    #[test]
    fn test_body_has_only_question_and_domain_by_default() {
        let query = ChatQuery::new(question("Como funciona o consentimento?"), RegulatoryDomain::OpenFinance);
        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(
            body,
            json!({"question": "Como funciona o consentimento?", "domain": "open_finance"})
        );
    }

    #[test]
    fn test_body_includes_overrides_when_set() {
        let query = ChatQuery::new(question("limite"), RegulatoryDomain::Pix)
            .with_options(RetrievalOptions {
                top_k: Some(3),
                min_score: Some(0.5),
            })
            .unwrap();
        let body = serde_json::to_value(&query).unwrap();
        assert_eq!(body["top_k"], 3);
        assert_eq!(body["min_score"], 0.5);
    }

    #[test]
    fn test_top_k_out_of_range() {
        let options = RetrievalOptions {
            top_k: Some(0),
            min_score: None,
        };
        assert_eq!(options.validate(), Err(DomainError::InvalidTopK(0)));

        let options = RetrievalOptions {
            top_k: Some(11),
            min_score: None,
        };
        assert_eq!(options.validate(), Err(DomainError::InvalidTopK(11)));
    }

    #[test]
    fn test_min_score_out_of_range() {
        let query = ChatQuery::new(question("limite"), RegulatoryDomain::Pix).with_options(
            RetrievalOptions {
                top_k: None,
                min_score: Some(1.2),
            },
        );
        assert!(matches!(query, Err(DomainError::InvalidMinScore(_))));
    }

    #[test]
    fn test_empty_options() {
        assert!(RetrievalOptions::default().is_empty());
        assert!(RetrievalOptions::default().validate().is_ok());
    }
}
