//! End-to-end smoke checks against a running backend.
//!
//! A [`SmokeCase`] is a real regulatory question plus keywords a good answer
//! should contain. [`SmokeVerdict::evaluate`] grades one answer.

use crate::chat::response::ChatResponse;
use crate::core::regulatory_domain::RegulatoryDomain;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static ARTICLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:artigo|art\.?)\s*(\d+)").expect("article pattern is valid")
});

/// One question of the smoke suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmokeCase {
    pub domain: RegulatoryDomain,
    pub question: String,
    #[serde(default)]
    pub expected_keywords: Vec<String>,
}

impl SmokeCase {
    pub fn new(domain: RegulatoryDomain, question: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            domain,
            question: question.into(),
            expected_keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Built-in suite of Pix and Open Finance questions
pub fn default_suite() -> Vec<SmokeCase> {
    use RegulatoryDomain::{OpenFinance, Pix};
    vec![
        SmokeCase::new(
            Pix,
            "Quais são as obrigações de um PSP (Prestador de Serviços de Pagamento) no Pix?",
            &["obrigação", "PSP", "Pix", "artigo"],
        ),
        SmokeCase::new(
            Pix,
            "Quais são as regras de participação no Pix?",
            &["regra", "participação", "artigo"],
        ),
        SmokeCase::new(
            Pix,
            "Quais são as penalidades aplicáveis por descumprimento das normas do Pix?",
            &["penalidade", "sanção", "artigo"],
        ),
        SmokeCase::new(
            OpenFinance,
            "Como funciona o consentimento no Open Finance?",
            &["consentimento", "Open Finance", "artigo"],
        ),
        SmokeCase::new(
            OpenFinance,
            "Quais são os direitos do titular de dados no Open Finance?",
            &["direito", "titular", "artigo"],
        ),
        SmokeCase::new(
            Pix,
            "Qual é o limite de transação no Pix?",
            &["limite", "transação", "artigo"],
        ),
    ]
}

/// Article numbers referenced in free text (`Art. 5`, `artigo 12`), in order, deduplicated
pub fn referenced_articles(text: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for caps in ARTICLE_PATTERN.captures_iter(text) {
        let number = caps[1].to_string();
        if !found.contains(&number) {
            found.push(number);
        }
    }
    found
}

/// Grade of a single answered smoke case
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmokeVerdict {
    pub found_keywords: Vec<String>,
    pub has_article_reference: bool,
    pub has_sufficient_context: bool,
    pub source_count: usize,
    pub articles: Vec<String>,
}

impl SmokeVerdict {
    pub fn evaluate(case: &SmokeCase, response: &ChatResponse) -> Self {
        let answer = response.answer.to_lowercase();
        let found_keywords = case
            .expected_keywords
            .iter()
            .filter(|k| answer.contains(&k.to_lowercase()))
            .cloned()
            .collect();

        Self {
            found_keywords,
            has_article_reference: response.mentions_article(),
            has_sufficient_context: response.has_sufficient_context,
            source_count: response.sources.len(),
            articles: referenced_articles(&response.answer),
        }
    }

    /// A case passes when the backend had enough context and cited an article
    pub fn passed(&self) -> bool {
        self.has_sufficient_context && self.has_article_reference
    }
}
