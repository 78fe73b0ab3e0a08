//! Regulatory domain selector

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The regulatory domain a question is scoped to.
///
/// The backend keeps one document collection per domain; the client treats
/// the values as opaque tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegulatoryDomain {
    #[default]
    Pix,
    OpenFinance,
}

impl RegulatoryDomain {
    /// All selectable domains, in display order
    pub const ALL: [RegulatoryDomain; 2] = [RegulatoryDomain::Pix, RegulatoryDomain::OpenFinance];

    /// Wire identifier (`pix` / `open_finance`)
    pub fn as_str(&self) -> &'static str {
        match self {
            RegulatoryDomain::Pix => "pix",
            RegulatoryDomain::OpenFinance => "open_finance",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            RegulatoryDomain::Pix => "Pix",
            RegulatoryDomain::OpenFinance => "Open Finance",
        }
    }
}

impl std::fmt::Display for RegulatoryDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegulatoryDomain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pix" => Ok(RegulatoryDomain::Pix),
            "open_finance" | "open-finance" | "openfinance" => Ok(RegulatoryDomain::OpenFinance),
            other => Err(DomainError::InvalidDomain(other.to_string())),
        }
    }
}
