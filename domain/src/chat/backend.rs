//! Backend maintenance reports (`/health`, `/reindex`)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overall backend status reported by `/health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
    #[serde(other)]
    Unknown,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
            HealthStatus::Unknown => "unknown",
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    #[serde(default)]
    pub qdrant_connected: bool,
    /// Per-domain flag: collection exists and holds indexed points
    #[serde(default)]
    pub collections: BTreeMap<String, bool>,
    #[serde(default)]
    pub timestamp: String,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }

    /// Domains whose collection is populated
    pub fn indexed_domains(&self) -> impl Iterator<Item = &str> {
        self.collections
            .iter()
            .filter(|(_, ready)| **ready)
            .map(|(name, _)| name.as_str())
    }
}

/// Body of `POST /reindex`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReindexReport {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub documents_processed: u64,
    #[serde(default)]
    pub chunks_created: u64,
    #[serde(default)]
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_health_report_deserialize() {
        let report: HealthReport = serde_json::from_value(json!({
            "status": "degraded",
            "qdrant_connected": true,
            "collections": {"pix": true, "open_finance": false},
            "timestamp": "2025-01-10T12:00:00"
        }))
        .unwrap();
        assert_eq!(report.status, HealthStatus::Degraded);
        assert!(!report.is_healthy());
        assert_eq!(report.indexed_domains().collect::<Vec<_>>(), vec!["pix"]);
    }

    #[test]
    fn test_unknown_status() {
        let report: HealthReport = serde_json::from_value(json!({"status": "booting"})).unwrap();
        assert_eq!(report.status, HealthStatus::Unknown);
        assert!(report.collections.is_empty());
    }

    #[test]
    fn test_reindex_report_deserialize() {
        let report: ReindexReport = serde_json::from_value(json!({
            "status": "success",
            "message": "Reindexação concluída para domínio pix",
            "documents_processed": 12,
            "chunks_created": 340
        }))
        .unwrap();
        assert_eq!(report.chunks_created, 340);
        assert_eq!(report.documents_processed, 12);
    }
}
