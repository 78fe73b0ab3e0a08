//! Console output formatter for backend responses

use colored::Colorize;
use regchat_application::{SmokeCaseResult, SmokeReport};
use regchat_domain::{
    ChatResponse, HealthReport, HealthStatus, OutputFormat, QueryPhase, RegulatoryDomain,
    ReindexReport, Source, preview,
};

const INSUFFICIENT_CONTEXT_WARNING: &str =
    "A resposta pode não ter base normativa suficiente nos documentos indexados.";

/// Formats responses and backend reports for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Render a response in the requested format
    pub fn format(response: &ChatResponse, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => Self::format_response(response),
            OutputFormat::Answer => Self::format_answer_only(response),
            OutputFormat::Json => Self::format_json(response),
        }
    }

    /// Render what the page currently shows
    pub fn format_state(phase: &QueryPhase, format: OutputFormat) -> String {
        match (phase, format) {
            (QueryPhase::Success { response, .. }, _) => Self::format(response, format),
            (QueryPhase::Error { message, .. }, OutputFormat::Json) => {
                serde_json::to_string_pretty(&serde_json::json!({ "error": message }))
                    .unwrap_or_else(|_| "{}".to_string())
            }
            (QueryPhase::Error { message, .. }, _) => Self::format_error(message),
            (QueryPhase::Loading { .. }, _) => Self::format_loading(),
            (QueryPhase::Idle, _) => "Nenhuma consulta realizada ainda.".dimmed().to_string(),
        }
    }

    /// Answer, citations, sources and the context warning
    pub fn format_response(response: &ChatResponse) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "Resposta:".cyan().bold()));
        output.push_str(response.answer.trim_end());
        output.push('\n');

        if response.has_citations() {
            output.push_str(&Self::section_header("Citações Normativas:"));
            for citation in &response.citations {
                output.push_str(&format!("  • {}\n", citation));
            }
        }

        if response.has_sources() {
            output.push_str(&Self::section_header(&format!(
                "Documentos Utilizados ({}):",
                response.sources.len()
            )));
            for source in &response.sources {
                output.push_str(&Self::format_source(source));
            }
        }

        if !response.has_sufficient_context {
            output.push('\n');
            output.push_str(&format!("{}\n", Self::warning(INSUFFICIENT_CONTEXT_WARNING)));
        }

        output
    }

    /// Only the answer text (for piping)
    pub fn format_answer_only(response: &ChatResponse) -> String {
        response.answer.clone()
    }

    /// Format as JSON
    pub fn format_json(response: &ChatResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// Error banner shown in place of a response
    pub fn format_error(message: &str) -> String {
        format!("{} {}", "✗".red().bold(), message.red())
    }

    pub fn format_loading() -> String {
        "Processando...".yellow().to_string()
    }

    fn format_source(source: &Source) -> String {
        let mut line = format!("  {}\n", source.reference().bold());
        line.push_str(&format!(
            "    {}\n",
            format!("Fonte: {} | Tema: {}", source.fonte, source.tema).dimmed()
        ));
        if let Some(url) = source.url.as_deref().filter(|u| !u.is_empty()) {
            line.push_str(&format!("    {}\n", url.blue().underline()));
        }
        if let Some(excerpt) = source.excerpt.as_deref() {
            line.push_str(&format!("    \"{}\"\n", preview(excerpt, 160).italic()));
        }
        line
    }

    /// Backend health summary
    pub fn format_health(report: &HealthReport) -> String {
        let label = report.status.as_str();
        let status = match report.status {
            HealthStatus::Healthy => label.green().bold(),
            HealthStatus::Degraded => label.yellow().bold(),
            HealthStatus::Unhealthy | HealthStatus::Unknown => label.red().bold(),
        };

        let mut output = format!("{} {}\n", "Status:".cyan().bold(), status);
        output.push_str(&format!(
            "{} {}\n",
            "Qdrant:".cyan().bold(),
            if report.qdrant_connected {
                "conectado".green()
            } else {
                "desconectado".red()
            }
        ));

        if !report.collections.is_empty() {
            output.push_str(&format!("{}\n", "Coleções:".cyan().bold()));
            for (name, ready) in &report.collections {
                let label = name
                    .parse::<RegulatoryDomain>()
                    .map(|d| d.label().to_string())
                    .unwrap_or_else(|_| name.clone());
                let mark = if *ready { "✓".green() } else { "✗".red() };
                output.push_str(&format!("  {} {}\n", mark, label));
            }
        }

        if !report.timestamp.is_empty() {
            output.push_str(&format!("{}\n", report.timestamp.dimmed()));
        }
        output
    }

    /// Result of a reindex request
    pub fn format_reindex(domain: RegulatoryDomain, report: &ReindexReport) -> String {
        let mut output = format!(
            "{} {} ({})\n",
            "Reindexação:".cyan().bold(),
            domain.label(),
            report.status
        );
        if !report.message.is_empty() {
            output.push_str(&format!("{}\n", report.message));
        }
        output.push_str(&format!(
            "Documentos processados: {}\nChunks criados: {}\n",
            report.documents_processed, report.chunks_created
        ));
        output
    }

    /// Per-case verdicts plus the passed/total summary
    pub fn format_smoke_report(report: &SmokeReport) -> String {
        let mut output = String::new();
        output.push_str(&Self::header("Smoke Test"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}\n",
            "Backend:".cyan().bold(),
            report.health.status.as_str()
        ));

        for (index, result) in report.results.iter().enumerate() {
            output.push_str(&Self::format_smoke_case(index, result));
        }

        let summary = format!("{}/{} casos aprovados", report.passed_count(), report.total());
        output.push('\n');
        if report.all_passed() {
            output.push_str(&format!("{}\n", summary.green().bold()));
        } else {
            output.push_str(&format!("{}\n", summary.red().bold()));
        }
        output.push_str(&Self::footer());
        output
    }

    fn format_smoke_case(index: usize, result: &SmokeCaseResult) -> String {
        let mark = if result.passed() {
            "✓".green().bold()
        } else {
            "✗".red().bold()
        };
        let mut output = format!(
            "\n{} [{}] {} {}\n",
            mark,
            index + 1,
            result.case.domain.label().yellow(),
            result.case.question
        );
        output.push_str(&format!(
            "    Tempo: {:.2}s\n",
            result.elapsed.as_secs_f64()
        ));

        match &result.outcome {
            Ok(verdict) => {
                output.push_str(&format!(
                    "    Palavras-chave: {}/{}",
                    verdict.found_keywords.len(),
                    result.case.expected_keywords.len()
                ));
                if !verdict.found_keywords.is_empty() {
                    output.push_str(&format!(" ({})", verdict.found_keywords.join(", ")));
                }
                output.push('\n');
                output.push_str(&format!(
                    "    Referência a artigo: {}\n",
                    yes_no(verdict.has_article_reference)
                ));
                if !verdict.articles.is_empty() {
                    output.push_str(&format!("    Artigos: {}\n", verdict.articles.join(", ")));
                }
                output.push_str(&format!(
                    "    Contexto suficiente: {}\n    Documentos: {}\n",
                    yes_no(verdict.has_sufficient_context),
                    verdict.source_count
                ));
            }
            Err(message) => {
                output.push_str(&format!("    {}\n", Self::format_error(message)));
            }
        }
        output
    }

    pub fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", title.cyan().bold())
    }

    /// Disclaimer closing every full rendering
    pub fn footer() -> String {
        format!(
            "\n{}\n{}\n",
            "Este sistema é uma ferramenta de auxílio à consulta normativa.".dimmed(),
            "Não substitui consultoria jurídica especializada.".dimmed()
        )
    }

    fn warning(text: &str) -> String {
        format!("{} {}", "⚠".yellow().bold(), text.yellow())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "sim" } else { "não" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regchat_domain::{ChatQuery, QueryState, Question, SmokeCase, SmokeVerdict};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn response(value: serde_json::Value) -> ChatResponse {
        ChatResponse::from_value(value).unwrap()
    }

    #[test]
    fn test_plain_answer_has_no_optional_sections() {
        let output = ConsoleFormatter::format_response(&response(json!({
            "answer": "X",
            "sources": [],
            "citations": [],
            "has_sufficient_context": true
        })));

        assert!(output.contains("Resposta:"));
        assert!(output.contains('X'));
        assert!(!output.contains("Citações Normativas:"));
        assert!(!output.contains("Documentos Utilizados"));
        assert!(!output.contains(INSUFFICIENT_CONTEXT_WARNING));
    }

    #[test]
    fn test_insufficient_context_shows_warning() {
        let output = ConsoleFormatter::format_response(&response(json!({
            "answer": "Não encontrei base normativa.",
            "has_sufficient_context": false
        })));
        assert!(output.contains(INSUFFICIENT_CONTEXT_WARNING));
    }

    #[test]
    fn test_citations_and_sources_are_listed() {
        let output = ConsoleFormatter::format_response(&response(json!({
            "answer": "O prazo é de 30 dias, conforme Art. 5.",
            "citations": ["Resolução BCB 1/2020 - Art. 5"],
            "sources": [
                {
                    "fonte": "BCB",
                    "norma": "Resolução BCB",
                    "numero_norma": "1",
                    "artigo": "5",
                    "ano": 2020,
                    "tema": "Pix",
                    "url": "https://www.bcb.gov.br/estabilidadefinanceira/pix"
                },
                {
                    "fonte": "BCB",
                    "norma": "Resolução Conjunta",
                    "numero_norma": "1",
                    "artigo": null,
                    "ano": 2020,
                    "tema": "Open Finance",
                    "url": null
                }
            ]
        })));

        assert!(output.contains("Citações Normativas:"));
        assert!(output.contains("• Resolução BCB 1/2020 - Art. 5"));
        assert!(output.contains("Documentos Utilizados (2):"));
        assert!(output.contains("Resolução Conjunta 1/2020"));
        assert!(!output.contains("Resolução Conjunta 1/2020 - Art."));
        assert!(output.contains("Fonte: BCB | Tema: Open Finance"));
        assert!(output.contains("https://www.bcb.gov.br/estabilidadefinanceira/pix"));
    }

    #[test]
    fn test_answer_only_and_json() {
        let resp = response(json!({"answer": "Somente a resposta", "citations": ["X"]}));
        assert_eq!(ConsoleFormatter::format_answer_only(&resp), "Somente a resposta");
        assert_eq!(
            ConsoleFormatter::format(&resp, OutputFormat::Answer),
            "Somente a resposta"
        );

        let parsed: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format(&resp, OutputFormat::Json)).unwrap();
        assert_eq!(parsed["answer"], "Somente a resposta");
        assert_eq!(parsed["citations"][0], "X");
    }

    #[test]
    fn test_state_rendering() {
        let mut state = QueryState::new();
        assert!(
            ConsoleFormatter::format_state(state.phase(), OutputFormat::Full)
                .contains("Nenhuma consulta")
        );

        let query = ChatQuery::new(Question::parse("limite").unwrap(), RegulatoryDomain::Pix);
        let generation = state.begin(query);
        assert!(
            ConsoleFormatter::format_state(state.phase(), OutputFormat::Full)
                .contains("Processando...")
        );

        state.resolve(generation, Err("Erro 500: server error".to_string()));
        let banner = ConsoleFormatter::format_state(state.phase(), OutputFormat::Full);
        assert!(banner.contains("Erro 500: server error"));

        let json_error: serde_json::Value = serde_json::from_str(
            &ConsoleFormatter::format_state(state.phase(), OutputFormat::Json),
        )
        .unwrap();
        assert_eq!(json_error["error"], "Erro 500: server error");
    }

    #[test]
    fn test_health_report() {
        let report = HealthReport {
            status: HealthStatus::Degraded,
            qdrant_connected: true,
            collections: BTreeMap::from([
                ("open_finance".to_string(), false),
                ("pix".to_string(), true),
            ]),
            timestamp: "2025-01-10T12:00:00".to_string(),
        };
        let output = ConsoleFormatter::format_health(&report);
        assert!(output.contains("degraded"));
        assert!(output.contains("conectado"));
        assert!(output.contains("Open Finance"));
        assert!(output.contains("Pix"));
    }

    #[test]
    fn test_reindex_report() {
        let report = ReindexReport {
            status: "success".to_string(),
            message: "Reindexação concluída para domínio pix".to_string(),
            documents_processed: 4,
            chunks_created: 120,
            timestamp: String::new(),
        };
        let output = ConsoleFormatter::format_reindex(RegulatoryDomain::Pix, &report);
        assert!(output.contains("Reindexação concluída para domínio pix"));
        assert!(output.contains("Documentos processados: 4"));
        assert!(output.contains("Chunks criados: 120"));
    }

    #[test]
    fn test_smoke_report_summary() {
        let case = SmokeCase::new(RegulatoryDomain::Pix, "Qual é o limite?", &["limite", "artigo"]);
        let good = response(json!({"answer": "O limite está no artigo 12."}));
        let report = SmokeReport {
            health: HealthReport {
                status: HealthStatus::Healthy,
                qdrant_connected: true,
                collections: BTreeMap::new(),
                timestamp: String::new(),
            },
            results: vec![
                SmokeCaseResult {
                    case: case.clone(),
                    elapsed: Duration::from_millis(1500),
                    outcome: Ok(SmokeVerdict::evaluate(&case, &good)),
                },
                SmokeCaseResult {
                    case,
                    elapsed: Duration::from_millis(10),
                    outcome: Err("Erro de conexão: refused".to_string()),
                },
            ],
        };

        let output = ConsoleFormatter::format_smoke_report(&report);
        assert!(output.contains("1/2 casos aprovados"));
        assert!(output.contains("Palavras-chave: 2/2 (limite, artigo)"));
        assert!(output.contains("Artigos: 12"));
        assert!(output.contains("Tempo: 1.50s"));
        assert!(output.contains("Erro de conexão: refused"));
    }

    #[test]
    fn test_header_and_footer() {
        assert!(ConsoleFormatter::header("Agente Regulatório").contains("Agente Regulatório"));
        assert!(ConsoleFormatter::footer().contains("Não substitui consultoria jurídica"));
    }
}
