//! CLI command definitions

use clap::{Parser, ValueEnum};
use regchat_domain::RegulatoryDomain;
use std::path::PathBuf;

/// Output format for chat responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Answer, citations, sources and warnings
    Full,
    /// Only the answer text
    Answer,
    /// Raw response as JSON
    Json,
}

impl From<OutputFormat> for regchat_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => regchat_domain::OutputFormat::Full,
            OutputFormat::Answer => regchat_domain::OutputFormat::Answer,
            OutputFormat::Json => regchat_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for regchat
#[derive(Parser, Debug)]
#[command(name = "regchat")]
#[command(author, version, about = "Regulatory assistant for Pix and Open Finance")]
#[command(long_about = r#"
regchat asks the "Agente Regulatório" backend questions about Pix and
Open Finance regulation and prints the answer with its normative citations
and the documents it was grounded on.

Configuration is merged from (lowest to highest priority):
1. Built-in defaults
2. ~/.config/regchat/config.toml          Global config
3. ./regchat.toml or ./.regchat.toml      Project-level config
4. --config <path>                        Explicit config file
5. REGCHAT_API_URL, REGCHAT_<SECTION>__<KEY>   Environment
6. Command-line flags

Example:
  regchat "Quais são as obrigações de um PSP no Pix?"
  regchat -d open_finance "Como funciona o consentimento?"
  regchat --chat
  regchat --health
  regchat --reindex pix
  regchat --smoke
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Regulatory domain: pix or open_finance
    #[arg(short, long, value_name = "DOMAIN")]
    pub domain: Option<RegulatoryDomain>,

    /// Number of documents to retrieve (1-10)
    #[arg(long, value_name = "N")]
    pub top_k: Option<u8>,

    /// Minimum similarity score for retrieved documents (0.0-1.0)
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<f32>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Check backend health and exit
    #[arg(long, conflicts_with_all = ["chat", "smoke", "reindex"])]
    pub health: bool,

    /// Rebuild the document index of a domain and exit
    #[arg(long, value_name = "DOMAIN", conflicts_with_all = ["chat", "smoke"])]
    pub reindex: Option<RegulatoryDomain>,

    /// With --reindex: keep the existing collection instead of recreating it
    #[arg(long, requires = "reindex")]
    pub no_force: bool,

    /// Run the built-in smoke suite against the backend and exit
    #[arg(long, conflicts_with = "chat")]
    pub smoke: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Backend base URL (overrides config and REGCHAT_API_URL)
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_one_shot_question_with_domain() {
        let cli = Cli::try_parse_from([
            "regchat",
            "-d",
            "open_finance",
            "--top-k",
            "5",
            "Como funciona o consentimento?",
        ])
        .unwrap();
        assert_eq!(cli.question.as_deref(), Some("Como funciona o consentimento?"));
        assert_eq!(cli.domain, Some(RegulatoryDomain::OpenFinance));
        assert_eq!(cli.top_k, Some(5));
        assert!(!cli.chat);
    }

    #[test]
    fn test_rejects_unknown_domain() {
        assert!(Cli::try_parse_from(["regchat", "-d", "boleto", "pergunta"]).is_err());
    }

    #[test]
    fn test_reindex_flags() {
        let cli = Cli::try_parse_from(["regchat", "--reindex", "pix", "--no-force"]).unwrap();
        assert_eq!(cli.reindex, Some(RegulatoryDomain::Pix));
        assert!(cli.no_force);

        assert!(Cli::try_parse_from(["regchat", "--no-force"]).is_err());
    }

    #[test]
    fn test_output_and_verbosity() {
        let cli = Cli::try_parse_from(["regchat", "-o", "json", "-vv", "pergunta"]).unwrap();
        assert_eq!(cli.output, Some(OutputFormat::Json));
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            regchat_domain::OutputFormat::from(OutputFormat::Answer),
            regchat_domain::OutputFormat::Answer
        );
    }

    #[test]
    fn test_health_conflicts_with_chat() {
        assert!(Cli::try_parse_from(["regchat", "--health", "--chat"]).is_err());
    }
}
