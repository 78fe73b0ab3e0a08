//! CLI entrypoint for regchat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use regchat_application::{
    CheckHealthUseCase, ConversationLogger, NoConversationLogger, NoProgress, NoSmokeProgress,
    QueryProgressNotifier, ReindexInput, ReindexUseCase, RunSmokeSuiteUseCase,
    SmokeProgressNotifier, SubmitOutcome, SubmitQueryUseCase,
};
use regchat_domain::{OutputFormat, default_suite};
use regchat_infrastructure::{ConfigLoader, FileConfig, HttpChatGateway, JsonlConversationLogger};
use regchat_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, QuerySpinner, ReplConfig, SimpleProgress,
    SmokeProgressReporter,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_without_files()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
    .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;
    apply_cli_overrides(&mut config, &cli);
    config.validate().context("Invalid configuration")?;

    let _log_guard = init_tracing(cli.verbose, config.logging.directory.as_deref());
    info!("Starting regchat against {}", config.api.base_url);

    let output = OutputConfig {
        format: config.output.format.unwrap_or_default(),
        color: config.output.color,
    };
    output.apply_color();

    // === Dependency Injection ===
    let gateway = Arc::new(HttpChatGateway::new(config.api.base_url.as_str())?);
    let logger = conversation_logger(&config);

    if cli.health {
        let report = CheckHealthUseCase::new(gateway).execute().await;
        return Ok(match report {
            Ok(report) => {
                print!("{}", ConsoleFormatter::format_health(&report));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::format_error(&e.to_string()));
                ExitCode::FAILURE
            }
        });
    }

    if let Some(domain) = cli.reindex {
        let input = if cli.no_force {
            ReindexInput::new(domain).without_force()
        } else {
            ReindexInput::new(domain)
        };
        return Ok(match ReindexUseCase::new(gateway).execute(input).await {
            Ok(report) => {
                print!("{}", ConsoleFormatter::format_reindex(domain, &report));
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::format_error(&e.to_string()));
                ExitCode::FAILURE
            }
        });
    }

    if cli.smoke {
        let use_case = RunSmokeSuiteUseCase::new(gateway).with_behavior(config.behavior());
        let progress = smoke_progress(ProgressStyle::detect(config.repl.show_progress));
        let report = use_case
            .execute_with_progress(default_suite(), progress.as_ref())
            .await;
        return Ok(match report {
            Ok(report) => {
                print!("{}", ConsoleFormatter::format_smoke_report(&report));
                if report.all_passed() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            }
            Err(e) => {
                eprintln!("{}", ConsoleFormatter::format_error(&e.to_string()));
                ExitCode::FAILURE
            }
        });
    }

    let submit = SubmitQueryUseCase::new(Arc::clone(&gateway))
        .with_behavior(config.behavior())
        .with_options(config.chat.retrieval_options())
        .with_logger(logger);
    let domain = config.chat.domain;

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress,
            history_file: config.repl.history_file.clone(),
        };
        let mut repl = ChatRepl::new(submit, CheckHealthUseCase::new(gateway), domain)
            .with_output(output)
            .with_repl_config(repl_config);
        repl.run().await?;
        return Ok(ExitCode::SUCCESS);
    }

    // Single question mode - question is required
    let Some(question) = cli.question else {
        bail!("Question is required. Use --chat for interactive mode.");
    };

    let show_banner = output.format == OutputFormat::Full && !cli.quiet;
    if show_banner {
        println!("{}", ConsoleFormatter::header("Agente Regulatório"));
        println!();
        println!("Pergunta: {}", question.trim());
        println!("Domínio:  {}", domain.label());
        println!();
    }

    let progress = query_progress(ProgressStyle::detect(config.repl.show_progress));
    let outcome = submit
        .submit_with_progress(&question, domain, progress.as_ref())
        .await?;

    let phase = match outcome {
        SubmitOutcome::Applied(phase) => phase,
        SubmitOutcome::Skipped => bail!("Question is empty; nothing was sent."),
        SubmitOutcome::Stale(generation) => {
            bail!("Result {} was superseded by a newer query", generation)
        }
    };
    debug!("Query ended in state {}", phase.name());

    if let Some(message) = phase.error() {
        if output.format == OutputFormat::Json {
            println!("{}", ConsoleFormatter::format_state(&phase, output.format));
        } else {
            eprintln!("{}", ConsoleFormatter::format_error(message));
        }
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", ConsoleFormatter::format_state(&phase, output.format));
    if show_banner {
        print!("{}", ConsoleFormatter::footer());
    }

    Ok(ExitCode::SUCCESS)
}

/// Command-line flags win over every configuration source
fn apply_cli_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(seconds) = cli.timeout {
        config.api.timeout_seconds = Some(seconds);
    }
    if let Some(domain) = cli.domain {
        config.chat.domain = domain;
    }
    if let Some(top_k) = cli.top_k {
        config.chat.top_k = Some(top_k);
    }
    if let Some(min_score) = cli.min_score {
        config.chat.min_score = Some(min_score);
    }
    if let Some(format) = cli.output {
        config.output.format = Some(format.into());
    }
    if cli.quiet {
        config.repl.show_progress = false;
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` wins over `-v`. Diagnostics go to stderr, plus a daily-rotated
/// file when a log directory is configured; the returned guard flushes it.
fn init_tracing(verbose: u8, directory: Option<&str>) -> Option<WorkerGuard> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"), // -vvv or more
        }
    };

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "regchat.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// How progress is shown on stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ProgressStyle {
    Hidden,
    /// Spinners and bars on a terminal
    Animated,
    /// One line per event when stderr is piped or redirected
    Plain,
}

impl ProgressStyle {
    fn detect(show_progress: bool) -> Self {
        Self::choose(show_progress, std::io::stderr().is_terminal())
    }

    fn choose(show_progress: bool, terminal: bool) -> Self {
        match (show_progress, terminal) {
            (false, _) => ProgressStyle::Hidden,
            (true, true) => ProgressStyle::Animated,
            (true, false) => ProgressStyle::Plain,
        }
    }
}

fn query_progress(style: ProgressStyle) -> Box<dyn QueryProgressNotifier> {
    match style {
        ProgressStyle::Hidden => Box::new(NoProgress),
        ProgressStyle::Animated => Box::new(QuerySpinner::new()),
        ProgressStyle::Plain => Box::new(SimpleProgress),
    }
}

fn smoke_progress(style: ProgressStyle) -> Box<dyn SmokeProgressNotifier> {
    match style {
        ProgressStyle::Hidden => Box::new(NoSmokeProgress),
        ProgressStyle::Animated => Box::new(SmokeProgressReporter::new()),
        ProgressStyle::Plain => Box::new(SimpleProgress),
    }
}

fn conversation_logger(config: &FileConfig) -> Arc<dyn ConversationLogger> {
    match config
        .logging
        .conversation_log
        .as_deref()
        .and_then(JsonlConversationLogger::open)
    {
        Some(logger) => {
            info!("Auditing queries to {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoConversationLogger),
    }
}
