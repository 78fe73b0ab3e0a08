//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::{OutputConfig, ReplConfig};
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::QuerySpinner;
use regchat_application::{
    ChatGateway, CheckHealthUseCase, NoProgress, SubmitOutcome, SubmitQueryUseCase,
};
use regchat_domain::RegulatoryDomain;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::debug;

/// What the loop should do after a slash command
#[derive(Debug, PartialEq, Eq)]
enum CommandResult {
    Continue,
    Exit,
    CheckHealth,
}

/// Interactive chat REPL
pub struct ChatRepl<G: ChatGateway + 'static> {
    submit: SubmitQueryUseCase<G>,
    health: CheckHealthUseCase<G>,
    domain: RegulatoryDomain,
    output: OutputConfig,
    repl: ReplConfig,
}

impl<G: ChatGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(
        submit: SubmitQueryUseCase<G>,
        health: CheckHealthUseCase<G>,
        domain: RegulatoryDomain,
    ) -> Self {
        Self {
            submit,
            health,
            domain,
            output: OutputConfig::default(),
            repl: ReplConfig::default(),
        }
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn with_repl_config(mut self, repl: ReplConfig) -> Self {
        self.repl = repl;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.repl.show_progress = show;
        self
    }

    pub fn domain(&self) -> RegulatoryDomain {
        self.domain
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.repl.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(&self.prompt());

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    if line.starts_with('/') {
                        match self.handle_command(line) {
                            CommandResult::Exit => break,
                            CommandResult::CheckHealth => self.check_health().await,
                            CommandResult::Continue => {}
                        }
                        continue;
                    }

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Até logo!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn prompt(&self) -> String {
        format!("[{}] >>> ", self.domain)
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│       Agente Regulatório - Modo Chat        │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Sistema RAG especializado em Pix e Open Finance - Banco Central do Brasil");
        println!("Domínio: {}", self.domain.label());
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /domain <pix|open_finance> - Switch regulatory domain");
        println!("  /status                    - Show the current query state");
        println!("  /health                    - Check the backend");
        println!("  /help, /h, /?              - Show this help");
        println!("  /quit, /exit, /q           - Exit chat");
        println!();
    }

    /// Handle slash commands
    fn handle_command(&mut self, cmd: &str) -> CommandResult {
        let mut parts = cmd.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let arg = parts.next();

        match name {
            "/quit" | "/exit" | "/q" => {
                println!("Até logo!");
                CommandResult::Exit
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_help();
                CommandResult::Continue
            }
            "/domain" | "/d" => {
                match arg.map(str::parse::<RegulatoryDomain>) {
                    Some(Ok(domain)) => {
                        self.domain = domain;
                        println!("Domínio: {}", domain.label());
                    }
                    Some(Err(e)) => println!("{}", ConsoleFormatter::format_error(&e.to_string())),
                    None => {
                        println!("Domínio atual: {}", self.domain.label());
                        let options: Vec<&str> =
                            RegulatoryDomain::ALL.iter().map(|d| d.as_str()).collect();
                        println!("Opções: {}", options.join(", "));
                    }
                }
                CommandResult::Continue
            }
            "/status" => {
                let phase = self.submit.state();
                println!();
                println!("Domínio: {}", self.domain.label());
                match phase.generation() {
                    Some(generation) => println!("Estado: {} ({})", phase.name(), generation),
                    None => println!("Estado: {}", phase.name()),
                }
                if let Some(error) = phase.error() {
                    println!("{}", ConsoleFormatter::format_error(error));
                }
                println!();
                CommandResult::Continue
            }
            "/health" => CommandResult::CheckHealth,
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                CommandResult::Continue
            }
        }
    }

    async fn check_health(&self) {
        println!();
        match self.health.execute().await {
            Ok(report) => print!("{}", ConsoleFormatter::format_health(&report)),
            Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e.to_string())),
        }
        println!();
    }

    async fn process_question(&self, question: &str) {
        println!();

        let outcome = if self.repl.show_progress {
            let spinner = QuerySpinner::new();
            self.submit
                .submit_with_progress(question, self.domain, &spinner)
                .await
        } else {
            self.submit
                .submit_with_progress(question, self.domain, &NoProgress)
                .await
        };

        match outcome {
            Ok(SubmitOutcome::Applied(phase)) => {
                println!("{}", ConsoleFormatter::format_state(&phase, self.output.format));
            }
            Ok(SubmitOutcome::Stale(generation)) => {
                debug!("Dropped stale result {}", generation);
            }
            Ok(SubmitOutcome::Skipped) => {}
            Err(e) => eprintln!("{}", ConsoleFormatter::format_error(&e.to_string())),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use regchat_application::GatewayError;
    use regchat_domain::{ChatQuery, ChatResponse, HealthReport, ReindexReport};
    use std::sync::Arc;

    struct OfflineGateway;

    #[async_trait]
    impl ChatGateway for OfflineGateway {
        async fn ask(&self, _query: &ChatQuery) -> Result<ChatResponse, GatewayError> {
            Err(GatewayError::Connection("offline".into()))
        }

        async fn health(&self) -> Result<HealthReport, GatewayError> {
            Err(GatewayError::Connection("offline".into()))
        }

        async fn reindex(
            &self,
            _domain: RegulatoryDomain,
            _force: bool,
        ) -> Result<ReindexReport, GatewayError> {
            Err(GatewayError::Connection("offline".into()))
        }
    }

    fn repl() -> ChatRepl<OfflineGateway> {
        let gateway = Arc::new(OfflineGateway);
        ChatRepl::new(
            SubmitQueryUseCase::new(Arc::clone(&gateway)),
            CheckHealthUseCase::new(gateway),
            RegulatoryDomain::Pix,
        )
        .with_progress(false)
    }

    #[test]
    fn test_domain_command_switches_domain() {
        let mut repl = repl();
        assert_eq!(
            repl.handle_command("/domain open_finance"),
            CommandResult::Continue
        );
        assert_eq!(repl.domain(), RegulatoryDomain::OpenFinance);
        assert_eq!(repl.prompt(), "[open_finance] >>> ");

        repl.handle_command("/domain boleto");
        assert_eq!(repl.domain(), RegulatoryDomain::OpenFinance);
    }

    #[test]
    fn test_quit_and_health_commands() {
        let mut repl = repl();
        assert_eq!(repl.handle_command("/quit"), CommandResult::Exit);
        assert_eq!(repl.handle_command("/q"), CommandResult::Exit);
        assert_eq!(repl.handle_command("/health"), CommandResult::CheckHealth);
        assert_eq!(repl.handle_command("/unknown"), CommandResult::Continue);
    }

    #[tokio::test]
    async fn test_failed_question_leaves_error_state() {
        let repl = repl();
        repl.process_question("Qual é o limite?").await;

        let phase = repl.submit.state();
        assert_eq!(phase.error(), Some("Erro de conexão: offline"));
    }
}
