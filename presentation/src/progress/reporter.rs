//! Progress reporting while the backend works

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use regchat_application::{QueryProgressNotifier, SmokeCaseResult, SmokeProgressNotifier};
use regchat_domain::{ChatQuery, RequestGeneration, SmokeCase};
use std::sync::Mutex;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(100);

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg} {elapsed:.dim}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn suite_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-")
}

/// Spinner shown while a query is in flight
#[derive(Default)]
pub struct QuerySpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl QuerySpinner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl QueryProgressNotifier for QuerySpinner {
    fn on_request_start(&self, _generation: RequestGeneration, query: &ChatQuery) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(spinner_style());
        pb.set_message(format!("Processando... [{}]", query.domain.label()));
        pb.enable_steady_tick(TICK);

        if let Ok(mut slot) = self.bar.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn on_request_end(&self, _generation: RequestGeneration, _success: bool, _applied: bool) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
    }
}

/// Progress bar over the smoke suite cases
#[derive(Default)]
pub struct SmokeProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl SmokeProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SmokeProgressNotifier for SmokeProgressReporter {
    fn on_case_start(&self, index: usize, total: usize, case: &SmokeCase) {
        let Ok(mut slot) = self.bar.lock() else {
            return;
        };
        let pb = slot.get_or_insert_with(|| {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(suite_style());
            pb.set_prefix("Smoke");
            pb.enable_steady_tick(TICK);
            pb
        });
        pb.set_position(index as u64);
        pb.set_message(case.domain.label().to_string());
    }

    fn on_case_complete(&self, index: usize, result: &SmokeCaseResult) {
        let Ok(mut slot) = self.bar.lock() else {
            return;
        };
        let Some(pb) = slot.as_ref() else {
            return;
        };
        pb.inc(1);
        if pb.length() == Some(index as u64 + 1) {
            pb.finish_and_clear();
            *slot = None;
        } else if !result.passed() {
            pb.println(format!("{} caso {} falhou", "x".red(), index + 1));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl QueryProgressNotifier for SimpleProgress {
    fn on_request_start(&self, generation: RequestGeneration, query: &ChatQuery) {
        eprintln!(
            "{} {} {} [{}]",
            "->".cyan(),
            "Processando...".bold(),
            generation,
            query.domain.label()
        );
    }

    fn on_request_end(&self, _generation: RequestGeneration, success: bool, applied: bool) {
        if !applied {
            eprintln!("  {} resultado descartado (consulta mais recente em andamento)", "~".yellow());
        } else if !success {
            eprintln!("  {} falhou", "x".red());
        }
    }
}

impl SmokeProgressNotifier for SimpleProgress {
    fn on_case_start(&self, index: usize, total: usize, case: &SmokeCase) {
        eprintln!(
            "{} [{}/{}] {}",
            "->".cyan(),
            index + 1,
            total,
            case.domain.label().bold()
        );
    }

    fn on_case_complete(&self, _index: usize, result: &SmokeCaseResult) {
        if result.passed() {
            eprintln!("  {} {:.2}s", "v".green(), result.elapsed.as_secs_f64());
        } else {
            eprintln!("  {} {:.2}s", "x".red(), result.elapsed.as_secs_f64());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regchat_domain::{QueryState, Question, RegulatoryDomain};

    #[test]
    fn test_spinner_start_and_end_leave_no_bar() {
        let spinner = QuerySpinner::new();
        let query = ChatQuery::new(Question::parse("limite").unwrap(), RegulatoryDomain::Pix);
        let generation = QueryState::new().begin(query.clone());

        spinner.on_request_start(generation, &query);
        assert!(spinner.bar.lock().unwrap().is_some());
        spinner.on_request_end(generation, true, true);
        assert!(spinner.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_smoke_bar_finishes_after_last_case() {
        let reporter = SmokeProgressReporter::new();
        let case = SmokeCase::new(RegulatoryDomain::Pix, "limite", &[]);
        let result = SmokeCaseResult {
            case: case.clone(),
            elapsed: Duration::from_millis(5),
            outcome: Err("falhou".to_string()),
        };

        for index in 0..2 {
            reporter.on_case_start(index, 2, &case);
            reporter.on_case_complete(index, &result);
        }
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
