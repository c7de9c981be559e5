//! Progress reporting for one-shot tool calls

use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Spinner shown on stderr while a tool call is in flight.
///
/// Hidden when quiet, so stdout stays clean for piping.
pub struct ProgressReporter {
    bar: ProgressBar,
}

impl ProgressReporter {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
            bar.set_style(Self::spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        };
        Self { bar }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    pub fn on_call_start(&self, tool: &str) {
        self.bar.set_prefix(tool.to_string());
        self.bar.set_message("calling backend...");
    }

    pub fn on_call_complete(&self, success: bool) {
        let status = if success {
            "done".green().to_string()
        } else {
            "failed".red().to_string()
        };
        self.bar.finish_and_clear();
        if !self.bar.is_hidden() {
            eprintln!("{} {}", self.bar.prefix().bold(), status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_is_hidden() {
        let reporter = ProgressReporter::new(true);
        reporter.on_call_start("query_cicd_prepare");
        assert!(reporter.bar.is_hidden());
        assert_eq!(reporter.bar.prefix(), "query_cicd_prepare");
        reporter.on_call_complete(true);
        assert!(reporter.bar.is_finished());
    }
}
