//! Output formatting and progress reporting
//!
//! Everything here writes to stderr; reports and command results go to stdout.

use console::{style, Style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use thanglish_probe::{ScenarioResult, ScenarioStatus, SuiteReport};

/// Progress reporter for suite runs
#[derive(Debug)]
pub struct ProgressReporter {
    term: Term,
    progress_bar: Option<ProgressBar>,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl ProgressReporter {
    /// Create a new progress reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            progress_bar: None,
            use_color,
            quiet,
        }
    }

    /// Start a progress bar over `total` scenarios
    pub fn start(&mut self, total: usize, suite: &str) {
        if self.quiet {
            return;
        }

        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        pb.set_message(suite.to_string());
        self.progress_bar = Some(pb);
    }

    /// Advance the bar and print one line for `result`
    pub fn record(&self, result: &ScenarioResult) {
        if let Some(ref pb) = self.progress_bar {
            pb.inc(1);
        }
        let line = format!("{} {}", result.id, result.title);
        match result.status {
            ScenarioStatus::Passed => self.success(&line),
            ScenarioStatus::Skipped => self.skip(&line),
            ScenarioStatus::Failed | ScenarioStatus::Errored => {
                let detail = result.error.as_deref().unwrap_or_default();
                self.failure(&format!("{line}: {detail}"));
            }
        }
    }

    /// Finish progress bar
    pub fn finish(&self) {
        if let Some(ref pb) = self.progress_bar {
            pb.finish_and_clear();
        }
    }

    fn write_line(&self, line: &str) {
        match self.progress_bar {
            Some(ref pb) => pb.suspend(|| {
                let _ = self.term.write_line(line);
            }),
            None => {
                let _ = self.term.write_line(line);
            }
        }
    }

    fn prefixed(&self, glyph: &str, plain: &str, paint: Style, message: &str) -> String {
        let prefix = if self.use_color {
            paint.apply_to(glyph).to_string()
        } else {
            plain.to_string()
        };
        format!("{prefix} {message}")
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write_line(&self.prefixed("✓", "PASS", Style::new().green().bold(), message));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        self.write_line(&self.prefixed("✗", "FAIL", Style::new().red().bold(), message));
    }

    /// Print a skipped scenario
    pub fn skip(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write_line(&self.prefixed("-", "SKIP", Style::new().yellow(), message));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write_line(&self.warning_line(message));
    }

    /// Warning line, coloured when enabled
    #[must_use]
    pub fn warning_line(&self, message: &str) -> String {
        self.prefixed("⚠", "WARN", Style::new().yellow().bold(), message)
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.write_line(&self.prefixed("ℹ", "INFO", Style::new().blue().bold(), message));
    }

    /// Print a section header
    pub fn header(&self, title: &str) {
        if self.quiet {
            return;
        }

        let styled = if self.use_color {
            style(title).bold().underlined().to_string()
        } else {
            format!("=== {title} ===")
        };

        self.write_line("");
        self.write_line(&styled);
    }

    /// Print the suite summary
    pub fn summary(&self, report: &SuiteReport) {
        if self.quiet && report.all_passed() {
            return;
        }

        self.write_line("");
        self.write_line(&self.summary_line(report));
    }

    /// Summary line, coloured when enabled
    #[must_use]
    pub fn summary_line(&self, report: &SuiteReport) -> String {
        let passed = report.passed();
        let failed = report.failed() + report.errored();
        let skipped = report.skipped();
        let secs = report.duration.as_secs_f64();
        let status = if report.all_passed() { "PASSED" } else { "FAILED" };

        if !self.use_color {
            return format!(
                "{status} {} scenarios in {secs:.2}s ({passed} passed, {failed} failed, {skipped} skipped)",
                report.total()
            );
        }

        let passed_style = Style::new().green().bold();
        let failed_style = Style::new().red().bold();
        let skipped_style = Style::new().yellow();
        let status = if report.all_passed() {
            passed_style.apply_to(status)
        } else {
            failed_style.apply_to(status)
        };
        format!(
            "{} {} scenarios in {secs:.2}s ({} passed, {} failed, {} skipped)",
            status,
            report.total(),
            passed_style.apply_to(passed),
            if failed > 0 {
                failed_style.apply_to(failed).to_string()
            } else {
                failed.to_string()
            },
            skipped_style.apply_to(skipped)
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use thanglish_probe::Polarity;

    fn result(id: &str, status: ScenarioStatus) -> ScenarioResult {
        ScenarioResult {
            id: id.to_string(),
            title: format!("title {id}"),
            polarity: Polarity::Positive,
            status,
            inputs: vec!["vanakkam".to_string()],
            outputs: vec!["வணக்கம்".to_string()],
            error: None,
            error_kind: None,
            duration: Duration::from_millis(2600),
        }
    }

    fn report(statuses: &[ScenarioStatus]) -> SuiteReport {
        let results = statuses
            .iter()
            .enumerate()
            .map(|(i, status)| result(&format!("pos-{i:02}"), *status))
            .collect();
        SuiteReport::new("mini", "https://tamil.example/", results, Duration::from_secs(3))
    }

    #[test]
    fn test_plain_summary_line() {
        let reporter = ProgressReporter::new(false, false);
        let line = reporter.summary_line(&report(&[
            ScenarioStatus::Passed,
            ScenarioStatus::Failed,
            ScenarioStatus::Errored,
            ScenarioStatus::Skipped,
        ]));
        assert_eq!(
            line,
            "FAILED 4 scenarios in 3.00s (1 passed, 2 failed, 1 skipped)"
        );
    }

    #[test]
    fn test_passing_summary_line() {
        let reporter = ProgressReporter::new(false, false);
        let line = reporter.summary_line(&report(&[ScenarioStatus::Passed]));
        assert!(line.starts_with("PASSED 1 scenarios"));
    }

    #[test]
    fn test_warning_line_without_color() {
        let reporter = ProgressReporter::new(false, false);
        assert_eq!(
            reporter.warning_line("browser did not close cleanly: connection reset"),
            "WARN browser did not close cleanly: connection reset"
        );
    }

    #[test]
    fn test_warning_line_with_color_keeps_message() {
        let reporter = ProgressReporter::new(true, false);
        let line = reporter.warning_line("browser did not close cleanly");
        assert!(!line.starts_with("WARN"));
        assert!(line.ends_with(" browser did not close cleanly"));
    }

    #[test]
    fn test_prefixes_without_color() {
        let reporter = ProgressReporter::new(false, false);
        let line = reporter.prefixed("✓", "PASS", Style::new().green(), "pos-01 greeting");
        assert_eq!(line, "PASS pos-01 greeting");
    }

    #[test]
    fn test_quiet_reporter_has_no_bar() {
        let mut reporter = ProgressReporter::new(false, true);
        reporter.start(40, "suite");
        assert!(reporter.progress_bar.is_none());
        let mut failed = result("neg-07", ScenarioStatus::Failed);
        failed.error = Some("expected output to be empty".to_string());
        reporter.record(&failed);
        reporter.finish();
    }

    #[test]
    fn test_record_advances_bar() {
        let mut reporter = ProgressReporter::new(false, false);
        reporter.start(2, "suite");
        reporter.record(&result("pos-01", ScenarioStatus::Passed));
        assert_eq!(reporter.progress_bar.as_ref().unwrap().position(), 1);
        reporter.finish();
    }
}
