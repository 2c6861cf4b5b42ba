//! Suite reports in text and JSON.

use crate::harness::{ScenarioResult, ScenarioStatus};
use crate::result::ProbeResult;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

/// Results of one suite run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteReport {
    /// Suite name
    pub suite: String,
    /// Page the suite ran against
    pub target_url: String,
    /// Completion time, RFC 3339
    pub timestamp: String,
    /// Total wall time
    pub duration: Duration,
    /// Per-scenario results in suite order
    pub results: Vec<ScenarioResult>,
}

impl SuiteReport {
    /// Create a report stamped with the current time
    #[must_use]
    pub fn new(
        suite: impl Into<String>,
        target_url: impl Into<String>,
        results: Vec<ScenarioResult>,
        duration: Duration,
    ) -> Self {
        Self {
            suite: suite.into(),
            target_url: target_url.into(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            duration,
            results,
        }
    }

    fn count(&self, status: ScenarioStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Number of scenarios run or skipped
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Passed scenarios
    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(ScenarioStatus::Passed)
    }

    /// Scenarios whose predicate failed
    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(ScenarioStatus::Failed)
    }

    /// Scenarios that errored before a verdict
    #[must_use]
    pub fn errored(&self) -> usize {
        self.count(ScenarioStatus::Errored)
    }

    /// Skipped scenarios
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(ScenarioStatus::Skipped)
    }

    /// Whether every scenario passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.status.is_passed())
    }

    /// Failed and errored results
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioResult> {
        self.results.iter().filter(|r| r.status.is_failure())
    }

    /// One-line totals
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{}: {} passed, {} failed, {} errored, {} skipped ({} total) in {:.1}s",
            self.suite,
            self.passed(),
            self.failed(),
            self.errored(),
            self.skipped(),
            self.total(),
            self.duration.as_secs_f64()
        )
    }

    /// Plain-text rendering: one line per scenario, details for failures
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} @ {} ({})", self.suite, self.target_url, self.timestamp);
        for r in &self.results {
            let _ = writeln!(out, "  {:<5} {} {}", r.status, r.id, r.title);
        }
        let failures: Vec<_> = self.failures().collect();
        if !failures.is_empty() {
            let _ = writeln!(out, "\nFailures:");
            for r in failures {
                let _ = writeln!(out, "  {} {}", r.id, r.title);
                for input in &r.inputs {
                    let _ = writeln!(out, "    input:  \"{}\"", one_line(input));
                }
                for output in &r.outputs {
                    let _ = writeln!(out, "    output: \"{}\"", one_line(output));
                }
                if let Some(error) = &r.error {
                    let _ = writeln!(out, "    error:  {error}");
                }
            }
        }
        let _ = writeln!(out, "\n{}", self.summary_line());
        out
    }

    /// Pretty JSON rendering
    pub fn to_json(&self) -> ProbeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render in `format`
    pub fn render(&self, format: ReportFormat) -> ProbeResult<String> {
        match format {
            ReportFormat::Text => Ok(self.to_text()),
            ReportFormat::Json => self.to_json(),
        }
    }

    /// Render in `format` and write to `path`
    pub fn write_to(&self, path: impl AsRef<Path>, format: ReportFormat) -> ProbeResult<()> {
        std::fs::write(path, self.render(format)?)?;
        Ok(())
    }
}

/// `text` with line breaks escaped; Tamil combining marks are kept as-is
fn one_line(text: &str) -> String {
    text.replace('\n', "\\n")
}
