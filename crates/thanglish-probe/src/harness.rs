//! Suite execution.
//!
//! Every scenario gets a fresh page from a [`PageSource`], owns it for the
//! whole run, and closes it afterwards. Any error is folded into that
//! scenario's [`ScenarioResult`]; the suite carries on with the next one
//! unless fail-fast is set.

use crate::driver::{PageDriver, PageSource};
use crate::report::SuiteReport;
use crate::result::ProbeError;
use crate::scenario::{Polarity, Scenario, TestSuite};
use crate::translator::Translator;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

/// Outcome of one scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Every predicate held
    Passed,
    /// A predicate did not hold
    Failed,
    /// The page or the harness failed before a verdict
    Errored,
    /// Not run because an earlier scenario stopped the suite
    Skipped,
}

impl ScenarioStatus {
    /// Check if status is passing
    #[must_use]
    pub const fn is_passed(self) -> bool {
        matches!(self, Self::Passed)
    }

    /// Failed or errored
    #[must_use]
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Errored)
    }

    /// Status for a scenario error
    #[must_use]
    pub const fn from_error(err: &ProbeError) -> Self {
        if err.is_assertion() {
            Self::Failed
        } else {
            Self::Errored
        }
    }
}

impl fmt::Display for ScenarioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Passed => "PASS",
            Self::Failed => "FAIL",
            Self::Errored => "ERROR",
            Self::Skipped => "SKIP",
        };
        f.pad(label)
    }
}

/// Result of running one scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario identifier
    pub id: String,
    /// Scenario title
    pub title: String,
    /// Scenario polarity
    pub polarity: Polarity,
    /// Outcome
    pub status: ScenarioStatus,
    /// Literal inputs in commit order
    pub inputs: Vec<String>,
    /// Outputs read so far, one per completed commit
    pub outputs: Vec<String>,
    /// Error message if failed or errored
    pub error: Option<String>,
    /// Machine-readable error kind
    pub error_kind: Option<String>,
    /// Wall time spent on the scenario
    pub duration: Duration,
}

impl ScenarioResult {
    fn new(scenario: &Scenario, status: ScenarioStatus) -> Self {
        Self {
            id: scenario.id.clone(),
            title: scenario.title.clone(),
            polarity: scenario.polarity,
            status,
            inputs: scenario.inputs().into_iter().map(str::to_string).collect(),
            outputs: Vec::new(),
            error: None,
            error_kind: None,
            duration: Duration::ZERO,
        }
    }

    /// Result for a scenario that never ran
    #[must_use]
    pub fn skipped(scenario: &Scenario) -> Self {
        Self::new(scenario, ScenarioStatus::Skipped)
    }

    /// Result for a scenario that could not even get a page
    #[must_use]
    pub fn errored(scenario: &Scenario, err: &ProbeError, duration: Duration) -> Self {
        Self {
            duration,
            ..Self::new(scenario, ScenarioStatus::Errored).with_error(err)
        }
    }

    fn with_error(mut self, err: &ProbeError) -> Self {
        self.status = ScenarioStatus::from_error(err);
        self.error = Some(err.to_string());
        self.error_kind = Some(err.kind().to_string());
        self
    }
}

/// Runs suites against pages from a [`PageSource`]
#[derive(Debug, Clone)]
pub struct TestHarness {
    translator: Translator,
    jobs: usize,
    fail_fast: bool,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new(Translator::default())
    }
}

impl TestHarness {
    /// Sequential harness that continues after failures
    #[must_use]
    pub const fn new(translator: Translator) -> Self {
        Self {
            translator,
            jobs: 1,
            fail_fast: false,
        }
    }

    /// Number of scenarios in flight at once (at least one)
    #[must_use]
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Start no new scenarios after the first failure
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Translator used for every scenario
    #[must_use]
    pub const fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Concurrency level
    #[must_use]
    pub const fn jobs(&self) -> usize {
        self.jobs
    }

    /// Run one scenario on a fresh page and close the page afterwards
    pub async fn run_scenario<S: PageSource + ?Sized>(
        &self,
        source: &S,
        scenario: &Scenario,
    ) -> ScenarioResult {
        let start = Instant::now();
        let mut page = match source.new_page().await {
            Ok(page) => page,
            Err(err) => {
                warn!(scenario = %scenario.id, error = %err, "could not open page");
                return ScenarioResult::errored(scenario, &err, start.elapsed());
            }
        };

        let mut result = ScenarioResult::new(scenario, ScenarioStatus::Passed);
        let outcome = scenario
            .run(&self.translator, &mut page, &mut result.outputs)
            .await;
        if let Err(err) = page.close().await {
            warn!(scenario = %scenario.id, error = %err, "page close failed");
        }
        if let Err(err) = outcome {
            result = result.with_error(&err);
        }
        result.duration = start.elapsed();

        match result.status {
            ScenarioStatus::Passed => {
                info!(scenario = %result.id, duration = ?result.duration, "passed");
            }
            status => warn!(
                scenario = %result.id,
                %status,
                error = result.error.as_deref().unwrap_or_default(),
                "scenario did not pass"
            ),
        }
        result
    }

    /// Run a suite, returning results in suite order
    pub async fn run<S: PageSource + ?Sized>(&self, source: &S, suite: &TestSuite) -> SuiteReport {
        self.run_with(source, suite, |_| {}).await
    }

    /// Run a suite, calling `on_result` as each result arrives (in suite order)
    pub async fn run_with<S, F>(&self, source: &S, suite: &TestSuite, mut on_result: F) -> SuiteReport
    where
        S: PageSource + ?Sized,
        F: FnMut(&ScenarioResult),
    {
        let start = Instant::now();
        info!(suite = %suite.name, scenarios = suite.len(), jobs = self.jobs, "suite started");

        // Set once fail-fast trips. Scenarios already started run to
        // completion (and close their pages); the rest are skipped.
        let stopped = AtomicBool::new(false);
        let mut results = Vec::with_capacity(suite.len());
        let mut pending = stream::iter(&suite.scenarios)
            .map(|scenario| {
                let stopped = &stopped;
                async move {
                    if stopped.load(Ordering::SeqCst) {
                        ScenarioResult::skipped(scenario)
                    } else {
                        self.run_scenario(source, scenario).await
                    }
                }
            })
            .buffered(self.jobs);
        while let Some(result) = pending.next().await {
            on_result(&result);
            if self.fail_fast
                && result.status.is_failure()
                && !stopped.swap(true, Ordering::SeqCst)
            {
                warn!(suite = %suite.name, scenario = %result.id, "stopping after first failure");
            }
            results.push(result);
        }

        let report = SuiteReport::new(
            suite.name.clone(),
            self.translator.target_url(),
            results,
            start.elapsed(),
        );
        info!(
            suite = %report.suite,
            passed = report.passed(),
            failed = report.failed(),
            errored = report.errored(),
            skipped = report.skipped(),
            "suite finished"
        );
        report
    }
}
