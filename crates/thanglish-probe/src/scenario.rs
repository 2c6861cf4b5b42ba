//! Scenarios and suites.
//!
//! A [`Scenario`] is an immutable unit of verification: an identifier, a
//! polarity, and either a single input with its predicate or a chain of
//! inputs replayed on one page. Suites serialize to YAML so scenario sets can
//! live outside the binary.

use crate::driver::PageDriver;
use crate::expectation::Expectation;
use crate::result::{ProbeError, ProbeResult};
use crate::translator::Translator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::debug;

/// Whether a scenario exercises supported or unsupported input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Input the site is expected to transliterate
    Positive,
    /// Input the site is expected to leave alone or reject
    Negative,
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

/// One commit in a chained scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshStep {
    /// Literal input
    pub input: String,
    /// Predicate on the output read after this commit
    pub expect: Expectation,
}

/// What a scenario does on its page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioBody {
    /// One round-trip on a fresh load
    Single {
        /// Literal input
        input: String,
        /// Predicate on the output
        expect: Expectation,
    },
    /// Several commits on one load, clearing the input between them
    Refresh {
        /// Commits in order
        steps: Vec<RefreshStep>,
        /// Require every step's output to differ from every other
        #[serde(default)]
        require_distinct: bool,
    },
}

/// An immutable verification unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Stable identifier, e.g. `pos-01`
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// Positive or negative
    pub polarity: Polarity,
    /// Steps and predicates
    #[serde(flatten)]
    pub body: ScenarioBody,
}

impl Scenario {
    /// Single round-trip scenario
    #[must_use]
    pub fn single(
        id: impl Into<String>,
        title: impl Into<String>,
        polarity: Polarity,
        input: impl Into<String>,
        expect: Expectation,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            polarity,
            body: ScenarioBody::Single {
                input: input.into(),
                expect,
            },
        }
    }

    /// Chained scenario on one page
    #[must_use]
    pub fn refresh(
        id: impl Into<String>,
        title: impl Into<String>,
        steps: impl IntoIterator<Item = (&'static str, Expectation)>,
        require_distinct: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            polarity: Polarity::Positive,
            body: ScenarioBody::Refresh {
                steps: steps
                    .into_iter()
                    .map(|(input, expect)| RefreshStep {
                        input: input.to_string(),
                        expect,
                    })
                    .collect(),
                require_distinct,
            },
        }
    }

    /// Literal inputs in commit order
    #[must_use]
    pub fn inputs(&self) -> Vec<&str> {
        match &self.body {
            ScenarioBody::Single { input, .. } => vec![input.as_str()],
            ScenarioBody::Refresh { steps, .. } => steps.iter().map(|s| s.input.as_str()).collect(),
        }
    }

    /// Whether `pattern` occurs in the id or title, ignoring case
    #[must_use]
    pub fn matches_filter(&self, pattern: &str) -> bool {
        let pattern = pattern.to_lowercase();
        self.id.to_lowercase().contains(&pattern) || self.title.to_lowercase().contains(&pattern)
    }

    /// Reject scenarios that could never run
    pub fn validate(&self) -> ProbeResult<()> {
        if self.id.trim().is_empty() {
            return Err(ProbeError::config("scenario id must not be empty"));
        }
        match &self.body {
            ScenarioBody::Single { expect, .. } => expect.validate(),
            ScenarioBody::Refresh { steps, .. } if steps.is_empty() => Err(ProbeError::config(
                format!("scenario {} has no refresh steps", self.id),
            )),
            ScenarioBody::Refresh { steps, .. } => {
                steps.iter().try_for_each(|step| step.expect.validate())
            }
        }
    }

    /// Run on `page`, pushing each extracted output onto `outputs` as soon as
    /// it is read so the caller keeps partial evidence on failure.
    pub async fn run<P: PageDriver + ?Sized>(
        &self,
        translator: &Translator,
        page: &mut P,
        outputs: &mut Vec<String>,
    ) -> ProbeResult<()> {
        match &self.body {
            ScenarioBody::Single { input, expect } => {
                let output = translator.translate(page, input).await?;
                let verdict = expect.check(&self.id, input, &output);
                outputs.push(output);
                verdict
            }
            ScenarioBody::Refresh {
                steps,
                require_distinct,
            } => {
                translator.open(page).await?;
                for step in steps {
                    translator.clear_input(page).await?;
                    let output = translator
                        .commit_and_read(page, &step.input, translator.chained_settle())
                        .await?;
                    debug!(scenario = %self.id, input = %step.input, "refresh step read");
                    let verdict = step.expect.check(&self.id, &step.input, &output);
                    outputs.push(output);
                    verdict?;
                }
                if *require_distinct {
                    self.check_distinct(steps, outputs)?;
                }
                Ok(())
            }
        }
    }

    fn check_distinct(&self, steps: &[RefreshStep], outputs: &[String]) -> ProbeResult<()> {
        let mut seen = HashSet::new();
        for (step, output) in steps.iter().zip(outputs) {
            if !seen.insert(output.as_str()) {
                return Err(ProbeError::AssertionFailure {
                    scenario: self.id.clone(),
                    input: step.input.clone(),
                    predicate: "differ from every earlier output".to_string(),
                    actual: output.clone(),
                });
            }
        }
        Ok(())
    }
}

/// An ordered collection of scenarios
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestSuite {
    /// Suite name
    pub name: String,
    /// Scenarios in run order
    pub scenarios: Vec<Scenario>,
}

impl TestSuite {
    /// Create an empty suite
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scenarios: Vec::new(),
        }
    }

    /// Add a scenario
    #[must_use]
    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Number of scenarios
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether the suite has no scenarios
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Look up a scenario by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Scenarios whose id or title contains `pattern`, in order
    #[must_use]
    pub fn filter(&self, pattern: &str) -> Self {
        Self {
            name: self.name.clone(),
            scenarios: self
                .scenarios
                .iter()
                .filter(|s| s.matches_filter(pattern))
                .cloned()
                .collect(),
        }
    }

    /// Scenarios of one polarity, in order
    #[must_use]
    pub fn with_polarity(&self, polarity: Polarity) -> Self {
        Self {
            name: self.name.clone(),
            scenarios: self
                .scenarios
                .iter()
                .filter(|s| s.polarity == polarity)
                .cloned()
                .collect(),
        }
    }

    /// Check ids are unique and every scenario is runnable
    pub fn validate(&self) -> ProbeResult<()> {
        let mut ids = HashSet::new();
        for scenario in &self.scenarios {
            scenario.validate()?;
            if !ids.insert(scenario.id.as_str()) {
                return Err(ProbeError::config(format!(
                    "duplicate scenario id: {}",
                    scenario.id
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate a suite from YAML
    pub fn from_yaml_str(yaml: &str) -> ProbeResult<Self> {
        let suite: Self = serde_yaml_ng::from_str(yaml)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Load a suite from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ProbeResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}
