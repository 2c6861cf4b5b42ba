//! Probe configuration.
//!
//! Every field has a default that reproduces the stock behaviour, so a YAML
//! file only needs the keys it changes:
//!
//! ```yaml
//! target_url: https://tamil.changathi.com/
//! region_selector: textarea
//! settle:
//!   strategy: stable
//!   min_wait_ms: 1000
//!   poll_interval_ms: 250
//!   stable_samples: 3
//!   timeout_ms: 10000
//! browser:
//!   sandbox: false
//! ```

use crate::browser::BrowserConfig;
use crate::extractor::OutputExtractor;
use crate::locator::Selector;
use crate::result::{ProbeError, ProbeResult};
use crate::translator::{Translator, DEFAULT_TARGET_URL};
use crate::wait::{Settle, WaitOptions, CHAINED_SETTLE_MS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to drive the target site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Page under test
    pub target_url: String,
    /// Selector matching the input and output regions
    pub region_selector: Selector,
    /// Settle strategy for standalone round-trips
    pub settle: Settle,
    /// Settle strategy for chained round-trips
    pub chained_settle: Settle,
    /// Budget for the region waits
    pub wait: WaitOptions,
    /// Browser launch options
    pub browser: BrowserConfig,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            region_selector: Selector::default(),
            settle: Settle::default(),
            chained_settle: Settle::fixed(CHAINED_SETTLE_MS),
            wait: WaitOptions::default(),
            browser: BrowserConfig::default(),
        }
    }
}

impl ProbeConfig {
    /// Parse and validate YAML
    pub fn from_yaml_str(yaml: &str) -> ProbeResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|e| {
            ProbeError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> ProbeResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Reject values that can never work
    pub fn validate(&self) -> ProbeResult<()> {
        if !(self.target_url.starts_with("http://") || self.target_url.starts_with("https://")) {
            return Err(ProbeError::config(format!(
                "target_url must be http(s): {}",
                self.target_url
            )));
        }
        if self.region_selector.as_str().trim().is_empty() {
            return Err(ProbeError::config("region_selector must not be empty"));
        }
        if self.wait.poll_interval_ms == 0 {
            return Err(ProbeError::config("wait.poll_interval_ms must be positive"));
        }
        for settle in [self.settle, self.chained_settle] {
            if let Settle::Stable {
                poll_interval_ms: 0,
                ..
            } = settle
            {
                return Err(ProbeError::config("settle poll_interval_ms must be positive"));
            }
        }
        Ok(())
    }

    /// Translator built from this configuration
    #[must_use]
    pub fn translator(&self) -> Translator {
        Translator::new(self.target_url.clone())
            .with_selector(self.region_selector.clone())
            .with_settle(self.settle)
            .with_chained_settle(self.chained_settle)
            .with_extractor(OutputExtractor::new(self.region_selector.clone()).with_wait(self.wait))
    }
}
