//! Thanglish Probe: end-to-end verification of a Thanglish to Tamil
//! transliteration website.
//!
//! The transliteration itself is an opaque remote service. This crate is the
//! harness around it: drive the page, decide when the client-rendered output
//! has settled, extract it, and classify it against fuzzy acceptance
//! predicates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Scenario   │    │ Translator │    │ PageDriver │            │
//! │   │ catalog    │───►│ + settle   │───►│ CDP or     │            │
//! │   │ (YAML)     │    │ + extract  │    │ scripted   │            │
//! │   └────────────┘    └────────────┘    └────────────┘            │
//! │         │                 │                                     │
//! │         ▼                 ▼                                     │
//! │   ┌────────────┐    ┌────────────┐                              │
//! │   │ TestHarness│───►│ SuiteReport│                              │
//! │   └────────────┘    └────────────┘                              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use thanglish_probe::prelude::*;
//!
//! # async fn demo() -> ProbeResult<()> {
//! let browser = Browser::launch(BrowserConfig::default().with_no_sandbox()).await?;
//! let report = TestHarness::default()
//!     .with_jobs(4)
//!     .run(&browser, &thanglish_suite())
//!     .await;
//! println!("{}", report.to_text());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod browser;
#[allow(clippy::doc_markdown)]
pub mod catalog;
mod config;
mod driver;
mod expectation;
mod extractor;
mod harness;
mod locator;
mod report;
mod result;
mod scenario;
mod script;
#[allow(clippy::missing_errors_doc)]
mod scripted;
mod translator;
mod wait;

#[cfg(feature = "browser")]
pub use browser::{Browser, Page};
pub use browser::BrowserConfig;
pub use catalog::thanglish_suite;
pub use config::ProbeConfig;
pub use driver::{Key, PageDriver, PageSource};
pub use expectation::Expectation;
pub use extractor::{OutputExtractor, OUTPUT_REGION_INDEX, REQUIRED_REGIONS};
pub use harness::{ScenarioResult, ScenarioStatus, TestHarness};
pub use locator::{Locator, Selector, DEFAULT_REGION_SELECTOR};
pub use report::{ReportFormat, SuiteReport};
pub use result::{ProbeError, ProbeResult};
pub use scenario::{Polarity, RefreshStep, Scenario, ScenarioBody, TestSuite};
pub use script::{contains_tamil_script, is_tamil_letter, tamil_letter_count, TAMIL_LETTERS};
pub use scripted::{PageCall, ScriptedPage, ScriptedPageSource, ScriptedSite, TransliterateFn};
pub use translator::{Translator, DEFAULT_TARGET_URL};
pub use wait::{
    wait_for, wait_for_count, Settle, WaitOptions, WaitResult, CHAINED_SETTLE_MS,
    DEFAULT_POLL_INTERVAL_MS, DEFAULT_SETTLE_MS, DEFAULT_WAIT_TIMEOUT_MS,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use super::browser::*;
    pub use super::catalog::thanglish_suite;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::expectation::*;
    pub use super::extractor::*;
    pub use super::harness::*;
    pub use super::locator::*;
    pub use super::report::*;
    pub use super::result::*;
    pub use super::scenario::*;
    pub use super::script::*;
    pub use super::scripted::*;
    pub use super::translator::*;
    pub use super::wait::*;
}
