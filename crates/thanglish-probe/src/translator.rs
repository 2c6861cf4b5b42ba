//! Translation round-trips against the target page.
//!
//! ```text
//! navigate ──► fill(region 0) ──► Enter ──► settle ──► extract(region 1)
//!   once        └──────────── repeated per chained input ─────────────┘
//! ```
//!
//! Every step runs strictly after the previous one on a single page owned by
//! the caller. Errors propagate unchanged; nothing is retried.

use crate::driver::{Key, PageDriver};
use crate::extractor::OutputExtractor;
use crate::locator::{Locator, Selector};
use crate::result::ProbeResult;
use crate::wait::{wait_for_count, Settle, CHAINED_SETTLE_MS};
use tracing::{debug, instrument};

/// Fixed production target
pub const DEFAULT_TARGET_URL: &str = "https://tamil.changathi.com/";

/// Drives the transliteration UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translator {
    target_url: String,
    selector: Selector,
    settle: Settle,
    chained_settle: Settle,
    extractor: OutputExtractor,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(DEFAULT_TARGET_URL)
    }
}

impl Translator {
    /// Translator for `target_url` with the default region selector and settle pauses
    #[must_use]
    pub fn new(target_url: impl Into<String>) -> Self {
        Self {
            target_url: target_url.into(),
            selector: Selector::default(),
            settle: Settle::default(),
            chained_settle: Settle::fixed(CHAINED_SETTLE_MS),
            extractor: OutputExtractor::default(),
        }
    }

    /// Selector for the editable regions (input and output)
    #[must_use]
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.extractor = OutputExtractor::new(selector.clone()).with_wait(*self.extractor.wait());
        self.selector = selector;
        self
    }

    /// Settle strategy for standalone round-trips
    #[must_use]
    pub const fn with_settle(mut self, settle: Settle) -> Self {
        self.settle = settle;
        self
    }

    /// Settle strategy for round-trips chained on one page
    #[must_use]
    pub const fn with_chained_settle(mut self, settle: Settle) -> Self {
        self.chained_settle = settle;
        self
    }

    /// Replace the output extractor
    #[must_use]
    pub fn with_extractor(mut self, extractor: OutputExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Target URL
    #[must_use]
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// Standalone settle strategy
    #[must_use]
    pub const fn settle(&self) -> Settle {
        self.settle
    }

    /// Chained settle strategy
    #[must_use]
    pub const fn chained_settle(&self) -> Settle {
        self.chained_settle
    }

    fn input_locator(&self) -> Locator {
        Locator::first(self.selector.clone())
    }

    /// Load the target page
    pub async fn open<P: PageDriver + ?Sized>(&self, page: &mut P) -> ProbeResult<()> {
        debug!(url = %self.target_url, "navigate");
        page.navigate(&self.target_url).await
    }

    /// One full round-trip on a fresh load of the target page
    #[instrument(level = "debug", skip(self, page))]
    pub async fn translate<P: PageDriver + ?Sized>(
        &self,
        page: &mut P,
        input: &str,
    ) -> ProbeResult<String> {
        self.open(page).await?;
        self.commit_and_read(page, input, self.settle).await
    }

    /// Fill, commit, settle, and extract on an already loaded page
    pub async fn commit_and_read<P: PageDriver + ?Sized>(
        &self,
        page: &mut P,
        input: &str,
        settle: Settle,
    ) -> ProbeResult<String> {
        let input_region = self.input_locator();
        self.await_input_region(page).await?;
        page.fill(&input_region, input).await?;
        debug!(%input_region, "filled");
        page.press_key(Key::Enter).await?;
        let settled = settle
            .settle(&*page, &self.extractor.output_locator())
            .await?;
        debug!(?settled, "committed");
        self.extractor.extract_output(&*page).await
    }

    /// Empty the input region
    pub async fn clear_input<P: PageDriver + ?Sized>(&self, page: &mut P) -> ProbeResult<()> {
        self.await_input_region(page).await?;
        page.fill(&self.input_locator(), "").await
    }

    async fn await_input_region<P: PageDriver + ?Sized>(&self, page: &P) -> ProbeResult<()> {
        wait_for_count(page, &self.selector, 1, self.extractor.wait()).await?;
        Ok(())
    }

    /// Navigate once, then run each input in turn on the same page, clearing
    /// the input region before every fill. Returns one output per input.
    #[instrument(level = "debug", skip(self, page))]
    pub async fn translate_chain<P: PageDriver + ?Sized>(
        &self,
        page: &mut P,
        inputs: &[&str],
    ) -> ProbeResult<Vec<String>> {
        self.open(page).await?;
        let mut outputs = Vec::with_capacity(inputs.len());
        for input in inputs {
            self.clear_input(page).await?;
            outputs.push(self.commit_and_read(page, input, self.chained_settle).await?);
        }
        Ok(outputs)
    }
}
