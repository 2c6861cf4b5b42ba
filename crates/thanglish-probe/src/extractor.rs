//! Output extraction from the rendered page.
//!
//! The transliteration UI renders an input region and an output region that
//! match the same selector. The output is the second match in document
//! order. Extraction is read-only and never caches: every call observes the
//! page as it is at that moment.

use crate::driver::PageDriver;
use crate::locator::{Locator, Selector};
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{wait_for_count, WaitOptions};
use tracing::{debug, instrument};

/// Index of the output region among the editable regions
pub const OUTPUT_REGION_INDEX: usize = 1;

/// Number of editable regions the UI must render
pub const REQUIRED_REGIONS: usize = OUTPUT_REGION_INDEX + 1;

/// Reads the output region of a loaded page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputExtractor {
    selector: Selector,
    wait: WaitOptions,
}

impl Default for OutputExtractor {
    fn default() -> Self {
        Self::new(Selector::default())
    }
}

impl OutputExtractor {
    /// Extractor for regions matching `selector`, with default wait options
    #[must_use]
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            wait: WaitOptions::default(),
        }
    }

    /// Override the wait budget for both region waits
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Selector for editable regions
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Wait budget for the region waits
    #[must_use]
    pub const fn wait(&self) -> &WaitOptions {
        &self.wait
    }

    /// Locator of the output region
    #[must_use]
    pub fn output_locator(&self) -> Locator {
        Locator::nth(self.selector.clone(), OUTPUT_REGION_INDEX)
    }

    /// Wait for the regions and return the current output value.
    ///
    /// * no region ever appears: [`ProbeError::Timeout`]
    /// * some regions appear but never two: [`ProbeError::StructuralMismatch`]
    #[instrument(level = "debug", skip_all, fields(selector = %self.selector))]
    pub async fn extract_output<P: PageDriver + ?Sized>(&self, page: &P) -> ProbeResult<String> {
        wait_for_count(page, &self.selector, 1, &self.wait).await?;

        if let Err(err) = wait_for_count(page, &self.selector, REQUIRED_REGIONS, &self.wait).await
        {
            let found = page.count(&self.selector).await?;
            return Err(match err {
                ProbeError::Timeout { .. } if found > 0 => self.mismatch(found),
                other => other,
            });
        }

        let locator = self.output_locator();
        let output = page
            .input_value(&locator)
            .await?
            .ok_or_else(|| self.mismatch(OUTPUT_REGION_INDEX))?;
        debug!(chars = output.chars().count(), "output extracted");
        Ok(output)
    }

    fn mismatch(&self, found: usize) -> ProbeError {
        ProbeError::StructuralMismatch {
            selector: self.selector.to_string(),
            expected: REQUIRED_REGIONS,
            found,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::driver::Key;
    use crate::scripted::{ScriptedPage, ScriptedSite};
    use std::time::Duration;

    const URL: &str = "https://tamil.example/";

    fn quick() -> OutputExtractor {
        OutputExtractor::default().with_wait(WaitOptions::new().with_timeout(500))
    }

    async fn loaded(site: ScriptedSite) -> ScriptedPage {
        let mut page = ScriptedPage::new(site);
        page.navigate(URL).await.unwrap();
        page
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_second_region() {
        let mut page = loaded(ScriptedSite::new(URL).with_transliterator(|_| "அம்மா".into())).await;
        page.fill(&Locator::first(Selector::default()), "amma")
            .await
            .unwrap();
        page.press_key(Key::Enter).await.unwrap();
        assert_eq!(quick().extract_output(&page).await.unwrap(), "அம்மா");
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_late_regions() {
        let page = loaded(ScriptedSite::new(URL).with_region_delay(Duration::from_millis(300))).await;
        assert_eq!(quick().extract_output(&page).await.unwrap(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_regions_is_timeout() {
        let page = loaded(ScriptedSite::new(URL).with_regions(0)).await;
        let err = quick().extract_output(&page).await.unwrap_err();
        assert_eq!(err.kind(), "timeout");
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_region_is_structural_mismatch() {
        let page = loaded(ScriptedSite::new(URL).with_regions(1)).await;
        match quick().extract_output(&page).await.unwrap_err() {
            ProbeError::StructuralMismatch {
                selector,
                expected,
                found,
            } => {
                assert_eq!(selector, "css=textarea");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_selector() {
        let site = ScriptedSite::new(URL).with_selector(Selector::css("div[contenteditable]"));
        let page = loaded(site).await;
        let extractor = OutputExtractor::new(Selector::css("div[contenteditable]"))
            .with_wait(WaitOptions::new().with_timeout(100));
        assert!(extractor.extract_output(&page).await.is_ok());
        assert_eq!(
            quick().extract_output(&page).await.unwrap_err().kind(),
            "timeout"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_extract_does_not_write() {
        let page = loaded(ScriptedSite::new(URL)).await;
        quick().extract_output(&page).await.unwrap();
        assert!(page
            .history()
            .iter()
            .all(|call| call.starts_with("navigate") || call.starts_with("read")));
    }
}
