//! Scripted in-process stand-in for the transliteration site.
//!
//! Models the parts of the remote UI the harness depends on: regions render
//! some time after navigation, the output region only updates a fixed latency
//! after a commit key, and reads before that latency return the previous
//! output. Timing uses the tokio clock so tests can run with a paused clock.

use crate::driver::{Key, PageDriver, PageSource};
use crate::locator::{Locator, Selector};
use crate::result::{ProbeError, ProbeResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Transliteration function of a scripted site
pub type TransliterateFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// One recorded driver call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCall {
    /// Page that received the call
    pub page: usize,
    /// Call description, e.g. `fill:0:vanakkam`
    pub call: String,
}

type CallLog = Arc<Mutex<Vec<PageCall>>>;

/// Behaviour of the simulated site
#[derive(Clone)]
pub struct ScriptedSite {
    url: String,
    selector: Selector,
    regions: usize,
    region_delay: Duration,
    render_latency: Duration,
    reachable: bool,
    transliterate: TransliterateFn,
}

impl fmt::Debug for ScriptedSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptedSite")
            .field("url", &self.url)
            .field("selector", &self.selector)
            .field("regions", &self.regions)
            .field("region_delay", &self.region_delay)
            .field("render_latency", &self.render_latency)
            .field("reachable", &self.reachable)
            .finish_non_exhaustive()
    }
}

impl ScriptedSite {
    /// Site at `url` with two regions, no delays, and an identity transliterator
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            selector: Selector::default(),
            regions: 2,
            region_delay: Duration::ZERO,
            render_latency: Duration::ZERO,
            reachable: true,
            transliterate: Arc::new(|input: &str| input.to_string()),
        }
    }

    /// Number of editable regions the page renders
    #[must_use]
    pub const fn with_regions(mut self, regions: usize) -> Self {
        self.regions = regions;
        self
    }

    /// Selector the rendered regions match
    #[must_use]
    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = selector;
        self
    }

    /// Delay between navigation and regions appearing
    #[must_use]
    pub const fn with_region_delay(mut self, delay: Duration) -> Self {
        self.region_delay = delay;
        self
    }

    /// Delay between a commit key and the output region updating
    #[must_use]
    pub const fn with_render_latency(mut self, latency: Duration) -> Self {
        self.render_latency = latency;
        self
    }

    /// Make every navigation fail
    #[must_use]
    pub const fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    /// Use a custom transliteration function
    #[must_use]
    pub fn with_transliterator<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.transliterate = Arc::new(f);
        self
    }

    /// Word-level transliteration from a lookup table.
    ///
    /// Runs of ASCII letters are looked up verbatim; unknown words and every
    /// other character pass through unchanged.
    #[must_use]
    pub fn with_dictionary<I, K, V>(self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let table: HashMap<String, String> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.with_transliterator(move |input| dictionary_transliterate(&table, input))
    }

    /// Site URL
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Apply the site's transliteration
    #[must_use]
    pub fn transliterate(&self, input: &str) -> String {
        (self.transliterate)(input)
    }
}

fn dictionary_transliterate(table: &HashMap<String, String>, input: &str) -> String {
    fn flush(out: &mut String, word: &mut String, table: &HashMap<String, String>) {
        if word.is_empty() {
            return;
        }
        match table.get(word.as_str()) {
            Some(mapped) => out.push_str(mapped),
            None => out.push_str(word),
        }
        word.clear();
    }

    let mut out = String::with_capacity(input.len() * 3);
    let mut word = String::new();
    for ch in input.chars() {
        if ch.is_ascii_alphabetic() {
            word.push(ch);
        } else {
            flush(&mut out, &mut word, table);
            out.push(ch);
        }
    }
    flush(&mut out, &mut word, table);
    out
}

#[derive(Debug, Clone)]
struct PendingRender {
    due: Instant,
    output: String,
}

/// A page on a [`ScriptedSite`]
#[derive(Debug)]
pub struct ScriptedPage {
    id: usize,
    site: Arc<ScriptedSite>,
    url: String,
    loaded_at: Option<Instant>,
    values: Vec<String>,
    pending: Option<PendingRender>,
    log: CallLog,
}

impl ScriptedPage {
    /// Standalone page with its own call log
    #[must_use]
    pub fn new(site: ScriptedSite) -> Self {
        Self::with_log(0, Arc::new(site), Arc::default())
    }

    fn with_log(id: usize, site: Arc<ScriptedSite>, log: CallLog) -> Self {
        Self {
            id,
            site,
            url: String::from("about:blank"),
            loaded_at: None,
            values: Vec::new(),
            pending: None,
            log,
        }
    }

    /// Page identifier within its source
    #[must_use]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Calls recorded on this page's log
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.log
            .lock()
            .map(|log| {
                log.iter()
                    .filter(|c| c.page == self.id)
                    .map(|c| c.call.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn record(&self, call: impl Into<String>) {
        if let Ok(mut log) = self.log.lock() {
            log.push(PageCall {
                page: self.id,
                call: call.into(),
            });
        }
    }

    fn visible_regions(&self, selector: &Selector) -> usize {
        if *selector != self.site.selector {
            return 0;
        }
        match self.loaded_at {
            Some(at) if at.elapsed() >= self.site.region_delay => self.site.regions,
            _ => 0,
        }
    }

    fn rendered(&self) -> Option<&str> {
        self.pending
            .as_ref()
            .filter(|p| Instant::now() >= p.due)
            .map(|p| p.output.as_str())
    }

    fn apply_rendered(&mut self) {
        if let Some(output) = self.rendered().map(str::to_string) {
            if let Some(slot) = self.values.get_mut(1) {
                *slot = output;
            }
            self.pending = None;
        }
    }
}

#[async_trait]
impl PageDriver for ScriptedPage {
    async fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        self.record(format!("navigate:{url}"));
        if !self.site.reachable || url != self.site.url {
            return Err(ProbeError::Navigation {
                url: url.to_string(),
                message: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        }
        self.url = url.to_string();
        self.loaded_at = Some(Instant::now());
        self.values = vec![String::new(); self.site.regions];
        self.pending = None;
        Ok(())
    }

    async fn fill(&mut self, locator: &Locator, value: &str) -> ProbeResult<()> {
        self.record(format!("fill:{}:{value}", locator.index()));
        if locator.index() >= self.visible_regions(locator.selector()) {
            return Err(ProbeError::ElementNotFound {
                locator: locator.to_string(),
            });
        }
        self.apply_rendered();
        self.values[locator.index()] = value.to_string();
        Ok(())
    }

    async fn press_key(&mut self, key: Key) -> ProbeResult<()> {
        self.record(format!("press:{key}"));
        if self.loaded_at.is_none() {
            return Err(ProbeError::Input {
                message: "no focused element".to_string(),
            });
        }
        self.apply_rendered();
        let input = self.values.first().cloned().unwrap_or_default();
        self.pending = Some(PendingRender {
            due: Instant::now() + self.site.render_latency,
            output: self.site.transliterate(&input),
        });
        Ok(())
    }

    async fn count(&self, selector: &Selector) -> ProbeResult<usize> {
        Ok(self.visible_regions(selector))
    }

    async fn input_value(&self, locator: &Locator) -> ProbeResult<Option<String>> {
        self.record(format!("read:{}", locator.index()));
        let index = locator.index();
        if index >= self.visible_regions(locator.selector()) {
            return Ok(None);
        }
        if index == 1 {
            if let Some(output) = self.rendered() {
                return Ok(Some(output.to_string()));
            }
        }
        Ok(self.values.get(index).cloned())
    }

    async fn current_url(&self) -> ProbeResult<String> {
        Ok(self.url.clone())
    }

    async fn close(&mut self) -> ProbeResult<()> {
        self.record("close");
        self.loaded_at = None;
        Ok(())
    }
}

/// Hands out fresh [`ScriptedPage`]s sharing one call log
#[derive(Debug)]
pub struct ScriptedPageSource {
    site: Arc<ScriptedSite>,
    next_id: AtomicUsize,
    log: CallLog,
}

impl ScriptedPageSource {
    /// Create a source for a site
    #[must_use]
    pub fn new(site: ScriptedSite) -> Self {
        Self {
            site: Arc::new(site),
            next_id: AtomicUsize::new(0),
            log: Arc::default(),
        }
    }

    /// Number of pages opened so far
    #[must_use]
    pub fn pages_opened(&self) -> usize {
        self.next_id.load(Ordering::SeqCst)
    }

    /// Every call recorded across all pages, in arrival order
    #[must_use]
    pub fn calls(&self) -> Vec<PageCall> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl PageSource for ScriptedPageSource {
    type Page = ScriptedPage;

    async fn new_page(&self) -> ProbeResult<ScriptedPage> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedPage::with_log(
            id,
            Arc::clone(&self.site),
            Arc::clone(&self.log),
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const URL: &str = "https://tamil.example/";

    fn site() -> ScriptedSite {
        ScriptedSite::new(URL).with_dictionary([("vanakkam", "வணக்கம்"), ("amma", "அம்மா")])
    }

    #[test]
    fn test_dictionary_keeps_unknown_words_and_punctuation() {
        let s = site();
        assert_eq!(s.transliterate("vanakkam amma!"), "வணக்கம் அம்மா!");
        assert_eq!(s.transliterate("Rs. 1200 vanakkam"), "Rs. 1200 வணக்கம்");
        assert_eq!(s.transliterate(""), "");
        assert_eq!(s.transliterate("VANAKKAM"), "VANAKKAM");
    }

    #[tokio::test]
    async fn test_navigate_wrong_url_fails() {
        let mut page = ScriptedPage::new(site());
        let err = page.navigate("https://elsewhere/").await.unwrap_err();
        assert_eq!(err.kind(), "navigation");
    }

    #[tokio::test]
    async fn test_unreachable_site_fails_navigation() {
        let mut page = ScriptedPage::new(site().unreachable());
        assert!(page.navigate(URL).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_is_stale_until_render_latency_elapses() {
        let mut page = ScriptedPage::new(site().with_render_latency(Duration::from_millis(800)));
        let input = Locator::first(Selector::default());
        let output = Locator::nth(Selector::default(), 1);

        page.navigate(URL).await.unwrap();
        page.fill(&input, "vanakkam").await.unwrap();
        page.press_key(Key::Enter).await.unwrap();
        assert_eq!(page.input_value(&output).await.unwrap().as_deref(), Some(""));

        tokio::time::sleep(Duration::from_millis(800)).await;
        assert_eq!(
            page.input_value(&output).await.unwrap().as_deref(),
            Some("வணக்கம்")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_regions_appear_after_delay() {
        let mut page = ScriptedPage::new(site().with_region_delay(Duration::from_millis(300)));
        page.navigate(URL).await.unwrap();
        assert_eq!(page.count(&Selector::default()).await.unwrap(), 0);
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(page.count(&Selector::default()).await.unwrap(), 2);
        assert_eq!(page.count(&Selector::css("input")).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_fill_missing_region_is_element_not_found() {
        let mut page = ScriptedPage::new(site().with_regions(1));
        page.navigate(URL).await.unwrap();
        let err = page
            .fill(&Locator::nth(Selector::default(), 1), "x")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "element_not_found");
    }

    #[tokio::test]
    async fn test_press_before_navigation_is_input_error() {
        let mut page = ScriptedPage::new(site());
        assert_eq!(page.press_key(Key::Enter).await.unwrap_err().kind(), "input");
    }

    #[tokio::test]
    async fn test_source_pages_share_log_but_not_state() {
        let source = ScriptedPageSource::new(site());
        let mut a = source.new_page().await.unwrap();
        let mut b = source.new_page().await.unwrap();
        a.navigate(URL).await.unwrap();
        a.fill(&Locator::first(Selector::default()), "amma")
            .await
            .unwrap();
        b.navigate(URL).await.unwrap();

        let first = Locator::first(Selector::default());
        assert_eq!(b.input_value(&first).await.unwrap().as_deref(), Some(""));
        assert_eq!(source.pages_opened(), 2);
        assert_eq!(a.history(), vec![format!("navigate:{URL}"), "fill:0:amma".to_string()]);
        assert!(source.calls().iter().any(|c| c.page == 1));
    }
}
