//! PageDriver - Abstract Browser Capability Trait
//!
//! Everything the harness needs from a browser goes through [`PageDriver`]:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  PageDriver (navigate, fill, press_key, count, input_value)  │
//! ├──────────────────────────────┬───────────────────────────────┤
//! │  CdpPage (feature `browser`) │  ScriptedPage (always)        │
//! │  chromiumoxide over CDP      │  in-process simulated site    │
//! └──────────────────────────────┴───────────────────────────────┘
//! ```
//!
//! A [`PageSource`] hands out a fresh, exclusively owned page per scenario.

use crate::locator::{Locator, Selector};
use crate::result::ProbeResult;
use async_trait::async_trait;
use std::fmt;

/// Keys the harness can dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Commit key
    Enter,
}

impl Key {
    /// DOM `key` value
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Enter => "Enter",
        }
    }

    /// DOM `code` value
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Enter => "Enter",
        }
    }

    /// Windows virtual key code
    #[must_use]
    pub const fn virtual_key_code(self) -> i64 {
        match self {
            Self::Enter => 13,
        }
    }

    /// Text produced by the key, if any
    #[must_use]
    pub const fn text(self) -> Option<&'static str> {
        match self {
            Self::Enter => Some("\r"),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Browser capability provider for one page session.
///
/// Implementations must not retry internally; every error propagates to the
/// caller unchanged.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Navigate to URL and wait for the load to finish
    async fn navigate(&mut self, url: &str) -> ProbeResult<()>;

    /// Replace the value of the located element
    async fn fill(&mut self, locator: &Locator, value: &str) -> ProbeResult<()>;

    /// Dispatch a key press to the focused element
    async fn press_key(&mut self, key: Key) -> ProbeResult<()>;

    /// Count elements matching a selector
    async fn count(&self, selector: &Selector) -> ProbeResult<usize>;

    /// Read the `value` of the located element, `None` if it does not exist
    async fn input_value(&self, locator: &Locator) -> ProbeResult<Option<String>>;

    /// Current page URL
    async fn current_url(&self) -> ProbeResult<String>;

    /// Close the page
    async fn close(&mut self) -> ProbeResult<()>;
}

/// Source of fresh pages, one per scenario execution.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Page type handed out by this source
    type Page: PageDriver + 'static;

    /// Open a new page
    async fn new_page(&self) -> ProbeResult<Self::Page>;
}
