//! Selectors and positional locators for editable regions.
//!
//! A [`Locator`] addresses one element by selector plus a zero-based index in
//! document order. The query scripts it renders are what the CDP backend
//! evaluates; the scripted page interprets the same structures directly.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default selector for editable text regions
pub const DEFAULT_REGION_SELECTOR: &str = "textarea";

/// Selector type for locating elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selector {
    /// CSS selector (e.g., "textarea")
    Css(String),
}

impl Selector {
    /// Create a CSS selector
    #[must_use]
    pub fn css(selector: impl Into<String>) -> Self {
        Self::Css(selector.into())
    }

    /// Raw selector text
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(s) => s,
        }
    }

    /// JS expression evaluating to the number of matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({}).length", js_string(s)),
        }
    }

    /// JS expression evaluating to the ordered list of matches
    fn to_all_query(&self) -> String {
        match self {
            Self::Css(s) => format!("document.querySelectorAll({})", js_string(s)),
        }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::css(DEFAULT_REGION_SELECTOR)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Css(s) => write!(f, "css={s}"),
        }
    }
}

/// One element addressed by selector and document-order index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator {
    selector: Selector,
    index: usize,
}

impl Locator {
    /// First match of a selector
    #[must_use]
    pub fn first(selector: Selector) -> Self {
        Self { selector, index: 0 }
    }

    /// Match at a zero-based index
    #[must_use]
    pub fn nth(selector: Selector, index: usize) -> Self {
        Self { selector, index }
    }

    /// The underlying selector
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Zero-based index in document order
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// JS expression evaluating to the element's `value`, or `null` if absent
    #[must_use]
    pub fn to_value_query(&self) -> String {
        format!(
            "(() => {{ const el = {}[{}]; return el ? String(el.value ?? '') : null; }})()",
            self.selector.to_all_query(),
            self.index
        )
    }

    /// JS expression that replaces the element's value and fires `input`/`change`.
    ///
    /// Evaluates to `false` when the element does not exist.
    #[must_use]
    pub fn to_fill_script(&self, value: &str) -> String {
        format!(
            "(() => {{ const el = {}[{}]; if (!el) return false; el.focus(); el.value = {}; \
             el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             el.dispatchEvent(new Event('change', {{ bubbles: true }})); return true; }})()",
            self.selector.to_all_query(),
            self.index,
            js_string(value)
        )
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} >> nth={}", self.selector, self.index)
    }
}

/// Encode a Rust string as a JS string literal
fn js_string(s: &str) -> String {
    serde_json::Value::String(s.to_string()).to_string()
}
