//! Browser control over the Chrome DevTools Protocol.
//!
//! [`BrowserConfig`] is always available so configuration files and the CLI
//! can describe a browser without the `browser` feature. Launching one and
//! driving real pages requires the feature, which pulls in chromiumoxide.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Browser configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<PathBuf>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// Budget for the browser process to come up
    pub launch_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 800,
            chromium_path: None,
            sandbox: true,
            launch_timeout_ms: 20_000,
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

// ============================================================================
// CDP implementation (when `browser` feature is enabled)
// ============================================================================

#[cfg(feature = "browser")]
#[allow(clippy::significant_drop_tightening, clippy::missing_errors_doc)]
mod cdp {
    use super::BrowserConfig;
    use crate::driver::{Key, PageDriver, PageSource};
    use crate::locator::{Locator, Selector};
    use crate::result::{ProbeError, ProbeResult};
    use async_trait::async_trait;
    use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
    use chromiumoxide::cdp::browser_protocol::input::{
        DispatchKeyEventParams, DispatchKeyEventType,
    };
    use chromiumoxide::page::Page as CdpPage;
    use futures::StreamExt;
    use serde::de::DeserializeOwned;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;
    use tracing::{debug, warn};

    /// Browser instance with a live CDP connection
    #[derive(Debug)]
    pub struct Browser {
        config: BrowserConfig,
        inner: Arc<Mutex<CdpBrowser>>,
        handle: tokio::task::JoinHandle<()>,
    }

    impl Browser {
        /// Launch Chromium and spawn the CDP event handler
        pub async fn launch(config: BrowserConfig) -> ProbeResult<Self> {
            let mut builder = CdpConfig::builder()
                .window_size(config.viewport_width, config.viewport_height)
                .launch_timeout(Duration::from_millis(config.launch_timeout_ms));

            if !config.headless {
                builder = builder.with_head();
            }

            if !config.sandbox {
                builder = builder.no_sandbox();
            }

            if let Some(ref path) = config.chromium_path {
                builder = builder.chrome_executable(path);
            }

            let cdp_config = builder
                .build()
                .map_err(|message| ProbeError::BrowserLaunch { message })?;

            let (browser, mut handler) = CdpBrowser::launch(cdp_config).await.map_err(|e| {
                ProbeError::BrowserLaunch {
                    message: e.to_string(),
                }
            })?;

            let handle = tokio::spawn(async move {
                while let Some(event) = handler.next().await {
                    if let Err(e) = event {
                        warn!(error = %e, "CDP handler stopped");
                        break;
                    }
                }
            });

            debug!(headless = config.headless, sandbox = config.sandbox, "browser launched");
            Ok(Self {
                config,
                inner: Arc::new(Mutex::new(browser)),
                handle,
            })
        }

        /// Open a blank page
        pub async fn new_page(&self) -> ProbeResult<Page> {
            let browser = self.inner.lock().await;
            let cdp_page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| ProbeError::page(e.to_string()))?;
            Ok(Page {
                url: String::from("about:blank"),
                inner: cdp_page,
            })
        }

        /// Get the browser configuration
        #[must_use]
        pub const fn config(&self) -> &BrowserConfig {
            &self.config
        }

        /// Close the browser and stop the handler task
        pub async fn close(self) -> ProbeResult<()> {
            {
                let mut browser = self.inner.lock().await;
                browser
                    .close()
                    .await
                    .map_err(|e| ProbeError::BrowserLaunch {
                        message: e.to_string(),
                    })?;
            }
            self.handle.abort();
            Ok(())
        }
    }

    #[async_trait]
    impl PageSource for Browser {
        type Page = Page;

        async fn new_page(&self) -> ProbeResult<Page> {
            Self::new_page(self).await
        }
    }

    /// A browser page driven over CDP
    #[derive(Debug)]
    pub struct Page {
        url: String,
        inner: CdpPage,
    }

    impl Page {
        async fn eval<T: DeserializeOwned>(&self, expr: String) -> ProbeResult<T> {
            let result = self
                .inner
                .evaluate(expr)
                .await
                .map_err(|e| ProbeError::page(e.to_string()))?;
            result
                .into_value()
                .map_err(|e| ProbeError::page(e.to_string()))
        }

        async fn dispatch_key(&self, key: Key, kind: DispatchKeyEventType) -> ProbeResult<()> {
            let mut builder = DispatchKeyEventParams::builder()
                .r#type(kind.clone())
                .key(key.key())
                .code(key.code())
                .windows_virtual_key_code(key.virtual_key_code())
                .native_virtual_key_code(key.virtual_key_code());
            if kind == DispatchKeyEventType::KeyDown {
                if let Some(text) = key.text() {
                    builder = builder.text(text);
                }
            }
            let params = builder
                .build()
                .map_err(|message| ProbeError::Input { message })?;
            self.inner
                .execute(params)
                .await
                .map_err(|e| ProbeError::Input {
                    message: e.to_string(),
                })?;
            Ok(())
        }
    }

    #[async_trait]
    impl PageDriver for Page {
        async fn navigate(&mut self, url: &str) -> ProbeResult<()> {
            let navigation_error = |e: chromiumoxide::error::CdpError| ProbeError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            };
            self.inner.goto(url).await.map_err(navigation_error)?;
            self.inner
                .wait_for_navigation()
                .await
                .map_err(navigation_error)?;
            self.url = url.to_string();
            debug!(url, "page loaded");
            Ok(())
        }

        async fn fill(&mut self, locator: &Locator, value: &str) -> ProbeResult<()> {
            let found: bool = self.eval(locator.to_fill_script(value)).await?;
            if found {
                Ok(())
            } else {
                Err(ProbeError::ElementNotFound {
                    locator: locator.to_string(),
                })
            }
        }

        async fn press_key(&mut self, key: Key) -> ProbeResult<()> {
            self.dispatch_key(key, DispatchKeyEventType::KeyDown).await?;
            self.dispatch_key(key, DispatchKeyEventType::KeyUp).await
        }

        async fn count(&self, selector: &Selector) -> ProbeResult<usize> {
            self.eval(selector.to_count_query()).await
        }

        async fn input_value(&self, locator: &Locator) -> ProbeResult<Option<String>> {
            self.eval(locator.to_value_query()).await
        }

        async fn current_url(&self) -> ProbeResult<String> {
            Ok(self
                .inner
                .url()
                .await
                .map_err(|e| ProbeError::page(e.to_string()))?
                .unwrap_or_else(|| self.url.clone()))
        }

        async fn close(&mut self) -> ProbeResult<()> {
            self.inner
                .clone()
                .close()
                .await
                .map_err(|e| ProbeError::page(e.to_string()))
        }
    }
}

#[cfg(feature = "browser")]
pub use cdp::{Browser, Page};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config_defaults() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert!(config.chromium_path.is_none());
        assert_eq!((config.viewport_width, config.viewport_height), (1280, 800));
    }

    #[test]
    fn test_browser_config_builders() {
        let config = BrowserConfig::default()
            .with_headless(false)
            .with_no_sandbox()
            .with_viewport(800, 600)
            .with_chromium_path("/usr/bin/chromium");
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.viewport_width, 800);
        assert_eq!(
            config.chromium_path.as_deref(),
            Some(std::path::Path::new("/usr/bin/chromium"))
        );
    }

    #[test]
    fn test_browser_config_yaml_partial() {
        let config: BrowserConfig = serde_yaml_ng::from_str("sandbox: false").unwrap();
        assert!(!config.sandbox);
        assert!(config.headless);
    }
}
