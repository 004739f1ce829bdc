// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Chromium driver over the DevTools protocol.
//!
//! Locators are resolved by a small script evaluated in the page, so CSS
//! selectors and text filters behave the same for every action. Clicks are
//! dispatched as real mouse events at the element's centre so they show up
//! in the recording.

use super::video::VideoSink;
use super::{
    Browser, Driver, DriverError, LaunchOptions, Locator, Page, Session, SessionOptions,
};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::emulation::{
    MediaFeature, SetDeviceMetricsOverrideParams, SetEmulatedMediaParams,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::layout::Point;
use chromiumoxide::page::ScreenshotParams;
use futures::StreamExt;
use serde::Deserialize;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Helpers prepended to every locator script.
const RESOLVE_JS: &str = r#"
const __wtAll = (spec) => {
  let els = Array.from(document.querySelectorAll(spec.css));
  if (spec.has_text.length) {
    els = els.filter(e => spec.has_text.some(t => (e.innerText || e.textContent || '').includes(t)));
  }
  if (spec.innermost) {
    els = els.filter(e => !els.some(o => o !== e && e.contains(o)));
  }
  return els;
};
const __wtPick = (spec) => {
  const els = __wtAll(spec);
  if (spec.pick.kind === 'first') return els[0] || null;
  if (spec.pick.kind === 'last') return els[els.length - 1] || null;
  return els[spec.pick.index] || null;
};
const __wtVisible = (el) => {
  if (!el) return false;
  const style = getComputedStyle(el);
  if (style.visibility === 'hidden' || style.display === 'none') return false;
  const rect = el.getBoundingClientRect();
  return rect.width > 0 && rect.height > 0;
};
"#;

fn protocol(err: impl std::fmt::Display) -> DriverError {
    DriverError::Protocol(err.to_string())
}

/// Launches a local Chromium.
#[derive(Clone, Debug, Default)]
pub struct ChromiumDriver;

impl ChromiumDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Driver for ChromiumDriver {
    async fn launch(&self, options: &LaunchOptions) -> Result<Box<dyn Browser>, DriverError> {
        let mut builder = BrowserConfig::builder().window_size(1920, 1080);
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(ref exe) = options.executable {
            builder = builder.chrome_executable(exe);
        }
        let config = builder.build().map_err(DriverError::Launch)?;

        let (browser, mut handler) = CdpBrowser::launch(config)
            .await
            .map_err(|e| DriverError::Launch(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "browser handler event failed");
                }
            }
        });

        tracing::debug!(headless = options.headless, "browser launched");
        Ok(Box::new(ChromiumBrowser {
            browser: Arc::new(browser),
            handler_task,
            slow_mo: options.slow_mo,
        }))
    }
}

struct ChromiumBrowser {
    browser: Arc<CdpBrowser>,
    handler_task: JoinHandle<()>,
    slow_mo: Duration,
}

#[async_trait]
impl Browser for ChromiumBrowser {
    async fn new_session(
        &self,
        options: &SessionOptions,
    ) -> Result<Box<dyn Session>, DriverError> {
        let context_id = self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await
            .map_err(protocol)?
            .result
            .browser_context_id;

        let target = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id.clone())
            .build()
            .map_err(DriverError::Protocol)?;
        let page = self.browser.new_page(target).await.map_err(protocol)?;

        let width = i64::from(options.viewport.width);
        let height = i64::from(options.viewport.height);
        page.execute(SetDeviceMetricsOverrideParams::new(width, height, 1.0, false))
            .await
            .map_err(protocol)?;
        if options.dark_mode {
            let media = SetEmulatedMediaParams {
                media: None,
                features: Some(vec![MediaFeature::new("prefers-color-scheme", "dark")]),
            };
            page.execute(media).await.map_err(protocol)?;
        }

        let video = match options.video_dir {
            Some(ref dir) => Some(VideoSink::start(page.clone(), dir.clone())?),
            None => None,
        };

        Ok(Box::new(ChromiumSession {
            browser: Arc::clone(&self.browser),
            context_id,
            page: ChromiumPage {
                page,
                slow_mo: self.slow_mo,
            },
            video,
        }))
    }

    async fn close(self: Box<Self>) -> Result<(), DriverError> {
        let ChromiumBrowser {
            browser,
            handler_task,
            ..
        } = *self;
        match Arc::try_unwrap(browser) {
            Ok(mut browser) => {
                browser.close().await.map_err(protocol)?;
                let _ = browser.wait().await;
            }
            Err(_) => tracing::warn!("browser still shared at shutdown; leaving it to drop"),
        }
        handler_task.abort();
        Ok(())
    }
}

struct ChromiumSession {
    browser: Arc<CdpBrowser>,
    context_id: BrowserContextId,
    page: ChromiumPage,
    video: Option<VideoSink>,
}

#[async_trait]
impl Session for ChromiumSession {
    fn page(&self) -> &dyn Page {
        &self.page
    }

    async fn close(self: Box<Self>) -> Result<Option<PathBuf>, DriverError> {
        let ChromiumSession {
            browser,
            context_id,
            page,
            video,
        } = *self;

        // Stop sampling before the page goes away; the page and context are
        // released even when encoding fails
        let video = match video {
            Some(sink) => sink.finish().await,
            None => Ok(None),
        };
        let page_closed = page.page.close().await.map_err(protocol);
        let disposed = browser
            .execute(DisposeBrowserContextParams::new(context_id))
            .await
            .map(|_| ())
            .map_err(protocol);
        super::settle(video, [page_closed, disposed])
    }
}

#[derive(Debug, Deserialize)]
struct Centre {
    x: f64,
    y: f64,
}

struct ChromiumPage {
    page: chromiumoxide::Page,
    slow_mo: Duration,
}

impl ChromiumPage {
    /// Evaluate a locator script body with `spec` bound to the locator.
    async fn eval_locator<T>(&self, locator: &Locator, body: &str) -> Result<T, DriverError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let script = format!(
            "(() => {{ {RESOLVE_JS} const spec = {}; {body} }})()",
            locator.to_json()
        );
        self.eval(&script).await
    }

    async fn eval<T>(&self, script: &str) -> Result<T, DriverError>
    where
        T: for<'de> Deserialize<'de>,
    {
        self.page
            .evaluate(script)
            .await
            .map_err(protocol)?
            .into_value::<T>()
            .map_err(protocol)
    }

    async fn settle(&self) {
        if !self.slow_mo.is_zero() {
            tokio::time::sleep(self.slow_mo).await;
        }
    }

    async fn poll<F, Fut>(&self, what: String, timeout: Duration, mut check: F) -> Result<(), DriverError>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<bool, DriverError>> + Send,
    {
        let deadline = Instant::now() + timeout;
        loop {
            // Errors while the page is navigating count as "not yet"
            if check().await.unwrap_or(false) {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(DriverError::Timeout { what, timeout });
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn act(&self, locator: &Locator, body: &str) -> Result<(), DriverError> {
        self.settle().await;
        let found: bool = self.eval_locator(locator, body).await?;
        if found {
            Ok(())
        } else {
            Err(DriverError::NotFound(locator.to_string()))
        }
    }
}

#[async_trait]
impl Page for ChromiumPage {
    async fn goto(&self, url: &str) -> Result<(), DriverError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| DriverError::Navigation {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_for_url(&self, pattern: &str, timeout: Duration) -> Result<(), DriverError> {
        let glob = glob::Pattern::new(pattern).map_err(protocol)?;
        let glob = &glob;
        let page = &self.page;
        self.poll(format!("url {pattern}"), timeout, move || async move {
            let url = page.url().await.map_err(protocol)?;
            Ok(url.is_some_and(|u| glob.matches(&u)))
        })
        .await
    }

    async fn wait_for_condition(
        &self,
        script: &str,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        let probe = format!("!!({script})");
        self.poll("page condition".to_string(), timeout, || self.eval::<bool>(&probe))
            .await
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<(), DriverError> {
        self.poll(locator.to_string(), timeout, || self.is_visible(locator))
            .await
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool, DriverError> {
        self.eval_locator(locator, "return __wtVisible(__wtPick(spec));")
            .await
    }

    async fn is_enabled(&self, locator: &Locator) -> Result<bool, DriverError> {
        self.eval_locator(
            locator,
            "const el = __wtPick(spec); return !!el && !el.disabled;",
        )
        .await
    }

    async fn count(&self, locator: &Locator) -> Result<usize, DriverError> {
        self.eval_locator(locator, "return __wtAll(spec).length;")
            .await
    }

    async fn click(&self, locator: &Locator) -> Result<(), DriverError> {
        self.settle().await;
        let centre: Option<Centre> = self
            .eval_locator(
                locator,
                r#"const el = __wtPick(spec);
                if (!el) return null;
                el.scrollIntoView({ block: 'center', inline: 'center' });
                const r = el.getBoundingClientRect();
                return { x: r.left + r.width / 2, y: r.top + r.height / 2 };"#,
            )
            .await?;
        let centre = centre.ok_or_else(|| DriverError::NotFound(locator.to_string()))?;
        self.page
            .click(Point::new(centre.x, centre.y))
            .await
            .map_err(protocol)?;
        Ok(())
    }

    async fn fill(&self, locator: &Locator, value: &str) -> Result<(), DriverError> {
        let value = serde_json::to_string(value).map_err(protocol)?;
        let body = format!(
            r#"const el = __wtPick(spec);
            if (!el) return false;
            el.scrollIntoView({{ block: 'center' }});
            el.focus();
            const proto = el instanceof HTMLTextAreaElement
              ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype;
            Object.getOwnPropertyDescriptor(proto, 'value').set.call(el, {value});
            el.dispatchEvent(new Event('input', {{ bubbles: true }}));
            el.dispatchEvent(new Event('change', {{ bubbles: true }}));
            return true;"#
        );
        self.act(locator, &body).await
    }

    async fn check(&self, locator: &Locator) -> Result<(), DriverError> {
        self.act(
            locator,
            "const el = __wtPick(spec); if (!el) return false; if (!el.checked) el.click(); return true;",
        )
        .await
    }

    async fn scroll_into_view(&self, locator: &Locator) -> Result<(), DriverError> {
        self.act(
            locator,
            "const el = __wtPick(spec); if (!el) return false; el.scrollIntoView({ block: 'center' }); return true;",
        )
        .await
    }

    async fn text_content(&self, locator: &Locator) -> Result<Option<String>, DriverError> {
        self.eval_locator(
            locator,
            "const el = __wtPick(spec); return el ? (el.textContent || '').trim() : null;",
        )
        .await
    }

    async fn evaluate(&self, script: &str) -> Result<(), DriverError> {
        self.page.evaluate(script).await.map_err(protocol)?;
        Ok(())
    }

    async fn screenshot(&self, path: &Path) -> Result<(), DriverError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(false)
            .build();
        let png = self.page.screenshot(params).await.map_err(protocol)?;
        tokio::fs::write(path, png).await?;
        Ok(())
    }
}
