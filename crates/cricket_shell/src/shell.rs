//! The shell controller driven by host lifecycle callbacks.

use std::sync::Arc;

use cricket_platform::{
    ControlFlow, LifecycleEvent, SystemChrome, UrlOpener, WebView, WebViewConfig, WebViewEvent,
    WebViewHost, Window,
};

use crate::bridge::LogBridge;
use crate::config::ShellConfig;
use crate::error::{Result, ShellError};
use crate::navigation::NavigationPolicy;
use crate::viewport::VIEWPORT_LOCK_SCRIPT;

/// Result of the system back action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackOutcome {
    /// The surface stepped back one history entry.
    Consumed,
    /// Nothing to go back to; the platform default applies.
    Delegated,
}

/// Full-screen WebView shell.
///
/// Owned by the host's UI event loop. Engine callbacks that may arrive on
/// other threads only see the immutable navigation policy and the stateless
/// log bridge.
pub struct AppShell<W, H>
where
    W: Window,
    H: WebViewHost,
{
    config: Arc<ShellConfig>,
    window: W,
    host: H,
    opener: Arc<dyn UrlOpener>,
    webview: Option<H::WebView>,
}

impl<W, H> AppShell<W, H>
where
    W: Window,
    H: WebViewHost,
{
    pub fn new(config: Arc<ShellConfig>, window: W, host: H, opener: Arc<dyn UrlOpener>) -> Self {
        Self {
            config,
            window,
            host,
            opener,
            webview: None,
        }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// The embedded surface, once `initialize` has built it.
    pub fn webview(&self) -> Option<&H::WebView> {
        self.webview.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.webview.is_some()
    }

    /// Chrome set applied on create and on every resume.
    pub const fn chrome() -> SystemChrome {
        SystemChrome::IMMERSIVE
    }

    /// Engine configuration built from the shell constants.
    pub fn webview_config(&self) -> WebViewConfig {
        let policy = NavigationPolicy::new(self.config.trusted_origin_prefix.clone());
        let mut config = WebViewConfig::new()
            .settings(self.config.web_settings())
            .navigation_handler(policy.into_handler(Arc::clone(&self.opener)));
        if let Some(bridge) = LogBridge::from_config(&self.config).script_bridge(&self.config.bridge_name)
        {
            config = config.bridge(bridge);
        }
        config
    }

    /// Build the surface and load the home page.
    ///
    /// Saved state is only reported; the shell always starts from the home URL.
    pub fn initialize(&mut self, restored: bool) -> Result<()> {
        if self.webview.is_some() {
            return Err(ShellError::AlreadyInitialized);
        }
        tracing::info!(restored, home = %self.config.home_url, "Initializing shell");

        self.apply_chrome()?;

        let mut webview = self.host.create_webview(self.webview_config())?;
        if let Err(e) = webview.load_url(&self.config.home_url) {
            // Leave nothing behind so a later `Created` starts clean.
            if let Err(destroy_err) = webview.destroy() {
                tracing::warn!("Failed to release surface after load error: {}", destroy_err);
            }
            return Err(e.into());
        }
        self.webview = Some(webview);
        Ok(())
    }

    /// Re-assert full-screen presentation after regaining the foreground.
    pub fn on_resume(&self) -> Result<()> {
        tracing::debug!("Shell resumed, re-applying system chrome");
        self.apply_chrome()
    }

    /// Step back inside the surface, or report that the platform should act.
    pub fn on_back_pressed(&self) -> Result<BackOutcome> {
        match self.webview.as_ref() {
            Some(webview) if webview.can_go_back() => {
                webview.go_back()?;
                tracing::debug!("Back consumed by surface history");
                Ok(BackOutcome::Consumed)
            }
            _ => Ok(BackOutcome::Delegated),
        }
    }

    /// Lock the viewport after a page finished loading.
    pub fn on_page_finished(&self, url: &str) {
        let Some(webview) = self.webview.as_ref() else {
            tracing::warn!(url, "Page finished before the surface was created");
            return;
        };
        if let Err(e) = webview.evaluate_script(VIEWPORT_LOCK_SCRIPT) {
            tracing::warn!("Failed to lock viewport on '{}': {}", url, e);
        }
    }

    pub fn handle_webview_event(&self, event: WebViewEvent) {
        match event {
            WebViewEvent::PageStarted(url) => tracing::debug!(url = %url, "Page started"),
            WebViewEvent::PageFinished(url) => {
                tracing::debug!(url = %url, "Page finished");
                self.on_page_finished(&url);
            }
        }
    }

    /// Release the surface.
    pub fn destroy(&mut self) -> Result<()> {
        if let Some(mut webview) = self.webview.take() {
            webview.destroy()?;
        }
        Ok(())
    }

    /// Single dispatch entry for host lifecycle events.
    pub fn handle_lifecycle(&mut self, event: LifecycleEvent) -> Result<ControlFlow> {
        match event {
            LifecycleEvent::Created { restored } => {
                self.initialize(restored)?;
                Ok(ControlFlow::Continue)
            }
            LifecycleEvent::Resumed => {
                self.on_resume()?;
                Ok(ControlFlow::Continue)
            }
            LifecycleEvent::Suspended => {
                tracing::info!("Shell suspended");
                Ok(ControlFlow::Continue)
            }
            LifecycleEvent::BackPressed => match self.on_back_pressed()? {
                BackOutcome::Consumed => Ok(ControlFlow::Continue),
                BackOutcome::Delegated => {
                    tracing::info!("No surface history left, leaving shell");
                    Ok(ControlFlow::Exit)
                }
            },
            LifecycleEvent::Destroyed => {
                tracing::info!("Shell destroyed");
                self.destroy()?;
                Ok(ControlFlow::Exit)
            }
        }
    }

    fn apply_chrome(&self) -> Result<()> {
        self.window.set_system_chrome(Self::chrome())?;
        Ok(())
    }
}
