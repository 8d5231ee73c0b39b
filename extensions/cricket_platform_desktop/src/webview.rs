//! Desktop WebView backend using wry.

use std::sync::{Arc, Mutex, MutexGuard};

use cricket_platform::{
    BridgeMessage, MixedContentMode, NavigationHandler, PlatformError, Result, WebView,
    WebViewConfig, WebViewEvent, WebViewHost, WebViewId,
};
use winit::event_loop::EventLoopProxy;
use winit::window::Window as WinitWindow;
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::{PageLoadEvent, Rect, WebViewBuilder};

use crate::event_loop::ShellEvent;
use crate::history::HistoryTracker;

/// User agent the desktop engines report before the product token is added.
///
/// wry cannot read the engine default before the surface exists, so each
/// backend gets the string its engine ships with.
pub fn baseline_user_agent() -> &'static str {
    #[cfg(target_os = "macos")]
    {
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko)"
    }
    #[cfg(target_os = "windows")]
    {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0"
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/605.1.15 (KHTML, like Gecko)"
    }
}

fn full_window_bounds(width: f64, height: f64) -> Rect {
    Rect {
        position: LogicalPosition::new(0.0, 0.0).into(),
        size: LogicalSize::new(width, height).into(),
    }
}

/// Where a page-initiated new-window request (`target="_blank"`,
/// `window.open`) ends up. The engine's popup is always refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewWindowRoute {
    /// Load in the existing surface.
    CurrentSurface(String),
    /// The navigation policy handed the URL to the system handler.
    External,
}

/// Run a new-window request through the same policy as top-level
/// navigations.
pub fn route_new_window(handler: Option<&NavigationHandler>, url: &str) -> NewWindowRoute {
    match handler {
        Some(handler) if handler(url).is_intercepted() => NewWindowRoute::External,
        _ => NewWindowRoute::CurrentSurface(url.to_string()),
    }
}

#[derive(Default)]
struct DesktopWebViewHostState {
    cleaned_up: bool,
    next_id: u64,
}

/// Desktop-side host for creating the embedded WebView.
#[derive(Clone)]
pub struct DesktopWebViewHost {
    window: Arc<WinitWindow>,
    proxy: EventLoopProxy<ShellEvent>,
    state: Arc<Mutex<DesktopWebViewHostState>>,
}

impl DesktopWebViewHost {
    pub(crate) fn new(window: Arc<WinitWindow>, proxy: EventLoopProxy<ShellEvent>) -> Self {
        Self {
            window,
            proxy,
            state: Arc::new(Mutex::new(DesktopWebViewHostState::default())),
        }
    }

    /// Lifecycle hook for explicit cleanup on window teardown.
    pub fn cleanup(&self) -> Result<()> {
        let mut state = self.lock_state()?;
        state.cleaned_up = true;
        Ok(())
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, DesktopWebViewHostState>> {
        self.state.lock().map_err(|_| {
            PlatformError::Other("desktop webview host state lock poisoned".to_string())
        })
    }

    fn window_bounds(&self) -> Rect {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        full_window_bounds(size.width, size.height)
    }
}

impl WebViewHost for DesktopWebViewHost {
    type WebView = DesktopWebView;

    fn create_webview(&self, config: WebViewConfig) -> Result<Self::WebView> {
        let mut state = self.lock_state()?;
        if state.cleaned_up {
            return Err(PlatformError::Unavailable(
                "desktop webview host already cleaned up".to_string(),
            ));
        }
        state.next_id += 1;
        let id = WebViewId(state.next_id);
        drop(state);

        let settings = &config.settings;
        if !settings.javascript_enabled {
            tracing::warn!("Desktop engines always run page scripts; ignoring javascript_enabled=false");
        }
        if settings.mixed_content != MixedContentMode::NeverAllow {
            tracing::debug!(mode = ?settings.mixed_content, "Mixed content is engine-managed on desktop");
        }
        let user_agent = settings.user_agent(baseline_user_agent());
        tracing::debug!(%user_agent, ?id, "Creating desktop webview");

        let history = Arc::new(Mutex::new(HistoryTracker::new()));

        let mut builder = WebViewBuilder::new()
            .with_bounds(self.window_bounds())
            .with_user_agent(user_agent.as_str())
            .with_devtools(settings.remote_debugging)
            .with_incognito(!settings.wants_persistent_storage())
            .with_hotkeys_zoom(settings.zoom.engine_zoom_enabled());

        let navigation_handler = config.navigation_handler.clone();
        if let Some(handler) = navigation_handler.clone() {
            let nav_history = Arc::clone(&history);
            builder = builder.with_navigation_handler(move |url: String| {
                let allowed = !handler(url.as_str()).is_intercepted();
                if allowed {
                    if let Ok(mut history) = nav_history.lock() {
                        history.note_navigation(&url);
                    }
                }
                allowed
            });
        }

        let popup_proxy = self.proxy.clone();
        builder = builder.with_new_window_req_handler(move |url: String| {
            match route_new_window(navigation_handler.as_ref(), &url) {
                NewWindowRoute::CurrentSurface(url) => {
                    tracing::debug!(url = %url, "Loading new-window request in place");
                    if popup_proxy.send_event(ShellEvent::LoadInPlace(url)).is_err() {
                        tracing::debug!("Event loop closed, dropping new-window request");
                    }
                }
                NewWindowRoute::External => {}
            }
            false
        });

        let proxy = self.proxy.clone();
        let load_history = Arc::clone(&history);
        builder = builder.with_on_page_load_handler(move |event, url| {
            let event = match event {
                PageLoadEvent::Started => WebViewEvent::PageStarted(url),
                PageLoadEvent::Finished => {
                    match load_history.lock() {
                        Ok(mut history) => history.record_finished(&url),
                        Err(_) => tracing::warn!("Webview history lock poisoned"),
                    }
                    WebViewEvent::PageFinished(url)
                }
            };
            if proxy.send_event(ShellEvent::WebView(event)).is_err() {
                tracing::debug!("Event loop closed, dropping page-load event");
            }
        });

        if let Some(bridge) = config.bridge.as_ref() {
            let handler = Arc::clone(&bridge.handler);
            builder = builder
                .with_initialization_script(bridge.init_script.as_str())
                .with_ipc_handler(move |request: wry::http::Request<String>| {
                    // wry fills the URI from the top-level page, not the calling frame.
                    let source_url = request.uri().to_string();
                    handler(BridgeMessage::from_page(request.into_body(), source_url));
                });
        }

        let webview = builder
            .build_as_child(&*self.window)
            .map_err(|e| PlatformError::WebViewCreation(e.to_string()))?;

        Ok(DesktopWebView {
            id,
            webview: Some(webview),
            history,
        })
    }
}

/// Desktop-side WebView handle.
pub struct DesktopWebView {
    id: WebViewId,
    webview: Option<wry::WebView>,
    history: Arc<Mutex<HistoryTracker>>,
}

impl DesktopWebView {
    fn inner(&self) -> Result<&wry::WebView> {
        self.webview.as_ref().ok_or_else(|| {
            PlatformError::Unavailable(format!("desktop webview {:?} destroyed", self.id))
        })
    }

    fn operation_error(action: &str, error: wry::Error) -> PlatformError {
        PlatformError::WebViewOperation(format!("{action}: {error}"))
    }

    /// Stretch the surface over the whole window.
    pub fn fill(&self, width: f64, height: f64) -> Result<()> {
        self.inner()?
            .set_bounds(full_window_bounds(width, height))
            .map_err(|e| Self::operation_error("resize", e))
    }
}

impl WebView for DesktopWebView {
    fn id(&self) -> WebViewId {
        self.id
    }

    fn load_url(&self, url: &str) -> Result<()> {
        self.inner()?
            .load_url(url)
            .map_err(|e| Self::operation_error("load", e))
    }

    fn evaluate_script(&self, script: &str) -> Result<()> {
        self.inner()?
            .evaluate_script(script)
            .map_err(|e| Self::operation_error("evaluate script", e))
    }

    fn can_go_back(&self) -> bool {
        self.history
            .lock()
            .map(|history| history.can_go_back())
            .unwrap_or(false)
    }

    fn go_back(&self) -> Result<()> {
        let webview = self.inner()?;
        {
            let mut history = self
                .history
                .lock()
                .map_err(|_| PlatformError::Other("webview history lock poisoned".to_string()))?;
            if history.begin_back().is_none() {
                return Err(PlatformError::WebViewOperation(
                    "no history entry to go back to".to_string(),
                ));
            }
        }
        webview
            .evaluate_script("history.back();")
            .map_err(|e| Self::operation_error("go back", e))
    }

    fn destroy(&mut self) -> Result<()> {
        // Dropping the wry handle tears the engine view down.
        self.webview.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cricket_platform::NavigationDecision;

    const TRUSTED: &str = "https://anujloomba.github.io/";

    fn prefix_handler(opened: Arc<Mutex<Vec<String>>>) -> NavigationHandler {
        Arc::new(move |url: &str| {
            if url.starts_with(TRUSTED) {
                NavigationDecision::HandleInternally
            } else {
                opened.lock().unwrap().push(url.to_string());
                NavigationDecision::DispatchExternally
            }
        })
    }

    #[test]
    fn blank_target_to_trusted_page_loads_in_place() {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let handler = prefix_handler(Arc::clone(&opened));
        let url = "https://anujloomba.github.io/bccb_refactored/stats";

        assert_eq!(
            route_new_window(Some(&handler), url),
            NewWindowRoute::CurrentSurface(url.to_string())
        );
        assert!(opened.lock().unwrap().is_empty());
    }

    #[test]
    fn blank_target_elsewhere_goes_to_system_handler() {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let handler = prefix_handler(Arc::clone(&opened));

        assert_eq!(
            route_new_window(Some(&handler), "https://example.com/"),
            NewWindowRoute::External
        );
        assert_eq!(*opened.lock().unwrap(), vec!["https://example.com/"]);
    }

    #[test]
    fn without_policy_new_windows_stay_in_surface() {
        assert_eq!(
            route_new_window(None, "https://example.com/"),
            NewWindowRoute::CurrentSurface("https://example.com/".to_string())
        );
    }

    #[test]
    fn user_agent_gets_token_once() {
        let settings = cricket_platform::WebSettings::new().user_agent_suffix("CricketManagerApp/1.0");
        let ua = settings.user_agent(baseline_user_agent());
        assert!(ua.starts_with(baseline_user_agent()));
        assert!(ua.ends_with(" CricketManagerApp/1.0"));
        assert_eq!(ua.matches("CricketManagerApp/1.0").count(), 1);
    }
}
