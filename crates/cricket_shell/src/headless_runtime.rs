//! In-memory host for running the shell without a display.
//!
//! Every effect the shell has on its host is recorded so diagnostics and tests
//! can observe it: chrome applications, loads, evaluated scripts, history, and
//! external hand-offs.

use std::cell::{Cell, RefCell};
use std::sync::{Arc, Mutex};

use cricket_platform::{
    BridgeMessage, NavigationDecision, PlatformError, Result, SystemChrome, UrlOpener, WebSettings,
    WebView, WebViewConfig, WebViewHost, WebViewId, Window,
};

use crate::config::ShellConfig;
use crate::shell::AppShell;

/// Shell wired to the headless host.
pub type HeadlessShell = AppShell<HeadlessWindow, HeadlessHost>;

/// Build a headless shell and the opener that records its external hand-offs.
pub fn headless_shell(config: ShellConfig) -> (HeadlessShell, Arc<RecordingOpener>) {
    let opener = Arc::new(RecordingOpener::default());
    let shell = AppShell::new(
        Arc::new(config),
        HeadlessWindow::default(),
        HeadlessHost::default(),
        opener.clone(),
    );
    (shell, opener)
}

/// Window that remembers the chrome applied to it.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    chrome: Cell<SystemChrome>,
    applications: Cell<usize>,
}

impl HeadlessWindow {
    /// How many times chrome has been applied.
    pub fn chrome_applications(&self) -> usize {
        self.applications.get()
    }
}

impl Window for HeadlessWindow {
    fn set_system_chrome(&self, chrome: SystemChrome) -> Result<()> {
        self.chrome.set(chrome);
        self.applications.set(self.applications.get() + 1);
        Ok(())
    }

    fn system_chrome(&self) -> SystemChrome {
        self.chrome.get()
    }
}

/// Host creating [`HeadlessWebView`]s.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    created: Cell<u64>,
}

impl HeadlessHost {
    pub fn webviews_created(&self) -> u64 {
        self.created.get()
    }
}

impl WebViewHost for HeadlessHost {
    type WebView = HeadlessWebView;

    fn create_webview(&self, config: WebViewConfig) -> Result<Self::WebView> {
        let id = self.created.get() + 1;
        self.created.set(id);
        Ok(HeadlessWebView {
            id: WebViewId(id),
            config,
            state: RefCell::new(SurfaceState::default()),
        })
    }
}

#[derive(Debug, Default)]
struct SurfaceState {
    loads: Vec<String>,
    scripts: Vec<String>,
    history: Vec<String>,
    destroyed: bool,
}

/// Surface that commits navigations to an in-memory history.
#[derive(Debug)]
pub struct HeadlessWebView {
    id: WebViewId,
    config: WebViewConfig,
    state: RefCell<SurfaceState>,
}

impl HeadlessWebView {
    /// URLs passed to `load_url`, in order.
    pub fn loads(&self) -> Vec<String> {
        self.state.borrow().loads.clone()
    }

    /// Scripts passed to `evaluate_script`, in order.
    pub fn scripts(&self) -> Vec<String> {
        self.state.borrow().scripts.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.state.borrow().history.clone()
    }

    pub fn current_url(&self) -> Option<String> {
        self.state.borrow().history.last().cloned()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    pub fn settings(&self) -> &WebSettings {
        &self.config.settings
    }

    pub fn bridge_name(&self) -> Option<&str> {
        self.config.bridge.as_ref().map(|bridge| bridge.name.as_str())
    }

    /// Simulate a link click: run the navigation policy and commit the URL
    /// when the surface keeps it.
    pub fn request_navigation(&self, url: &str) -> NavigationDecision {
        let decision = self.config.decide_navigation(url);
        if !decision.is_intercepted() {
            self.state.borrow_mut().history.push(url.to_string());
        }
        decision
    }

    /// Simulate a page script posting to the bridge. Returns `false` when no
    /// bridge is installed.
    pub fn post_bridge_message(&self, message: BridgeMessage) -> bool {
        match self.config.bridge.as_ref() {
            Some(bridge) => {
                (bridge.handler)(message);
                true
            }
            None => false,
        }
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.state.borrow().destroyed {
            return Err(PlatformError::Unavailable(format!(
                "headless webview {:?} already destroyed",
                self.id
            )));
        }
        Ok(())
    }
}

impl WebView for HeadlessWebView {
    fn id(&self) -> WebViewId {
        self.id
    }

    fn load_url(&self, url: &str) -> Result<()> {
        self.ensure_alive()?;
        let mut state = self.state.borrow_mut();
        state.loads.push(url.to_string());
        state.history.push(url.to_string());
        Ok(())
    }

    fn evaluate_script(&self, script: &str) -> Result<()> {
        self.ensure_alive()?;
        self.state.borrow_mut().scripts.push(script.to_string());
        Ok(())
    }

    fn can_go_back(&self) -> bool {
        self.state.borrow().history.len() > 1
    }

    fn go_back(&self) -> Result<()> {
        self.ensure_alive()?;
        let mut state = self.state.borrow_mut();
        if state.history.len() <= 1 {
            return Err(PlatformError::WebViewOperation(
                "no history entry to go back to".to_string(),
            ));
        }
        state.history.pop();
        Ok(())
    }

    fn destroy(&mut self) -> Result<()> {
        self.state.get_mut().destroyed = true;
        Ok(())
    }
}

/// Opener that records URLs instead of launching anything.
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|opened| opened.clone())
            .unwrap_or_default()
    }
}

impl UrlOpener for RecordingOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        self.opened
            .lock()
            .map_err(|_| PlatformError::Other("recording opener lock poisoned".to_string()))?
            .push(url.to_string());
        Ok(())
    }
}
