//! WebView abstraction for the embedded browser surface.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;

/// How the engine treats insecure sub-resources on secure pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MixedContentMode {
    /// Block every insecure sub-resource.
    #[default]
    NeverAllow,
    /// Engine-defined middle ground (images and media only).
    Compatibility,
    /// Load insecure sub-resources unconditionally.
    AlwaysAllow,
}

/// Pinch-zoom behaviour of the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoomSettings {
    /// Whether the page may be zoomed at all.
    pub supports_zoom: bool,
    /// Whether the engine's own gesture/hotkey zoom is active.
    pub built_in_zoom: bool,
    /// Whether on-screen zoom buttons are drawn.
    pub display_zoom_controls: bool,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            supports_zoom: true,
            built_in_zoom: false,
            display_zoom_controls: false,
        }
    }
}

impl ZoomSettings {
    /// Pinch-to-zoom on, on-screen zoom affordances off.
    pub const fn pinch_without_controls() -> Self {
        Self {
            supports_zoom: true,
            built_in_zoom: true,
            display_zoom_controls: false,
        }
    }

    /// Whether engine gesture/hotkey zoom should be switched on.
    pub const fn engine_zoom_enabled(&self) -> bool {
        self.supports_zoom && self.built_in_zoom
    }
}

/// Engine settings applied once when the surface is created.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WebSettings {
    /// Run scripts in loaded pages.
    pub javascript_enabled: bool,
    /// `localStorage` / `sessionStorage` persistence.
    pub dom_storage_enabled: bool,
    /// Structured page storage (IndexedDB / Web SQL).
    pub database_enabled: bool,
    pub mixed_content: MixedContentMode,
    /// Product token appended to the engine's default user agent.
    pub user_agent_suffix: Option<String>,
    pub zoom: ZoomSettings,
    /// Expose the surface to remote inspectors where the engine supports it.
    pub remote_debugging: bool,
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: false,
            dom_storage_enabled: false,
            database_enabled: false,
            mixed_content: MixedContentMode::default(),
            user_agent_suffix: None,
            zoom: ZoomSettings::default(),
            remote_debugging: false,
        }
    }
}

impl WebSettings {
    /// Create engine-default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn javascript_enabled(mut self, enabled: bool) -> Self {
        self.javascript_enabled = enabled;
        self
    }

    pub fn dom_storage_enabled(mut self, enabled: bool) -> Self {
        self.dom_storage_enabled = enabled;
        self
    }

    pub fn database_enabled(mut self, enabled: bool) -> Self {
        self.database_enabled = enabled;
        self
    }

    pub fn mixed_content(mut self, mode: MixedContentMode) -> Self {
        self.mixed_content = mode;
        self
    }

    /// Set the token appended to the engine's user agent.
    pub fn user_agent_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.user_agent_suffix = Some(suffix.into());
        self
    }

    pub fn zoom(mut self, zoom: ZoomSettings) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn remote_debugging(mut self, enabled: bool) -> Self {
        self.remote_debugging = enabled;
        self
    }

    /// Whether the engine needs persistent (non-incognito) storage.
    pub fn wants_persistent_storage(&self) -> bool {
        self.dom_storage_enabled || self.database_enabled
    }

    /// Compose the outgoing user agent from the engine's default string.
    ///
    /// The suffix is separated by a single space and never duplicated.
    pub fn user_agent(&self, engine_default: &str) -> String {
        let base = engine_default.trim_end();
        match self.user_agent_suffix.as_deref().map(str::trim) {
            Some(suffix) if !suffix.is_empty() && !base.ends_with(suffix) => {
                if base.is_empty() {
                    suffix.to_string()
                } else {
                    format!("{base} {suffix}")
                }
            }
            _ => base.to_string(),
        }
    }
}

/// Outcome of the navigation policy for a top-level navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationDecision {
    /// The surface loads the URL itself (not intercepted).
    HandleInternally,
    /// The URL went to the system handler; the surface must not navigate.
    DispatchExternally,
}

impl NavigationDecision {
    /// Whether the embedded surface must cancel the navigation.
    pub const fn is_intercepted(self) -> bool {
        matches!(self, Self::DispatchExternally)
    }
}

/// Callback consulted for every top-level navigation request.
pub type NavigationHandler = Arc<dyn Fn(&str) -> NavigationDecision + Send + Sync + 'static>;

/// Raw message posted by page scripts through a [`ScriptBridge`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeMessage {
    /// Payload exactly as the page sent it.
    pub body: String,
    /// URL of the page that sent it, when the engine reports one.
    pub source_url: Option<String>,
}

impl BridgeMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            source_url: None,
        }
    }

    pub fn from_page(body: impl Into<String>, source_url: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            source_url: Some(source_url.into()),
        }
    }
}

/// Callback receiving bridge messages. May run off the UI thread.
pub type BridgeHandler = Arc<dyn Fn(BridgeMessage) + Send + Sync + 'static>;

/// A named object exposed into every page's scripting context.
#[derive(Clone)]
pub struct ScriptBridge {
    /// Global name page scripts use to reach the bridge.
    pub name: String,
    /// Script installed before page scripts run; it defines the global and
    /// forwards calls to the engine's message channel.
    pub init_script: String,
    pub handler: BridgeHandler,
}

impl fmt::Debug for ScriptBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptBridge")
            .field("name", &self.name)
            .field("init_script_len", &self.init_script.len())
            .finish_non_exhaustive()
    }
}

/// WebView creation configuration.
#[derive(Clone, Default)]
pub struct WebViewConfig {
    /// Engine settings.
    pub settings: WebSettings,
    /// Navigation policy; `None` lets the engine handle everything.
    pub navigation_handler: Option<NavigationHandler>,
    /// Page-to-host bridge; `None` installs nothing.
    pub bridge: Option<ScriptBridge>,
}

impl fmt::Debug for WebViewConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebViewConfig")
            .field("settings", &self.settings)
            .field("navigation_handler", &self.navigation_handler.is_some())
            .field("bridge", &self.bridge)
            .finish()
    }
}

impl WebViewConfig {
    /// Create a new WebView configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set engine settings.
    pub fn settings(mut self, settings: WebSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the navigation policy callback.
    pub fn navigation_handler(mut self, handler: NavigationHandler) -> Self {
        self.navigation_handler = Some(handler);
        self
    }

    /// Install a page-to-host bridge.
    pub fn bridge(mut self, bridge: ScriptBridge) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Run the navigation policy; without one, everything stays internal.
    pub fn decide_navigation(&self, url: &str) -> NavigationDecision {
        self.navigation_handler
            .as_ref()
            .map_or(NavigationDecision::HandleInternally, |handler| handler(url))
    }
}

/// Stable identifier for a WebView instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WebViewId(pub u64);

/// Page-load events a backend forwards to the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WebViewEvent {
    /// A top-level load started.
    PageStarted(String),
    /// A top-level load finished.
    PageFinished(String),
}

/// The embedded browser surface.
pub trait WebView {
    /// Get the stable WebView identifier.
    fn id(&self) -> WebViewId;

    /// Issue a navigation command.
    fn load_url(&self, url: &str) -> Result<()>;

    /// Run a script in the current page without waiting for a result.
    fn evaluate_script(&self, script: &str) -> Result<()>;

    /// Whether in-surface history has an entry to go back to.
    fn can_go_back(&self) -> bool;

    /// Step back one history entry.
    fn go_back(&self) -> Result<()>;

    /// Destroy this WebView and release engine resources.
    fn destroy(&mut self) -> Result<()>;
}

/// Host capability for creating WebViews.
pub trait WebViewHost {
    /// Concrete WebView type used by this host.
    type WebView: WebView;

    /// Create a new WebView filling the host window.
    fn create_webview(&self, config: WebViewConfig) -> Result<Self::WebView>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_settings_builder() {
        let settings = WebSettings::new()
            .javascript_enabled(true)
            .dom_storage_enabled(true)
            .database_enabled(true)
            .mixed_content(MixedContentMode::AlwaysAllow)
            .user_agent_suffix("CricketManagerApp/1.0")
            .zoom(ZoomSettings::pinch_without_controls())
            .remote_debugging(true);

        assert!(settings.javascript_enabled);
        assert!(settings.wants_persistent_storage());
        assert_eq!(settings.mixed_content, MixedContentMode::AlwaysAllow);
        assert_eq!(
            settings.user_agent_suffix.as_deref(),
            Some("CricketManagerApp/1.0")
        );
        assert!(settings.zoom.engine_zoom_enabled());
        assert!(!settings.zoom.display_zoom_controls);
        assert!(settings.remote_debugging);
    }

    #[test]
    fn test_default_settings_are_conservative() {
        let settings = WebSettings::default();

        assert!(!settings.javascript_enabled);
        assert!(!settings.wants_persistent_storage());
        assert_eq!(settings.mixed_content, MixedContentMode::NeverAllow);
        assert!(!settings.remote_debugging);
    }

    #[test]
    fn test_user_agent_appends_suffix() {
        let settings = WebSettings::new().user_agent_suffix("CricketManagerApp/1.0");

        assert_eq!(
            settings.user_agent("Mozilla/5.0 (X11; Linux x86_64)"),
            "Mozilla/5.0 (X11; Linux x86_64) CricketManagerApp/1.0"
        );
    }

    #[test]
    fn test_user_agent_does_not_duplicate_suffix() {
        let settings = WebSettings::new().user_agent_suffix("CricketManagerApp/1.0");

        assert_eq!(
            settings.user_agent("Mozilla/5.0 CricketManagerApp/1.0"),
            "Mozilla/5.0 CricketManagerApp/1.0"
        );
    }

    #[test]
    fn test_user_agent_without_suffix_or_base() {
        assert_eq!(WebSettings::new().user_agent("Engine/1 "), "Engine/1");

        let settings = WebSettings::new().user_agent_suffix("Token/2");
        assert_eq!(settings.user_agent(""), "Token/2");
    }

    #[test]
    fn test_config_without_policy_keeps_navigation_internal() {
        let config = WebViewConfig::new();

        assert_eq!(
            config.decide_navigation("https://anywhere.example/"),
            NavigationDecision::HandleInternally
        );
    }

    #[test]
    fn test_config_runs_navigation_handler() {
        let config = WebViewConfig::new().navigation_handler(Arc::new(|url: &str| {
            if url.starts_with("https://inside.example/") {
                NavigationDecision::HandleInternally
            } else {
                NavigationDecision::DispatchExternally
            }
        }));

        assert_eq!(
            config.decide_navigation("https://inside.example/page"),
            NavigationDecision::HandleInternally
        );
        let outside = config.decide_navigation("https://outside.example/");
        assert_eq!(outside, NavigationDecision::DispatchExternally);
        assert!(outside.is_intercepted());
    }

    #[test]
    fn test_bridge_debug_omits_script_body() {
        let bridge = ScriptBridge {
            name: "AndroidInterface".to_string(),
            init_script: "window.AndroidInterface = {};".to_string(),
            handler: Arc::new(|_| {}),
        };

        let rendered = format!("{bridge:?}");
        assert!(rendered.contains("AndroidInterface"));
        assert!(!rendered.contains("window."));
    }
}
