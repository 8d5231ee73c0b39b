//! Fixed shell configuration.
//!
//! Every constant the shell depends on lives here so the single trust decision
//! (the origin prefix check) stays auditable in one place.

use cricket_platform::{MixedContentMode, WebSettings, ZoomSettings};
use serde::{Deserialize, Serialize};

/// Page loaded once at startup.
pub const HOME_URL: &str = "https://anujloomba.github.io/bccb_refactored/";

/// Navigations starting with this prefix stay inside the embedded surface.
pub const TRUSTED_ORIGIN_PREFIX: &str = "https://anujloomba.github.io/";

/// Product token appended to the engine user agent.
pub const USER_AGENT_TOKEN: &str = "CricketManagerApp/1.0";

/// Global name the hosted app uses to reach the log bridge.
pub const BRIDGE_NAME: &str = "AndroidInterface";

pub const WINDOW_TITLE: &str = "Cricket Manager";

/// Which pages may write to the host log through the bridge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BridgeAccess {
    /// Any script in any loaded page.
    #[default]
    Unrestricted,
    /// Only pages under the trusted origin prefix; calls without a known
    /// source page are dropped. The source is the top-level page URL, so
    /// frames embedded in a trusted page count as trusted.
    TrustedOriginOnly,
    /// No bridge is installed.
    Disabled,
}

/// Immutable shell configuration, shared for the process lifetime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub home_url: String,
    pub trusted_origin_prefix: String,
    pub user_agent_token: String,
    pub bridge_name: String,
    pub bridge_access: BridgeAccess,
    pub window_title: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            home_url: HOME_URL.to_string(),
            trusted_origin_prefix: TRUSTED_ORIGIN_PREFIX.to_string(),
            user_agent_token: USER_AGENT_TOKEN.to_string(),
            bridge_name: BRIDGE_NAME.to_string(),
            bridge_access: BridgeAccess::default(),
            window_title: WINDOW_TITLE.to_string(),
        }
    }
}

impl ShellConfig {
    /// Production configuration for the Cricket Manager web app.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_home_url(mut self, url: impl Into<String>) -> Self {
        self.home_url = url.into();
        self
    }

    pub fn with_trusted_origin_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.trusted_origin_prefix = prefix.into();
        self
    }

    pub fn with_bridge_access(mut self, access: BridgeAccess) -> Self {
        self.bridge_access = access;
        self
    }

    /// Engine settings the shell applies at initialization.
    pub fn web_settings(&self) -> WebSettings {
        WebSettings::new()
            .javascript_enabled(true)
            .dom_storage_enabled(true)
            .database_enabled(true)
            .mixed_content(MixedContentMode::AlwaysAllow)
            .user_agent_suffix(self.user_agent_token.clone())
            .zoom(ZoomSettings::pinch_without_controls())
            .remote_debugging(true)
    }
}
