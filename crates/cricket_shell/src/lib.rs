//! Cricket Manager Shell
//!
//! A full-screen embedded browser pointed at the Cricket Manager web app.
//! The shell keeps navigation inside the app's origin, hands every other link
//! to the system, locks the page viewport after each load, relays two debug
//! log calls from page scripts, and re-asserts immersive presentation on
//! resume.
//!
//! # Example
//!
//! ```ignore
//! use cricket_shell::prelude::*;
//!
//! let (mut shell, opener) = headless_shell(ShellConfig::default());
//! shell.handle_lifecycle(LifecycleEvent::Created { restored: false })?;
//!
//! let webview = shell.webview().unwrap();
//! assert!(webview.request_navigation("https://example.com/").is_intercepted());
//! assert_eq!(opener.opened(), vec!["https://example.com/"]);
//! ```

pub mod bridge;
pub mod config;
mod error;
pub mod headless_assert;
pub mod headless_report;
pub mod headless_runner;
pub mod headless_runtime;
pub mod headless_scenario;
pub mod logging;
pub mod navigation;
mod shell;
pub mod viewport;


pub use bridge::{BridgeCall, LogBridge, BRIDGE_LOG_TARGET};
pub use config::{BridgeAccess, ShellConfig};
pub use error::{Result, ShellError};
pub use navigation::NavigationPolicy;
pub use shell::{AppShell, BackOutcome};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::bridge::{BridgeCall, LogBridge};
    pub use crate::config::{BridgeAccess, ShellConfig};
    pub use crate::error::{Result, ShellError};
    pub use crate::headless_runtime::{headless_shell, HeadlessShell, RecordingOpener};
    pub use crate::navigation::NavigationPolicy;
    pub use crate::shell::{AppShell, BackOutcome};

    pub use cricket_platform::{
        ControlFlow, LifecycleEvent, NavigationDecision, SystemChrome, UrlOpener, WebView,
        WebViewEvent, WebViewHost, Window,
    };
}
