//! Cricket Manager Desktop Host
//!
//! Runs the shell on macOS, Windows, and Linux: a winit window made
//! borderless-fullscreen, with a wry WebView stretched over it.

pub mod event_loop;
pub mod history;
pub mod input;
pub mod opener;
pub mod webview;
pub mod window;

use std::sync::Arc;

use cricket_shell::{Result, ShellConfig};

pub use event_loop::{DesktopEventLoop, DesktopShell, ShellEvent};
pub use opener::SystemUrlOpener;
pub use webview::{route_new_window, DesktopWebView, DesktopWebViewHost, NewWindowRoute};
pub use window::DesktopWindow;

/// Open the shell window and block until it closes.
pub fn run(config: Arc<ShellConfig>) -> Result<()> {
    tracing::info!(home = %config.home_url, "Starting desktop shell");
    DesktopEventLoop::new(config)?.run()
}
