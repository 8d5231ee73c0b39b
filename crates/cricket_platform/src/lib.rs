//! Cricket Manager Platform Abstraction
//!
//! Window chrome, lifecycle events, URL hand-off, and the embedded WebView
//! surface shared by every host backend. Nothing in this crate touches OS APIs;
//! backends such as `cricket_platform_desktop` implement the traits.

pub mod chrome;
pub mod error;
pub mod lifecycle;
pub mod opener;
pub mod webview;
pub mod window;

pub use chrome::SystemChrome;
pub use error::{PlatformError, Result};
pub use lifecycle::{ControlFlow, LifecycleEvent};
pub use opener::UrlOpener;
pub use webview::{
    BridgeHandler, BridgeMessage, MixedContentMode, NavigationDecision, NavigationHandler,
    ScriptBridge, WebSettings, WebView, WebViewConfig, WebViewEvent, WebViewHost, WebViewId,
    ZoomSettings,
};
pub use window::Window;
