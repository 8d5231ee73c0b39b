//! Errors raised by host backends.

use thiserror::Error;

/// Failures surfaced by window, WebView, and URL-opener backends.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Backend toolkit could not be brought up (GTK, COM, ...)
    #[error("Platform initialization failed: {0}")]
    InitFailed(String),

    /// Event loop could not be built or exited abnormally
    #[error("Event loop failure: {0}")]
    EventLoop(String),

    /// Host window could not be created
    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    /// A resource was used after the host released it
    #[error("Platform resource unavailable: {0}")]
    Unavailable(String),

    /// The browser engine refused to create a surface
    #[error("WebView creation failed: {0}")]
    WebViewCreation(String),

    /// Load, script evaluation, or history operation failed
    #[error("WebView operation failed: {0}")]
    WebViewOperation(String),

    /// The system URL handler rejected a URL
    #[error("Failed to open URL externally: {0}")]
    UrlOpen(String),

    #[error("Platform error: {0}")]
    Other(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
