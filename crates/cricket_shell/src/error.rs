//! Shell error types

use cricket_platform::PlatformError;
use thiserror::Error;

/// Errors from driving the shell through its lifecycle.
#[derive(Error, Debug)]
pub enum ShellError {
    /// A backend call failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// `initialize` ran twice on the same shell.
    #[error("shell is already initialized")]
    AlreadyInitialized,

    /// An operation needed the WebView before `initialize` created it.
    #[error("shell is not initialized")]
    NotInitialized,

    /// A bridge payload could not be decoded.
    #[error("malformed bridge payload: {0}")]
    Bridge(String),
}

/// Result type for shell operations
pub type Result<T> = std::result::Result<T, ShellError>;
