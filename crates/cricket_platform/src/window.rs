//! Host window abstraction.

use crate::chrome::SystemChrome;
use crate::error::Result;

/// The display surface that hosts the embedded WebView.
pub trait Window {
    /// Apply a chrome-suppression set. Applying the same set again must leave
    /// the window in the same visible state.
    fn set_system_chrome(&self, chrome: SystemChrome) -> Result<()>;

    /// The chrome set most recently applied.
    fn system_chrome(&self) -> SystemChrome;
}
