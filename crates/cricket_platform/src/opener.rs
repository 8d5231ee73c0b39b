//! Hand-off to the system's generic "open URI" facility.

use crate::error::Result;

/// Opens a URL outside the embedded surface (system browser, mail client, ...).
///
/// Called from browser-engine callbacks, so implementations must be shareable
/// across threads.
pub trait UrlOpener: Send + Sync {
    fn open_url(&self, url: &str) -> Result<()>;
}
