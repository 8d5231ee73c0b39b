//! System URL handler.

use cricket_platform::{PlatformError, Result, UrlOpener};

/// Opens URLs with the desktop's default handler (browser, mail client, ...).
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemUrlOpener;

impl UrlOpener for SystemUrlOpener {
    fn open_url(&self, url: &str) -> Result<()> {
        tracing::info!("Opening '{}' in system handler", url);
        open::that_detached(url).map_err(|e| PlatformError::UrlOpen(format!("{url}: {e}")))
    }
}
