//! Desktop window implementation using winit

use cricket_platform::{PlatformError, Result, SystemChrome, Window};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window as WinitWindow, WindowAttributes};

/// Logical size used until the fullscreen request is honoured, and whenever
/// chrome is restored.
pub const INITIAL_WIDTH: f64 = 1280.0;
pub const INITIAL_HEIGHT: f64 = 800.0;

/// Desktop window wrapping a winit window
pub struct DesktopWindow {
    window: Arc<WinitWindow>,
    chrome: AtomicU32,
}

impl DesktopWindow {
    /// Create a new desktop window
    pub fn new(event_loop: &ActiveEventLoop, title: &str) -> Result<Self> {
        let attrs = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(LogicalSize::new(INITIAL_WIDTH, INITIAL_HEIGHT));

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;

        Ok(Self {
            window: Arc::new(window),
            chrome: AtomicU32::new(SystemChrome::empty().bits()),
        })
    }

    /// Get the underlying winit window
    pub fn winit_window(&self) -> &WinitWindow {
        &self.window
    }

    /// Get an Arc to the winit window
    pub fn winit_window_arc(&self) -> Arc<WinitWindow> {
        Arc::clone(&self.window)
    }

    /// Current inner size in logical pixels.
    pub fn logical_size(&self) -> LogicalSize<f64> {
        self.window
            .inner_size()
            .to_logical(self.window.scale_factor())
    }
}

impl Window for DesktopWindow {
    fn set_system_chrome(&self, chrome: SystemChrome) -> Result<()> {
        let fullscreen = chrome
            .wants_fullscreen()
            .then_some(Fullscreen::Borderless(None));
        // Only touch fullscreen when the mode changes.
        if self.window.fullscreen() != fullscreen {
            self.window.set_fullscreen(fullscreen);
        }
        self.window
            .set_decorations(!chrome.wants_decorations_hidden());

        self.chrome.store(chrome.bits(), Ordering::Relaxed);
        tracing::debug!(?chrome, "Applied system chrome");
        Ok(())
    }

    fn system_chrome(&self) -> SystemChrome {
        SystemChrome::from_bits_truncate(self.chrome.load(Ordering::Relaxed))
    }
}
