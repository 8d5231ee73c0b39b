//! Desktop event loop driving the shell through winit

use std::sync::Arc;
#[cfg(target_os = "linux")]
use std::time::{Duration, Instant};

use cricket_platform::{ControlFlow, LifecycleEvent, PlatformError, WebView, WebViewEvent};
use cricket_shell::{AppShell, Result, ShellConfig, ShellError};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent as WinitWindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop as WinitEventLoop, EventLoopProxy};
#[cfg(target_os = "linux")]
use winit::event_loop::ControlFlow as WinitControlFlow;
use winit::keyboard::ModifiersState;
use winit::window::WindowId;

use crate::input;
use crate::opener::SystemUrlOpener;
use crate::webview::DesktopWebViewHost;
use crate::window::DesktopWindow;

// WebKitGTK only makes progress while GTK's main context is pumped.
#[cfg(target_os = "linux")]
const GTK_PUMP_INTERVAL: Duration = Duration::from_millis(8);

/// Events the WebView backend posts back to the UI loop.
#[derive(Debug, Clone)]
pub enum ShellEvent {
    WebView(WebViewEvent),
    /// A trusted new-window request to load in the existing surface.
    LoadInPlace(String),
}

/// Shell wired to the desktop backend.
pub type DesktopShell = AppShell<DesktopWindow, DesktopWebViewHost>;

/// Desktop event loop wrapping winit's event loop
pub struct DesktopEventLoop {
    event_loop: WinitEventLoop<ShellEvent>,
    config: Arc<ShellConfig>,
}

impl DesktopEventLoop {
    /// Create a new desktop event loop
    pub fn new(config: Arc<ShellConfig>) -> Result<Self> {
        #[cfg(target_os = "linux")]
        gtk::init().map_err(|e| PlatformError::InitFailed(format!("GTK: {e}")))?;

        // NOTE(macos): Regular activation policy so a non-bundled binary still
        // behaves like a normal foreground app.
        let event_loop = {
            let mut builder = WinitEventLoop::<ShellEvent>::with_user_event();

            #[cfg(target_os = "macos")]
            {
                use winit::platform::macos::{ActivationPolicy, EventLoopBuilderExtMacOS};
                builder.with_activation_policy(ActivationPolicy::Regular);
            }

            builder
                .build()
                .map_err(|e| PlatformError::EventLoop(e.to_string()))?
        };

        Ok(Self { event_loop, config })
    }

    /// Run until the shell exits. Returns the first shell error, if any.
    pub fn run(self) -> Result<()> {
        let proxy = self.event_loop.create_proxy();
        let mut app = DesktopApp::new(self.config, proxy);
        self.event_loop
            .run_app(&mut app)
            .map_err(|e| PlatformError::EventLoop(e.to_string()))?;
        match app.failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Internal winit application handler
struct DesktopApp {
    config: Arc<ShellConfig>,
    proxy: EventLoopProxy<ShellEvent>,
    shell: Option<DesktopShell>,
    modifiers: ModifiersState,
    failure: Option<ShellError>,
}

impl DesktopApp {
    fn new(config: Arc<ShellConfig>, proxy: EventLoopProxy<ShellEvent>) -> Self {
        Self {
            config,
            proxy,
            shell: None,
            modifiers: ModifiersState::empty(),
            failure: None,
        }
    }

    fn create_shell(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window = DesktopWindow::new(event_loop, &self.config.window_title)?;
        let host = DesktopWebViewHost::new(window.winit_window_arc(), self.proxy.clone());
        self.shell = Some(AppShell::new(
            Arc::clone(&self.config),
            window,
            host,
            Arc::new(SystemUrlOpener),
        ));
        Ok(())
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: LifecycleEvent) {
        let Some(shell) = self.shell.as_mut() else {
            return;
        };
        match shell.handle_lifecycle(event) {
            Ok(ControlFlow::Continue) => {}
            Ok(ControlFlow::Exit) => event_loop.exit(),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ShellError) {
        tracing::error!("Shell failure: {}", error);
        self.failure.get_or_insert(error);
        event_loop.exit();
    }

    fn fill_window(&self) {
        let Some(shell) = self.shell.as_ref() else {
            return;
        };
        if let Some(webview) = shell.webview() {
            let size = shell.window().logical_size();
            if let Err(e) = webview.fill(size.width, size.height) {
                tracing::warn!("Failed to resize webview: {}", e);
            }
        }
    }
}

impl ApplicationHandler<ShellEvent> for DesktopApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.shell.is_some() {
            self.dispatch(event_loop, LifecycleEvent::Resumed);
            return;
        }

        match self.create_shell(event_loop) {
            Ok(()) => self.dispatch(event_loop, LifecycleEvent::Created { restored: false }),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn suspended(&mut self, event_loop: &ActiveEventLoop) {
        self.dispatch(event_loop, LifecycleEvent::Suspended);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WinitWindowEvent,
    ) {
        match event {
            WinitWindowEvent::CloseRequested => {
                self.dispatch(event_loop, LifecycleEvent::Destroyed);
                if let Some(shell) = self.shell.as_ref() {
                    if let Err(e) = shell.host().cleanup() {
                        tracing::warn!("Failed to cleanup desktop webview host: {}", e);
                    }
                }
                event_loop.exit();
            }

            WinitWindowEvent::Resized(_) | WinitWindowEvent::ScaleFactorChanged { .. } => {
                self.fill_window();
            }

            // Regaining focus is the desktop analogue of returning to the foreground.
            WinitWindowEvent::Focused(true) => {
                self.dispatch(event_loop, LifecycleEvent::Resumed);
            }

            WinitWindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }

            WinitWindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && !event.repeat
                    && input::is_back_key(&event.logical_key, self.modifiers)
                {
                    self.dispatch(event_loop, LifecycleEvent::BackPressed);
                }
            }

            WinitWindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } if input::is_back_button(button) => {
                self.dispatch(event_loop, LifecycleEvent::BackPressed);
            }

            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ShellEvent) {
        let Some(shell) = self.shell.as_ref() else {
            return;
        };
        match event {
            ShellEvent::WebView(event) => shell.handle_webview_event(event),
            ShellEvent::LoadInPlace(url) => {
                if let Some(webview) = shell.webview() {
                    if let Err(e) = webview.load_url(&url) {
                        tracing::warn!("Failed to load '{}' in place: {}", url, e);
                    }
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        #[cfg(target_os = "linux")]
        {
            while gtk::events_pending() {
                gtk::main_iteration_do(false);
            }
            _event_loop.set_control_flow(WinitControlFlow::WaitUntil(
                Instant::now() + GTK_PUMP_INTERVAL,
            ));
        }
    }
}
