//! Host lifecycle events delivered to the shell.

/// Lifecycle transitions a host reports, in the order a platform raises them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The host surface exists and the shell should build its content.
    Created {
        /// Whether the platform handed back state from a previous instance.
        restored: bool,
    },
    /// The shell regained the foreground.
    Resumed,
    /// The shell left the foreground.
    Suspended,
    /// The user pressed the system back action.
    BackPressed,
    /// The host is tearing the surface down.
    Destroyed,
}

/// What the host should do after the shell handled an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep running.
    #[default]
    Continue,
    /// Run the platform default for leaving the shell (exit or background).
    Exit,
}
