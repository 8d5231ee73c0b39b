//! Navigation policy: keep the trusted origin inside the surface, hand
//! everything else to the system.

use std::sync::Arc;

use cricket_platform::{NavigationDecision, NavigationHandler, UrlOpener};

/// Single-prefix navigation policy.
///
/// The check is a plain string prefix comparison on the URL as the engine
/// reports it. No parsing, no normalisation, no allow-list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationPolicy {
    trusted_prefix: String,
}

impl NavigationPolicy {
    pub fn new(trusted_prefix: impl Into<String>) -> Self {
        Self {
            trusted_prefix: trusted_prefix.into(),
        }
    }

    pub fn trusted_prefix(&self) -> &str {
        &self.trusted_prefix
    }

    /// Whether `url` belongs to the trusted origin.
    pub fn is_trusted(&self, url: &str) -> bool {
        url.starts_with(&self.trusted_prefix)
    }

    /// Decide a top-level navigation request.
    pub fn decide(&self, url: &str) -> NavigationDecision {
        if self.is_trusted(url) {
            NavigationDecision::HandleInternally
        } else {
            NavigationDecision::DispatchExternally
        }
    }

    /// Build the engine callback: decide, and on external dispatch hand the
    /// URL to `opener`.
    ///
    /// An opener failure is logged; the navigation stays intercepted either way.
    pub fn into_handler(self, opener: Arc<dyn UrlOpener>) -> NavigationHandler {
        Arc::new(move |url: &str| {
            let decision = self.decide(url);
            match decision {
                NavigationDecision::HandleInternally => {
                    tracing::debug!(url, "Navigation stays in surface");
                }
                NavigationDecision::DispatchExternally => {
                    tracing::debug!(url, "Navigation dispatched to system handler");
                    if let Err(e) = opener.open_url(url) {
                        tracing::warn!("Failed to open '{}' externally: {}", url, e);
                    }
                }
            }
            decision
        })
    }
}
