//! Page-to-host log bridge.
//!
//! Page scripts call `AndroidInterface.logMessage(text)` and
//! `AndroidInterface.logError(text)`; each call becomes one line in the host
//! log. Text is forwarded verbatim with no validation or rate limiting.
//!
//! Engines without native object injection get an init script that defines
//! the global and posts JSON over `window.ipc.postMessage`:
//!
//! ```json
//! {"method":"logMessage","text":"Loaded 12 players"}
//! ```

use std::sync::Arc;

use cricket_platform::{BridgeHandler, BridgeMessage, ScriptBridge};
use serde::{Deserialize, Serialize};

use crate::config::{BridgeAccess, ShellConfig};
use crate::error::{Result, ShellError};

/// Log target for every bridge line.
pub const BRIDGE_LOG_TARGET: &str = "CricketApp";

/// A decoded bridge call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum BridgeCall {
    LogMessage { text: String },
    LogError { text: String },
}

impl BridgeCall {
    /// Decode a payload posted by the init script.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| ShellError::Bridge(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| ShellError::Bridge(e.to_string()))
    }
}

/// Stateless sink writing bridge calls to the host log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogBridge {
    access: BridgeAccess,
    trusted_prefix: String,
}

impl LogBridge {
    pub fn new(access: BridgeAccess, trusted_prefix: impl Into<String>) -> Self {
        Self {
            access,
            trusted_prefix: trusted_prefix.into(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.bridge_access, config.trusted_origin_prefix.clone())
    }

    /// `logMessage(text)`: one DEBUG line.
    pub fn log_message(&self, text: &str) {
        tracing::debug!(target: BRIDGE_LOG_TARGET, "JS: {}", text);
    }

    /// `logError(text)`: one ERROR line.
    pub fn log_error(&self, text: &str) {
        tracing::error!(target: BRIDGE_LOG_TARGET, "JS Error: {}", text);
    }

    pub fn dispatch(&self, call: &BridgeCall) {
        match call {
            BridgeCall::LogMessage { text } => self.log_message(text),
            BridgeCall::LogError { text } => self.log_error(text),
        }
    }

    /// Whether a message from `source_url` may reach the log.
    pub fn accepts(&self, source_url: Option<&str>) -> bool {
        match self.access {
            BridgeAccess::Unrestricted => true,
            BridgeAccess::TrustedOriginOnly => {
                source_url.is_some_and(|url| url.starts_with(&self.trusted_prefix))
            }
            BridgeAccess::Disabled => false,
        }
    }

    /// Handle a raw engine message. Returns the call that was logged, if any.
    pub fn handle(&self, message: &BridgeMessage) -> Option<BridgeCall> {
        if !self.accepts(message.source_url.as_deref()) {
            tracing::warn!(
                source = message.source_url.as_deref().unwrap_or("<unknown>"),
                "Dropped bridge call from untrusted page"
            );
            return None;
        }

        match BridgeCall::from_json(&message.body) {
            Ok(call) => {
                self.dispatch(&call);
                Some(call)
            }
            Err(e) => {
                tracing::warn!("Ignoring bridge payload: {}", e);
                None
            }
        }
    }

    /// Engine callback forwarding every message to [`LogBridge::handle`].
    pub fn into_handler(self) -> BridgeHandler {
        Arc::new(move |message: BridgeMessage| {
            self.handle(&message);
        })
    }

    /// Bridge definition for a WebView, or `None` when access is disabled.
    pub fn script_bridge(self, name: &str) -> Option<ScriptBridge> {
        if self.access == BridgeAccess::Disabled {
            return None;
        }
        Some(ScriptBridge {
            name: name.to_string(),
            init_script: shim_script(name),
            handler: self.into_handler(),
        })
    }
}

/// Init script defining `window[name]` with `logMessage` / `logError`.
pub fn shim_script(name: &str) -> String {
    // serde_json renders a valid JS string literal for any name.
    let name_literal = serde_json::to_string(name).unwrap_or_else(|_| "\"\"".to_string());
    format!(
        r#"(function () {{
  var post = function (method, value) {{
    window.ipc.postMessage(JSON.stringify({{ method: method, text: String(value) }}));
  }};
  window[{name_literal}] = Object.freeze({{
    logMessage: function (message) {{ post("logMessage", message); }},
    logError: function (error) {{ post("logError", error); }}
  }});
}})();"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_both_methods() {
        assert_eq!(
            BridgeCall::from_json(r#"{"method":"logMessage","text":"hello"}"#).unwrap(),
            BridgeCall::LogMessage {
                text: "hello".to_string()
            }
        );
        assert_eq!(
            BridgeCall::from_json(r#"{"method":"logError","text":"boom"}"#).unwrap(),
            BridgeCall::LogError {
                text: "boom".to_string()
            }
        );
    }

    #[test]
    fn keeps_control_characters_verbatim() {
        let call = BridgeCall::LogMessage {
            text: "tab\there\u{0}nul\nline".to_string(),
        };
        let decoded = BridgeCall::from_json(&call.to_json().unwrap()).unwrap();
        assert_eq!(decoded, call);
    }

    #[test]
    fn rejects_unknown_methods_and_garbage() {
        for body in [
            r#"{"method":"deleteEverything","text":"x"}"#,
            r#"{"method":"logMessage"}"#,
            "not json",
            "",
        ] {
            assert!(
                matches!(BridgeCall::from_json(body), Err(ShellError::Bridge(_))),
                "{body:?} should be rejected"
            );
        }
    }

    #[test]
    fn unrestricted_accepts_any_source() {
        let bridge = LogBridge::new(BridgeAccess::Unrestricted, "https://trusted.example/");
        assert!(bridge.accepts(None));
        assert!(bridge.accepts(Some("https://third-party.example/")));
    }

    #[test]
    fn trusted_only_requires_known_trusted_source() {
        let bridge = LogBridge::new(BridgeAccess::TrustedOriginOnly, "https://trusted.example/");
        assert!(bridge.accepts(Some("https://trusted.example/page")));
        assert!(!bridge.accepts(Some("https://third-party.example/")));
        assert!(!bridge.accepts(None));
    }

    #[test]
    fn handle_returns_logged_call() {
        let bridge = LogBridge::new(BridgeAccess::Unrestricted, "https://trusted.example/");
        let logged = bridge.handle(&BridgeMessage::new(r#"{"method":"logError","text":""}"#));
        assert_eq!(
            logged,
            Some(BridgeCall::LogError {
                text: String::new()
            })
        );
        assert_eq!(bridge.handle(&BridgeMessage::new("{")), None);
    }

    #[test]
    fn disabled_access_installs_nothing() {
        let bridge = LogBridge::new(BridgeAccess::Disabled, "https://trusted.example/");
        assert!(bridge.script_bridge("AndroidInterface").is_none());
    }

    #[test]
    fn shim_defines_named_global() {
        let script = shim_script("AndroidInterface");
        assert!(script.contains(r#"window["AndroidInterface"]"#));
        assert!(script.contains("logMessage"));
        assert!(script.contains("logError"));
        assert!(script.contains("window.ipc.postMessage"));
    }

    #[test]
    fn shim_escapes_hostile_names() {
        let script = shim_script(r#"x"];alert(1);//"#);
        assert!(script.contains(r#"window["x\"];alert(1);//"]"#));
    }
}
