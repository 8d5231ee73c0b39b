//! Assertion helpers for headless shell diagnostics.

use cricket_platform::SystemChrome;

/// Observable shell state at one point in a scenario.
#[derive(Debug, Clone, Default)]
pub struct ShellSnapshot {
    pub current_url: Option<String>,
    pub history_len: usize,
    pub loads: Vec<String>,
    pub external: Vec<String>,
    pub chrome: SystemChrome,
    pub viewport_locks: usize,
    pub exited: bool,
}

/// Assertion result with structured failure details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssertionResult {
    Passed,
    Failed { code: String, message: String },
}

impl AssertionResult {
    fn failed(code: &str, message: String) -> Self {
        Self::Failed {
            code: code.to_string(),
            message,
        }
    }
}

pub fn evaluate_current_url(expected: &str, snapshot: &ShellSnapshot) -> AssertionResult {
    match snapshot.current_url.as_deref() {
        Some(url) if url == expected => AssertionResult::Passed,
        Some(url) => AssertionResult::failed(
            "url_mismatch",
            format!("expected current url '{expected}', got '{url}'"),
        ),
        None => AssertionResult::failed("no_page", "surface has no current page".to_string()),
    }
}

pub fn evaluate_history_len(expected: usize, snapshot: &ShellSnapshot) -> AssertionResult {
    if snapshot.history_len == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "history_mismatch",
            format!(
                "expected {expected} history entries, got {}",
                snapshot.history_len
            ),
        )
    }
}

pub fn evaluate_loads(expected: usize, snapshot: &ShellSnapshot) -> AssertionResult {
    if snapshot.loads.len() == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "load_count_mismatch",
            format!(
                "expected {expected} loads, got {:?}",
                snapshot.loads
            ),
        )
    }
}

pub fn evaluate_external(expected: &str, snapshot: &ShellSnapshot) -> AssertionResult {
    if snapshot.external.iter().any(|url| url == expected) {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "not_dispatched",
            format!(
                "'{expected}' was not dispatched externally (dispatched: {:?})",
                snapshot.external
            ),
        )
    }
}

pub fn evaluate_no_external(snapshot: &ShellSnapshot) -> AssertionResult {
    if snapshot.external.is_empty() {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "unexpected_dispatch",
            format!("unexpected external dispatches: {:?}", snapshot.external),
        )
    }
}

pub fn evaluate_immersive(snapshot: &ShellSnapshot) -> AssertionResult {
    if snapshot.chrome.contains(SystemChrome::IMMERSIVE) {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "chrome_visible",
            format!("expected immersive chrome, got {:?}", snapshot.chrome),
        )
    }
}

pub fn evaluate_viewport_locks(expected: usize, snapshot: &ShellSnapshot) -> AssertionResult {
    if snapshot.viewport_locks == expected {
        AssertionResult::Passed
    } else {
        AssertionResult::failed(
            "viewport_lock_mismatch",
            format!(
                "expected {expected} viewport locks, got {}",
                snapshot.viewport_locks
            ),
        )
    }
}

pub fn evaluate_exited(snapshot: &ShellSnapshot) -> AssertionResult {
    if snapshot.exited {
        AssertionResult::Passed
    } else {
        AssertionResult::failed("still_running", "shell did not exit".to_string())
    }
}
