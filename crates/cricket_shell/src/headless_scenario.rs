//! Scenario definition for headless shell diagnostics.

use anyhow::Result;
use serde::Deserialize;
use std::path::Path;

use crate::config::ShellConfig;

/// Sequence of lifecycle, engine, and assertion steps.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadlessScenario {
    /// Overrides for the production configuration.
    #[serde(default)]
    pub config: Option<ShellConfig>,
    pub steps: Vec<ScenarioStep>,
}

impl HeadlessScenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Host created the shell.
    Initialize {
        #[serde(default)]
        restored: bool,
    },
    /// Engine-initiated top-level navigation (link click). Kept URLs finish
    /// loading immediately.
    Navigate { url: String },
    /// Engine reports a finished load without a navigation request.
    PageFinished { url: String },
    /// System back action.
    Back,
    /// Shell regained the foreground.
    Resume,
    /// A page script posted to the bridge.
    Bridge {
        payload: String,
        #[serde(default)]
        source_url: Option<String>,
    },
    AssertCurrentUrl { url: String },
    AssertHistoryLen { len: usize },
    AssertLoads { count: usize },
    AssertExternal { url: String },
    AssertNoExternal,
    AssertImmersive,
    AssertViewportLocked { count: usize },
    AssertExited,
}
