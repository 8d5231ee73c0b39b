//! Report output model for headless shell runs.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Component, Path};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a headless scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadlessReport {
    pub status: ReportStatus,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub steps_executed: usize,
    pub external_dispatches: Vec<String>,
}

impl HeadlessReport {
    pub fn passed(steps_executed: usize, external_dispatches: Vec<String>) -> Self {
        Self {
            status: ReportStatus::Passed,
            failed_step_index: None,
            assertion: None,
            message: None,
            steps_executed,
            external_dispatches,
        }
    }

    pub fn failed(
        assertion: &str,
        failed_step_index: usize,
        message: String,
        external_dispatches: Vec<String>,
    ) -> Self {
        Self {
            status: ReportStatus::Failed,
            failed_step_index: Some(failed_step_index),
            assertion: Some(assertion.to_string()),
            message: Some(message),
            steps_executed: failed_step_index + 1,
            external_dispatches,
        }
    }

    /// Write pretty JSON to a relative path, creating parent directories.
    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        if path.is_absolute() || path.has_root() {
            bail!("report path must be relative and must not start with a separator");
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
        {
            bail!("report path cannot contain '..' or drive prefixes");
        }
        let payload = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, payload)?;
        Ok(())
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_escaping_paths() {
        let report = HeadlessReport::passed(0, Vec::new());
        assert!(report.write_to_path(Path::new("/tmp/report.json")).is_err());
        assert!(report.write_to_path(Path::new("../report.json")).is_err());
        assert!(report
            .write_to_path(Path::new("reports/../../report.json"))
            .is_err());
    }

    #[test]
    fn writer_emits_snake_case_status() {
        let report = HeadlessReport::failed(
            "assert_exited",
            2,
            "shell did not exit".to_string(),
            vec!["https://example.com/".to_string()],
        );
        let mut out = Vec::new();
        report.write_to_writer(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains(r#""status": "failed""#));
        assert!(text.contains(r#""failed_step_index": 2"#));
        assert!(text.contains(r#""steps_executed": 3"#));
        assert!(text.ends_with('\n'));
    }
}
