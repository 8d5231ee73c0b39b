//! Scenario runner that drives a headless shell step by step.

use anyhow::{anyhow, Context, Result};
use cricket_platform::{BridgeMessage, ControlFlow, LifecycleEvent, WebViewEvent, Window};

use crate::headless_assert::{
    evaluate_current_url, evaluate_exited, evaluate_external, evaluate_history_len,
    evaluate_immersive, evaluate_loads, evaluate_no_external, evaluate_viewport_locks,
    AssertionResult, ShellSnapshot,
};
use crate::headless_report::HeadlessReport;
use crate::headless_runtime::{headless_shell, HeadlessShell, RecordingOpener};
use crate::headless_scenario::{HeadlessScenario, ScenarioStep};
use crate::viewport::VIEWPORT_LOCK_SCRIPT;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: HeadlessReport },
    Failed { report: HeadlessReport },
}

impl RunOutcome {
    pub fn report(&self) -> &HeadlessReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

/// Execute scenario JSON.
pub fn run_scenario(input: &str) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(&scenario)
}

/// Execute a pre-loaded scenario against a fresh headless shell.
///
/// Assertion failures produce a `Failed` outcome; shell errors (for example a
/// second `initialize`) abort the run with an error naming the step.
pub fn run_loaded_scenario(scenario: &HeadlessScenario) -> Result<RunOutcome> {
    let config = scenario.config.clone().unwrap_or_default();
    let (mut shell, opener) = headless_shell(config);
    let mut exited = false;

    for (step_index, step) in scenario.steps.iter().enumerate() {
        let assertion = match step {
            ScenarioStep::Initialize { restored } => {
                shell
                    .handle_lifecycle(LifecycleEvent::Created {
                        restored: *restored,
                    })
                    .with_context(|| format!("step {step_index}: initialize"))?;
                continue;
            }
            ScenarioStep::Navigate { url } => {
                let webview = shell
                    .webview()
                    .ok_or_else(|| anyhow!("step {step_index}: navigate before initialize"))?;
                if !webview.request_navigation(url).is_intercepted() {
                    shell.handle_webview_event(WebViewEvent::PageFinished(url.clone()));
                }
                continue;
            }
            ScenarioStep::PageFinished { url } => {
                shell.handle_webview_event(WebViewEvent::PageFinished(url.clone()));
                continue;
            }
            ScenarioStep::Back => {
                let flow = shell
                    .handle_lifecycle(LifecycleEvent::BackPressed)
                    .with_context(|| format!("step {step_index}: back"))?;
                exited |= flow == ControlFlow::Exit;
                // A consumed back lands on a page the engine reports as finished.
                if flow == ControlFlow::Continue {
                    if let Some(url) = shell.webview().and_then(|webview| webview.current_url()) {
                        shell.handle_webview_event(WebViewEvent::PageFinished(url));
                    }
                }
                continue;
            }
            ScenarioStep::Resume => {
                shell
                    .handle_lifecycle(LifecycleEvent::Resumed)
                    .with_context(|| format!("step {step_index}: resume"))?;
                continue;
            }
            ScenarioStep::Bridge {
                payload,
                source_url,
            } => {
                let webview = shell
                    .webview()
                    .ok_or_else(|| anyhow!("step {step_index}: bridge call before initialize"))?;
                let message = BridgeMessage {
                    body: payload.clone(),
                    source_url: source_url.clone(),
                };
                if !webview.post_bridge_message(message) {
                    tracing::warn!(step_index, "Bridge call ignored, no bridge installed");
                }
                continue;
            }
            ScenarioStep::AssertCurrentUrl { url } => (
                "assert_current_url",
                evaluate_current_url(url, &snapshot(&shell, &opener, exited)),
            ),
            ScenarioStep::AssertHistoryLen { len } => (
                "assert_history_len",
                evaluate_history_len(*len, &snapshot(&shell, &opener, exited)),
            ),
            ScenarioStep::AssertLoads { count } => (
                "assert_loads",
                evaluate_loads(*count, &snapshot(&shell, &opener, exited)),
            ),
            ScenarioStep::AssertExternal { url } => (
                "assert_external",
                evaluate_external(url, &snapshot(&shell, &opener, exited)),
            ),
            ScenarioStep::AssertNoExternal => (
                "assert_no_external",
                evaluate_no_external(&snapshot(&shell, &opener, exited)),
            ),
            ScenarioStep::AssertImmersive => (
                "assert_immersive",
                evaluate_immersive(&snapshot(&shell, &opener, exited)),
            ),
            ScenarioStep::AssertViewportLocked { count } => (
                "assert_viewport_locked",
                evaluate_viewport_locks(*count, &snapshot(&shell, &opener, exited)),
            ),
            ScenarioStep::AssertExited => (
                "assert_exited",
                evaluate_exited(&snapshot(&shell, &opener, exited)),
            ),
        };

        if let (name, AssertionResult::Failed { message, .. }) = assertion {
            let report = HeadlessReport::failed(name, step_index, message, opener.opened());
            return Ok(RunOutcome::Failed { report });
        }
    }

    Ok(RunOutcome::Passed {
        report: HeadlessReport::passed(scenario.steps.len(), opener.opened()),
    })
}

fn snapshot(shell: &HeadlessShell, opener: &RecordingOpener, exited: bool) -> ShellSnapshot {
    let mut snapshot = ShellSnapshot {
        chrome: shell.window().system_chrome(),
        external: opener.opened(),
        exited,
        ..Default::default()
    };
    if let Some(webview) = shell.webview() {
        let history = webview.history();
        snapshot.history_len = history.len();
        snapshot.current_url = history.last().cloned();
        snapshot.loads = webview.loads();
        snapshot.viewport_locks = webview
            .scripts()
            .iter()
            .filter(|script| script.as_str() == VIEWPORT_LOCK_SCRIPT)
            .count();
    }
    snapshot
}
