//! End-to-end shell scenarios through the headless runner.

use cricket_shell::headless_report::ReportStatus;
use cricket_shell::headless_runner::run_scenario;

fn assert_passes(scenario: &str) {
    let outcome = run_scenario(scenario).expect("scenario should run");
    assert!(
        !outcome.is_failed(),
        "scenario failed: {:?}",
        outcome.report()
    );
    assert_eq!(outcome.report().status, ReportStatus::Passed);
}

#[test]
fn startup_issues_exactly_one_load_to_home() {
    assert_passes(
        r#"{
            "steps": [
                { "type": "initialize" },
                { "type": "assert_loads", "count": 1 },
                { "type": "assert_current_url", "url": "https://anujloomba.github.io/bccb_refactored/" },
                { "type": "assert_immersive" },
                { "type": "assert_no_external" }
            ]
        }"#,
    );
}

#[test]
fn trusted_link_stays_inside_and_locks_viewport() {
    assert_passes(
        r#"{
            "steps": [
                { "type": "initialize" },
                { "type": "page_finished", "url": "https://anujloomba.github.io/bccb_refactored/" },
                { "type": "navigate", "url": "https://anujloomba.github.io/bccb_refactored/foo" },
                { "type": "assert_current_url", "url": "https://anujloomba.github.io/bccb_refactored/foo" },
                { "type": "assert_history_len", "len": 2 },
                { "type": "assert_viewport_locked", "count": 2 },
                { "type": "assert_no_external" }
            ]
        }"#,
    );
}

#[test]
fn external_link_goes_to_system_handler() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "initialize" },
                { "type": "navigate", "url": "https://example.com/" },
                { "type": "assert_external", "url": "https://example.com/" },
                { "type": "assert_current_url", "url": "https://anujloomba.github.io/bccb_refactored/" },
                { "type": "assert_history_len", "len": 1 },
                { "type": "assert_viewport_locked", "count": 0 }
            ]
        }"#,
    )
    .unwrap();

    assert!(!outcome.is_failed(), "{:?}", outcome.report());
    assert_eq!(
        outcome.report().external_dispatches,
        vec!["https://example.com/".to_string()]
    );
}

#[test]
fn back_walks_history_then_leaves_shell() {
    assert_passes(
        r#"{
            "steps": [
                { "type": "initialize" },
                { "type": "navigate", "url": "https://anujloomba.github.io/bccb_refactored/teams" },
                { "type": "navigate", "url": "https://anujloomba.github.io/bccb_refactored/stats" },
                { "type": "back" },
                { "type": "assert_current_url", "url": "https://anujloomba.github.io/bccb_refactored/teams" },
                { "type": "back" },
                { "type": "assert_history_len", "len": 1 },
                { "type": "back" },
                { "type": "assert_exited" }
            ]
        }"#,
    );
}

#[test]
fn resume_keeps_immersive_chrome() {
    assert_passes(
        r#"{
            "steps": [
                { "type": "initialize", "restored": true },
                { "type": "resume" },
                { "type": "resume" },
                { "type": "assert_immersive" },
                { "type": "assert_loads", "count": 1 }
            ]
        }"#,
    );
}

#[test]
fn bridge_calls_do_not_disturb_navigation() {
    assert_passes(
        r#"{
            "steps": [
                { "type": "initialize" },
                { "type": "bridge", "payload": "{\"method\":\"logMessage\",\"text\":\"ready\"}" },
                { "type": "bridge", "payload": "{\"method\":\"logError\",\"text\":\"\\u0000\"}" },
                { "type": "bridge", "payload": "not json at all" },
                { "type": "assert_history_len", "len": 1 },
                { "type": "assert_no_external" }
            ]
        }"#,
    );
}

#[test]
fn config_override_changes_trusted_origin() {
    assert_passes(
        r#"{
            "config": {
                "home_url": "https://staging.example/app/",
                "trusted_origin_prefix": "https://staging.example/"
            },
            "steps": [
                { "type": "initialize" },
                { "type": "assert_current_url", "url": "https://staging.example/app/" },
                { "type": "navigate", "url": "https://anujloomba.github.io/bccb_refactored/" },
                { "type": "assert_external", "url": "https://anujloomba.github.io/bccb_refactored/" }
            ]
        }"#,
    );
}

#[test]
fn failing_assertion_is_reported_not_raised() {
    let outcome = run_scenario(
        r#"{
            "steps": [
                { "type": "initialize" },
                { "type": "navigate", "url": "https://example.com/" },
                { "type": "assert_no_external" }
            ]
        }"#,
    )
    .unwrap();

    assert!(outcome.is_failed());
    let report = outcome.report();
    assert_eq!(report.failed_step_index, Some(2));
    assert_eq!(report.assertion.as_deref(), Some("assert_no_external"));
    assert!(report
        .message
        .as_deref()
        .is_some_and(|m| m.contains("https://example.com/")));
}
