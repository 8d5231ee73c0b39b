//! Cricket Manager launcher
//!
//! `cricket-manager` opens the full-screen shell; `cricket-manager headless`
//! replays a JSON scenario against the in-memory host and prints a report.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cricket_shell::headless_runner::{run_loaded_scenario, RunOutcome};
use cricket_shell::headless_scenario::HeadlessScenario;
use cricket_shell::{logging, ShellConfig};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "cricket-manager")]
#[command(about = "Full-screen shell for the Cricket Manager web app", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Open the shell window (default)
    Run {
        /// JSON file overriding shell settings
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Replay a scenario against the headless host
    Headless {
        /// Scenario JSON file
        #[arg(value_name = "SCENARIO")]
        scenario: PathBuf,

        /// Also write the report to this relative path
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Print the effective shell settings as JSON
    Config {
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    logging::init(logging::DEFAULT_DIRECTIVE);

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Run { config: None }) {
        Command::Run { config } => run(load_config(config.as_deref())?),
        Command::Headless { scenario, report } => headless(&scenario, report.as_deref()),
        Command::Config { config } => {
            let config = load_config(config.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<ShellConfig> {
    let Some(path) = path else {
        return Ok(ShellConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(not(any(target_os = "android", target_os = "ios")))]
fn run(config: ShellConfig) -> Result<()> {
    cricket_platform_desktop::run(std::sync::Arc::new(config))?;
    Ok(())
}

#[cfg(any(target_os = "android", target_os = "ios"))]
fn run(_config: ShellConfig) -> Result<()> {
    anyhow::bail!("the windowed shell is not available on this target")
}

fn headless(scenario_path: &Path, report_path: Option<&Path>) -> Result<()> {
    let scenario = HeadlessScenario::from_path(scenario_path)?;
    let outcome = run_loaded_scenario(&scenario)?;

    let report = outcome.report();
    report.write_to_writer(&mut std::io::stdout().lock())?;
    if let Some(path) = report_path {
        report.write_to_path(path)?;
    }

    if let RunOutcome::Failed { report } = &outcome {
        tracing::error!(
            step = ?report.failed_step_index,
            assertion = ?report.assertion,
            "Scenario failed"
        );
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_run() {
        let cli = Cli::try_parse_from(["cricket-manager"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn headless_takes_scenario_and_optional_report() {
        let cli = Cli::try_parse_from([
            "cricket-manager",
            "headless",
            "scenarios/startup.json",
            "--report",
            "out/report.json",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Headless { scenario, report }) => {
                assert_eq!(scenario, PathBuf::from("scenarios/startup.json"));
                assert_eq!(report, Some(PathBuf::from("out/report.json")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn headless_requires_a_scenario() {
        assert!(Cli::try_parse_from(["cricket-manager", "headless"]).is_err());
    }

    #[test]
    fn missing_config_path_falls_back_to_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.home_url, ShellConfig::default().home_url);
    }

    #[test]
    fn unreadable_config_names_the_file() {
        let err = load_config(Some(Path::new("does/not/exist.json"))).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
