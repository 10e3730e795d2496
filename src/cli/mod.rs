//! Command-line report over a budget snapshot.

pub mod output;
pub mod snapshot;

use std::{env, path::PathBuf};

use crate::core::errors::{CliError, OverspendError};
use crate::core::watcher::OverspendWatcher;
use crate::config::{Config, ConfigManager};
use crate::domain::{BudgetMode, Displayable, MonthKey};
use crate::sources::{CategorySource, PreferenceSource, SyncedPrefs};

use output::{Formatter, Report, ReportLine};
use snapshot::Snapshot;

const USAGE: &str = "usage: overspend_core_cli <snapshot.json> [--month YYYY-MM] [--mode envelope|tracking] [--no-color]";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Report(ReportArgs),
    Version,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportArgs {
    pub snapshot: PathBuf,
    pub month: Option<MonthKey>,
    pub mode: Option<BudgetMode>,
    pub color: bool,
}

impl Command {
    pub fn parse<I, S>(args: I) -> Result<Self, CliError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut snapshot = None;
        let mut month = None;
        let mut mode = None;
        let mut color = true;
        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "-V" | "--version" => return Ok(Command::Version),
                "--no-color" => color = false,
                "--month" => {
                    let value = args
                        .next()
                        .ok_or_else(|| CliError::Input("--month needs a value".into()))?;
                    month = Some(MonthKey::parse(&value)?);
                }
                "--mode" => {
                    let value = args
                        .next()
                        .ok_or_else(|| CliError::Input("--mode needs a value".into()))?;
                    mode = Some(value.parse::<BudgetMode>()?);
                }
                flag if flag.starts_with('-') => {
                    return Err(CliError::Input(format!("unknown option `{}`", flag)));
                }
                path => {
                    if snapshot.replace(PathBuf::from(path)).is_some() {
                        return Err(CliError::Input("only one snapshot may be given".into()));
                    }
                }
            }
        }
        let snapshot = snapshot.ok_or_else(|| CliError::Input(USAGE.into()))?;
        Ok(Command::Report(ReportArgs {
            snapshot,
            month,
            mode,
            color,
        }))
    }
}

/// Entry point used by the binary.
pub fn run_cli() -> Result<(), CliError> {
    let command = Command::parse(env::args().skip(1))?;
    match command {
        Command::Help => println!("{USAGE}"),
        Command::Version => println!("overspend_core {}", env!("CARGO_PKG_VERSION")),
        Command::Report(args) => {
            let config = ConfigManager::new()?.load()?;
            print!("{}", report(&args, &config)?);
        }
    }
    Ok(())
}

/// Classifies the snapshot and renders the report text.
pub fn report(args: &ReportArgs, config: &Config) -> Result<String, OverspendError> {
    let snapshot = Snapshot::load(&args.snapshot)?;
    let month = args
        .month
        .or_else(|| snapshot.latest_month())
        .unwrap_or_else(MonthKey::current);
    let mode = args.mode.unwrap_or_else(|| {
        if snapshot.budget_type.is_some() {
            snapshot.budget_mode()
        } else {
            config.budget_mode()
        }
    });

    let categories = snapshot.categories();
    for id in categories.duplicate_ids() {
        tracing::warn!(category = %id, "duplicate category id in snapshot");
    }
    let mut prefs = SyncedPrefs::new();
    prefs.set_budget_mode(mode);

    let sheet = snapshot.sheet();
    let watcher = OverspendWatcher::with_sources(&sheet, month, &categories, &prefs);
    let lines = watcher
        .overspent()
        .into_iter()
        .map(|category| {
            let balance = watcher.balance(&category.id);
            tracing::debug!(category = %category.display_label(), ?balance, "overspent");
            ReportLine { category, balance }
        })
        .collect();
    let report = Report {
        month,
        mode,
        alert: watcher.alert(),
        lines,
    };
    tracing::info!(
        %month,
        %mode,
        categories = categories.list().len(),
        overspent = report.lines.len(),
        "report computed"
    );
    watcher.close();

    let color = args.color && config.ui_color_enabled && env::var_os("NO_COLOR").is_none();
    Ok(Formatter::new(config.currency.clone(), color).render(&report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_report_flags() {
        let command =
            Command::parse(["budget.json", "--month", "2024-03", "--mode", "tracking", "--no-color"])
                .unwrap();
        assert_eq!(
            command,
            Command::Report(ReportArgs {
                snapshot: PathBuf::from("budget.json"),
                month: MonthKey::parse("2024-03").ok(),
                mode: Some(BudgetMode::Tracking),
                color: false,
            })
        );
    }

    #[test]
    fn rejects_bad_month_and_unknown_flags() {
        assert!(matches!(
            Command::parse(["budget.json", "--month", "2024-13"]),
            Err(CliError::Core(OverspendError::InvalidMonth(_)))
        ));
        assert!(matches!(
            Command::parse(["budget.json", "--verbose"]),
            Err(CliError::Input(_))
        ));
        assert!(matches!(Command::parse(Vec::<String>::new()), Err(CliError::Input(_))));
    }

    #[test]
    fn help_and_version_short_circuit() {
        assert_eq!(Command::parse(["--help"]).unwrap(), Command::Help);
        assert_eq!(Command::parse(["x.json", "-V"]).unwrap(), Command::Version);
    }
}
