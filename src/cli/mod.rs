//! `budget_snapshot`: prints the dashboard for one user of a document export.

pub mod report;

use std::{
    env,
    io::{self, Write},
    path::PathBuf,
};

use thiserror::Error;
use tracing::info;

use crate::{
    config::{ConfigError, ConfigManager},
    core::{DashboardState, DashboardWatch},
    currency::{CurrencyCode, MoneyFormatter},
    errors::BudgetError,
    storage::JsonExportStore,
    utils::build_info,
};

use report::{Report, ReportStyle};

pub const USAGE: &str =
    "usage: budget_snapshot <export.json> <user-id> [--currency CODE] [--private] [--config-dir DIR]";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}\n{usage}", usage = USAGE)]
    Usage(String),

    #[error(transparent)]
    Budget(#[from] BudgetError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

pub type CliResult<T> = Result<T, CliError>;

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Version,
    Snapshot(SnapshotArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotArgs {
    pub export: PathBuf,
    pub user_id: String,
    pub currency: Option<CurrencyCode>,
    pub private: bool,
    pub config_dir: Option<PathBuf>,
}

impl Command {
    pub fn parse<I, S>(args: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut positional: Vec<String> = Vec::new();
        let mut currency = None;
        let mut private = false;
        let mut config_dir = None;

        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--version" | "-V" => return Ok(Command::Version),
                "--currency" => {
                    let code = args
                        .next()
                        .ok_or_else(|| CliError::Usage("--currency needs a value".into()))?;
                    currency = Some(CurrencyCode::parse(&code));
                }
                "--config-dir" => {
                    let dir = args
                        .next()
                        .ok_or_else(|| CliError::Usage("--config-dir needs a value".into()))?;
                    config_dir = Some(PathBuf::from(dir));
                }
                "--private" => private = true,
                flag if flag.starts_with("--") => {
                    return Err(CliError::Usage(format!("unknown option `{flag}`")));
                }
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let (Some(export), Some(user_id), None) =
            (positional.next(), positional.next(), positional.next())
        else {
            return Err(CliError::Usage(
                "expected an export file and a user id".into(),
            ));
        };

        Ok(Command::Snapshot(SnapshotArgs {
            export: PathBuf::from(export),
            user_id,
            currency,
            private,
            config_dir,
        }))
    }
}

/// Entry point used by the binary.
pub fn run_cli() -> CliResult<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_cli_with(env::args().skip(1), &mut out)
}

pub fn run_cli_with<I, S, W>(args: I, out: &mut W) -> CliResult<()>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
    W: Write,
{
    match Command::parse(args)? {
        Command::Version => {
            writeln!(out, "{}", build_info::current().summary())?;
            Ok(())
        }
        Command::Snapshot(args) => snapshot(&args, out),
    }
}

fn snapshot<W: Write>(args: &SnapshotArgs, out: &mut W) -> CliResult<()> {
    let manager = match &args.config_dir {
        Some(dir) => ConfigManager::with_base_dir(dir.clone())?,
        None => ConfigManager::from_env()?,
    };
    let config = manager.load()?;

    let store = JsonExportStore::load(&args.export)?;
    let watch = DashboardWatch::start(&store, &args.user_id, DashboardState::from_config(&config))?;
    let state = watch.snapshot();
    info!(
        user = %args.user_id,
        transactions = state.transactions().len(),
        budgets = state.budgets().len(),
        "dashboard ready"
    );

    let money = MoneyFormatter::new(
        args.currency.unwrap_or(config.currency),
        args.private || config.privacy_mode,
    );
    let style = ReportStyle {
        color: config.ui_color_enabled && env::var_os("NO_COLOR").is_none(),
        caution_percentage: config.caution_percentage,
    };
    let report = Report::new(&args.user_id, &state, money, style);
    write!(out, "{}", report.render())?;
    Ok(())
}
