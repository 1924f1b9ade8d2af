/*============================================================
  Synavera Project: Syn-Seek
  Module: synseek::main
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Entry point for Syn-Seek. Decides the run mode from the
    argument shape, then searches and installs interactively,
    removes orphans, updates, or forwards to the package tool.

  Security / Safety Notes:
    Operates within user privileges. Executes the configured
    pacman-compatible tool only; no network access of its own.

  Dependencies:
    clap for CLI parsing, tokio for the process runtime.

  Operational Scope:
    Invoked directly by operators in an interactive terminal.

  Revision History:
    2025-11-12 COD  Authored Syn-Seek runtime.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Result-first error handling with deterministic exits
    - Structured logging following Synavera cadence
    - Configurable execution via CLI and config file
============================================================*/

mod config;
mod error;
mod logger;
mod package;
mod pacman;
mod presenter;
mod prompt;
mod search;
mod selection;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use config::{ColorMode, SynseekConfig};
use error::Result;
use logger::{session_log_path, Logger};
use package::PackageEntry;
use pacman::{exit_code_of, PackageTool};
use presenter::Presenter;
use prompt::{SelectionInput, TerminalInput};
use search::SearchParser;
use selection::{parse_selection, SelectionError};

/// First-argument prefixes forwarded untouched to the package tool.
const PASSTHROUGH_PREFIXES: [&str; 7] = ["-D", "-F", "-Q", "-R", "-S", "-T", "-U"];

/// Command-line arguments for Syn-Seek.
#[derive(Debug, Parser)]
#[command(
    name = "Syn-Seek",
    version,
    author = "Synavera Systems",
    about = "Search, pick and install packages through a pacman-compatible tool",
    after_help = "Without arguments a full system update is run. Arguments starting with \
                  -D, -F, -Q, -R, -S, -T or -U are passed to the package tool unchanged.",
    disable_version_flag = true
)]
struct Cli {
    /// Print version.
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    #[allow(dead_code)]
    version: Option<bool>,
    /// Remove orphaned packages.
    #[arg(short = 'a', long, action = ArgAction::SetTrue, conflicts_with = "terms")]
    autoremove: bool,
    /// Override configuration file path.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Explicit log file path.
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
    /// Colour the listing.
    #[arg(long, value_enum, value_name = "WHEN")]
    color: Option<ColorMode>,
    /// Enable verbose logging to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    verbose: bool,
    /// Search phrase.
    #[arg(value_name = "TERMS", trailing_var_arg = true, allow_hyphen_values = true)]
    terms: Vec<String>,
}

/// What this run does.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Update,
    Autoremove,
    Passthrough(Vec<String>),
    Search(Vec<String>),
}

/// Mode plus the ambient options that accompany it.
#[derive(Debug, Default)]
struct Invocation {
    mode: Option<Mode>,
    config: Option<PathBuf>,
    log: Option<PathBuf>,
    color: Option<ColorMode>,
    verbose: bool,
}

impl Invocation {
    /// Classify `args` (program name excluded). Help and version requests
    /// are answered by clap, which exits the process.
    fn from_args(args: Vec<String>) -> Self {
        match Self::classify_raw(&args) {
            Some(mode) => Self {
                mode: Some(mode),
                ..Self::default()
            },
            None => {
                let cli = Cli::parse_from(std::iter::once("syn-seek".to_string()).chain(args));
                Self::from_cli(cli)
            }
        }
    }

    fn classify_raw(args: &[String]) -> Option<Mode> {
        let first = match args.first() {
            Some(first) => first,
            None => return Some(Mode::Update),
        };
        if PASSTHROUGH_PREFIXES
            .iter()
            .any(|prefix| first.starts_with(prefix))
        {
            return Some(Mode::Passthrough(args.to_vec()));
        }
        None
    }

    fn from_cli(cli: Cli) -> Self {
        let mode = if cli.autoremove {
            Mode::Autoremove
        } else if cli.terms.is_empty() {
            Mode::Update
        } else {
            Mode::Search(cli.terms)
        };
        Self {
            mode: Some(mode),
            config: cli.config,
            log: cli.log,
            color: cli.color,
            verbose: cli.verbose,
        }
    }
}

fn main() -> ExitCode {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("[Syn-Seek] Failed to start runtime: {err}");
            return ExitCode::from(50);
        }
    };

    let outcome = runtime.block_on(run());
    // A stdin reader abandoned after Ctrl-C must not keep the process alive.
    runtime.shutdown_background();

    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("[Syn-Seek] {}", err);
            err.exit_code()
        }
    }
}

async fn run() -> Result<ExitCode> {
    let invocation = Invocation::from_args(std::env::args().skip(1).collect());

    let config = SynseekConfig::load_from_optional_path(invocation.config.as_deref())?;
    apply_color_mode(invocation.color.unwrap_or(config.color));

    let log_path = invocation
        .log
        .clone()
        .or_else(|| config.log_dir.as_deref().map(session_log_path));
    let logger = Logger::new(log_path, invocation.verbose)?;
    let tool = PackageTool::from_config(&config);
    logger.info(
        "INIT",
        format!(
            "Syn-Seek {} driving `{}`",
            env!("CARGO_PKG_VERSION"),
            tool.program()
        ),
    );

    let mode = invocation.mode.unwrap_or(Mode::Update);
    let outcome = dispatch(mode, &tool, &logger).await;
    if let Err(err) = &outcome {
        logger.error("FAILED", err.to_string());
    }
    logger.finalize()?;
    outcome
}

async fn dispatch(mode: Mode, tool: &PackageTool, logger: &Logger) -> Result<ExitCode> {
    match mode {
        Mode::Update => {
            logger.info("MODE", "system update");
            Ok(exit_code_of(tool.update().await?))
        }
        Mode::Passthrough(args) => {
            logger.info("MODE", format!("passthrough: {}", args.join(" ")));
            Ok(exit_code_of(tool.passthrough(&args).await?))
        }
        Mode::Autoremove => autoremove(tool, logger).await,
        Mode::Search(terms) => search_and_install(&terms, tool, logger, &mut TerminalInput).await,
    }
}

async fn autoremove(tool: &PackageTool, logger: &Logger) -> Result<ExitCode> {
    logger.info("MODE", "autoremove");
    let orphans = tool.list_orphans().await?;
    if orphans.is_empty() {
        println!("No orphaned packages.");
        return Ok(ExitCode::SUCCESS);
    }
    logger.info(
        "ORPHANS",
        format!("Removing {} orphans: {}", orphans.len(), orphans.join(" ")),
    );
    Ok(exit_code_of(tool.remove(&orphans).await?))
}

async fn search_and_install(
    terms: &[String],
    tool: &PackageTool,
    logger: &Logger,
    input: &mut impl SelectionInput,
) -> Result<ExitCode> {
    logger.info("MODE", format!("search: {}", terms.join(" ")));
    let parser = SearchParser::new()?;
    let raw = tool.search(terms, logger).await?;
    let report = parser.parse_report(&raw);
    for line in &report.rejected {
        logger.debug("PARSE", format!("Skipped unrecognised line: {line}"));
    }

    let entries = report.entries;
    if entries.is_empty() {
        println!("Nothing found.");
        return Ok(ExitCode::SUCCESS);
    }
    logger.info("RESULTS", format!("{} packages listed", entries.len()));
    logger.debug(
        "RESULTS",
        entries
            .iter()
            .map(PackageEntry::qualified_name)
            .collect::<Vec<_>>()
            .join(" "),
    );

    let presenter = Presenter::new();
    print!("{}{}", presenter.render(&entries), presenter.banner());

    let Some(line) = input.read_line(&presenter.prompt()).await? else {
        logger.info("CANCEL", "Selection interrupted");
        return Ok(ExitCode::SUCCESS);
    };
    logger.debug("SELECT", format!("Selection input `{line}`"));

    let packages = match resolve_selection(&entries, &line) {
        Ok(packages) => packages,
        Err(SelectionError::Quit) => {
            logger.info("CANCEL", "Operator quit at selection");
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => return Err(err.into()),
    };
    if packages.is_empty() {
        logger.info("CANCEL", "Empty selection");
        return Ok(ExitCode::SUCCESS);
    }

    logger.info(
        "INSTALL",
        tool.describe(&tool.commands().install, &packages),
    );
    let status = tool.install(&packages).await?;
    if !status.success() {
        logger.warn("INSTALL", format!("{} exited with {status}", tool.program()));
    }
    Ok(ExitCode::SUCCESS)
}

/// Package names for a selection line, in selection order.
fn resolve_selection(
    entries: &[PackageEntry],
    line: &str,
) -> std::result::Result<Vec<String>, SelectionError> {
    let indices = parse_selection(line, entries.len())?;
    Ok(indices
        .into_iter()
        .filter_map(|index| entries.get(index))
        .map(|entry| entry.package.clone())
        .collect())
}

fn apply_color_mode(mode: ColorMode) {
    match mode {
        ColorMode::Auto => colored::control::unset_override(),
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
    }
}
