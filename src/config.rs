/*============================================================
  Synavera Project: Syn-Seek
  Module: synseek::config
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Load optional operator configuration: which package tool
    to drive, its sub-command flags, colour and log settings.

  Security / Safety Notes:
    Reads a single TOML file from an operator-controlled path.
    Unknown keys are rejected rather than ignored.

  Dependencies:
    serde + toml for parsing, dirs for the XDG config root.

  Operational Scope:
    Resolved once at start-up before dispatching any mode.

  Revision History:
    2025-11-12 COD  Authored configuration loader.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Explicit defaults when no file is present
    - Actionable diagnostics on malformed files
============================================================*/

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Deserialize;

use crate::error::{Result, SynseekError};

const CONFIG_DIR: &str = "syn-seek";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_TOOL: &str = "pacaur";

/// When listing output should carry ANSI colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SynseekConfig {
    /// Package tool binary name or path.
    pub tool: String,
    pub color: ColorMode,
    /// Session log directory; logging to file is off when unset.
    pub log_dir: Option<PathBuf>,
    pub commands: CommandConfig,
}

/// Sub-command flags passed to the package tool for each operation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommandConfig {
    pub search: Vec<String>,
    pub install: Vec<String>,
    pub orphans: Vec<String>,
    pub remove: Vec<String>,
    pub update: Vec<String>,
}

impl Default for SynseekConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_TOOL.to_string(),
            color: ColorMode::default(),
            log_dir: None,
            commands: CommandConfig::default(),
        }
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            search: flags(&["-Ss"]),
            install: flags(&["-S"]),
            orphans: flags(&["-Qdtq"]),
            remove: flags(&["-Rns"]),
            update: flags(&["-Syu"]),
        }
    }
}

impl SynseekConfig {
    /// Load from an explicit path, or from the default location if present.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load_from_optional_path(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(explicit) => Self::load(explicit),
            None => match default_config_path() {
                Some(default) if default.is_file() => Self::load(&default),
                _ => Ok(Self::default()),
            },
        }
    }

    fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SynseekError::Config(format!(
                "Failed to read configuration {}: {err}",
                path.display()
            ))
        })?;
        let config: Self = toml::from_str(&raw).map_err(|err| {
            SynseekError::Config(format!(
                "Failed to parse configuration {}: {err}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tool.trim().is_empty() {
            return Err(SynseekError::Config("`tool` must not be empty".into()));
        }
        let commands = &self.commands;
        for (name, value) in [
            ("search", &commands.search),
            ("install", &commands.install),
            ("orphans", &commands.orphans),
            ("remove", &commands.remove),
            ("update", &commands.update),
        ] {
            if value.is_empty() {
                return Err(SynseekError::Config(format!(
                    "`commands.{name}` must list at least one argument"
                )));
            }
        }
        Ok(())
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

fn flags(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
