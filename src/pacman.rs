/*============================================================
  Synavera Project: Syn-Seek
  Module: synseek::pacman
  Etiquette: Synavera Script Etiquette — Rust Profile v1.1.1
  ------------------------------------------------------------
  Purpose:
    Drive the external pacman-compatible tool: search, install,
    orphan listing and removal, system update and passthrough.

  Security / Safety Notes:
    Executes the configured tool with user privileges only;
    privilege escalation is left to the tool itself. Arguments
    are passed as discrete argv entries, never through a shell.

  Dependencies:
    tokio::process for command execution.

  Operational Scope:
    The only module that spawns processes.

  Revision History:
    2025-11-12 COD  Crafted package tool integration layer.
  ------------------------------------------------------------
  SSE Principles Observed:
    - Deterministic command invocation
    - Reusable helpers for external command diagnostics
============================================================*/

use std::io;
use std::process::{ExitCode, ExitStatus, Stdio};

use tokio::process::Command;

use crate::config::{CommandConfig, SynseekConfig};
use crate::error::{Result, SynseekError};
use crate::logger::Logger;

/// Handle on the configured package tool.
#[derive(Debug, Clone)]
pub struct PackageTool {
    program: String,
    commands: CommandConfig,
}

impl PackageTool {
    pub fn new(program: impl Into<String>, commands: CommandConfig) -> Self {
        Self {
            program: program.into(),
            commands,
        }
    }

    pub fn from_config(config: &SynseekConfig) -> Self {
        Self::new(config.tool.clone(), config.commands.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the search sub-command and return its stdout.
    ///
    /// The exit status is not treated as a failure: pacman-style tools exit
    /// non-zero when nothing matches.
    pub async fn search(&self, terms: &[String], logger: &Logger) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.commands.search)
            .args(terms)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|err| map_spawn_error(err, &self.program))?;

        logger.debug(
            "SEARCH",
            format!(
                "{} exited with {}",
                self.describe(&self.commands.search, terms),
                output.status
            ),
        );

        String::from_utf8(output.stdout).map_err(|err| {
            SynseekError::Serialization(format!(
                "{} emitted invalid UTF-8: {err}",
                self.describe(&self.commands.search, terms)
            ))
        })
    }

    /// Install the named packages with the operator's terminal attached.
    pub async fn install(&self, packages: &[String]) -> Result<ExitStatus> {
        self.interactive(&self.commands.install, packages).await
    }

    /// Names of packages no longer required by anything.
    pub async fn list_orphans(&self) -> Result<Vec<String>> {
        let output = Command::new(&self.program)
            .args(&self.commands.orphans)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|err| map_spawn_error(err, &self.program))?;

        let stdout = String::from_utf8(output.stdout).map_err(|err| {
            SynseekError::Serialization(format!(
                "{} emitted invalid UTF-8: {err}",
                self.describe(&self.commands.orphans, &[])
            ))
        })?;

        // pacman -Qdtq exits 1 with empty output when there are no orphans.
        if !output.status.success() && !stdout.trim().is_empty() {
            return Err(SynseekError::CommandFailure {
                command: self.describe(&self.commands.orphans, &[]),
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(parse_orphans(&stdout))
    }

    /// Remove the named packages with the operator's terminal attached.
    pub async fn remove(&self, packages: &[String]) -> Result<ExitStatus> {
        self.interactive(&self.commands.remove, packages).await
    }

    /// Full system update.
    pub async fn update(&self) -> Result<ExitStatus> {
        self.interactive(&self.commands.update, &[]).await
    }

    /// Forward arguments verbatim.
    pub async fn passthrough(&self, args: &[String]) -> Result<ExitStatus> {
        self.interactive(&[], args).await
    }

    async fn interactive(&self, flags: &[String], args: &[String]) -> Result<ExitStatus> {
        let status = Command::new(&self.program)
            .args(flags)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|err| map_spawn_error(err, &self.program))?;
        Ok(status)
    }

    /// Human-readable command line for logs and diagnostics.
    pub fn describe(&self, flags: &[String], args: &[String]) -> String {
        let mut parts = vec![self.program.as_str()];
        parts.extend(flags.iter().map(String::as_str));
        parts.extend(args.iter().map(String::as_str));
        parts.join(" ")
    }

    pub fn commands(&self) -> &CommandConfig {
        &self.commands
    }
}

/// One orphan per line; blank output means none.
pub fn parse_orphans(stdout: &str) -> Vec<String> {
    stdout
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Translate a child's exit status into our own exit code.
pub fn exit_code_of(status: ExitStatus) -> ExitCode {
    match status.code() {
        Some(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        // Terminated by a signal.
        None => ExitCode::FAILURE,
    }
}

fn map_spawn_error(err: io::Error, command: &str) -> SynseekError {
    if err.kind() == io::ErrorKind::NotFound {
        SynseekError::CommandMissing {
            command: command.into(),
        }
    } else {
        SynseekError::Runtime(format!("Failed to spawn {command}: {err}"))
    }
}

/// Throwaway shell scripts standing in for the package tool.
#[cfg(all(test, unix))]
pub mod testing {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    /// Write an executable `fake-tool` script into `dir` and return its path.
    pub fn fake_tool(dir: &Path, body: &str) -> String {
        let path = dir.join("fake-tool");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path.to_string_lossy().into_owned()
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::testing::fake_tool;
    use super::*;
    use std::fs;

    fn quiet_logger() -> Logger {
        Logger::new(None, false).unwrap()
    }

    #[test]
    fn orphan_output_is_split_per_line() {
        assert_eq!(parse_orphans("libfoo\nlibbar\n"), vec!["libfoo", "libbar"]);
        assert!(parse_orphans("").is_empty());
        assert!(parse_orphans("\n").is_empty());
    }

    #[test]
    fn describe_joins_argv() {
        let tool = PackageTool::new("pacaur", CommandConfig::default());
        assert_eq!(
            tool.describe(&tool.commands().install, &["a".to_string(), "b".to_string()]),
            "pacaur -S a b"
        );
    }

    #[tokio::test]
    async fn search_captures_stdout_despite_failure_status() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_tool(
            dir.path(),
            "printf 'core/zsh 5.9-5\\n    The Z shell\\n'\necho \"$@\" > \"$(dirname \"$0\")/args\"\nexit 1",
        );
        let tool = PackageTool::new(program, CommandConfig::default());

        let stdout = tool
            .search(&["z".to_string(), "shell".to_string()], &quiet_logger())
            .await
            .unwrap();
        assert_eq!(stdout, "core/zsh 5.9-5\n    The Z shell\n");
        let args = fs::read_to_string(dir.path().join("args")).unwrap();
        assert_eq!(args.trim(), "-Ss z shell");
    }

    #[tokio::test]
    async fn install_passes_each_package_and_returns_status() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_tool(
            dir.path(),
            "echo \"$@\" > \"$(dirname \"$0\")/args\"\nexit 3",
        );
        let tool = PackageTool::new(program, CommandConfig::default());

        let status = tool
            .install(&["gvfs-mtp".to_string(), "android-studio".to_string()])
            .await
            .unwrap();
        assert_eq!(status.code(), Some(3));
        let args = fs::read_to_string(dir.path().join("args")).unwrap();
        assert_eq!(args.trim(), "-S gvfs-mtp android-studio");
    }

    #[tokio::test]
    async fn empty_orphan_listing_with_failure_status_means_none() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_tool(dir.path(), "exit 1");
        let tool = PackageTool::new(program, CommandConfig::default());
        assert!(tool.list_orphans().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn orphans_are_listed() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_tool(dir.path(), "printf 'libfoo\\nlibbar\\n'");
        let tool = PackageTool::new(program, CommandConfig::default());
        assert_eq!(tool.list_orphans().await.unwrap(), vec!["libfoo", "libbar"]);
    }

    #[tokio::test]
    async fn passthrough_adds_no_flags() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_tool(dir.path(), "echo \"$@\" > \"$(dirname \"$0\")/args\"");
        let tool = PackageTool::new(program, CommandConfig::default());
        let status = tool
            .passthrough(&["-Qi".to_string(), "bash".to_string()])
            .await
            .unwrap();
        assert!(status.success());
        let args = fs::read_to_string(dir.path().join("args")).unwrap();
        assert_eq!(args.trim(), "-Qi bash");
    }

    #[tokio::test]
    async fn missing_binary_is_reported() {
        let tool = PackageTool::new("syn-seek-definitely-missing", CommandConfig::default());
        let err = tool.update().await.unwrap_err();
        assert!(matches!(err, SynseekError::CommandMissing { .. }));
    }
}
