// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Execution of assembled command lines

use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs a literal shell command line
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    fn run(&self, command: &str) -> std::io::Result<CommandOutput>;
}

/// Runs commands through the platform shell (`sh -c`, or `cmd /C` on Windows)
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    cwd: Option<PathBuf>,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run commands from `cwd` instead of the current directory
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> std::io::Result<CommandOutput> {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        };

        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }

        let output = cmd.stdin(Stdio::null()).output()?;

        Ok(CommandOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_shell_runner_captures_stdout() {
        let output = ShellRunner::new().run("echo hello").unwrap();
        assert!(output.success());
        assert_eq!(output.stdout, "hello\n");
    }

    #[test]
    fn test_shell_runner_reports_exit_code_and_stderr() {
        let output = ShellRunner::new().run("echo oops >&2; exit 3").unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stderr, "oops\n");
    }

    #[test]
    fn test_shell_runner_uses_cwd() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("marker"), "").unwrap();

        let output = ShellRunner::new().with_cwd(temp_dir.path()).run("ls").unwrap();
        assert!(output.stdout.contains("marker"));
    }
}
