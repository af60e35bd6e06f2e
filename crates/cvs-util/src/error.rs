// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Error types for running cvs commands

use thiserror::Error;

/// Result type alias for cvs command operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised when a built command is executed or configuration is loaded.
///
/// Building a command never fails; these only surface at the edges.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed for {url} (credentials supplied: {has_auth})")]
    AuthenticationFailed { url: String, has_auth: bool },

    #[error("Command `{command}` failed with status {status:?}: {stderr}")]
    CommandFailed {
        /// Command line with the password redacted
        command: String,
        /// Exit code, `None` when terminated by a signal
        status: Option<i32>,
        stderr: String,
    },
}
