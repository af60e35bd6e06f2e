// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Builds command lines for the external `cvs` client.
//!
//! This crate provides:
//! - Credential resolution from URL userinfo or a per-host HTTP-basic table
//! - Assembly of non-interactive command lines carrying those credentials
//! - A pluggable quoting convention for the target shell
//! - A runner seam for executing the assembled command

pub mod builder;
pub mod error;
pub mod lookup;
pub mod quoting;
pub mod repository_url;
pub mod runner;

pub use builder::{redact_command, CredentialSource, Credentials, CvsCommandBuilder, REDACTED};
pub use cvs_config::{CredentialEntry, CvsConfig, HttpBasicTable};
pub use error::{Error, Result};
pub use lookup::{CredentialLookup, NoCredentials};
pub use quoting::{QuoteStyle, QuotingConvention};
pub use repository_url::RepositoryUrl;
pub use runner::{CommandOutput, CommandRunner, ShellRunner};

/// Load the layered configuration and extract the typed view
pub fn load_config(paths: &cvs_config::paths::Paths, flags: &[(&str, &str)]) -> Result<CvsConfig> {
    cvs_config::load_all(paths, flags)
        .and_then(|resolved| resolved.cvs_config())
        .map_err(|e| Error::Config(format!("{:#}", e)))
}
