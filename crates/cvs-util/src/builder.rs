// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Credential resolution and cvs command assembly

use crate::error::{Error, Result};
use crate::lookup::CredentialLookup;
use crate::quoting::{QuoteStyle, QuotingConvention};
use crate::repository_url::RepositoryUrl;
use crate::runner::CommandRunner;
use cvs_config::CvsConfig;

/// Placeholder written in place of passwords in logs and errors
pub const REDACTED: &str = "[REDACTED]";

/// stderr fragments cvs prints when the server rejects credentials
const AUTH_FAILURE_MARKERS: &[&str] = &[
    "authorization failed",
    "authentication failed",
    "authentication realm:",
];

/// Where a resolved credential pair came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// Userinfo embedded in the repository URL
    Url,
    /// The HTTP-basic table, matched by host
    Config,
}

/// A resolved username/password pair
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub source: CredentialSource,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("source", &self.source)
            .finish()
    }
}

/// Builds `cvs` invocations for a single repository URL.
///
/// Credentials embedded in the URL win over the lookup table, and the two
/// sources are never combined. Building never fails: a URL without
/// resolvable credentials produces an empty credential fragment.
pub struct CvsCommandBuilder<'a> {
    url: RepositoryUrl,
    lookup: &'a dyn CredentialLookup,
    quoting: &'a dyn QuotingConvention,
    cache_credentials: bool,
}

impl<'a> CvsCommandBuilder<'a> {
    /// Builder using the host platform's quoting convention
    pub fn new(url: &str, lookup: &'a dyn CredentialLookup) -> Self {
        Self {
            url: RepositoryUrl::parse(url),
            lookup,
            quoting: &QuoteStyle::Host,
            cache_credentials: true,
        }
    }

    /// Builder whose credential table and cache flag come from configuration
    pub fn from_config(url: &str, config: &'a CvsConfig) -> Self {
        let mut builder = Self::new(url, config);
        builder.set_cache_credentials(config.cache_credentials);
        builder
    }

    pub fn with_quoting(mut self, quoting: &'a dyn QuotingConvention) -> Self {
        self.quoting = quoting;
        self
    }

    pub fn url(&self) -> &RepositoryUrl {
        &self.url
    }

    pub fn cache_credentials(&self) -> bool {
        self.cache_credentials
    }

    /// When false, `--no-auth-cache` is added to the credential fragment
    pub fn set_cache_credentials(&mut self, cache_credentials: bool) {
        self.cache_credentials = cache_credentials;
    }

    /// Resolve credentials: URL userinfo first, then the lookup by host
    pub fn credentials(&self) -> Option<Credentials> {
        if let Some(username) = self.url.username() {
            tracing::debug!(host = ?self.url.host(), "using credentials embedded in url");
            return Some(Credentials {
                username: username.to_string(),
                password: self.url.password().unwrap_or_default().to_string(),
                source: CredentialSource::Url,
            });
        }

        let host = self.url.host()?;
        let entry = self.lookup.lookup(host)?;
        tracing::debug!(host, "using credentials from http-basic table");
        Some(Credentials {
            username: entry.username,
            password: entry.password,
            source: CredentialSource::Config,
        })
    }

    pub fn has_auth(&self) -> bool {
        self.credentials().is_some()
    }

    /// The `--username`/`--password` fragment, or an empty string.
    ///
    /// A non-empty fragment starts and ends with a space and is prefixed
    /// with `--no-auth-cache ` when credential caching is disabled.
    pub fn credential_string(&self) -> String {
        self.quoting.normalize(&self.raw_credential_string())
    }

    fn raw_credential_string(&self) -> String {
        match self.credentials() {
            Some(credentials) => format!(
                " {}--username '{}' --password '{}' ",
                if self.cache_credentials {
                    ""
                } else {
                    "--no-auth-cache "
                },
                credentials.username,
                credentials.password,
            ),
            None => String::new(),
        }
    }

    /// Assemble `<template> --non-interactive <credentials> '<url>'`.
    ///
    /// With no credentials two spaces separate `--non-interactive` from the
    /// quoted URL.
    pub fn command(&self, template: &str, url: &str) -> String {
        self.quoting.normalize(&format!(
            "{} --non-interactive {} '{}'",
            template,
            self.raw_credential_string(),
            url
        ))
    }

    /// Build the command for `template` and run it.
    ///
    /// Returns stdout on success. A failure whose stderr reports rejected
    /// credentials maps to [`Error::AuthenticationFailed`].
    pub fn execute(&self, template: &str, url: &str, runner: &dyn CommandRunner) -> Result<String> {
        let command = self.command(template, url);
        let credentials = self.credentials();
        let redacted = redact_command(&command, credentials.as_ref(), self.quoting);

        tracing::info!(command = %redacted, "executing cvs command");
        let output = runner.run(&command)?;

        if output.success() {
            return Ok(output.stdout);
        }

        let stderr = output.stderr.to_lowercase();
        if AUTH_FAILURE_MARKERS.iter().any(|marker| stderr.contains(marker)) {
            let url = redact_command(url, credentials.as_ref(), self.quoting);
            tracing::warn!(url = %url, has_auth = credentials.is_some(), "cvs rejected credentials");
            return Err(Error::AuthenticationFailed {
                url,
                has_auth: credentials.is_some(),
            });
        }

        tracing::warn!(command = %redacted, status = ?output.status, "cvs command failed");
        Err(Error::CommandFailed {
            command: redacted,
            status: output.status,
            stderr: output.stderr,
        })
    }
}

/// Replace the password in `command` with a placeholder.
///
/// Covers the quoted `--password` value and URL userinfo (`user:secret@`).
/// Empty passwords are left untouched.
pub fn redact_command(
    command: &str,
    credentials: Option<&Credentials>,
    quoting: &dyn QuotingConvention,
) -> String {
    match credentials {
        Some(credentials) if !credentials.password.is_empty() => {
            let q = quoting.quote_char();
            command
                .replace(
                    &format!("--password {q}{}{q}", credentials.password),
                    &format!("--password {q}{REDACTED}{q}"),
                )
                .replace(
                    &format!(":{}@", credentials.password),
                    &format!(":{REDACTED}@"),
                )
        }
        _ => command.to_string(),
    }
}
