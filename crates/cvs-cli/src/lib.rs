// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! `cvs-cmd`: build and run cvs command lines with configured credentials.
#![allow(clippy::disallowed_methods)] // CLI is allowed to print to stdout/stderr

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use cvs_config::{env::parse_flag, paths, Resolved};
use cvs_logging::CliLoggingArgs;
use cvs_util::{CvsCommandBuilder, CvsConfig, QuoteStyle, ShellRunner, REDACTED};
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "cvs-cmd", version, about = "Build cvs command lines with HTTP-basic credentials")]
pub struct Cli {
    /// Extra configuration file, layered above env and below --set
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Repository root whose .cvs-util/config.toml is read
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Override a configuration key (KEY=VALUE, repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    pub set: Vec<String>,

    #[command(flatten)]
    pub logging: CliLoggingArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the credential fragment for a URL
    Credentials(TargetArgs),
    /// Print the full command line for a subcommand template
    Command {
        #[command(flatten)]
        target: TargetArgs,
        /// Subcommand text, e.g. "cvs ls"
        template: String,
    },
    /// Build the command line and run it through the shell
    Run {
        #[command(flatten)]
        target: TargetArgs,
        /// Working directory for the command
        #[arg(long)]
        cwd: Option<PathBuf>,
        /// Subcommand text, e.g. "cvs checkout"
        template: String,
    },
    /// Inspect the resolved configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigCommands,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the merged configuration with passwords redacted
    Show {
        /// Also print which layer supplied each key
        #[arg(long)]
        provenance: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct TargetArgs {
    /// Repository URL used for credential resolution
    #[arg(long)]
    pub url: String,

    /// URL placed at the end of the command (defaults to --url)
    #[arg(long)]
    pub target: Option<String>,

    /// Pass --no-auth-cache regardless of configuration
    #[arg(long)]
    pub no_auth_cache: bool,

    /// Quoting convention of the shell that will run the command
    #[arg(long, value_enum, default_value_t = QuoteArg::Host)]
    pub quote: QuoteArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum QuoteArg {
    Single,
    Double,
    Host,
}

impl From<QuoteArg> for QuoteStyle {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::Single => QuoteStyle::Single,
            QuoteArg::Double => QuoteStyle::Double,
            QuoteArg::Host => QuoteStyle::Host,
        }
    }
}

impl Cli {
    pub fn run(&self, out: &mut dyn Write) -> Result<()> {
        let resolved = self.resolve_config()?;

        match &self.command {
            Commands::Credentials(target) => {
                let config = resolved.cvs_config()?;
                let quoting = QuoteStyle::from(target.quote);
                let builder = target.builder(&config, &quoting);
                writeln!(out, "{}", builder.credential_string())?;
            }
            Commands::Command { target, template } => {
                let config = resolved.cvs_config()?;
                let quoting = QuoteStyle::from(target.quote);
                let builder = target.builder(&config, &quoting);
                writeln!(out, "{}", builder.command(template, target.target_url()))?;
            }
            Commands::Run {
                target,
                cwd,
                template,
            } => {
                let config = resolved.cvs_config()?;
                let quoting = QuoteStyle::from(target.quote);
                let builder = target.builder(&config, &quoting);
                let mut runner = ShellRunner::new();
                if let Some(cwd) = cwd {
                    runner = runner.with_cwd(cwd);
                }
                let stdout = builder.execute(template, target.target_url(), &runner)?;
                write!(out, "{}", stdout)?;
            }
            Commands::Config {
                subcommand: ConfigCommands::Show { provenance },
            } => {
                let mut json = resolved.json.clone();
                redact_passwords(&mut json);
                writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
                if *provenance {
                    for (key, scope) in &resolved.provenance.winner {
                        writeln!(out, "{} <- {}", key, scope)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn resolve_config(&self) -> Result<Resolved> {
        let mut paths = paths::discover_paths(self.repo.as_deref());
        paths.cli_config = self.config.clone();

        let flags = self
            .set
            .iter()
            .map(|flag| parse_flag(flag))
            .collect::<Result<Vec<_>>>()?;

        cvs_config::load_all(&paths, &flags).context("loading configuration")
    }
}

impl TargetArgs {
    fn builder<'a>(&self, config: &'a CvsConfig, quoting: &'a QuoteStyle) -> CvsCommandBuilder<'a> {
        let mut builder = CvsCommandBuilder::from_config(&self.url, config).with_quoting(quoting);
        if self.no_auth_cache {
            builder.set_cache_credentials(false);
        }
        tracing::debug!(
            host = ?builder.url().host(),
            has_auth = builder.has_auth(),
            cache_credentials = builder.cache_credentials(),
            "prepared command builder"
        );
        builder
    }

    fn target_url(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.url)
    }
}

/// Replace every `http-basic.<host>.password` value with a placeholder
fn redact_passwords(json: &mut serde_json::Value) {
    if let Some(hosts) = json.get_mut("http-basic").and_then(|v| v.as_object_mut()) {
        for entry in hosts.values_mut() {
            if let Some(password) = entry.get_mut("password") {
                *password = serde_json::Value::String(REDACTED.to_string());
            }
        }
    }
}
