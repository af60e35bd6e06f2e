// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Configuration file path discovery

use std::path::{Path, PathBuf};

/// Directory name used under platform configuration roots
const APP_DIR: &str = "cvs-util";

/// Environment variable overriding the user configuration directory
pub const HOME_ENV: &str = "CVS_UTIL_HOME";

/// Configuration file paths for different scopes
#[derive(Debug, Clone)]
pub struct Paths {
    pub system: PathBuf,
    pub user: PathBuf,
    pub repo: Option<PathBuf>,
    pub cli_config: Option<PathBuf>,
}

/// Discover configuration file paths for the current environment
pub fn discover_paths(repo_root: Option<&Path>) -> Paths {
    Paths {
        system: get_system_config_path(),
        user: get_user_config_path(),
        repo: repo_root.map(|root| root.join(".cvs-util").join("config.toml")),
        cli_config: None,
    }
}

fn get_system_config_path() -> PathBuf {
    if cfg!(target_os = "macos") {
        PathBuf::from("/Library/Application Support")
            .join(APP_DIR)
            .join("config.toml")
    } else if cfg!(target_os = "windows") {
        PathBuf::from(std::env::var("ProgramData").unwrap_or_else(|_| "C:\\ProgramData".into()))
            .join(APP_DIR)
            .join("config.toml")
    } else {
        PathBuf::from("/etc").join(APP_DIR).join("config.toml")
    }
}

fn get_user_config_path() -> PathBuf {
    if let Ok(home) = std::env::var(HOME_ENV) {
        return PathBuf::from(home).join("config.toml");
    }

    if cfg!(target_os = "windows") {
        PathBuf::from(std::env::var("APPDATA").unwrap_or_else(|_| "C:\\".into()))
            .join(APP_DIR)
            .join("config.toml")
    } else if cfg!(target_os = "macos") {
        PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".into()))
            .join("Library")
            .join("Application Support")
            .join(APP_DIR)
            .join("config.toml")
    } else {
        std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| "/tmp".into()))
                    .join(".config")
            })
            .join(APP_DIR)
            .join("config.toml")
    }
}
