// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Typed views over the resolved configuration

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Username/password pair stored under `[http-basic."<host>"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CredentialEntry {
    pub username: String,

    /// Omitted passwords are treated as empty
    #[serde(default)]
    pub password: String,
}

impl CredentialEntry {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Host name to credential mapping, matched exactly
pub type HttpBasicTable = BTreeMap<String, CredentialEntry>;

/// The CVS-related configuration after all layers have been merged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CvsConfig {
    /// Whether the cvs client may cache the credentials it is given
    #[serde(default = "default_cache_credentials")]
    pub cache_credentials: bool,

    #[serde(default)]
    pub http_basic: HttpBasicTable,
}

fn default_cache_credentials() -> bool {
    true
}

impl Default for CvsConfig {
    fn default() -> Self {
        Self {
            cache_credentials: default_cache_credentials(),
            http_basic: HttpBasicTable::new(),
        }
    }
}

impl CvsConfig {
    /// Extract the typed view from a resolved JSON document.
    ///
    /// Keys owned by other tools are ignored here; the schema check on file
    /// layers is what rejects unknown keys. Host keys are lowercased.
    /// Deserialization errors name the offending path.
    pub fn from_resolved(resolved_json: &serde_json::Value) -> anyhow::Result<Self> {
        if resolved_json.as_object().is_some_and(|o| o.is_empty()) {
            return Ok(Self::default());
        }
        let mut config: Self = serde_path_to_error::deserialize(resolved_json.clone())
            .map_err(|e| anyhow::anyhow!("invalid configuration at {}", e))?;
        config.http_basic = std::mem::take(&mut config.http_basic)
            .into_iter()
            .map(|(host, entry)| (host.to_ascii_lowercase(), entry))
            .collect();
        Ok(config)
    }

    /// Case-insensitive lookup of the credential table
    pub fn credentials_for_host(&self, host: &str) -> Option<&CredentialEntry> {
        self.http_basic.get(&host.to_ascii_lowercase())
    }
}
