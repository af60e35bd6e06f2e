// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Schema root definition for configuration validation.
//!
//! This type describes the canonical shape of a configuration file and is
//! used only for schema generation and validation. Reads go through
//! [`crate::types::CvsConfig`].

use crate::types::CredentialEntry;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[serde(deny_unknown_fields)]
pub struct SchemaRoot {
    /// Pass `--no-auth-cache` to cvs when false
    pub cache_credentials: Option<bool>,

    /// Per-host HTTP-basic credentials
    #[serde(default)]
    pub http_basic: BTreeMap<String, CredentialEntry>,
}
