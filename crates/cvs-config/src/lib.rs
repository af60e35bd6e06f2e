// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Layered configuration engine for CVS command building.
//!
//! Configuration is read from TOML files (system, user, repository, an
//! explicit CLI file), `CVSUTIL_*` environment variables and `key=value`
//! flags. Layers are merged as `serde_json::Value` documents and the typed
//! [`CvsConfig`] view is extracted from the result.

pub mod env;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod provenance;
pub mod schema;
pub mod types;

pub use provenance::{Provenance, Scope};
pub use schema::SchemaRoot;
pub use types::{CredentialEntry, CvsConfig, HttpBasicTable};

use anyhow::Result;
use serde_json::Value as J;

/// Final resolved configuration with provenance information
#[derive(Debug)]
pub struct Resolved {
    /// Final merged JSON configuration
    pub json: J,
    /// Winning scope for every key
    pub provenance: Provenance,
}

impl Resolved {
    /// Typed view of the merged document
    pub fn cvs_config(&self) -> Result<CvsConfig> {
        CvsConfig::from_resolved(&self.json)
    }
}

/// Load and merge all configuration layers.
///
/// Precedence order: system < user < repo < env < cli-config < flags.
/// Layers whose file does not exist are skipped; a layer that exists but
/// fails to parse or validate is an error.
pub fn load_all(paths: &paths::Paths, flag_sets: &[(&str, &str)]) -> Result<Resolved> {
    use Scope::*;

    let file_layer = |path: Option<&std::path::Path>, scope: Scope| -> Result<Option<J>> {
        match path {
            Some(p) if p.exists() => Ok(Some(loader::read_layer_from_file(p, scope)?)),
            _ => Ok(None),
        }
    };

    let layers = vec![
        (file_layer(Some(paths.system.as_path()), System)?, System),
        (file_layer(Some(paths.user.as_path()), User)?, User),
        (file_layer(paths.repo.as_deref(), Repo)?, Repo),
        (Some(env::env_overlay()?), Env),
        (file_layer(paths.cli_config.as_deref(), CliConfig)?, CliConfig),
        (Some(env::flags_overlay(flag_sets)), Flags),
    ];

    let mut prov = Provenance::default();
    let mut json = serde_json::json!({});

    for (layer, scope) in layers {
        if let Some(layer) = layer {
            prov.record_layer(&layer, scope);
            merge::merge_two_json(&mut json, layer);
        }
    }

    tracing::debug!(keys = prov.winner.len(), "resolved configuration");

    Ok(Resolved {
        json,
        provenance: prov,
    })
}
