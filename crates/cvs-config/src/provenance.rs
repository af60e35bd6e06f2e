// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Provenance tracking for configuration values

use serde_json::Value as J;
use std::collections::BTreeMap;

/// Configuration scope, in precedence order
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Scope {
    System,
    User,
    Repo,
    Env,
    CliConfig,
    Flags,
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Scope::System => "system",
            Scope::User => "user",
            Scope::Repo => "repo",
            Scope::Env => "env",
            Scope::CliConfig => "cli-config",
            Scope::Flags => "flags",
        };
        f.write_str(name)
    }
}

/// Which scope supplied each dotted key of the resolved configuration
#[derive(Default, Clone, Debug)]
pub struct Provenance {
    /// Maps dotted key paths to the winning scope
    pub winner: BTreeMap<String, Scope>,
    /// Maps dotted key paths to change history [(scope, value)]
    pub changes: BTreeMap<String, Vec<(Scope, J)>>,
}

impl Provenance {
    /// Record every leaf of `layer` as set by `scope`
    pub fn record_layer(&mut self, layer: &J, scope: Scope) {
        self.record_at(layer, scope, "");
    }

    fn record_at(&mut self, layer: &J, scope: Scope, prefix: &str) {
        match layer {
            J::Object(obj) => {
                for (k, v) in obj {
                    let pfx = if prefix.is_empty() {
                        quote_segment(k)
                    } else {
                        format!("{}.{}", prefix, quote_segment(k))
                    };
                    self.record_at(v, scope, &pfx);
                }
            }
            // Nulls never win a merge
            J::Null => {}
            _ => {
                self.winner.insert(prefix.to_string(), scope);
                self.changes.entry(prefix.to_string()).or_default().push((scope, layer.clone()));
            }
        }
    }
}

fn quote_segment(k: &str) -> String {
    if k.contains('.') {
        format!("\"{}\"", k)
    } else {
        k.to_string()
    }
}
