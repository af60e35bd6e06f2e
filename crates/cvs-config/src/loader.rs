// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! TOML loading and JSON validation functionality

use anyhow::{Context, Result};
use serde_json::Value as J;
use std::path::Path;

/// Parse TOML string to JSON value for schema validation
pub fn parse_toml_to_json(toml_str: &str) -> Result<J> {
    let table: toml::Table = toml::from_str(toml_str)?;
    Ok(serde_json::to_value(table)?)
}

/// Validate JSON against the configuration schema
pub fn validate_against_schema(v: &J) -> Result<()> {
    use jsonschema::{Draft, JSONSchema};
    use std::sync::OnceLock;

    static VALIDATOR: OnceLock<JSONSchema> = OnceLock::new();
    let validator = match VALIDATOR.get() {
        Some(validator) => validator,
        None => {
            let schema = serde_json::to_value(schemars::schema_for!(crate::schema::SchemaRoot))?;
            let compiled = JSONSchema::options()
                .with_draft(Draft::Draft202012)
                .compile(&schema)
                .map_err(|e| anyhow::anyhow!("Schema compilation failed: {}", e))?;
            VALIDATOR.get_or_init(|| compiled)
        }
    };

    if let Err(errors) = validator.validate(v) {
        let error_msg = errors.map(|e| e.to_string()).collect::<Vec<_>>().join("\n  - ");
        anyhow::bail!("Config schema validation failed:\n  - {}", error_msg);
    }

    Ok(())
}

/// Load and validate a configuration layer from file
pub fn read_layer_from_file(path: &Path, scope: crate::Scope) -> Result<J> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading config file {:?}", path))?;

    let json = parse_toml_to_json(&content).with_context(|| format!("parsing {:?}", path))?;
    validate_against_schema(&json).with_context(|| format!("validating {:?}", path))?;
    tracing::debug!(path = %path.display(), ?scope, "loaded configuration layer");

    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_parsing() {
        let json = parse_toml_to_json(
            r#"
            cache-credentials = false
            [http-basic."cvs.apache.org"]
            username = "foo"
            password = "bar"
            "#,
        )
        .unwrap();

        assert_eq!(json["cache-credentials"], false);
        assert_eq!(json["http-basic"]["cvs.apache.org"]["password"], "bar");
    }

    #[test]
    fn test_schema_accepts_credential_table() {
        let json = serde_json::json!({
            "http-basic": {
                "cvs.apache.org": { "username": "foo", "password": "bar" },
                "cvs.example.org": { "username": "anon" }
            }
        });
        assert!(validate_against_schema(&json).is_ok());
    }

    #[test]
    fn test_schema_rejects_unknown_keys() {
        let json = serde_json::json!({ "github-oauth": { "github.com": "token" } });
        assert!(validate_against_schema(&json).is_err());
    }

    #[test]
    fn test_schema_rejects_wrong_types() {
        let json = serde_json::json!({ "cache-credentials": "sometimes" });
        assert!(validate_against_schema(&json).is_err());

        let json = serde_json::json!({ "http-basic": { "cvs.apache.org": { "username": 42 } } });
        assert!(validate_against_schema(&json).is_err());
    }
}
