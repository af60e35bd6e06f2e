// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Environment variable and CLI flag overlays

use anyhow::Result;
use serde_json::Value as J;

/// Prefix of environment variables read into the env layer
pub const ENV_PREFIX: &str = "CVSUTIL";

/// Create JSON overlay from CVSUTIL_* environment variables.
///
/// Only top-level keys are addressable: `CVSUTIL_CACHE_CREDENTIALS=false`
/// becomes `cache-credentials = false`.
pub fn env_overlay() -> Result<J> {
    let built = config::Config::builder()
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .convert_case(config::Case::Kebab)
                .try_parsing(true),
        )
        .build()?;

    Ok(serde_json::to_value(
        built.try_deserialize::<serde_json::Map<String, J>>()?,
    )?)
}

/// Keys whose flag values are read as booleans; everything else stays a string
const BOOLEAN_KEYS: &[&str] = &["cache-credentials"];

/// Create JSON overlay from CLI `key.path=value` pairs
pub fn flags_overlay(kv_pairs: &[(&str, &str)]) -> J {
    let mut root = serde_json::json!({});
    for (k, v) in kv_pairs {
        crate::merge::insert_dotted(&mut root, k, flag_value(k, v));
    }
    root
}

fn flag_value(key: &str, v: &str) -> J {
    if BOOLEAN_KEYS.contains(&key) {
        match v {
            "true" => return J::Bool(true),
            "false" => return J::Bool(false),
            _ => {}
        }
    }
    J::String(v.to_string())
}

/// Split a `key=value` flag into its parts
pub fn parse_flag(flag: &str) -> Result<(&str, &str)> {
    flag.split_once('=')
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| anyhow::anyhow!("expected KEY=VALUE, got '{}'", flag))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_flags_overlay() {
        let flags = vec![
            ("cache-credentials", "false"),
            (r#"http-basic."cvs.example.org".username"#, "foo"),
        ];
        let overlay = flags_overlay(&flags);

        assert_eq!(overlay["cache-credentials"], false);
        assert_eq!(overlay["http-basic"]["cvs.example.org"]["username"], "foo");
    }

    #[test]
    fn test_flags_overlay_keeps_credential_strings() {
        let flags = vec![
            (r#"http-basic."cvs.example.org".username"#, "false"),
            (r#"http-basic."cvs.example.org".password"#, "true"),
        ];
        let overlay = flags_overlay(&flags);

        assert_eq!(overlay["http-basic"]["cvs.example.org"]["username"], "false");
        assert_eq!(overlay["http-basic"]["cvs.example.org"]["password"], "true");
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("a.b=c").unwrap(), ("a.b", "c"));
        assert_eq!(parse_flag("a=b=c").unwrap(), ("a", "b=c"));
        assert!(parse_flag("novalue").is_err());
        assert!(parse_flag("=value").is_err());
    }

    #[test]
    #[serial]
    fn test_env_overlay_empty_without_prefixed_vars() {
        std::env::remove_var("CVSUTIL_CACHE_CREDENTIALS");
        let overlay = env_overlay().unwrap();
        assert!(overlay.as_object().unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_env_overlay_parses_top_level_bool() {
        std::env::set_var("CVSUTIL_CACHE_CREDENTIALS", "false");
        let overlay = env_overlay();
        std::env::remove_var("CVSUTIL_CACHE_CREDENTIALS");

        assert_eq!(overlay.unwrap()["cache-credentials"], false);
    }
}
