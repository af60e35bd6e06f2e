// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Repository URL model

use url::Url;

/// A repository URL with the parts relevant for credential resolution.
///
/// Strings that do not parse keep their raw form but expose no host and no
/// userinfo, so they simply resolve to "no credentials".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryUrl {
    raw: String,
    parsed: Option<Url>,
}

impl RepositoryUrl {
    pub fn parse(raw: &str) -> Self {
        let parsed = match Url::parse(raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!(error = %e, "repository url did not parse");
                None
            }
        };
        Self {
            raw: raw.to_string(),
            parsed,
        }
    }

    /// The URL exactly as it was given
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn scheme(&self) -> Option<&str> {
        self.parsed.as_ref().map(Url::scheme)
    }

    pub fn host(&self) -> Option<&str> {
        self.parsed.as_ref().and_then(Url::host_str).filter(|h| !h.is_empty())
    }

    /// Embedded username, verbatim (no percent-decoding); empty counts as absent
    pub fn username(&self) -> Option<&str> {
        self.parsed.as_ref().map(Url::username).filter(|u| !u.is_empty())
    }

    /// Embedded password, verbatim (no percent-decoding)
    pub fn password(&self) -> Option<&str> {
        self.parsed.as_ref().and_then(Url::password)
    }

    pub fn path(&self) -> &str {
        self.parsed.as_ref().map(Url::path).unwrap_or("")
    }
}

impl std::fmt::Display for RepositoryUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
