// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Credential lookup by host

use cvs_config::{CredentialEntry, CvsConfig, HttpBasicTable};
use std::collections::HashMap;
use std::hash::BuildHasher;

/// Read-only source of per-host HTTP-basic credentials
pub trait CredentialLookup {
    /// Exact-match lookup; `None` for unknown hosts
    fn lookup(&self, host: &str) -> Option<CredentialEntry>;
}

impl CredentialLookup for HttpBasicTable {
    fn lookup(&self, host: &str) -> Option<CredentialEntry> {
        self.get(host).cloned()
    }
}

impl<S: BuildHasher> CredentialLookup for HashMap<String, CredentialEntry, S> {
    fn lookup(&self, host: &str) -> Option<CredentialEntry> {
        self.get(host).cloned()
    }
}

impl CredentialLookup for CvsConfig {
    fn lookup(&self, host: &str) -> Option<CredentialEntry> {
        self.credentials_for_host(host).cloned()
    }
}

/// Lookup that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCredentials;

impl CredentialLookup for NoCredentials {
    fn lookup(&self, _host: &str) -> Option<CredentialEntry> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        let mut table = HttpBasicTable::new();
        table.insert(
            "cvs.apache.org".to_string(),
            CredentialEntry::new("foo", "bar"),
        );

        assert_eq!(
            table.lookup("cvs.apache.org"),
            Some(CredentialEntry::new("foo", "bar"))
        );
        assert_eq!(table.lookup("cvs.example.org"), None);
    }

    #[test]
    fn test_hash_map_lookup() {
        let table: HashMap<String, CredentialEntry> = [(
            "cvs.apache.org".to_string(),
            CredentialEntry::new("foo", "bar"),
        )]
        .into_iter()
        .collect();

        assert!(table.lookup("cvs.apache.org").is_some());
    }

    #[test]
    fn test_no_credentials() {
        assert_eq!(NoCredentials.lookup("cvs.apache.org"), None);
    }
}
