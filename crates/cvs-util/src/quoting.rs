// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Shell quoting conventions

/// Decides which quote character command lines use.
///
/// Command text is always composed with single quotes; under the double
/// quote convention every `'` is remapped to `"` in one pass over the final
/// string.
pub trait QuotingConvention {
    fn uses_double_quotes(&self) -> bool;

    fn normalize(&self, command: &str) -> String {
        if self.uses_double_quotes() {
            command.replace('\'', "\"")
        } else {
            command.to_string()
        }
    }

    /// The quote character produced by [`QuotingConvention::normalize`]
    fn quote_char(&self) -> char {
        if self.uses_double_quotes() {
            '"'
        } else {
            '\''
        }
    }
}

/// Built-in quoting conventions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    /// POSIX shells
    Single,
    /// `cmd.exe`
    Double,
    /// Whatever the current platform's shell uses
    #[default]
    Host,
}

impl QuotingConvention for QuoteStyle {
    fn uses_double_quotes(&self) -> bool {
        match self {
            QuoteStyle::Single => false,
            QuoteStyle::Double => true,
            QuoteStyle::Host => cfg!(windows),
        }
    }
}
