// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for Mustekala
//!
//! Failures are split into three families: protocol-level (fatal), exchange-
//! level (recoverable, the exchange resumes unmodified) and plugin-level
//! (isolated, logged and contained).

use thiserror::Error;

/// Result type alias for Mustekala operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Mustekala
#[derive(Error, Debug)]
pub enum Error {
    /// WebSocket connection to the DevTools endpoint failed
    #[error("Connection to {url} failed: {reason}")]
    Connection { url: String, reason: String },

    /// Malformed protocol message; cannot be locally repaired
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A DevTools command returned an error response
    #[error("DevTools error {code}: {message}")]
    Devtools { code: i64, message: String },

    /// A DevTools command timed out waiting for a response
    #[error("Command '{method}' timed out after {duration_ms}ms")]
    Timeout { method: String, duration_ms: u64 },

    /// Fetching an intercepted response body failed
    #[error("Body fetch failed for interception {interception_id}: {reason}")]
    BodyFetch {
        interception_id: String,
        reason: String,
    },

    /// Wire body decoding failed
    #[error("Decode error: {0}")]
    Decode(String),

    /// A mutator aborted the mutation chain
    #[error("Mutator '{plugin}' failed: {reason}")]
    Mutation { plugin: String, reason: String },

    /// An analyzer failed; contained, never propagated past logging
    #[error("Analyzer '{plugin}' failed: {reason}")]
    Analyzer { plugin: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a connection error
    pub fn connection(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Connection {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol<S: Into<String>>(msg: S) -> Self {
        Error::Protocol(msg.into())
    }

    /// Create a timeout error
    pub fn timeout(method: impl Into<String>, duration_ms: u64) -> Self {
        Error::Timeout {
            method: method.into(),
            duration_ms,
        }
    }

    /// Create a body fetch error
    pub fn body_fetch(interception_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::BodyFetch {
            interception_id: interception_id.into(),
            reason: reason.into(),
        }
    }

    /// Create a decode error
    pub fn decode<S: Into<String>>(msg: S) -> Self {
        Error::Decode(msg.into())
    }

    /// Create a mutation error tagged with the failing plugin's name
    pub fn mutation(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Mutation {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    /// Create an analyzer error tagged with the failing plugin's name
    pub fn analyzer(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Analyzer {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this error is fatal to the whole process
    ///
    /// Only protocol-framing corruption qualifies; everything else is
    /// resolved per exchange or per plugin.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Protocol(_))
    }

    /// Check if this error is resolved by passing the exchange through
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::BodyFetch { .. }
                | Error::Decode(_)
                | Error::Mutation { .. }
                | Error::Timeout { .. }
                | Error::Devtools { .. }
        )
    }

    /// Get the name of the plugin that produced this error, if any
    pub fn plugin_name(&self) -> Option<&str> {
        match self {
            Error::Mutation { plugin, .. } => Some(plugin),
            Error::Analyzer { plugin, .. } => Some(plugin),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(Error::protocol("truncated event payload").is_fatal());
        assert!(!Error::decode("bad padding").is_fatal());
        assert!(!Error::body_fetch("i-1", "gone").is_fatal());
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::body_fetch("i-1", "no body").is_recoverable());
        assert!(Error::decode("bad padding").is_recoverable());
        assert!(Error::mutation("rewriter", "boom").is_recoverable());
        assert!(!Error::protocol("framing").is_recoverable());
    }

    #[test]
    fn test_plugin_name() {
        let err = Error::mutation("injector", "no anchor");
        assert_eq!(err.plugin_name(), Some("injector"));

        let err = Error::analyzer("audit", "poisoned lock");
        assert_eq!(err.plugin_name(), Some("audit"));

        assert_eq!(Error::other("misc").plugin_name(), None);
    }
}
