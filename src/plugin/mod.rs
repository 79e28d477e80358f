// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Plugin interfaces for response mutation and observation
//!
//! Two capabilities, one trait each: mutators rewrite a response body and
//! may fail (aborting the chain), analyzers observe for side effects and
//! their failures are contained. Both are registered under a human-readable
//! name used in log output.

mod builtin;
mod registry;

pub use builtin::{BodyRewriter, HeaderAudit, MissingHeader, ScriptInjector, TrafficLogger};
pub use registry::{NamedAnalyzer, NamedMutator, PluginRegistry};

use async_trait::async_trait;

use crate::error::Result;
use crate::http::Headers;

/// Snapshot of one intercepted response handed to plugins.
///
/// The mutation chain threads `body` through each mutator in turn; headers,
/// resource type and URL stay fixed for the whole chain. Analyzers receive
/// their own clone and never touch the instance mutators see.
#[derive(Debug, Clone)]
pub struct WebData {
    /// Decoded response body
    pub body: String,
    /// Response headers in wire order
    pub headers: Headers,
    /// DevTools resource type (e.g. "Document", "Script"); empty for
    /// exchanges without a body to process
    pub resource_type: String,
    /// Request URL
    pub url: String,
}

impl WebData {
    /// Create web data for an intercepted response
    pub fn new(
        body: impl Into<String>,
        headers: Headers,
        resource_type: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            body: body.into(),
            headers,
            resource_type: resource_type.into(),
            url: url.into(),
        }
    }

    /// Check whether this is a top-level document response
    pub fn is_document(&self) -> bool {
        self.resource_type.eq_ignore_ascii_case("document")
    }
}

/// A plugin that rewrites response bodies.
///
/// Returns the replacement body. An error aborts the whole mutation chain
/// and the exchange is resumed with its original content.
#[async_trait]
pub trait Mutator: Send + Sync {
    /// Produce a new body for the response
    async fn mutate(&self, data: &WebData) -> Result<String>;
}

/// A plugin that observes responses for side effects.
///
/// Runs detached from the interception hot path; an error is logged with
/// the plugin's name and affects nothing else.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Observe a response
    async fn observe(&self, data: &WebData) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_document() {
        let data = WebData::new("", Headers::new(), "Document", "https://a.example/");
        assert!(data.is_document());

        let data = WebData::new("", Headers::new(), "Script", "https://a.example/x.js");
        assert!(!data.is_document());

        let data = WebData::new("", Headers::new(), "", "https://a.example/302");
        assert!(!data.is_document());
    }
}
