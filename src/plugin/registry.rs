// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Plugin registry
//!
//! Built once before interception begins and treated as immutable while
//! events are flowing; the pipeline receives it behind an `Arc` and never
//! mutates it. Mutator order is registration order and is significant:
//! later mutators see earlier mutators' output.

use std::sync::Arc;

use crate::error::Result;
use crate::plugin::{Analyzer, Mutator, WebData};

/// A mutator with its registered name
#[derive(Clone)]
pub struct NamedMutator {
    name: String,
    inner: Arc<dyn Mutator>,
}

impl NamedMutator {
    /// Registered plugin name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the wrapped mutator
    pub async fn mutate(&self, data: &WebData) -> Result<String> {
        self.inner.mutate(data).await
    }
}

/// An analyzer with its registered name
#[derive(Clone)]
pub struct NamedAnalyzer {
    name: String,
    inner: Arc<dyn Analyzer>,
}

impl NamedAnalyzer {
    /// Registered plugin name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the wrapped analyzer
    pub async fn observe(&self, data: &WebData) -> Result<()> {
        self.inner.observe(data).await
    }
}

/// Registry of mutators and analyzers for one interception session
#[derive(Clone, Default)]
pub struct PluginRegistry {
    mutators: Vec<NamedMutator>,
    analyzers: Vec<NamedAnalyzer>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mutator; chain position follows registration order
    pub fn with_mutator<M: Mutator + 'static>(mut self, name: impl Into<String>, mutator: M) -> Self {
        self.mutators.push(NamedMutator {
            name: name.into(),
            inner: Arc::new(mutator),
        });
        self
    }

    /// Register an analyzer
    pub fn with_analyzer<A: Analyzer + 'static>(
        mut self,
        name: impl Into<String>,
        analyzer: A,
    ) -> Self {
        self.analyzers.push(NamedAnalyzer {
            name: name.into(),
            inner: Arc::new(analyzer),
        });
        self
    }

    /// Registered mutators in chain order
    pub fn mutators(&self) -> &[NamedMutator] {
        &self.mutators
    }

    /// Registered analyzers
    pub fn analyzers(&self) -> &[NamedAnalyzer] {
        &self.analyzers
    }

    /// Check if no plugins are registered
    pub fn is_empty(&self) -> bool {
        self.mutators.is_empty() && self.analyzers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::http::Headers;

    struct Suffixer(&'static str);

    #[async_trait]
    impl Mutator for Suffixer {
        async fn mutate(&self, data: &WebData) -> Result<String> {
            Ok(format!("{}{}", data.body, self.0))
        }
    }

    struct Noop;

    #[async_trait]
    impl Analyzer for Noop {
        async fn observe(&self, _data: &WebData) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_registration_order() {
        let registry = PluginRegistry::new()
            .with_mutator("first", Suffixer("-a"))
            .with_mutator("second", Suffixer("-b"))
            .with_analyzer("watcher", Noop);

        let names: Vec<&str> = registry.mutators().iter().map(|m| m.name()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(registry.analyzers().len(), 1);
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_named_mutator_runs_inner() {
        let registry = PluginRegistry::new().with_mutator("suffix", Suffixer("!"));
        let data = WebData::new("hi", Headers::new(), "Document", "https://a.example/");

        let body = tokio_test::block_on(registry.mutators()[0].mutate(&data)).unwrap();
        assert_eq!(body, "hi!");
    }
}
