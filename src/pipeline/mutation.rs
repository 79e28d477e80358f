// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Mutation chain runner

use crate::error::{Error, Result};
use crate::plugin::{NamedMutator, WebData};

/// Run the mutation chain over a response.
///
/// Mutators run sequentially in registration order; each one's output body
/// becomes the next one's input while headers, resource type and URL stay
/// fixed. The first error aborts the chain and nothing of the partial
/// result may be used, the caller resumes the exchange with its original
/// content instead.
pub async fn run_chain(mutators: &[NamedMutator], mut data: WebData) -> Result<String> {
    for mutator in mutators {
        tracing::debug!(plugin = mutator.name(), url = %data.url, "Running mutator");

        data.body = mutator.mutate(&data).await.map_err(|e| match e {
            tagged @ Error::Mutation { .. } => tagged,
            other => Error::mutation(mutator.name(), other.to_string()),
        })?;
    }

    Ok(data.body)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::http::Headers;
    use crate::plugin::{Mutator, PluginRegistry};

    struct Append(&'static str);

    #[async_trait]
    impl Mutator for Append {
        async fn mutate(&self, data: &WebData) -> Result<String> {
            Ok(format!("{}{}", data.body, self.0))
        }
    }

    struct Failing;

    #[async_trait]
    impl Mutator for Failing {
        async fn mutate(&self, _data: &WebData) -> Result<String> {
            Err(Error::other("boom"))
        }
    }

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Mutator for Counting {
        async fn mutate(&self, data: &WebData) -> Result<String> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(data.body.clone())
        }
    }

    fn data(body: &str) -> WebData {
        WebData::new(body, Headers::new(), "Document", "https://target.example/")
    }

    #[tokio::test]
    async fn test_composition_in_registration_order() {
        let registry = PluginRegistry::new()
            .with_mutator("a", Append("-a"))
            .with_mutator("b", Append("-b"))
            .with_mutator("c", Append("-c"));

        let body = run_chain(registry.mutators(), data("base")).await.unwrap();
        assert_eq!(body, "base-a-b-c");
    }

    #[tokio::test]
    async fn test_empty_chain_returns_body_unchanged() {
        let registry = PluginRegistry::new();
        let body = run_chain(registry.mutators(), data("same")).await.unwrap();
        assert_eq!(body, "same");
    }

    #[tokio::test]
    async fn test_first_failure_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let registry = PluginRegistry::new()
            .with_mutator("a", Append("-a"))
            .with_mutator("bomb", Failing)
            .with_mutator("after", Counting(Arc::clone(&calls)));

        let err = run_chain(registry.mutators(), data("base")).await.unwrap_err();

        assert_eq!(err.plugin_name(), Some("bomb"));
        assert_eq!(calls.load(Ordering::SeqCst), 0, "later mutators must not run");
    }

    #[tokio::test]
    async fn test_error_carries_failing_plugin_name() {
        let registry = PluginRegistry::new().with_mutator("injector", Failing);

        let err = run_chain(registry.mutators(), data("x")).await.unwrap_err();
        assert!(matches!(err, Error::Mutation { .. }));
        assert_eq!(err.plugin_name(), Some("injector"));
    }
}
