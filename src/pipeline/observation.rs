// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Observation chain runner
//!
//! Analyzers run on a detached task with their own clone of the response
//! data, so a slow or failing analyzer can never delay resumption of the
//! exchange. The hot path never joins this task.

use std::sync::Arc;

use crate::plugin::{PluginRegistry, WebData};

/// Dispatch the observation chain for one exchange, fire-and-forget.
///
/// Each analyzer failure is logged with the plugin's registered name and
/// contained; the remaining analyzers still run.
pub fn dispatch(registry: Arc<PluginRegistry>, data: WebData) {
    if registry.analyzers().is_empty() {
        return;
    }

    tokio::spawn(async move {
        for analyzer in registry.analyzers() {
            if let Err(e) = analyzer.observe(&data).await {
                tracing::warn!(
                    plugin = analyzer.name(),
                    url = %data.url,
                    error = %e,
                    "Analyzer failed"
                );
            }
        }
    });
}
