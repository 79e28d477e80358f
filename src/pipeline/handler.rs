// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interception event handler
//!
//! One call per paused exchange. All failure branches converge on the same
//! single resume point, so every exchange is resumed exactly once no matter
//! which stage gave up, and the browser's interception channel never
//! stalls.

use std::sync::Arc;
use std::time::SystemTime;

use crate::cdp::{InterceptTransport, InterceptedExchange, Resumption};
use crate::codec;
use crate::config::InterceptConfig;
use crate::http;
use crate::pipeline::record::{ExchangeLog, ExchangeOutcome, ExchangeRecord};
use crate::pipeline::{mutation, observation};
use crate::plugin::{PluginRegistry, WebData};

/// Status substituted when the intercepted event carried none
const FALLBACK_STATUS: u16 = 200;

/// Resolution of one exchange, before the resume command is issued
struct Resolution {
    /// Encoded raw response override; `None` passes the original through
    raw_response: Option<String>,
    outcome: ExchangeOutcome,
    original_len: Option<usize>,
    final_len: Option<usize>,
}

impl Resolution {
    fn pass(outcome: ExchangeOutcome) -> Self {
        Self {
            raw_response: None,
            outcome,
            original_len: None,
            final_len: None,
        }
    }

    fn pass_with_body(outcome: ExchangeOutcome, original_len: usize) -> Self {
        Self {
            original_len: Some(original_len),
            ..Self::pass(outcome)
        }
    }
}

/// Handles intercepted exchanges for one session.
///
/// Holds the shared transport handle and the immutable plugin registry;
/// cheap to share across per-exchange tasks behind an `Arc`.
pub struct InterceptionHandler<T: InterceptTransport> {
    transport: Arc<T>,
    registry: Arc<PluginRegistry>,
    config: InterceptConfig,
    log: Arc<ExchangeLog>,
}

impl<T: InterceptTransport> InterceptionHandler<T> {
    /// Create a handler over a transport and a finished plugin registry
    pub fn new(transport: Arc<T>, registry: Arc<PluginRegistry>, config: InterceptConfig) -> Self {
        let log = Arc::new(ExchangeLog::new(config.log_capacity));
        Self {
            transport,
            registry,
            config,
            log,
        }
    }

    /// The log of handled exchanges
    pub fn exchange_log(&self) -> Arc<ExchangeLog> {
        Arc::clone(&self.log)
    }

    /// Handle one intercepted exchange from pause to resume.
    ///
    /// This is the only place a resume command is issued; `resolve` decides
    /// the override, this method sends it. A failed resume is logged, there
    /// is nothing else to do for an exchange at that point.
    pub async fn handle(&self, exchange: InterceptedExchange) {
        if exchange.is_navigation {
            tracing::debug!(url = %exchange.url, "Navigation request");
        }
        tracing::info!(
            url = %exchange.url,
            resource_type = %exchange.resource_type,
            "Response intercepted"
        );
        if !exchange.error_reason.is_empty() {
            tracing::warn!(url = %exchange.url, reason = %exchange.error_reason, "Exchange carries abort reason");
        }

        let resolution = self.resolve(&exchange).await;

        let resumption = match resolution.raw_response {
            Some(raw) => {
                tracing::debug!(url = %exchange.url, "Resuming with mutated response");
                Resumption::with_override(&exchange.interception_id, &exchange.error_reason, raw)
            }
            None => Resumption::pass_through(&exchange.interception_id, &exchange.error_reason),
        };

        if let Err(e) = self.transport.resume(resumption).await {
            tracing::error!(url = %exchange.url, error = %e, "Failed to resume exchange");
        }

        self.log.push(ExchangeRecord {
            url: exchange.url.clone(),
            resource_type: exchange.resource_type.clone(),
            outcome: resolution.outcome,
            original_len: resolution.original_len,
            final_len: resolution.final_len,
            is_navigation: exchange.is_navigation,
            timestamp: SystemTime::now(),
        });
    }

    /// Decide the resume override for an exchange.
    ///
    /// Never issues commands other than the body fetch; every failure maps
    /// to a pass-through resolution so the caller still resumes.
    async fn resolve(&self, exchange: &InterceptedExchange) -> Resolution {
        if exchange.interception_id.is_empty() {
            return Resolution::pass(ExchangeOutcome::MissingId);
        }

        if !self.config.in_scope(&exchange.url) {
            tracing::debug!(url = %exchange.url, "Out of scope, passing through");
            return Resolution::pass(ExchangeOutcome::OutOfScope);
        }

        let fetched = match self.transport.fetch_body(&exchange.interception_id).await {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(url = %exchange.url, error = %e, "Unable to fetch intercepted body");
                return Resolution::pass(ExchangeOutcome::FetchFailed);
            }
        };

        let body = match codec::decode(&fetched.body, fetched.base64_encoded) {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(url = %exchange.url, error = %e, "Unable to decode intercepted body");
                return Resolution::pass(ExchangeOutcome::DecodeFailed);
            }
        };
        let original_len = body.len();

        let data = WebData::new(
            body,
            exchange.headers.clone(),
            exchange.resource_type.clone(),
            exchange.url.clone(),
        );

        // analyzers must never delay resumption
        observation::dispatch(Arc::clone(&self.registry), data.clone());

        if exchange.resource_type.is_empty() {
            return Resolution::pass_with_body(ExchangeOutcome::PassThrough, original_len);
        }

        let altered = match mutation::run_chain(self.registry.mutators(), data).await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(url = %exchange.url, error = %e, "Mutation chain failed, passing through");
                return Resolution::pass_with_body(ExchangeOutcome::MutationFailed, original_len);
            }
        };

        let status = exchange.status_code.unwrap_or(FALLBACK_STATUS);
        let final_len = altered.len();
        let raw = http::rebuild_encoded(status, &exchange.headers, &altered);

        Resolution {
            raw_response: Some(raw),
            outcome: ExchangeOutcome::Mutated,
            original_len: Some(original_len),
            final_len: Some(final_len),
        }
    }
}
