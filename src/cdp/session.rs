// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Debugger session driving response interception
//!
//! Owns the event stream of one DevTools target: enables the protocol
//! domains, installs the interception patterns, then spawns one task per
//! intercepted exchange. The command half of the connection is shared with
//! those tasks through [`SessionTransport`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::cdp::client::{CdpClient, CdpEvent};
use crate::cdp::event::{InterceptedExchange, INTERCEPTED_EVENT};
use crate::cdp::transport::{FetchedBody, InterceptTransport, Resumption};
use crate::config::InterceptConfig;
use crate::error::{Error, Result};
use crate::pipeline::InterceptionHandler;

/// Protocol domains enabled before interception starts
const DOMAINS: &[&str] = &["DOM", "Console", "Page", "Debugger"];

/// A debugger session attached to one browser target
pub struct DebuggerSession {
    client: Arc<CdpClient>,
    events: mpsc::UnboundedReceiver<CdpEvent>,
    verbose: bool,
}

impl DebuggerSession {
    /// Connect to a target's DevTools WebSocket endpoint
    pub async fn connect(ws_url: &str) -> Result<Self> {
        let (client, events) = CdpClient::connect(ws_url).await?;
        Ok(Self {
            client: Arc::new(client),
            events,
            verbose: false,
        })
    }

    /// Enable protocol domains and install interception patterns.
    ///
    /// Network buffering is unbounded so large responses survive until
    /// their body is fetched. Must complete before [`DebuggerSession::run`].
    pub async fn attach(&mut self, config: &InterceptConfig) -> Result<()> {
        self.verbose = config.verbose;

        for domain in DOMAINS {
            self.client
                .command(&format!("{}.enable", domain), json!({}))
                .await?;
        }

        self.client
            .command(
                "Network.enable",
                json!({ "maxTotalBufferSize": -1, "maxResourceBufferSize": -1 }),
            )
            .await?;

        tracing::info!(patterns = ?config.patterns, "Setting up response interception");
        self.client
            .command(
                "Network.setRequestInterception",
                json!({ "patterns": interception_patterns(&config.patterns) }),
            )
            .await?;

        Ok(())
    }

    /// Command-half handle for the interception pipeline
    pub fn transport(&self) -> SessionTransport {
        SessionTransport {
            client: Arc::clone(&self.client),
        }
    }

    /// Consume interception events until the connection closes.
    ///
    /// Each intercepted exchange runs in its own task so a slow mutation
    /// chain on one exchange never delays the next. A malformed event
    /// payload is unrecoverable and tears the session down.
    pub async fn run<T: InterceptTransport>(
        &mut self,
        handler: Arc<InterceptionHandler<T>>,
    ) -> Result<()> {
        while let Some(event) = self.events.recv().await {
            if event.method != INTERCEPTED_EVENT {
                if self.verbose {
                    tracing::debug!(method = %event.method, "Event");
                }
                continue;
            }

            let exchange = InterceptedExchange::from_params(event.params)?;
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                handler.handle(exchange).await;
            });
        }

        tracing::info!("Event stream closed, session finished");
        Ok(())
    }
}

/// Shared command half of a debugger session
#[derive(Clone)]
pub struct SessionTransport {
    client: Arc<CdpClient>,
}

#[async_trait]
impl InterceptTransport for SessionTransport {
    async fn fetch_body(&self, interception_id: &str) -> Result<FetchedBody> {
        let result = self
            .client
            .command(
                "Network.getResponseBodyForInterception",
                json!({ "interceptionId": interception_id }),
            )
            .await
            .map_err(|e| Error::body_fetch(interception_id, e.to_string()))?;

        serde_json::from_value(result)
            .map_err(|e| Error::body_fetch(interception_id, format!("malformed body payload: {}", e)))
    }

    async fn resume(&self, resumption: Resumption) -> Result<()> {
        self.client
            .command(
                "Network.continueInterceptedRequest",
                continue_params(&resumption),
            )
            .await?;
        Ok(())
    }
}

/// Build the pattern list for `Network.setRequestInterception`.
///
/// Interception happens at the headers-received stage so the response body
/// is available for mutation.
fn interception_patterns(patterns: &[String]) -> Vec<Value> {
    patterns
        .iter()
        .map(|p| json!({ "urlPattern": p, "interceptionStage": "HeadersReceived" }))
        .collect()
}

/// Build `Network.continueInterceptedRequest` parameters, omitting every
/// field the resumption leaves empty
fn continue_params(resumption: &Resumption) -> Value {
    let mut params = json!({ "interceptionId": resumption.interception_id });

    if !resumption.error_reason.is_empty() {
        params["errorReason"] = json!(resumption.error_reason);
    }
    if !resumption.raw_response.is_empty() {
        params["rawResponse"] = json!(resumption.raw_response);
    }
    if !resumption.url.is_empty() {
        params["url"] = json!(resumption.url);
    }
    if !resumption.method.is_empty() {
        params["method"] = json!(resumption.method);
    }
    if !resumption.post_data.is_empty() {
        params["postData"] = json!(resumption.post_data);
    }
    if let Some(ref headers) = resumption.headers {
        params["headers"] = json!(headers);
    }

    params
}
