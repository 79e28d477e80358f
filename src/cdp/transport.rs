// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport primitives consumed by the interception pipeline
//!
//! The pipeline needs exactly two operations against the browser: fetch the
//! body of a paused exchange, and resume that exchange. Both live behind a
//! trait so the pipeline is testable without a browser.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::Result;
use crate::http::Headers;

/// Body of a paused exchange as delivered by the browser
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedBody {
    /// Body text, possibly in the wire encoding
    pub body: String,
    /// Whether `body` is base64-encoded
    pub base64_encoded: bool,
}

/// Parameters for the single resume command that ends an exchange.
///
/// An empty `raw_response` resumes the exchange with its original response
/// untouched; a non-empty one substitutes the encoded raw response. The
/// request-override fields are reserved for request-stage interception and
/// always empty on the response path.
#[derive(Debug, Clone, Default)]
pub struct Resumption {
    /// Interception id of the exchange being resumed
    pub interception_id: String,
    /// Abort reason; empty continues normally
    pub error_reason: String,
    /// Encoded raw response override; empty lets the original through
    pub raw_response: String,
    /// Reserved request override: URL
    pub url: String,
    /// Reserved request override: method
    pub method: String,
    /// Reserved request override: post data
    pub post_data: String,
    /// Reserved request override: headers
    pub headers: Option<Headers>,
}

impl Resumption {
    /// Resume with the original response untouched
    pub fn pass_through(interception_id: impl Into<String>, error_reason: impl Into<String>) -> Self {
        Self {
            interception_id: interception_id.into(),
            error_reason: error_reason.into(),
            ..Self::default()
        }
    }

    /// Resume substituting an encoded raw response
    pub fn with_override(
        interception_id: impl Into<String>,
        error_reason: impl Into<String>,
        raw_response: impl Into<String>,
    ) -> Self {
        Self {
            interception_id: interception_id.into(),
            error_reason: error_reason.into(),
            raw_response: raw_response.into(),
            ..Self::default()
        }
    }

    /// Check whether this resumption carries no override
    pub fn is_pass_through(&self) -> bool {
        self.raw_response.is_empty()
    }
}

/// The two browser-side operations on a paused exchange
#[async_trait]
pub trait InterceptTransport: Send + Sync + 'static {
    /// Fetch the response body for a paused exchange
    async fn fetch_body(&self, interception_id: &str) -> Result<FetchedBody>;

    /// Resume a paused exchange. Called exactly once per exchange.
    async fn resume(&self, resumption: Resumption) -> Result<()>;
}
