// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Intercepted exchange event parsing

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::http::Headers;

/// Event method announcing a paused network exchange
pub const INTERCEPTED_EVENT: &str = "Network.requestIntercepted";

/// One paused network transaction, parsed from a `Network.requestIntercepted`
/// event.
///
/// Lives from the moment the browser pauses the exchange until the single
/// resume command is issued; nothing touches it afterwards. An empty
/// `interception_id` means there is nothing to correlate a resume against;
/// an empty `resource_type` marks a non-body-bearing exchange (redirect,
/// navigation without content) that passes through verbatim.
#[derive(Debug, Clone)]
pub struct InterceptedExchange {
    /// Opaque token required to resume this exchange
    pub interception_id: String,
    /// Request URL
    pub url: String,
    /// DevTools resource type; empty when the exchange carries no body
    pub resource_type: String,
    /// Abort reason; empty means continue normally
    pub error_reason: String,
    /// Status code of the intercepted response, when known
    pub status_code: Option<u16>,
    /// Response headers in wire order
    pub headers: Headers,
    /// Whether this exchange is a top-level navigation
    pub is_navigation: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InterceptedParams {
    #[serde(default)]
    interception_id: String,
    request: RequestPayload,
    #[serde(default)]
    resource_type: String,
    #[serde(default)]
    response_error_reason: String,
    #[serde(default)]
    response_status_code: Option<u16>,
    #[serde(default)]
    response_headers: Headers,
    #[serde(default)]
    is_navigation_request: bool,
}

#[derive(Debug, Deserialize)]
struct RequestPayload {
    url: String,
}

impl InterceptedExchange {
    /// Parse an exchange out of raw event parameters.
    ///
    /// A payload that cannot be parsed is protocol-framing corruption and
    /// yields a fatal error; individually absent fields merely default.
    pub fn from_params(params: Value) -> Result<Self> {
        let raw: InterceptedParams = serde_json::from_value(params).map_err(|e| {
            Error::protocol(format!("malformed {} payload: {}", INTERCEPTED_EVENT, e))
        })?;

        Ok(Self {
            interception_id: raw.interception_id,
            url: raw.request.url,
            resource_type: raw.resource_type,
            error_reason: raw.response_error_reason,
            status_code: raw.response_status_code,
            headers: raw.response_headers,
            is_navigation: raw.is_navigation_request,
        })
    }
}
