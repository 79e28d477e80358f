// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Stock plugins
//!
//! Ready-to-register mutators and analyzers covering the common cases:
//! script injection, literal body rewriting, traffic logging and a
//! security-header audit. Also serve as reference implementations of the
//! plugin traits.

use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::Regex;

use crate::error::Result;
use crate::plugin::{Analyzer, Mutator, WebData};

lazy_static! {
    static ref HEAD_CLOSE: Regex = Regex::new(r"(?i)</head\s*>").unwrap();
    static ref BODY_CLOSE: Regex = Regex::new(r"(?i)</body\s*>").unwrap();
}

/// Mutator that injects a script tag into document responses.
///
/// The tag lands just before `</head>`, falling back to `</body>`, falling
/// back to appending. Non-document responses pass through untouched.
pub struct ScriptInjector {
    tag: String,
}

impl ScriptInjector {
    /// Inject an external script by source URL
    pub fn external(src: impl AsRef<str>) -> Self {
        Self {
            tag: format!(r#"<script src="{}"></script>"#, src.as_ref()),
        }
    }

    /// Inject inline script text
    pub fn inline(js: impl AsRef<str>) -> Self {
        Self {
            tag: format!("<script>{}</script>", js.as_ref()),
        }
    }
}

#[async_trait]
impl Mutator for ScriptInjector {
    async fn mutate(&self, data: &WebData) -> Result<String> {
        if !data.is_document() {
            return Ok(data.body.clone());
        }

        let anchor = HEAD_CLOSE
            .find(&data.body)
            .or_else(|| BODY_CLOSE.find(&data.body));

        match anchor {
            Some(m) => {
                let mut body = String::with_capacity(data.body.len() + self.tag.len());
                body.push_str(&data.body[..m.start()]);
                body.push_str(&self.tag);
                body.push_str(&data.body[m.start()..]);
                Ok(body)
            }
            None => Ok(format!("{}{}", data.body, self.tag)),
        }
    }
}

/// Mutator that replaces every occurrence of a literal string
pub struct BodyRewriter {
    find: String,
    replace: String,
}

impl BodyRewriter {
    /// Create a rewriter replacing `find` with `replace`
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }
}

#[async_trait]
impl Mutator for BodyRewriter {
    async fn mutate(&self, data: &WebData) -> Result<String> {
        // an empty needle would splice the replacement between every char
        if self.find.is_empty() {
            return Ok(data.body.clone());
        }
        Ok(data.body.replace(&self.find, &self.replace))
    }
}

/// Analyzer that logs each observed response
pub struct TrafficLogger {
    /// Log response bodies at debug level
    pub log_bodies: bool,
    /// Only log URLs containing this substring
    pub url_filter: Option<String>,
}

impl Default for TrafficLogger {
    fn default() -> Self {
        Self {
            log_bodies: false,
            url_filter: None,
        }
    }
}

#[async_trait]
impl Analyzer for TrafficLogger {
    async fn observe(&self, data: &WebData) -> Result<()> {
        if let Some(ref filter) = self.url_filter {
            if !data.url.contains(filter) {
                return Ok(());
            }
        }

        let host = url::Url::parse(&data.url)
            .ok()
            .and_then(|u| u.host_str().map(String::from))
            .unwrap_or_default();

        tracing::info!(
            url = %data.url,
            host = %host,
            resource_type = %data.resource_type,
            bytes = data.body.len(),
            "Response observed"
        );

        if self.log_bodies {
            tracing::debug!(body = %data.body, "Response body");
        }

        Ok(())
    }
}

/// A response missing a security header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingHeader {
    pub url: String,
    pub header: String,
}

/// Headers every document response is expected to carry
const AUDITED_HEADERS: &[&str] = &[
    "content-security-policy",
    "strict-transport-security",
    "x-content-type-options",
    "x-frame-options",
];

/// Analyzer that records document responses missing standard security headers
pub struct HeaderAudit {
    /// Accumulated findings
    pub findings: Arc<RwLock<Vec<MissingHeader>>>,
}

impl Default for HeaderAudit {
    fn default() -> Self {
        Self {
            findings: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl HeaderAudit {
    /// Create a new audit analyzer
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the findings so far
    pub fn findings(&self) -> Vec<MissingHeader> {
        self.findings.read().clone()
    }
}

#[async_trait]
impl Analyzer for HeaderAudit {
    async fn observe(&self, data: &WebData) -> Result<()> {
        if !data.is_document() {
            return Ok(());
        }

        for header in AUDITED_HEADERS {
            if !data.headers.contains(header) {
                tracing::debug!(url = %data.url, header = header, "Missing security header");
                self.findings.write().push(MissingHeader {
                    url: data.url.clone(),
                    header: header.to_string(),
                });
            }
        }

        Ok(())
    }
}
