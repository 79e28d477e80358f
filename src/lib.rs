// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # Mustekala - DevTools Response Interception Engine
//!
//! Intercepts HTTP(S) responses flowing through a Chrome/Chromium instance
//! over the DevTools protocol, runs each body through pluggable analyzer
//! and mutator chains, and resumes the exchange with the rewritten content.
//! Built for security testing and content injection.
//!
//! ## Features
//!
//! - Response interception: pause, rewrite, resume on live browser traffic
//! - Mutation chains: ordered body rewriters with fail-safe pass-through
//! - Analyzers: detached observers that can never stall the network layer
//! - Protocol-correct rebuilds: content-length and date recomputed
//! - Scope filtering: regex-restrict which URLs get processed
//! - Exchange log: bounded record of every handled exchange
//! - Stock plugins: script injection, body rewriting, traffic logging,
//!   security-header audit
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use mustekala::{
//!     BodyRewriter, DebuggerSession, InterceptConfig, InterceptionHandler, PluginRegistry,
//!     TrafficLogger,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = PluginRegistry::new()
//!         .with_mutator("rewriter", BodyRewriter::new("Example Domain", "Intercepted"))
//!         .with_analyzer("logger", TrafficLogger::default());
//!
//!     let config = InterceptConfig::default();
//!     let mut session = DebuggerSession::connect("ws://localhost:9222/devtools/page/ABC").await?;
//!     session.attach(&config).await?;
//!
//!     let transport = Arc::new(session.transport());
//!     let handler = Arc::new(InterceptionHandler::new(transport, Arc::new(registry), config));
//!     session.run(handler).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod cdp;
pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod plugin;

// Re-exports for convenience

// Errors
pub use error::{Error, Result};

// Configuration
pub use config::InterceptConfig;

// HTTP surface
pub use http::Headers;

// Transport
pub use cdp::{
    CdpClient, CdpEvent, DebuggerSession, FetchedBody, InterceptTransport, InterceptedExchange,
    Resumption, SessionTransport,
};

// Pipeline
pub use pipeline::{ExchangeLog, ExchangeOutcome, ExchangeRecord, InterceptionHandler};

// Plugins
pub use plugin::{
    Analyzer, BodyRewriter, HeaderAudit, MissingHeader, Mutator, NamedAnalyzer, NamedMutator,
    PluginRegistry, ScriptInjector, TrafficLogger, WebData,
};

/// Mustekala version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
