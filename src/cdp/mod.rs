// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Chrome DevTools Protocol transport
//!
//! A minimal CDP client (WebSocket, JSON-RPC command/response correlation,
//! event channel) and the debugger session that drives response
//! interception on top of it. The interception pipeline itself only knows
//! the [`InterceptTransport`] trait, so it can run against any transport.

mod client;
mod event;
mod session;
mod transport;

pub use client::{CdpClient, CdpEvent, CdpResponse, CdpResponseError};
pub use event::{InterceptedExchange, INTERCEPTED_EVENT};
pub use session::{DebuggerSession, SessionTransport};
pub use transport::{FetchedBody, InterceptTransport, Resumption};
