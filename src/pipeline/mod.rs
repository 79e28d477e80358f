// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interception pipeline
//!
//! Per intercepted exchange: fetch and decode the body, detach the
//! observation chain, run the mutation chain, rebuild the raw response and
//! resume the exchange exactly once. Every failure short of protocol
//! corruption resolves to a pass-through resume so the browser is never
//! left waiting.

mod handler;
mod mutation;
mod observation;
mod record;

pub use handler::InterceptionHandler;
pub use mutation::run_chain;
pub use observation::dispatch;
pub use record::{ExchangeLog, ExchangeOutcome, ExchangeRecord};
