// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP header and raw-response handling
//!
//! Minimal HTTP surface for response reconstruction: an ordered header map
//! and the raw response builder used when resuming mutated exchanges.

mod headers;
mod response;

pub use headers::Headers;
pub use response::{http_date_now, reason_phrase, rebuild, rebuild_encoded};
