// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Exchange records
//!
//! Bounded in-memory log of handled exchanges for post-run inspection.

use std::time::SystemTime;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// How an exchange was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeOutcome {
    /// Body mutated and a rebuilt response substituted
    Mutated,
    /// Resumed with the original response untouched
    PassThrough,
    /// URL outside the configured scope; chains skipped
    OutOfScope,
    /// Event carried no interception id
    MissingId,
    /// Body fetch failed; resumed untouched
    FetchFailed,
    /// Body decode failed; resumed untouched
    DecodeFailed,
    /// Mutation chain failed; resumed untouched
    MutationFailed,
}

/// Record of one handled exchange
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeRecord {
    /// Request URL
    pub url: String,
    /// DevTools resource type
    pub resource_type: String,
    /// How the exchange was resolved
    pub outcome: ExchangeOutcome,
    /// Decoded body length before mutation, when a body was fetched
    pub original_len: Option<usize>,
    /// Body length after mutation, when a mutated response was substituted
    pub final_len: Option<usize>,
    /// Whether the exchange was a top-level navigation
    pub is_navigation: bool,
    /// When the exchange was resolved
    pub timestamp: SystemTime,
}

/// Bounded log of handled exchanges.
///
/// Shared read-mostly across exchange tasks; oldest records are evicted
/// first once capacity is reached.
pub struct ExchangeLog {
    records: RwLock<Vec<ExchangeRecord>>,
    capacity: usize,
}

impl ExchangeLog {
    /// Create a log retaining at most `capacity` records
    pub fn new(capacity: usize) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            capacity,
        }
    }

    /// Append a record, evicting the oldest at capacity
    pub fn push(&self, record: ExchangeRecord) {
        let mut records = self.records.write();
        if records.len() >= self.capacity {
            records.remove(0);
        }
        records.push(record);
    }

    /// Snapshot of all records
    pub fn records(&self) -> Vec<ExchangeRecord> {
        self.records.read().clone()
    }

    /// Number of retained records
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Count records with a given outcome
    pub fn count(&self, outcome: ExchangeOutcome) -> usize {
        self.records
            .read()
            .iter()
            .filter(|r| r.outcome == outcome)
            .count()
    }

    /// Clear all records
    pub fn clear(&self) {
        self.records.write().clear();
    }

    /// Export records as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.records())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, outcome: ExchangeOutcome) -> ExchangeRecord {
        ExchangeRecord {
            url: url.to_string(),
            resource_type: "Document".to_string(),
            outcome,
            original_len: Some(5),
            final_len: None,
            is_navigation: false,
            timestamp: SystemTime::now(),
        }
    }

    #[test]
    fn test_push_and_count() {
        let log = ExchangeLog::new(10);
        log.push(record("https://a.example/", ExchangeOutcome::Mutated));
        log.push(record("https://b.example/", ExchangeOutcome::PassThrough));
        log.push(record("https://c.example/", ExchangeOutcome::Mutated));

        assert_eq!(log.len(), 3);
        assert_eq!(log.count(ExchangeOutcome::Mutated), 2);
        assert_eq!(log.count(ExchangeOutcome::FetchFailed), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let log = ExchangeLog::new(2);
        log.push(record("https://a.example/", ExchangeOutcome::Mutated));
        log.push(record("https://b.example/", ExchangeOutcome::Mutated));
        log.push(record("https://c.example/", ExchangeOutcome::Mutated));

        let urls: Vec<String> = log.records().into_iter().map(|r| r.url).collect();
        assert_eq!(urls, vec!["https://b.example/", "https://c.example/"]);
    }

    #[test]
    fn test_to_json() {
        let log = ExchangeLog::new(10);
        log.push(record("https://a.example/", ExchangeOutcome::DecodeFailed));

        let json = log.to_json().unwrap();
        assert!(json.contains("DecodeFailed"));
        assert!(json.contains("https://a.example/"));
    }
}
