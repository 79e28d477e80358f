// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Interception configuration

use regex::Regex;

use crate::error::{Error, Result};

/// Configuration for an interception session
#[derive(Debug, Clone)]
pub struct InterceptConfig {
    /// URL patterns to intercept (DevTools wildcard syntax)
    pub patterns: Vec<String>,
    /// Only run plugin chains on URLs matching this scope
    pub scope: Option<Regex>,
    /// Log every raw event received from the browser
    pub verbose: bool,
    /// Maximum exchange records to retain
    pub log_capacity: usize,
}

impl Default for InterceptConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["*".to_string()],
            scope: None,
            verbose: false,
            log_capacity: 1000,
        }
    }
}

impl InterceptConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the interception URL patterns
    pub fn patterns(mut self, patterns: Vec<String>) -> Self {
        self.patterns = patterns;
        self
    }

    /// Restrict plugin chains to URLs matching a scope regex
    pub fn scope(mut self, scope: Regex) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Compile and set a scope regex from a pattern string
    pub fn scope_pattern(self, pattern: &str) -> Result<Self> {
        let scope = Regex::new(pattern)
            .map_err(|e| Error::config(format!("invalid scope pattern '{}': {}", pattern, e)))?;
        Ok(self.scope(scope))
    }

    /// Enable verbose event logging
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the exchange log capacity
    pub fn log_capacity(mut self, capacity: usize) -> Self {
        self.log_capacity = capacity;
        self
    }

    /// Check whether a URL is in scope for plugin processing.
    ///
    /// No scope means everything is in scope.
    pub fn in_scope(&self, url: &str) -> bool {
        self.scope.as_ref().map_or(true, |re| re.is_match(url))
    }
}
