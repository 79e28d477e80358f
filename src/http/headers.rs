// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Ordered response header map

use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Response headers preserving wire order.
///
/// DevTools delivers response headers as a JSON object; the order in which
/// the browser observed them is kept so a reconstructed response emits them
/// unchanged. Lookups are case-insensitive per HTTP semantics, comparison
/// happens at lookup time only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    /// Create an empty header map
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from name/value pairs, keeping the given order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Get a header value, case-insensitively
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Check for a header, case-insensitively
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append a header pair
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Iterate pairs in wire order
    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.0.iter()
    }

    /// Number of header pairs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Headers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Headers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeadersVisitor;

        impl<'de> Visitor<'de> for HeadersVisitor {
            type Value = Headers;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of header names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Headers, A::Error> {
                let mut pairs = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, value)) = access.next_entry::<String, Value>()? {
                    // Non-string values show up when headers were folded by
                    // the browser; stringify rather than reject.
                    let value = match value {
                        Value::String(s) => s,
                        other => other.to_string(),
                    };
                    pairs.push((name, value));
                }
                Ok(Headers(pairs))
            }
        }

        deserializer.deserialize_map(HeadersVisitor)
    }
}

impl FromIterator<(String, String)> for Headers {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_get() {
        let headers = Headers::from_pairs([("Content-Type", "text/html")]);

        assert_eq!(headers.get("content-type"), Some("text/html"));
        assert_eq!(headers.get("CONTENT-TYPE"), Some("text/html"));
        assert!(headers.contains("Content-type"));
        assert!(!headers.contains("content-length"));
    }

    #[test]
    fn test_order_preserved() {
        let headers = Headers::from_pairs([
            ("Server", "nginx"),
            ("Content-Type", "text/html"),
            ("Date", "old"),
        ]);

        let names: Vec<&str> = headers.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["Server", "Content-Type", "Date"]);
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let json = r#"{"Content-Type": "text/html", "Content-Length": "5"}"#;
        let headers: Headers = serde_json::from_str(json).unwrap();

        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("content-length"), Some("5"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let headers = Headers::from_pairs([("X-One", "1"), ("X-Two", "2")]);
        let json = serde_json::to_string(&headers).unwrap();
        let back: Headers = serde_json::from_str(&json).unwrap();

        assert_eq!(headers, back);
    }
}
