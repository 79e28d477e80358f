// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Raw HTTP response reconstruction
//!
//! When a mutated body is substituted for the original, the browser receives
//! a complete raw response over the resume command. The rebuild keeps the
//! original headers in wire order and recomputes the two that a body swap
//! invalidates: `Content-Length` and `Date`.

use chrono::Utc;

use super::Headers;
use crate::codec;

/// Rebuild a raw HTTP response around a mutated body.
///
/// The status line uses the intercepted status code when the event carried
/// one. `Content-Length` is rewritten to the exact byte length of the new
/// body and `Date` to the current time in IMF-fixdate format; all other
/// headers pass through unchanged, in original order.
pub fn rebuild(status_code: u16, headers: &Headers, body: &str) -> String {
    let mut raw = format!("HTTP/1.1 {} {}\r\n", status_code, reason_phrase(status_code));

    for (name, value) in headers.iter() {
        let value = match name.to_ascii_lowercase().as_str() {
            "content-length" => body.len().to_string(),
            "date" => http_date_now(),
            _ => value.clone(),
        };
        raw.push_str(name);
        raw.push_str(": ");
        raw.push_str(&value);
        raw.push_str("\r\n");
    }

    raw.push_str("\r\n");
    raw.push_str(body);
    raw
}

/// Rebuild and encode into the wire encoding expected by the resume command
pub fn rebuild_encoded(status_code: u16, headers: &Headers, body: &str) -> String {
    codec::encode(rebuild(status_code, headers, body))
}

/// Current time formatted as an RFC 7231 IMF-fixdate (e.g.
/// `Sun, 06 Nov 1994 08:49:37 GMT`)
pub fn http_date_now() -> String {
    Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Canonical reason phrase for a status code.
///
/// Unknown codes get an empty phrase, which HTTP permits.
pub fn reason_phrase(status_code: u16) -> &'static str {
    match status_code {
        100 => "Continue",
        101 => "Switching Protocols",
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        206 => "Partial Content",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        410 => "Gone",
        418 => "I'm a teapot",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        let raw = rebuild(200, &Headers::new(), "");
        assert!(raw.starts_with("HTTP/1.1 200 OK\r\n"));

        let raw = rebuild(404, &Headers::new(), "");
        assert!(raw.starts_with("HTTP/1.1 404 Not Found\r\n"));
    }

    #[test]
    fn test_content_length_recomputed() {
        let headers = Headers::from_pairs([("Content-Length", "2")]);
        let raw = rebuild(200, &headers, "hello world");

        assert!(raw.contains("Content-Length: 11\r\n"));
        assert!(!raw.contains("Content-Length: 2\r\n"));
    }

    #[test]
    fn test_content_length_counts_bytes_not_chars() {
        let headers = Headers::from_pairs([("content-length", "0")]);
        // "päätä" is 5 chars but 7 bytes in UTF-8
        let raw = rebuild(200, &headers, "päätä");

        assert!(raw.contains("content-length: 7\r\n"));
    }

    #[test]
    fn test_date_replaced() {
        let headers = Headers::from_pairs([("Date", "Mon, 01 Jan 1990 00:00:00 GMT")]);
        let raw = rebuild(200, &headers, "x");

        assert!(!raw.contains("1990"));
        // fresh stamp carries the fixdate GMT suffix
        let date_line = raw
            .lines()
            .find(|l| l.starts_with("Date: "))
            .expect("date header present");
        assert!(date_line.ends_with("GMT"));
    }

    #[test]
    fn test_other_headers_pass_through_in_order() {
        let headers = Headers::from_pairs([
            ("Server", "nginx"),
            ("Content-Type", "text/html"),
            ("X-Custom", "kept"),
        ]);
        let raw = rebuild(200, &headers, "body");

        let server = raw.find("Server: nginx").unwrap();
        let ctype = raw.find("Content-Type: text/html").unwrap();
        let custom = raw.find("X-Custom: kept").unwrap();
        assert!(server < ctype && ctype < custom);
    }

    #[test]
    fn test_blank_line_separates_body() {
        let headers = Headers::from_pairs([("Content-Type", "text/plain")]);
        let raw = rebuild(200, &headers, "payload");

        assert!(raw.ends_with("\r\n\r\npayload"));
    }

    #[test]
    fn test_rebuild_encoded_round_trips() {
        let headers = Headers::from_pairs([("Content-Length", "5")]);
        let wire = rebuild_encoded(200, &headers, "hello");
        let raw = crate::codec::decode(&wire, true).unwrap();

        assert!(raw.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(raw.ends_with("\r\n\r\nhello"));
    }

    #[test]
    fn test_unknown_status_gets_empty_phrase() {
        let raw = rebuild(599, &Headers::new(), "");
        assert!(raw.starts_with("HTTP/1.1 599 \r\n"));
    }

    #[test]
    fn test_http_date_format() {
        let stamp = http_date_now();
        // e.g. "Fri, 07 Aug 2026 12:00:00 GMT"
        assert_eq!(stamp.len(), 29);
        assert!(stamp.ends_with(" GMT"));
        assert_eq!(&stamp[3..5], ", ");
    }
}
