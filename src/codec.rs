// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Wire body codec
//!
//! DevTools carries response bodies inside JSON messages, base64-encoded
//! whenever the payload is not plain text. Decoding is strict: a body that
//! does not survive base64 + UTF-8 validation never reaches the plugin
//! chains.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;

use crate::error::{Error, Result};

/// Decode a wire body into text.
///
/// When `base64_encoded` is false the input is already text and is returned
/// unchanged. Otherwise the body is base64-decoded and validated as UTF-8;
/// either failure yields a typed error and the caller must treat the body as
/// unusable rather than partially decoded.
pub fn decode(wire_body: &str, base64_encoded: bool) -> Result<String> {
    if !base64_encoded {
        return Ok(wire_body.to_string());
    }

    let bytes = decode_bytes(wire_body)?;
    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::decode(format!("decoded body is not valid UTF-8: {}", e)))
}

/// Decode a base64 wire body into raw bytes
pub fn decode_bytes(wire_body: &str) -> Result<Bytes> {
    STANDARD
        .decode(wire_body)
        .map(Bytes::from)
        .map_err(|e| Error::decode(format!("invalid base64 body: {}", e)))
}

/// Encode raw response bytes into the wire encoding
pub fn encode(raw: impl AsRef<[u8]>) -> String {
    STANDARD.encode(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unencoded_passthrough() {
        let body = "<html>hello</html>";
        assert_eq!(decode(body, false).unwrap(), body);
    }

    #[test]
    fn test_round_trip() {
        let original = "body with unicode: päätä ☂";
        let wire = encode(original);
        assert_eq!(decode(&wire, true).unwrap(), original);
    }

    #[test]
    fn test_round_trip_empty() {
        assert_eq!(decode(&encode(""), true).unwrap(), "");
    }

    #[test]
    fn test_round_trip_arbitrary_bytes() {
        let original: Vec<u8> = (0..=255).collect();
        let wire = encode(&original);
        assert_eq!(decode_bytes(&wire).unwrap().as_ref(), &original[..]);
    }

    #[test]
    fn test_invalid_base64_fails_typed() {
        let err = decode("not//valid==base64!!", true).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_non_utf8_fails_typed() {
        // 0xFF 0xFE is never valid UTF-8
        let wire = encode([0xFF, 0xFE, 0x00]);
        let err = decode(&wire, true).unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
        // the raw bytes are still reachable for callers that want them
        assert_eq!(decode_bytes(&wire).unwrap().as_ref(), &[0xFF, 0xFE, 0x00]);
    }
}
