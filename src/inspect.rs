//! Token inspection: decode the header and payload segments and render
//! the common claims in a human-readable form, without verifying
//! anything.

use chrono::DateTime;
use serde_json::Value;

use crate::codec;
use crate::error::{Error, Result};

/// Decodes both JSON segments of `token` and renders a claim summary.
///
/// The signature segment is echoed as-is; no verification happens here.
pub fn describe(token: &str) -> Result<String> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(Error::MalformedToken(format!(
            "expected 3 dot-separated segments, got {}",
            parts.len()
        )));
    }

    let header = decode_json(parts[0], "header")?;
    let payload = decode_json(parts[1], "payload")?;

    let mut out = String::new();
    out.push_str(&format!("📦 Loaded JWT token:\n{token}\n\n"));

    out.push_str("🔐 Header:\n");
    if let Some(alg) = header.get("alg") {
        out.push_str(&format!("Algorithm: {alg}\n"));
    }
    out.push('\n');

    out.push_str("📄 Payload:\n");
    for (label, claim) in [
        ("Subject", "sub"),
        ("Roles", "roles"),
        ("ID", "id"),
        ("Issuer", "iss"),
    ] {
        if let Some(value) = payload.get(claim) {
            out.push_str(&format!("{label}: {value}\n"));
        }
    }
    for (label, claim) in [("Created", "iat"), ("Expired", "exp")] {
        if let Some(ts) = payload.get(claim).and_then(Value::as_i64) {
            out.push_str(&format!("{label}: {ts} /// {}\n", format_time(ts)));
        }
    }

    out.push_str(&format!("\n✍️ Signature (raw base64url):\n{}\n", parts[2]));
    Ok(out)
}

fn decode_json(segment: &str, which: &str) -> Result<Value> {
    let bytes = codec::decode(segment)
        .map_err(|e| Error::MalformedToken(format!("{which} segment: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| Error::MalformedToken(format!("{which} is not valid JSON: {e}")))
}

fn format_time(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "out of range".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload_json: &[u8]) -> String {
        let header = codec::encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = codec::encode(payload_json);
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    #[test]
    fn test_describe_renders_header_and_claims() {
        let token =
            token_with_payload(br#"{"sub":"admin","roles":["root"],"iss":"auth-svc"}"#);
        let text = describe(&token).unwrap();

        assert!(text.contains("Algorithm: \"HS256\""));
        assert!(text.contains("Subject: \"admin\""));
        assert!(text.contains("Roles: [\"root\"]"));
        assert!(text.contains("Issuer: \"auth-svc\""));
        assert!(text.contains("✍️ Signature (raw base64url):\nc2lnbmF0dXJl"));
        // Claims absent from the payload are not rendered.
        assert!(!text.contains("ID:"));
        assert!(!text.contains("Created:"));
    }

    #[test]
    fn test_describe_formats_timestamps_as_utc() {
        let token = token_with_payload(br#"{"sub":"x","iat":0,"exp":1893456000}"#);
        let text = describe(&token).unwrap();

        assert!(text.contains("Created: 0 /// 1970-01-01 00:00:00"));
        assert!(text.contains("Expired: 1893456000 /// 2030-01-01 00:00:00"));
    }

    #[test]
    fn test_describe_rejects_non_json_segments() {
        assert!(matches!(
            describe("bm90LWpzb24.bm90LWpzb24.sig"),
            Err(Error::MalformedToken(_))
        ));
    }

    #[test]
    fn test_describe_rejects_wrong_segment_count() {
        assert!(matches!(
            describe("only.two"),
            Err(Error::MalformedToken(_))
        ));
    }
}
