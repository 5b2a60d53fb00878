//! Credential inspection.
//!
//! The credential is a JWT captured from the platform's own login flow. Only
//! its subject claim is read here; the signature is never checked, so nothing
//! in this module may be used to decide whether a caller is authorized. That
//! is established solely by the session's authentication probe.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<JsonValue>,
}

/// Extract the `sub` claim from a JWT without verifying its signature.
pub fn decode_subject_unverified(credential: &str) -> Result<String> {
    let segments: Vec<&str> = credential.trim().split('.').collect();
    if segments.len() != 3 {
        return Err(Error::MalformedCredential(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    }

    let payload = URL_SAFE_NO_PAD
        .decode(segments[1].trim_end_matches('='))
        .map_err(|e| Error::MalformedCredential(format!("payload is not base64url: {}", e)))?;

    let claims: Claims = serde_json::from_slice(&payload)
        .map_err(|e| Error::MalformedCredential(format!("payload is not JSON: {}", e)))?;

    match claims.sub {
        Some(JsonValue::String(sub)) if !sub.is_empty() => Ok(sub),
        Some(JsonValue::Number(sub)) => Ok(sub.to_string()),
        _ => Err(Error::MalformedCredential(
            "missing subject claim".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_numeric_subject() {
        let jwt = token(r#"{"sub":123456,"iat":1}"#);
        assert_eq!(decode_subject_unverified(&jwt).unwrap(), "123456");
    }

    #[test]
    fn test_string_subject() {
        let jwt = token(r#"{"sub":"abc"}"#);
        assert_eq!(decode_subject_unverified(&jwt).unwrap(), "abc");
    }

    #[test]
    fn test_padded_payload_accepted() {
        let jwt = format!(
            "h.{}==.s",
            URL_SAFE_NO_PAD.encode(r#"{"sub":1}"#)
        );
        assert_eq!(decode_subject_unverified(&jwt).unwrap(), "1");
    }

    #[test]
    fn test_missing_subject() {
        let jwt = token(r#"{"iat":1}"#);
        assert!(matches!(
            decode_subject_unverified(&jwt),
            Err(Error::MalformedCredential(_))
        ));
    }

    #[test]
    fn test_wrong_segment_count() {
        assert!(matches!(
            decode_subject_unverified("not-a-jwt"),
            Err(Error::MalformedCredential(_))
        ));
    }

    #[test]
    fn test_payload_not_json() {
        let jwt = format!("h.{}.s", URL_SAFE_NO_PAD.encode("plain text"));
        assert!(matches!(
            decode_subject_unverified(&jwt),
            Err(Error::MalformedCredential(_))
        ));
    }
}
