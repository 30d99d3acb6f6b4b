// File: inklined-core/src/platforms/stripe/webhook.rs
//
// Stripe signs webhook deliveries with an HMAC-SHA256 over
// "{timestamp}.{raw body}" and sends the result in the
// `stripe-signature` header as `t=timestamp,v1=signature`.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::Error;

/// Replay window for the signed timestamp.
const TOLERANCE_SECS: i64 = 300;

/// Parses the `t=timestamp,v1=signature` header into its two parts.
pub fn parse_signature_header(signature: &str) -> Result<(i64, String), Error> {
    let mut timestamp: Option<i64> = None;
    let mut v1_signature: Option<String> = None;

    for part in signature.split(',') {
        let kv: Vec<&str> = part.splitn(2, '=').collect();
        if kv.len() != 2 {
            continue;
        }

        match kv[0] {
            "t" => timestamp = kv[1].parse().ok(),
            "v1" => v1_signature = Some(kv[1].to_string()),
            _ => {}
        }
    }

    match (timestamp, v1_signature) {
        (Some(t), Some(v1)) => Ok((t, v1)),
        _ => Err(Error::SignatureVerification(
            "invalid signature header format".to_string(),
        )),
    }
}

/// Verifies a webhook delivery against the endpoint secret.
///
/// The payload must be the raw request body, byte for byte; parsing and
/// re-serializing it first would break the check. Comparison is
/// constant-time, and timestamps outside the tolerance window are rejected
/// to limit replays.
pub fn verify_signature(payload: &[u8], signature: &str, secret: &str) -> Result<(), Error> {
    let (timestamp, v1_sig) = parse_signature_header(signature)?;

    let now = chrono::Utc::now().timestamp();
    if (now - timestamp).abs() > TOLERANCE_SECS {
        return Err(Error::SignatureVerification(
            "timestamp outside tolerance window".to_string(),
        ));
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .map_err(|_| Error::SignatureVerification("invalid secret key".to_string()))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    let expected = hex::encode(mac.finalize().into_bytes());

    if bool::from(expected.as_bytes().ct_eq(v1_sig.as_bytes())) {
        Ok(())
    } else {
        Err(Error::SignatureVerification(
            "signature mismatch".to_string(),
        ))
    }
}

#[cfg(test)]
pub(crate) fn sign_payload(payload: &[u8], secret: &str, timestamp: i64) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    format!("t={},v1={}", timestamp, hex::encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    #[test]
    fn parse_signature_header_splits_parts() {
        let (t, v1) = parse_signature_header("t=1609459200,v1=abcdef1234567890").unwrap();
        assert_eq!(t, 1609459200);
        assert_eq!(v1, "abcdef1234567890");
    }

    #[test]
    fn parse_signature_header_rejects_garbage() {
        assert!(parse_signature_header("invalid").is_err());
        assert!(parse_signature_header("t=123").is_err());
        assert!(parse_signature_header("v1=abc").is_err());
    }

    #[test]
    fn valid_signature_verifies() {
        let body = br#"{"id":"evt_1","type":"checkout.session.completed"}"#;
        let now = chrono::Utc::now().timestamp();
        let header = sign_payload(body, SECRET, now);
        assert!(verify_signature(body, &header, SECRET).is_ok());
    }

    #[test]
    fn single_byte_tamper_fails() {
        let body = br#"{"id":"evt_1","type":"checkout.session.completed"}"#.to_vec();
        let now = chrono::Utc::now().timestamp();
        let header = sign_payload(&body, SECRET, now);

        let mut tampered = body.clone();
        tampered[10] ^= 0x01;
        assert!(verify_signature(&tampered, &header, SECRET).is_err());
    }

    #[test]
    fn wrong_secret_fails() {
        let body = b"payload";
        let now = chrono::Utc::now().timestamp();
        let header = sign_payload(body, SECRET, now);
        assert!(verify_signature(body, &header, "whsec_other").is_err());
    }

    #[test]
    fn stale_timestamp_fails() {
        let body = b"payload";
        let stale = chrono::Utc::now().timestamp() - TOLERANCE_SECS - 10;
        let header = sign_payload(body, SECRET, stale);
        assert!(verify_signature(body, &header, SECRET).is_err());
    }
}
