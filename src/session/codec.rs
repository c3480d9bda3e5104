//! Reads session token claims without verifying the signature.
//!
//! Authenticity is the server's job. These functions only look at the payload
//! to decide whether a token is worth sending at all, and they never fail:
//! anything that cannot be read is reported as "no claims".

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::models::ClaimSet;

const PAYLOAD_CONFIG: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_encode_padding(false)
    .with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// base64url as issued by the server, padded or not.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, PAYLOAD_CONFIG);

/// Some issuers emit the standard alphabet; accept it too.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, PAYLOAD_CONFIG);

/// Decode the payload segment of `token` into its claims.
///
/// Returns `None` unless the token has exactly three non-empty `.`-separated
/// segments and the middle one decodes to a JSON object.
pub fn decode(token: &str) -> Option<ClaimSet> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        debug!(
            event_name = "session.token.malformed",
            segments = segments.len(),
            "token does not have three segments"
        );
        return None;
    }

    let payload = segments[1];
    let bytes = match URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
    {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!(event_name = "session.token.malformed", "payload is not base64: {}", e);
            return None;
        }
    };

    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Some(ClaimSet::new(claims)),
        Ok(_) => {
            debug!(event_name = "session.token.malformed", "payload is not a JSON object");
            None
        }
        Err(e) => {
            debug!(event_name = "session.token.malformed", "payload is not JSON: {}", e);
            None
        }
    }
}

/// True unless `token` carries a numeric `exp` that has not passed yet.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_seconds(), 0)
}

/// An absent token is expired.
pub fn is_expired_or_absent(token: Option<&str>) -> bool {
    token.map_or(true, is_expired)
}

/// Expiry check against an explicit clock. `exp + leeway` must be strictly
/// below `now` for the token to count as expired.
pub fn is_expired_at(token: &str, now: f64, leeway_seconds: u64) -> bool {
    match decode(token).as_ref().and_then(ClaimSet::exp) {
        Some(exp) => exp + (leeway_seconds as f64) < now,
        None => true,
    }
}

/// Current time in (fractional) seconds since the epoch.
pub fn now_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
