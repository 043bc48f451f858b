//! Boundary with the external JWT verifier
//!
//! The verifier (any JOSE library) checks the signature and hands over the
//! decoded payload. `VerifiedClaims` keeps the registered claims the token
//! model needs and shares everything else as one private-claims map.

use std::sync::Arc;

use serde_json::{Map, Value};

/// Registered JWT claims; everything else is a private claim.
const REGISTERED_CLAIMS: &[&str] = &["iss", "sub", "aud", "exp", "nbf", "iat", "jti"];

/// Claims of an already-verified token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerifiedClaims {
    pub issuer: String,
    pub subject: String,
    /// Unix seconds
    pub expiration: i64,
    pub private_claims: Arc<Map<String, Value>>,
}

impl VerifiedClaims {
    /// Split a verified payload into registered and private claims.
    ///
    /// Returns `None` if the payload is not a JSON object. Missing or
    /// mistyped registered claims default to empty/zero.
    pub fn from_payload(payload: Value) -> Option<Self> {
        let Value::Object(mut map) = payload else {
            return None;
        };

        let issuer = take_string(&mut map, "iss");
        let subject = take_string(&mut map, "sub");
        let expiration = map.get("exp").and_then(as_unix_seconds).unwrap_or(0);
        for key in REGISTERED_CLAIMS {
            map.remove(*key);
        }

        Some(Self {
            issuer,
            subject,
            expiration,
            private_claims: Arc::new(map),
        })
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> String {
    match map.remove(key) {
        Some(Value::String(s)) => s,
        _ => String::new(),
    }
}

// exp may arrive as an integer or a float
fn as_unix_seconds(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
}
