use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The decoded payload of a session token.
///
/// Nothing here is verified: the server is the only party that checks
/// signatures. The client reads claims for gating decisions only.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ClaimSet {
    claims: Map<String, Value>,
}

impl ClaimSet {
    pub fn new(claims: Map<String, Value>) -> Self {
        ClaimSet { claims }
    }

    /// The `exp` claim in seconds since the epoch, if present and numeric.
    pub fn exp(&self) -> Option<f64> {
        self.claims.get("exp").and_then(Value::as_f64)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.claims.contains_key(name)
    }

    pub fn subject(&self) -> Option<&str> {
        self.claims.get("sub").and_then(Value::as_str)
    }

    pub fn role(&self) -> Option<&str> {
        self.claims.get("role").and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}
