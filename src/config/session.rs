use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Session and navigation policy.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(default)]
pub struct SessionConfig {
    /// Unauthenticated entry view.
    pub login_path: String,
    /// Views reachable without a session. Everything else is protected.
    pub public_paths: Vec<String>,
    /// Tolerance added to `exp` before a token counts as expired.
    pub leeway_seconds: u64,
    /// Append `?reason=...` to the login path on teardown.
    pub redirect_reason: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            login_path: "/login".to_string(),
            public_paths: vec!["/login".to_string()],
            leeway_seconds: 0,
            redirect_reason: false,
        }
    }
}
