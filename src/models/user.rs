use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The signed-in principal, as returned by the login endpoint and persisted
/// next to the token.
///
/// The profile is trusted as stored. It is not tied to the token's claims.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    #[serde(rename = "fullName", default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Everything else the server sent (id, email, ...).
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl UserProfile {
    /// Construct a profile with an optional name and role.
    pub fn new(full_name: Option<String>, role: Option<String>) -> Self {
        UserProfile {
            full_name,
            role,
            extra: HashMap::new(),
        }
    }

    /// Name shown in the header, with the same fallback the dashboard uses.
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("User")
    }

    /// Admins get the extra navigation items and edit affordances.
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some("admin")
    }

    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.role.is_none() && self.extra.is_empty()
    }
}
