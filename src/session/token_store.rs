use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::SessionError;
use crate::models::UserProfile;
use crate::store::Storage;

/// Slot holding the raw token string.
pub const TOKEN_KEY: &str = "token";
/// Slot holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// The only reader and writer of persisted session state.
#[derive(Clone)]
pub struct TokenStore {
    storage: Arc<dyn Storage>,
}

impl TokenStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        TokenStore { storage }
    }

    /// The stored token, if any. Read failures count as "no token".
    pub fn get_token(&self) -> Option<String> {
        match self.storage.get_item(TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => Some(token),
            Ok(_) => None,
            Err(e) => {
                warn!("Failed to read the session token: {}", e);
                None
            }
        }
    }

    /// The stored profile, or the empty profile when nothing usable is stored.
    pub fn get_user(&self) -> UserProfile {
        let raw = match self.storage.get_item(USER_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return UserProfile::default(),
            Err(e) => {
                warn!("Failed to read the user profile: {}", e);
                return UserProfile::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            debug!("Stored user profile is not valid JSON: {}", e);
            UserProfile::default()
        })
    }

    /// Persist a fresh session. The two slots are written one after the
    /// other; a failure on the second leaves the token in place.
    pub fn set_session(&self, token: &str, user: &UserProfile) -> Result<(), SessionError> {
        let user = serde_json::to_string(user)?;
        self.storage.set_item(TOKEN_KEY, token)?;
        self.storage.set_item(USER_KEY, &user)?;
        Ok(())
    }

    /// Remove both slots. Safe to call on an empty store; never fails.
    pub fn clear_session(&self) {
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                warn!("Failed to clear session slot '{}': {}", key, e);
            }
        }
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_persistent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn store() -> (Arc<MemoryStore>, TokenStore) {
        let storage = Arc::new(MemoryStore::new());
        (storage.clone(), TokenStore::new(storage))
    }

    #[test]
    fn test_empty_store() {
        let (_, tokens) = store();
        assert_eq!(tokens.get_token(), None);
        assert_eq!(tokens.get_user(), UserProfile::default());
    }

    #[test]
    fn test_set_and_read_session() {
        let (storage, tokens) = store();
        let user = UserProfile::new(Some("Asha".to_string()), Some("admin".to_string()));
        tokens.set_session("h.p.s", &user).expect("set_session");

        assert_eq!(tokens.get_token().as_deref(), Some("h.p.s"));
        assert_eq!(tokens.get_user(), user);
        assert_eq!(storage.len(), 2);
    }

    #[test]
    fn test_unparsable_profile_reads_as_empty() {
        let (storage, tokens) = store();
        storage.set_item(USER_KEY, "{not json").unwrap();
        assert_eq!(tokens.get_user(), UserProfile::default());
    }

    #[test]
    fn test_empty_token_slot_is_absent() {
        let (storage, tokens) = store();
        storage.set_item(TOKEN_KEY, "").unwrap();
        assert_eq!(tokens.get_token(), None);
    }

    #[test]
    fn test_clear_session_is_idempotent() {
        let (storage, tokens) = store();
        tokens
            .set_session("h.p.s", &UserProfile::default())
            .expect("set_session");

        tokens.clear_session();
        tokens.clear_session();

        assert!(storage.is_empty());
        assert_eq!(tokens.get_token(), None);
    }

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, SessionError> {
            Err(std::io::Error::other("disk on fire").into())
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), SessionError> {
            Err(std::io::Error::other("disk on fire").into())
        }
        fn remove_item(&self, _key: &str) -> Result<(), SessionError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    #[test]
    fn test_backend_failures_never_escape_reads_or_clear() {
        let tokens = TokenStore::new(Arc::new(BrokenStorage));
        assert_eq!(tokens.get_token(), None);
        assert_eq!(tokens.get_user(), UserProfile::default());
        tokens.clear_session();
        assert!(tokens
            .set_session("h.p.s", &UserProfile::default())
            .is_err());
    }
}
