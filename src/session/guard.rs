use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use super::codec::{self, now_seconds};
use super::token_store::TokenStore;
use crate::config::SessionConfig;
use crate::errors::SessionError;
use crate::models::{ClaimSet, UserProfile};
use crate::navigation::Navigator;

/// Why a session was torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The user asked to sign out.
    UserInitiated,
    /// A route check found the token past its `exp`, or unreadable.
    Expired,
    /// The server answered a request with an authorization rejection.
    Rejected,
}

impl LogoutReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoutReason::UserInitiated => "logout",
            LogoutReason::Expired => "expired",
            LogoutReason::Rejected => "unauthorized",
        }
    }
}

impl fmt::Display for LogoutReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides whether the client holds a usable session, and owns the one
/// teardown path every trigger goes through.
pub struct SessionGuard {
    store: TokenStore,
    navigator: Arc<dyn Navigator>,
    config: SessionConfig,
}

impl SessionGuard {
    pub fn new(store: TokenStore, navigator: Arc<dyn Navigator>, config: SessionConfig) -> Self {
        SessionGuard {
            store,
            navigator,
            config,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// True iff a token is stored and it has not expired.
    ///
    /// With no token this returns straight away. An expired or unreadable
    /// token is cleaned up on the spot: storage is cleared and the client is
    /// sent to the login view before `false` is returned.
    pub fn is_authenticated(&self) -> bool {
        let Some(token) = self.store.get_token() else {
            return false;
        };

        if codec::is_expired_at(&token, now_seconds(), self.config.leeway_seconds) {
            self.logout_with(LogoutReason::Expired);
            return false;
        }

        true
    }

    /// Explicit, user-initiated sign out.
    pub fn logout(&self) {
        self.logout_with(LogoutReason::UserInitiated);
    }

    /// Clear the session and force a full navigation to the login view.
    /// Idempotent.
    pub fn logout_with(&self, reason: LogoutReason) {
        self.store.clear_session();
        let target = self.login_target(reason);
        info!(
            event_name = "session.teardown",
            event_domain = "session",
            reason = reason.as_str(),
            "session ended, redirecting to {}",
            target
        );
        self.navigator.hard_navigate(&target);
    }

    /// Store a session freshly issued by the server.
    pub fn start_session(&self, token: &str, user: &UserProfile) -> Result<(), SessionError> {
        self.store.set_session(token, user)?;
        info!(
            event_name = "session.start",
            event_domain = "session",
            user = user.display_name(),
            "session started"
        );
        Ok(())
    }

    /// Claims of the stored token, if it decodes.
    pub fn claims(&self) -> Option<ClaimSet> {
        self.store.get_token().as_deref().and_then(codec::decode)
    }

    /// The stored profile as-is. A `role` claim that disagrees with it is
    /// logged, not enforced; the server re-checks every privileged call.
    pub fn current_user(&self) -> UserProfile {
        let user = self.store.get_user();
        if let Some(claims) = self.claims() {
            if let Some(role) = claims.role() {
                if user.role.as_deref() != Some(role) {
                    warn!(
                        event_name = "session.profile.role_mismatch",
                        claim_role = role,
                        stored_role = user.role.as_deref().unwrap_or(""),
                        "stored profile role differs from the token's role claim"
                    );
                }
            }
        }
        user
    }

    fn login_target(&self, reason: LogoutReason) -> String {
        if self.config.redirect_reason {
            format!("{}?reason={}", self.config.login_path, reason)
        } else {
            self.config.login_path.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::History;
    use crate::store::MemoryStore;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    use serde_json::{json, Value};

    fn token_with(payload: Value) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256"}"#),
            URL_SAFE_NO_PAD.encode(payload.to_string())
        )
    }

    struct Fixture {
        storage: Arc<MemoryStore>,
        history: Arc<History>,
        guard: SessionGuard,
    }

    fn fixture(config: SessionConfig) -> Fixture {
        let storage = Arc::new(MemoryStore::new());
        let history = Arc::new(History::starting_at("/dashboard"));
        let guard = SessionGuard::new(
            TokenStore::new(storage.clone()),
            history.clone(),
            config,
        );
        Fixture {
            storage,
            history,
            guard,
        }
    }

    fn admin() -> UserProfile {
        UserProfile::new(Some("Asha".to_string()), Some("admin".to_string()))
    }

    #[test]
    fn test_no_token_is_unauthenticated_without_teardown() {
        let f = fixture(SessionConfig::default());
        assert!(!f.guard.is_authenticated());
        // No teardown: nothing navigated, still on the starting view.
        assert_eq!(f.history.generation(), 0);
        assert_eq!(f.history.current().as_deref(), Some("/dashboard"));
    }

    #[test]
    fn test_far_future_token_is_authenticated_and_untouched() {
        let f = fixture(SessionConfig::default());
        let token = token_with(json!({"exp": 9999999999u64}));
        f.guard.start_session(&token, &admin()).unwrap();

        assert!(f.guard.is_authenticated());
        assert_eq!(f.storage.len(), 2);
        assert_eq!(f.guard.store().get_token(), Some(token));
        assert_eq!(f.history.generation(), 0);
    }

    #[test]
    fn test_expired_token_clears_storage_and_redirects() {
        let f = fixture(SessionConfig::default());
        f.guard
            .start_session(&token_with(json!({"exp": 1})), &admin())
            .unwrap();

        assert!(!f.guard.is_authenticated());
        assert!(f.storage.is_empty());
        assert_eq!(f.history.entries(), vec!["/login".to_string()]);
        assert_eq!(f.history.generation(), 1);
    }

    #[test]
    fn test_malformed_token_is_treated_as_expired() {
        let f = fixture(SessionConfig::default());
        f.guard.start_session("abc", &admin()).unwrap();
        assert!(!f.guard.is_authenticated());
        assert!(f.storage.is_empty());
    }

    #[test]
    fn test_logout_is_idempotent() {
        let f = fixture(SessionConfig::default());
        f.guard
            .start_session(&token_with(json!({"exp": 9999999999u64})), &admin())
            .unwrap();

        f.guard.logout();
        f.guard.logout();

        assert!(f.storage.is_empty());
        assert_eq!(f.history.current().as_deref(), Some("/login"));
        assert!(!f.guard.is_authenticated());
    }

    #[test]
    fn test_redirect_reason_is_opt_in() {
        let f = fixture(SessionConfig {
            redirect_reason: true,
            ..SessionConfig::default()
        });
        f.guard.logout_with(LogoutReason::Expired);
        assert_eq!(f.history.current().as_deref(), Some("/login?reason=expired"));
    }

    #[test]
    fn test_leeway_keeps_recently_expired_token() {
        let f = fixture(SessionConfig {
            leeway_seconds: 600,
            ..SessionConfig::default()
        });
        let a_minute_ago = chrono::Utc::now().timestamp() - 60;
        f.guard
            .start_session(&token_with(json!({"exp": a_minute_ago})), &admin())
            .unwrap();
        assert!(f.guard.is_authenticated());
    }

    #[test]
    fn test_current_user_trusts_stored_profile() {
        let f = fixture(SessionConfig::default());
        let token = token_with(json!({"exp": 9999999999u64, "role": "editor"}));
        f.guard.start_session(&token, &admin()).unwrap();

        let user = f.guard.current_user();
        assert!(user.is_admin());
        assert_eq!(f.guard.claims().and_then(|c| c.role().map(String::from)), Some("editor".to_string()));
    }
}
