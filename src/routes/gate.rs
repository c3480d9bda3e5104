use std::sync::Arc;

use tracing::debug;

use super::DEFAULT_ROUTE;
use crate::navigation::Navigator;
use crate::session::SessionGuard;

/// States of a single navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Evaluating,
    Allowed,
    Denied,
}

/// Result of a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Render `path`.
    Allowed { path: String },
    /// `requested` needs a session; the current entry was replaced by `redirect`.
    Denied { requested: String, redirect: String },
}

impl GateOutcome {
    pub fn state(&self) -> GateState {
        match self {
            GateOutcome::Allowed { .. } => GateState::Allowed,
            GateOutcome::Denied { .. } => GateState::Denied,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.state() == GateState::Allowed
    }
}

/// Runs the session check in front of every protected view.
///
/// Nothing is cached between navigations: a token that expires after one
/// navigation is caught by the next.
pub struct RouteGate {
    guard: Arc<SessionGuard>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGate {
    pub fn new(guard: Arc<SessionGuard>, navigator: Arc<dyn Navigator>) -> Self {
        RouteGate { guard, navigator }
    }

    /// The login view is always public, whatever `public_paths` lists.
    pub fn is_public(&self, path: &str) -> bool {
        let route = strip_query(path);
        let config = self.guard.config();
        route == strip_query(&config.login_path)
            || config.public_paths.iter().any(|public| public == route)
    }

    /// Evaluate a navigation to `path` and apply it to history.
    pub fn navigate(&self, path: &str) -> GateOutcome {
        let path = if path == "/" || path.is_empty() {
            DEFAULT_ROUTE
        } else {
            path
        };

        let mut state = GateState::Evaluating;
        debug!(path, ?state, "navigation requested");

        if self.is_public(path) || self.guard.is_authenticated() {
            state = GateState::Allowed;
            debug!(path, ?state, "navigation allowed");
            self.navigator.push(path);
            return GateOutcome::Allowed {
                path: path.to_string(),
            };
        }

        state = GateState::Denied;
        let redirect = self.guard.config().login_path.clone();
        debug!(path, ?state, "navigation denied, redirecting to {}", redirect);
        self.navigator.replace(&redirect);
        GateOutcome::Denied {
            requested: path.to_string(),
            redirect,
        }
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::navigation::History;
    use crate::session::TokenStore;
    use crate::store::MemoryStore;
    use crate::models::UserProfile;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;

    fn token_expiring_at(exp: i64) -> String {
        format!(
            "h.{}.s",
            URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{}}}"#, exp))
        )
    }

    fn gate() -> (Arc<History>, Arc<SessionGuard>, RouteGate) {
        let history = Arc::new(History::starting_at("/login"));
        let guard = Arc::new(SessionGuard::new(
            TokenStore::new(Arc::new(MemoryStore::new())),
            history.clone(),
            SessionConfig::default(),
        ));
        let gate = RouteGate::new(guard.clone(), history.clone());
        (history, guard, gate)
    }

    #[test]
    fn test_login_is_public() {
        let (_, _, gate) = gate();
        assert!(gate.navigate("/login").is_allowed());
        assert!(gate.is_public("/login?reason=expired"));
        assert!(!gate.is_public("/messages"));
    }

    #[test]
    fn test_configured_login_path_is_reachable() {
        let history = Arc::new(History::new());
        let guard = Arc::new(SessionGuard::new(
            TokenStore::new(Arc::new(MemoryStore::new())),
            history.clone(),
            SessionConfig {
                login_path: "/signin".to_string(),
                ..SessionConfig::default()
            },
        ));
        let gate = RouteGate::new(guard, history.clone());

        assert_eq!(
            gate.navigate("/signin"),
            GateOutcome::Allowed {
                path: "/signin".to_string()
            }
        );
        assert_eq!(
            gate.navigate("/messages"),
            GateOutcome::Denied {
                requested: "/messages".to_string(),
                redirect: "/signin".to_string(),
            }
        );
        assert_eq!(history.current().as_deref(), Some("/signin"));
    }

    #[test]
    fn test_denied_replaces_history_entry() {
        let (history, _, gate) = gate();
        history.push("/somewhere-public");

        let outcome = gate.navigate("/messages");
        assert_eq!(
            outcome,
            GateOutcome::Denied {
                requested: "/messages".to_string(),
                redirect: "/login".to_string(),
            }
        );
        assert_eq!(outcome.state(), GateState::Denied);
        // Going back must not land on the protected view.
        assert_eq!(
            history.entries(),
            vec!["/login".to_string(), "/login".to_string()]
        );
    }

    #[test]
    fn test_allowed_with_live_session() {
        let (history, guard, gate) = gate();
        guard
            .start_session(&token_expiring_at(9999999999), &UserProfile::default())
            .unwrap();

        let outcome = gate.navigate("/properties/add");
        assert!(outcome.is_allowed());
        assert_eq!(history.current().as_deref(), Some("/properties/add"));
    }

    #[test]
    fn test_root_goes_to_dashboard() {
        let (_, guard, gate) = gate();
        guard
            .start_session(&token_expiring_at(9999999999), &UserProfile::default())
            .unwrap();
        assert_eq!(
            gate.navigate("/"),
            GateOutcome::Allowed {
                path: "/dashboard".to_string()
            }
        );
    }

    #[test]
    fn test_every_navigation_rechecks() {
        let (_, guard, gate) = gate();
        guard
            .start_session(&token_expiring_at(9999999999), &UserProfile::default())
            .unwrap();
        assert!(gate.navigate("/dashboard").is_allowed());

        // The stored token is swapped for an expired one between navigations.
        guard
            .start_session(&token_expiring_at(1), &UserProfile::default())
            .unwrap();
        assert!(!gate.navigate("/messages").is_allowed());
        assert_eq!(guard.store().get_token(), None);
    }
}
