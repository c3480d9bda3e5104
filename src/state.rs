//! Shared session context.
//!
//! Built once at startup and handed to every view. It is the only route to
//! credentials, identity and the backend; nothing reaches into storage on
//! its own.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::ConfigV1;
use crate::navigation::Navigator;
use crate::routes::RouteGate;
use crate::session::SessionGuard;

#[derive(Clone)]
pub struct SessionContext {
    /// Configuration loaded at startup.
    pub config: Arc<ConfigV1>,
    /// Where the client currently is.
    pub navigator: Arc<dyn Navigator>,
    /// Session decisions and teardown.
    pub guard: Arc<SessionGuard>,
    /// Check run in front of every protected view.
    pub gate: Arc<RouteGate>,
    /// Backend client with the authorization interceptor installed.
    pub client: Arc<ApiClient>,
}
