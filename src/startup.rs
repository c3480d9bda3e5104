//! Wiring of the session context.

use std::sync::Arc;

use tracing::debug;

use crate::client::{ApiClient, AuthInterceptor};
use crate::config::ConfigV1;
use crate::errors::ApiError;
use crate::navigation::{History, Navigator};
use crate::routes::RouteGate;
use crate::session::{SessionGuard, TokenStore};
use crate::state::SessionContext;
use crate::store::{create_storage, Storage};

/// Build the context with the storage backend named in the configuration.
pub fn build_context(config: ConfigV1) -> Result<SessionContext, ApiError> {
    let storage = create_storage(&config.store)?;
    build_context_with_storage(config, storage)
}

/// Build the context on top of an existing storage backend.
///
/// The interceptor is installed here, once, into the only client the
/// context hands out.
pub fn build_context_with_storage(
    config: ConfigV1,
    storage: Arc<dyn Storage>,
) -> Result<SessionContext, ApiError> {
    let config = Arc::new(config);
    let navigator: Arc<dyn Navigator> = Arc::new(History::new());
    let store = TokenStore::new(storage);
    let guard = Arc::new(SessionGuard::new(
        store,
        navigator.clone(),
        config.session.clone(),
    ));
    let gate = Arc::new(RouteGate::new(guard.clone(), navigator.clone()));
    let client = Arc::new(ApiClient::new(
        &config.api,
        AuthInterceptor::new(guard.clone()),
    )?);

    debug!(
        base_url = config.api.base_url.as_str(),
        persistent = guard.store().is_persistent(),
        "session context ready"
    );

    Ok(SessionContext {
        config,
        navigator,
        guard,
        gate,
        client,
    })
}
