use std::sync::Arc;

use tracing::{error, info};

use super::{file_store::FileStore, memory_store::MemoryStore};
use crate::config::{StoreBackend, StoreConfig};
use crate::errors::SessionError;

/// The Storage trait abstracts persisted key/value slots (get, set, remove).
///
/// This is the raw equivalent of browser local storage. Only the token store
/// talks to it; everything else goes through `session::TokenStore`.
pub trait Storage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;
    /// Removing a key that is not there is not an error.
    fn remove_item(&self, key: &str) -> Result<(), SessionError>;
    fn is_persistent(&self) -> bool {
        true
    }
}

/// Creates a concrete storage implementation based on the StoreConfig.
pub fn create_storage(config: &StoreConfig) -> Result<Arc<dyn Storage>, SessionError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Session store is in memory; sessions end with the process.");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::File => {
            let Some(path) = &config.path else {
                error!("File store is enabled, but no path is configured!");
                return Err(SessionError::MissingStorePath);
            };
            let store = FileStore::open(path)?;
            info!("Session store at {}", path.display());
            Ok(Arc::new(store))
        }
    }
}
