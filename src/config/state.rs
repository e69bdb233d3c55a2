// Application state module
// Owns the expense store and configuration cache shared across connections

use std::sync::atomic::AtomicBool;
use tokio::sync::RwLock;

use super::types::Config;
use crate::store::ExpenseStore;

/// Application state
///
/// The expense store is owned here and injected into handlers, so tests
/// construct a fresh state (and therefore a fresh store) per test.
pub struct AppState {
    pub config: Config,
    pub store: RwLock<ExpenseStore>,

    // Cached config values for fast access without locks
    pub cached_access_log: AtomicBool,
}

impl AppState {
    /// Create `AppState` with an empty expense store
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: RwLock::new(ExpenseStore::new()),
            cached_access_log: AtomicBool::new(config.logging.access_log),
        }
    }
}
