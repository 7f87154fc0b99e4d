pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod refresh;
pub mod routes;
pub mod storage;

pub use api::{NbaApiClient, Upstream};
pub use config::Config;
pub use error::{AppError, Result};
pub use models::*;
pub use query::QueryService;
pub use refresh::{RefreshSummary, Refresher};
pub use routes::build_router;
pub use storage::Store;

use std::sync::Arc;
use tracing::error;

/// Everything a request handler needs, cloned per request
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<dyn Upstream>,
    pub query: QueryService,
    pub refresher: Refresher,
}

impl AppState {
    pub fn new(store: Arc<Store>, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            query: QueryService::new(store.clone()),
            refresher: Refresher::new(upstream.clone(), store),
            upstream,
        }
    }

    /// Build the live state from configuration
    ///
    /// A store that cannot be opened is logged and replaced by an empty
    /// in-memory one, so the service still comes up.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store = match Store::open(&config.database_url) {
            Ok(store) => store,
            Err(e) => {
                error!(
                    "Failed to open store at {}: {}. Falling back to in-memory store",
                    config.database_url, e
                );
                Store::open_in_memory()?
            }
        };

        let upstream = NbaApiClient::new(config.api_key.clone(), config.api_host.clone());
        Ok(Self::new(Arc::new(store), Arc::new(upstream)))
    }
}
