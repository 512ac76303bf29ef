use std::sync::Arc;

use crate::config::Config;
use crate::error::ChartError;
use crate::render::FetchBackend;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub fetch_backend: Arc<FetchBackend>,
}

impl AppState {
    /// # Errors
    ///
    /// Returns `ChartError::BackendFetch` if the data API client cannot be built.
    pub fn new(config: Config) -> Result<Self, ChartError> {
        let fetch_backend = FetchBackend::new(config.data_api_base_url.clone())?;

        Ok(Self {
            config: Arc::new(config),
            fetch_backend: Arc::new(fetch_backend),
        })
    }
}
