use std::sync::Arc;

use crate::config::Config;
use crate::services::ScanStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: ScanStore,
}

impl AppState {
    pub fn new(config: Config, store: ScanStore) -> Self {
        Self {
            config: Arc::new(config),
            store,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.config.scans.max_file_size
    }
}
