use std::sync::Arc;

use crate::config::Config;
use crate::services::ScanService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub scanner: ScanService,
}

impl AppState {
    pub fn new(config: Config, scanner: ScanService) -> Self {
        Self {
            config: Arc::new(config),
            scanner,
        }
    }
}
