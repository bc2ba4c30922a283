use crate::config::DashboardConfig;
use crate::dataset::DatasetStore;
use std::sync::Arc;

/// The dataset is read-only after startup, so it is shared without a lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub dataset: Arc<DatasetStore>,
}

impl AppState {
    pub fn new(config: DashboardConfig, dataset: DatasetStore) -> Self {
        Self {
            config: Arc::new(config),
            dataset: Arc::new(dataset),
        }
    }
}
