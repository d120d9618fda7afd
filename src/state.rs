//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::PackService;
use crate::config::Config;
use crate::domain::solver::DpSolver;

#[derive(Clone)]
pub struct AppState {
    pub pack_service: Arc<PackService<DpSolver>>,
}

impl AppState {
    pub fn new(pack_service: Arc<PackService<DpSolver>>) -> Self {
        Self { pack_service }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(PackService::from_config(config)))
    }
}
