//! Service container for dependency injection
//!
//! Wires settings and I/O implementations into the order service.

use std::sync::Arc;

use crate::application::services::OrderService;
use crate::config::Settings;
use crate::infrastructure::traits::{FileSystem, RealFileSystem};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    pub order_service: OrderService,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings) -> Self {
        Self::with_deps(settings, Arc::new(RealFileSystem))
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(settings: Settings, fs: Arc<dyn FileSystem>) -> Self {
        let settings = Arc::new(settings);
        let order_service = OrderService::new(fs, Arc::clone(&settings));

        Self {
            settings,
            order_service,
        }
    }
}
