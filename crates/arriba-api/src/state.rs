//! Application state for the portal API

use std::sync::Arc;

use arriba_core::{InMemoryTokenStore, TokenStore, VendorClient};
use arriba_service::PortalService;
use chrono::{DateTime, Utc};

/// Deployment name reported by the version endpoint when none is configured
pub const DEFAULT_ENVIRONMENT: &str = "Production";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    service: PortalService,
    token_store: Arc<dyn TokenStore>,
    environment: Arc<str>,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Create state over a vendor client with an in-memory token store
    pub fn new(client: Arc<dyn VendorClient>) -> Self {
        Self::with_token_store(client, Arc::new(InMemoryTokenStore::new()))
    }

    /// Create state with an explicit token store
    pub fn with_token_store(client: Arc<dyn VendorClient>, token_store: Arc<dyn TokenStore>) -> Self {
        Self {
            service: PortalService::new(client),
            token_store,
            environment: Arc::from(DEFAULT_ENVIRONMENT),
            started_at: Utc::now(),
        }
    }

    /// Set the deployment name reported by `/api/app/version`
    pub fn with_environment(mut self, environment: impl AsRef<str>) -> Self {
        self.environment = Arc::from(environment.as_ref());
        self
    }

    pub fn service(&self) -> &PortalService {
        &self.service
    }

    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.token_store
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
