//! Shared application state for the web server.

use std::sync::Arc;
use surveycast_client::{PredictionClient, Predictor};
use surveycast_common::{Domain, Result};
use surveycast_schema::DomainSchema;

use crate::config::Config;
use crate::session::SessionRegistry;

/// Shared state injected into every Axum handler.
pub struct AppState {
    pub config: Config,
    pub sessions: SessionRegistry,
    health_schema: DomainSchema,
    bank_schema: DomainSchema,
    health: Arc<dyn Predictor>,
    bank: Arc<dyn Predictor>,
}

impl AppState {
    pub fn new(config: Config, health: Arc<dyn Predictor>, bank: Arc<dyn Predictor>) -> Self {
        Self {
            sessions: SessionRegistry::new(config.session_ttl(), config.timeout()),
            health_schema: DomainSchema::health(config.health.profile),
            bank_schema: DomainSchema::bank(),
            config,
            health,
            bank,
        }
    }

    /// Build real prediction clients from the configured endpoints.
    pub fn from_config(config: Config) -> Result<Self> {
        let timeout = config.timeout();
        let health = PredictionClient::new(config.endpoint(Domain::Health).map(str::to_string), timeout)?;
        let bank = PredictionClient::new(config.endpoint(Domain::Bank).map(str::to_string), timeout)?;
        Ok(Self::new(config, Arc::new(health), Arc::new(bank)))
    }

    pub fn schema(&self, domain: Domain) -> &DomainSchema {
        match domain {
            Domain::Health => &self.health_schema,
            Domain::Bank   => &self.bank_schema,
        }
    }

    pub fn predictor(&self, domain: Domain) -> Arc<dyn Predictor> {
        match domain {
            Domain::Health => self.health.clone(),
            Domain::Bank   => self.bank.clone(),
        }
    }
}

pub type SharedState = Arc<AppState>;
