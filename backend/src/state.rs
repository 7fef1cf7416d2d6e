//! Application state management
//!
//! Shared resources handed to every handler through Axum's state extraction.
//! Everything here is built once at startup and cheap to clone.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use redis::aio::ConnectionManager;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::services::{EventPublisher, OllamaClient, PlanSynthesizer, TextGenerator};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// JWT service with pre-computed keys
    pub jwt: JwtService,
    pub plans: Arc<PlanSynthesizer>,
    pub events: EventPublisher,
    /// Prometheus render handle, when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from config. The AI client is created here when enabled;
    /// a client that cannot be built leaves plan synthesis on defaults.
    pub fn new(db: PgPool, redis: Option<ConnectionManager>, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            &config.jwt.secret,
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );

        let generator: Option<Arc<dyn TextGenerator>> = if config.ai.enabled {
            match OllamaClient::from_config(&config.ai) {
                Ok(client) => {
                    info!(model = %config.ai.model, base_url = %config.ai.base_url, "AI plan generation enabled");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    warn!(error = %e, "Failed to build AI client, using default plans");
                    None
                }
            }
        } else {
            None
        };

        let plans = PlanSynthesizer::new(generator, config.ai.timeout(), config.plan.settings());

        Self {
            db,
            config: Arc::new(config),
            jwt,
            plans: Arc::new(plans),
            events: EventPublisher::new(redis),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn plans(&self) -> &PlanSynthesizer {
        &self.plans
    }

    #[inline]
    pub fn events(&self) -> &EventPublisher {
        &self.events
    }
}
