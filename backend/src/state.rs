//! Application state management
//!
//! Shared resources handed to every handler through axum's state
//! extraction. Everything is behind `Arc` so cloning per request is cheap.

use crate::ai::AiAssistant;
use crate::auth::{JwtService, RevokedSessions};
use crate::config::AppConfig;
use crate::storage::Storage;
use crate::telemetry;
use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub ai: AiAssistant,
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    pub sessions: Arc<RevokedSessions>,
    pub metrics: PrometheusHandle,
}

impl AppState {
    /// Derives the JWT keys; call once at startup
    pub fn new(storage: Arc<dyn Storage>, ai: AiAssistant, config: AppConfig) -> Result<Self> {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.session_expiry_secs);

        Ok(Self {
            storage,
            ai,
            config: Arc::new(config),
            jwt,
            sessions: Arc::new(RevokedSessions::new()),
            metrics: telemetry::metrics_handle()?,
        })
    }

    #[inline]
    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    #[inline]
    pub fn ai(&self) -> &AiAssistant {
        &self.ai
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
    pub fn sessions(&self) -> &RevokedSessions {
        &self.sessions
    }
}
