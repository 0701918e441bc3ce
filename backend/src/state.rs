//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! All fields are cheap to clone: the pool and config are reference counted
//! and the services hold their stores behind `Arc<dyn ...>`.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{PgProfileStore, PgSettingsStore, ProfileStore, SettingsStore};
use crate::services::{NutritionGoalService, ProfileService};
use nutrition_planner_shared::ProfileResolver;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    pub profiles: ProfileService,
    pub goals: NutritionGoalService,
}

impl AppState {
    /// Create state backed by PostgreSQL stores
    pub fn new(db: PgPool, config: AppConfig) -> Self {
        let profiles: Arc<dyn ProfileStore> = Arc::new(PgProfileStore::new(db.clone()));
        let settings: Arc<dyn SettingsStore> = Arc::new(PgSettingsStore::new(db.clone()));
        Self::with_stores(db, config, profiles, settings)
    }

    /// Create state over arbitrary stores
    ///
    /// `db` is only used by the readiness probe.
    pub fn with_stores(
        db: PgPool,
        config: AppConfig,
        profiles: Arc<dyn ProfileStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        let jwt = JwtService::new(&config.jwt.secret);
        let resolver = ProfileResolver::new(config.planner.default_activity_level);

        Self {
            db,
            jwt,
            profiles: ProfileService::new(profiles.clone(), resolver),
            goals: NutritionGoalService::new(profiles, settings, resolver),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the database pool
    #[inline]
    pub fn db(&self) -> &PgPool {
        &self.db
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
