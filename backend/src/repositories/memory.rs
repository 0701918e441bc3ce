//! In-memory stores
//!
//! Same contracts as the PostgreSQL adapters, held in process memory. Used by
//! service and router tests and for running the API without a database.

use super::{ProfileStore, ProfileUpdate, SettingsStore};
use anyhow::Result;
use async_trait::async_trait;
use nutrition_planner_shared::{StoredProfile, UserSettings};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Profile store held in memory
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<Uuid, StoredProfile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile snapshot
    pub async fn insert(&self, user_id: Uuid, profile: StoredProfile) {
        self.profiles.write().await.insert(user_id, profile);
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<StoredProfile> {
        Ok(self
            .profiles
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> Result<StoredProfile> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles.entry(user_id).or_default();
        update.apply_to(profile);
        Ok(profile.clone())
    }
}

/// Settings store held in memory
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<HashMap<Uuid, UserSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get_settings(&self, user_id: Uuid) -> Result<UserSettings> {
        Ok(self
            .settings
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn update_settings(&self, user_id: Uuid, settings: UserSettings) -> Result<()> {
        self.settings.write().await.insert(user_id, settings);
        Ok(())
    }
}
