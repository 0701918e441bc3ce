//! Store contracts and their adapters
//!
//! The planning service talks to storage only through [`ProfileStore`] and
//! [`SettingsStore`]. PostgreSQL adapters back the running service; the
//! in-memory adapters back unit and router tests.

use anyhow::Result;
use async_trait::async_trait;
use nutrition_planner_shared::{StoredProfile, UserSettings};
use uuid::Uuid;

pub mod memory;
pub mod profile;
pub mod settings;

pub use memory::{InMemoryProfileStore, InMemorySettingsStore};
pub use profile::PgProfileStore;
pub use settings::PgSettingsStore;

/// Partial profile update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub age: Option<u32>,
    pub height: Option<String>,
    pub gender: Option<String>,
    /// Recorded as a new weight log entry
    pub weight: Option<f64>,
    pub activity_level: Option<String>,
}

impl ProfileUpdate {
    /// Merge into a snapshot, keeping existing values for absent fields
    pub fn apply_to(&self, profile: &mut StoredProfile) {
        if let Some(age) = self.age {
            profile.age = Some(age);
        }
        if let Some(height) = &self.height {
            profile.height = Some(height.clone());
        }
        if let Some(gender) = &self.gender {
            profile.gender = Some(gender.clone());
        }
        if let Some(weight) = self.weight {
            profile.weight = Some(weight);
        }
        if let Some(level) = &self.activity_level {
            profile.activity_level = Some(level.clone());
        }
    }
}

/// Source of biometric profile snapshots
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Current snapshot; an unknown user yields an empty profile
    async fn get_profile(&self, user_id: Uuid) -> Result<StoredProfile>;

    /// Apply a partial update and return the resulting snapshot
    async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> Result<StoredProfile>;
}

/// Source of per-user settings, including the nutrition goal record
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Current settings; an unknown user yields empty settings
    async fn get_settings(&self, user_id: Uuid) -> Result<UserSettings>;

    /// Replace the stored goal record wholesale (last write wins)
    async fn update_settings(&self, user_id: Uuid, settings: UserSettings) -> Result<()>;
}
