//! PostgreSQL settings store
//!
//! The nutrition goal record is kept as JSONB in `user_settings.nutrition_goal`.

use super::SettingsStore;
use anyhow::Result;
use async_trait::async_trait;
use nutrition_planner_shared::{PersistedNutritionGoal, UserSettings};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

/// Settings store backed by PostgreSQL
#[derive(Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get_settings(&self, user_id: Uuid) -> Result<UserSettings> {
        let stored = sqlx::query_scalar::<_, Option<serde_json::Value>>(
            r#"
            SELECT nutrition_goal
            FROM user_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .flatten();

        let nutrition_goal = stored.and_then(|value| {
            serde_json::from_value::<PersistedNutritionGoal>(value)
                .map_err(|e| warn!(%user_id, "Ignoring unreadable nutrition goal: {}", e))
                .ok()
        });

        Ok(UserSettings { nutrition_goal })
    }

    async fn update_settings(&self, user_id: Uuid, settings: UserSettings) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (user_id, nutrition_goal)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                nutrition_goal = EXCLUDED.nutrition_goal,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(settings.nutrition_goal.map(Json))
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
