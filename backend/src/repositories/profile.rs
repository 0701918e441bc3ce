//! PostgreSQL profile store
//!
//! Profile fields live in `user_profiles`; weight is the most recent row of
//! `weight_logs`.

use super::{ProfileStore, ProfileUpdate};
use anyhow::{Context, Result};
use async_trait::async_trait;
use nutrition_planner_shared::StoredProfile;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Profile row from database
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProfileRecord {
    age: Option<i32>,
    height: Option<String>,
    gender: Option<String>,
    activity_level: Option<String>,
}

/// Profile store backed by PostgreSQL
#[derive(Clone)]
pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn latest_weight(&self, user_id: Uuid) -> Result<Option<f64>> {
        let weight = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT weight_lbs
            FROM weight_logs
            WHERE user_id = $1
            ORDER BY recorded_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(weight.and_then(|w| w.to_f64()))
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<StoredProfile> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT age, height, gender, activity_level
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let weight = self.latest_weight(user_id).await?;

        Ok(match record {
            Some(r) => StoredProfile {
                age: r.age.and_then(|a| u32::try_from(a).ok()),
                height: r.height,
                gender: r.gender,
                weight,
                activity_level: r.activity_level,
            },
            None => StoredProfile {
                weight,
                ..Default::default()
            },
        })
    }

    async fn update_profile(&self, user_id: Uuid, update: ProfileUpdate) -> Result<StoredProfile> {
        let age = update
            .age
            .map(i32::try_from)
            .transpose()
            .context("age out of range")?;
        let weight = update
            .weight
            .map(|w| Decimal::try_from(w).map(|d| d.round_dp(2)))
            .transpose()
            .context("weight is not representable")?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO user_profiles (user_id, age, height, gender, activity_level)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                age = COALESCE(EXCLUDED.age, user_profiles.age),
                height = COALESCE(EXCLUDED.height, user_profiles.height),
                gender = COALESCE(EXCLUDED.gender, user_profiles.gender),
                activity_level = COALESCE(EXCLUDED.activity_level, user_profiles.activity_level),
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(age)
        .bind(&update.height)
        .bind(&update.gender)
        .bind(&update.activity_level)
        .execute(&mut *tx)
        .await?;

        if let Some(weight) = weight {
            sqlx::query(
                r#"
                INSERT INTO weight_logs (user_id, weight_lbs, recorded_at)
                VALUES ($1, $2, NOW())
                "#,
            )
            .bind(user_id)
            .bind(weight)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_profile(user_id).await
    }
}
