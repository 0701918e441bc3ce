//! Nutrition goal service - planning, tracking and daily targets

use crate::error::{ApiError, ApiResult};
use crate::repositories::{ProfileStore, SettingsStore};
use chrono::NaiveDate;
use nutrition_planner_shared::persistence::weekday_for_date;
use nutrition_planner_shared::{
    build_plan, from_record, resolve_day_target, to_record, DayTargetResponse, GoalInput,
    PersistedNutritionGoal, PlanResult, Profile, ProfileResolver, UserSettings,
};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// A saved goal together with the plan rebuilt from it
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveGoal {
    pub plan: PlanResult,
    pub record: PersistedNutritionGoal,
}

/// Nutrition goal operations over the profile and settings stores
#[derive(Clone)]
pub struct NutritionGoalService {
    profiles: Arc<dyn ProfileStore>,
    settings: Arc<dyn SettingsStore>,
    resolver: ProfileResolver,
}

impl NutritionGoalService {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        settings: Arc<dyn SettingsStore>,
        resolver: ProfileResolver,
    ) -> Self {
        Self {
            profiles,
            settings,
            resolver,
        }
    }

    async fn load_profile(&self, user_id: Uuid) -> ApiResult<Profile> {
        let stored = self.profiles.get_profile(user_id).await?;
        Ok(self.resolver.resolve(&stored))
    }

    /// The stored goal, if tracking is enabled
    async fn enabled_record(&self, user_id: Uuid) -> ApiResult<Option<PersistedNutritionGoal>> {
        let settings = self.settings.get_settings(user_id).await?;
        Ok(settings.nutrition_goal.filter(|goal| goal.enabled))
    }

    /// Compute a plan without saving it
    pub async fn preview(&self, user_id: Uuid, goal: &GoalInput) -> ApiResult<PlanResult> {
        let profile = self.load_profile(user_id).await?;
        let plan = build_plan(&profile, goal)?;
        debug!(%user_id, daily_calories = plan.daily_calories, "Previewed nutrition plan");
        Ok(plan)
    }

    /// Compute a plan and save it as the user's active goal
    ///
    /// Replaces any existing goal record.
    pub async fn start_tracking(
        &self,
        user_id: Uuid,
        goal: &GoalInput,
        start_date: NaiveDate,
    ) -> ApiResult<ActiveGoal> {
        let plan = self.preview(user_id, goal).await?;
        let record = to_record(&plan, start_date);

        self.settings
            .update_settings(
                user_id,
                UserSettings {
                    nutrition_goal: Some(record.clone()),
                },
            )
            .await?;

        info!(
            %user_id,
            plan_type = %plan.plan_type,
            daily_calories = plan.daily_calories,
            timeline_weeks = plan.timeline_weeks,
            "Started nutrition goal tracking"
        );

        Ok(ActiveGoal { plan, record })
    }

    /// The active goal, or `None` when tracking is off
    pub async fn current_goal(&self, user_id: Uuid) -> ApiResult<Option<ActiveGoal>> {
        Ok(self.enabled_record(user_id).await?.map(|record| ActiveGoal {
            plan: from_record(&record),
            record,
        }))
    }

    /// Calorie target for `date` under the active goal
    pub async fn day_target(&self, user_id: Uuid, date: NaiveDate) -> ApiResult<DayTargetResponse> {
        let record = self
            .enabled_record(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("No active nutrition goal".to_string()))?;

        Ok(DayTargetResponse {
            date,
            day: weekday_for_date(date),
            calories: resolve_day_target(&record, date),
            plan_type: record.plan_type.unwrap_or_default(),
        })
    }

    /// Stop tracking while keeping the saved record
    pub async fn disable(&self, user_id: Uuid) -> ApiResult<()> {
        let settings = self.settings.get_settings(user_id).await?;
        let record = match settings.nutrition_goal {
            Some(existing) => PersistedNutritionGoal {
                enabled: false,
                ..existing
            },
            None => PersistedNutritionGoal::disabled(),
        };

        self.settings
            .update_settings(
                user_id,
                UserSettings {
                    nutrition_goal: Some(record),
                },
            )
            .await?;

        info!(%user_id, "Disabled nutrition goal tracking");
        Ok(())
    }
}
