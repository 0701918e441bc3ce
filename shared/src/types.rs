//! API request and response types

use crate::deficit::GoalInput;
use crate::plan::PlanResult;
use crate::profile::{ActivityLevel, Profile, StoredProfile};
use crate::schedule::{PlanType, Weekday};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Goal parameters for preview and start-tracking requests
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GoalRequest {
    #[validate(range(min = 50.0, max = 1000.0))]
    pub target_weight: f64,
    #[validate(range(min = 0.5, max = 2.5))]
    pub weight_change_rate: f64,
    #[serde(default)]
    pub plan_type: PlanType,
    /// Defaults to today; ignored by preview
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
}

impl GoalRequest {
    pub fn goal_input(&self) -> GoalInput {
        GoalInput {
            target_weight_lbs: self.target_weight,
            weight_change_rate_lbs_per_week: self.weight_change_rate,
            plan_type: self.plan_type,
        }
    }
}

/// Computed plan, not yet saved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub plan: PlanResult,
    pub weekly_average: f64,
}

impl From<PlanResult> for PlanResponse {
    fn from(plan: PlanResult) -> Self {
        Self {
            weekly_average: plan.weekly_average(),
            plan,
        }
    }
}

/// Active nutrition goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionGoalResponse {
    pub plan: PlanResult,
    pub weekly_average: f64,
    pub start_date: Option<NaiveDate>,
    pub estimated_end_date: Option<NaiveDate>,
}

/// Calorie target for a single date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTargetResponse {
    pub date: NaiveDate,
    pub day: Weekday,
    pub calories: i32,
    pub plan_type: PlanType,
}

/// User profile as seen by the planner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub age: Option<u32>,
    pub height: Option<String>,
    pub gender: Option<String>,
    pub weight: Option<f64>,
    /// Resolved level, falling back to the configured default
    pub activity_level: ActivityLevel,
    pub missing_fields: Vec<String>,
    pub complete: bool,
}

impl ProfileResponse {
    pub fn new(stored: StoredProfile, resolved: &Profile) -> Self {
        let missing_fields: Vec<String> = resolved
            .missing_fields()
            .into_iter()
            .map(String::from)
            .collect();
        Self {
            age: stored.age,
            height: stored.height,
            gender: stored.gender,
            weight: stored.weight,
            activity_level: resolved.activity_level,
            complete: missing_fields.is_empty(),
            missing_fields,
        }
    }
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(range(min = 1, max = 150))]
    pub age: Option<u32>,
    #[validate(length(min = 1, max = 16))]
    pub height: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub gender: Option<String>,
    #[validate(range(min = 50.0, max = 1000.0))]
    pub weight: Option<f64>,
    #[validate(length(min = 1, max = 32))]
    pub activity_level: Option<String>,
}
