//! Plan assembly
//!
//! Runs a profile and goal through the metabolic, deficit and schedule
//! calculators and packages the result as a [`PlanResult`].

use crate::deficit::{compute_deficit, GoalInput};
use crate::errors::PlanError;
use crate::metabolic::compute_metabolic;
use crate::profile::{ActivityLevel, Profile};
use crate::safety::CAP_PERCENT;
use crate::schedule::{allocate, PlanType, WeeklySchedule};
use crate::validation::validate_goal_input;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Safety rules a plan was computed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRules {
    pub min_safe_calories: i32,
    pub cap_percent: u32,
    /// Remaining days should adapt to logged intake (auto plans only)
    pub auto_adjust: bool,
}

impl PlanRules {
    pub fn new(min_safe_calories: i32, plan_type: PlanType) -> Self {
        Self {
            min_safe_calories,
            cap_percent: CAP_PERCENT,
            auto_adjust: plan_type == PlanType::Auto,
        }
    }
}

/// A fully computed nutrition plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    pub current_weight: f64,
    pub target_weight: f64,
    pub weight_to_lose_abs: f64,
    pub bmr: i32,
    pub tdee: i32,
    pub daily_calories: i32,
    /// Daily deficit in kcal
    pub weekly_deficit: i32,
    pub timeline_weeks: u32,
    pub activity_level: ActivityLevel,
    pub weight_change_rate: f64,
    pub plan_type: PlanType,
    pub schedule: WeeklySchedule,
    pub rules: PlanRules,
    pub floor_applied: bool,
}

impl PlanResult {
    /// Mean of the scheduled days
    pub fn weekly_average(&self) -> f64 {
        self.schedule.iter().map(|d| d.calories as f64).sum::<f64>() / 7.0
    }
}

/// Build a plan for `profile` and `goal`
///
/// Fails with [`PlanError::InsufficientProfile`] when profile fields are
/// missing, and with [`PlanError::UnusableProfile`] when they are all present
/// but still give a zero BMR.
pub fn build_plan(profile: &Profile, goal: &GoalInput) -> Result<PlanResult, PlanError> {
    validate_goal_input(goal).map_err(PlanError::InvalidGoal)?;

    let metabolic = compute_metabolic(profile);
    let missing = profile.missing_fields();
    if !missing.is_empty() {
        return Err(PlanError::insufficient(&missing));
    }
    let current_weight = match profile.weight_lbs {
        Some(weight) if metabolic.is_usable() => weight,
        weight => {
            return Err(PlanError::UnusableProfile {
                age: profile.age_years.unwrap_or_default(),
                weight_lbs: weight.unwrap_or_default(),
                height: profile.height_text.clone().unwrap_or_default(),
            });
        }
    };

    let deficit = compute_deficit(current_weight, goal, &metabolic);
    if deficit.floor_applied {
        warn!(
            tdee = metabolic.tdee,
            deficit = deficit.weekly_deficit,
            floor = deficit.min_safe_calories,
            "Requested rate exceeds safe deficit, using calorie floor"
        );
    }

    let schedule = allocate(goal.plan_type, deficit.daily_calories as f64, metabolic.bmr);

    debug!(
        bmr = metabolic.bmr,
        tdee = metabolic.tdee,
        daily_calories = deficit.daily_calories,
        plan_type = %goal.plan_type,
        "Computed nutrition plan"
    );

    Ok(PlanResult {
        current_weight,
        target_weight: goal.target_weight_lbs,
        weight_to_lose_abs: deficit.weight_to_lose_abs,
        bmr: metabolic.bmr,
        tdee: metabolic.tdee,
        daily_calories: deficit.daily_calories,
        weekly_deficit: deficit.weekly_deficit,
        timeline_weeks: deficit.timeline_weeks,
        activity_level: profile.activity_level,
        weight_change_rate: goal.weight_change_rate_lbs_per_week,
        plan_type: goal.plan_type,
        schedule,
        rules: PlanRules::new(deficit.min_safe_calories, goal.plan_type),
        floor_applied: deficit.floor_applied,
    })
}
