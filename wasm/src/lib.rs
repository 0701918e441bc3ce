//! Nutrition Planner WASM Module
//!
//! WebAssembly bindings so the web client can compute BMR/TDEE, weekly
//! schedules and day targets locally. Unknown enum strings fall back to the
//! engine's defaults instead of failing.

use chrono::NaiveDate;
use nutrition_planner_shared::metabolic;
use nutrition_planner_shared::schedule::schedule_values;
use nutrition_planner_shared::{
    allocate, build_plan, ActivityLevel, GoalInput, PersistedNutritionGoal, PlanResponse,
    PlanType, ProfileResolver, StoredProfile,
};
use wasm_bindgen::prelude::*;

fn parse_or_default<T: std::str::FromStr + Default>(value: &str) -> T {
    value.parse().unwrap_or_default()
}

/// BMR in kcal/day; `0` when any input is missing or unusable
#[wasm_bindgen]
pub fn compute_bmr(age_years: u32, weight_lbs: f64, height_text: &str, sex: &str) -> i32 {
    let stored = StoredProfile {
        age: Some(age_years),
        height: Some(height_text.to_string()),
        gender: Some(sex.to_string()),
        weight: Some(weight_lbs),
        activity_level: None,
    };
    metabolic::compute_bmr(&ProfileResolver::default().resolve(&stored))
}

/// TDEE for a BMR and activity level name
#[wasm_bindgen]
pub fn compute_tdee(bmr: i32, activity_level: &str) -> i32 {
    metabolic::compute_tdee(bmr, parse_or_default::<ActivityLevel>(activity_level))
}

/// Lowest daily target the planner will ever suggest for this BMR
#[wasm_bindgen]
pub fn min_safe_calories(bmr: i32) -> i32 {
    nutrition_planner_shared::min_safe_calories(bmr)
}

/// Seven daily targets, Monday first
#[wasm_bindgen]
pub fn allocate_schedule(plan_type: &str, daily_calories: f64, bmr: i32) -> Vec<i32> {
    let schedule = allocate(parse_or_default::<PlanType>(plan_type), daily_calories, bmr);
    schedule_values(&schedule).to_vec()
}

/// Calorie target for an ISO date under a persisted goal record
///
/// Returns `0` when the record or the date cannot be read.
#[wasm_bindgen]
pub fn resolve_day_target(record_json: &str, iso_date: &str) -> i32 {
    let Ok(record) = serde_json::from_str::<PersistedNutritionGoal>(record_json) else {
        return 0;
    };
    let Ok(date) = NaiveDate::parse_from_str(iso_date, "%Y-%m-%d") else {
        return 0;
    };
    nutrition_planner_shared::resolve_day_target(&record, date)
}

/// Full plan preview as JSON
///
/// `profile_json` uses the stored profile shape (`age`, `height`, `gender`,
/// `weight`, `activity_level`); `goal_json` uses the goal input shape.
#[wasm_bindgen]
pub fn preview_plan(profile_json: &str, goal_json: &str) -> Result<String, JsError> {
    preview_plan_json(profile_json, goal_json).map_err(|e| JsError::new(&e))
}

fn preview_plan_json(profile_json: &str, goal_json: &str) -> Result<String, String> {
    let stored: StoredProfile =
        serde_json::from_str(profile_json).map_err(|e| format!("Invalid profile: {}", e))?;
    let goal: GoalInput =
        serde_json::from_str(goal_json).map_err(|e| format!("Invalid goal: {}", e))?;

    let profile = ProfileResolver::default().resolve(&stored);
    let plan = build_plan(&profile, &goal).map_err(|e| e.to_string())?;

    serde_json::to_string(&PlanResponse::from(plan)).map_err(|e| e.to_string())
}
