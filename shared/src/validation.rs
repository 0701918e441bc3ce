//! Input validation functions
//!
//! Custom validators for goal and profile input. Request DTOs in
//! [`crate::types`] also use `validator` derives for simple range checks.

use crate::deficit::GoalInput;
use crate::profile::{ActivityLevel, FeetInchesHeight, Sex};

/// Weekly weight-change rates the planner accepts (lbs/week)
pub const ALLOWED_RATES: &[f64] = &[0.5, 1.0, 1.5, 2.0, 2.5];

/// Validate a weekly weight-change rate
pub fn validate_rate(rate: f64) -> Result<(), String> {
    if ALLOWED_RATES.iter().any(|&allowed| (allowed - rate).abs() < f64::EPSILON) {
        Ok(())
    } else {
        Err(format!(
            "Weight change rate must be one of: {}",
            ALLOWED_RATES
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    }
}

/// Validate a target weight (in lbs)
pub fn validate_target_weight(weight_lbs: f64) -> Result<(), String> {
    if weight_lbs.is_nan() || weight_lbs.is_infinite() {
        return Err("Target weight must be a valid number".to_string());
    }
    if weight_lbs < 50.0 {
        return Err("Target weight must be at least 50 lbs".to_string());
    }
    if weight_lbs > 1000.0 {
        return Err("Target weight must be at most 1000 lbs".to_string());
    }
    Ok(())
}

/// Validate a complete goal input
pub fn validate_goal_input(goal: &GoalInput) -> Result<(), String> {
    validate_target_weight(goal.target_weight_lbs)?;
    validate_rate(goal.weight_change_rate_lbs_per_week)
}

// ============================================================================
// Profile Validation
// ============================================================================

/// Validate age in years
pub fn validate_age(age: u32) -> Result<(), String> {
    if age < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate height text in `N'M"` form
pub fn validate_height_text(height: &str) -> Result<(), String> {
    let parsed = FeetInchesHeight::parse(height)
        .ok_or_else(|| "Height must look like 5'11\"".to_string())?;
    if parsed.inches >= 12 {
        return Err("Inches must be less than 12".to_string());
    }
    if parsed.feet == 0 || parsed.feet > 9 {
        return Err("Height must be between 1 and 9 feet".to_string());
    }
    Ok(())
}

/// Valid gender values
pub const VALID_GENDERS: &[&str] = &["male", "female", "other", "unspecified"];

/// Validate gender
pub fn validate_gender(gender: &str) -> Result<(), String> {
    gender.parse::<Sex>().map(|_| ()).map_err(|_| {
        format!(
            "Invalid gender. Must be one of: {}",
            VALID_GENDERS.join(", ")
        )
    })
}

/// Valid activity levels
pub const VALID_ACTIVITY_LEVELS: &[&str] = &["sedentary", "light", "moderate", "very", "extra"];

/// Validate activity level
pub fn validate_activity_level(level: &str) -> Result<(), String> {
    level.parse::<ActivityLevel>().map(|_| ()).map_err(|_| {
        format!(
            "Invalid activity level. Must be one of: {}",
            VALID_ACTIVITY_LEVELS.join(", ")
        )
    })
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "age" => "Age",
        "weight" => "Current Weight",
        "height" => "Height",
        "sex" | "gender" => "Sex",
        "activity_level" => "Activity Level",
        "target_weight" => "Target Weight",
        "weight_change_rate" => "Weekly Rate",
        "plan_type" => "Plan Type",
        _ => field_name,
    }
}
