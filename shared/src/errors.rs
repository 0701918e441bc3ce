//! Error types for the planning engine

use thiserror::Error;

/// Reasons a nutrition plan cannot be built
///
/// Computation helpers themselves never fail; they fall back to safe
/// defaults. This error is raised only where a fallback would produce a
/// plausible-looking but meaningless plan.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanError {
    /// BMR came out as zero, so no calorie target can be derived
    #[error("Insufficient profile data: missing {}", .missing.join(", "))]
    InsufficientProfile { missing: Vec<String> },

    /// Every field is present but together they give no positive BMR
    #[error("Profile values give no usable BMR (age {age} years, weight {weight_lbs} lb, height {height}); check them")]
    UnusableProfile {
        age: u32,
        weight_lbs: f64,
        height: String,
    },

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),
}

impl PlanError {
    /// Build an `InsufficientProfile` error from static field names
    pub fn insufficient(missing: &[&str]) -> Self {
        PlanError::InsufficientProfile {
            missing: missing.iter().map(|s| s.to_string()).collect(),
        }
    }
}
