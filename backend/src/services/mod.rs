//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the planning engine and the stores.

pub mod nutrition_goal;
pub mod profile;

pub use nutrition_goal::{ActiveGoal, NutritionGoalService};
pub use profile::ProfileService;
