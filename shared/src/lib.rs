//! Nutrition Planner Shared Library
//!
//! The nutrition goal planning engine plus the API types shared by the
//! backend and WASM modules. Everything here is synchronous and free of I/O.
//!
//! Planning flows through the modules in this order: [`profile`] resolves a
//! stored profile, [`metabolic`] computes BMR/TDEE, [`deficit`] derives the
//! daily target under the [`safety`] floor, [`schedule`] spreads it over the
//! week, and [`persistence`] flattens the result for storage.

pub mod deficit;
pub mod errors;
pub mod metabolic;
pub mod persistence;
pub mod plan;
pub mod profile;
pub mod safety;
pub mod schedule;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use deficit::{compute_deficit, DeficitPlan, GoalInput};
pub use errors::*;
pub use metabolic::{compute_bmr, compute_metabolic, compute_tdee, MetabolicResult};
pub use persistence::{
    from_record, resolve_day_target, schedule_index_for_date, to_record, PersistedNutritionGoal,
    UserSettings,
};
pub use plan::{build_plan, PlanResult, PlanRules};
pub use profile::{ActivityLevel, FeetInchesHeight, Profile, ProfileResolver, Sex, StoredProfile};
pub use safety::{min_safe_calories, CappedBounds};
pub use schedule::{allocate, DayCalories, PlanType, WeeklySchedule, Weekday};
pub use types::*;
