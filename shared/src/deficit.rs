//! Goal deficit calculation
//!
//! Converts a weekly weight-change rate into a daily deficit, a safe daily
//! calorie target, and a timeline estimate.

use crate::metabolic::{round_kcal, MetabolicResult};
use crate::safety::min_safe_calories;
use crate::schedule::PlanType;
use serde::{Deserialize, Serialize};

/// 1 lb ≈ 3500 kcal, so 1 lb/week ≈ 500 kcal/day
pub const KCAL_PER_DAY_PER_LB_WEEK: f64 = 500.0;

/// User-supplied goal for a planning session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalInput {
    pub target_weight_lbs: f64,
    /// One of 0.5, 1, 1.5, 2, 2.5
    pub weight_change_rate_lbs_per_week: f64,
    pub plan_type: PlanType,
}

/// Deficit and target derived from a goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeficitPlan {
    pub weight_to_lose_abs: f64,
    /// Daily deficit in kcal; named for parity with the persisted plan
    pub weekly_deficit: i32,
    pub min_safe_calories: i32,
    pub daily_calories: i32,
    pub timeline_weeks: u32,
    /// The requested rate was not honored because the floor won
    pub floor_applied: bool,
}

/// Daily deficit for a weekly rate
pub fn daily_deficit(rate_lbs_per_week: f64) -> i32 {
    round_kcal(rate_lbs_per_week * KCAL_PER_DAY_PER_LB_WEEK)
}

/// Weeks needed to cover `weight_to_lose` at `rate`; 0 if the rate is not positive
pub fn timeline_weeks(weight_to_lose: f64, rate_lbs_per_week: f64) -> u32 {
    if rate_lbs_per_week <= 0.0 || !weight_to_lose.is_finite() {
        return 0;
    }
    (weight_to_lose / rate_lbs_per_week).ceil().max(0.0) as u32
}

/// Whether `tdee - deficit` falls under the floor for this BMR
pub fn floor_applied(tdee: i32, deficit: i32, bmr: i32) -> bool {
    tdee - deficit < min_safe_calories(bmr)
}

/// Compute the deficit plan for a goal
///
/// An overly aggressive rate never pushes the target below the safety
/// floor; the floor silently wins and `floor_applied` is set.
pub fn compute_deficit(
    current_weight_lbs: f64,
    goal: &GoalInput,
    metabolic: &MetabolicResult,
) -> DeficitPlan {
    let weight_to_lose_abs = (current_weight_lbs - goal.target_weight_lbs).abs();
    let weekly_deficit = daily_deficit(goal.weight_change_rate_lbs_per_week);
    let min_safe = min_safe_calories(metabolic.bmr);

    DeficitPlan {
        weight_to_lose_abs,
        weekly_deficit,
        min_safe_calories: min_safe,
        daily_calories: (metabolic.tdee - weekly_deficit).max(min_safe),
        timeline_weeks: timeline_weeks(weight_to_lose_abs, goal.weight_change_rate_lbs_per_week),
        floor_applied: floor_applied(metabolic.tdee, weekly_deficit, metabolic.bmr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn goal(target: f64, rate: f64) -> GoalInput {
        GoalInput {
            target_weight_lbs: target,
            weight_change_rate_lbs_per_week: rate,
            plan_type: PlanType::Standard,
        }
    }

    #[test]
    fn test_reference_scenario() {
        let metabolic = MetabolicResult { bmr: 1862, tdee: 2560 };
        let plan = compute_deficit(200.0, &goal(180.0, 1.0), &metabolic);

        assert_eq!(plan.weight_to_lose_abs, 20.0);
        assert_eq!(plan.weekly_deficit, 500);
        assert_eq!(plan.min_safe_calories, 1490);
        assert_eq!(plan.daily_calories, 2060);
        assert_eq!(plan.timeline_weeks, 20);
        assert!(!plan.floor_applied);
    }

    #[test]
    fn test_floor_wins_over_aggressive_rate() {
        let metabolic = MetabolicResult { bmr: 1400, tdee: 1680 };
        let plan = compute_deficit(160.0, &goal(140.0, 2.5), &metabolic);

        // 1680 - 1250 = 430, floor is 1200
        assert_eq!(plan.daily_calories, 1200);
        assert!(plan.floor_applied);
    }

    #[rstest]
    #[case(0.5, 250)]
    #[case(1.0, 500)]
    #[case(1.5, 750)]
    #[case(2.0, 1000)]
    #[case(2.5, 1250)]
    fn test_daily_deficit_per_rate(#[case] rate: f64, #[case] expected: i32) {
        assert_eq!(daily_deficit(rate), expected);
    }

    #[rstest]
    #[case(20.0, 1.0, 20)]
    #[case(21.0, 2.0, 11)]
    #[case(0.0, 1.0, 0)]
    #[case(10.0, 0.0, 0)]
    fn test_timeline_rounds_up(#[case] lose: f64, #[case] rate: f64, #[case] expected: u32) {
        assert_eq!(timeline_weeks(lose, rate), expected);
    }

    #[test]
    fn test_target_above_current_uses_absolute_difference() {
        let metabolic = MetabolicResult { bmr: 1600, tdee: 2200 };
        let plan = compute_deficit(150.0, &goal(160.0, 0.5), &metabolic);
        assert_eq!(plan.weight_to_lose_abs, 10.0);
        assert_eq!(plan.timeline_weeks, 20);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: daily target never drops below the safety floor
        #[test]
        fn prop_daily_at_least_floor(
            bmr in 800i32..3000,
            multiplier in 1.2f64..1.9,
            rate_idx in 0usize..5,
            current in 100.0f64..400.0,
            target in 100.0f64..400.0
        ) {
            let rate = [0.5, 1.0, 1.5, 2.0, 2.5][rate_idx];
            let metabolic = MetabolicResult { bmr, tdee: (bmr as f64 * multiplier).round() as i32 };
            let plan = compute_deficit(current, &goal(target, rate), &metabolic);
            prop_assert!(plan.daily_calories >= plan.min_safe_calories);
            prop_assert_eq!(plan.floor_applied, plan.daily_calories == plan.min_safe_calories
                && metabolic.tdee - plan.weekly_deficit < plan.min_safe_calories);
        }
    }
}
