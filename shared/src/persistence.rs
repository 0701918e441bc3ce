//! Persisted goal mapping
//!
//! Converts between [`PlanResult`] and the flat [`PersistedNutritionGoal`]
//! record kept in the settings store, and resolves the calorie target for a
//! given calendar date.
//!
//! The persisted schedule is a bare 7-element array; day labels are
//! reconstructed positionally (index 0 = Monday). Reads tolerate partial or
//! malformed records: any optional field that fails to parse is treated as
//! absent instead of rejecting the whole record.

use crate::deficit::{daily_deficit, floor_applied};
use crate::plan::{PlanResult, PlanRules};
use crate::profile::ActivityLevel;
use crate::safety::min_safe_calories;
use crate::schedule::{schedule_from_values, schedule_values, PlanType, Weekday};
use chrono::{Datelike, Days, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Durable nutrition goal record
///
/// Saved wholesale (no partial updates). `enabled: false` is a soft delete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedNutritionGoal {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub start_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub weight_change_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,
    #[serde(default, deserialize_with = "lenient_kcal", skip_serializing_if = "Option::is_none")]
    pub daily_calorie_target: Option<i32>,
    #[serde(default, deserialize_with = "lenient_schedule", skip_serializing_if = "Option::is_none")]
    pub weekly_schedule: Option<Vec<i32>>,
    #[serde(default, deserialize_with = "lenient_kcal", skip_serializing_if = "Option::is_none")]
    pub min_safe_calories: Option<i32>,
    #[serde(default, deserialize_with = "lenient_kcal", skip_serializing_if = "Option::is_none")]
    pub bmr: Option<i32>,
    #[serde(default, deserialize_with = "lenient_kcal", skip_serializing_if = "Option::is_none")]
    pub tdee: Option<i32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timeline_weeks: Option<u32>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub estimated_end_date: Option<NaiveDate>,
}

impl PersistedNutritionGoal {
    /// The record written to soft-delete a goal when none existed
    pub fn disabled() -> Self {
        Self::default()
    }

    /// The stored schedule, only if it has exactly seven entries
    pub fn schedule(&self) -> Option<[i32; 7]> {
        self.weekly_schedule
            .as_deref()
            .and_then(|values| <[i32; 7]>::try_from(values).ok())
    }
}

/// Settings store snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition_goal: Option<PersistedNutritionGoal>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

fn lenient_kcal<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = lenient(deserializer)?;
    Ok(value.filter(|v| v.is_finite()).map(|v| v.round() as i32))
}

fn lenient_schedule<'de, D>(deserializer: D) -> Result<Option<Vec<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<Vec<f64>> = lenient(deserializer)?;
    Ok(value.and_then(|days| {
        days.into_iter()
            .map(|v| v.is_finite().then(|| v.round() as i32))
            .collect()
    }))
}

/// Schedule index for a calendar date, Monday = 0
///
/// Weekday numbering that starts at Sunday = 0 is shifted so the index lines
/// up with the Monday-first schedule array.
pub fn schedule_index_for_date(date: NaiveDate) -> usize {
    let days_from_sunday = date.weekday().num_days_from_sunday() as usize;
    (days_from_sunday + 6) % 7
}

/// Schedule weekday for a calendar date
pub fn weekday_for_date(date: NaiveDate) -> Weekday {
    Weekday::ALL[schedule_index_for_date(date)]
}

/// Flatten a plan into its persisted form
pub fn to_record(plan: &PlanResult, start_date: NaiveDate) -> PersistedNutritionGoal {
    let estimated_end_date =
        start_date.checked_add_days(Days::new(u64::from(plan.timeline_weeks) * 7));

    PersistedNutritionGoal {
        enabled: true,
        start_date: Some(start_date),
        start_weight: Some(plan.current_weight),
        target_weight: Some(plan.target_weight),
        activity_level: Some(plan.activity_level),
        weight_change_rate: Some(plan.weight_change_rate),
        plan_type: Some(plan.plan_type),
        daily_calorie_target: Some(plan.daily_calories),
        weekly_schedule: Some(schedule_values(&plan.schedule).to_vec()),
        min_safe_calories: Some(plan.rules.min_safe_calories),
        bmr: Some(plan.bmr),
        tdee: Some(plan.tdee),
        timeline_weeks: Some(plan.timeline_weeks),
        estimated_end_date,
    }
}

/// Calorie target for `date`
///
/// Falls back to the flat daily target when the stored schedule is missing
/// or not seven days long, and to `0` if that is missing as well.
pub fn resolve_day_target(record: &PersistedNutritionGoal, date: NaiveDate) -> i32 {
    match record.schedule() {
        Some(values) => values[schedule_index_for_date(date)],
        None => record.daily_calorie_target.unwrap_or(0),
    }
}

/// Rebuild a plan from its persisted form for display or editing
///
/// A missing or malformed schedule comes back as seven zero days.
pub fn from_record(record: &PersistedNutritionGoal) -> PlanResult {
    let current_weight = record.start_weight.unwrap_or(0.0);
    let target_weight = record.target_weight.unwrap_or(0.0);
    let bmr = record.bmr.unwrap_or(0);
    let tdee = record.tdee.unwrap_or(0);
    let weight_change_rate = record.weight_change_rate.unwrap_or(0.0);
    let weekly_deficit = daily_deficit(weight_change_rate);
    let plan_type = record.plan_type.unwrap_or_default();
    let min_safe = record.min_safe_calories.unwrap_or_else(|| min_safe_calories(bmr));

    PlanResult {
        current_weight,
        target_weight,
        weight_to_lose_abs: (current_weight - target_weight).abs(),
        bmr,
        tdee,
        daily_calories: record.daily_calorie_target.unwrap_or(0),
        weekly_deficit,
        timeline_weeks: record.timeline_weeks.unwrap_or(0),
        activity_level: record.activity_level.unwrap_or_default(),
        weight_change_rate,
        plan_type,
        schedule: schedule_from_values(record.schedule().unwrap_or([0; 7])),
        rules: PlanRules::new(min_safe, plan_type),
        floor_applied: bmr > 0 && floor_applied(tdee, weekly_deficit, bmr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deficit::GoalInput;
    use crate::plan::build_plan;
    use crate::profile::{Profile, Sex};
    use proptest::prelude::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekender_plan() -> PlanResult {
        let profile = Profile {
            age_years: Some(38),
            weight_lbs: Some(185.0),
            height_text: Some("5'6\"".to_string()),
            sex: Some(Sex::Female),
            activity_level: ActivityLevel::Moderate,
        };
        let goal = GoalInput {
            target_weight_lbs: 160.0,
            weight_change_rate_lbs_per_week: 1.5,
            plan_type: PlanType::Weekender,
        };
        build_plan(&profile, &goal).unwrap()
    }

    #[test]
    fn test_schedule_index_monday_first() {
        // 2024-01-01 was a Monday, 2024-01-07 a Sunday
        assert_eq!(schedule_index_for_date(date(2024, 1, 1)), 0);
        assert_eq!(schedule_index_for_date(date(2024, 1, 5)), 4);
        assert_eq!(schedule_index_for_date(date(2024, 1, 6)), 5);
        assert_eq!(schedule_index_for_date(date(2024, 1, 7)), 6);
        assert_eq!(weekday_for_date(date(2024, 1, 7)), Weekday::Sun);
    }

    #[test]
    fn test_to_record_flattens_plan() {
        let plan = weekender_plan();
        let record = to_record(&plan, date(2024, 3, 4));

        assert!(record.enabled);
        assert_eq!(record.weekly_schedule.as_ref().map(Vec::len), Some(7));
        assert_eq!(record.daily_calorie_target, Some(plan.daily_calories));
        assert_eq!(record.min_safe_calories, Some(plan.rules.min_safe_calories));
        assert_eq!(
            record.estimated_end_date,
            Some(date(2024, 3, 4) + chrono::Duration::weeks(plan.timeline_weeks as i64))
        );
    }

    #[test]
    fn test_record_round_trips_through_json() {
        let record = to_record(&weekender_plan(), date(2024, 3, 4));
        let json = serde_json::to_string(&record).unwrap();
        let back: PersistedNutritionGoal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_from_record_restores_schedule_and_rules() {
        let plan = weekender_plan();
        let restored = from_record(&to_record(&plan, date(2024, 3, 4)));
        assert_eq!(restored, plan);
    }

    #[test]
    fn test_resolve_day_target_matches_schedule_for_every_weekday() {
        let plan = weekender_plan();
        let record = to_record(&plan, date(2024, 3, 4));
        let restored = from_record(&record);

        // 2024-03-04 is a Monday
        for offset in 0..7u64 {
            let day = date(2024, 3, 4).checked_add_days(Days::new(offset)).unwrap();
            let index = schedule_index_for_date(day);
            assert_eq!(resolve_day_target(&record, day), plan.schedule[index].calories);
            assert_eq!(restored.schedule[index].day, Weekday::ALL[offset as usize]);
        }
    }

    #[test]
    fn test_short_schedule_falls_back_to_daily_target() {
        let record = PersistedNutritionGoal {
            enabled: true,
            daily_calorie_target: Some(1800),
            weekly_schedule: Some(vec![1700, 1700, 1700]),
            ..Default::default()
        };
        assert_eq!(resolve_day_target(&record, date(2024, 1, 3)), 1800);
        assert!(from_record(&record).schedule.iter().all(|d| d.calories == 0));
    }

    #[test]
    fn test_disabled_record_parses_and_resolves_to_zero() {
        let record: PersistedNutritionGoal =
            serde_json::from_value(json!({ "enabled": false })).unwrap();
        assert_eq!(record, PersistedNutritionGoal::disabled());
        assert_eq!(resolve_day_target(&record, date(2024, 1, 3)), 0);
        assert_eq!(serde_json::to_value(&record).unwrap(), json!({ "enabled": false }));
    }

    #[test]
    fn test_malformed_fields_are_dropped_not_fatal() {
        let record: PersistedNutritionGoal = serde_json::from_value(json!({
            "enabled": true,
            "plan_type": "keto",
            "weekly_schedule": ["a", "b"],
            "daily_calorie_target": 2100.4,
            "start_date": "not-a-date",
            "bmr": null
        }))
        .unwrap();

        assert_eq!(record.plan_type, None);
        assert_eq!(record.weekly_schedule, None);
        assert_eq!(record.daily_calorie_target, Some(2100));
        assert_eq!(record.start_date, None);
        assert_eq!(record.bmr, None);
        assert_eq!(resolve_day_target(&record, date(2024, 1, 3)), 2100);
    }

    #[test]
    fn test_float_schedule_values_are_accepted() {
        let record: PersistedNutritionGoal = serde_json::from_value(json!({
            "enabled": true,
            "weekly_schedule": [1900.0, 1900.0, 1900.0, 1900.0, 2200.0, 2200.0, 1900.0]
        }))
        .unwrap();
        assert_eq!(record.schedule(), Some([1900, 1900, 1900, 1900, 2200, 2200, 1900]));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: day resolution agrees with chrono's Monday-based numbering
        #[test]
        fn prop_index_matches_monday_numbering(days in 0i64..20000) {
            let day = date(1990, 1, 1) + chrono::Duration::days(days);
            prop_assert_eq!(
                schedule_index_for_date(day),
                day.weekday().num_days_from_monday() as usize
            );
        }
    }
}
