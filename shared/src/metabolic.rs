//! Metabolic baseline calculations
//!
//! BMR via the Mifflin-St Jeor equation on imperial inputs, and TDEE via the
//! standard activity multipliers.
//!
//! Neither function fails. Insufficient data yields a BMR of `0`, which
//! callers must read as "cannot plan" rather than as a real value.

use crate::profile::{ActivityLevel, Profile, Sex};
use serde::{Deserialize, Serialize};

/// Male offset added to the Mifflin-St Jeor base
const MALE_OFFSET: f64 = 5.0;
/// Offset for every non-male sex
const FEMALE_OFFSET: f64 = -161.0;

/// Metabolic baseline derived from a profile snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetabolicResult {
    /// Basal Metabolic Rate (kcal/day)
    pub bmr: i32,
    /// Total Daily Energy Expenditure (kcal/day)
    pub tdee: i32,
}

impl MetabolicResult {
    /// Whether the profile held enough data to compute a baseline
    pub fn is_usable(&self) -> bool {
        self.bmr > 0
    }
}

/// Mifflin-St Jeor on pounds and inches
///
/// base = 10 × weight(lb) + 6.25 × height(in) - 5 × age(y)
pub fn bmr_mifflin_imperial(weight_lbs: f64, height_inches: f64, age_years: u32, sex: Sex) -> f64 {
    let base = 10.0 * weight_lbs + 6.25 * height_inches - 5.0 * age_years as f64;
    match sex {
        Sex::Male => base + MALE_OFFSET,
        Sex::Female | Sex::Other | Sex::Unspecified => base + FEMALE_OFFSET,
    }
}

/// Compute BMR for a profile, or `0` if age, weight, height or sex is missing
pub fn compute_bmr(profile: &Profile) -> i32 {
    let (Some(age), Some(weight), Some(height), Some(sex)) = (
        profile.age_years,
        profile.weight_lbs,
        profile.height(),
        profile.sex,
    ) else {
        return 0;
    };

    let bmr = bmr_mifflin_imperial(weight, height.total_inches() as f64, age, sex);
    round_kcal(bmr.max(0.0))
}

/// TDEE = BMR × activity multiplier, rounded
pub fn compute_tdee(bmr: i32, activity_level: ActivityLevel) -> i32 {
    round_kcal(bmr as f64 * activity_level.multiplier())
}

/// Compute both BMR and TDEE for a profile
pub fn compute_metabolic(profile: &Profile) -> MetabolicResult {
    let bmr = compute_bmr(profile);
    MetabolicResult {
        bmr,
        tdee: compute_tdee(bmr, profile.activity_level),
    }
}

/// Round a calorie amount to the nearest whole kcal
pub(crate) fn round_kcal(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn profile(age: u32, weight: f64, height: &str, sex: Sex) -> Profile {
        Profile {
            age_years: Some(age),
            weight_lbs: Some(weight),
            height_text: Some(height.to_string()),
            sex: Some(sex),
            activity_level: ActivityLevel::Sedentary,
        }
    }

    #[test]
    fn test_bmr_reference_vector() {
        // 1540 + 437.5 - 150 + 5 = 1832.5
        let bmr = compute_bmr(&profile(30, 154.0, "5'10\"", Sex::Male));
        assert_eq!(bmr, 1833);
    }

    #[test]
    fn test_bmr_six_foot_male() {
        // 10*200 + 6.25*72 - 5*45 + 5
        let bmr = compute_bmr(&profile(45, 200.0, "6'0\"", Sex::Male));
        assert_eq!(bmr, 2230);
    }

    #[rstest]
    #[case(Sex::Female)]
    #[case(Sex::Other)]
    #[case(Sex::Unspecified)]
    fn test_non_male_sexes_use_female_offset(#[case] sex: Sex) {
        let male = compute_bmr(&profile(30, 154.0, "5'10\"", Sex::Male));
        let other = compute_bmr(&profile(30, 154.0, "5'10\"", sex));
        // 1832.5 -> 1833 vs 1666.5 -> 1667
        assert_eq!(male - other, 166);
    }

    #[test]
    fn test_bmr_zero_when_height_unparseable() {
        let bmr = compute_bmr(&profile(30, 154.0, "178cm", Sex::Male));
        assert_eq!(bmr, 0);
    }

    #[test]
    fn test_bmr_zero_when_any_field_missing() {
        let complete = profile(30, 154.0, "5'10\"", Sex::Male);

        let no_age = Profile { age_years: None, ..complete.clone() };
        let no_weight = Profile { weight_lbs: None, ..complete.clone() };
        let no_height = Profile { height_text: None, ..complete.clone() };
        let no_sex = Profile { sex: None, ..complete };

        for p in [no_age, no_weight, no_height, no_sex] {
            assert_eq!(compute_bmr(&p), 0);
        }
    }

    #[rstest]
    #[case(ActivityLevel::Sedentary, 2198)]
    #[case(ActivityLevel::Light, 2519)]
    #[case(ActivityLevel::Moderate, 2840)]
    #[case(ActivityLevel::Very, 3160)]
    #[case(ActivityLevel::Extra, 3481)]
    fn test_tdee_multipliers(#[case] level: ActivityLevel, #[case] expected: i32) {
        assert_eq!(compute_tdee(1832, level), expected);
    }

    #[test]
    fn test_metabolic_result_unusable_without_data() {
        let empty = Profile {
            age_years: None,
            weight_lbs: None,
            height_text: None,
            sex: None,
            activity_level: ActivityLevel::Extra,
        };
        let result = compute_metabolic(&empty);
        assert_eq!(result, MetabolicResult { bmr: 0, tdee: 0 });
        assert!(!result.is_usable());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: sedentary TDEE is BMR × 1.2 rounded
        #[test]
        fn prop_sedentary_tdee(
            weight in 90.0f64..400.0,
            feet in 4u32..7,
            inches in 0u32..12,
            age in 18u32..90
        ) {
            let p = profile(age, weight, &format!("{}'{}\"", feet, inches), Sex::Female);
            let bmr = compute_bmr(&p);
            prop_assert_eq!(compute_tdee(bmr, ActivityLevel::Sedentary), (bmr as f64 * 1.2).round() as i32);
        }

        /// Property: TDEE never falls below BMR
        #[test]
        fn prop_tdee_at_least_bmr(bmr in 0i32..5000) {
            for level in [
                ActivityLevel::Sedentary,
                ActivityLevel::Light,
                ActivityLevel::Moderate,
                ActivityLevel::Very,
                ActivityLevel::Extra,
            ] {
                prop_assert!(compute_tdee(bmr, level) >= bmr);
            }
        }

        /// Property: BMR is never negative
        #[test]
        fn prop_bmr_non_negative(weight in 1.0f64..500.0, age in 1u32..150) {
            let p = profile(age, weight, "4'0\"", Sex::Female);
            prop_assert!(compute_bmr(&p) >= 0);
        }
    }
}
