//! Safety floor and cap rules
//!
//! The floor is a hard minimum for any daily target. The cap bounds how far
//! a single day of a redistributed schedule may drift from the base target.

use crate::metabolic::round_kcal;

/// Absolute minimum daily calories regardless of BMR
pub const ABSOLUTE_MIN_CALORIES: i32 = 1200;

/// Fraction of BMR that the floor never drops below
const BMR_FLOOR_FRACTION: f64 = 0.8;

/// Maximum deviation of any scheduled day from the base target, in percent
pub const CAP_PERCENT: u32 = 20;

/// Minimum safe daily calories: `max(1200, round(bmr × 0.8))`
pub fn min_safe_calories(bmr: i32) -> i32 {
    ABSOLUTE_MIN_CALORIES.max(round_kcal(bmr as f64 * BMR_FLOOR_FRACTION))
}

/// Cap as a fraction (0.2)
pub fn cap_fraction() -> f64 {
    CAP_PERCENT as f64 / 100.0
}

/// Lower and upper bounds for a scheduled day around `base_target`
///
/// The lower bound is the capped floor `max(min_safe_calories, base × 0.8)`;
/// the upper bound is `base × 1.2`. Values are left unrounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CappedBounds {
    pub floor: f64,
    pub ceiling: f64,
}

impl CappedBounds {
    pub fn new(base_target: f64, bmr: i32) -> Self {
        let cap = cap_fraction();
        Self {
            floor: (min_safe_calories(bmr) as f64).max(base_target * (1.0 - cap)),
            ceiling: base_target * (1.0 + cap),
        }
    }

    /// Clamp into the bounds; if they cross, the floor wins
    pub fn clamp(&self, value: f64) -> f64 {
        value.min(self.ceiling).max(self.floor)
    }
}
