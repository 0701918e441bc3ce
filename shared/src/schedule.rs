//! Weekly schedule allocation
//!
//! Distributes a daily calorie target across a Monday..Sunday week.
//!
//! # Strategies
//!
//! - **Standard**: every day gets the daily target.
//! - **Weekender**: Friday and Saturday get 15% more each, paid for by the
//!   other five days, within the ±20% cap and never below the safety floor.
//!   If the floor throttles the reduction, the Fri/Sat increase shrinks with
//!   it and the weekly average rises slightly rather than dropping.
//! - **Auto**: same as standard when the plan is created.

use crate::metabolic::round_kcal;
use crate::safety::CappedBounds;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of the daily target added to each weekend day
const WEEKENDER_INCREASE_FRACTION: f64 = 0.15;

/// Allocation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    #[default]
    Standard,
    Weekender,
    Auto,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Standard => "standard",
            PlanType::Weekender => "weekender",
            PlanType::Auto => "auto",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(PlanType::Standard),
            "weekender" => Ok(PlanType::Weekender),
            "auto" => Ok(PlanType::Auto),
            _ => Err(format!("Unknown plan type: {}", s)),
        }
    }
}

/// Day of the schedule week, Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// Schedule order
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Position in the schedule array
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

    pub fn is_weekend_boost(&self) -> bool {
        matches!(self, Weekday::Fri | Weekday::Sat)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day of a weekly schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCalories {
    pub day: Weekday,
    pub calories: i32,
}

/// Seven days, Monday..Sunday
pub type WeeklySchedule = [DayCalories; 7];

/// Pair each weekday with the matching value
pub fn schedule_from_values(values: [i32; 7]) -> WeeklySchedule {
    Weekday::ALL.map(|day| DayCalories {
        day,
        calories: values[day.index()],
    })
}

/// Calories only, in schedule order
pub fn schedule_values(schedule: &WeeklySchedule) -> [i32; 7] {
    schedule.map(|d| d.calories)
}

/// Distribute `daily_calories` over the week for `plan_type`
pub fn allocate(plan_type: PlanType, daily_calories: f64, bmr: i32) -> WeeklySchedule {
    match plan_type {
        PlanType::Standard | PlanType::Auto => uniform(daily_calories),
        PlanType::Weekender => weekender(daily_calories, bmr),
    }
}

fn uniform(daily_calories: f64) -> WeeklySchedule {
    schedule_from_values([round_kcal(daily_calories); 7])
}

fn weekender(daily_calories: f64, bmr: i32) -> WeeklySchedule {
    let bounds = CappedBounds::new(daily_calories, bmr);

    let desired_increase_total = 2.0 * daily_calories * WEEKENDER_INCREASE_FRACTION;
    let max_reduction_total = 5.0 * (daily_calories - bounds.floor).max(0.0);
    let actual_increase_total = desired_increase_total.min(max_reduction_total);

    let increase_each = actual_increase_total / 2.0;
    let reduction_per_weekday = actual_increase_total / 5.0;

    Weekday::ALL.map(|day| {
        let raw = if day.is_weekend_boost() {
            daily_calories + increase_each
        } else {
            daily_calories - reduction_per_weekday
        };
        DayCalories {
            day,
            calories: round_kcal(bounds.clamp(raw)),
        }
    })
}
