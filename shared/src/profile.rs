//! Profile resolution
//!
//! Turns the loosely-typed snapshot handed out by the profile store into a
//! [`Profile`] the metabolic calculator can consume. Resolution never fails:
//! anything absent or unusable is left as `None` and reported through
//! [`Profile::missing_fields`].

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Sex and Activity Level
// ============================================================================

/// Sex as recorded in the user's profile
///
/// Only `Male` selects the male Mifflin-St Jeor offset; every other value
/// uses the female constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
    Other,
    Unspecified,
}

impl Sex {
    /// Parse a free-form gender string, mapping anything unknown to `Unspecified`
    pub fn parse_lossy(value: &str) -> Self {
        value.parse().unwrap_or(Sex::Unspecified)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Other => "other",
            Sex::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            "other" => Ok(Sex::Other),
            "unspecified" => Ok(Sex::Unspecified),
            _ => Err(format!("Unknown sex: {}", s)),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    #[default]
    #[serde(alias = "lightly_active")]
    Light,
    /// Moderate exercise 3-5 days/week
    #[serde(alias = "moderately_active")]
    Moderate,
    /// Hard exercise 6-7 days/week
    #[serde(alias = "very_active")]
    Very,
    /// Very hard exercise, physical job
    #[serde(alias = "extra_active")]
    Extra,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Very => 1.725,
            ActivityLevel::Extra => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Very => "very",
            ActivityLevel::Extra => "extra",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightly_active" => Ok(ActivityLevel::Light),
            "moderate" | "moderately_active" => Ok(ActivityLevel::Moderate),
            "very" | "very_active" => Ok(ActivityLevel::Very),
            "extra" | "extra_active" => Ok(ActivityLevel::Extra),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

// ============================================================================
// Height Text
// ============================================================================

static HEIGHT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(\d+)\s*'\s*(\d+)\s*"\s*$"#).expect("height pattern is a valid regex")
});

/// Height expressed as feet and inches, e.g. `5'11"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeetInchesHeight {
    pub feet: u32,
    pub inches: u32,
}

impl FeetInchesHeight {
    /// Parse `<feet>'<inches>"`; returns `None` for anything else
    pub fn parse(text: &str) -> Option<Self> {
        let caps = HEIGHT_PATTERN.captures(text)?;
        let feet = caps.get(1)?.as_str().parse().ok()?;
        let inches = caps.get(2)?.as_str().parse().ok()?;
        Some(Self { feet, inches })
    }

    /// Create from total inches
    pub fn from_total_inches(total_inches: u32) -> Self {
        Self {
            feet: total_inches / 12,
            inches: total_inches % 12,
        }
    }

    /// Convert to total inches
    pub fn total_inches(&self) -> u32 {
        self.feet * 12 + self.inches
    }
}

impl fmt::Display for FeetInchesHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}

// ============================================================================
// Profiles
// ============================================================================

/// Raw profile snapshot as returned by the profile store
///
/// Weight usually comes from a separate "latest weight log" lookup and is
/// merged in by the store adapter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Height text such as `5'11"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// Latest weight in pounds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
}

/// Normalized biometric profile used by the metabolic calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub age_years: Option<u32>,
    pub weight_lbs: Option<f64>,
    pub height_text: Option<String>,
    pub sex: Option<Sex>,
    pub activity_level: ActivityLevel,
}

impl Profile {
    /// Parsed height, `None` when absent or not in `N'M"` form
    pub fn height(&self) -> Option<FeetInchesHeight> {
        self.height_text.as_deref().and_then(FeetInchesHeight::parse)
    }

    /// Fields that keep BMR from being computed, in display order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.age_years.is_none() {
            missing.push("age");
        }
        if self.weight_lbs.is_none() {
            missing.push("weight");
        }
        if self.height().is_none() {
            missing.push("height");
        }
        if self.sex.is_none() {
            missing.push("sex");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Normalizes [`StoredProfile`] snapshots into [`Profile`] values
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileResolver {
    default_activity_level: ActivityLevel,
}

impl ProfileResolver {
    pub fn new(default_activity_level: ActivityLevel) -> Self {
        Self {
            default_activity_level,
        }
    }

    /// Resolve a store snapshot
    ///
    /// Zero ages, non-positive or non-finite weights and blank strings are
    /// treated as not populated. An unknown activity level falls back to the
    /// resolver's default.
    pub fn resolve(&self, stored: &StoredProfile) -> Profile {
        let age_years = stored.age.filter(|&age| age > 0);
        let weight_lbs = stored.weight.filter(|w| w.is_finite() && *w > 0.0);
        let height_text = stored
            .height
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string);
        let sex = stored
            .gender
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(Sex::parse_lossy);
        let activity_level = stored
            .activity_level
            .as_deref()
            .and_then(|level| level.parse().ok())
            .unwrap_or(self.default_activity_level);

        Profile {
            age_years,
            weight_lbs,
            height_text,
            sex,
            activity_level,
        }
    }
}
