//! Derived body metrics
//!
//! Computes BMR, TDEE-based calorie targets, macro goals, water goal and BMI
//! from a user's body profile.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: no I/O, deterministic for a given input
//! 2. **Total**: missing profile data is defaulted, never rejected
//! 3. **Single source of defaults**: every caller goes through
//!    [`ProfileInput::resolve`]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Profile Types
// ============================================================================

/// Gender as used by the BMR formula
///
/// Anything other than `Male` uses the female constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("unknown gender '{}'", other)),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise, physical job
    VeryActive,
}

impl ActivityLevel {
    /// All levels in ascending multiplier order
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::Light,
        ActivityLevel::Moderate,
        ActivityLevel::Active,
        ActivityLevel::VeryActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "very_active",
        }
    }

    /// Parse a stored or user-supplied value, falling back to `Moderate`
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" => Ok(ActivityLevel::Light),
            "moderate" => Ok(ActivityLevel::Moderate),
            "active" => Ok(ActivityLevel::Active),
            "very_active" => Ok(ActivityLevel::VeryActive),
            other => Err(format!("unknown activity level '{}'", other)),
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported training experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }

    /// Target training sessions per week
    pub fn weekly_workout_goal(&self) -> u32 {
        match self {
            FitnessLevel::Beginner => 3,
            FitnessLevel::Intermediate => 4,
            FitnessLevel::Advanced => 5,
        }
    }
}

impl FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(FitnessLevel::Beginner),
            "intermediate" => Ok(FitnessLevel::Intermediate),
            "advanced" => Ok(FitnessLevel::Advanced),
            other => Err(format!("unknown fitness level '{}'", other)),
        }
    }
}

impl fmt::Display for FitnessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Profile Defaults
// ============================================================================

pub const DEFAULT_WEIGHT_KG: f64 = 70.0;
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
pub const DEFAULT_AGE_YEARS: i32 = 25;
pub const DEFAULT_GOALS: &str = "general fitness";

/// Profile data as stored, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub age: Option<i32>,
    pub gender: Option<Gender>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub fitness_level: Option<FitnessLevel>,
    pub goals: Option<String>,
    pub activity_level: Option<ActivityLevel>,
}

impl ProfileInput {
    /// Fill every missing or non-positive field with its default
    pub fn resolve(&self) -> ResolvedProfile {
        ResolvedProfile {
            age_years: self.age.filter(|a| *a > 0).unwrap_or(DEFAULT_AGE_YEARS),
            gender: self.gender.unwrap_or_default(),
            height_cm: positive(self.height_cm).unwrap_or(DEFAULT_HEIGHT_CM),
            weight_kg: positive(self.weight_kg).unwrap_or(DEFAULT_WEIGHT_KG),
            fitness_level: self.fitness_level.unwrap_or_default(),
            goals: self
                .goals
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .unwrap_or(DEFAULT_GOALS)
                .to_string(),
            activity_level: self.activity_level.unwrap_or_default(),
        }
    }
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Fully resolved profile used by every calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedProfile {
    pub age_years: i32,
    pub gender: Gender,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub fitness_level: FitnessLevel,
    pub goals: String,
    pub activity_level: ActivityLevel,
}

impl Default for ResolvedProfile {
    fn default() -> Self {
        ProfileInput::default().resolve()
    }
}

// ============================================================================
// BMR and TDEE
// ============================================================================

/// Basal Metabolic Rate using the Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Others: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female | Gender::Other => base - 161.0,
    }
}

/// Total Daily Energy Expenditure = BMR × activity multiplier
pub fn calculate_tdee(profile: &ResolvedProfile) -> f64 {
    let bmr = calculate_bmr(
        profile.weight_kg,
        profile.height_cm,
        profile.age_years,
        profile.gender,
    );
    bmr * profile.activity_level.multiplier()
}

/// Lowest calorie target ever handed out
pub const MIN_DAILY_CALORIES: i32 = 1200;

/// Daily calorie target (rounded TDEE, floored at [`MIN_DAILY_CALORIES`])
///
/// The BMR formula goes negative for very small, very old profiles that
/// still pass field validation, so the floor keeps every derived goal positive.
pub fn daily_calories(profile: &ResolvedProfile) -> i32 {
    (calculate_tdee(profile).round() as i32).max(MIN_DAILY_CALORIES)
}

/// Protein goal in grams: 1.8 g per kg of body weight
pub fn protein_goal_g(weight_kg: f64) -> i32 {
    (weight_kg * 1.8).round() as i32
}

/// Water goal in millilitres: 33 ml per kg of body weight
pub fn water_goal_ml(weight_kg: f64) -> i32 {
    (weight_kg * 33.0).round() as i32
}

// ============================================================================
// Macro Policies
// ============================================================================

pub const FIXED_CARBS_G: i32 = 230;
pub const FIXED_FAT_G: i32 = 65;

/// How carbohydrate and fat goals are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MacroPolicy {
    /// Constant 230 g carbs / 65 g fat
    FixedDefaults,
    /// 50% of calories from carbs (4 kcal/g), 25% from fat (9 kcal/g)
    #[default]
    CalorieSplit,
}

impl MacroPolicy {
    /// Returns `(carbs_g, fat_g)` for a daily calorie target
    pub fn carbs_and_fat(&self, daily_calories: i32) -> (i32, i32) {
        match self {
            MacroPolicy::FixedDefaults => (FIXED_CARBS_G, FIXED_FAT_G),
            MacroPolicy::CalorieSplit => {
                let kcal = daily_calories as f64;
                (
                    (kcal * 0.50 / 4.0).round() as i32,
                    (kcal * 0.25 / 9.0).round() as i32,
                )
            }
        }
    }
}

/// Numeric daily goals derived from a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTargets {
    pub daily_calories: i32,
    pub protein_goal: i32,
    pub carbs_goal: i32,
    pub fat_goal: i32,
    #[serde(rename = "waterGoal")]
    pub water_goal_ml: i32,
}

/// Compute every numeric daily goal for a profile
pub fn calculate_daily_targets(profile: &ResolvedProfile, policy: MacroPolicy) -> DailyTargets {
    let calories = daily_calories(profile);
    let (carbs, fat) = policy.carbs_and_fat(calories);

    DailyTargets {
        daily_calories: calories,
        protein_goal: protein_goal_g(profile.weight_kg),
        carbs_goal: carbs,
        fat_goal: fat,
        water_goal_ml: water_goal_ml(profile.weight_kg),
    }
}

// ============================================================================
// BMI
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::Normal => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal/Healthy",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}
