//! Input validation functions
//!
//! Validators for request fields. Each returns a plain message on failure;
//! [`ValidationError`] attaches the field name and a display label.

use validator::ValidateEmail;

use crate::metrics::{ActivityLevel, FitnessLevel, Gender};

pub const MIN_AGE: i32 = 13;
pub const MAX_AGE: i32 = 100;
pub const MAX_GOALS_LEN: usize = 500;
pub const MAX_NAME_LEN: usize = 100;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate display name
pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(format!("Name must be at most {} characters", MAX_NAME_LEN));
    }
    Ok(())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in whole years
pub fn validate_age(age: i32) -> Result<(), String> {
    if age < MIN_AGE {
        return Err(format!("Age must be at least {}", MIN_AGE));
    }
    if age > MAX_AGE {
        return Err(format!("Age must be at most {}", MAX_AGE));
    }
    Ok(())
}

/// Validate free-text goals
pub fn validate_goals(goals: &str) -> Result<(), String> {
    if goals.chars().count() > MAX_GOALS_LEN {
        return Err(format!("Goals must be at most {} characters", MAX_GOALS_LEN));
    }
    Ok(())
}

/// Validate activity level against the known enumeration
pub fn validate_activity_level(level: &str) -> Result<ActivityLevel, String> {
    level.parse().map_err(|_| {
        format!(
            "Invalid activity level. Must be one of: {}",
            ActivityLevel::ALL
                .iter()
                .map(|l| l.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

/// Validate gender
pub fn validate_gender(gender: &str) -> Result<Gender, String> {
    gender
        .parse()
        .map_err(|_| "Invalid gender. Must be one of: male, female, other".to_string())
}

/// Validate fitness level
pub fn validate_fitness_level(level: &str) -> Result<FitnessLevel, String> {
    level.parse().map_err(|_| {
        "Invalid fitness level. Must be one of: beginner, intermediate, advanced".to_string()
    })
}

/// Validate a non-negative integer counter with an upper bound
pub fn validate_count(value: i32, max: i32, label: &str) -> Result<(), String> {
    if value < 0 {
        return Err(format!("{} cannot be negative", label));
    }
    if value > max {
        return Err(format!("{} must be at most {}", label, max));
    }
    Ok(())
}

/// Validate heart rate (bpm)
pub fn validate_heart_rate(bpm: i32) -> Result<(), String> {
    if bpm < 20 {
        return Err("Heart rate too low".to_string());
    }
    if bpm > 300 {
        return Err("Heart rate too high".to_string());
    }
    Ok(())
}

/// Validate sleep duration in hours
pub fn validate_sleep_hours(hours: f64) -> Result<(), String> {
    if hours.is_nan() || !(0.0..=24.0).contains(&hours) {
        return Err("Sleep hours must be between 0 and 24".to_string());
    }
    Ok(())
}

/// Validate duration in minutes
pub fn validate_duration_minutes(minutes: i32) -> Result<(), String> {
    if minutes < 0 {
        return Err("Duration cannot be negative".to_string());
    }
    if minutes > 1440 {
        return Err("Duration cannot exceed 24 hours".to_string());
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "email" => "Email",
        "password" => "Password",
        "name" => "Name",
        "age" => "Age",
        "gender" => "Gender",
        "weight" | "weight_kg" => "Current Weight",
        "height" | "height_cm" => "Height",
        "fitness_level" => "Fitness Level",
        "activity_level" => "Activity Level",
        "goals" => "Goals",
        "steps" => "Steps",
        "calories_consumed" => "Calories Consumed",
        "calories_burned" => "Calories Burned",
        "water_intake" => "Water Intake",
        "workouts_completed" => "Workouts Completed",
        "heart_rate" => "Heart Rate",
        "sleep_hours" => "Sleep Hours",
        "duration_minutes" => "Duration",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Run a validator and attach the field name to its error
pub fn check<T>(field: &str, result: Result<T, String>) -> Result<T, ValidationError> {
    result.map_err(|message| ValidationError::new(field, &message))
}
