//! Profile reads and updates

use fitness_tracker_shared::{
    BmiInfo, ProfileInput, ProfileResponse, ProfileUpdateResponse, UpdateProfileRequest, User,
};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::services::events::EventPublisher;
use crate::services::plan::{PlanService, PlanSynthesizer};

pub struct ProfileService;

impl ProfileService {
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let profile = UserRepository::get_profile(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(|p| p.to_input())
            .unwrap_or_default();

        Ok(build_response(user.into(), profile))
    }

    /// Apply a partial update, then rebuild and store the plan
    pub async fn update(
        pool: &PgPool,
        synthesizer: &PlanSynthesizer,
        events: &EventPublisher,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<ProfileUpdateResponse, ApiError> {
        if request.is_empty() {
            return Err(ApiError::BadRequest("No profile fields provided".to_string()));
        }
        let updates = request.validate()?;

        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let stored = UserRepository::update_profile(pool, user_id, &updates)
            .await
            .map_err(ApiError::Internal)?
            .to_input();

        let plan = PlanService::regenerate_for(pool, synthesizer, events, user_id, &stored).await?;
        info!(user_id = %user_id, source = plan.source.as_str(), "Profile updated");

        Ok(ProfileUpdateResponse {
            profile: build_response(user.into(), stored),
            plan,
        })
    }
}

fn build_response(user: User, profile: ProfileInput) -> ProfileResponse {
    let bmi = match (profile.weight_kg, profile.height_cm) {
        (Some(weight), Some(height)) => Some(BmiInfo::from_measurements(weight, height)),
        _ => None,
    };

    ProfileResponse {
        name: user.name,
        email: user.email,
        age: profile.age,
        gender: profile.gender,
        height: profile.height_cm,
        weight: profile.weight_kg,
        fitness_level: profile.fitness_level,
        goals: profile.goals,
        activity_level: profile.activity_level,
        bmi,
        streak: user.streak,
        last_active: user.last_active,
    }
}
