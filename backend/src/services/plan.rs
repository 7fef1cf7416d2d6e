//! Plan synthesis and storage
//!
//! [`PlanSynthesizer::synthesize`] is total: every AI failure degrades to the
//! static default plan, logged at `warn` and counted by source.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use fitness_tracker_shared::plan::build_default_plan;
use fitness_tracker_shared::plan_parser::{build_prompt, parse_ai_plan};
use fitness_tracker_shared::{
    calculate_daily_targets, DailyTargets, FitnessPlan, PlanError, PlanSettings, ProfileInput,
    ResolvedProfile,
};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::repositories::{PlanRepository, UserRepository};
use crate::services::ai::TextGenerator;
use crate::services::events::{EventKind, EventPublisher};

/// Builds plans from profiles, optionally with a text generator
#[derive(Clone)]
pub struct PlanSynthesizer {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
    settings: PlanSettings,
}

impl PlanSynthesizer {
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        timeout: Duration,
        settings: PlanSettings,
    ) -> Self {
        Self {
            generator,
            timeout,
            settings,
        }
    }

    /// Default plans only
    pub fn static_only(settings: PlanSettings) -> Self {
        Self::new(None, Duration::ZERO, settings)
    }

    pub fn settings(&self) -> PlanSettings {
        self.settings
    }

    pub fn targets(&self, profile: &ResolvedProfile) -> DailyTargets {
        calculate_daily_targets(profile, self.settings.macro_policy)
    }

    pub fn default_plan(&self, profile: &ResolvedProfile) -> FitnessPlan {
        build_default_plan(profile, self.settings, Utc::now())
    }

    /// Never fails. Returns an AI plan when possible, the default plan otherwise.
    pub async fn synthesize(&self, profile: &ResolvedProfile) -> FitnessPlan {
        let plan = match self.try_ai(profile).await {
            Ok(plan) => plan,
            Err(PlanError::Disabled) => self.default_plan(profile),
            Err(e) => {
                warn!(reason = e.reason(), error = %e, "AI plan generation failed, using default plan");
                metrics::counter!("plan_fallbacks_total", "reason" => e.reason()).increment(1);
                self.default_plan(profile)
            }
        };

        metrics::counter!("plan_generations_total", "source" => plan.source.as_str()).increment(1);
        plan
    }

    async fn try_ai(&self, profile: &ResolvedProfile) -> Result<FitnessPlan, PlanError> {
        let generator = self.generator.as_ref().ok_or(PlanError::Disabled)?;
        let prompt = build_prompt(profile, &self.targets(profile));

        let text = tokio::time::timeout(self.timeout, generator.generate(&prompt))
            .await
            .map_err(|_| PlanError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| PlanError::Upstream(e.to_string()))?;

        let plan = parse_ai_plan(&text, profile, self.settings, Utc::now())?;
        info!(model = generator.model(), "Generated AI plan");
        Ok(plan)
    }
}

/// Stored-plan operations for a user
pub struct PlanService;

impl PlanService {
    /// Stored profile of an existing user; 404 if the account is gone
    pub async fn load_profile(pool: &PgPool, user_id: Uuid) -> Result<ProfileInput, ApiError> {
        UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        let input = UserRepository::get_profile(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(|p| p.to_input())
            .unwrap_or_default();

        Ok(input)
    }

    /// Stored plan, or the default plan if none has been stored yet
    pub async fn get(
        pool: &PgPool,
        synthesizer: &PlanSynthesizer,
        user_id: Uuid,
    ) -> Result<FitnessPlan, ApiError> {
        let profile = Self::load_profile(pool, user_id).await?.resolve();

        let stored = PlanRepository::find(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;

        Ok(stored.unwrap_or_else(|| synthesizer.default_plan(&profile)))
    }

    /// Synthesize from a profile, store the result and announce it
    pub async fn regenerate_for(
        pool: &PgPool,
        synthesizer: &PlanSynthesizer,
        events: &EventPublisher,
        user_id: Uuid,
        profile: &ProfileInput,
    ) -> Result<FitnessPlan, ApiError> {
        let plan = synthesizer.synthesize(&profile.resolve()).await;

        PlanRepository::upsert(pool, user_id, &plan)
            .await
            .map_err(ApiError::Internal)?;

        events.publish(
            user_id,
            EventKind::PlanUpdated {
                source: plan.source,
                last_updated: plan.last_updated,
            },
        );

        Ok(plan)
    }

    pub async fn regenerate(
        pool: &PgPool,
        synthesizer: &PlanSynthesizer,
        events: &EventPublisher,
        user_id: Uuid,
    ) -> Result<FitnessPlan, ApiError> {
        let input = Self::load_profile(pool, user_id).await?;
        Self::regenerate_for(pool, synthesizer, events, user_id, &input).await
    }

    pub async fn targets(
        pool: &PgPool,
        synthesizer: &PlanSynthesizer,
        user_id: Uuid,
    ) -> Result<DailyTargets, ApiError> {
        let profile = Self::load_profile(pool, user_id).await?.resolve();
        Ok(synthesizer.targets(&profile))
    }
}
