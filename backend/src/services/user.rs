//! Registration, login and token refresh
//!
//! Password hashing and verification run on the blocking thread pool.

use chrono::Utc;
use fitness_tracker_shared::validation::{check, validate_email, validate_name, validate_password};
use fitness_tracker_shared::{
    AccountResponse, AuthError, AuthTokens, LoginRequest, ProfileInput, RegisterRequest,
};
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::{JwtService, PasswordService, TokenKind};
use crate::error::ApiError;
use crate::repositories::{NewUser, UserRepository};
use crate::services::events::EventPublisher;
use crate::services::plan::{PlanService, PlanSynthesizer};
use crate::services::streak::StreakService;

pub struct UserService;

impl UserService {
    /// Create an account, store its profile and an initial plan
    ///
    /// The account is committed first. A plan that fails to store is logged
    /// and left for `GET /plan` to fill from the default generator.
    pub async fn register(
        pool: &PgPool,
        jwt: &JwtService,
        synthesizer: &PlanSynthesizer,
        events: &EventPublisher,
        request: RegisterRequest,
    ) -> Result<AuthTokens, ApiError> {
        let email = normalize_email(&request.email);
        check("email", validate_email(&email))?;
        check("password", validate_password(&request.password))?;
        let name = request.name.trim().to_string();
        check("name", validate_name(&name))?;

        let profile = match &request.profile {
            Some(p) => p.validate()?,
            None => Default::default(),
        };

        if UserRepository::email_exists(pool, &email)
            .await
            .map_err(ApiError::Internal)?
        {
            return Err(ApiError::Conflict("Email already registered".to_string()));
        }

        let password_hash = PasswordService::hash(request.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = UserRepository::create(
            pool,
            NewUser {
                email,
                name,
                password_hash,
                profile: profile.clone(),
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        Self::store_initial_plan(pool, synthesizer, events, user.id, &profile).await;

        metrics::counter!("users_registered_total").increment(1);
        info!(user_id = %user.id, "Registered user");

        Self::issue_tokens(jwt, user.id)
    }

    /// Verify credentials; a successful login counts as activity
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        events: &EventPublisher,
        request: LoginRequest,
    ) -> Result<AuthTokens, ApiError> {
        let email = normalize_email(&request.email);
        let user = UserRepository::find_by_email(pool, &email)
            .await
            .map_err(ApiError::Internal)?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = PasswordService::verify(request.password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        StreakService::record_activity(pool, events, user.id, Utc::now()).await?;

        Self::issue_tokens(jwt, user.id)
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh(
        pool: &PgPool,
        jwt: &JwtService,
        refresh_token: &str,
    ) -> Result<AuthTokens, ApiError> {
        let claims = jwt.verify(refresh_token, TokenKind::Refresh)?;

        UserRepository::find_by_id(pool, claims.sub)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

        Self::issue_tokens(jwt, claims.sub)
    }

    pub async fn account(pool: &PgPool, user_id: Uuid) -> Result<AccountResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(AccountResponse {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            streak: user.streak,
            last_active: user.last_active,
            created_at: user.created_at,
        })
    }

    /// Returns whether the plan was stored
    async fn store_initial_plan(
        pool: &PgPool,
        synthesizer: &PlanSynthesizer,
        events: &EventPublisher,
        user_id: Uuid,
        profile: &ProfileInput,
    ) -> bool {
        match PlanService::regenerate_for(pool, synthesizer, events, user_id, profile).await {
            Ok(_) => true,
            Err(e) => {
                metrics::counter!("initial_plan_store_failures_total").increment(1);
                warn!(user_id = %user_id, error = %e, "Failed to store initial plan");
                false
            }
        }
    }

    fn issue_tokens(jwt: &JwtService, user_id: Uuid) -> Result<AuthTokens, ApiError> {
        let access_token = jwt
            .issue(user_id, TokenKind::Access)
            .map_err(ApiError::Internal)?;
        let refresh_token = jwt
            .issue(user_id, TokenKind::Refresh)
            .map_err(ApiError::Internal)?;

        Ok(AuthTokens {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: jwt.access_ttl_secs(),
        })
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
