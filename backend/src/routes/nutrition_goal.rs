//! Nutrition goal API routes

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::ActiveGoal;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use nutrition_planner_shared::{
    DayTargetResponse, GoalRequest, NutritionGoalResponse, PlanResponse,
};
use validator::Validate;

/// Create nutrition goal routes
pub fn nutrition_goal_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_goal).post(start_tracking).delete(disable_goal),
        )
        .route("/preview", post(preview))
        .route("/day/:date", get(day_target))
}

impl From<ActiveGoal> for NutritionGoalResponse {
    fn from(goal: ActiveGoal) -> Self {
        Self {
            weekly_average: goal.plan.weekly_average(),
            plan: goal.plan,
            start_date: goal.record.start_date,
            estimated_end_date: goal.record.estimated_end_date,
        }
    }
}

/// POST /api/v1/nutrition-goal/preview - Compute a plan without saving
async fn preview(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GoalRequest>,
) -> Result<Json<PlanResponse>, ApiError> {
    req.validate()?;
    let plan = state.goals.preview(auth.user_id, &req.goal_input()).await?;
    Ok(Json(plan.into()))
}

/// POST /api/v1/nutrition-goal - Start tracking a goal
async fn start_tracking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<GoalRequest>,
) -> Result<(StatusCode, Json<NutritionGoalResponse>), ApiError> {
    req.validate()?;
    let start_date = req.start_date.unwrap_or_else(|| Utc::now().date_naive());
    let goal = state
        .goals
        .start_tracking(auth.user_id, &req.goal_input(), start_date)
        .await?;
    Ok((StatusCode::CREATED, Json(goal.into())))
}

/// GET /api/v1/nutrition-goal - Active goal
async fn get_goal(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<NutritionGoalResponse>, ApiError> {
    let goal = state
        .goals
        .current_goal(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No active nutrition goal".to_string()))?;
    Ok(Json(goal.into()))
}

/// DELETE /api/v1/nutrition-goal - Stop tracking
async fn disable_goal(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, ApiError> {
    state.goals.disable(auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/nutrition-goal/day/:date - Calorie target for a date
async fn day_target(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<NaiveDate>,
) -> Result<Json<DayTargetResponse>, ApiError> {
    let target = state.goals.day_target(auth.user_id, date).await?;
    Ok(Json(target))
}
