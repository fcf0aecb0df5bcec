//! Statistics endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, services::stats::StatsResponse};

use super::AuthenticatedUser;

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Statistics", body = StatsResponse)
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<StatsResponse>> {
    claims.require_staff()?;
    let stats = state.services.stats.get_stats().await?;
    Ok(Json(stats))
}
