//! Notification endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::notification::Notification};

use super::AuthenticatedUser;

/// Bulk read response
#[derive(Serialize, ToSchema)]
pub struct ReadAllResponse {
    /// Number of notifications marked as read
    pub marked: u64,
}

/// List the caller's notifications, unread first
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Notifications", body = Vec<Notification>)
    )
)]
pub async fn list_notifications(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Notification>>> {
    let notifications = state
        .services
        .notifications
        .list_for_user(claims.user_id)
        .await?;
    Ok(Json(notifications))
}

/// Mark one notification as read
#[utoipa::path(
    post,
    path = "/notifications/{id}/read",
    tag = "notifications",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 204, description = "Marked as read"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<axum::http::StatusCode> {
    state
        .services
        .notifications
        .mark_read(id, claims.user_id)
        .await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}

/// Mark every notification of the caller as read
#[utoipa::path(
    post,
    path = "/notifications/read-all",
    tag = "notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All marked as read", body = ReadAllResponse)
    )
)]
pub async fn mark_all_read(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ReadAllResponse>> {
    let marked = state
        .services
        .notifications
        .mark_all_read(claims.user_id)
        .await?;
    Ok(Json(ReadAllResponse { marked }))
}
