//! Tool API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        booking::Booking,
        tool::{CreateTool, Tool, ToolQuery, ToolWithStatus, UpdateTool},
    },
};

use super::AuthenticatedUser;

/// Checkout request for a direct (walk-up) checkout
#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    /// Borrower; staff only, defaults to the caller
    pub user_id: Option<i32>,
    /// When the tool is due back; defaults to the configured period
    pub due_date: Option<DateTime<Utc>>,
}

/// List all tools with their derived status
#[utoipa::path(
    get,
    path = "/tools",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(ToolQuery),
    responses(
        (status = 200, description = "Tool list", body = Vec<ToolWithStatus>)
    )
)]
pub async fn list_tools(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(query): Query<ToolQuery>,
) -> AppResult<Json<Vec<ToolWithStatus>>> {
    let tools = state.services.tools.list(&query).await?;
    Ok(Json(tools))
}

/// Get a tool with its derived status
#[utoipa::path(
    get,
    path = "/tools/{id}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tool ID")),
    responses(
        (status = 200, description = "Tool details", body = ToolWithStatus),
        (status = 404, description = "Tool not found")
    )
)]
pub async fn get_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<ToolWithStatus>> {
    let tool = state.services.tools.get_by_id(id).await?;
    Ok(Json(tool))
}

/// Create a tool
#[utoipa::path(
    post,
    path = "/tools",
    tag = "tools",
    security(("bearer_auth" = [])),
    request_body = CreateTool,
    responses(
        (status = 201, description = "Tool created", body = Tool),
        (status = 400, description = "Invalid request")
    )
)]
pub async fn create_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateTool>,
) -> AppResult<(StatusCode, Json<Tool>)> {
    claims.require_staff()?;
    data.validate()?;
    let tool = state.services.tools.create(&data).await?;
    Ok((StatusCode::CREATED, Json(tool)))
}

/// Update a tool
#[utoipa::path(
    put,
    path = "/tools/{id}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tool ID")),
    request_body = UpdateTool,
    responses(
        (status = 200, description = "Tool updated", body = Tool),
        (status = 404, description = "Tool not found")
    )
)]
pub async fn update_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateTool>,
) -> AppResult<Json<Tool>> {
    claims.require_staff()?;
    data.validate()?;
    let tool = state.services.tools.update(id, &data).await?;
    Ok(Json(tool))
}

/// Delete a tool
#[utoipa::path(
    delete,
    path = "/tools/{id}",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tool ID")),
    responses(
        (status = 204, description = "Tool deleted"),
        (status = 404, description = "Tool not found"),
        (status = 422, description = "Tool still has open bookings")
    )
)]
pub async fn delete_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;
    state.services.tools.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Check a tool out, activating a matching approved booking or creating
/// an active one on the spot
#[utoipa::path(
    post,
    path = "/tools/{id}/checkout",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tool ID")),
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Tool checked out", body = Booking),
        (status = 404, description = "Tool not found"),
        (status = 409, description = "Tool is booked or under maintenance right now")
    )
)]
pub async fn checkout_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<CheckoutRequest>,
) -> AppResult<Json<Booking>> {
    let user_id = match request.user_id {
        Some(other) if other != claims.user_id => {
            claims.require_staff()?;
            other
        }
        _ => claims.user_id,
    };

    let booking = state
        .services
        .bookings
        .checkout_tool(id, user_id, request.due_date)
        .await?;
    Ok(Json(booking))
}

/// Check a tool back in, completing its active booking
#[utoipa::path(
    post,
    path = "/tools/{id}/checkin",
    tag = "tools",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Tool ID")),
    responses(
        (status = 200, description = "Tool checked in", body = Booking),
        (status = 404, description = "Tool not found"),
        (status = 422, description = "No active booking for this tool")
    )
)]
pub async fn checkin_tool(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Booking>> {
    claims.require_staff()?;
    let booking = state.services.bookings.checkin_tool(id).await?;
    Ok(Json(booking))
}
