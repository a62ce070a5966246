//! Maintenance management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::maintenance::{
        CreateMaintenance, Maintenance, MaintenancePart, MaintenanceQuery, UpdateMaintenance,
    },
};

use super::AuthenticatedUser;

/// Assign a spare part to a maintenance
#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignPartRequest {
    pub spare_part_id: i32,
    pub quantity: i32,
}

/// List maintenances
#[utoipa::path(
    get,
    path = "/maintenances",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(MaintenanceQuery),
    responses(
        (status = 200, description = "Maintenance list", body = Vec<Maintenance>)
    )
)]
pub async fn list_maintenances(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<MaintenanceQuery>,
) -> AppResult<Json<Vec<Maintenance>>> {
    claims.require_staff()?;
    let maintenances = state.services.maintenances.list(&query).await?;
    Ok(Json(maintenances))
}

/// Get maintenance by ID
#[utoipa::path(
    get,
    path = "/maintenances/{id}",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Maintenance", body = Maintenance),
        (status = 404, description = "Maintenance not found")
    )
)]
pub async fn get_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Maintenance>> {
    claims.require_staff()?;
    let maintenance = state.services.maintenances.get_by_id(id).await?;
    Ok(Json(maintenance))
}

/// Create a maintenance
#[utoipa::path(
    post,
    path = "/maintenances",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    request_body = CreateMaintenance,
    responses(
        (status = 201, description = "Maintenance created", body = Maintenance),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Tool not found")
    )
)]
pub async fn create_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMaintenance>,
) -> AppResult<(StatusCode, Json<Maintenance>)> {
    claims.require_staff()?;
    data.validate()?;
    let maintenance = state.services.maintenances.create(&data).await?;
    Ok((StatusCode::CREATED, Json(maintenance)))
}

/// Update a maintenance
#[utoipa::path(
    put,
    path = "/maintenances/{id}",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance ID")),
    request_body = UpdateMaintenance,
    responses(
        (status = 200, description = "Maintenance updated", body = Maintenance),
        (status = 404, description = "Maintenance not found"),
        (status = 422, description = "Illegal status move")
    )
)]
pub async fn update_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMaintenance>,
) -> AppResult<Json<Maintenance>> {
    claims.require_staff()?;
    data.validate()?;
    let maintenance = state.services.maintenances.update(id, &data).await?;
    Ok(Json(maintenance))
}

/// Complete a maintenance
#[utoipa::path(
    post,
    path = "/maintenances/{id}/complete",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Maintenance completed", body = Maintenance),
        (status = 404, description = "Maintenance not found"),
        (status = 422, description = "Maintenance already completed")
    )
)]
pub async fn complete_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Maintenance>> {
    claims.require_staff()?;
    let maintenance = state.services.maintenances.complete(id).await?;
    Ok(Json(maintenance))
}

/// Consume spare-part stock for a maintenance
#[utoipa::path(
    post,
    path = "/maintenances/{id}/parts",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance ID")),
    request_body = AssignPartRequest,
    responses(
        (status = 201, description = "Part assigned", body = MaintenancePart),
        (status = 404, description = "Maintenance or part not found"),
        (status = 422, description = "Insufficient stock")
    )
)]
pub async fn assign_part(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AssignPartRequest>,
) -> AppResult<(StatusCode, Json<MaintenancePart>)> {
    claims.require_staff()?;
    let usage = state
        .services
        .maintenances
        .assign_part(id, request.spare_part_id, request.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(usage)))
}

/// List parts consumed by a maintenance
#[utoipa::path(
    get,
    path = "/maintenances/{id}/parts",
    tag = "maintenances",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Parts consumed", body = Vec<MaintenancePart>),
        (status = 404, description = "Maintenance not found")
    )
)]
pub async fn list_parts(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<MaintenancePart>>> {
    claims.require_staff()?;
    let parts = state.services.maintenances.list_parts(id).await?;
    Ok(Json(parts))
}
