//! Spare part inventory endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::spare_part::{CreateSparePart, SparePart, UpdateSparePart},
};

use super::AuthenticatedUser;

/// List all spare parts
#[utoipa::path(
    get,
    path = "/spare-parts",
    tag = "spare-parts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Spare part list", body = Vec<SparePart>)
    )
)]
pub async fn list_spare_parts(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SparePart>>> {
    claims.require_staff()?;
    let parts = state.services.spare_parts.list().await?;
    Ok(Json(parts))
}

/// List parts at or below their minimum stock level
#[utoipa::path(
    get,
    path = "/spare-parts/low",
    tag = "spare-parts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Low-stock parts", body = Vec<SparePart>)
    )
)]
pub async fn list_low_stock(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<SparePart>>> {
    claims.require_staff()?;
    let parts = state.services.spare_parts.list_low_stock().await?;
    Ok(Json(parts))
}

/// Get spare part by ID
#[utoipa::path(
    get,
    path = "/spare-parts/{id}",
    tag = "spare-parts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Spare part ID")),
    responses(
        (status = 200, description = "Spare part", body = SparePart),
        (status = 404, description = "Spare part not found")
    )
)]
pub async fn get_spare_part(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<SparePart>> {
    claims.require_staff()?;
    let part = state.services.spare_parts.get_by_id(id).await?;
    Ok(Json(part))
}

/// Create a spare part
#[utoipa::path(
    post,
    path = "/spare-parts",
    tag = "spare-parts",
    security(("bearer_auth" = [])),
    request_body = CreateSparePart,
    responses(
        (status = 201, description = "Spare part created", body = SparePart),
        (status = 409, description = "Part reference already exists")
    )
)]
pub async fn create_spare_part(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateSparePart>,
) -> AppResult<(StatusCode, Json<SparePart>)> {
    claims.require_staff()?;
    data.validate()?;
    let part = state.services.spare_parts.create(&data).await?;
    Ok((StatusCode::CREATED, Json(part)))
}

/// Update a spare part
#[utoipa::path(
    put,
    path = "/spare-parts/{id}",
    tag = "spare-parts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Spare part ID")),
    request_body = UpdateSparePart,
    responses(
        (status = 200, description = "Spare part updated", body = SparePart),
        (status = 404, description = "Spare part not found")
    )
)]
pub async fn update_spare_part(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSparePart>,
) -> AppResult<Json<SparePart>> {
    claims.require_staff()?;
    data.validate()?;
    let part = state.services.spare_parts.update(id, &data).await?;
    Ok(Json(part))
}

/// Delete a spare part
#[utoipa::path(
    delete,
    path = "/spare-parts/{id}",
    tag = "spare-parts",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Spare part ID")),
    responses(
        (status = 204, description = "Spare part deleted"),
        (status = 404, description = "Spare part not found")
    )
)]
pub async fn delete_spare_part(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require_staff()?;
    state.services.spare_parts.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
