//! Booking management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        booking::{Booking, BookingDetails, BookingQuery, CreateBooking},
        enums::BookingStatus,
    },
};

use super::AuthenticatedUser;

/// Create booking request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub tool_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Borrower; staff only, defaults to the caller
    pub user_id: Option<i32>,
    /// Initial status; staff only, defaults to pending
    pub status: Option<BookingStatus>,
    pub notes: Option<String>,
}

/// List bookings
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "Booking list", body = Vec<BookingDetails>)
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    claims.require_staff()?;
    let bookings = state.services.bookings.list(&query).await?;
    Ok(Json(bookings))
}

/// Get booking by ID
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.get_by_id(id).await?;
    claims.require_self_or_staff(booking.user_id)?;
    Ok(Json(booking))
}

/// Get bookings for a specific user
#[utoipa::path(
    get,
    path = "/users/{id}/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User's bookings", body = Vec<BookingDetails>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_bookings(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(user_id): Path<i32>,
) -> AppResult<Json<Vec<BookingDetails>>> {
    claims.require_self_or_staff(user_id)?;
    let bookings = state.services.bookings.list_for_user(user_id).await?;
    Ok(Json(bookings))
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "End date must be after start date"),
        (status = 404, description = "Tool or user not found"),
        (status = 409, description = "Tool already booked or under maintenance for this period")
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(request): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    // Booking for someone else, or with a pre-set status, is staff-only.
    let user_id = match request.user_id {
        Some(other) if other != claims.user_id => {
            claims.require_staff()?;
            other
        }
        _ => claims.user_id,
    };
    let status = match request.status {
        Some(status) if status != BookingStatus::Pending => {
            claims.require_staff()?;
            status
        }
        _ => BookingStatus::Pending,
    };

    let booking = state
        .services
        .bookings
        .create_booking(CreateBooking {
            tool_id: request.tool_id,
            user_id,
            start_date: request.start_date,
            end_date: request.end_date,
            status,
            notes: request.notes,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Approve a pending booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/approve",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking approved", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is not pending")
    )
)]
pub async fn approve_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Booking>> {
    claims.require_staff()?;
    let booking = state.services.bookings.approve(id).await?;
    Ok(Json(booking))
}

/// Reject a pending booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/reject",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking rejected", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking is not pending")
    )
)]
pub async fn reject_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Booking>> {
    claims.require_staff()?;
    let booking = state.services.bookings.reject(id).await?;
    Ok(Json(booking))
}

/// Cancel a pending or approved booking
#[utoipa::path(
    post,
    path = "/bookings/{id}/cancel",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Booking ID")),
    responses(
        (status = 200, description = "Booking cancelled", body = Booking),
        (status = 404, description = "Booking not found"),
        (status = 422, description = "Booking can no longer be cancelled")
    )
)]
pub async fn cancel_booking(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Booking>> {
    let booking = state.services.bookings.get_by_id(id).await?;
    claims.require_self_or_staff(booking.user_id)?;
    let booking = state.services.bookings.cancel(id).await?;
    Ok(Json(booking))
}
