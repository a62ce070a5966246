//! Booking model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use super::enums::BookingStatus;
use super::tool::ToolShort;
use super::user::UserShort;

/// Booking record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub tool_id: i32,
    pub user_id: i32,
    /// Interval is half-open: `[start_date, end_date)`
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Booking with embedded tool and user for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingDetails {
    pub id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub tool: ToolShort,
    pub user: UserShort,
}

/// Validated booking-creation command handed to the service layer
#[derive(Debug)]
pub struct CreateBooking {
    pub tool_id: i32,
    pub user_id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: Option<String>,
}

/// Booking list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    pub tool_id: Option<i32>,
    pub user_id: Option<i32>,
    pub status: Option<BookingStatus>,
}
