//! Tool model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{ToolCondition, ToolStatus};

/// Tool record from database.
///
/// Availability status is deliberately absent: it is derived from the
/// tool's bookings and maintenances at read time, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Tool {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub condition: ToolCondition,
    /// User currently holding the tool, if tracked
    pub owner_id: Option<i32>,
    pub notes: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Short tool representation for embedding in booking views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ToolShort {
    pub id: i32,
    pub name: String,
    pub condition: ToolCondition,
}

/// Tool augmented with its derived availability
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ToolWithStatus {
    #[serde(flatten)]
    pub tool: Tool,
    /// Derived from bookings and maintenances, recomputed on every read
    pub status: ToolStatus,
    /// Id of the currently-active booking, if any
    pub active_booking: Option<i32>,
}

/// Create tool request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTool {
    #[validate(length(min = 1, message = "Tool name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
    pub condition: Option<ToolCondition>,
    pub owner_id: Option<i32>,
    pub notes: Option<String>,
}

/// Update tool request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTool {
    #[validate(length(min = 1, message = "Tool name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub condition: Option<ToolCondition>,
    pub owner_id: Option<i32>,
    pub notes: Option<String>,
}

/// Tool list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ToolQuery {
    /// Substring match on the tool name
    pub name: Option<String>,
    pub condition: Option<ToolCondition>,
}
