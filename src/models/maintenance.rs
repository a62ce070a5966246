//! Maintenance model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::MaintenanceStatus;

/// Maintenance record from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Maintenance {
    pub id: i32,
    pub tool_id: i32,
    pub description: String,
    #[schema(value_type = Option<f64>)]
    pub cost: Option<Decimal>,
    pub start_date: DateTime<Utc>,
    /// Open-ended when absent; conflict detection then treats the window
    /// as the degenerate instant `[start_date, start_date)`
    pub end_date: Option<DateTime<Utc>>,
    pub status: MaintenanceStatus,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Spare part consumption recorded against a maintenance
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenancePart {
    pub id: i32,
    pub maintenance_id: i32,
    pub spare_part_id: i32,
    pub quantity: i32,
    pub crea_date: DateTime<Utc>,
}

/// Create maintenance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    pub tool_id: i32,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: String,
    #[schema(value_type = Option<f64>)]
    pub cost: Option<Decimal>,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<MaintenanceStatus>,
}

/// Update maintenance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateMaintenance {
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub cost: Option<Decimal>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: Option<MaintenanceStatus>,
}

/// Maintenance list query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct MaintenanceQuery {
    pub tool_id: Option<i32>,
    pub status: Option<MaintenanceStatus>,
}
