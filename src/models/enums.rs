//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// ToolStatus
// ---------------------------------------------------------------------------

/// Derived availability of a tool.
///
/// Never persisted: computed from the tool's bookings and maintenances on
/// every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    Available,
    InUse,
    Booked,
    InMaintenance,
}

impl ToolStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolStatus::Available => "available",
            ToolStatus::InUse => "in_use",
            ToolStatus::Booked => "booked",
            ToolStatus::InMaintenance => "in_maintenance",
        }
    }
}

impl std::fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ToolCondition
// ---------------------------------------------------------------------------

/// Physical condition of a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tool_condition", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ToolCondition {
    New,
    Good,
    Fair,
    Poor,
}

impl ToolCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCondition::New => "new",
            ToolCondition::Good => "good",
            ToolCondition::Fair => "fair",
            ToolCondition::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ToolCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BookingStatus
// ---------------------------------------------------------------------------

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal statuses never change again and never block other bookings.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Rejected | BookingStatus::Completed | BookingStatus::Cancelled
        )
    }

    /// Statuses that occupy the tool's calendar for conflict detection.
    pub fn blocks_interval(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Approved | BookingStatus::Active
        )
    }

    /// Legal lifecycle moves:
    /// pending -> approved | rejected | cancelled
    /// approved -> active | cancelled
    /// active -> completed
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Approved)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Approved, Active)
                | (Approved, Cancelled)
                | (Active, Completed)
        )
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            "active" => Ok(BookingStatus::Active),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
// MaintenanceStatus
// ---------------------------------------------------------------------------

/// Maintenance lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Requested,
    Scheduled,
    InProgress,
    Completed,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaintenanceStatus::Requested => "requested",
            MaintenanceStatus::Scheduled => "scheduled",
            MaintenanceStatus::InProgress => "in_progress",
            MaintenanceStatus::Completed => "completed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, MaintenanceStatus::Completed)
    }

    /// Legal lifecycle moves:
    /// requested -> scheduled | in_progress
    /// scheduled -> in_progress | completed
    /// in_progress -> completed
    pub fn can_transition_to(&self, next: MaintenanceStatus) -> bool {
        use MaintenanceStatus::*;
        matches!(
            (self, next),
            (Requested, Scheduled)
                | (Requested, InProgress)
                | (Scheduled, InProgress)
                | (Scheduled, Completed)
                | (InProgress, Completed)
        )
    }
}

impl std::fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole
// ---------------------------------------------------------------------------

/// User roles, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Manager,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
        }
    }

    /// Managers and admins run the tool crib.
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Manager | UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationKind
// ---------------------------------------------------------------------------

/// Notification categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    BookingCreated,
    BookingApproved,
    BookingRejected,
    MaintenanceDue,
    LowStock,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_terminal_statuses() {
        assert!(BookingStatus::Rejected.is_terminal());
        assert!(BookingStatus::Completed.is_terminal());
        assert!(BookingStatus::Cancelled.is_terminal());
        assert!(!BookingStatus::Pending.is_terminal());
        assert!(!BookingStatus::Approved.is_terminal());
        assert!(!BookingStatus::Active.is_terminal());
    }

    #[test]
    fn booking_blocking_statuses() {
        assert!(BookingStatus::Pending.blocks_interval());
        assert!(BookingStatus::Approved.blocks_interval());
        assert!(BookingStatus::Active.blocks_interval());
        assert!(!BookingStatus::Rejected.blocks_interval());
        assert!(!BookingStatus::Completed.blocks_interval());
        assert!(!BookingStatus::Cancelled.blocks_interval());
    }

    #[test]
    fn booking_lifecycle_legal_moves() {
        use BookingStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Approved.can_transition_to(Active));
        assert!(Approved.can_transition_to(Cancelled));
        assert!(Active.can_transition_to(Completed));
    }

    #[test]
    fn booking_lifecycle_illegal_moves() {
        use BookingStatus::*;
        assert!(!Pending.can_transition_to(Active));
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Active.can_transition_to(Cancelled));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Completed.can_transition_to(Active));
        assert!(!Cancelled.can_transition_to(Pending));
    }

    #[test]
    fn maintenance_lifecycle() {
        use MaintenanceStatus::*;
        assert!(Requested.can_transition_to(Scheduled));
        assert!(Scheduled.can_transition_to(InProgress));
        assert!(InProgress.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Scheduled));
        assert!(!InProgress.can_transition_to(Requested));
        assert!(Completed.is_terminal());
        assert!(!InProgress.is_terminal());
    }

    #[test]
    fn role_privileges() {
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Manager.is_staff());
        assert!(!UserRole::User.is_staff());
        assert!(UserRole::Admin > UserRole::Manager);
    }

    #[test]
    fn booking_status_from_str() {
        assert_eq!("pending".parse::<BookingStatus>().unwrap(), BookingStatus::Pending);
        assert_eq!("cancelled".parse::<BookingStatus>().unwrap(), BookingStatus::Cancelled);
        assert!("in_use".parse::<BookingStatus>().is_err());
    }
}
