//! Booking management service
//!
//! Creation and checkout both run the conflict checker over the tool's
//! fetched records before any write. The check and the insert are two
//! separate statements with no transaction around them: two overlapping
//! requests racing past the check can both commit. See DESIGN.md for the
//! trade-off and the constraint that would close it.

use chrono::{DateTime, Duration, Utc};

use crate::{
    config::BookingsConfig,
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails, BookingQuery, CreateBooking},
        enums::{BookingStatus, NotificationKind},
    },
    repository::Repository,
};

use super::{
    availability::{self, Conflict},
    notifications::NotificationsService,
};

const BOOKED_CONFLICT_MSG: &str =
    "Tool is already booked or has a pending request for this period";
const MAINTENANCE_CONFLICT_MSG: &str =
    "Tool is scheduled for maintenance during this period";

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
    notifications: NotificationsService,
    config: BookingsConfig,
}

impl BookingsService {
    pub fn new(
        repository: Repository,
        notifications: NotificationsService,
        config: BookingsConfig,
    ) -> Self {
        Self {
            repository,
            notifications,
            config,
        }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        self.repository.bookings.get_by_id(id).await
    }

    /// List bookings with embedded tool and user
    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<BookingDetails>> {
        self.repository.bookings.list(query).await
    }

    /// Bookings of one user
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<BookingDetails>> {
        self.repository.users.get_by_id(user_id).await?;
        self.repository.bookings.list_details_for_user(user_id).await
    }

    /// Create a booking after validating dates and checking the tool's
    /// calendar for collisions.
    pub async fn create_booking(&self, cmd: CreateBooking) -> AppResult<Booking> {
        if cmd.start_date >= cmd.end_date {
            return Err(AppError::Validation(
                "End date must be after start date".to_string(),
            ));
        }
        if cmd.status.is_terminal() {
            return Err(AppError::Validation(format!(
                "Cannot create a booking in status '{}'",
                cmd.status
            )));
        }

        let tool = self.repository.tools.get_by_id(cmd.tool_id).await?;
        let user = self.repository.users.get_by_id(cmd.user_id).await?;

        self.check_interval(cmd.tool_id, cmd.start_date, cmd.end_date).await?;

        let booking = self.repository.bookings.create(&cmd).await?;

        self.notifications
            .publish_to_staff(
                NotificationKind::BookingCreated,
                &format!(
                    "{} requested '{}' from {} to {}",
                    user.login,
                    tool.name,
                    booking.start_date.format("%Y-%m-%d"),
                    booking.end_date.format("%Y-%m-%d"),
                ),
            )
            .await;

        Ok(booking)
    }

    /// Approve a pending booking
    pub async fn approve(&self, id: i32) -> AppResult<Booking> {
        let booking = self.transition(id, BookingStatus::Approved).await?;
        self.notify_requester(&booking, NotificationKind::BookingApproved, "approved")
            .await;
        Ok(booking)
    }

    /// Reject a pending booking
    pub async fn reject(&self, id: i32) -> AppResult<Booking> {
        let booking = self.transition(id, BookingStatus::Rejected).await?;
        self.notify_requester(&booking, NotificationKind::BookingRejected, "rejected")
            .await;
        Ok(booking)
    }

    /// Cancel a pending or approved booking
    pub async fn cancel(&self, id: i32) -> AppResult<Booking> {
        self.transition(id, BookingStatus::Cancelled).await
    }

    /// Check a tool out.
    ///
    /// When the caller holds an approved booking covering the current
    /// moment, that booking is activated. Otherwise a fresh active booking
    /// is created on the spot, provided the instant `[now, now + epsilon)`
    /// is clear of granted bookings and calendar maintenance.
    pub async fn checkout_tool(
        &self,
        tool_id: i32,
        user_id: i32,
        due_date: Option<DateTime<Utc>>,
    ) -> AppResult<Booking> {
        let now = Utc::now();
        if let Some(due) = due_date {
            if due <= now {
                return Err(AppError::Validation(
                    "Due date must be in the future".to_string(),
                ));
            }
        }

        self.repository.tools.get_by_id(tool_id).await?;
        self.repository.users.get_by_id(user_id).await?;

        let bookings = self.repository.bookings.list_for_tool(tool_id).await?;
        let maintenances = self.repository.maintenances.list_for_tool(tool_id).await?;

        // A matching approved booking short-circuits the conflict check.
        if let Some(own) = bookings.iter().find(|b| {
            b.status == BookingStatus::Approved
                && b.user_id == user_id
                && b.start_date <= now
                && now < b.end_date
        }) {
            let booking = self.repository.bookings.set_status(own.id, BookingStatus::Active).await?;
            self.repository.tools.set_owner(tool_id, Some(user_id)).await?;
            return Ok(booking);
        }

        match availability::find_checkout_conflict(&bookings, &maintenances, now) {
            Some(Conflict::Booking(_)) => {
                return Err(AppError::BookingConflict(BOOKED_CONFLICT_MSG.to_string()))
            }
            Some(Conflict::Maintenance(_)) => {
                return Err(AppError::MaintenanceConflict(
                    MAINTENANCE_CONFLICT_MSG.to_string(),
                ))
            }
            None => {}
        }

        let end_date = due_date
            .unwrap_or_else(|| now + Duration::days(self.config.default_checkout_days));
        let booking = self
            .repository
            .bookings
            .create(&CreateBooking {
                tool_id,
                user_id,
                start_date: now,
                end_date,
                status: BookingStatus::Active,
                notes: None,
            })
            .await?;
        self.repository.tools.set_owner(tool_id, Some(user_id)).await?;

        Ok(booking)
    }

    /// Check a tool back in, completing its active booking
    pub async fn checkin_tool(&self, tool_id: i32) -> AppResult<Booking> {
        self.repository.tools.get_by_id(tool_id).await?;

        let bookings = self.repository.bookings.list_for_tool(tool_id).await?;
        let active = bookings
            .iter()
            .find(|b| b.status == BookingStatus::Active)
            .ok_or_else(|| {
                AppError::BusinessRule("Tool has no active booking to check in".to_string())
            })?;

        let booking = self
            .repository
            .bookings
            .set_status(active.id, BookingStatus::Completed)
            .await?;
        self.repository.tools.set_owner(tool_id, None).await?;

        Ok(booking)
    }

    /// Reject the requested interval when it collides with the tool's
    /// calendar. Pure logic over freshly fetched records.
    async fn check_interval(
        &self,
        tool_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<()> {
        let bookings = self.repository.bookings.list_for_tool(tool_id).await?;
        let maintenances = self.repository.maintenances.list_for_tool(tool_id).await?;

        match availability::find_conflict(&bookings, &maintenances, start, end) {
            Some(Conflict::Booking(_)) => {
                Err(AppError::BookingConflict(BOOKED_CONFLICT_MSG.to_string()))
            }
            Some(Conflict::Maintenance(_)) => Err(AppError::MaintenanceConflict(
                MAINTENANCE_CONFLICT_MSG.to_string(),
            )),
            None => Ok(()),
        }
    }

    /// Apply a lifecycle move, rejecting illegal ones
    async fn transition(&self, id: i32, next: BookingStatus) -> AppResult<Booking> {
        let booking = self.repository.bookings.get_by_id(id).await?;
        if !booking.status.can_transition_to(next) {
            return Err(AppError::BusinessRule(format!(
                "Cannot move booking from '{}' to '{}'",
                booking.status, next
            )));
        }
        self.repository.bookings.set_status(id, next).await
    }

    async fn notify_requester(&self, booking: &Booking, kind: NotificationKind, verb: &str) {
        let tool_name = match self.repository.tools.get_by_id(booking.tool_id).await {
            Ok(tool) => tool.name,
            Err(_) => format!("tool {}", booking.tool_id),
        };
        self.notifications
            .publish(
                booking.user_id,
                kind,
                &format!(
                    "Your booking for '{}' ({} to {}) was {}",
                    tool_name,
                    booking.start_date.format("%Y-%m-%d"),
                    booking.end_date.format("%Y-%m-%d"),
                    verb,
                ),
            )
            .await;
    }
}
