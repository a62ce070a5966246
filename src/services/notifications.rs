//! Notification service
//!
//! Publishing is fire-and-forget: a failed insert is logged and swallowed
//! so it can never fail the request that triggered it.

use crate::{
    error::AppResult,
    models::{enums::NotificationKind, notification::Notification},
    repository::Repository,
};

#[derive(Clone)]
pub struct NotificationsService {
    repository: Repository,
}

impl NotificationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Publish a notification to one user
    pub async fn publish(&self, user_id: i32, kind: NotificationKind, message: &str) {
        if let Err(e) = self.repository.notifications.create(user_id, kind, message).await {
            tracing::warn!("Failed to publish notification to user {}: {}", user_id, e);
        }
    }

    /// Publish a notification to every manager and admin
    pub async fn publish_to_staff(&self, kind: NotificationKind, message: &str) {
        let staff = match self.repository.users.list_staff().await {
            Ok(staff) => staff,
            Err(e) => {
                tracing::warn!("Failed to resolve staff for notification: {}", e);
                return;
            }
        };
        for user in staff {
            self.publish(user.id, kind, message).await;
        }
    }

    /// Notifications of one user, unread first
    pub async fn list_for_user(&self, user_id: i32) -> AppResult<Vec<Notification>> {
        self.repository.notifications.list_for_user(user_id).await
    }

    /// Mark one notification as read
    pub async fn mark_read(&self, id: i32, user_id: i32) -> AppResult<()> {
        self.repository.notifications.mark_read(id, user_id).await
    }

    /// Mark all notifications of one user as read; returns the count
    pub async fn mark_all_read(&self, user_id: i32) -> AppResult<u64> {
        self.repository.notifications.mark_all_read(user_id).await
    }
}
