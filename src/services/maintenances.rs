//! Maintenance management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{
        enums::{MaintenanceStatus, NotificationKind},
        maintenance::{CreateMaintenance, Maintenance, MaintenancePart, MaintenanceQuery, UpdateMaintenance},
    },
    repository::Repository,
};

use super::notifications::NotificationsService;

#[derive(Clone)]
pub struct MaintenancesService {
    repository: Repository,
    notifications: NotificationsService,
}

impl MaintenancesService {
    pub fn new(repository: Repository, notifications: NotificationsService) -> Self {
        Self {
            repository,
            notifications,
        }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Maintenance> {
        self.repository.maintenances.get_by_id(id).await
    }

    pub async fn list(&self, query: &MaintenanceQuery) -> AppResult<Vec<Maintenance>> {
        self.repository.maintenances.list(query).await
    }

    /// Create a maintenance window for a tool
    pub async fn create(&self, data: &CreateMaintenance) -> AppResult<Maintenance> {
        if let Some(end) = data.end_date {
            if data.start_date >= end {
                return Err(AppError::Validation(
                    "End date must be after start date".to_string(),
                ));
            }
        }
        if data.status == Some(MaintenanceStatus::Completed) {
            return Err(AppError::Validation(
                "Cannot create a maintenance in status 'completed'".to_string(),
            ));
        }

        let tool = self.repository.tools.get_by_id(data.tool_id).await?;
        let maintenance = self.repository.maintenances.create(data).await?;

        self.notifications
            .publish_to_staff(
                NotificationKind::MaintenanceDue,
                &format!(
                    "Maintenance '{}' on '{}' starting {}",
                    maintenance.description,
                    tool.name,
                    maintenance.start_date.format("%Y-%m-%d"),
                ),
            )
            .await;

        Ok(maintenance)
    }

    /// Update a maintenance; status moves go through the lifecycle table
    pub async fn update(&self, id: i32, data: &UpdateMaintenance) -> AppResult<Maintenance> {
        let current = self.repository.maintenances.get_by_id(id).await?;

        if let Some(next) = data.status {
            if next != current.status && !current.status.can_transition_to(next) {
                return Err(AppError::BusinessRule(format!(
                    "Cannot move maintenance from '{}' to '{}'",
                    current.status, next
                )));
            }
        }

        let start = data.start_date.unwrap_or(current.start_date);
        if let Some(end) = data.end_date.or(current.end_date) {
            if start >= end {
                return Err(AppError::Validation(
                    "End date must be after start date".to_string(),
                ));
            }
        }

        self.repository.maintenances.update(id, data).await
    }

    /// Complete a maintenance, stamping the end date when absent
    pub async fn complete(&self, id: i32) -> AppResult<Maintenance> {
        let current = self.repository.maintenances.get_by_id(id).await?;
        if !current.status.can_transition_to(MaintenanceStatus::Completed) {
            return Err(AppError::BusinessRule(format!(
                "Cannot complete a maintenance in status '{}'",
                current.status
            )));
        }

        let end_date = current.end_date.or_else(|| Some(Utc::now()));
        self.repository
            .maintenances
            .update(
                id,
                &UpdateMaintenance {
                    description: None,
                    cost: None,
                    start_date: None,
                    end_date,
                    status: Some(MaintenanceStatus::Completed),
                },
            )
            .await
    }

    /// Consume spare-part stock for a maintenance (transactional in the
    /// repository). Flags the part to staff when it drops to its minimum.
    pub async fn assign_part(
        &self,
        maintenance_id: i32,
        spare_part_id: i32,
        quantity: i32,
    ) -> AppResult<MaintenancePart> {
        if quantity <= 0 {
            return Err(AppError::Validation(
                "Quantity must be positive".to_string(),
            ));
        }

        let maintenance = self.repository.maintenances.get_by_id(maintenance_id).await?;
        if maintenance.status.is_terminal() {
            return Err(AppError::BusinessRule(
                "Cannot assign parts to a completed maintenance".to_string(),
            ));
        }

        let (usage, part) = self
            .repository
            .maintenances
            .assign_part(maintenance_id, spare_part_id, quantity)
            .await?;

        if part.is_low_stock() {
            self.notifications
                .publish_to_staff(
                    NotificationKind::LowStock,
                    &format!(
                        "Spare part '{}' ({}) is down to {} unit(s)",
                        part.name, part.reference, part.quantity
                    ),
                )
                .await;
        }

        Ok(usage)
    }

    /// Parts consumed by a maintenance
    pub async fn list_parts(&self, maintenance_id: i32) -> AppResult<Vec<MaintenancePart>> {
        self.repository.maintenances.get_by_id(maintenance_id).await?;
        self.repository.maintenances.list_parts(maintenance_id).await
    }
}
