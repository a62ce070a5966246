//! Business logic services

pub mod availability;
pub mod bookings;
pub mod maintenances;
pub mod notifications;
pub mod spare_parts;
pub mod tools;
pub mod users;

use crate::{
    config::{AuthConfig, BookingsConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub tools: tools::ToolsService,
    pub bookings: bookings::BookingsService,
    pub maintenances: maintenances::MaintenancesService,
    pub spare_parts: spare_parts::SparePartsService,
    pub users: users::UsersService,
    pub notifications: notifications::NotificationsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        bookings_config: BookingsConfig,
    ) -> Self {
        let notifications = notifications::NotificationsService::new(repository.clone());
        Self {
            tools: tools::ToolsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(
                repository.clone(),
                notifications.clone(),
                bookings_config,
            ),
            maintenances: maintenances::MaintenancesService::new(
                repository.clone(),
                notifications.clone(),
            ),
            spare_parts: spare_parts::SparePartsService::new(repository.clone()),
            users: users::UsersService::new(repository, auth_config),
            notifications,
        }
    }
}
