//! Repository layer for database operations

pub mod bookings;
pub mod maintenances;
pub mod notifications;
pub mod spare_parts;
pub mod tools;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub tools: tools::ToolsRepository,
    pub bookings: bookings::BookingsRepository,
    pub maintenances: maintenances::MaintenancesRepository,
    pub spare_parts: spare_parts::SparePartsRepository,
    pub users: users::UsersRepository,
    pub notifications: notifications::NotificationsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            tools: tools::ToolsRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            maintenances: maintenances::MaintenancesRepository::new(pool.clone()),
            spare_parts: spare_parts::SparePartsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            notifications: notifications::NotificationsRepository::new(pool.clone()),
            pool,
        }
    }
}

/// True when the database error is a unique-constraint violation.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}
