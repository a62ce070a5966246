//! Toolcrib Tool Rental and Inventory Management System
//!
//! A Rust implementation of the Toolcrib backend, providing a REST JSON
//! API for tracking physical tools, bookings, maintenance, spare parts
//! and notifications.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
