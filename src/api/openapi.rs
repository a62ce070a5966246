//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, bookings, health, maintenances, notifications, spare_parts, tools, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Toolcrib API",
        version = "1.0.0",
        description = "Tool Rental and Inventory Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html"),
        contact(name = "Toolcrib Team", email = "contact@toolcrib.org")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Tools
        tools::list_tools,
        tools::get_tool,
        tools::create_tool,
        tools::update_tool,
        tools::delete_tool,
        tools::checkout_tool,
        tools::checkin_tool,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::get_user_bookings,
        bookings::create_booking,
        bookings::approve_booking,
        bookings::reject_booking,
        bookings::cancel_booking,
        // Maintenances
        maintenances::list_maintenances,
        maintenances::get_maintenance,
        maintenances::create_maintenance,
        maintenances::update_maintenance,
        maintenances::complete_maintenance,
        maintenances::assign_part,
        maintenances::list_parts,
        // Spare parts
        spare_parts::list_spare_parts,
        spare_parts::list_low_stock,
        spare_parts::get_spare_part,
        spare_parts::create_spare_part,
        spare_parts::update_spare_part,
        spare_parts::delete_spare_part,
        // Users
        users::list_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Notifications
        notifications::list_notifications,
        notifications::mark_read,
        notifications::mark_all_read,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::UserInfo,
            // Tools
            crate::models::tool::Tool,
            crate::models::tool::ToolShort,
            crate::models::tool::ToolWithStatus,
            crate::models::tool::CreateTool,
            crate::models::tool::UpdateTool,
            tools::CheckoutRequest,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingDetails,
            bookings::CreateBookingRequest,
            // Maintenances
            crate::models::maintenance::Maintenance,
            crate::models::maintenance::MaintenancePart,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::UpdateMaintenance,
            maintenances::AssignPartRequest,
            // Spare parts
            crate::models::spare_part::SparePart,
            crate::models::spare_part::CreateSparePart,
            crate::models::spare_part::UpdateSparePart,
            // Users
            crate::models::user::User,
            crate::models::user::UserShort,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Notifications
            crate::models::notification::Notification,
            notifications::ReadAllResponse,
            // Enums
            crate::models::enums::ToolStatus,
            crate::models::enums::ToolCondition,
            crate::models::enums::BookingStatus,
            crate::models::enums::MaintenanceStatus,
            crate::models::enums::UserRole,
            crate::models::enums::NotificationKind,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "tools", description = "Tool management and checkout"),
        (name = "bookings", description = "Booking management"),
        (name = "maintenances", description = "Maintenance management"),
        (name = "spare-parts", description = "Spare part inventory"),
        (name = "users", description = "User management"),
        (name = "notifications", description = "Notifications")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
