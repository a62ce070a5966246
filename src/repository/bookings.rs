//! Bookings repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingDetails, BookingQuery, CreateBooking},
        enums::BookingStatus,
        tool::ToolShort,
        user::UserShort,
    },
};

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

const DETAILS_SELECT: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status, b.notes,
           t.id AS tool_id, t.name AS tool_name, t.condition AS tool_condition,
           u.id AS user_id, u.login AS user_login,
           u.firstname AS user_firstname, u.lastname AS user_lastname
    FROM bookings b
    JOIN tools t ON b.tool_id = t.id
    JOIN users u ON b.user_id = u.id
"#;

fn details_from_row(row: &sqlx::postgres::PgRow) -> BookingDetails {
    BookingDetails {
        id: row.get("id"),
        start_date: row.get("start_date"),
        end_date: row.get("end_date"),
        status: row.get("status"),
        notes: row.get("notes"),
        tool: ToolShort {
            id: row.get("tool_id"),
            name: row.get("tool_name"),
            condition: row.get("tool_condition"),
        },
        user: UserShort {
            id: row.get("user_id"),
            login: row.get("user_login"),
            firstname: row.get("user_firstname"),
            lastname: row.get("user_lastname"),
        },
    }
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// List bookings with embedded tool and user
    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<BookingDetails>> {
        let mut sql = format!("{} WHERE 1=1", DETAILS_SELECT);
        let mut idx = 1;
        if query.tool_id.is_some() {
            sql.push_str(&format!(" AND b.tool_id = ${}", idx));
            idx += 1;
        }
        if query.user_id.is_some() {
            sql.push_str(&format!(" AND b.user_id = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            sql.push_str(&format!(" AND b.status = ${}", idx));
        }
        sql.push_str(" ORDER BY b.start_date DESC");

        let mut builder = sqlx::query(&sql);
        if let Some(tool_id) = query.tool_id {
            builder = builder.bind(tool_id);
        }
        if let Some(user_id) = query.user_id {
            builder = builder.bind(user_id);
        }
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(details_from_row).collect())
    }

    /// All bookings associated with one tool, past and future alike
    pub async fn list_for_tool(&self, tool_id: i32) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE tool_id = $1 ORDER BY start_date",
        )
        .bind(tool_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All bookings for a set of tools, for batch status derivation
    pub async fn list_for_tools(&self, tool_ids: &[i32]) -> AppResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE tool_id = ANY($1) ORDER BY start_date",
        )
        .bind(tool_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Bookings of one user with embedded tool and user
    pub async fn list_details_for_user(&self, user_id: i32) -> AppResult<Vec<BookingDetails>> {
        let sql = format!("{} WHERE b.user_id = $1 ORDER BY b.start_date DESC", DETAILS_SELECT);
        let rows = sqlx::query(&sql).bind(user_id).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(details_from_row).collect())
    }

    /// Create a booking
    pub async fn create(&self, data: &CreateBooking) -> AppResult<Booking> {
        let row = sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (tool_id, user_id, start_date, end_date, status, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(data.tool_id)
        .bind(data.user_id)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.status)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Move a booking to a new status
    pub async fn set_status(&self, id: i32, status: BookingStatus) -> AppResult<Booking> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET status = $1, modif_date = $2 WHERE id = $3 RETURNING *",
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", id)))
    }

    /// Count bookings still occupying a tool's calendar
    pub async fn count_blocking_for_tool(&self, tool_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookings
            WHERE tool_id = $1 AND status IN ('pending', 'approved', 'active')
            "#,
        )
        .bind(tool_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
