//! Maintenances repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        maintenance::{CreateMaintenance, Maintenance, MaintenancePart, MaintenanceQuery, UpdateMaintenance},
        spare_part::SparePart,
    },
};

#[derive(Clone)]
pub struct MaintenancesRepository {
    pool: Pool<Postgres>,
}

impl MaintenancesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get maintenance by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Maintenance> {
        sqlx::query_as::<_, Maintenance>("SELECT * FROM maintenances WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance {} not found", id)))
    }

    /// List maintenances, optionally filtered by tool and status
    pub async fn list(&self, query: &MaintenanceQuery) -> AppResult<Vec<Maintenance>> {
        let mut sql = String::from("SELECT * FROM maintenances WHERE 1=1");
        let mut idx = 1;
        if query.tool_id.is_some() {
            sql.push_str(&format!(" AND tool_id = ${}", idx));
            idx += 1;
        }
        if query.status.is_some() {
            sql.push_str(&format!(" AND status = ${}", idx));
        }
        sql.push_str(" ORDER BY start_date DESC");

        let mut builder = sqlx::query_as::<_, Maintenance>(&sql);
        if let Some(tool_id) = query.tool_id {
            builder = builder.bind(tool_id);
        }
        if let Some(status) = query.status {
            builder = builder.bind(status);
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// All maintenances associated with one tool
    pub async fn list_for_tool(&self, tool_id: i32) -> AppResult<Vec<Maintenance>> {
        let rows = sqlx::query_as::<_, Maintenance>(
            "SELECT * FROM maintenances WHERE tool_id = $1 ORDER BY start_date",
        )
        .bind(tool_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// All maintenances for a set of tools, for batch status derivation
    pub async fn list_for_tools(&self, tool_ids: &[i32]) -> AppResult<Vec<Maintenance>> {
        let rows = sqlx::query_as::<_, Maintenance>(
            "SELECT * FROM maintenances WHERE tool_id = ANY($1) ORDER BY start_date",
        )
        .bind(tool_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a maintenance
    pub async fn create(&self, data: &CreateMaintenance) -> AppResult<Maintenance> {
        let row = sqlx::query_as::<_, Maintenance>(
            r#"
            INSERT INTO maintenances (tool_id, description, cost, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'scheduled'))
            RETURNING *
            "#,
        )
        .bind(data.tool_id)
        .bind(&data.description)
        .bind(data.cost)
        .bind(data.start_date)
        .bind(data.end_date)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a maintenance
    pub async fn update(&self, id: i32, data: &UpdateMaintenance) -> AppResult<Maintenance> {
        let now = Utc::now();
        let mut sets = vec!["modif_date = $1".to_string()];
        let mut idx = 2;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() {
                    sets.push(format!("{} = ${}", $name, idx));
                    idx += 1;
                }
            };
        }

        add_field!(data.description, "description");
        add_field!(data.cost, "cost");
        add_field!(data.start_date, "start_date");
        add_field!(data.end_date, "end_date");
        add_field!(data.status, "status");

        let query = format!(
            "UPDATE maintenances SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Maintenance>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.description);
        bind_field!(data.cost);
        bind_field!(data.start_date);
        bind_field!(data.end_date);
        bind_field!(data.status);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Maintenance {} not found", id)))
    }

    /// Consume spare-part stock for a maintenance.
    ///
    /// Runs in a single transaction: the stock decrement and the usage row
    /// either both commit or neither does. The decrement only matches when
    /// enough stock remains, so a failed guard rolls the whole operation
    /// back.
    pub async fn assign_part(
        &self,
        maintenance_id: i32,
        spare_part_id: i32,
        quantity: i32,
    ) -> AppResult<(MaintenancePart, SparePart)> {
        let mut tx = self.pool.begin().await?;

        let part = sqlx::query_as::<_, SparePart>(
            r#"
            UPDATE spare_parts
            SET quantity = quantity - $1, modif_date = $2
            WHERE id = $3 AND quantity >= $1
            RETURNING *
            "#,
        )
        .bind(quantity)
        .bind(Utc::now())
        .bind(spare_part_id)
        .fetch_optional(&mut *tx)
        .await?;

        let part = match part {
            Some(p) => p,
            None => {
                // Distinguish a missing part from insufficient stock; the
                // transaction is dropped either way.
                let exists: bool = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM spare_parts WHERE id = $1)",
                )
                .bind(spare_part_id)
                .fetch_one(&mut *tx)
                .await?;
                return Err(if exists {
                    AppError::InsufficientStock(format!(
                        "Not enough stock of spare part {} (requested {})",
                        spare_part_id, quantity
                    ))
                } else {
                    AppError::NotFound(format!("Spare part {} not found", spare_part_id))
                });
            }
        };

        let usage = sqlx::query_as::<_, MaintenancePart>(
            r#"
            INSERT INTO maintenance_parts (maintenance_id, spare_part_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(maintenance_id)
        .bind(spare_part_id)
        .bind(quantity)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((usage, part))
    }

    /// Parts consumed by a maintenance
    pub async fn list_parts(&self, maintenance_id: i32) -> AppResult<Vec<MaintenancePart>> {
        let rows = sqlx::query_as::<_, MaintenancePart>(
            "SELECT * FROM maintenance_parts WHERE maintenance_id = $1 ORDER BY crea_date",
        )
        .bind(maintenance_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
