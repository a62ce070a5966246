//! Spare parts repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::is_unique_violation;
use crate::{
    error::{AppError, AppResult},
    models::spare_part::{CreateSparePart, SparePart, UpdateSparePart},
};

#[derive(Clone)]
pub struct SparePartsRepository {
    pool: Pool<Postgres>,
}

impl SparePartsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all spare parts
    pub async fn list(&self) -> AppResult<Vec<SparePart>> {
        let rows = sqlx::query_as::<_, SparePart>("SELECT * FROM spare_parts ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Parts at or below their minimum stock level
    pub async fn list_low_stock(&self) -> AppResult<Vec<SparePart>> {
        let rows = sqlx::query_as::<_, SparePart>(
            "SELECT * FROM spare_parts WHERE quantity <= min_quantity ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get spare part by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<SparePart> {
        sqlx::query_as::<_, SparePart>("SELECT * FROM spare_parts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Spare part {} not found", id)))
    }

    /// Create a spare part
    pub async fn create(&self, data: &CreateSparePart) -> AppResult<SparePart> {
        let result = sqlx::query_as::<_, SparePart>(
            r#"
            INSERT INTO spare_parts (name, reference, quantity, min_quantity, unit_cost, notes)
            VALUES ($1, $2, COALESCE($3, 0), COALESCE($4, 0), $5, $6)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.reference)
        .bind(data.quantity)
        .bind(data.min_quantity)
        .bind(data.unit_cost)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(ref e) if is_unique_violation(e) => Err(AppError::Duplicate(format!(
                "Spare part reference '{}' already exists",
                data.reference
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Update a spare part
    pub async fn update(&self, id: i32, data: &UpdateSparePart) -> AppResult<SparePart> {
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

        add_field!(data.name, "name");
        add_field!(data.reference, "reference");
        add_field!(data.quantity, "quantity");
        add_field!(data.min_quantity, "min_quantity");
        add_field!(data.unit_cost, "unit_cost");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE spare_parts SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, SparePart>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.reference);
        bind_field!(data.quantity);
        bind_field!(data.min_quantity);
        bind_field!(data.unit_cost);
        bind_field!(data.notes);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Spare part {} not found", id)))
    }

    /// Delete a spare part
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM spare_parts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Spare part {} not found", id)));
        }
        Ok(())
    }
}
