//! Tools repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::tool::{CreateTool, Tool, ToolQuery, UpdateTool},
};

#[derive(Clone)]
pub struct ToolsRepository {
    pool: Pool<Postgres>,
}

impl ToolsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List tools, optionally filtered by name substring and condition
    pub async fn list(&self, query: &ToolQuery) -> AppResult<Vec<Tool>> {
        let mut sql = String::from("SELECT * FROM tools WHERE 1=1");
        if query.name.is_some() {
            sql.push_str(" AND name ILIKE $1");
        }
        if query.condition.is_some() {
            sql.push_str(if query.name.is_some() {
                " AND condition = $2"
            } else {
                " AND condition = $1"
            });
        }
        sql.push_str(" ORDER BY name");

        let mut builder = sqlx::query_as::<_, Tool>(&sql);
        if let Some(ref name) = query.name {
            builder = builder.bind(format!("%{}%", name));
        }
        if let Some(condition) = query.condition {
            builder = builder.bind(condition);
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Get tool by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Tool> {
        sqlx::query_as::<_, Tool>("SELECT * FROM tools WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tool {} not found", id)))
    }

    /// Create a tool
    pub async fn create(&self, data: &CreateTool) -> AppResult<Tool> {
        let row = sqlx::query_as::<_, Tool>(
            r#"
            INSERT INTO tools (name, description, condition, owner_id, notes)
            VALUES ($1, $2, COALESCE($3, 'good'), $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.description)
        .bind(data.condition)
        .bind(data.owner_id)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Update a tool
    pub async fn update(&self, id: i32, data: &UpdateTool) -> AppResult<Tool> {
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
        add_field!(data.description, "description");
        add_field!(data.condition, "condition");
        add_field!(data.owner_id, "owner_id");
        add_field!(data.notes, "notes");

        let query = format!(
            "UPDATE tools SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, Tool>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(data.name);
        bind_field!(data.description);
        bind_field!(data.condition);
        bind_field!(data.owner_id);
        bind_field!(data.notes);

        builder
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Tool {} not found", id)))
    }

    /// Delete a tool
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Tool {} not found", id)));
        }
        Ok(())
    }

    /// Set or clear the current owner
    pub async fn set_owner(&self, id: i32, owner_id: Option<i32>) -> AppResult<()> {
        sqlx::query("UPDATE tools SET owner_id = $1, modif_date = $2 WHERE id = $3")
            .bind(owner_id)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
