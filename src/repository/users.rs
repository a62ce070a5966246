//! Users repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};

use super::is_unique_violation;
use crate::{
    error::{AppError, AppResult},
    models::user::{User, UserQuery},
};

#[derive(Clone)]
pub struct UsersRepository {
    pool: Pool<Postgres>,
}

impl UsersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Get user by login, if any
    pub async fn get_by_login(&self, login: &str) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// List users, optionally filtered by name substring and role
    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        let mut sql = String::from("SELECT * FROM users WHERE 1=1");
        let mut idx = 1;
        if query.name.is_some() {
            sql.push_str(&format!(
                " AND (login ILIKE ${i} OR firstname ILIKE ${i} OR lastname ILIKE ${i})",
                i = idx
            ));
            idx += 1;
        }
        if query.role.is_some() {
            sql.push_str(&format!(" AND role = ${}", idx));
        }
        sql.push_str(" ORDER BY login");

        let mut builder = sqlx::query_as::<_, User>(&sql);
        if let Some(ref name) = query.name {
            builder = builder.bind(format!("%{}%", name));
        }
        if let Some(role) = query.role {
            builder = builder.bind(role);
        }

        Ok(builder.fetch_all(&self.pool).await?)
    }

    /// Staff users, for broadcast notifications
    pub async fn list_staff(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE role IN ('manager', 'admin') ORDER BY login",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a user; `password` must already be hashed
    pub async fn create(
        &self,
        login: &str,
        password_hash: &str,
        firstname: Option<&str>,
        lastname: Option<&str>,
        email: Option<&str>,
        role: crate::models::UserRole,
    ) -> AppResult<User> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (login, password, firstname, lastname, email, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(login)
        .bind(password_hash)
        .bind(firstname)
        .bind(lastname)
        .bind(email)
        .bind(role)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row),
            Err(ref e) if is_unique_violation(e) => Err(AppError::Duplicate(format!(
                "Login '{}' already exists",
                login
            ))),
            Err(e) => Err(e.into()),
        }
    }

    /// Update a user; `password` must already be hashed when present
    pub async fn update(
        &self,
        id: i32,
        login: Option<&str>,
        password_hash: Option<&str>,
        firstname: Option<&str>,
        lastname: Option<&str>,
        email: Option<&str>,
        role: Option<crate::models::UserRole>,
    ) -> AppResult<User> {
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

        add_field!(login, "login");
        add_field!(password_hash, "password");
        add_field!(firstname, "firstname");
        add_field!(lastname, "lastname");
        add_field!(email, "email");
        add_field!(role, "role");

        let query = format!(
            "UPDATE users SET {} WHERE id = {} RETURNING *",
            sets.join(", "),
            id
        );

        let mut builder = sqlx::query_as::<_, User>(&query).bind(now);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(login);
        bind_field!(password_hash);
        bind_field!(firstname);
        bind_field!(lastname);
        bind_field!(email);
        bind_field!(role);

        let result = builder.fetch_optional(&self.pool).await;

        match result {
            Ok(Some(row)) => Ok(row),
            Ok(None) => Err(AppError::NotFound(format!("User {} not found", id))),
            Err(ref e) if is_unique_violation(e) => {
                Err(AppError::Duplicate("Login already exists".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Delete a user
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }
        Ok(())
    }
}
