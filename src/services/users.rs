//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        user::{CreateUser, UpdateUser, User, UserClaims, UserQuery},
        UserRole,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Authenticate by login and password, returning a JWT token
    pub async fn authenticate(&self, login: &str, password: &str) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .get_by_login(login)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid login or password".to_string()))?;

        let parsed = PasswordHash::new(&user.password)
            .map_err(|e| AppError::Internal(format!("Corrupt password hash: {}", e)))?;
        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_err()
        {
            return Err(AppError::Authentication(
                "Invalid login or password".to_string(),
            ));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Create a JWT token for a user
    pub fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.login.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        self.repository.users.list(query).await
    }

    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let hash = self.hash_password(&data.password)?;
        self.repository
            .users
            .create(
                &data.login,
                &hash,
                data.firstname.as_deref(),
                data.lastname.as_deref(),
                data.email.as_deref(),
                data.role.unwrap_or(UserRole::User),
            )
            .await
    }

    pub async fn update(&self, id: i32, data: &UpdateUser) -> AppResult<User> {
        let hash = match data.password.as_deref() {
            Some(password) => Some(self.hash_password(password)?),
            None => None,
        };
        self.repository
            .users
            .update(
                id,
                data.login.as_deref(),
                hash.as_deref(),
                data.firstname.as_deref(),
                data.lastname.as_deref(),
                data.email.as_deref(),
                data.role,
            )
            .await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await
    }

    /// Create the default admin account on first start
    pub async fn ensure_default_admin(&self) -> AppResult<()> {
        if self.repository.users.get_by_login("admin").await?.is_some() {
            return Ok(());
        }
        let hash = self.hash_password("admin")?;
        self.repository
            .users
            .create(
                "admin",
                &hash,
                Some("Default"),
                Some("Administrator"),
                None,
                UserRole::Admin,
            )
            .await?;
        tracing::warn!("Created default 'admin' account; change its password");
        Ok(())
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }
}
