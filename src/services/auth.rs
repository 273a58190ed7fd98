/// Account registration and session token management
use crate::error::{AppError, Result};
use crate::models::User;
use crate::security::jwt::{JwtKeys, TokenPair};
use crate::security::password;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, full_name, avatar_url, cover_image_url, \
                            password_hash, refresh_token, created_at, updated_at";

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub password: String,
    /// Resolved by the external upload step; this service only stores the URL
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

pub struct AuthService {
    pool: PgPool,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(pool: PgPool, keys: JwtKeys) -> Self {
        Self { pool, keys }
    }

    /// Create an account. Usernames are stored lowercased; duplicate
    /// username or email surfaces as Conflict.
    pub async fn register(&self, input: RegisterInput) -> Result<User> {
        for (value, field) in [
            (&input.username, "username"),
            (&input.email, "email"),
            (&input.full_name, "full_name"),
            (&input.password, "password"),
            (&input.avatar_url, "avatar_url"),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }

        let password_hash = password::hash_password(&input.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (username, email, full_name, avatar_url, cover_image_url, password_hash)
            VALUES (LOWER($1), LOWER($2), $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(input.username.trim())
        .bind(input.email.trim())
        .bind(input.full_name.trim())
        .bind(&input.avatar_url)
        .bind(&input.cover_image_url)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("username or email already registered".into())
            }
            _ => AppError::from(e),
        })?;

        Ok(user)
    }

    /// Verify credentials and issue a token pair. The refresh token is
    /// persisted on the user row and rotates on every refresh.
    pub async fn login(&self, input: LoginInput) -> Result<(User, TokenPair)> {
        if input.username.is_none() && input.email.is_none() {
            return Err(AppError::Validation("username or email is required".into()));
        }

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE ($1::TEXT IS NOT NULL AND username = LOWER($1))
               OR ($2::TEXT IS NOT NULL AND email = LOWER($2))
            "#
        ))
        .bind(&input.username)
        .bind(&input.email)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User does not exist".into()))?;

        if !password::verify_password(&input.password, &user.password_hash)? {
            return Err(AppError::Unauthorized("Invalid user credentials".into()));
        }

        let pair = self
            .keys
            .issue_pair(user.id, &user.email, &user.username)?;
        self.store_refresh_token(user.id, Some(&pair.refresh_token))
            .await?;

        Ok((user, pair))
    }

    /// Exchange a refresh token for a new pair, rotating the stored token
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair> {
        let claims = self.keys.verify_refresh(refresh_token)?;
        let user_id = claims.user_id()?;

        let user = self.find_user(user_id).await?;

        // A token that no longer matches the stored copy has been rotated
        // away or revoked by logout.
        if user.refresh_token.as_deref() != Some(refresh_token) {
            return Err(AppError::Unauthorized(
                "Refresh token is expired or already used".into(),
            ));
        }

        let pair = self
            .keys
            .issue_pair(user.id, &user.email, &user.username)?;
        self.store_refresh_token(user.id, Some(&pair.refresh_token))
            .await?;

        Ok(pair)
    }

    /// Revoke the current session's refresh token
    pub async fn logout(&self, user_id: Uuid) -> Result<()> {
        self.store_refresh_token(user_id, None).await
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<()> {
        if new_password.trim().is_empty() {
            return Err(AppError::Validation("new password is required".into()));
        }

        let user = self.find_user(user_id).await?;

        if !password::verify_password(old_password, &user.password_hash)? {
            return Err(AppError::Validation("Invalid old password".into()));
        }

        let password_hash = password::hash_password(new_password)?;
        sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(&password_hash)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_user(&self, user_id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    async fn store_refresh_token(&self, user_id: Uuid, token: Option<&str>) -> Result<()> {
        sqlx::query("UPDATE users SET refresh_token = $1, updated_at = NOW() WHERE id = $2")
            .bind(token)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
