/// Short text posts
use crate::error::{AppError, Result};
use crate::models::{LikeTarget, Tweet};
use crate::repository::LikeRepository;
use sqlx::PgPool;
use uuid::Uuid;

const TWEET_COLUMNS: &str = "id, owner_id, content, created_at, updated_at";

pub struct TweetService {
    pool: PgPool,
    likes: LikeRepository,
}

impl TweetService {
    pub fn new(pool: PgPool) -> Self {
        let likes = LikeRepository::new(pool.clone());
        Self { pool, likes }
    }

    pub async fn create(&self, owner_id: Uuid, content: &str) -> Result<Tweet> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".into()));
        }

        let tweet = sqlx::query_as::<_, Tweet>(&format!(
            r#"
            INSERT INTO tweets (owner_id, content)
            VALUES ($1, $2)
            RETURNING {TWEET_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(content.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(tweet)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Tweet>> {
        let tweets = sqlx::query_as::<_, Tweet>(&format!(
            r#"
            SELECT {TWEET_COLUMNS}
            FROM tweets
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tweets)
    }

    pub async fn update(&self, tweet_id: Uuid, actor_id: Uuid, content: &str) -> Result<Tweet> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".into()));
        }

        self.ensure_owner(tweet_id, actor_id).await?;

        let tweet = sqlx::query_as::<_, Tweet>(&format!(
            r#"
            UPDATE tweets
            SET content = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {TWEET_COLUMNS}
            "#
        ))
        .bind(content.trim())
        .bind(tweet_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(tweet)
    }

    /// Delete a tweet along with the likes targeting it
    pub async fn delete(&self, tweet_id: Uuid, actor_id: Uuid) -> Result<()> {
        self.ensure_owner(tweet_id, actor_id).await?;

        self.likes
            .delete_for_target(LikeTarget::Tweet(tweet_id))
            .await?;

        sqlx::query("DELETE FROM tweets WHERE id = $1")
            .bind(tweet_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ensure_owner(&self, tweet_id: Uuid, actor_id: Uuid) -> Result<()> {
        let owner_id: Uuid = sqlx::query_scalar("SELECT owner_id FROM tweets WHERE id = $1")
            .bind(tweet_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Tweet not found".into()))?;

        if owner_id != actor_id {
            return Err(AppError::Forbidden(
                "only the owner can modify this tweet".into(),
            ));
        }

        Ok(())
    }
}
