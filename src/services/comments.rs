/// Comment creation, listing and owner-checked mutations
use crate::error::{AppError, Result};
use crate::models::{Comment, LikeTarget};
use crate::repository::LikeRepository;
use sqlx::PgPool;
use uuid::Uuid;

const COMMENT_COLUMNS: &str = "id, video_id, owner_id, content, created_at, updated_at";

pub struct CommentService {
    pool: PgPool,
    likes: LikeRepository,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        let likes = LikeRepository::new(pool.clone());
        Self { pool, likes }
    }

    /// Add a comment to a video. The video must exist at creation time.
    pub async fn add(&self, video_id: Uuid, owner_id: Uuid, content: &str) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".into()));
        }

        let video_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)")
                .bind(video_id)
                .fetch_one(&self.pool)
                .await?;

        if !video_exists {
            return Err(AppError::NotFound("Video not found".into()));
        }

        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            INSERT INTO comments (video_id, owner_id, content)
            VALUES ($1, $2, $3)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(video_id)
        .bind(owner_id)
        .bind(content.trim())
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    pub async fn list_by_video(&self, video_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE video_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(video_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            r#"
            SELECT {COMMENT_COLUMNS}
            FROM comments
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    pub async fn update(&self, comment_id: Uuid, actor_id: Uuid, content: &str) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(AppError::Validation("content is required".into()));
        }

        self.ensure_owner(comment_id, actor_id).await?;

        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            UPDATE comments
            SET content = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(content.trim())
        .bind(comment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Delete a comment along with the likes targeting it
    pub async fn delete(&self, comment_id: Uuid, actor_id: Uuid) -> Result<()> {
        self.ensure_owner(comment_id, actor_id).await?;

        self.likes
            .delete_for_target(LikeTarget::Comment(comment_id))
            .await?;

        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ensure_owner(&self, comment_id: Uuid, actor_id: Uuid) -> Result<()> {
        let owner_id: Uuid = sqlx::query_scalar("SELECT owner_id FROM comments WHERE id = $1")
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Comment not found".into()))?;

        if owner_id != actor_id {
            return Err(AppError::Forbidden(
                "only the owner can modify this comment".into(),
            ));
        }

        Ok(())
    }
}
