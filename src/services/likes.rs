/// Like toggles. Each toggle verifies the target still exists, then defers
/// to the relation-row repository for the race-free state flip.
use crate::error::{AppError, Result};
use crate::models::{LikeTarget, ToggleOutcome, Video};
use crate::repository::LikeRepository;
use sqlx::PgPool;
use uuid::Uuid;

pub struct LikeService {
    pool: PgPool,
    likes: LikeRepository,
}

impl LikeService {
    pub fn new(pool: PgPool) -> Self {
        let likes = LikeRepository::new(pool.clone());
        Self { pool, likes }
    }

    pub async fn toggle_video_like(
        &self,
        user_id: Uuid,
        video_id: Uuid,
    ) -> Result<ToggleOutcome> {
        self.ensure_exists("videos", video_id, "Video not found")
            .await?;

        let created = self.likes.toggle(user_id, LikeTarget::Video(video_id)).await?;
        Ok(ToggleOutcome { created })
    }

    pub async fn toggle_comment_like(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
    ) -> Result<ToggleOutcome> {
        self.ensure_exists("comments", comment_id, "Comment not found")
            .await?;

        let created = self
            .likes
            .toggle(user_id, LikeTarget::Comment(comment_id))
            .await?;
        Ok(ToggleOutcome { created })
    }

    pub async fn toggle_tweet_like(
        &self,
        user_id: Uuid,
        tweet_id: Uuid,
    ) -> Result<ToggleOutcome> {
        self.ensure_exists("tweets", tweet_id, "Tweet not found")
            .await?;

        let created = self.likes.toggle(user_id, LikeTarget::Tweet(tweet_id)).await?;
        Ok(ToggleOutcome { created })
    }

    /// Videos the user has liked, most recent like first. An empty result is
    /// an empty list, not an error.
    pub async fn liked_videos(&self, user_id: Uuid) -> Result<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT v.id, v.owner_id, v.video_file_url, v.thumbnail_url, v.title,
                   v.description, v.duration, v.view_count, v.is_published,
                   v.created_at, v.updated_at
            FROM likes l
            JOIN videos v ON v.id = l.target_id
            WHERE l.user_id = $1 AND l.target_kind = 'video'
            ORDER BY l.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn ensure_exists(&self, table: &str, id: Uuid, message: &str) -> Result<()> {
        // table is one of three fixed names, never caller input
        let exists: bool =
            sqlx::query_scalar(&format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)"))
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if !exists {
            return Err(AppError::NotFound(message.into()));
        }

        Ok(())
    }
}
