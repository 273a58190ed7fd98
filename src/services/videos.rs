/// Video publishing, the per-video detail view and cascading deletes
use crate::error::{AppError, Result};
use crate::models::{Video, VideoDetail, VideoOwnerRef};
use serde::Deserialize;
use sqlx::{PgPool, Row};
use uuid::Uuid;

const VIDEO_COLUMNS: &str = "id, owner_id, video_file_url, thumbnail_url, title, description, \
                             duration, view_count, is_published, created_at, updated_at";

#[derive(Debug, Deserialize)]
pub struct PublishVideoInput {
    pub title: String,
    pub description: Option<String>,
    /// Already resolved by the external upload service
    pub video_file_url: String,
    pub thumbnail_url: String,
    pub duration: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVideoInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
}

pub struct VideoService {
    pool: PgPool,
}

impl VideoService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn publish(&self, owner_id: Uuid, input: PublishVideoInput) -> Result<Video> {
        if input.title.trim().is_empty() {
            return Err(AppError::Validation("title is required".into()));
        }
        if input.video_file_url.trim().is_empty() || input.thumbnail_url.trim().is_empty() {
            return Err(AppError::Validation(
                "video file and thumbnail are required".into(),
            ));
        }

        let video = sqlx::query_as::<_, Video>(&format!(
            r#"
            INSERT INTO videos (owner_id, video_file_url, thumbnail_url, title, description, duration)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(&input.video_file_url)
        .bind(&input.thumbnail_url)
        .bind(input.title.trim())
        .bind(input.description.as_deref().unwrap_or(""))
        .bind(input.duration)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    /// Per-video detail: owner joined with left-join semantics (the video
    /// survives a missing owner) and the like count computed over the like
    /// rows targeting this video.
    pub async fn get_detail(&self, video_id: Uuid) -> Result<VideoDetail> {
        let row = sqlx::query(
            r#"
            SELECT v.id, v.video_file_url, v.thumbnail_url, v.title, v.description,
                   v.duration, v.view_count, v.is_published,
                   o.id AS owner_id,
                   o.username AS owner_username,
                   (SELECT COUNT(*) FROM likes l
                     WHERE l.target_kind = 'video' AND l.target_id = v.id) AS like_count
            FROM videos v
            LEFT JOIN users o ON o.id = v.owner_id
            WHERE v.id = $1
            "#,
        )
        .bind(video_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()))?;

        let owner = row
            .get::<Option<Uuid>, _>("owner_id")
            .map(|id| VideoOwnerRef {
                id,
                username: row.get("owner_username"),
            });

        Ok(VideoDetail {
            id: row.get("id"),
            video_file_url: row.get("video_file_url"),
            thumbnail_url: row.get("thumbnail_url"),
            title: row.get("title"),
            description: row.get("description"),
            duration: row.get("duration"),
            view_count: row.get("view_count"),
            is_published: row.get("is_published"),
            owner,
            like_count: row.get("like_count"),
        })
    }

    /// Record a view: bump the counter and append to the viewer's history
    pub async fn record_view(&self, video_id: Uuid, viewer_id: Uuid) -> Result<()> {
        let updated = sqlx::query("UPDATE videos SET view_count = view_count + 1 WHERE id = $1")
            .bind(video_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AppError::NotFound("Video not found".into()));
        }

        sqlx::query("INSERT INTO watch_history (user_id, video_id) VALUES ($1, $2)")
            .bind(viewer_id)
            .bind(video_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update(
        &self,
        video_id: Uuid,
        actor_id: Uuid,
        input: UpdateVideoInput,
    ) -> Result<Video> {
        self.ensure_owner(video_id, actor_id).await?;

        let video = sqlx::query_as::<_, Video>(&format!(
            r#"
            UPDATE videos
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                thumbnail_url = COALESCE($3, thumbnail_url),
                updated_at = NOW()
            WHERE id = $4
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(input.title.as_deref())
        .bind(input.description.as_deref())
        .bind(input.thumbnail_url.as_deref())
        .bind(video_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    pub async fn toggle_publish_status(&self, video_id: Uuid, actor_id: Uuid) -> Result<Video> {
        self.ensure_owner(video_id, actor_id).await?;

        let video = sqlx::query_as::<_, Video>(&format!(
            r#"
            UPDATE videos
            SET is_published = NOT is_published, updated_at = NOW()
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        ))
        .bind(video_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    /// Delete a video and everything hanging off it. Likes are not covered
    /// by foreign keys (polymorphic target), so they are removed explicitly;
    /// comments, playlist entries and history rows cascade.
    pub async fn delete(&self, video_id: Uuid, actor_id: Uuid) -> Result<()> {
        self.ensure_owner(video_id, actor_id).await?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM likes
            WHERE target_kind = 'comment'
              AND target_id IN (SELECT id FROM comments WHERE video_id = $1)
            "#,
        )
        .bind(video_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM likes WHERE target_kind = 'video' AND target_id = $1")
            .bind(video_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(video_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Published videos of a channel, newest first
    pub async fn list_channel_videos(&self, channel_id: Uuid) -> Result<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(&format!(
            r#"
            SELECT {VIDEO_COLUMNS}
            FROM videos
            WHERE owner_id = $1 AND is_published
            ORDER BY created_at DESC
            "#
        ))
        .bind(channel_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn ensure_owner(&self, video_id: Uuid, actor_id: Uuid) -> Result<()> {
        let owner_id: Uuid = sqlx::query_scalar("SELECT owner_id FROM videos WHERE id = $1")
            .bind(video_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Video not found".into()))?;

        if owner_id != actor_id {
            return Err(AppError::Forbidden(
                "only the owner can modify this video".into(),
            ));
        }

        Ok(())
    }
}
