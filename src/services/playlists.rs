/// Playlist curation. The playlist_videos primary key keeps a video from
/// appearing in the same playlist twice.
use crate::error::{AppError, Result};
use crate::models::{Playlist, PlaylistWithVideos, Video};
use sqlx::PgPool;
use uuid::Uuid;

const PLAYLIST_COLUMNS: &str = "id, owner_id, name, description, created_at, updated_at";

pub struct PlaylistService {
    pool: PgPool,
}

impl PlaylistService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Playlist> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("playlist name cannot be empty".into()));
        }

        let playlist = sqlx::query_as::<_, Playlist>(&format!(
            r#"
            INSERT INTO playlists (owner_id, name, description)
            VALUES ($1, $2, $3)
            RETURNING {PLAYLIST_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(name.trim())
        .bind(description.unwrap_or(""))
        .fetch_one(&self.pool)
        .await?;

        Ok(playlist)
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Playlist>> {
        let playlists = sqlx::query_as::<_, Playlist>(&format!(
            r#"
            SELECT {PLAYLIST_COLUMNS}
            FROM playlists
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(playlists)
    }

    /// Playlist with its videos in insertion order
    pub async fn get(&self, playlist_id: Uuid) -> Result<PlaylistWithVideos> {
        let playlist = self.find_playlist(playlist_id).await?;
        let videos = self.playlist_videos(playlist_id).await?;

        Ok(PlaylistWithVideos { playlist, videos })
    }

    pub async fn update(
        &self,
        playlist_id: Uuid,
        actor_id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Playlist> {
        if name.is_none() && description.is_none() {
            return Err(AppError::Validation(
                "provide a name or description to update".into(),
            ));
        }

        self.ensure_owner(playlist_id, actor_id).await?;

        let playlist = sqlx::query_as::<_, Playlist>(&format!(
            r#"
            UPDATE playlists
            SET name = COALESCE($1, name),
                description = COALESCE($2, description),
                updated_at = NOW()
            WHERE id = $3
            RETURNING {PLAYLIST_COLUMNS}
            "#
        ))
        .bind(name)
        .bind(description)
        .bind(playlist_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(playlist)
    }

    pub async fn delete(&self, playlist_id: Uuid, actor_id: Uuid) -> Result<()> {
        self.ensure_owner(playlist_id, actor_id).await?;

        sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(playlist_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Add a video to the playlist. Adding the same video twice is a
    /// Conflict.
    pub async fn add_video(
        &self,
        playlist_id: Uuid,
        video_id: Uuid,
        actor_id: Uuid,
    ) -> Result<PlaylistWithVideos> {
        self.ensure_owner(playlist_id, actor_id).await?;

        let video_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1)")
                .bind(video_id)
                .fetch_one(&self.pool)
                .await?;

        if !video_exists {
            return Err(AppError::NotFound("Video not found".into()));
        }

        let inserted = sqlx::query(
            r#"
            INSERT INTO playlist_videos (playlist_id, video_id)
            VALUES ($1, $2)
            ON CONFLICT (playlist_id, video_id) DO NOTHING
            "#,
        )
        .bind(playlist_id)
        .bind(video_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted == 0 {
            return Err(AppError::Conflict(
                "video is already in the playlist".into(),
            ));
        }

        self.get(playlist_id).await
    }

    pub async fn remove_video(
        &self,
        playlist_id: Uuid,
        video_id: Uuid,
        actor_id: Uuid,
    ) -> Result<PlaylistWithVideos> {
        self.ensure_owner(playlist_id, actor_id).await?;

        let removed = sqlx::query(
            "DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2",
        )
        .bind(playlist_id)
        .bind(video_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if removed == 0 {
            return Err(AppError::NotFound("video is not in the playlist".into()));
        }

        self.get(playlist_id).await
    }

    async fn find_playlist(&self, playlist_id: Uuid) -> Result<Playlist> {
        sqlx::query_as::<_, Playlist>(&format!(
            "SELECT {PLAYLIST_COLUMNS} FROM playlists WHERE id = $1"
        ))
        .bind(playlist_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Playlist not found".into()))
    }

    async fn playlist_videos(&self, playlist_id: Uuid) -> Result<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT v.id, v.owner_id, v.video_file_url, v.thumbnail_url, v.title,
                   v.description, v.duration, v.view_count, v.is_published,
                   v.created_at, v.updated_at
            FROM playlist_videos pv
            JOIN videos v ON v.id = pv.video_id
            WHERE pv.playlist_id = $1
            ORDER BY pv.position
            "#,
        )
        .bind(playlist_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn ensure_owner(&self, playlist_id: Uuid, actor_id: Uuid) -> Result<()> {
        let playlist = self.find_playlist(playlist_id).await?;

        if playlist.owner_id != actor_id {
            return Err(AppError::Forbidden(
                "only the owner can modify this playlist".into(),
            ));
        }

        Ok(())
    }
}
