/// Account reads/updates and the user-rooted joined views: channel profile
/// and watch history.
use crate::error::{AppError, Result};
use crate::models::{ChannelProfile, OwnerSummary, User, VideoWithOwner};
use sqlx::{PgPool, Row};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, username, email, full_name, avatar_url, cover_image_url, \
                            password_hash, refresh_token, created_at, updated_at";

pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, user_id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    /// Resolve a channel by username (case-insensitive) as seen by the given
    /// viewer. Subscriber counts come from the subscription edges in both
    /// directions; `is_subscribed` reports whether the viewer is one of the
    /// channel's subscribers.
    pub async fn get_channel_profile(
        &self,
        viewer_id: Option<Uuid>,
        username: &str,
    ) -> Result<ChannelProfile> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation("username is missing".into()));
        }

        sqlx::query_as::<_, ChannelProfile>(
            r#"
            SELECT u.full_name,
                   u.username,
                   (SELECT COUNT(*) FROM subscriptions s
                     WHERE s.channel_id = u.id) AS subscribers_count,
                   (SELECT COUNT(*) FROM subscriptions s
                     WHERE s.subscriber_id = u.id) AS channels_subscribed_to_count,
                   EXISTS(SELECT 1 FROM subscriptions s
                           WHERE s.channel_id = u.id
                             AND s.subscriber_id = $2) AS is_subscribed,
                   u.avatar_url,
                   u.cover_image_url,
                   u.email
            FROM users u
            WHERE u.username = LOWER($1)
            "#,
        )
        .bind(username)
        .bind(viewer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("channel does not exist".into()))
    }

    /// The user's watch history in stored order, each video annotated with
    /// its owner. The owner join is a left join: a video whose owner row is
    /// gone still appears, with `owner` collapsed to None.
    pub async fn get_watch_history(&self, user_id: Uuid) -> Result<Vec<VideoWithOwner>> {
        let rows = sqlx::query(
            r#"
            SELECT v.id, v.video_file_url, v.thumbnail_url, v.title, v.description,
                   v.duration, v.view_count, v.is_published,
                   o.full_name AS owner_full_name,
                   o.username AS owner_username,
                   o.avatar_url AS owner_avatar_url
            FROM watch_history wh
            JOIN videos v ON v.id = wh.video_id
            LEFT JOIN users o ON o.id = v.owner_id
            WHERE wh.user_id = $1
            ORDER BY wh.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let history = rows
            .into_iter()
            .map(|row| {
                let owner = row
                    .get::<Option<String>, _>("owner_username")
                    .map(|owner_username| OwnerSummary {
                        full_name: row.get("owner_full_name"),
                        username: owner_username,
                        avatar_url: row.get("owner_avatar_url"),
                    });

                VideoWithOwner {
                    id: row.get("id"),
                    video_file_url: row.get("video_file_url"),
                    thumbnail_url: row.get("thumbnail_url"),
                    title: row.get("title"),
                    description: row.get("description"),
                    duration: row.get("duration"),
                    view_count: row.get("view_count"),
                    is_published: row.get("is_published"),
                    owner,
                }
            })
            .collect();

        Ok(history)
    }

    pub async fn update_account(
        &self,
        user_id: Uuid,
        full_name: &str,
        email: &str,
    ) -> Result<User> {
        if full_name.trim().is_empty() || email.trim().is_empty() {
            return Err(AppError::Validation(
                "full_name and email are required".into(),
            ));
        }

        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET full_name = $1, email = LOWER($2), updated_at = NOW()
            WHERE id = $3
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(full_name.trim())
        .bind(email.trim())
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict("email already in use".into())
            }
            _ => AppError::from(e),
        })?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn update_avatar(&self, user_id: Uuid, avatar_url: &str) -> Result<User> {
        if avatar_url.trim().is_empty() {
            return Err(AppError::Validation("avatar_url is required".into()));
        }

        self.update_image_column(user_id, "avatar_url", avatar_url)
            .await
    }

    pub async fn update_cover_image(&self, user_id: Uuid, cover_image_url: &str) -> Result<User> {
        if cover_image_url.trim().is_empty() {
            return Err(AppError::Validation("cover_image_url is required".into()));
        }

        self.update_image_column(user_id, "cover_image_url", cover_image_url)
            .await
    }

    async fn update_image_column(&self, user_id: Uuid, column: &str, url: &str) -> Result<User> {
        // column is one of two fixed names, never caller input
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET {column} = $1, updated_at = NOW() WHERE id = $2 RETURNING {USER_COLUMNS}"
        ))
        .bind(url)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))
    }
}
