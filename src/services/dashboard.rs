/// Per-channel rollups for the stats dashboard.
///
/// The four aggregates take different join paths, so they are computed as
/// independent queries and merged. Each is individually consistent; the
/// result is not a transactional snapshot.
use crate::error::Result;
use crate::models::ChannelStats;
use sqlx::PgPool;
use uuid::Uuid;

pub struct StatsService {
    pool: PgPool,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_channel_stats(&self, channel_id: Uuid) -> Result<ChannelStats> {
        let total_views: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(view_count), 0)::BIGINT FROM videos WHERE owner_id = $1",
        )
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await?;

        let total_subscribers: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1")
                .bind(channel_id)
                .fetch_one(&self.pool)
                .await?;

        let total_videos: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE owner_id = $1")
                .bind(channel_id)
                .fetch_one(&self.pool)
                .await?;

        // Likes carry no owner themselves; join through the liked video
        let total_likes: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM likes l
            JOIN videos v ON v.id = l.target_id
            WHERE l.target_kind = 'video' AND v.owner_id = $1
            "#,
        )
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ChannelStats {
            total_views,
            total_subscribers,
            total_videos,
            total_likes,
        })
    }
}
