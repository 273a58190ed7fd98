use crate::models::OwnerSummary;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// Repository for subscription relation rows
#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Flip the subscription state for (subscriber, channel). Returns true
    /// when this call created the row. Safe under concurrent toggles thanks
    /// to the unique (subscriber_id, channel_id) index.
    pub async fn toggle(&self, subscriber_id: Uuid, channel_id: Uuid) -> Result<bool, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO subscriptions (id, subscriber_id, channel_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (subscriber_id, channel_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(subscriber_id)
        .bind(channel_id)
        .fetch_optional(&self.pool)
        .await?;

        if inserted.is_some() {
            return Ok(true);
        }

        sqlx::query(
            r#"
            DELETE FROM subscriptions
            WHERE subscriber_id = $1 AND channel_id = $2
            "#,
        )
        .bind(subscriber_id)
        .bind(channel_id)
        .execute(&self.pool)
        .await?;

        Ok(false)
    }

    /// Count of subscribers of a channel
    pub async fn count_subscribers(&self, channel_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1")
            .bind(channel_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Users subscribed to the channel, as owner summaries
    pub async fn subscribers_of(&self, channel_id: Uuid) -> Result<Vec<OwnerSummary>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT u.full_name, u.username, u.avatar_url
            FROM subscriptions s
            JOIN users u ON u.id = s.subscriber_id
            WHERE s.channel_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(channel_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OwnerSummary {
                full_name: row.get("full_name"),
                username: row.get("username"),
                avatar_url: row.get("avatar_url"),
            })
            .collect())
    }

    /// Channels the user is subscribed to, as owner summaries
    pub async fn channels_of(&self, subscriber_id: Uuid) -> Result<Vec<OwnerSummary>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT u.full_name, u.username, u.avatar_url
            FROM subscriptions s
            JOIN users u ON u.id = s.channel_id
            WHERE s.subscriber_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(subscriber_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| OwnerSummary {
                full_name: row.get("full_name"),
                username: row.get("username"),
                avatar_url: row.get("avatar_url"),
            })
            .collect())
    }
}
