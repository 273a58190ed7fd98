/// Subscription toggles and subscriber/subscribed-to listings
use crate::error::{AppError, Result};
use crate::models::{OwnerSummary, ToggleOutcome};
use crate::repository::SubscriptionRepository;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SubscriptionService {
    pool: PgPool,
    subscriptions: SubscriptionRepository,
}

impl SubscriptionService {
    pub fn new(pool: PgPool) -> Self {
        let subscriptions = SubscriptionRepository::new(pool.clone());
        Self {
            pool,
            subscriptions,
        }
    }

    /// Flip the (subscriber, channel) edge. Subscribing to one's own channel
    /// is rejected.
    pub async fn toggle(&self, subscriber_id: Uuid, channel_id: Uuid) -> Result<ToggleOutcome> {
        if subscriber_id == channel_id {
            return Err(AppError::Validation(
                "cannot subscribe to your own channel".into(),
            ));
        }

        self.ensure_channel_exists(channel_id).await?;

        let created = self.subscriptions.toggle(subscriber_id, channel_id).await?;
        Ok(ToggleOutcome { created })
    }

    /// Users subscribed to the channel. Empty is a valid answer.
    pub async fn channel_subscribers(&self, channel_id: Uuid) -> Result<Vec<OwnerSummary>> {
        self.ensure_channel_exists(channel_id).await?;

        Ok(self.subscriptions.subscribers_of(channel_id).await?)
    }

    /// Channels the user is subscribed to
    pub async fn subscribed_channels(&self, subscriber_id: Uuid) -> Result<Vec<OwnerSummary>> {
        Ok(self.subscriptions.channels_of(subscriber_id).await?)
    }

    async fn ensure_channel_exists(&self, channel_id: Uuid) -> Result<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(channel_id)
            .fetch_one(&self.pool)
            .await?;

        if !exists {
            return Err(AppError::NotFound("Channel not found".into()));
        }

        Ok(())
    }
}
