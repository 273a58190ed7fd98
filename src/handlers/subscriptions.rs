/// Subscription handlers
use super::parse_id;
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::SubscriptionService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub async fn toggle_subscription(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    channel_id: web::Path<String>,
) -> Result<HttpResponse> {
    let channel_id = parse_id(&channel_id, "channel")?;

    let service = SubscriptionService::new((**pool).clone());
    let outcome = service.toggle(user.0, channel_id).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

pub async fn channel_subscribers(
    pool: web::Data<PgPool>,
    channel_id: web::Path<String>,
) -> Result<HttpResponse> {
    let channel_id = parse_id(&channel_id, "channel")?;

    let service = SubscriptionService::new((**pool).clone());
    let subscribers = service.channel_subscribers(channel_id).await?;

    Ok(HttpResponse::Ok().json(subscribers))
}

pub async fn subscribed_channels(
    pool: web::Data<PgPool>,
    subscriber_id: web::Path<String>,
) -> Result<HttpResponse> {
    let subscriber_id = parse_id(&subscriber_id, "subscriber")?;

    let service = SubscriptionService::new((**pool).clone());
    let channels = service.subscribed_channels(subscriber_id).await?;

    Ok(HttpResponse::Ok().json(channels))
}
