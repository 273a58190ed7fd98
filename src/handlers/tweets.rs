/// Tweet handlers
use super::parse_id;
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::TweetService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Deserialize)]
pub struct TweetBody {
    pub content: String,
}

pub async fn create_tweet(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<TweetBody>,
) -> Result<HttpResponse> {
    let service = TweetService::new((**pool).clone());
    let tweet = service.create(user.0, &req.content).await?;

    Ok(HttpResponse::Created().json(tweet))
}

pub async fn user_tweets(
    pool: web::Data<PgPool>,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = parse_id(&user_id, "user")?;

    let service = TweetService::new((**pool).clone());
    let tweets = service.list_by_user(user_id).await?;

    Ok(HttpResponse::Ok().json(tweets))
}

pub async fn update_tweet(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    tweet_id: web::Path<String>,
    req: web::Json<TweetBody>,
) -> Result<HttpResponse> {
    let tweet_id = parse_id(&tweet_id, "tweet")?;

    let service = TweetService::new((**pool).clone());
    let tweet = service.update(tweet_id, user.0, &req.content).await?;

    Ok(HttpResponse::Ok().json(tweet))
}

pub async fn delete_tweet(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    tweet_id: web::Path<String>,
) -> Result<HttpResponse> {
    let tweet_id = parse_id(&tweet_id, "tweet")?;

    let service = TweetService::new((**pool).clone());
    service.delete(tweet_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}
