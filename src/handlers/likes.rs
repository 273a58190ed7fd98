/// Like toggle handlers
use super::parse_id;
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::LikeService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub async fn toggle_video_like(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;

    let service = LikeService::new((**pool).clone());
    let outcome = service.toggle_video_like(user.0, video_id).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

pub async fn toggle_comment_like(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    comment_id: web::Path<String>,
) -> Result<HttpResponse> {
    let comment_id = parse_id(&comment_id, "comment")?;

    let service = LikeService::new((**pool).clone());
    let outcome = service.toggle_comment_like(user.0, comment_id).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

pub async fn toggle_tweet_like(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    tweet_id: web::Path<String>,
) -> Result<HttpResponse> {
    let tweet_id = parse_id(&tweet_id, "tweet")?;

    let service = LikeService::new((**pool).clone());
    let outcome = service.toggle_tweet_like(user.0, tweet_id).await?;

    Ok(HttpResponse::Ok().json(outcome))
}

pub async fn liked_videos(
    pool: web::Data<PgPool>,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = parse_id(&user_id, "user")?;

    let service = LikeService::new((**pool).clone());
    let videos = service.liked_videos(user_id).await?;

    Ok(HttpResponse::Ok().json(videos))
}
