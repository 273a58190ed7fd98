/// Video handlers
use super::parse_id;
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::{PublishVideoInput, UpdateVideoInput, VideoService};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub async fn publish(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<PublishVideoInput>,
) -> Result<HttpResponse> {
    let service = VideoService::new((**pool).clone());
    let video = service.publish(user.0, req.into_inner()).await?;

    Ok(HttpResponse::Created().json(video))
}

/// Fetch a video's detail view. Fetching counts as a view: the counter is
/// bumped and the video lands in the caller's watch history.
pub async fn get_video(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;

    let service = VideoService::new((**pool).clone());
    service.record_view(video_id, user.0).await?;
    let detail = service.get_detail(video_id).await?;

    Ok(HttpResponse::Ok().json(detail))
}

pub async fn update_video(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
    req: web::Json<UpdateVideoInput>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;

    let service = VideoService::new((**pool).clone());
    let video = service.update(video_id, user.0, req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(video))
}

pub async fn delete_video(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;

    let service = VideoService::new((**pool).clone());
    service.delete(video_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn toggle_publish(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;

    let service = VideoService::new((**pool).clone());
    let video = service.toggle_publish_status(video_id, user.0).await?;

    Ok(HttpResponse::Ok().json(video))
}

pub async fn channel_videos(
    pool: web::Data<PgPool>,
    channel_id: web::Path<String>,
) -> Result<HttpResponse> {
    let channel_id = parse_id(&channel_id, "channel")?;

    let service = VideoService::new((**pool).clone());
    let videos = service.list_channel_videos(channel_id).await?;

    Ok(HttpResponse::Ok().json(videos))
}
