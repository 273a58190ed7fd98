/// Comment handlers
use super::parse_id;
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Deserialize)]
pub struct CommentBody {
    pub content: String,
}

pub async fn add_comment(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    video_id: web::Path<String>,
    req: web::Json<CommentBody>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;

    let service = CommentService::new((**pool).clone());
    let comment = service.add(video_id, user.0, &req.content).await?;

    Ok(HttpResponse::Created().json(comment))
}

pub async fn video_comments(
    pool: web::Data<PgPool>,
    video_id: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_id(&video_id, "video")?;

    let service = CommentService::new((**pool).clone());
    let comments = service.list_by_video(video_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

pub async fn user_comments(
    pool: web::Data<PgPool>,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = parse_id(&user_id, "user")?;

    let service = CommentService::new((**pool).clone());
    let comments = service.list_by_user(user_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

pub async fn update_comment(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    comment_id: web::Path<String>,
    req: web::Json<CommentBody>,
) -> Result<HttpResponse> {
    let comment_id = parse_id(&comment_id, "comment")?;

    let service = CommentService::new((**pool).clone());
    let comment = service.update(comment_id, user.0, &req.content).await?;

    Ok(HttpResponse::Ok().json(comment))
}

pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    comment_id: web::Path<String>,
) -> Result<HttpResponse> {
    let comment_id = parse_id(&comment_id, "comment")?;

    let service = CommentService::new((**pool).clone());
    service.delete(comment_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}
