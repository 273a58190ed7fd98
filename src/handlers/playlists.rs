/// Playlist handlers
use super::parse_id;
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::services::PlaylistService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn create_playlist(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<CreatePlaylistRequest>,
) -> Result<HttpResponse> {
    let service = PlaylistService::new((**pool).clone());
    let playlist = service
        .create(user.0, &req.name, req.description.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(playlist))
}

pub async fn user_playlists(
    pool: web::Data<PgPool>,
    user_id: web::Path<String>,
) -> Result<HttpResponse> {
    let user_id = parse_id(&user_id, "user")?;

    let service = PlaylistService::new((**pool).clone());
    let playlists = service.list_by_owner(user_id).await?;

    Ok(HttpResponse::Ok().json(playlists))
}

pub async fn get_playlist(
    pool: web::Data<PgPool>,
    playlist_id: web::Path<String>,
) -> Result<HttpResponse> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;

    let service = PlaylistService::new((**pool).clone());
    let playlist = service.get(playlist_id).await?;

    Ok(HttpResponse::Ok().json(playlist))
}

pub async fn update_playlist(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    playlist_id: web::Path<String>,
    req: web::Json<UpdatePlaylistRequest>,
) -> Result<HttpResponse> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;

    let service = PlaylistService::new((**pool).clone());
    let playlist = service
        .update(
            playlist_id,
            user.0,
            req.name.as_deref(),
            req.description.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(playlist))
}

pub async fn delete_playlist(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    playlist_id: web::Path<String>,
) -> Result<HttpResponse> {
    let playlist_id = parse_id(&playlist_id, "playlist")?;

    let service = PlaylistService::new((**pool).clone());
    service.delete(playlist_id, user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn add_video(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (video_id, playlist_id) = path.into_inner();
    let video_id = parse_id(&video_id, "video")?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;

    let service = PlaylistService::new((**pool).clone());
    let playlist = service.add_video(playlist_id, video_id, user.0).await?;

    Ok(HttpResponse::Ok().json(playlist))
}

pub async fn remove_video(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (video_id, playlist_id) = path.into_inner();
    let video_id = parse_id(&video_id, "video")?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;

    let service = PlaylistService::new((**pool).clone());
    let playlist = service.remove_video(playlist_id, video_id, user.0).await?;

    Ok(HttpResponse::Ok().json(playlist))
}
