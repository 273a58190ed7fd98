/// User handlers - registration, sessions, account updates and the
/// user-rooted read models (channel profile, watch history)
use crate::error::Result;
use crate::middleware::AuthenticatedUser;
use crate::security::jwt::JwtKeys;
use crate::services::{AuthService, LoginInput, RegisterInput, UserService};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

pub async fn register(
    pool: web::Data<PgPool>,
    keys: web::Data<JwtKeys>,
    req: web::Json<RegisterInput>,
) -> Result<HttpResponse> {
    let service = AuthService::new((**pool).clone(), (**keys).clone());
    let user = service.register(req.into_inner()).await?;

    Ok(HttpResponse::Created().json(user))
}

pub async fn login(
    pool: web::Data<PgPool>,
    keys: web::Data<JwtKeys>,
    req: web::Json<LoginInput>,
) -> Result<HttpResponse> {
    let service = AuthService::new((**pool).clone(), (**keys).clone());
    let (user, tokens) = service.login(req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "user": user,
        "tokens": tokens,
    })))
}

#[derive(Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

pub async fn refresh_token(
    pool: web::Data<PgPool>,
    keys: web::Data<JwtKeys>,
    req: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse> {
    let service = AuthService::new((**pool).clone(), (**keys).clone());
    let tokens = service.refresh(&req.refresh_token).await?;

    Ok(HttpResponse::Ok().json(tokens))
}

pub async fn logout(
    pool: web::Data<PgPool>,
    keys: web::Data<JwtKeys>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let service = AuthService::new((**pool).clone(), (**keys).clone());
    service.logout(user.0).await?;

    Ok(HttpResponse::NoContent().finish())
}

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

pub async fn change_password(
    pool: web::Data<PgPool>,
    keys: web::Data<JwtKeys>,
    user: AuthenticatedUser,
    req: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    let service = AuthService::new((**pool).clone(), (**keys).clone());
    service
        .change_password(user.0, &req.old_password, &req.new_password)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub async fn current_user(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let current = service.get_by_id(user.0).await?;

    Ok(HttpResponse::Ok().json(current))
}

#[derive(Deserialize)]
pub struct UpdateAccountRequest {
    pub full_name: String,
    pub email: String,
}

pub async fn update_account(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<UpdateAccountRequest>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let updated = service
        .update_account(user.0, &req.full_name, &req.email)
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

#[derive(Deserialize)]
pub struct UpdateImageRequest {
    pub url: String,
}

pub async fn update_avatar(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<UpdateImageRequest>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let updated = service.update_avatar(user.0, &req.url).await?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn update_cover_image(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<UpdateImageRequest>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let updated = service.update_cover_image(user.0, &req.url).await?;

    Ok(HttpResponse::Ok().json(updated))
}

pub async fn channel_profile(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    username: web::Path<String>,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let profile = service
        .get_channel_profile(Some(user.0), &username)
        .await?;

    Ok(HttpResponse::Ok().json(profile))
}

pub async fn watch_history(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<HttpResponse> {
    let service = UserService::new((**pool).clone());
    let history = service.get_watch_history(user.0).await?;

    Ok(HttpResponse::Ok().json(history))
}
