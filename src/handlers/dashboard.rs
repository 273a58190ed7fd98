/// Channel stats dashboard handler
use super::parse_id;
use crate::error::Result;
use crate::services::StatsService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

pub async fn channel_stats(
    pool: web::Data<PgPool>,
    channel_id: web::Path<String>,
) -> Result<HttpResponse> {
    let channel_id = parse_id(&channel_id, "channel")?;

    let service = StatsService::new((**pool).clone());
    let stats = service.get_channel_stats(channel_id).await?;

    Ok(HttpResponse::Ok().json(stats))
}
