pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod playlists;
pub mod subscriptions;
pub mod tweets;
pub mod users;
pub mod videos;

use crate::error::AppError;
use crate::middleware::JwtAuth;
use actix_web::web;
use uuid::Uuid;

/// Parse a path segment into an entity id. A malformed id is a caller error,
/// distinct from a well-formed id that matches nothing.
pub(crate) fn parse_id(raw: &str, what: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::InvalidReference(format!("Invalid {} id", what)))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(
                web::scope("/users")
                    .route("/register", web::post().to(users::register))
                    .route("/login", web::post().to(users::login))
                    .route("/refresh-token", web::post().to(users::refresh_token))
                    .service(
                        web::scope("")
                            .wrap(JwtAuth)
                            .route("/logout", web::post().to(users::logout))
                            .route("/change-password", web::post().to(users::change_password))
                            .route("/current-user", web::get().to(users::current_user))
                            .route("/update-account", web::patch().to(users::update_account))
                            .route("/avatar", web::patch().to(users::update_avatar))
                            .route("/cover-image", web::patch().to(users::update_cover_image))
                            .route("/c/{username}", web::get().to(users::channel_profile))
                            .route("/history", web::get().to(users::watch_history)),
                    ),
            )
            .service(
                web::scope("/videos")
                    .wrap(JwtAuth)
                    .route("", web::post().to(videos::publish))
                    .route("/channel/{channel_id}", web::get().to(videos::channel_videos))
                    .route(
                        "/toggle/publish/{video_id}",
                        web::patch().to(videos::toggle_publish),
                    )
                    .route("/{video_id}", web::get().to(videos::get_video))
                    .route("/{video_id}", web::patch().to(videos::update_video))
                    .route("/{video_id}", web::delete().to(videos::delete_video)),
            )
            .service(
                web::scope("/comments")
                    .wrap(JwtAuth)
                    .route("/user/{user_id}", web::get().to(comments::user_comments))
                    .route("/c/{comment_id}", web::patch().to(comments::update_comment))
                    .route("/c/{comment_id}", web::delete().to(comments::delete_comment))
                    .route("/{video_id}", web::post().to(comments::add_comment))
                    .route("/{video_id}", web::get().to(comments::video_comments)),
            )
            .service(
                web::scope("/tweets")
                    .wrap(JwtAuth)
                    .route("", web::post().to(tweets::create_tweet))
                    .route("/user/{user_id}", web::get().to(tweets::user_tweets))
                    .route("/{tweet_id}", web::patch().to(tweets::update_tweet))
                    .route("/{tweet_id}", web::delete().to(tweets::delete_tweet)),
            )
            .service(
                web::scope("/likes")
                    .wrap(JwtAuth)
                    .route("/toggle/v/{video_id}", web::post().to(likes::toggle_video_like))
                    .route(
                        "/toggle/c/{comment_id}",
                        web::post().to(likes::toggle_comment_like),
                    )
                    .route("/toggle/t/{tweet_id}", web::post().to(likes::toggle_tweet_like))
                    .route("/videos/{user_id}", web::get().to(likes::liked_videos)),
            )
            .service(
                web::scope("/subscriptions")
                    .wrap(JwtAuth)
                    .route(
                        "/c/{channel_id}",
                        web::post().to(subscriptions::toggle_subscription),
                    )
                    .route(
                        "/c/{channel_id}",
                        web::get().to(subscriptions::channel_subscribers),
                    )
                    .route(
                        "/u/{subscriber_id}",
                        web::get().to(subscriptions::subscribed_channels),
                    ),
            )
            .service(
                web::scope("/playlists")
                    .wrap(JwtAuth)
                    .route("", web::post().to(playlists::create_playlist))
                    .route("/user/{user_id}", web::get().to(playlists::user_playlists))
                    .route(
                        "/add/{video_id}/{playlist_id}",
                        web::patch().to(playlists::add_video),
                    )
                    .route(
                        "/remove/{video_id}/{playlist_id}",
                        web::patch().to(playlists::remove_video),
                    )
                    .route("/{playlist_id}", web::get().to(playlists::get_playlist))
                    .route("/{playlist_id}", web::patch().to(playlists::update_playlist))
                    .route("/{playlist_id}", web::delete().to(playlists::delete_playlist)),
            )
            .service(
                web::scope("/dashboard")
                    .wrap(JwtAuth)
                    .route("/stats/{channel_id}", web::get().to(dashboard::channel_stats)),
            ),
    );
}
