mod auth;
mod comments;
mod dashboard;
mod likes;
mod playlists;
mod subscriptions;
mod tweets;
mod users;
mod videos;

pub use auth::{AuthService, LoginInput, RegisterInput};
pub use comments::CommentService;
pub use dashboard::StatsService;
pub use likes::LikeService;
pub use playlists::PlaylistService;
pub use subscriptions::SubscriptionService;
pub use tweets::TweetService;
pub use users::UserService;
pub use videos::{PublishVideoInput, UpdateVideoInput, VideoService};
