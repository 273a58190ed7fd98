mod likes;
mod subscriptions;

pub use likes::LikeRepository;
pub use subscriptions::SubscriptionRepository;
