use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account entity. Also acts as a channel: videos, subscribers and playlists
/// hang off a user id.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Video entity - file and thumbnail URLs are resolved by an external upload
/// step before they reach this service.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub video_file_url: String,
    pub thumbnail_url: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub view_count: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Short text post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tweet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment on a video
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub video_id: Uuid,
    pub owner_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Subscription entity - directed edge from subscriber to channel
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub channel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// The single target of a like. Exactly one of video/comment/tweet, enforced
/// by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    /// Discriminant as stored in the likes.target_kind column
    pub fn kind(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "video",
            LikeTarget::Comment(_) => "comment",
            LikeTarget::Tweet(_) => "tweet",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            LikeTarget::Video(id) | LikeTarget::Comment(id) | LikeTarget::Tweet(id) => *id,
        }
    }
}

/// Like relation row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target: LikeTarget,
    pub created_at: DateTime<Utc>,
}

/// Playlist entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Playlist {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Playlist with its videos in insertion order
#[derive(Debug, Clone, Serialize)]
pub struct PlaylistWithVideos {
    pub playlist: Playlist,
    pub videos: Vec<Video>,
}

// ============================================================================
// Read-model projections
// ============================================================================

/// Channel profile as seen by a viewer
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ChannelProfile {
    pub full_name: String,
    pub username: String,
    pub subscribers_count: i64,
    pub channels_subscribed_to_count: i64,
    pub is_subscribed: bool,
    pub avatar_url: String,
    pub cover_image_url: Option<String>,
    pub email: String,
}

/// Owner fields exposed on joined views
#[derive(Debug, Clone, Serialize)]
pub struct OwnerSummary {
    pub full_name: String,
    pub username: String,
    pub avatar_url: String,
}

/// Watch-history entry: a video annotated with its owner. The owner join can
/// come back empty, hence the Option.
#[derive(Debug, Clone, Serialize)]
pub struct VideoWithOwner {
    pub id: Uuid,
    pub video_file_url: String,
    pub thumbnail_url: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub view_count: i64,
    pub is_published: bool,
    pub owner: Option<OwnerSummary>,
}

/// Owner reference on a video detail view
#[derive(Debug, Clone, Serialize)]
pub struct VideoOwnerRef {
    pub id: Uuid,
    pub username: String,
}

/// Per-video detail with like count
#[derive(Debug, Clone, Serialize)]
pub struct VideoDetail {
    pub id: Uuid,
    pub video_file_url: String,
    pub thumbnail_url: String,
    pub title: String,
    pub description: String,
    pub duration: f64,
    pub view_count: i64,
    pub is_published: bool,
    pub owner: Option<VideoOwnerRef>,
    pub like_count: i64,
}

/// Per-channel rollups. Zero-data channels yield zeros, never nulls.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChannelStats {
    pub total_views: i64,
    pub total_subscribers: i64,
    pub total_videos: i64,
    pub total_likes: i64,
}

/// Result of a toggle: true when the relation row was created by this call
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleOutcome {
    pub created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_target_kind_and_id() {
        let id = Uuid::new_v4();

        assert_eq!(LikeTarget::Video(id).kind(), "video");
        assert_eq!(LikeTarget::Comment(id).kind(), "comment");
        assert_eq!(LikeTarget::Tweet(id).kind(), "tweet");
        assert_eq!(LikeTarget::Tweet(id).id(), id);
    }

    #[test]
    fn test_user_serialization_hides_credentials() {
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".into(),
            email: "alice@example.com".into(),
            full_name: "Alice".into(),
            avatar_url: "https://cdn.example.com/a.png".into(),
            cover_image_url: None,
            password_hash: "secret-hash".into(),
            refresh_token: Some("secret-token".into()),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("secret-token"));
        assert!(json.contains("alice@example.com"));
    }
}
