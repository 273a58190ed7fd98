//! Toggle engine suites: like and subscription state flips.
//!
//! Run: TEST_DATABASE_URL=postgres://... cargo test --test toggles

mod common;

use clipstream::error::AppError;
use clipstream::services::{LikeService, SubscriptionService, UserService};
use common::*;
use uuid::Uuid;

#[tokio::test]
async fn double_toggle_like_is_idempotent() {
    let Some(pool) = test_pool().await else { return };

    let owner = create_user(&pool, &unique("owner")).await;
    let liker = create_user(&pool, &unique("liker")).await;
    let video = create_video(&pool, owner, "toggled", 0).await;

    let service = LikeService::new(pool.clone());

    assert!(service.toggle_video_like(liker, video).await.unwrap().created);
    assert!(!service.toggle_video_like(liker, video).await.unwrap().created);
    assert!(service.toggle_video_like(liker, video).await.unwrap().created);
}

#[tokio::test]
async fn comment_and_tweet_likes_toggle_independently() {
    let Some(pool) = test_pool().await else { return };

    let owner = create_user(&pool, &unique("owner")).await;
    let liker = create_user(&pool, &unique("liker")).await;
    let video = create_video(&pool, owner, "v", 0).await;
    let comment = create_comment(&pool, video, owner).await;
    let tweet = create_tweet(&pool, owner).await;

    let service = LikeService::new(pool.clone());

    assert!(service.toggle_comment_like(liker, comment).await.unwrap().created);
    assert!(service.toggle_tweet_like(liker, tweet).await.unwrap().created);
    // flipping one relation leaves the other alone
    assert!(!service.toggle_comment_like(liker, comment).await.unwrap().created);
    assert!(!service.toggle_tweet_like(liker, tweet).await.unwrap().created);
}

#[tokio::test]
async fn toggling_like_on_missing_target_is_not_found() {
    let Some(pool) = test_pool().await else { return };

    let liker = create_user(&pool, &unique("liker")).await;

    let service = LikeService::new(pool.clone());
    let err = service
        .toggle_video_like(liker, Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn concurrent_toggles_never_duplicate_the_relation_row() {
    let Some(pool) = test_pool().await else { return };

    let owner = create_user(&pool, &unique("owner")).await;
    let liker = create_user(&pool, &unique("liker")).await;
    let video = create_video(&pool, owner, "contended", 0).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            LikeService::new(pool).toggle_video_like(liker, video).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM likes WHERE user_id = $1 AND target_kind = 'video' AND target_id = $2",
    )
    .bind(liker)
    .bind(video)
    .fetch_one(&pool)
    .await
    .unwrap();

    assert!(rows <= 1, "unique index must cap the relation at one row, got {}", rows);
}

#[tokio::test]
async fn double_toggle_subscription_is_idempotent() {
    let Some(pool) = test_pool().await else { return };

    let subscriber = create_user(&pool, &unique("sub")).await;
    let channel = create_user(&pool, &unique("chan")).await;

    let service = SubscriptionService::new(pool.clone());

    assert!(service.toggle(subscriber, channel).await.unwrap().created);
    assert!(!service.toggle(subscriber, channel).await.unwrap().created);
    assert!(service.toggle(subscriber, channel).await.unwrap().created);
}

#[tokio::test]
async fn self_subscription_is_rejected() {
    let Some(pool) = test_pool().await else { return };

    let user = create_user(&pool, &unique("narcissist")).await;

    let service = SubscriptionService::new(pool.clone());
    let err = service.toggle(user, user).await.unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn subscribing_to_missing_channel_is_not_found() {
    let Some(pool) = test_pool().await else { return };

    let subscriber = create_user(&pool, &unique("sub")).await;

    let service = SubscriptionService::new(pool.clone());
    let err = service.toggle(subscriber, Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn subscription_toggle_is_visible_in_channel_profile() {
    let Some(pool) = test_pool().await else { return };

    // alice subscribes to bob's channel, then unsubscribes
    let alice = create_user(&pool, &unique("alice")).await;
    let bob_name = unique("bob");
    let bob = create_user(&pool, &bob_name).await;

    let subscriptions = SubscriptionService::new(pool.clone());
    let users = UserService::new(pool.clone());

    assert!(subscriptions.toggle(alice, bob).await.unwrap().created);

    let profile = users
        .get_channel_profile(Some(alice), &bob_name)
        .await
        .unwrap();
    assert_eq!(profile.subscribers_count, 1);
    assert!(profile.is_subscribed);

    assert!(!subscriptions.toggle(alice, bob).await.unwrap().created);

    let profile = users
        .get_channel_profile(Some(alice), &bob_name)
        .await
        .unwrap();
    assert_eq!(profile.subscribers_count, 0);
    assert!(!profile.is_subscribed);
}

#[tokio::test]
async fn liked_videos_lists_only_video_likes() {
    let Some(pool) = test_pool().await else { return };

    let owner = create_user(&pool, &unique("owner")).await;
    let liker = create_user(&pool, &unique("liker")).await;
    let video = create_video(&pool, owner, "fav", 0).await;
    let comment = create_comment(&pool, video, owner).await;

    like_target(&pool, liker, "video", video).await;
    like_target(&pool, liker, "comment", comment).await;

    let service = LikeService::new(pool.clone());
    let videos = service.liked_videos(liker).await.unwrap();

    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].id, video);
}

#[tokio::test]
async fn liked_videos_of_fresh_user_is_empty() {
    let Some(pool) = test_pool().await else { return };

    let user = create_user(&pool, &unique("fresh")).await;

    let service = LikeService::new(pool.clone());
    assert!(service.liked_videos(user).await.unwrap().is_empty());
}
