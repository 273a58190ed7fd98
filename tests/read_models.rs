//! Read-model suites: channel profile, watch history, video detail and
//! channel stats.
//!
//! Run: TEST_DATABASE_URL=postgres://... cargo test --test read_models

mod common;

use clipstream::error::AppError;
use clipstream::services::{StatsService, UserService, VideoService};
use common::*;

#[tokio::test]
async fn channel_profile_with_no_subscribers_is_all_zeros() {
    let Some(pool) = test_pool().await else { return };

    let username = unique("loner");
    let channel = create_user(&pool, &username).await;
    let viewer = create_user(&pool, &unique("viewer")).await;

    let service = UserService::new(pool.clone());
    let profile = service
        .get_channel_profile(Some(viewer), &username)
        .await
        .unwrap();

    assert_eq!(profile.username, username);
    assert_eq!(profile.subscribers_count, 0);
    assert_eq!(profile.channels_subscribed_to_count, 0);
    assert!(!profile.is_subscribed);

    // a channel is never its own subscriber either
    let own_view = service
        .get_channel_profile(Some(channel), &username)
        .await
        .unwrap();
    assert!(!own_view.is_subscribed);
}

#[tokio::test]
async fn channel_profile_username_match_is_case_insensitive() {
    let Some(pool) = test_pool().await else { return };

    let username = unique("mixedcase");
    create_user(&pool, &username).await;

    let service = UserService::new(pool.clone());
    let profile = service
        .get_channel_profile(None, &username.to_uppercase())
        .await
        .unwrap();

    assert_eq!(profile.username, username);
}

#[tokio::test]
async fn channel_profile_counts_both_edge_directions() {
    let Some(pool) = test_pool().await else { return };

    let username = unique("hub");
    let hub = create_user(&pool, &username).await;
    let fan_a = create_user(&pool, &unique("fana")).await;
    let fan_b = create_user(&pool, &unique("fanb")).await;
    let idol = create_user(&pool, &unique("idol")).await;

    subscribe(&pool, fan_a, hub).await;
    subscribe(&pool, fan_b, hub).await;
    subscribe(&pool, hub, idol).await;

    let service = UserService::new(pool.clone());

    let seen_by_fan = service
        .get_channel_profile(Some(fan_a), &username)
        .await
        .unwrap();
    assert_eq!(seen_by_fan.subscribers_count, 2);
    assert_eq!(seen_by_fan.channels_subscribed_to_count, 1);
    assert!(seen_by_fan.is_subscribed);

    let seen_by_idol = service
        .get_channel_profile(Some(idol), &username)
        .await
        .unwrap();
    assert!(!seen_by_idol.is_subscribed);
}

#[tokio::test]
async fn unknown_channel_is_not_found() {
    let Some(pool) = test_pool().await else { return };

    let service = UserService::new(pool.clone());
    let err = service
        .get_channel_profile(None, &unique("missing"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn watch_history_preserves_stored_order() {
    let Some(pool) = test_pool().await else { return };

    let owner = create_user(&pool, &unique("creator")).await;
    let watcher = create_user(&pool, &unique("watcher")).await;

    let v1 = create_video(&pool, owner, "first", 0).await;
    let v2 = create_video(&pool, owner, "second", 0).await;
    let v3 = create_video(&pool, owner, "third", 0).await;

    // watched in the order V3, V1, V2
    append_watch(&pool, watcher, v3).await;
    append_watch(&pool, watcher, v1).await;
    append_watch(&pool, watcher, v2).await;

    let service = UserService::new(pool.clone());
    let history = service.get_watch_history(watcher).await.unwrap();

    let ids: Vec<_> = history.iter().map(|entry| entry.id).collect();
    assert_eq!(ids, vec![v3, v1, v2]);

    for entry in &history {
        let owner_summary = entry.owner.as_ref().expect("owner should be joined");
        assert!(owner_summary.username.starts_with("creator"));
        assert_eq!(owner_summary.avatar_url, "https://cdn.test/avatar.png");
    }
}

#[tokio::test]
async fn watch_history_of_fresh_user_is_empty() {
    let Some(pool) = test_pool().await else { return };

    let user = create_user(&pool, &unique("fresh")).await;

    let service = UserService::new(pool.clone());
    let history = service.get_watch_history(user).await.unwrap();

    assert!(history.is_empty());
}

#[tokio::test]
async fn video_detail_counts_only_likes_on_that_video() {
    let Some(pool) = test_pool().await else { return };

    let owner = create_user(&pool, &unique("owner")).await;
    let video = create_video(&pool, owner, "liked video", 7).await;
    let comment = create_comment(&pool, video, owner).await;

    let likers: Vec<_> = [
        create_user(&pool, &unique("l1")).await,
        create_user(&pool, &unique("l2")).await,
        create_user(&pool, &unique("l3")).await,
    ]
    .into();

    for liker in &likers {
        like_target(&pool, *liker, "video", video).await;
    }
    // unrelated likes on a comment must not count
    like_target(&pool, likers[0], "comment", comment).await;
    like_target(&pool, likers[1], "comment", comment).await;

    let service = VideoService::new(pool.clone());
    let detail = service.get_detail(video).await.unwrap();

    assert_eq!(detail.like_count, 3);
    assert_eq!(detail.view_count, 7);
    assert_eq!(detail.title, "liked video");

    let owner_ref = detail.owner.expect("owner should be joined");
    assert_eq!(owner_ref.id, owner);
}

#[tokio::test]
async fn video_detail_with_no_likes_is_zero() {
    let Some(pool) = test_pool().await else { return };

    let owner = create_user(&pool, &unique("quiet")).await;
    let video = create_video(&pool, owner, "unliked", 0).await;

    let service = VideoService::new(pool.clone());
    let detail = service.get_detail(video).await.unwrap();

    assert_eq!(detail.like_count, 0);
}

#[tokio::test]
async fn missing_video_detail_is_not_found() {
    let Some(pool) = test_pool().await else { return };

    let service = VideoService::new(pool.clone());
    let err = service.get_detail(uuid::Uuid::new_v4()).await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn channel_stats_for_empty_channel_are_zero() {
    let Some(pool) = test_pool().await else { return };

    let channel = create_user(&pool, &unique("empty")).await;

    let service = StatsService::new(pool.clone());
    let stats = service.get_channel_stats(channel).await.unwrap();

    assert_eq!(stats.total_views, 0);
    assert_eq!(stats.total_subscribers, 0);
    assert_eq!(stats.total_videos, 0);
    assert_eq!(stats.total_likes, 0);
}

#[tokio::test]
async fn channel_stats_aggregate_across_videos() {
    let Some(pool) = test_pool().await else { return };

    let channel = create_user(&pool, &unique("busy")).await;
    let other_channel = create_user(&pool, &unique("other")).await;

    let v1 = create_video(&pool, channel, "a", 100).await;
    let v2 = create_video(&pool, channel, "b", 250).await;
    let foreign = create_video(&pool, other_channel, "c", 999).await;

    let fans: Vec<_> = [
        create_user(&pool, &unique("f1")).await,
        create_user(&pool, &unique("f2")).await,
        create_user(&pool, &unique("f3")).await,
    ]
    .into();

    for fan in &fans {
        subscribe(&pool, *fan, channel).await;
    }

    like_target(&pool, fans[0], "video", v1).await;
    like_target(&pool, fans[1], "video", v1).await;
    like_target(&pool, fans[2], "video", v2).await;
    // a like on someone else's video must not count for this channel
    like_target(&pool, fans[0], "video", foreign).await;

    let service = StatsService::new(pool.clone());
    let stats = service.get_channel_stats(channel).await.unwrap();

    assert_eq!(stats.total_views, 350);
    assert_eq!(stats.total_subscribers, 3);
    assert_eq!(stats.total_videos, 2);
    assert_eq!(stats.total_likes, 3);
}
