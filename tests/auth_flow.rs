//! Account and session suites: registration, login, refresh rotation.
//!
//! Run: TEST_DATABASE_URL=postgres://... cargo test --test auth_flow

mod common;

use clipstream::config::AuthConfig;
use clipstream::error::AppError;
use clipstream::security::jwt::JwtKeys;
use clipstream::services::{AuthService, LoginInput, RegisterInput};
use common::*;
use std::time::Duration;

fn test_keys() -> JwtKeys {
    JwtKeys::from_config(&AuthConfig {
        access_token_secret: "test-access-secret".into(),
        refresh_token_secret: "test-refresh-secret".into(),
        access_token_ttl_secs: 3600,
        refresh_token_ttl_secs: 86400,
    })
}

fn register_input(username: &str) -> RegisterInput {
    RegisterInput {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        full_name: format!("User {}", username),
        password: "hunter2hunter2".to_string(),
        avatar_url: "https://cdn.test/avatar.png".to_string(),
        cover_image_url: None,
    }
}

#[tokio::test]
async fn register_then_login_roundtrip() {
    let Some(pool) = test_pool().await else { return };

    let keys = test_keys();
    let service = AuthService::new(pool.clone(), keys.clone());

    let username = unique("alice");
    // mixed-case registration lands as lowercase
    let mut input = register_input(&username);
    input.username = input.username.to_uppercase();
    let user = service.register(input).await.unwrap();
    assert_eq!(user.username, username);

    let (logged_in, tokens) = service
        .login(LoginInput {
            username: Some(username.clone()),
            email: None,
            password: "hunter2hunter2".into(),
        })
        .await
        .unwrap();

    assert_eq!(logged_in.id, user.id);

    let claims = keys.verify_access(&tokens.access_token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.username, username);
}

#[tokio::test]
async fn login_by_email_also_works() {
    let Some(pool) = test_pool().await else { return };

    let service = AuthService::new(pool.clone(), test_keys());
    let username = unique("bob");
    service.register(register_input(&username)).await.unwrap();

    let (user, _) = service
        .login(LoginInput {
            username: None,
            email: Some(format!("{}@example.com", username)),
            password: "hunter2hunter2".into(),
        })
        .await
        .unwrap();

    assert_eq!(user.username, username);
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let Some(pool) = test_pool().await else { return };

    let service = AuthService::new(pool.clone(), test_keys());
    let username = unique("dup");

    service.register(register_input(&username)).await.unwrap();
    let err = service.register(register_input(&username)).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let Some(pool) = test_pool().await else { return };

    let service = AuthService::new(pool.clone(), test_keys());
    let username = unique("careful");
    service.register(register_input(&username)).await.unwrap();

    let err = service
        .login(LoginInput {
            username: Some(username),
            email: None,
            password: "not the password".into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn refresh_rotates_the_stored_token() {
    let Some(pool) = test_pool().await else { return };

    let service = AuthService::new(pool.clone(), test_keys());
    let username = unique("rotator");
    service.register(register_input(&username)).await.unwrap();

    let (_, first) = service
        .login(LoginInput {
            username: Some(username),
            email: None,
            password: "hunter2hunter2".into(),
        })
        .await
        .unwrap();

    // make sure the rotated token gets a fresh iat
    tokio::time::sleep(Duration::from_millis(1100)).await;

    let second = service.refresh(&first.refresh_token).await.unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);

    // the superseded token no longer matches the stored copy
    let err = service.refresh(&first.refresh_token).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));

    // the current one still works
    tokio::time::sleep(Duration::from_millis(1100)).await;
    service.refresh(&second.refresh_token).await.unwrap();
}

#[tokio::test]
async fn logout_revokes_the_refresh_token() {
    let Some(pool) = test_pool().await else { return };

    let service = AuthService::new(pool.clone(), test_keys());
    let username = unique("leaver");
    let user = service.register(register_input(&username)).await.unwrap();

    let (_, tokens) = service
        .login(LoginInput {
            username: Some(username),
            email: None,
            password: "hunter2hunter2".into(),
        })
        .await
        .unwrap();

    service.logout(user.id).await.unwrap();

    let err = service.refresh(&tokens.refresh_token).await.unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn change_password_requires_the_old_one() {
    let Some(pool) = test_pool().await else { return };

    let service = AuthService::new(pool.clone(), test_keys());
    let username = unique("changer");
    let user = service.register(register_input(&username)).await.unwrap();

    let err = service
        .change_password(user.id, "wrong old", "new-password")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    service
        .change_password(user.id, "hunter2hunter2", "new-password")
        .await
        .unwrap();

    service
        .login(LoginInput {
            username: Some(username),
            email: None,
            password: "new-password".into(),
        })
        .await
        .unwrap();
}
