//! Integration tests for bearer-token authentication.

mod helpers;

use http::StatusCode;

use farmhub_auth::JwtEncoder;
use farmhub_core::config::AuthConfig;
use farmhub_entity::user::UserChanges;

use helpers::World;

#[tokio::test]
async fn test_health_needs_no_token() {
    let w = World::build().await;

    let response = w.app.request("GET", "/healthz", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "memory");
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let w = World::build().await;

    let response = w.app.request("GET", "/api/cows", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthenticated() {
    let w = World::build().await;

    let response = w
        .app
        .request("GET", "/farms", None, Some("not.a.jwt"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let w = World::build().await;
    let foreign = JwtEncoder::new(&AuthConfig {
        jwt_secret: "someone-elses-secret".to_string(),
        ..AuthConfig::default()
    });
    let (token, _) = foreign.issue(&w.admin).expect("issue");

    let response = w.app.request("GET", "/farms", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivated_user_is_unauthenticated() {
    let w = World::build().await;
    let token = w.token(&w.agent);

    w.app
        .repos
        .users
        .update(
            w.agent.id,
            &UserChanges {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .expect("deactivate");

    let response = w.app.request("GET", "/farms", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "User account is disabled");
}

#[tokio::test]
async fn test_deleted_user_token_is_unauthenticated() {
    let w = World::build().await;
    let token = w.token(&w.lone_farmer);

    w.app
        .repos
        .users
        .delete(w.lone_farmer.id)
        .await
        .expect("delete");

    let response = w.app.request("GET", "/cows", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "User not found");
}
