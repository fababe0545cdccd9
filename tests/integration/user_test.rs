//! Integration tests for user account management.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::World;

#[tokio::test]
async fn test_admin_creates_agent_without_platform_flags() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/users",
            Some(json!({
                "username": "agent_khulna",
                "email": "khulna@farmhub.test",
                "role": "AGENT",
                "password": "Agent@12345",
                "is_staff": true,
                "is_superuser": true,
            })),
            Some(&w.token(&w.admin)),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "User created successfully.");
    let data = &response.body["data"];
    assert_eq!(data["role"], "AGENT");
    assert_eq!(data["is_staff"], false);
    assert_eq!(data["is_superuser"], false);
    assert_eq!(data["is_active"], true);
    assert!(data.get("password_hash").is_none());
    assert!(data.get("password").is_none());
}

#[tokio::test]
async fn test_agent_creates_only_farmers() {
    let w = World::build().await;
    let token = w.token(&w.agent);

    let response = w
        .app
        .request(
            "POST",
            "/users",
            Some(json!({ "username": "farmer_new", "role": "FARMER", "password": "Farmer@12345" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["role"], "FARMER");

    let response = w
        .app
        .request(
            "POST",
            "/users",
            Some(json!({ "username": "agent_rogue", "role": "AGENT", "password": "Agent@12345" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Agents can only create farmer accounts."
    );
}

#[tokio::test]
async fn test_farmer_cannot_create_users() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/users",
            Some(json!({ "username": "farmer_friend", "password": "Farmer@12345" })),
            Some(&w.token(&w.farmer)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_short_password_and_duplicate_username_are_rejected() {
    let w = World::build().await;
    let token = w.token(&w.admin);

    let response = w
        .app
        .request(
            "POST",
            "/users",
            Some(json!({ "username": "farmer_short", "password": "abc" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "password: This password is too short. It must contain at least 8 characters."
    );

    let response = w
        .app
        .request(
            "POST",
            "/users",
            Some(json!({ "username": "farmer_karim", "password": "Farmer@12345" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_agent_sees_self_and_farmers() {
    let w = World::build().await;

    let response = w
        .app
        .request("GET", "/users", None, Some(&w.token(&w.agent)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let mut ids = response.ids();
    ids.sort();
    let mut expected = vec![
        w.agent.id.get(),
        w.farmer.id.get(),
        w.neighbour.id.get(),
        w.other_farmer.id.get(),
        w.lone_farmer.id.get(),
    ];
    expected.sort();
    assert_eq!(ids, expected);

    let response = w
        .app
        .request(
            "GET",
            &format!("/users/{}", w.other_agent.id),
            None,
            Some(&w.token(&w.agent)),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_farmer_manages_only_own_account() {
    let w = World::build().await;
    let token = w.token(&w.farmer);

    let response = w.app.request("GET", "/users", None, Some(&token)).await;
    assert_eq!(response.ids(), vec![w.farmer.id.get()]);

    let response = w
        .app
        .request(
            "PATCH",
            &format!("/users/{}", w.farmer.id),
            Some(json!({ "first_name": "Abdul", "last_name": "Karim" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["first_name"], "Abdul");

    let response = w
        .app
        .request(
            "PATCH",
            &format!("/users/{}", w.farmer.id),
            Some(json!({ "role": "AGENT" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Only administrators can change a user's role."
    );

    let response = w
        .app
        .request(
            "PATCH",
            &format!("/users/{}", w.neighbour.id),
            Some(json!({ "first_name": "Mallory" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_cannot_delete_own_account() {
    let w = World::build().await;
    let token = w.token(&w.admin);

    let response = w
        .app
        .request(
            "DELETE",
            &format!("/users/{}", w.admin.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "You cannot delete your own account.");

    let response = w
        .app
        .request(
            "DELETE",
            &format!("/users/{}", w.lone_farmer.id),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "User deleted successfully.");
}
