//! Integration tests for farm scoping.

mod helpers;

use http::StatusCode;
use serde_json::json;

use farmhub_entity::user::Role;

use helpers::{TestApp, World};

#[tokio::test]
async fn test_agent_without_farms_creates_farm_assigned_to_self() {
    let app = TestApp::new();
    let agent = app.create_user("agent_new", Role::Agent).await;
    let token = app.token(&agent);

    let response = app
        .request(
            "POST",
            "/farms",
            Some(json!({ "name": "A", "location": "B" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Farm created successfully.");
    assert_eq!(response.body["data"]["agent_id"], agent.id.get());
    assert_eq!(response.body["data"]["name"], "A");
}

#[tokio::test]
async fn test_farm_names_are_trimmed_and_blank_rejected() {
    let app = TestApp::new();
    let agent = app.create_user("agent_trim", Role::Agent).await;
    let token = app.token(&agent);

    let response = app
        .request(
            "POST",
            "/farms",
            Some(json!({ "name": "   ", "location": "  " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app
        .request(
            "POST",
            "/farms",
            Some(json!({ "name": "  Jamuna Dairy ", "location": " Bogura" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["name"], "Jamuna Dairy");
    assert_eq!(response.body["data"]["location"], "Bogura");
}

#[tokio::test]
async fn test_agent_cannot_create_farm_for_another_agent() {
    let w = World::build().await;
    let token = w.token(&w.agent);

    let response = w
        .app
        .request(
            "POST",
            "/api/farms",
            Some(json!({ "name": "Teesta", "location": "Rangpur", "agent_id": w.other_agent.id.get() })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Agents can only create farms assigned to themselves."
    );
}

#[tokio::test]
async fn test_agent_lists_exactly_own_farms() {
    let w = World::build().await;

    let response = w
        .app
        .request("GET", "/farms", None, Some(&w.token(&w.agent)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.ids(), vec![w.farm.get()]);

    let response = w
        .app
        .request("GET", "/farms", None, Some(&w.token(&w.other_agent)))
        .await;
    assert_eq!(response.ids(), vec![w.other_farm.get()]);
}

#[tokio::test]
async fn test_superadmin_lists_all_farms() {
    let w = World::build().await;
    let unassigned = w.app.create_farm("Meghna Farm", None).await;

    let response = w
        .app
        .request("GET", "/api/farms", None, Some(&w.token(&w.admin)))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let mut ids = response.ids();
    ids.sort();
    assert_eq!(ids, vec![w.farm.get(), w.other_farm.get(), unassigned.get()]);
}

#[tokio::test]
async fn test_foreign_farm_is_not_found_for_agent() {
    let w = World::build().await;
    let token = w.token(&w.agent);
    let path = format!("/farms/{}", w.other_farm);

    let response = w.app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");

    let response = w
        .app
        .request("PATCH", &path, Some(json!({ "name": "Mine now" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = w.app.request("DELETE", &path, None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_agent_cannot_reassign_farm() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "PUT",
            &format!("/farms/{}", w.farm),
            Some(json!({ "agent_id": w.other_agent.id.get() })),
            Some(&w.token(&w.agent)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Agents cannot reassign farms to other agents."
    );
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "PATCH",
            &format!("/farms/{}", w.farm),
            Some(json!({ "location": "Natore" })),
            Some(&w.token(&w.agent)),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Farm updated successfully.");
    assert_eq!(response.body["data"]["location"], "Natore");
    assert_eq!(response.body["data"]["name"], "Padma Dairy Farm");
    assert_eq!(response.body["data"]["agent_id"], w.agent.id.get());
}

#[tokio::test]
async fn test_farmer_cannot_touch_farms() {
    let w = World::build().await;
    let token = w.token(&w.farmer);

    let response = w.app.request("GET", "/farms", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = w
        .app
        .request(
            "POST",
            "/farms",
            Some(json!({ "name": "A", "location": "B" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Not allowed to create or modify farms."
    );
}

#[tokio::test]
async fn test_farm_requires_agent_role() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/farms",
            Some(json!({ "name": "Karnaphuli", "location": "Chattogram", "agent_id": w.farmer.id.get() })),
            Some(&w.token(&w.admin)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(
        response.body["message"],
        "agent_id: Selected user is not an AGENT."
    );
}

#[tokio::test]
async fn test_agent_deletes_own_farm() {
    let w = World::build().await;
    let empty = w.app.create_farm("Empty Farm", Some(&w.agent)).await;
    let token = w.token(&w.agent);

    let response = w
        .app
        .request("DELETE", &format!("/farms/{empty}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Farm deleted successfully.");

    let response = w
        .app
        .request("GET", &format!("/farms/{empty}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
