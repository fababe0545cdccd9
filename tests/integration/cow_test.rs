//! Integration tests for cow ownership and scoping.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::World;

#[tokio::test]
async fn test_farmer_lists_only_own_cows() {
    let w = World::build().await;

    let response = w
        .app
        .request("GET", "/cows", None, Some(&w.token(&w.farmer)))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.ids(), vec![w.cow.get()]);

    let response = w
        .app
        .request("GET", "/api/cows", None, Some(&w.token(&w.neighbour)))
        .await;
    assert_eq!(response.ids(), vec![w.neighbour_cow.get()]);
}

#[tokio::test]
async fn test_out_of_scope_cow_is_not_found_for_agent() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "GET",
            &format!("/cows/{}", w.other_cow),
            None,
            Some(&w.token(&w.agent)),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Cow not found.");
}

#[tokio::test]
async fn test_get_is_idempotent() {
    let w = World::build().await;
    let token = w.token(&w.agent);
    let path = format!("/cows/{}", w.cow);

    let first = w.app.request("GET", &path, None, Some(&token)).await;
    let second = w.app.request("GET", &path, None, Some(&token)).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body, second.body);
    assert_eq!(first.body["data"]["tag"], "BD-RJ-001");
}

#[tokio::test]
async fn test_owner_from_other_farm_is_rejected_for_every_role() {
    let w = World::build().await;

    for user in [&w.admin, &w.agent] {
        let response = w
            .app
            .request(
                "POST",
                "/cows",
                Some(json!({
                    "tag": "BD-RJ-100",
                    "breed": "Sahiwal",
                    "farm_id": w.farm.get(),
                    "owner_id": w.other_profile.get(),
                })),
                Some(&w.token(user)),
            )
            .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["error"], "VALIDATION_ERROR");
        assert_eq!(
            response.body["message"],
            "owner_id: Owner must belong to the same farm as the cow."
        );
    }
}

#[tokio::test]
async fn test_farmer_submitted_owner_is_overridden() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/cows",
            Some(json!({
                "tag": "BD-RJ-101",
                "breed": "Red Chittagong",
                "dob": "2022-03-14",
                "farm_id": w.farm.get(),
                "owner_id": w.neighbour_profile.get(),
            })),
            Some(&w.token(&w.farmer)),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Cow created successfully.");
    assert_eq!(response.body["data"]["owner_id"], w.profile.get());
    assert_eq!(response.body["data"]["farm_id"], w.farm.get());
    assert_eq!(response.body["data"]["dob"], "2022-03-14");
}

#[tokio::test]
async fn test_farmer_without_profile_cannot_create_cow() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/cows",
            Some(json!({ "tag": "BD-RJ-102", "breed": "Sahiwal" })),
            Some(&w.token(&w.lone_farmer)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
    assert_eq!(response.body["message"], "You do not have a farmer profile.");
}

#[tokio::test]
async fn test_agent_cannot_add_cow_to_foreign_farm() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/cows",
            Some(json!({
                "tag": "BD-SY-100",
                "breed": "Sahiwal",
                "farm_id": w.other_farm.get(),
                "owner_id": w.other_profile.get(),
            })),
            Some(&w.token(&w.agent)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "You can only add cows to your own farms."
    );
}

#[tokio::test]
async fn test_duplicate_tag_on_same_farm_is_rejected() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/cows",
            Some(json!({
                "tag": "BD-RJ-001",
                "breed": "Sahiwal",
                "farm_id": w.farm.get(),
                "owner_id": w.neighbour_profile.get(),
            })),
            Some(&w.token(&w.agent)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "A cow with this tag already exists on this farm."
    );
}

#[tokio::test]
async fn test_blank_tag_is_a_validation_error() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/cows",
            Some(json!({
                "tag": "",
                "breed": "Sahiwal",
                "farm_id": w.farm.get(),
                "owner_id": w.profile.get(),
            })),
            Some(&w.token(&w.agent)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_whitespace_only_tag_and_breed_are_rejected() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/cows",
            Some(json!({
                "tag": "   ",
                "breed": "  ",
                "farm_id": w.farm.get(),
                "owner_id": w.profile.get(),
            })),
            Some(&w.token(&w.agent)),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = w
        .app
        .request(
            "PATCH",
            &format!("/cows/{}", w.cow.get()),
            Some(json!({ "breed": " " })),
            Some(&w.token(&w.agent)),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_farmer_updates_and_deletes_own_cow_only() {
    let w = World::build().await;
    let token = w.token(&w.farmer);

    let response = w
        .app
        .request(
            "PUT",
            &format!("/cows/{}", w.cow),
            Some(json!({ "breed": "Holstein Friesian" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["breed"], "Holstein Friesian");
    assert_eq!(response.body["data"]["tag"], "BD-RJ-001");

    let response = w
        .app
        .request(
            "DELETE",
            &format!("/cows/{}", w.neighbour_cow),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = w
        .app
        .request("DELETE", &format!("/cows/{}", w.cow), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Cow deleted successfully.");
}

#[tokio::test]
async fn test_unparseable_id_is_not_found() {
    let w = World::build().await;

    let response = w
        .app
        .request("GET", "/cows/not-a-number", None, Some(&w.token(&w.admin)))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
