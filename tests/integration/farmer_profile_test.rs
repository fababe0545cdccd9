//! Integration tests for farmer profiles.

mod helpers;

use http::StatusCode;
use serde_json::json;

use farmhub_entity::user::Role;

use helpers::World;

#[tokio::test]
async fn test_agent_attaches_farmer_to_own_farm() {
    let w = World::build().await;
    let recruit = w.app.create_user("farmer_recruit", Role::Farmer).await;

    let response = w
        .app
        .request(
            "POST",
            "/farmer-profiles",
            Some(json!({ "user_id": recruit.id.get(), "farm_id": w.farm.get() })),
            Some(&w.token(&w.agent)),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(
        response.body["message"],
        "Farmer profile created successfully."
    );
    assert_eq!(response.body["data"]["user_id"], recruit.id.get());
    assert_eq!(response.body["data"]["farm_id"], w.farm.get());
}

#[tokio::test]
async fn test_agent_cannot_attach_to_foreign_farm() {
    let w = World::build().await;
    let recruit = w.app.create_user("farmer_recruit", Role::Farmer).await;

    let response = w
        .app
        .request(
            "POST",
            "/farmer-profiles",
            Some(json!({ "user": recruit.id.get(), "farm": w.other_farm.get() })),
            Some(&w.token(&w.agent)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "You can only manage profiles for your own farms."
    );
}

#[tokio::test]
async fn test_profile_requires_farmer_role() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/farmer-profiles",
            Some(json!({ "user_id": w.other_agent.id.get(), "farm_id": w.farm.get() })),
            Some(&w.token(&w.agent)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "user_id: Selected user is not a FARMER."
    );
}

#[tokio::test]
async fn test_second_profile_for_user_is_rejected() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/farmer-profiles",
            Some(json!({ "user_id": w.farmer.id.get(), "farm_id": w.farm.get() })),
            Some(&w.token(&w.admin)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(
        response.body["message"],
        "This user already has a farmer profile."
    );
}

#[tokio::test]
async fn test_farmer_sees_only_own_profile() {
    let w = World::build().await;
    let token = w.token(&w.farmer);

    let response = w
        .app
        .request("GET", "/farmer-profiles", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.ids(), vec![w.profile.get()]);

    let response = w
        .app
        .request(
            "GET",
            &format!("/farmer-profiles/{}", w.neighbour_profile),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_agent_filters_profiles_by_farm() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "GET",
            &format!("/farmer-profiles?farm_id={}", w.farm),
            None,
            Some(&w.token(&w.agent)),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let mut ids = response.ids();
    ids.sort();
    assert_eq!(ids, vec![w.profile.get(), w.neighbour_profile.get()]);

    let response = w
        .app
        .request(
            "GET",
            &format!("/farmer-profiles?farm_id={}", w.other_farm),
            None,
            Some(&w.token(&w.agent)),
        )
        .await;
    assert!(response.ids().is_empty());
}

#[tokio::test]
async fn test_farmer_cannot_create_or_delete_profiles() {
    let w = World::build().await;
    let token = w.token(&w.farmer);

    let response = w
        .app
        .request(
            "POST",
            "/farmer-profiles",
            Some(json!({ "user_id": w.lone_farmer.id.get(), "farm_id": w.farm.get() })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Not allowed to create farmer profiles."
    );

    let response = w
        .app
        .request(
            "DELETE",
            &format!("/farmer-profiles/{}", w.profile),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Not allowed to delete farmer profiles."
    );
}

#[tokio::test]
async fn test_farmer_cannot_move_own_profile() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "PATCH",
            &format!("/farmer-profiles/{}", w.profile),
            Some(json!({ "farm_id": w.other_farm.get() })),
            Some(&w.token(&w.farmer)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "Farmers cannot move their profile to another user or farm."
    );
}
