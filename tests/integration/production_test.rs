//! Integration tests for activities and milk records.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::World;

fn liters(body: &serde_json::Value) -> f64 {
    body["data"]["liters"]
        .as_str()
        .expect("liters should serialize as a decimal string")
        .parse()
        .expect("liters should parse")
}

#[tokio::test]
async fn test_duplicate_milk_record_rejected_but_update_succeeds() {
    let w = World::build().await;
    let token = w.token(&w.farmer);
    let payload = json!({ "cow_id": w.cow.get(), "date": "2024-05-01", "liters": "7.50" });

    let first = w
        .app
        .request("POST", "/milk-records", Some(payload.clone()), Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_eq!(first.body["message"], "Milk record created successfully.");
    let id = first.body["data"]["id"].as_i64().expect("id");

    let second = w
        .app
        .request("POST", "/milk-records", Some(payload), Some(&token))
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(second.body["error"], "VALIDATION_ERROR");
    assert_eq!(
        second.body["message"],
        "A milk record for this cow and date already exists."
    );

    let updated = w
        .app
        .request(
            "PATCH",
            &format!("/milk-records/{id}"),
            Some(json!({ "liters": "8.10" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(liters(&updated.body), 8.10);
    assert_eq!(updated.body["data"]["date"], "2024-05-01");
}

#[tokio::test]
async fn test_liters_are_returned_with_two_decimal_places() {
    let w = World::build().await;
    let token = w.token(&w.agent);

    for (value, date) in [("7.5", "2024-06-01"), ("7.500", "2024-06-02")] {
        let response = w
            .app
            .request(
                "POST",
                "/milk-records",
                Some(json!({ "cow_id": w.cow.get(), "date": date, "liters": value })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "liters {value}");
        assert_eq!(response.body["data"]["liters"], "7.50");
    }
}

#[tokio::test]
async fn test_liters_precision_and_sign_are_checked() {
    let w = World::build().await;
    let token = w.token(&w.agent);

    for (value, date) in [("-1.00", "2024-05-02"), ("7.555", "2024-05-03")] {
        let response = w
            .app
            .request(
                "POST",
                "/milk-records",
                Some(json!({ "cow_id": w.cow.get(), "date": date, "liters": value })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "liters {value}");
        assert!(
            response.body["message"]
                .as_str()
                .unwrap_or_default()
                .starts_with("liters:")
        );
    }
}

#[tokio::test]
async fn test_farmer_cannot_record_milk_for_neighbours_cow() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/milk-records",
            Some(json!({ "cow_id": w.neighbour_cow.get(), "date": "2024-05-01", "liters": "6.20" })),
            Some(&w.token(&w.farmer)),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.body["message"],
        "You do not have permission to manage records for this cow."
    );
}

#[tokio::test]
async fn test_unknown_cow_is_a_validation_error() {
    let w = World::build().await;

    let response = w
        .app
        .request(
            "POST",
            "/activities",
            Some(json!({ "cow_id": 99_999, "type": "health", "date": "2024-05-01" })),
            Some(&w.token(&w.admin)),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "cow_id: Cow not found.");
}

#[tokio::test]
async fn test_activity_lifecycle_and_scoping() {
    let w = World::build().await;
    let farmer = w.token(&w.farmer);

    let created = w
        .app
        .request(
            "POST",
            "/activities",
            Some(json!({
                "cow": w.cow.get(),
                "type": "vaccination",
                "notes": "FMD booster",
                "date": "2024-05-01",
            })),
            Some(&farmer),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["message"], "Activity created successfully.");
    assert_eq!(created.body["data"]["type"], "vaccination");
    let id = created.body["data"]["id"].as_i64().expect("id");

    let visible = w
        .app
        .request(
            "GET",
            &format!("/activities?cow_id={}", w.cow),
            None,
            Some(&w.token(&w.agent)),
        )
        .await;
    assert_eq!(visible.ids(), vec![id]);

    let hidden = w
        .app
        .request(
            "GET",
            &format!("/activities/{id}"),
            None,
            Some(&w.token(&w.neighbour)),
        )
        .await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let hidden = w
        .app
        .request(
            "GET",
            "/activities",
            None,
            Some(&w.token(&w.other_agent)),
        )
        .await;
    assert!(hidden.ids().is_empty());

    let updated = w
        .app
        .request(
            "PUT",
            &format!("/activities/{id}"),
            Some(json!({ "notes": "" })),
            Some(&farmer),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["notes"], "");
    assert_eq!(updated.body["data"]["type"], "vaccination");

    let deleted = w
        .app
        .request("DELETE", &format!("/activities/{id}"), None, Some(&farmer))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "Activity deleted successfully.");
}

#[tokio::test]
async fn test_milk_records_filter_by_date_range() {
    let w = World::build().await;
    let token = w.token(&w.agent);

    for (date, value) in [("2024-05-01", "7.50"), ("2024-05-02", "7.80"), ("2024-05-03", "6.45")] {
        let response = w
            .app
            .request(
                "POST",
                "/milk-records",
                Some(json!({ "cow_id": w.cow.get(), "date": date, "liters": value })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let response = w
        .app
        .request(
            "GET",
            &format!(
                "/milk-records?cow_id={}&date_from=2024-05-02&date_to=2024-05-03",
                w.cow
            ),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let dates: Vec<_> = response.body["data"]
        .as_array()
        .expect("list")
        .iter()
        .map(|r| r["date"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(dates, vec!["2024-05-03", "2024-05-02"]);
}
