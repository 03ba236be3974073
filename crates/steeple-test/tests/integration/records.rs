//! Integration tests for CRUD, filters, batch updates, settings and activity.

use salvo::http::StatusCode;
use serde_json::{Value, json};

use steeple_test::component::collection::Collection;
use steeple_test::component::model::contact::ContactMessage;
use steeple_test::component::model::leader::Leader;
use steeple_test::component::store::DocumentStore;

use super::helpers::*;

fn leader(name: &str) -> Leader {
    Leader {
        name: name.to_string(),
        role: "Elder".to_string(),
        bio: None,
        photo_url: None,
        email: None,
        phone: None,
        order: 0,
        is_active: true,
    }
}

fn message(name: &str) -> ContactMessage {
    ContactMessage {
        name: name.to_string(),
        email: "visitor@example.org".to_string(),
        subject: None,
        message: "When is the next baptism class?".to_string(),
        phone: None,
        is_read: false,
    }
}

#[test_log::test(tokio::test)]
async fn event_crud_round_trip() {
    let app = TestApp::new();

    let created: Value = TestRequest::post(&admin_path("events"))
        .json(&json!({
            "title": "Harvest Supper",
            "location": "Fellowship Hall",
            "date": "2024-10-05",
            "startTime": "18:00"
        }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let fetched: Value = TestRequest::get(&admin_path(&format!("events/{id}")))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(fetched["title"], "Harvest Supper");
    assert_eq!(fetched["createdAt"], created["createdAt"]);

    let updated: Value = TestRequest::put(&admin_path(&format!("events/{id}")))
        .json(&json!({
            "title": "Harvest Supper & Auction",
            "location": "Fellowship Hall",
            "date": "2024-10-05"
        }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(updated["title"], "Harvest Supper & Auction");
    assert_eq!(updated["createdAt"], created["createdAt"]);

    TestRequest::delete(&admin_path(&format!("events/{id}")))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);

    TestRequest::get(&admin_path(&format!("events/{id}")))
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn invalid_input_is_rejected() {
    let app = TestApp::new();

    TestRequest::post(&admin_path("events"))
        .json(&json!({ "title": "   ", "date": "2024-10-05" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_body_contains("title is required");

    TestRequest::post(&admin_path("recurringEvents"))
        .json(&json!({ "title": "Choir", "dayOfWeek": 9 }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::post(&admin_path("events"))
        .content_type("application/json")
        .body("{not json")
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::get(&admin_path("events/not-a-uuid"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn list_applies_text_and_flag_filters() {
    let app = TestApp::new();
    for (title, featured) in [
        ("Easter Sunrise Service", true),
        ("Easter Egg Hunt", false),
        ("Men's Breakfast", false),
    ] {
        TestRequest::post(&admin_path("events"))
            .json(&json!({ "title": title, "date": "2024-03-31", "isFeatured": featured }))
            .send(&app.service)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let easter: Vec<Value> = TestRequest::get(&admin_path("events?q=EASTER"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(easter.len(), 2);

    let featured: Vec<Value> = TestRequest::get(&admin_path("events?q=easter&flag.isFeatured=true"))
        .send(&app.service)
        .await
        .json();
    assert_eq!(featured.len(), 1);
    assert_eq!(featured[0]["title"], "Easter Sunrise Service");

    TestRequest::get(&admin_path("events?from=2024-04-01&to=2024-03-01"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn leaders_are_kept_per_collection_and_reordered() {
    let app = TestApp::new();
    let pastors = [leader("Pastor Ann"), leader("Pastor Ben"), leader("Pastor Cy")];
    let mut ids = Vec::new();
    for pastor in &pastors {
        let created: Value = TestRequest::post(&admin_path("pastors"))
            .json(&serde_json::to_value(pastor).expect("leader json"))
            .send(&app.service)
            .await
            .assert_status(StatusCode::CREATED)
            .json();
        ids.push(created["id"].as_str().expect("id").to_string());
    }

    let team_leads: Vec<Value> = TestRequest::get(&admin_path("teamLeads"))
        .send(&app.service)
        .await
        .json();
    assert!(team_leads.is_empty());

    ids.reverse();
    let result: Value = TestRequest::post(&admin_path("pastors/reorder"))
        .json(&json!({ "ids": ids }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(result["updated"], 3);

    let listed: Vec<Value> = TestRequest::get(&admin_path("pastors"))
        .send(&app.service)
        .await
        .json();
    let names: Vec<&str> = listed.iter().filter_map(|p| p["name"].as_str()).collect();
    assert_eq!(names, ["Pastor Cy", "Pastor Ben", "Pastor Ann"]);
}

#[test_log::test(tokio::test)]
async fn reorder_with_unknown_id_changes_nothing() {
    let app = TestApp::new();
    let first = app.seed(&leader("Deacon Eve")).await;
    let second = app.seed(&leader("Deacon Fay")).await;

    TestRequest::post(&admin_path("pastors/reorder"))
        .json(&json!({ "ids": [second.id, uuid::Uuid::now_v7(), first.id] }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let pastors = app.all::<Leader>().await;
    assert!(pastors.iter().all(|p| p.data.order == 0));
}

#[test_log::test(tokio::test)]
async fn mark_read_is_all_or_nothing() {
    let app = TestApp::new();
    let a = app.seed(&message("Priscilla")).await;
    let b = app.seed(&message("Aquila")).await;

    TestRequest::post(&admin_path("contactMessages/mark-read"))
        .json(&json!({ "ids": [a.id, uuid::Uuid::now_v7()] }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(app.all::<ContactMessage>().await.iter().all(|m| !m.data.is_read));

    TestRequest::post(&admin_path("contactMessages/mark-read"))
        .json(&json!({ "ids": [a.id, b.id] }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("\"updated\":2");
    assert!(app.all::<ContactMessage>().await.iter().all(|m| m.data.is_read));

    let unread: Vec<Value> = TestRequest::get(&admin_path("contactMessages?flag.isRead=false"))
        .send(&app.service)
        .await
        .json();
    assert!(unread.is_empty());
}

#[test_log::test(tokio::test)]
async fn settings_default_then_update() {
    let app = TestApp::new();

    let defaults: Value = TestRequest::get(&admin_path("settings"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(defaults["churchName"], "Our Church");

    TestRequest::put(&admin_path("settings"))
        .json(&json!({ "churchName": "", "serviceTimes": [] }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let saved: Value = TestRequest::put(&admin_path("settings"))
        .json(&json!({
            "churchName": "Grace Chapel",
            "email": "office@gracechapel.org",
            "serviceTimes": [{ "label": "Morning Worship", "time": "09:30" }]
        }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(saved["churchName"], "Grace Chapel");

    let reloaded: Value = TestRequest::get(&admin_path("settings"))
        .send(&app.service)
        .await
        .json();
    assert_eq!(reloaded["serviceTimes"][0]["time"], "09:30");
}

#[test_log::test(tokio::test)]
async fn activity_lists_newest_first() {
    let app = TestApp::new();
    for title in ["Choir Practice", "Youth Night"] {
        TestRequest::post(&admin_path("events"))
            .json(&json!({ "title": title, "date": "2024-02-01" }))
            .send(&app.service)
            .await
            .assert_status(StatusCode::CREATED);
    }
    TestRequest::put(&admin_path("settings"))
        .json(&json!({ "churchName": "Grace Chapel" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);

    let entries: Vec<Value> = TestRequest::get(&admin_path("activity?limit=2"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["collection"], "settings");
    assert_eq!(entries[0]["actor"], ADMIN_EMAIL);
    assert_eq!(entries[1]["action"], "created");

    TestRequest::get(&admin_path("activity?limit=0"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn subscribers_see_api_writes() {
    let app = TestApp::new();
    let mut receiver = app.store.subscribe(Collection::Events);

    TestRequest::post(&admin_path("events"))
        .json(&json!({ "title": "Prayer Vigil", "date": "2024-01-12" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED);

    let snapshot = receiver.recv().await.expect("snapshot after write");
    assert_eq!(snapshot.collection, Collection::Events);
    assert_eq!(snapshot.documents.len(), 1);
    assert_eq!(snapshot.documents[0].data["title"], "Prayer Vigil");
}
