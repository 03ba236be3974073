//! Integration tests for collection exports.

use salvo::http::StatusCode;
use serde_json::{Value, json};

use steeple_test::component::collection::Collection;
use steeple_test::component::model::export_log::ExportLogEntry;
use steeple_test::component::model::testimony::Testimony;

use super::helpers::*;

fn testimony(name: &str, text: &str, anonymous: bool) -> Testimony {
    Testimony {
        name: Some(name.to_string()),
        email: Some(format!("{}@example.org", name.to_ascii_lowercase())),
        testimony: Some(text.to_string()),
        story: None,
        photo: None,
        is_anonymous: anonymous,
        is_approved: true,
        is_featured: false,
        submitted_at: None,
    }
}

#[test_log::test(tokio::test)]
async fn csv_export_hides_anonymous_submitters() {
    let app = TestApp::new();
    app.seed(&testimony("Ruth", "Found a church family here.", true))
        .await;
    app.seed(&testimony("Boaz", "Grateful for the food pantry.", false))
        .await;

    let response = TestRequest::post(&admin_path("export/testimonies?format=csv"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("Anonymous")
        .assert_body_contains("Found a church family here.")
        .assert_body_contains("Boaz")
        .assert_body_not_contains("Ruth")
        .assert_body_not_contains("ruth@example.org");

    assert!(
        response
            .get_header("content-type")
            .is_some_and(|v| v.starts_with("text/csv"))
    );
    assert_eq!(
        response.get_header("content-disposition"),
        Some("attachment; filename=\"testimonies-2024-01-10.csv\"")
    );

    let logs = app.all::<ExportLogEntry>().await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].data.collection, Collection::Testimonies);
    assert_eq!(logs[0].data.record_count, 2);
    assert_eq!(logs[0].data.exported_by, ADMIN_EMAIL);
}

#[test_log::test(tokio::test)]
async fn binary_formats_have_their_containers() {
    let app = TestApp::new();
    TestRequest::post(&admin_path("events"))
        .json(&json!({ "title": "Harvest Supper", "date": "2024-10-05" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED);

    let pdf = TestRequest::post(&admin_path("export/events"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);
    assert!(pdf.body.starts_with(b"%PDF"));
    assert_eq!(pdf.get_header("content-type"), Some("application/pdf"));

    let word = TestRequest::post(&admin_path("export/events?format=word"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);
    assert!(word.body.starts_with(b"PK"));
    assert!(
        word.get_header("content-disposition")
            .is_some_and(|v| v.ends_with(".docx\""))
    );
}

#[test_log::test(tokio::test)]
async fn selection_exports_only_the_chosen_records() {
    let app = TestApp::new();
    let chosen = app
        .seed(&testimony("Naomi", "Prayer carried me through.", false))
        .await;
    app.seed(&testimony("Orpah", "Back home with family.", false))
        .await;

    TestRequest::post(&admin_path("export/testimonies?format=csv"))
        .json(&json!({ "ids": [chosen.id] }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("Naomi")
        .assert_body_not_contains("Orpah");

    TestRequest::post(&admin_path("export/testimonies?format=csv"))
        .json(&json!({ "ids": [uuid::Uuid::now_v7()] }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn unsupported_requests_are_rejected() {
    let app = TestApp::new();

    let response = TestRequest::post(&admin_path("export/events?format=xlsx"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(response.error_message().contains("xlsx"));

    for collection in ["settings", "adminUsers", "hymns"] {
        TestRequest::post(&admin_path(&format!("export/{collection}?format=csv")))
            .send(&app.service)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    let _: Value = TestRequest::post(&admin_path("export/events"))
        .body("{not json")
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();

    assert!(app.all::<ExportLogEntry>().await.is_empty());
}
