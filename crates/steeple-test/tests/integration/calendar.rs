//! Integration tests for generated occurrences, skips and the combined calendar.

use salvo::http::StatusCode;
use serde_json::{Value, json};

use steeple_test::component::model::recurring::{RecurringEventDefinition, SkipException};

use super::helpers::*;

fn sunday_worship() -> RecurringEventDefinition {
    RecurringEventDefinition {
        title: "Sunday Worship".to_string(),
        description: String::new(),
        location: "Sanctuary".to_string(),
        day_of_week: 0,
        start_time: "10:00".to_string(),
        end_time: "11:30".to_string(),
        is_active: true,
    }
}

fn dates(entries: &[Value]) -> Vec<&str> {
    entries.iter().filter_map(|e| e["date"].as_str()).collect()
}

#[test_log::test(tokio::test)]
async fn occurrences_follow_the_requested_window() {
    let app = TestApp::new();
    let definition = app.seed(&sunday_worship()).await;

    let none: Vec<Value> = TestRequest::get(&admin_path("occurrences?weeks=0"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(none.is_empty());

    let two: Vec<Value> = TestRequest::get(&admin_path("occurrences?weeks=2"))
        .send(&app.service)
        .await
        .json();
    assert_eq!(dates(&two), ["2024-01-14", "2024-01-21"]);
    assert_eq!(two[0]["definitionId"], definition.id.to_string());
    assert_eq!(
        two[0]["id"],
        format!("recurring-{}-2024-01-14", definition.id)
    );

    // The configured look-ahead is four weeks.
    let default: Vec<Value> = TestRequest::get(&admin_path("occurrences"))
        .send(&app.service)
        .await
        .json();
    assert_eq!(
        dates(&default),
        ["2024-01-14", "2024-01-21", "2024-01-28", "2024-02-04"]
    );

    TestRequest::get(&admin_path("occurrences?weeks=many"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn skipping_a_date_removes_it() {
    let app = TestApp::new();
    let definition = app.seed(&sunday_worship()).await;

    let skip: Value = TestRequest::post(&admin_path(&format!(
        "recurringEvents/{}/skip",
        definition.id
    )))
    .json(&json!({ "date": "2024-01-14", "reason": "Snow day" }))
    .send(&app.service)
    .await
    .assert_status(StatusCode::CREATED)
    .json();
    assert_eq!(skip["skipDate"], "2024-01-14");

    let remaining: Vec<Value> = TestRequest::get(&admin_path("occurrences?weeks=2"))
        .send(&app.service)
        .await
        .json();
    assert_eq!(dates(&remaining), ["2024-01-21"]);

    let skips = app.all::<SkipException>().await;
    assert_eq!(skips.len(), 1);
    assert_eq!(skips[0].data.reason.as_deref(), Some("Snow day"));
}

#[test_log::test(tokio::test)]
async fn skipping_an_unknown_definition_is_not_found() {
    let app = TestApp::new();

    TestRequest::post(&admin_path(&format!(
        "recurringEvents/{}/skip",
        uuid::Uuid::now_v7()
    )))
    .json(&json!({ "date": "2024-01-14" }))
    .send(&app.service)
    .await
    .assert_status(StatusCode::NOT_FOUND);

    let definition = app.seed(&sunday_worship()).await;
    TestRequest::post(&admin_path(&format!("recurringEvents/{}/skip", definition.id)))
        .json(&json!({ "date": "14/01/2024" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn calendar_merges_upcoming_events_with_occurrences() {
    let app = TestApp::new();
    app.seed(&sunday_worship()).await;

    for (title, date) in [("New Year Social", "2024-01-01"), ("Bible Study", "2024-01-16")] {
        TestRequest::post(&admin_path("events"))
            .json(&json!({ "title": title, "date": date, "startTime": "19:00" }))
            .send(&app.service)
            .await
            .assert_status(StatusCode::CREATED);
    }

    let entries: Vec<Value> = TestRequest::get(&admin_path("calendar?weeks=2"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(dates(&entries), ["2024-01-14", "2024-01-16", "2024-01-21"]);
    assert_eq!(entries[0]["kind"], "recurring");
    assert_eq!(entries[1]["kind"], "event");
    assert_eq!(entries[1]["title"], "Bible Study");
}
