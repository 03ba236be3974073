//! Integration tests for health, identity and administrator accounts.

use salvo::http::StatusCode;
use serde_json::{Value, json};

use steeple_test::component::model::user::AdminUser;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn healthcheck_is_public() {
    let app = TestApp::with_basic_auth();

    let response = TestRequest::get(&app_path("healthcheck"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["today"], TODAY);
}

#[test_log::test(tokio::test)]
async fn whoami_in_single_user_mode() {
    let app = TestApp::new();

    let body: Value = TestRequest::get(&app_path("whoami"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["email"], ADMIN_EMAIL);
    assert_eq!(body["name"], ADMIN_NAME);
    assert!(body.get("userId").is_none());
}

#[test_log::test(tokio::test)]
async fn admin_routes_require_credentials_in_basic_mode() {
    let app = TestApp::with_basic_auth();

    let response = TestRequest::get(&admin_path("events"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    assert!(
        response
            .get_header("www-authenticate")
            .is_some_and(|v| v.starts_with("Basic"))
    );
    assert!(response.error_message().contains("Not authenticated"));
}

#[test_log::test(tokio::test)]
async fn register_login_and_basic_auth_flow() {
    let app = TestApp::with_basic_auth();

    let created: Value = TestRequest::post(&app_path("auth/register"))
        .json(&json!({
            "name": "Lydia",
            "email": "lydia@example.org",
            "password": "purple-cloth"
        }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(created["email"], "lydia@example.org");
    assert!(created["userId"].is_string());

    TestRequest::post(&app_path("auth/login"))
        .json(&json!({ "email": "lydia@example.org", "password": "purple-cloth" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("\"success\":true");

    TestRequest::post(&app_path("auth/login"))
        .json(&json!({ "email": "lydia@example.org", "password": "wrong-cloth" }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let me: Value = TestRequest::get(&app_path("whoami"))
        .basic_auth("lydia@example.org", "purple-cloth")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(me["name"], "Lydia");

    TestRequest::get(&admin_path("events"))
        .basic_auth("lydia@example.org", "purple-cloth")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn later_registrations_need_an_administrator() {
    let app = TestApp::with_basic_auth();
    let first = json!({ "name": "Lydia", "email": "lydia@example.org", "password": "purple-cloth" });
    let second = json!({ "name": "Silas", "email": "silas@example.org", "password": "prison-songs" });

    TestRequest::post(&app_path("auth/register"))
        .json(&first)
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED);

    TestRequest::post(&app_path("auth/register"))
        .json(&second)
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    TestRequest::post(&app_path("auth/register"))
        .basic_auth("lydia@example.org", "purple-cloth")
        .json(&second)
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED);

    TestRequest::post(&app_path("auth/register"))
        .basic_auth("lydia@example.org", "purple-cloth")
        .json(&second)
        .send(&app.service)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[test_log::test(tokio::test)]
async fn concurrent_first_registrations_admit_one() {
    let app = TestApp::with_basic_auth();
    let lydia = json!({ "name": "Lydia", "email": "lydia@example.org", "password": "purple-cloth" });
    let silas = json!({ "name": "Silas", "email": "silas@example.org", "password": "prison-songs" });

    let (first, second) = tokio::join!(
        TestRequest::post(&app_path("auth/register"))
            .json(&lydia)
            .send(&app.service),
        TestRequest::post(&app_path("auth/register"))
            .json(&silas)
            .send(&app.service),
    );

    // The loser either lost the insert (409) or arrived after the winner and
    // now needs credentials (401).
    let statuses = [first.status, second.status];
    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    assert_eq!(created, 1, "{} / {}", first.body_string(), second.body_string());
    assert!(
        statuses
            .iter()
            .all(|s| [StatusCode::CREATED, StatusCode::CONFLICT, StatusCode::UNAUTHORIZED].contains(s))
    );
    assert_eq!(app.all::<AdminUser>().await.len(), 1);
}

#[test_log::test(tokio::test)]
async fn admin_users_are_not_exposed_as_a_collection() {
    let app = TestApp::new();

    TestRequest::get(&admin_path("adminUsers"))
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
