//! Integration tests for image uploads and gallery clean-up.

use salvo::http::StatusCode;
use serde_json::{Value, json};

use steeple_test::component::model::gallery::GalleryItem;

use super::helpers::*;

/// PNG signature followed by filler; only the content type is checked.
fn png_bytes(len: usize) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.resize(len, 7);
    bytes
}

#[test_log::test(tokio::test)]
async fn image_upload_is_stored_under_the_folder() {
    let app = TestApp::new();

    let uploaded: Value = TestRequest::post(&admin_path("uploads/Gallery?name=Easter%20Choir.PNG"))
        .content_type("image/png")
        .body(png_bytes(256))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let key = uploaded["storagePath"].as_str().expect("storage path");
    assert!(key.starts_with("gallery/easter-choir-"), "{key}");
    assert!(key.ends_with(".png"), "{key}");
    assert_eq!(uploaded["url"], format!("/uploads/{key}"));
    assert_eq!(uploaded["size"], 256);

    let on_disk = std::fs::read(app.uploads.path().join(key)).expect("uploaded file");
    assert_eq!(on_disk, png_bytes(256));
}

#[test_log::test(tokio::test)]
async fn stored_extension_comes_from_the_content_type() {
    let app = TestApp::new();

    let uploaded: Value = TestRequest::post(&admin_path("uploads/gallery?name=welcome.html"))
        .content_type("image/png")
        .body("<script>alert(1)</script>")
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    let key = uploaded["storagePath"].as_str().expect("storage path");
    assert!(key.starts_with("gallery/welcome-"), "{key}");
    assert!(key.ends_with(".png"), "{key}");

    TestRequest::post(&admin_path("uploads/gallery?name=logo.svg"))
        .content_type("image/svg+xml")
        .body("<svg xmlns=\"http://www.w3.org/2000/svg\"/>")
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn invalid_uploads_are_rejected() {
    let app = TestApp::new();

    let response = TestRequest::post(&admin_path("uploads/gallery?name=notes.txt"))
        .content_type("text/plain")
        .body("hello")
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    assert!(response.error_message().contains("image"));

    TestRequest::post(&admin_path("uploads/gallery?name=huge.png"))
        .content_type("image/png")
        .body(png_bytes(64 * 1024 + 1))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::post(&admin_path("uploads/gallery?name=empty.png"))
        .content_type("image/png")
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    TestRequest::post(&admin_path("uploads/gallery"))
        .content_type("image/png")
        .body(png_bytes(16))
        .send(&app.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let stored = std::fs::read_dir(app.uploads.path())
        .expect("upload root")
        .count();
    assert_eq!(stored, 0);
}

#[test_log::test(tokio::test)]
async fn deleting_a_gallery_item_removes_its_image() {
    let app = TestApp::new();

    let uploaded: Value = TestRequest::post(&admin_path("uploads/gallery?name=picnic.png"))
        .content_type("image/png")
        .body(png_bytes(128))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let key = uploaded["storagePath"].as_str().expect("storage path").to_string();
    let path = app.uploads.path().join(&key);
    assert!(path.exists());

    let item: Value = TestRequest::post(&admin_path("gallery"))
        .json(&json!({
            "title": "Church Picnic",
            "imageUrl": uploaded["url"],
            "storagePath": key,
        }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let id = item["id"].as_str().expect("id");

    TestRequest::delete(&admin_path(&format!("gallery/{id}")))
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);

    assert!(!path.exists());
    assert!(app.all::<GalleryItem>().await.is_empty());

    TestRequest::delete(&admin_path(&format!("gallery/{id}")))
        .send(&app.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
