//! Registration API integration tests.
//!
//! Run with: `cargo test -p samiti-api --test register_test`
//! Requires Docker for testcontainers (Postgres).

mod helpers;

use helpers::{full_form, setup_test_app, valid_form};
use serde_json::Value;

#[tokio::test]
async fn test_register_valid_submission() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/register")
        .multipart(full_form("owner@example.com"))
        .await;

    assert_eq!(response.status_code(), 201);
    let body: Value = response.json();
    let id: uuid::Uuid = body["id"].as_str().unwrap().parse().unwrap();
    assert_eq!(body["ok"], Value::Bool(true));

    let member = samiti_db::MemberRepository::new(app.pool.clone())
        .get_by_id(id)
        .await
        .unwrap()
        .expect("created member should exist");
    assert_eq!(member.email, "owner@example.com");
    assert_eq!(member.owner_name_english, "Rahim Uddin");

    // The stored password is a hash, never the raw input.
    assert_ne!(member.password, "s3cret-enough");
    assert!(bcrypt::verify("s3cret-enough", &member.password).unwrap());
}

#[tokio::test]
async fn test_register_stores_file_references() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/register")
        .multipart(full_form("files@example.com"))
        .await;
    assert_eq!(response.status_code(), 201);

    let (proof, photo, receipt): (Option<String>, Option<String>, Option<String>) =
        sqlx::query_as(
            "SELECT ownership_proof_file, owner_photo, payment_receipt \
             FROM members WHERE email = 'files@example.com'",
        )
        .fetch_one(&app.pool)
        .await
        .unwrap();

    let proof = proof.unwrap();
    assert!(proof.starts_with("/uploads/"));
    assert!(proof.ends_with("-ownershipProof-registration_deed.pdf"));
    assert!(photo.unwrap().ends_with("-ownerPhoto-owner.jpg"));

    // Referenced path resolves to byte-identical content.
    let receipt = receipt.unwrap();
    let name = receipt.strip_prefix("/uploads/").unwrap();
    let stored = tokio::fs::read(app.upload_dir.join(name)).await.unwrap();
    assert_eq!(stored, b"receipt png bytes");
}

#[tokio::test]
async fn test_register_without_files_stores_null_references() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/register")
        .multipart(valid_form("nofiles@example.com"))
        .await;
    assert_eq!(response.status_code(), 201);

    let (proof, photo, receipt): (Option<String>, Option<String>, Option<String>) =
        sqlx::query_as(
            "SELECT ownership_proof_file, owner_photo, payment_receipt \
             FROM members WHERE email = 'nofiles@example.com'",
        )
        .fetch_one(&app.pool)
        .await
        .unwrap();

    assert_eq!(proof, None);
    assert_eq!(photo, None);
    assert_eq!(receipt, None);
}

#[tokio::test]
async fn test_register_missing_email_is_400() {
    let app = setup_test_app().await;

    let form = axum_test::multipart::MultipartForm::new()
        .add_text("password", "longenough")
        .add_text("email", "   ");
    let response = app.client().post("/api/register").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Email is required");

    // Store create is never invoked.
    assert_eq!(app.member_count().await, 0);
}

#[tokio::test]
async fn test_register_short_password_is_400() {
    let app = setup_test_app().await;

    let form = axum_test::multipart::MultipartForm::new()
        .add_text("email", "short@example.com")
        .add_text("password", "seven77");
    let response = app.client().post("/api/register").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Password must be at least 8 characters");
    assert_eq!(app.member_count().await, 0);
}

#[tokio::test]
async fn test_register_missing_password_is_400() {
    let app = setup_test_app().await;

    let form =
        axum_test::multipart::MultipartForm::new().add_text("email", "nopass@example.com");
    let response = app.client().post("/api/register").multipart(form).await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"], "Password is required");
}

#[tokio::test]
async fn test_register_non_post_is_405() {
    let app = setup_test_app().await;

    let response = app.client().get("/api/register").await;
    assert_eq!(response.status_code(), 405);
    assert_eq!(response.header("allow"), "POST");
    let body: Value = response.json();
    assert_eq!(body["error"], "Method Not Allowed");

    let response = app.client().delete("/api/register").await;
    assert_eq!(response.status_code(), 405);
}

#[tokio::test]
async fn test_register_duplicate_email_is_409() {
    let app = setup_test_app().await;

    let first = app
        .client()
        .post("/api/register")
        .multipart(valid_form("twice@example.com"))
        .await;
    assert_eq!(first.status_code(), 201);

    let second = app
        .client()
        .post("/api/register")
        .multipart(valid_form("TWICE@example.com"))
        .await;
    assert_eq!(second.status_code(), 409);
    let body: Value = second.json();
    assert_eq!(body["error"], "Email already exists");
    assert_eq!(app.member_count().await, 1);
}

#[tokio::test]
async fn test_register_same_file_twice_creates_distinct_stored_files() {
    let app = setup_test_app().await;

    for email in ["one@example.com", "two@example.com"] {
        let form = valid_form(email).add_part(
            "ownerPhoto",
            axum_test::multipart::Part::bytes(b"identical photo bytes".to_vec())
                .file_name("photo.jpg")
                .mime_type("image/jpeg"),
        );
        let response = app.client().post("/api/register").multipart(form).await;
        assert_eq!(response.status_code(), 201);
        // Names embed a millisecond timestamp; keep the two calls apart.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let photos: Vec<Option<String>> =
        sqlx::query_scalar("SELECT owner_photo FROM members ORDER BY email")
            .fetch_all(&app.pool)
            .await
            .unwrap();
    let photos: Vec<String> = photos.into_iter().flatten().collect();
    assert_eq!(photos.len(), 2);
    assert_ne!(photos[0], photos[1]);

    for photo in &photos {
        let name = photo.strip_prefix("/uploads/").unwrap();
        let bytes = tokio::fs::read(app.upload_dir.join(name)).await.unwrap();
        assert_eq!(bytes, b"identical photo bytes");
    }
}

#[tokio::test]
async fn test_register_defaults_applied_to_optional_fields() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/register")
        .multipart(valid_form("defaults@example.com"))
        .await;
    assert_eq!(response.status_code(), 201);

    let (proof_type, payment_method, fee, agree): (String, String, rust_decimal::Decimal, bool) =
        sqlx::query_as(
            "SELECT ownership_proof_type::text, payment_method::text, membership_fee, agree_data_use \
             FROM members WHERE email = 'defaults@example.com'",
        )
        .fetch_one(&app.pool)
        .await
        .unwrap();

    assert_eq!(proof_type, "LD_TAX_RECEIPT");
    assert_eq!(payment_method, "BKASH");
    assert_eq!(fee, rust_decimal::Decimal::from(1020));
    assert!(!agree);
}

#[tokio::test]
async fn test_register_unknown_enum_value_is_rejected_by_store() {
    let app = setup_test_app().await;

    let form = valid_form("badenum@example.com").add_text("paymentMethod", "CARRIER_PIGEON");
    let response = app.client().post("/api/register").multipart(form).await;

    // Enum enforcement lives in the store; it surfaces as a server fault.
    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Server error");
    assert!(body["detail"].as_str().is_some());
    assert_eq!(app.member_count().await, 0);
}

#[tokio::test]
async fn test_register_oversized_file_fails() {
    let app = setup_test_app().await;

    // One byte over the 10 MiB per-file ceiling.
    let big = vec![0u8; 10 * 1024 * 1024 + 1];
    let form = valid_form("big@example.com").add_part(
        "ownerPhoto",
        axum_test::multipart::Part::bytes(big)
            .file_name("huge.bin")
            .mime_type("application/octet-stream"),
    );
    let response = app.client().post("/api/register").multipart(form).await;

    assert_eq!(response.status_code(), 500);
    assert_eq!(app.member_count().await, 0);
}

#[tokio::test]
async fn test_register_non_multipart_body_is_server_fault() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/register")
        .text("this is not a multipart body")
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Server error");
    assert_eq!(app.member_count().await, 0);
}

#[tokio::test]
async fn test_health_check() {
    let app = setup_test_app().await;

    let response = app.client().get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}
