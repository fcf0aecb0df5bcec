//! API integration tests
//!
//! These run against a live server with a fresh database:
//! `cargo test -- --ignored`

use chrono::Utc;
use reqwest::Client;
use serde_json::{json, Value};

use equiplend_server::models::{enums::UserRole, user::UserClaims};

const BASE_URL: &str = "http://localhost:8080/api/v1";
const JWT_SECRET: &str = "change-this-secret-in-production";

/// Mint a token the way the institution's identity provider would
fn make_token(user_id: i32, role: UserRole) -> String {
    let now = Utc::now().timestamp();
    let claims = UserClaims {
        sub: format!("user-{}", user_id),
        user_id,
        role,
        iat: now,
        exp: now + 3600,
    };
    claims.create_token(JWT_SECRET).expect("Failed to sign token")
}

fn admin_token() -> String {
    make_token(1, UserRole::Admin)
}

/// Create a borrower and return (id, token)
async fn create_borrower(client: &Client, login: &str) -> (i64, String) {
    let response = client
        .post(format!("{}/users", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token()))
        .json(&json!({
            "login": login,
            "display_name": "Test Borrower",
            "role": 2
        }))
        .send()
        .await
        .expect("Failed to create user");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse user");
    let id = body["id"].as_i64().expect("No user ID");
    let token = make_token(id as i32, UserRole::Borrower);
    (id, token)
}

/// Create one equipment unit and return its id
async fn create_equipment(client: &Client, inventory_number: &str) -> i64 {
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token()))
        .json(&json!({
            "name": "Test Notebook",
            "inventory_number": inventory_number,
            "brand": "Lenovo",
            "model": "T14"
        }))
        .send()
        .await
        .expect("Failed to create equipment");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse equipment");
    body["id"].as_i64().expect("No equipment ID")
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_micros())
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_borrower_cannot_create_equipment() {
    let client = Client::new();
    let token = make_token(999, UserRole::Borrower);

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Forbidden",
            "inventory_number": unique("NB-FORBIDDEN")
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 403);
}

#[tokio::test]
#[ignore]
async fn test_equipment_crud() {
    let client = Client::new();
    let token = admin_token();
    let number = unique("NB-CRUD");

    let id = create_equipment(&client, &number).await;

    // Duplicate inventory number is rejected
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": "Dup", "inventory_number": number }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // Update
    let response = client
        .put(format!("{}/equipment/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "location": "Room 42" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["location"], "Room 42");

    // Delete
    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_batch_create_reports_duplicates() {
    let client = Client::new();
    let token = admin_token();

    let existing = unique("NB-BATCH");
    create_equipment(&client, &existing).await;

    let fresh = unique("NB-FRESH");
    // [fresh, existing, existing]: 1 created, 2 rejected
    let response = client
        .post(format!("{}/equipment/batch", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Batch Notebook",
            "brand": "Dell",
            "inventory_numbers": [fresh, existing, existing]
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["created"], 1);
    assert_eq!(body["rejected"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore]
async fn test_reservation_lifecycle_to_loan() {
    let client = Client::new();
    let staff = admin_token();
    let (user_id, user_token) = create_borrower(&client, &unique("borrower")).await;
    let equipment_id = create_equipment(&client, &unique("NB-RES")).await;

    // Borrower creates a reservation
    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({
            "user_id": user_id,
            "equipment_id": equipment_id,
            "start_date": "2030-01-10",
            "end_date": "2030-01-20"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let reservation_id = body["id"].as_i64().expect("No reservation ID");
    assert_eq!(body["status"], 0);

    // approve -> ready -> convert
    for step in ["approve", "ready"] {
        let response = client
            .post(format!("{}/reservations/{}/{}", BASE_URL, reservation_id, step))
            .header("Authorization", format!("Bearer {}", staff))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success(), "step {} failed", step);
    }

    let response = client
        .post(format!("{}/reservations/{}/convert", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", staff))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    // Reservation completed, loan approved
    assert_eq!(body["reservation"]["status"], 3);
    assert_eq!(body["loan"]["status"], 1);

    // A completed reservation can no longer be cancelled
    let response = client
        .post(format!("{}/reservations/{}/cancel", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", staff))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);
}

#[tokio::test]
#[ignore]
async fn test_reservation_reject_requires_reason() {
    let client = Client::new();
    let staff = admin_token();
    let (user_id, user_token) = create_borrower(&client, &unique("rejectee")).await;
    let equipment_id = create_equipment(&client, &unique("NB-REJ")).await;

    let response = client
        .post(format!("{}/reservations", BASE_URL))
        .header("Authorization", format!("Bearer {}", user_token))
        .json(&json!({
            "user_id": user_id,
            "equipment_id": equipment_id,
            "start_date": "2030-02-01",
            "end_date": "2030-02-05"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let reservation_id = body["id"].as_i64().unwrap();

    // Blank reason is a validation error
    let response = client
        .post(format!("{}/reservations/{}/reject", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", staff))
        .json(&json!({ "reason": "" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    let response = client
        .post(format!("{}/reservations/{}/reject", BASE_URL, reservation_id))
        .header("Authorization", format!("Bearer {}", staff))
        .json(&json!({ "reason": "Out of term" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], 4);
}

#[tokio::test]
#[ignore]
async fn test_special_loan_conflict() {
    let client = Client::new();
    let staff = admin_token();
    let number = unique("NB-SPECIAL");

    let response = client
        .post(format!("{}/special-loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff))
        .json(&json!({
            "lecturer_name": "Dr. Example",
            "equipment_numbers": [number],
            "start_date": "2030-03-01",
            "end_date": "2030-03-10",
            "purpose": "Lab course"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Overlapping booking on the same number is blocked
    let response = client
        .post(format!("{}/special-loans", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff))
        .json(&json!({
            "lecturer_name": "Dr. Other",
            "equipment_numbers": [number],
            "start_date": "2030-03-10",
            "end_date": "2030-03-15"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // The check endpoint reports the conflict without creating
    let response = client
        .post(format!("{}/special-loans/check-conflicts", BASE_URL))
        .header("Authorization", format!("Bearer {}", staff))
        .json(&json!({
            "equipment_numbers": [number],
            "start_date": "2030-03-05",
            "end_date": "2030-03-06"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["has_conflict"], true);
}

#[tokio::test]
#[ignore]
async fn test_export_equipment_csv_has_bom() {
    let client = Client::new();

    let response = client
        .get(format!("{}/export/equipment.csv", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/csv"));

    let bytes = response.bytes().await.expect("Failed to read body");
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();

    let response = client
        .get(format!("{}/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", admin_token()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["equipment"]["ready"].is_number());
    assert!(body["loans"]["active"].is_number());
    assert!(body["pending_reservations"].is_number());
}
