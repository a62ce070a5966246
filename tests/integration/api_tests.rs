//! API integration tests

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated client
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create a tool, returning its id
async fn create_tool(client: &Client, token: &str, name: &str) -> i64 {
    let response = client
        .post(format!("{}/tools", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": name, "condition": "good" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No tool ID")
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
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["login"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_list_tools_includes_status() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/tools", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let tools = body.as_array().expect("Expected an array");
    for tool in tools {
        assert!(tool["status"].is_string());
    }
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_tool() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let tool_id = create_tool(&client, &token, "Test angle grinder").await;

    let response = client
        .get(format!("{}/tools/{}", BASE_URL, tool_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "available");

    let response = client
        .delete(format!("{}/tools/{}", BASE_URL, tool_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_booking_rejects_bad_dates() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let tool_id = create_tool(&client, &token, "Test drill (dates)").await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "tool_id": tool_id,
            "start_date": "2027-03-10T00:00:00Z",
            "end_date": "2027-03-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_overlapping_booking_conflicts() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let tool_id = create_tool(&client, &token, "Test drill (conflict)").await;

    // Seed an approved booking for [Mar 1, Mar 10).
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "tool_id": tool_id,
            "start_date": "2027-03-01T00:00:00Z",
            "end_date": "2027-03-10T00:00:00Z",
            "status": "approved"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // [Mar 5, Mar 8) collides.
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "tool_id": tool_id,
            "start_date": "2027-03-05T00:00:00Z",
            "end_date": "2027-03-08T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // [Mar 10, Mar 15) touches the end and is accepted.
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "tool_id": tool_id,
            "start_date": "2027-03-10T00:00:00Z",
            "end_date": "2027-03-15T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_cancelled_booking_frees_the_interval() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let tool_id = create_tool(&client, &token, "Test drill (cancel)").await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "tool_id": tool_id,
            "start_date": "2027-04-01T00:00:00Z",
            "end_date": "2027-04-10T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let booking_id = body["id"].as_i64().expect("No booking ID");

    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, booking_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // The same interval is free again.
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "tool_id": tool_id,
            "start_date": "2027-04-01T00:00:00Z",
            "end_date": "2027-04-10T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_maintenance_blocks_booking() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let tool_id = create_tool(&client, &token, "Test drill (maintenance)").await;

    let response = client
        .post(format!("{}/maintenances", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "tool_id": tool_id,
            "description": "Chuck replacement",
            "start_date": "2027-05-01T00:00:00Z",
            "end_date": "2027-05-03T00:00:00Z",
            "status": "scheduled"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "tool_id": tool_id,
            "start_date": "2027-05-02T00:00:00Z",
            "end_date": "2027-05-04T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_checkout_and_checkin() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let tool_id = create_tool(&client, &token, "Test sander (checkout)").await;

    let response = client
        .post(format!("{}/tools/{}/checkout", BASE_URL, tool_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "active");

    // The tool now reports in_use with the active booking id.
    let response = client
        .get(format!("{}/tools/{}", BASE_URL, tool_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let tool: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(tool["status"], "in_use");
    assert_eq!(tool["active_booking"], body["id"]);

    // A second walk-up checkout is refused.
    let response = client
        .post(format!("{}/tools/{}/checkout", BASE_URL, tool_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let response = client
        .post(format!("{}/tools/{}/checkin", BASE_URL, tool_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
#[ignore]
async fn test_spare_part_stock_guard() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let tool_id = create_tool(&client, &token, "Test saw (parts)").await;

    let response = client
        .post(format!("{}/spare-parts", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "Saw blade",
            "reference": format!("SB-{}", tool_id),
            "quantity": 2
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let part: Value = response.json().await.expect("Failed to parse response");
    let part_id = part["id"].as_i64().expect("No part ID");

    let response = client
        .post(format!("{}/maintenances", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "tool_id": tool_id,
            "description": "Blade swap",
            "start_date": "2027-06-01T00:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let maintenance: Value = response.json().await.expect("Failed to parse response");
    let maintenance_id = maintenance["id"].as_i64().expect("No maintenance ID");

    // More than in stock: refused, stock untouched.
    let response = client
        .post(format!("{}/maintenances/{}/parts", BASE_URL, maintenance_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "spare_part_id": part_id, "quantity": 5 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    let response = client
        .get(format!("{}/spare-parts/{}", BASE_URL, part_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let part: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(part["quantity"], 2);

    // Within stock: accepted.
    let response = client
        .post(format!("{}/maintenances/{}/parts", BASE_URL, maintenance_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "spare_part_id": part_id, "quantity": 1 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
}
