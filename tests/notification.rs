mod common;

use common::{register_user, spawn_app};
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_creates_a_welcome_notification() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (token, user_id) = register_user(&client, &base, "alice", "secret1").await;

    let response = client
        .get(format!("{base}/api/notification/user/{user_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send list notifications request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse notifications response JSON");

    let notifications = body.as_array().expect("Expected an array");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["type"].as_str(), Some("welcome"));
    assert_eq!(notifications[0]["status"].as_str(), Some("pending"));
    assert_eq!(
        notifications[0]["message"].as_str(),
        Some("Welcome to Lavka Shop!")
    );
    assert!(notifications[0]["processedAt"].is_null());
}

#[tokio::test]
async fn test_login_adds_a_login_notification_newest_first() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (token, user_id) = register_user(&client, &base, "alice", "secret1").await;

    let response = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "username": "alice", "password": "secret1" }))
        .send()
        .await
        .expect("Failed to send login request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{base}/api/notification/user/{user_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send list notifications request");

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse notifications response JSON");

    let notifications = body.as_array().expect("Expected an array");
    assert_eq!(notifications.len(), 2);
    // Newest first
    assert_eq!(notifications[0]["type"].as_str(), Some("login"));
    assert_eq!(notifications[1]["type"].as_str(), Some("welcome"));
}

#[tokio::test]
async fn test_mark_read_is_idempotent() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (token, user_id) = register_user(&client, &base, "alice", "secret1").await;

    let response = client
        .get(format!("{base}/api/notification/user/{user_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send list notifications request");
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse notifications response JSON");
    let notification_id = body[0]["id"].as_i64().expect("Notification id missing");

    // Step 1: Mark it read
    let response = client
        .put(format!("{base}/api/notification/{notification_id}/mark-read"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send mark-read request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse mark-read response JSON");
    assert_eq!(body["status"].as_str(), Some("read"));
    assert!(body["processedAt"].as_str().is_some());

    // Step 2: Marking again keeps it read with a non-null timestamp
    let response = client
        .put(format!("{base}/api/notification/{notification_id}/mark-read"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send mark-read request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse mark-read response JSON");
    assert_eq!(body["status"].as_str(), Some("read"));
    assert!(body["processedAt"].as_str().is_some());
}

#[tokio::test]
async fn test_unread_listing_excludes_read_notifications() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (token, user_id) = register_user(&client, &base, "alice", "secret1").await;

    // Step 1: Login to get a second notification
    client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "username": "alice", "password": "secret1" }))
        .send()
        .await
        .expect("Failed to send login request");

    let response = client
        .get(format!("{base}/api/notification/user/{user_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send list notifications request");
    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse notifications response JSON");
    let first_id = body[0]["id"].as_i64().expect("Notification id missing");

    // Step 2: Read one of the two
    client
        .put(format!("{base}/api/notification/{first_id}/mark-read"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send mark-read request");

    // Step 3: Only the other one is still unread
    let response = client
        .get(format!("{base}/api/notification/user/{user_id}/unread"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send unread request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse unread response JSON");
    let unread = body.as_array().expect("Expected an array");
    assert_eq!(unread.len(), 1);
    assert_ne!(unread[0]["id"].as_i64(), Some(first_id));
}

#[tokio::test]
async fn test_create_notification_requires_an_existing_user() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (token, _) = register_user(&client, &base, "alice", "secret1").await;

    let response = client
        .post(format!("{base}/api/notification"))
        .bearer_auth(&token)
        .json(&json!({
            "userId": 9999,
            "type": "system_notification",
            "message": "Scheduled maintenance tonight"
        }))
        .send()
        .await
        .expect("Failed to send create notification request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse create notification response JSON");
    assert_eq!(body["error"].as_str(), Some("User not found"));
}

#[tokio::test]
async fn test_notification_create_update_delete() {
    let base = spawn_app().await;
    let client = reqwest::Client::new();

    let (token, user_id) = register_user(&client, &base, "alice", "secret1").await;

    // Step 1: Create an order_placed notification
    let response = client
        .post(format!("{base}/api/notification"))
        .bearer_auth(&token)
        .json(&json!({
            "userId": user_id,
            "type": "order_placed",
            "message": "Your order is on its way"
        }))
        .send()
        .await
        .expect("Failed to send create notification request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let created = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse create notification response JSON");
    let notification_id = created["id"].as_i64().expect("Notification id missing");
    assert_eq!(created["status"].as_str(), Some("pending"));

    // Step 2: Move it to sent, which leaves processedAt untouched
    let response = client
        .put(format!("{base}/api/notification/{notification_id}"))
        .bearer_auth(&token)
        .json(&json!({ "status": "sent" }))
        .send()
        .await
        .expect("Failed to send update notification request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse update notification response JSON");
    assert_eq!(body["status"].as_str(), Some("sent"));
    assert!(body["processedAt"].is_null());

    // Step 3: Moving to read stamps processedAt
    let response = client
        .put(format!("{base}/api/notification/{notification_id}"))
        .bearer_auth(&token)
        .json(&json!({ "status": "read" }))
        .send()
        .await
        .expect("Failed to send update notification request");

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse update notification response JSON");
    assert_eq!(body["status"].as_str(), Some("read"));
    assert!(body["processedAt"].as_str().is_some());

    // Step 4: Delete, then it is gone
    let response = client
        .delete(format!("{base}/api/notification/{notification_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send delete notification request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client
        .get(format!("{base}/api/notification/{notification_id}"))
        .bearer_auth(&token)
        .send()
        .await
        .expect("Failed to send get notification request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse get notification response JSON");
    assert_eq!(body["error"].as_str(), Some("Notification not found"));
}
