//! Full-stack integration tests against a live database
//!
//! These run only when `TEST_DATABASE_URL` points at a Postgres
//! instance; without it each test returns early and passes. Emails are
//! randomized so repeated runs do not collide.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};
use serial_test::serial;

use common::{auth_header, test_server_with_pool, try_test_pool, unique_email};

#[tokio::test]
#[serial]
async fn test_register_login_me_flow() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    let server = test_server_with_pool(pool);
    let email = unique_email("flow");

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "name": "Flow User", "email": email, "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["email"], email);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let token = body["token"].as_str().unwrap().to_string();

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", auth_header(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["email"], email);
}

#[tokio::test]
#[serial]
async fn test_register_duplicate_email_conflicts() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    let server = test_server_with_pool(pool);
    let email = unique_email("dup");

    let payload = json!({ "name": "Dup", "email": email, "password": "password123" });
    let first = server.post("/api/auth/register").json(&payload).await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = server.post("/api/auth/register").json(&payload).await;
    assert_eq!(second.status_code(), StatusCode::CONFLICT);
}

#[tokio::test]
#[serial]
async fn test_login_wrong_password_rejected() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    let server = test_server_with_pool(pool);
    let email = unique_email("wrongpw");

    server
        .post("/api/auth/register")
        .json(&json!({ "name": "W", "email": email, "password": "password123" }))
        .await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "different456" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], "Invalid email or password");
}

async fn register_user(server: &axum_test::TestServer, prefix: &str) -> (String, String) {
    let email = unique_email(prefix);
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "name": prefix, "email": email, "password": "password123" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_str().unwrap().to_string();
    (token, user_id)
}

#[tokio::test]
#[serial]
async fn test_notes_crud_and_ownership() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    let server = test_server_with_pool(pool);
    let (owner_token, _) = register_user(&server, "owner").await;
    let (other_token, _) = register_user(&server, "other").await;

    let response = server
        .post("/api/notes")
        .add_header("Authorization", auth_header(&owner_token))
        .json(&json!({ "title": "Plan", "content": "Ship it", "tags": ["work"] }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let note: Value = response.json();
    let note_id = note["id"].as_str().unwrap().to_string();
    assert_eq!(note["tags"][0], "work");

    // The owner sees it in their list.
    let response = server
        .get("/api/notes")
        .add_header("Authorization", auth_header(&owner_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["count"].as_u64().unwrap() >= 1);

    // Someone else cannot read, update, or delete it.
    let response = server
        .get(&format!("/api/notes/{note_id}"))
        .add_header("Authorization", auth_header(&other_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .put(&format!("/api/notes/{note_id}"))
        .add_header("Authorization", auth_header(&other_token))
        .json(&json!({ "title": "Hijacked" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // A missing note is 404 before any ownership verdict.
    let response = server
        .get(&format!("/api/notes/{}", uuid::Uuid::new_v4()))
        .add_header("Authorization", auth_header(&other_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // Partial update leaves the other fields alone.
    let response = server
        .put(&format!("/api/notes/{note_id}"))
        .add_header("Authorization", auth_header(&owner_token))
        .json(&json!({ "title": "Plan v2" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let note: Value = response.json();
    assert_eq!(note["title"], "Plan v2");
    assert_eq!(note["content"], "Ship it");

    let response = server
        .delete(&format!("/api/notes/{note_id}"))
        .add_header("Authorization", auth_header(&owner_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get(&format!("/api/notes/{note_id}"))
        .add_header("Authorization", auth_header(&owner_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[serial]
async fn test_tasks_assignment_and_creator_rights() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    let server = test_server_with_pool(pool);
    let (creator_token, _) = register_user(&server, "creator").await;
    let (assignee_token, assignee_id) = register_user(&server, "assignee").await;

    let response = server
        .post("/api/tasks")
        .add_header("Authorization", auth_header(&creator_token))
        .json(&json!({ "title": "Review PR", "assigned_to": assignee_id }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let task: Value = response.json();
    let task_id = task["id"].as_str().unwrap().to_string();
    assert_eq!(task["status"], "pending");

    // The task shows up on the assignee's list, not the creator's.
    let response = server
        .get("/api/tasks")
        .add_header("Authorization", auth_header(&assignee_token))
        .await;
    let body: Value = response.json();
    assert!(body["count"].as_u64().unwrap() >= 1);

    // Only the creator may update or delete.
    let response = server
        .put(&format!("/api/tasks/{task_id}"))
        .add_header("Authorization", auth_header(&assignee_token))
        .json(&json!({ "status": "completed" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let response = server
        .put(&format!("/api/tasks/{task_id}"))
        .add_header("Authorization", auth_header(&creator_token))
        .json(&json!({ "status": "completed" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let task: Value = response.json();
    assert_eq!(task["status"], "completed");

    let response = server
        .delete(&format!("/api/tasks/{task_id}"))
        .add_header("Authorization", auth_header(&creator_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
#[serial]
async fn test_file_upload_and_static_serving() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    let upload_dir = tempfile::tempdir().expect("Failed to create temp dir");
    std::env::set_var("UPLOAD_DIR", upload_dir.path());

    let server = test_server_with_pool(pool);
    let (token, _) = register_user(&server, "uploader").await;

    let form = axum_test::multipart::MultipartForm::new().add_part(
        "file",
        axum_test::multipart::Part::bytes(b"\x89PNG\r\n\x1a\n0000".to_vec())
            .file_name("avatar.png")
            .mime_type("image/png"),
    );
    let response = server
        .post("/api/files")
        .add_header("Authorization", auth_header(&token))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["original_name"], "avatar.png");
    assert_eq!(body["file_type"], "image/png");
    let url = body["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"));

    // The stored bytes are served back at the recorded URL.
    let response = server.get(&url).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Disallowed content types never reach storage.
    let form = axum_test::multipart::MultipartForm::new().add_part(
        "file",
        axum_test::multipart::Part::bytes(b"#!/bin/sh".to_vec())
            .file_name("script.sh")
            .mime_type("application/x-sh"),
    );
    let response = server
        .post("/api/files")
        .add_header("Authorization", auth_header(&token))
        .multipart(form)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    std::env::remove_var("UPLOAD_DIR");
}

#[tokio::test]
#[serial]
async fn test_chat_message_persisted_and_delivered() {
    let Some(pool) = try_test_pool().await else {
        return;
    };
    let server = test_server_with_pool(pool);
    let (_, sender_id) = register_user(&server, "chatter").await;

    let mut sender = server.get_websocket("/ws").await.into_websocket().await;
    let mut listener = server.get_websocket("/ws").await.into_websocket().await;

    sender
        .send_json(&json!({ "event": "joinRoom", "data": { "room": "standup" } }))
        .await;
    let ack: Value = sender.receive_json().await;
    assert_eq!(ack["event"], "joinedRoom");

    listener
        .send_json(&json!({ "event": "joinRoom", "data": { "room": "standup" } }))
        .await;
    let ack: Value = listener.receive_json().await;
    assert_eq!(ack["event"], "joinedRoom");

    sender
        .send_json(&json!({
            "event": "sendMessage",
            "data": { "sender": sender_id, "content": "morning", "room": "standup" }
        }))
        .await;

    // Both room members get the resolved message.
    let frame: Value = listener.receive_json().await;
    assert_eq!(frame["event"], "newMessage");
    assert_eq!(frame["data"]["content"], "morning");
    assert_eq!(frame["data"]["room"], "standup");
    assert!(frame["data"]["sender"]["email"].as_str().is_some());

    let frame: Value = sender.receive_json().await;
    assert_eq!(frame["event"], "newMessage");
    assert_eq!(frame["data"]["content"], "morning");
}
