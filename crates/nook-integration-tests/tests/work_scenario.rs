//! Integration test: the "Work" tab walkthrough.
//!
//! 1. Create tab "Work"
//! 2. Create top-level notes A ("Hello") and B ("World")
//! 3. Move B before A
//! 4. Delete A
//! 5. Check ordering, revisions and events at every step
//!
//! Everything goes through `NotesClient` with raw JSON requests, the same
//! shape a front end sends.

use std::sync::Arc;

use nook_service::{NotesClient, NotesService, ServiceOptions};
use nook_types::NotesEvent;
use serde_json::{json, Value};

fn client() -> NotesClient {
    let service = NotesService::open_memory(ServiceOptions::default()).expect("open service");
    NotesClient::new(Arc::new(service))
}

async fn ok(client: &NotesClient, request: Value) -> Value {
    let response = client.invoke(request.clone()).await;
    assert!(response.ok, "{request} failed: {:?}", response.error);
    response.result.unwrap_or(Value::Null)
}

fn ids(children: &Value) -> Vec<String> {
    children
        .as_array()
        .expect("array")
        .iter()
        .map(|n| n["id"].as_str().expect("id").to_string())
        .collect()
}

#[tokio::test]
async fn work_tab_create_move_delete() {
    let client = client();

    // =========================================================
    // Step 1: tab
    // =========================================================
    let work = ok(&client, json!({"command": "create_tab", "payload": {"name": "Work"}})).await;
    let tab_id = work["tabId"].as_str().expect("tabId").to_string();
    assert_eq!(work["rev"], 0);

    let mut sub = client.subscribe(tab_id.clone());

    // =========================================================
    // Step 2: two top-level notes
    // =========================================================
    let a = ok(
        &client,
        json!({"command": "create_note", "payload": {"tabId": tab_id, "text": "Hello"}}),
    )
    .await;
    let b = ok(
        &client,
        json!({"command": "create_note", "payload": {"tabId": tab_id, "text": "World"}}),
    )
    .await;
    let k1 = a["orderKey"].as_str().expect("key").to_string();
    let k2 = b["orderKey"].as_str().expect("key").to_string();
    assert!(k2 > k1, "{k2} should sort after {k1}");
    assert_eq!(a["tabId"], tab_id.as_str());

    // exactly one event per create, carrying the new revision
    assert_eq!(
        sub.recv().await,
        Some(NotesEvent::RevisionBump { tab_id: tab_id.clone(), rev: 1 })
    );
    assert_eq!(
        sub.recv().await,
        Some(NotesEvent::RevisionBump { tab_id: tab_id.clone(), rev: 2 })
    );
    assert_eq!(sub.try_recv(), None);

    // =========================================================
    // Step 3: move B before A
    // =========================================================
    let moved = ok(
        &client,
        json!({"command": "move_note", "payload": {"noteId": b["noteId"], "beforeId": a["noteId"]}}),
    )
    .await;
    let k3 = moved["orderKey"].as_str().expect("key").to_string();
    assert!(k3 < k1, "{k3} should sort before {k1}");
    assert_eq!(moved["parentId"], Value::Null);

    let children = ok(
        &client,
        json!({"command": "list_children", "payload": {"tabId": tab_id}}),
    )
    .await;
    assert_eq!(
        ids(&children),
        [b["noteId"].as_str().expect("id"), a["noteId"].as_str().expect("id")]
    );

    // =========================================================
    // Step 4: delete A
    // =========================================================
    let deleted = ok(
        &client,
        json!({"command": "delete_note", "payload": {"noteId": a["noteId"]}}),
    )
    .await;
    assert_eq!(deleted["deleted"], json!([a["noteId"]]));

    let children = ok(
        &client,
        json!({"command": "list_children", "payload": {"tabId": tab_id, "parentId": null}}),
    )
    .await;
    assert_eq!(ids(&children), [b["noteId"].as_str().expect("id")]);

    // =========================================================
    // Step 5: revision trail
    // =========================================================
    let tabs = ok(&client, json!({"command": "list_tabs"})).await;
    let work = tabs
        .as_array()
        .expect("array")
        .iter()
        .find(|t| t["tabId"] == tab_id.as_str())
        .expect("work tab");
    assert_eq!(work["rev"], 4);

    assert_eq!(
        sub.recv().await,
        Some(NotesEvent::RevisionBump { tab_id: tab_id.clone(), rev: 3 })
    );
    assert_eq!(
        sub.recv().await,
        Some(NotesEvent::RevisionBump { tab_id, rev: 4 })
    );
}

#[tokio::test]
async fn get_note_is_idempotent() {
    let client = client();
    let created = ok(
        &client,
        json!({"command": "create_note", "payload": {"text": "Title\nbody", "html": "<b>Title</b>"}}),
    )
    .await;

    let request = json!({"command": "get_note", "payload": {"noteId": created["noteId"]}});
    let first = ok(&client, request.clone()).await;
    let second = ok(&client, request).await;
    assert_eq!(first, second);
    assert_eq!(first["text"], "Title\nbody");
    assert_eq!(first["html"], "<b>Title</b>");
    assert_eq!(first["note"]["title"], "Title");

    let missing = ok(
        &client,
        json!({"command": "get_note", "payload": {"noteId": "ghost"}}),
    )
    .await;
    assert_eq!(missing, Value::Null);
}

#[tokio::test]
async fn cycle_move_leaves_note_untouched() {
    let client = client();
    let parent = ok(&client, json!({"command": "create_note", "payload": {"text": "p"}})).await;
    let child = ok(
        &client,
        json!({"command": "create_note", "payload": {"parentId": parent["noteId"], "text": "c"}}),
    )
    .await;

    let before = ok(
        &client,
        json!({"command": "get_note", "payload": {"noteId": parent["noteId"]}}),
    )
    .await;

    let response = client
        .invoke(json!({
            "command": "move_note",
            "payload": {"noteId": parent["noteId"], "parentId": child["noteId"]}
        }))
        .await;
    assert!(!response.ok);
    assert!(response
        .error
        .expect("error")
        .starts_with("invariant violation"));

    let after = ok(
        &client,
        json!({"command": "get_note", "payload": {"noteId": parent["noteId"]}}),
    )
    .await;
    assert_eq!(before, after);
    assert_eq!(after["note"]["parentId"], Value::Null);
}

#[tokio::test]
async fn errors_are_readable_strings() {
    let client = client();
    let cases = [
        (
            json!({"command": "update_note_text", "payload": {"noteId": "ghost", "text": ""}}),
            "not found: note 'ghost'",
        ),
        (
            json!({"command": "delete_tab", "payload": {"tabId": "ghost"}}),
            "not found: tab 'ghost'",
        ),
    ];
    for (request, expected) in cases {
        let response = client.invoke(request).await;
        assert!(!response.ok);
        assert_eq!(response.error.as_deref(), Some(expected));
        assert_eq!(response.result, None);
    }
}
