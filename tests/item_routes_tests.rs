use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

use cartd::db::GroceryStore;
use cartd::router::{CartState, cartd_router};

struct TestApp {
    app: Router,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let base = self.db_path.display().to_string();
        for suffix in ["", "-wal", "-shm"] {
            let _ = fs::remove_file(format!("{base}{suffix}"));
        }
    }
}

async fn spawn_app(tag: &str) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut db_path = std::env::temp_dir();
    db_path.push(format!(
        "cartd-items-{tag}-{}-{nanos}.sqlite",
        std::process::id()
    ));

    let store = GroceryStore::connect(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("store init failed");
    TestApp {
        app: cartd_router(CartState::new(store)),
        db_path,
    }
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(builder.body(body).expect("failed to build request"))
        .await
        .expect("request failed");
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("response body was not json")
    };
    (status, json)
}

async fn create_list(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, "POST", "/grocery_list", Some(json!({"name": name}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

async fn add_item(app: &Router, list_id: i64, name: &str, purchased: bool) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        &format!("/grocery_list/{list_id}/items"),
        Some(json!({"name": name, "purchased": purchased})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn missing_list_is_404_before_any_item_logic() {
    let t = spawn_app("missing-list").await;

    let (status, _) = send(&t.app, "GET", "/grocery_list/999/items", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &t.app,
        "POST",
        "/grocery_list/999/items",
        Some(json!({"name": "Milk"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // invalid selection criteria must not mask the missing list
    let (status, body) = send(
        &t.app,
        "PATCH",
        "/grocery_list/999/items",
        Some(json!({"purchased": true})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Grocery list not found");

    let (status, _) = send(&t.app, "DELETE", "/grocery_list/999/items", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_list_id_is_bad_request() {
    let t = spawn_app("bad-id").await;
    let (status, body) = send(&t.app, "GET", "/grocery_list/abc/items", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid grocery list ID format");
}

#[tokio::test]
async fn add_item_defaults_to_unpurchased() {
    let t = spawn_app("add-default").await;
    let list_id = create_list(&t.app, "Produce").await;

    let (status, body) = send(
        &t.app,
        "POST",
        &format!("/grocery_list/{list_id}/items"),
        Some(json!({"name": "  Milk  "})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Milk");
    assert_eq!(body["data"]["purchased"], false);
    assert_eq!(body["data"]["groceryListId"], list_id);
}

#[tokio::test]
async fn add_item_rejects_blank_name() {
    let t = spawn_app("add-blank").await;
    let list_id = create_list(&t.app, "Produce").await;
    let (status, body) = send(
        &t.app,
        "POST",
        &format!("/grocery_list/{list_id}/items"),
        Some(json!({"name": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn list_items_orders_by_id_and_scopes_envelope() {
    let t = spawn_app("list-items").await;
    let list_id = create_list(&t.app, "Produce").await;
    add_item(&t.app, list_id, "Apples", false).await;
    add_item(&t.app, list_id, "Milk", true).await;

    let (status, body) = send(&t.app, "GET", &format!("/grocery_list/{list_id}/items"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    assert_eq!(body["groceryListId"], list_id);
    let data = body["data"].as_array().unwrap();
    assert!(data[0]["id"].as_i64().unwrap() < data[1]["id"].as_i64().unwrap());
}

#[tokio::test]
async fn purchased_filter_restricts_results() {
    let t = spawn_app("filter").await;
    let list_id = create_list(&t.app, "Produce").await;
    add_item(&t.app, list_id, "Apples", true).await;
    add_item(&t.app, list_id, "Milk", false).await;

    let (_, body) = send(
        &t.app,
        "GET",
        &format!("/grocery_list/{list_id}/items?purchased=true"),
        None,
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Apples");

    let (_, body) = send(
        &t.app,
        "GET",
        &format!("/grocery_list/{list_id}/items?purchased=false"),
        None,
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Milk");
}

#[tokio::test]
async fn malformed_purchased_filter_is_bad_request() {
    let t = spawn_app("bad-filter").await;
    let list_id = create_list(&t.app, "Produce").await;
    let (status, _) = send(
        &t.app,
        "GET",
        &format!("/grocery_list/{list_id}/items?purchased=banana"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn bulk_update_mark_all_counts_every_item() {
    let t = spawn_app("mark-all").await;
    let list_id = create_list(&t.app, "Produce").await;
    add_item(&t.app, list_id, "Apples", false).await;
    add_item(&t.app, list_id, "Milk", false).await;
    add_item(&t.app, list_id, "Eggs", true).await;

    let (status, body) = send(
        &t.app,
        "PATCH",
        &format!("/grocery_list/{list_id}/items"),
        Some(json!({"purchased": true, "markAll": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedCount"], 3);

    let (_, body) = send(
        &t.app,
        "GET",
        &format!("/grocery_list/{list_id}/items?purchased=true"),
        None,
    )
    .await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn bulk_update_mark_all_wins_over_item_ids() {
    let t = spawn_app("mark-all-priority").await;
    let list_id = create_list(&t.app, "Produce").await;
    let apples = add_item(&t.app, list_id, "Apples", false).await;
    add_item(&t.app, list_id, "Milk", false).await;
    add_item(&t.app, list_id, "Eggs", false).await;

    let (status, body) = send(
        &t.app,
        "PATCH",
        &format!("/grocery_list/{list_id}/items"),
        Some(json!({"purchased": true, "markAll": true, "itemIds": [apples]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // markAll takes precedence, so every item is updated, not just Apples
    assert_eq!(body["updatedCount"], 3);

    let (_, body) = send(
        &t.app,
        "GET",
        &format!("/grocery_list/{list_id}/items?purchased=true"),
        None,
    )
    .await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn bulk_update_by_ids_marks_only_named_items() {
    let t = spawn_app("by-ids").await;
    let list_id = create_list(&t.app, "Produce").await;
    let apples = add_item(&t.app, list_id, "Apples", false).await;
    add_item(&t.app, list_id, "Milk", false).await;

    let (status, body) = send(
        &t.app,
        "PATCH",
        &format!("/grocery_list/{list_id}/items"),
        Some(json!({"purchased": true, "itemIds": [apples]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedCount"], 1);

    let (_, body) = send(
        &t.app,
        "GET",
        &format!("/grocery_list/{list_id}/items?purchased=true"),
        None,
    )
    .await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Apples");
}

#[tokio::test]
async fn bulk_update_ignores_items_from_other_lists() {
    let t = spawn_app("foreign-ids").await;
    let mine = create_list(&t.app, "Mine").await;
    let other = create_list(&t.app, "Other").await;
    let foreign = add_item(&t.app, other, "Eggs", false).await;

    let (status, body) = send(
        &t.app,
        "PATCH",
        &format!("/grocery_list/{mine}/items"),
        Some(json!({"purchased": true, "itemIds": [foreign]})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["updatedCount"], 0);

    // the foreign item is untouched
    let (_, body) = send(&t.app, "GET", &format!("/grocery_list/{other}/items"), None).await;
    assert_eq!(body["data"][0]["purchased"], false);
}

#[tokio::test]
async fn bulk_update_requires_mark_all_or_item_ids() {
    let t = spawn_app("no-criteria").await;
    let list_id = create_list(&t.app, "Produce").await;

    for payload in [
        json!({"purchased": true}),
        json!({"purchased": true, "itemIds": []}),
    ] {
        let (status, body) = send(
            &t.app,
            "PATCH",
            &format!("/grocery_list/{list_id}/items"),
            Some(payload),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Either set markAll to true or provide itemIds array"
        );
    }
}

#[tokio::test]
async fn bulk_update_rejects_non_boolean_purchased() {
    let t = spawn_app("bad-purchased").await;
    let list_id = create_list(&t.app, "Produce").await;
    let (status, body) = send(
        &t.app,
        "PATCH",
        &format!("/grocery_list/{list_id}/items"),
        Some(json!({"purchased": "yes", "markAll": true})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn bulk_delete_all_wins_over_other_criteria() {
    let t = spawn_app("delete-all").await;
    let list_id = create_list(&t.app, "Produce").await;
    let apples = add_item(&t.app, list_id, "Apples", false).await;
    add_item(&t.app, list_id, "Milk", true).await;

    let (status, body) = send(
        &t.app,
        "DELETE",
        &format!("/grocery_list/{list_id}/items?all=true&item_ids={apples}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 2);

    let (_, body) = send(&t.app, "GET", &format!("/grocery_list/{list_id}/items"), None).await;
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn bulk_delete_purchased_wins_over_item_ids() {
    let t = spawn_app("delete-purchased-priority").await;
    let list_id = create_list(&t.app, "Produce").await;
    add_item(&t.app, list_id, "Apples", true).await;
    add_item(&t.app, list_id, "Milk", true).await;
    let eggs = add_item(&t.app, list_id, "Eggs", false).await;

    let (status, body) = send(
        &t.app,
        "DELETE",
        &format!("/grocery_list/{list_id}/items?purchased=true&item_ids={eggs}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // purchased=true outranks item_ids, so Eggs survives
    assert_eq!(body["deletedCount"], 2);

    let (_, body) = send(&t.app, "GET", &format!("/grocery_list/{list_id}/items"), None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Eggs");
}

#[tokio::test]
async fn bulk_delete_purchased_leaves_the_rest() {
    let t = spawn_app("delete-purchased").await;
    let list_id = create_list(&t.app, "Produce").await;
    add_item(&t.app, list_id, "Apples", true).await;
    add_item(&t.app, list_id, "Milk", true).await;
    add_item(&t.app, list_id, "Eggs", false).await;

    let (status, body) = send(
        &t.app,
        "DELETE",
        &format!("/grocery_list/{list_id}/items?purchased=true"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 2);

    let (_, body) = send(&t.app, "GET", &format!("/grocery_list/{list_id}/items"), None).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "Eggs");
}

#[tokio::test]
async fn bulk_delete_by_ids_drops_non_numeric_tokens() {
    let t = spawn_app("delete-ids").await;
    let list_id = create_list(&t.app, "Produce").await;
    let apples = add_item(&t.app, list_id, "Apples", false).await;
    add_item(&t.app, list_id, "Milk", false).await;

    let (status, body) = send(
        &t.app,
        "DELETE",
        &format!("/grocery_list/{list_id}/items?item_ids=1x,{apples}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);

    // nothing numeric left after filtering -> validation error
    let (status, body) = send(
        &t.app,
        "DELETE",
        &format!("/grocery_list/{list_id}/items?item_ids=foo,bar"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No valid item IDs provided");
}

#[tokio::test]
async fn bulk_delete_requires_a_criterion() {
    let t = spawn_app("delete-none").await;
    let list_id = create_list(&t.app, "Produce").await;
    let (status, body) = send(
        &t.app,
        "DELETE",
        &format!("/grocery_list/{list_id}/items"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Specify deletion criteria: all=true, purchased=true, or item_ids=1,2,3"
    );
}

#[tokio::test]
async fn bulk_delete_counts_only_rows_in_the_list() {
    let t = spawn_app("delete-foreign").await;
    let mine = create_list(&t.app, "Mine").await;
    let other = create_list(&t.app, "Other").await;
    let foreign = add_item(&t.app, other, "Eggs", false).await;

    let (status, body) = send(
        &t.app,
        "DELETE",
        &format!("/grocery_list/{mine}/items?item_ids={foreign}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 0);

    let (_, body) = send(&t.app, "GET", &format!("/grocery_list/{other}/items"), None).await;
    assert_eq!(body["count"], 1);
}
