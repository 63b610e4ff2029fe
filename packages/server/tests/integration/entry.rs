use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn entries_are_listed_in_id_order() {
    let app = TestApp::spawn().await;
    let admin = app.seed_entries(3).await;

    let res = app.get_with_token(routes::ENTRIES, &admin).await;

    assert_eq!(res.status, 200);
    let ids: Vec<i64> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn get_unknown_entry_is_not_found() {
    let app = TestApp::spawn().await;
    let admin = app.seed_entries(1).await;

    let res = app.get_with_token(&routes::entry(99), &admin).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn entry_id_defaults_to_next_free() {
    let app = TestApp::spawn().await;
    let admin = app.seed_entries(2).await;

    let res = app
        .post_with_token(
            routes::ENTRIES,
            &json!({"name": "Sweden", "flag_code": "SE", "artist": "KAJ"}),
            &admin,
        )
        .await;

    assert_eq!(res.status, 201, "{}", res.text);
    assert_eq!(res.body["id"], 3);
    assert_eq!(res.body["flag_code"], "se");
    assert_eq!(res.body["artist"], "KAJ");
}

#[tokio::test]
async fn duplicate_entry_id_conflicts() {
    let app = TestApp::spawn().await;
    let admin = app.seed_entries(1).await;

    let res = app
        .post_with_token(
            routes::ENTRIES,
            &json!({"id": 1, "name": "Again", "flag_code": "ag"}),
            &admin,
        )
        .await;

    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");
}

#[tokio::test]
async fn only_admin_creates_entries() {
    let app = TestApp::spawn().await;
    let token = app.login("Alice").await;

    let res = app
        .post_with_token(
            routes::ENTRIES,
            &json!({"name": "Sweden", "flag_code": "se"}),
            &token,
        )
        .await;

    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn entries_are_locked_once_play_starts() {
    let app = TestApp::spawn().await;
    let admin = app.seed_entries(2).await;
    let alice = app.login("Alice").await;
    assert_eq!(app.predict(&alice, 1, 1).await.status, 200);

    let res = app
        .post_with_token(
            routes::ENTRIES,
            &json!({"name": "Late", "flag_code": "lt"}),
            &admin,
        )
        .await;

    assert_eq!(res.status, 409);
}

#[tokio::test]
async fn next_free_id_past_the_largest_is_a_conflict() {
    let app = TestApp::spawn().await;
    let admin = app.seed_entries(0).await;

    let res = app
        .post_with_token(
            routes::ENTRIES,
            &json!({"id": i32::MAX, "name": "Last", "flag_code": "ls"}),
            &admin,
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text);

    let res = app
        .post_with_token(
            routes::ENTRIES,
            &json!({"name": "Overflow", "flag_code": "of"}),
            &admin,
        )
        .await;

    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.body["code"], "CONFLICT");

    let list = app.get_with_token(routes::ENTRIES, &admin).await;
    assert_eq!(list.body.as_array().unwrap().len(), 1);
}
