use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set, SqlErr};

use podium_server::entity::prediction;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn assign_then_list() {
    let app = TestApp::spawn().await;
    app.seed_entries(3).await;
    let alice = app.login("Alice").await;

    let res = app.predict(&alice, 2, 1).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["entry_id"], 2);
    assert_eq!(res.body["rank"], 1);
    assert!(res.body["evicted_entry"].is_null());

    let list = app.get_with_token(routes::PREDICTIONS, &alice).await;
    assert_eq!(list.pairs(), vec![(2, 1)]);
    assert_eq!(list.body["data"][0]["entry_name"], "Entry 2");
    assert!(list.body["data"][0]["points"].is_null());
    assert_eq!(list.body["total_points"], 0);
}

#[tokio::test]
async fn taking_a_rank_evicts_its_holder() {
    let app = TestApp::spawn().await;
    app.seed_entries(3).await;
    let alice = app.login("Alice").await;
    assert_eq!(app.predict(&alice, 1, 1).await.status, 200);

    let res = app.predict(&alice, 2, 1).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["evicted_entry"], 1);
    assert_eq!(app.my_predictions(&alice).await, vec![(2, 1)]);
}

#[tokio::test]
async fn reassigning_moves_the_single_prediction() {
    let app = TestApp::spawn().await;
    app.seed_entries(3).await;
    let alice = app.login("Alice").await;
    assert_eq!(app.predict(&alice, 1, 1).await.status, 200);

    let res = app.predict(&alice, 1, 3).await;

    assert_eq!(res.status, 200);
    assert!(res.body["evicted_entry"].is_null());
    assert_eq!(app.my_predictions(&alice).await, vec![(1, 3)]);
    assert_eq!(prediction::Entity::find().count(&app.db).await.unwrap(), 1);
}

#[tokio::test]
async fn reassigning_the_same_rank_is_a_no_op() {
    let app = TestApp::spawn().await;
    app.seed_entries(2).await;
    let alice = app.login("Alice").await;
    assert_eq!(app.predict(&alice, 1, 2).await.status, 200);

    let res = app.predict(&alice, 1, 2).await;

    assert_eq!(res.status, 200);
    assert!(res.body["evicted_entry"].is_null());
    assert_eq!(app.my_predictions(&alice).await, vec![(1, 2)]);
}

#[tokio::test]
async fn users_do_not_interfere() {
    let app = TestApp::spawn().await;
    app.seed_entries(3).await;
    let alice = app.login("Alice").await;
    let bob = app.login("Bob").await;

    assert_eq!(app.predict(&alice, 1, 1).await.status, 200);
    let res = app.predict(&bob, 2, 1).await;

    assert!(res.body["evicted_entry"].is_null());
    assert_eq!(app.my_predictions(&alice).await, vec![(1, 1)]);
    assert_eq!(app.my_predictions(&bob).await, vec![(2, 1)]);
}

#[tokio::test]
async fn ranks_outside_the_entry_count_are_rejected() {
    let app = TestApp::spawn().await;
    app.seed_entries(3).await;
    let alice = app.login("Alice").await;

    for rank in [0, 4, -1] {
        let res = app.predict(&alice, 1, rank).await;
        assert_eq!(res.status, 400, "rank {rank}: {}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
    assert!(app.my_predictions(&alice).await.is_empty());
}

#[tokio::test]
async fn unknown_entry_is_not_found() {
    let app = TestApp::spawn().await;
    app.seed_entries(3).await;
    let alice = app.login("Alice").await;

    let res = app.predict(&alice, 42, 1).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn assign_requires_a_token() {
    let app = TestApp::spawn().await;
    app.seed_entries(1).await;

    let res = app
        .client
        .put(format!("http://{}{}", app.addr, routes::prediction(1)))
        .json(&serde_json::json!({"rank": 1}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 401);
}

#[tokio::test]
async fn clear_leaves_the_entry_unranked() {
    let app = TestApp::spawn().await;
    app.seed_entries(2).await;
    let alice = app.login("Alice").await;
    assert_eq!(app.predict(&alice, 1, 1).await.status, 200);
    assert_eq!(app.predict(&alice, 2, 2).await.status, 200);

    let res = app.delete_with_token(&routes::prediction(1), &alice).await;
    assert_eq!(res.status, 204);
    assert_eq!(app.my_predictions(&alice).await, vec![(2, 2)]);

    let again = app.delete_with_token(&routes::prediction(1), &alice).await;
    assert_eq!(again.status, 404);
}

#[tokio::test]
async fn other_users_predictions_are_readable() {
    let app = TestApp::spawn().await;
    app.seed_entries(2).await;
    let alice_login = app.login_response("Alice").await;
    let alice = alice_login.body["token"].as_str().unwrap().to_string();
    let alice_id: uuid::Uuid = alice_login.body["user"]["id"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(app.predict(&alice, 2, 1).await.status, 200);
    let bob = app.login("Bob").await;

    let res = app
        .get_with_token(&routes::user_predictions(alice_id), &bob)
        .await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["user"]["name"], "Alice");
    assert_eq!(res.pairs(), vec![(2, 1)]);

    let missing = app
        .get_with_token(&routes::user_predictions(uuid::Uuid::nil()), &bob)
        .await;
    assert_eq!(missing.status, 404);
}

#[tokio::test]
async fn concurrent_writes_keep_ranks_unique() {
    let app = TestApp::spawn().await;
    app.seed_entries(4).await;
    let alice = app.login("Alice").await;

    let (a, b, c, d) = tokio::join!(
        app.predict(&alice, 1, 1),
        app.predict(&alice, 2, 1),
        app.predict(&alice, 3, 1),
        app.predict(&alice, 4, 1),
    );
    for res in [a, b, c, d] {
        assert!(res.status == 200 || res.status == 409, "{}", res.text);
    }

    let ranks: Vec<i64> = app
        .my_predictions(&alice)
        .await
        .into_iter()
        .map(|(_, r)| r)
        .collect();
    assert_eq!(ranks, vec![1]);
}

#[tokio::test]
async fn clear_racing_an_assignment_never_fails_internally() {
    let app = TestApp::spawn().await;
    app.seed_entries(3).await;
    let alice = app.login("Alice").await;
    assert_eq!(app.predict(&alice, 1, 1).await.status, 200);

    for round in 0..10 {
        let rank = round % 3 + 1;
        let clear_route = routes::prediction(1);
        let (assign, clear) = tokio::join!(
            app.predict(&alice, 1, rank),
            app.delete_with_token(&clear_route, &alice),
        );

        assert_eq!(assign.status, 200, "round {round}: {}", assign.text);
        assert!(
            clear.status == 204 || clear.status == 404,
            "round {round}: {}",
            clear.text
        );

        if app.my_predictions(&alice).await.is_empty() {
            assert_eq!(app.predict(&alice, 1, 1).await.status, 200);
        }
    }

    assert!(app.my_predictions(&alice).await.len() <= 1);
}

#[tokio::test]
async fn store_rejects_a_second_row_for_the_same_entry() {
    let app = TestApp::spawn().await;
    app.seed_entries(2).await;
    let login = app.login_response("Alice").await;
    let alice = login.body["token"].as_str().unwrap().to_string();
    let alice_id: uuid::Uuid = login.body["user"]["id"].as_str().unwrap().parse().unwrap();
    assert_eq!(app.predict(&alice, 1, 1).await.status, 200);

    let now = Utc::now();
    let err = prediction::ActiveModel {
        user_id: Set(alice_id),
        entry_id: Set(1),
        rank: Set(2),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&app.db)
    .await
    .unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
}
