use serde_json::json;

use crate::common::{ADMIN, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn first_login_creates_the_identity() {
        let app = TestApp::spawn().await;

        let res = app.login_response("Alice").await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["token"].is_string());
        assert_eq!(res.body["user"]["name"], "Alice");
        assert_eq!(res.body["user"]["is_admin"], false);
        assert_eq!(res.body["created"], true);
    }

    #[tokio::test]
    async fn logging_in_again_resolves_the_same_identity() {
        let app = TestApp::spawn().await;

        let first = app.login_response("Alice").await;
        let second = app.login_response("Alice").await;

        assert_eq!(second.status, 200);
        assert_eq!(second.body["created"], false);
        assert_eq!(first.body["user"]["id"], second.body["user"]["id"]);

        let token = app.login("Bob").await;
        let users = app.get_with_token(routes::USERS, &token).await;
        assert_eq!(users.body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn admin_name_gets_the_admin_flag() {
        let app = TestApp::spawn().await;

        let res = app.login_response(ADMIN).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["user"]["is_admin"], true);
    }

    #[tokio::test]
    async fn admin_name_match_is_case_sensitive() {
        let app = TestApp::spawn().await;

        let res = app.login_response("admin").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["user"]["is_admin"], false);
    }

    #[tokio::test]
    async fn name_is_trimmed() {
        let app = TestApp::spawn().await;

        let res = app.login_response("  Alice  ").await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["user"]["name"], "Alice");
    }

    #[tokio::test]
    async fn empty_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.login_response("   ").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn overlong_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.login_response(&"x".repeat(65)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn malformed_body_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"username": "Alice"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn concurrent_first_logins_share_one_identity() {
        let app = TestApp::spawn().await;

        let (a, b) = tokio::join!(app.login_response("Carol"), app.login_response("Carol"));

        assert_eq!(a.status, 200, "{}", a.text);
        assert_eq!(b.status, 200, "{}", b.text);
        assert_eq!(a.body["user"]["id"], b.body["user"]["id"]);
    }
}

mod me {
    use super::*;

    #[tokio::test]
    async fn returns_the_identity_of_the_token() {
        let app = TestApp::spawn().await;
        let token = app.login("Alice").await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Alice");
        assert_eq!(res.body["is_admin"], false);
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not-a-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}
