use serde_json::json;

use crate::common::{TestApp, routes};

mod registration {
    use super::*;

    #[tokio::test]
    async fn new_user_can_register_with_valid_credentials() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"username": "alice", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 201);
        assert!(res.body["id"].is_number());
        assert_eq!(res.body["username"], "alice");
    }

    #[tokio::test]
    async fn cannot_register_with_an_already_taken_username() {
        let app = TestApp::spawn().await;
        let body = json!({"username": "alice", "password": "securepass"});

        let first = app.post_without_token(routes::REGISTER, &body).await;
        assert_eq!(
            first.status, 201,
            "First registration failed: {}",
            first.text
        );

        let res = app.post_without_token(routes::REGISTER, &body).await;
        assert_eq!(res.status, 409);
        assert_eq!(res.error_code(), "USERNAME_TAKEN");
    }

    #[tokio::test]
    async fn rejects_a_username_with_forbidden_characters() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"username": "not ok!", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 422);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_a_too_short_password() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::REGISTER,
                &json!({"username": "bob", "password": "short"}),
            )
            .await;

        assert_eq!(res.status, 422);
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn registered_user_can_log_in_and_receives_a_token() {
        let app = TestApp::spawn().await;
        let body = json!({"username": "carol", "password": "securepass"});

        let reg = app.post_without_token(routes::REGISTER, &body).await;
        assert_eq!(reg.status, 201);

        let res = app.post_without_token(routes::LOGIN, &body).await;
        assert_eq!(res.status, 200);
        assert!(res.body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(res.body["username"], "carol");
        assert_eq!(res.body["role"], "typist");
    }

    #[tokio::test]
    async fn login_fails_with_a_wrong_password() {
        let app = TestApp::spawn().await;
        let _token = app.create_authenticated_user("dave", "securepass").await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "dave", "password": "wrongpass"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.error_code(), "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn login_fails_for_an_unknown_user() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "ghost", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn admin_login_includes_contest_permissions() {
        let app = TestApp::spawn().await;
        let _token = app
            .create_user_with_role("root", "securepass", "admin")
            .await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "root", "password": "securepass"}),
            )
            .await;

        assert_eq!(res.status, 200);
        let perms: Vec<&str> = res.body["permissions"]
            .as_array()
            .expect("permissions should be an array")
            .iter()
            .filter_map(|p| p.as_str())
            .collect();
        assert!(perms.contains(&"contest:create"));
        assert!(perms.contains(&"contest:manage"));
        assert!(perms.contains(&"contest:delete"));
    }
}

mod me {
    use super::*;

    #[tokio::test]
    async fn returns_the_current_user() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("erin", "securepass").await;

        let res = app.get_with_token(routes::ME, &token).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["username"], "erin");
        assert_eq!(res.body["role"], "typist");
    }

    #[tokio::test]
    async fn rejects_a_request_without_a_token() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ME).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.error_code(), "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn rejects_a_garbage_token() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::ME, "not.a.jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.error_code(), "TOKEN_INVALID");
    }
}
