use serde_json::json;

use crate::common::{TestApp, routes};

fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

const HOUR_MS: i64 = 60 * 60 * 1000;

mod active_contest {
    use super::*;

    #[tokio::test]
    async fn returns_null_data_when_no_contest_exists() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(routes::ACTIVE_CONTEST).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Contest retrieved");
        assert!(res.body["data"].is_null());
    }

    #[tokio::test]
    async fn skips_contests_whose_window_has_closed() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin1", "pass1234", "admin").await;

        let now = now_ms();
        app.create_contest(&admin, "Finished", Some(now - 2 * HOUR_MS), Some(now - HOUR_MS))
            .await;
        let open_id = app
            .create_contest(&admin, "Ongoing", Some(now - HOUR_MS), Some(now + HOUR_MS))
            .await;

        let res = app.get_without_token(routes::ACTIVE_CONTEST).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["id"].as_i64().unwrap() as i32, open_id);
        assert_eq!(res.body["data"]["name"], "Ongoing");
    }

    #[tokio::test]
    async fn the_enabled_flag_overrides_an_open_window() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin2", "pass1234", "admin").await;

        let now = now_ms();
        let res = app
            .post_with_token(
                routes::CONTESTS,
                &json!({
                    "name": "Disabled contest",
                    "startTime": now - HOUR_MS,
                    "endTime": now + HOUR_MS,
                    "isActive": false,
                    "options": {"mode": "time", "mode2": "60", "punctuation": false, "numbers": false},
                }),
                &admin,
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app.get_without_token(routes::ACTIVE_CONTEST).await;
        assert_eq!(res.status, 200);
        assert!(res.body["data"].is_null());
    }

    #[tokio::test]
    async fn prefers_the_most_recently_started_of_two_open_contests() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin3", "pass1234", "admin").await;

        let now = now_ms();
        app.create_contest(&admin, "Older", Some(now - 2 * HOUR_MS), Some(now + HOUR_MS))
            .await;
        let newer_id = app
            .create_contest(&admin, "Newer", Some(now - HOUR_MS), Some(now + HOUR_MS))
            .await;

        let res = app.get_without_token(routes::ACTIVE_CONTEST).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["id"].as_i64().unwrap() as i32, newer_id);
    }

    #[tokio::test]
    async fn a_contest_without_bounds_is_active() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin4", "pass1234", "admin").await;

        let id = app.create_contest(&admin, "Evergreen", None, None).await;

        let res = app.get_without_token(routes::ACTIVE_CONTEST).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["id"].as_i64().unwrap() as i32, id);
    }
}

mod contest_crud {
    use super::*;

    #[tokio::test]
    async fn admin_can_create_and_fetch_a_contest() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin1", "pass1234", "admin").await;

        let id = app.create_contest(&admin, "Weekly Sprint", None, None).await;

        let res = app.get_without_token(&routes::contest(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["name"], "Weekly Sprint");
        assert_eq!(res.body["data"]["isActive"], true);
        assert_eq!(res.body["data"]["options"]["mode"], "time");
        assert_eq!(res.body["data"]["options"]["mode2"], "60");
        // Result data is never embedded in a contest payload
        assert!(res.body["data"].get("results").is_none());
    }

    #[tokio::test]
    async fn a_regular_user_cannot_create_a_contest() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("typist1", "pass1234").await;

        let res = app
            .post_with_token(
                routes::CONTESTS,
                &json!({
                    "name": "Nope",
                    "options": {"mode": "time", "mode2": "60", "punctuation": false, "numbers": false},
                }),
                &token,
            )
            .await;

        assert_eq!(res.status, 403);
        assert_eq!(res.error_code(), "PERMISSION_DENIED");
    }

    #[tokio::test]
    async fn creation_requires_authentication() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::CONTESTS,
                &json!({
                    "name": "Nope",
                    "options": {"mode": "time", "mode2": "60", "punctuation": false, "numbers": false},
                }),
            )
            .await;

        assert_eq!(res.status, 401);
    }

    #[tokio::test]
    async fn rejects_a_window_that_ends_before_it_starts() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin2", "pass1234", "admin").await;

        let now = now_ms();
        let res = app
            .post_with_token(
                routes::CONTESTS,
                &json!({
                    "name": "Backwards",
                    "startTime": now + HOUR_MS,
                    "endTime": now,
                    "options": {"mode": "time", "mode2": "60", "punctuation": false, "numbers": false},
                }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 422);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_a_non_numeric_mode2_for_time_mode() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin3", "pass1234", "admin").await;

        let res = app
            .post_with_token(
                routes::CONTESTS,
                &json!({
                    "name": "Bad options",
                    "options": {"mode": "time", "mode2": "sixty", "punctuation": false, "numbers": false},
                }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 422);
    }

    #[tokio::test]
    async fn fetching_an_unknown_contest_returns_404() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::contest(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.error_code(), "NOT_FOUND");
    }
}

mod contest_update {
    use super::*;

    #[tokio::test]
    async fn admin_can_rename_a_contest() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin1", "pass1234", "admin").await;
        let id = app.create_contest(&admin, "Old name", None, None).await;

        let res = app
            .patch_with_token(&routes::contest(id), &json!({"name": "New name"}), &admin)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["data"]["name"], "New name");
    }

    #[tokio::test]
    async fn an_explicit_null_clears_the_end_time() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin2", "pass1234", "admin").await;
        let now = now_ms();
        let id = app
            .create_contest(&admin, "Bounded", Some(now - HOUR_MS), Some(now + HOUR_MS))
            .await;

        let res = app
            .patch_with_token(&routes::contest(id), &json!({"endTime": null}), &admin)
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        // Absent on the wire means the bound is gone
        assert!(res.body["data"].get("endTime").is_none());
        assert!(res.body["data"]["startTime"].is_i64());
    }

    #[tokio::test]
    async fn an_omitted_field_is_left_unchanged() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin3", "pass1234", "admin").await;
        let now = now_ms();
        let id = app
            .create_contest(&admin, "Keep end", Some(now - HOUR_MS), Some(now + HOUR_MS))
            .await;

        let res = app
            .patch_with_token(&routes::contest(id), &json!({"name": "Keep end 2"}), &admin)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["endTime"].as_i64(), Some(now + HOUR_MS));
    }

    #[tokio::test]
    async fn rejects_moving_the_start_past_the_existing_end() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin4", "pass1234", "admin").await;
        let now = now_ms();
        let id = app
            .create_contest(&admin, "Windowed", Some(now - HOUR_MS), Some(now + HOUR_MS))
            .await;

        let res = app
            .patch_with_token(
                &routes::contest(id),
                &json!({"startTime": now + 2 * HOUR_MS}),
                &admin,
            )
            .await;

        assert_eq!(res.status, 422);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejects_a_negative_epoch_supplied_on_its_own() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin8", "pass1234", "admin").await;
        let id = app.create_contest(&admin, "Open-ended", None, None).await;

        let res = app
            .patch_with_token(&routes::contest(id), &json!({"startTime": -5}), &admin)
            .await;

        assert_eq!(res.status, 422, "{}", res.text);
        assert_eq!(res.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn an_empty_payload_returns_the_contest_unchanged() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin5", "pass1234", "admin").await;
        let id = app.create_contest(&admin, "Untouched", None, None).await;

        let res = app
            .patch_with_token(&routes::contest(id), &json!({}), &admin)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"]["name"], "Untouched");
    }

    #[tokio::test]
    async fn a_regular_user_cannot_update_a_contest() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin6", "pass1234", "admin").await;
        let typist = app.create_authenticated_user("typist1", "pass1234").await;
        let id = app.create_contest(&admin, "Protected", None, None).await;

        let res = app
            .patch_with_token(&routes::contest(id), &json!({"name": "Hacked"}), &typist)
            .await;

        assert_eq!(res.status, 403);
    }
}

mod contest_delete {
    use super::*;

    #[tokio::test]
    async fn admin_can_delete_a_contest_and_its_results() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin1", "pass1234", "admin").await;
        let id = app.create_contest(&admin, "Doomed", None, None).await;

        let submit = app.submit_result(&admin, 80.0, 95.0).await;
        assert_eq!(submit.status, 200, "{}", submit.text);

        let res = app.delete_with_token(&routes::contest(id), &admin).await;
        assert_eq!(res.status, 204);

        let res = app.get_without_token(&routes::contest(id)).await;
        assert_eq!(res.status, 404);

        let res = app
            .get_without_token(&routes::leaderboard_for(id))
            .await;
        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn deleting_an_unknown_contest_returns_404() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin2", "pass1234", "admin").await;

        let res = app.delete_with_token(&routes::contest(424242), &admin).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn a_regular_user_cannot_delete_a_contest() {
        let app = TestApp::spawn().await;
        let admin = app.create_user_with_role("admin3", "pass1234", "admin").await;
        let typist = app.create_authenticated_user("typist1", "pass1234").await;
        let id = app.create_contest(&admin, "Protected", None, None).await;

        let res = app.delete_with_token(&routes::contest(id), &typist).await;

        assert_eq!(res.status, 403);
    }
}

mod feature_flag {
    use super::*;

    #[tokio::test]
    async fn every_contest_endpoint_answers_503_when_disabled() {
        let app = TestApp::spawn_with_contests_disabled().await;
        let token = app.create_authenticated_user("typist1", "pass1234").await;

        let res = app.get_without_token(routes::ACTIVE_CONTEST).await;
        assert_eq!(res.status, 503);
        assert_eq!(res.error_code(), "CONTESTS_DISABLED");
        assert_eq!(
            res.body["message"],
            "Contest mode is not available at this time."
        );

        let res = app.submit_result(&token, 80.0, 95.0).await;
        assert_eq!(res.status, 503);

        let res = app.get_without_token(routes::LEADERBOARD).await;
        assert_eq!(res.status, 503);

        let res = app.get_with_token(routes::RANK, &token).await;
        assert_eq!(res.status, 503);
    }

    #[tokio::test]
    async fn auth_endpoints_still_work_when_contests_are_disabled() {
        let app = TestApp::spawn_with_contests_disabled().await;
        let token = app.create_authenticated_user("typist2", "pass1234").await;

        let res = app.get_with_token(routes::ME, &token).await;
        assert_eq!(res.status, 200);
    }
}
