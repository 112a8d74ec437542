use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn config_starts_seeded_and_disabled() {
    let app = TestApp::spawn().await;

    let res = app.get_admin("/api/admin/email/config").await;
    assert_eq!(res.status, 200, "{}", res.body);
    assert_eq!(res.body["smtp_host"], "smtp.websupport.sk");
    assert_eq!(res.body["smtp_port"], 465);
    assert_eq!(res.body["enabled"], false);
}

#[tokio::test]
async fn config_update_merges_and_can_clear_bcc() {
    let app = TestApp::spawn().await;

    let res = app
        .put_admin(
            "/api/admin/email/config",
            &json!({"bcc": "archiv@viamo.sk", "enabled": true, "smtp_password": "secret"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.body);
    assert_eq!(res.body["bcc"], "archiv@viamo.sk");
    assert_eq!(res.body["enabled"], true);
    // Untouched fields survive the partial update.
    assert_eq!(res.body["smtp_host"], "smtp.websupport.sk");

    // An explicit null clears the field; omitting it would not.
    let res = app
        .put_admin("/api/admin/email/config", &json!({"bcc": null}))
        .await;
    assert_eq!(res.status, 200);
    assert!(res.body["bcc"].is_null());
    assert_eq!(res.body["enabled"], true);
}

#[tokio::test]
async fn invalid_smtp_port_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .put_admin("/api/admin/email/config", &json!({"smtp_port": 0}))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn template_crud_round_trip() {
    let app = TestApp::spawn().await;

    let res = app.get_admin("/api/admin/email/templates").await;
    assert_eq!(res.status, 200);
    let keys: Vec<String> = res
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["key"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(keys, vec!["confirmation", "contact"]);

    let res = app
        .post_admin(
            "/api/admin/email/templates",
            &json!({
                "key": "follow-up",
                "name": "Follow up",
                "subject": "Ako to dopadlo, {{name}}?",
                "html_content": "<p>Ahoj {{name}}</p>",
                "text_content": "Ahoj {{name}}",
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.body);
    let id = res.body["id"].as_str().unwrap().to_string();
    assert_eq!(res.body["enabled"], true);

    // Duplicate keys are refused.
    let res = app
        .post_admin(
            "/api/admin/email/templates",
            &json!({
                "key": "follow-up",
                "name": "Again",
                "subject": "x",
                "html_content": "x",
                "text_content": "x",
            }),
        )
        .await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");

    let res = app
        .put_admin(
            &format!("/api/admin/email/templates/{id}"),
            &json!({"enabled": false, "name": "Follow up (paused)"}),
        )
        .await;
    assert_eq!(res.status, 200, "{}", res.body);
    assert_eq!(res.body["enabled"], false);
    assert_eq!(res.body["name"], "Follow up (paused)");
    assert_eq!(res.body["subject"], "Ako to dopadlo, {{name}}?");

    let res = app
        .delete_admin(&format!("/api/admin/email/templates/{id}"))
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["success"], true);

    let res = app
        .delete_admin(&format!("/api/admin/email/templates/{id}"))
        .await;
    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn test_email_uses_the_current_configuration() {
    let app = TestApp::spawn().await;
    app.enable_email().await;

    let res = app
        .post_admin("/api/admin/email/test", &json!({"to_email": "admin@viamo.sk"}))
        .await;
    assert_eq!(res.status, 200, "{}", res.body);
    assert_eq!(res.body["success"], true);

    let delivered = app.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].to_email, "admin@viamo.sk");
    assert_eq!(delivered[0].subject, "Test Email Configuration");
}

#[tokio::test]
async fn test_email_reports_failure_while_disabled() {
    let app = TestApp::spawn().await;

    let res = app
        .post_admin("/api/admin/email/test", &json!({"to_email": "admin@viamo.sk"}))
        .await;
    assert_eq!(res.status, 200, "{}", res.body);
    assert_eq!(res.body["success"], false);
}

#[tokio::test]
async fn stats_reflect_the_delivery_log() {
    let app = TestApp::spawn().await;
    app.enable_email().await;

    let res = app
        .post_admin("/api/admin/email/test", &json!({"to_email": "admin@viamo.sk"}))
        .await;
    assert_eq!(res.body["success"], true);

    let res = app.get_admin("/api/admin/email/stats").await;
    assert_eq!(res.status, 200, "{}", res.body);
    assert_eq!(res.body["total"], 1);
    assert_eq!(res.body["sent"], 1);
    assert_eq!(res.body["failed"], 0);
    assert_eq!(res.body["last_24_hours"], 1);
}

#[tokio::test]
async fn logs_can_be_listed_and_deleted() {
    let app = TestApp::spawn().await;
    app.enable_email().await;

    app.post_admin("/api/admin/email/test", &json!({"to_email": "admin@viamo.sk"}))
        .await;

    let res = app.get_admin("/api/admin/email/logs").await;
    assert_eq!(res.status, 200);
    let logs = res.body.as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["status"], "sent");
    let id = logs[0]["id"].as_str().unwrap().to_string();

    let res = app.delete_admin(&format!("/api/admin/email/logs/{id}")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["success"], true);

    let res = app.delete_admin(&format!("/api/admin/email/logs/{id}")).await;
    assert_eq!(res.status, 404);

    let res = app.get_admin("/api/admin/email/logs").await;
    assert!(res.body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn email_admin_requires_the_key() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/admin/email/config").await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "ADMIN_KEY_MISSING");

    let res = app.get_with_key("/api/admin/email/config", "wrong").await;
    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "ADMIN_KEY_INVALID");
}

#[tokio::test]
async fn admin_requests_are_rate_limited() {
    let app = TestApp::spawn_with_rate_limit(2).await;

    for _ in 0..2 {
        let res = app.get_admin("/api/admin/email/config").await;
        assert_eq!(res.status, 200);
    }
    let res = app.get_admin("/api/admin/email/config").await;
    assert_eq!(res.status, 429);
    assert_eq!(res.body["code"], "RATE_LIMITED");
}
