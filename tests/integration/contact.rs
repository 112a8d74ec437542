use serde_json::json;

use crate::common::TestApp;

fn submission_payload() -> serde_json::Value {
    json!({
        "name": "Jana Nováková",
        "email": "jana@example.com",
        "phone": "+421 900 123 456",
        "apartment_size": "3-izbový",
        "move_date": "2025-02-15",
        "message": "Potrebujem presťahovať byt v rámci Bratislavy.",
    })
}

#[tokio::test]
async fn submission_is_acknowledged() {
    let app = TestApp::spawn().await;

    let res = app.post("/api/contact", &submission_payload()).await;
    assert_eq!(res.status, 201, "{}", res.body);
    assert_eq!(res.body["success"], true);
    assert_eq!(
        res.body["message"],
        "Ďakujeme za vašu správu. Ozveme sa vám čoskoro."
    );
    assert_eq!(res.body["submission"]["name"], "Jana Nováková");
    assert!(res.body["submission"]["id"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn invalid_email_is_rejected() {
    let app = TestApp::spawn().await;

    let mut payload = submission_payload();
    payload["email"] = json!("nonsense");
    let res = app.post("/api/contact", &payload).await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn submission_triggers_notification_and_confirmation() {
    let app = TestApp::spawn().await;
    app.enable_email().await;

    let res = app.post("/api/contact", &submission_payload()).await;
    assert_eq!(res.status, 201);

    app.wait_for_deliveries(2).await;
    let delivered = app.delivered.lock().unwrap();
    let recipients: Vec<&str> = delivered.iter().map(|e| e.to_email.as_str()).collect();
    assert!(recipients.contains(&"info@viamo.sk"), "{recipients:?}");
    assert!(recipients.contains(&"jana@example.com"), "{recipients:?}");
}

#[tokio::test]
async fn sends_are_audited_even_while_email_is_disabled() {
    // Email is disabled out of the box; the lead must still be captured
    // and both attempts must land in the log as failed.
    let app = TestApp::spawn().await;

    let res = app.post("/api/contact", &submission_payload()).await;
    assert_eq!(res.status, 201);

    let mut logs = Vec::new();
    for _ in 0..100 {
        let res = app.get_admin("/api/admin/email/logs").await;
        assert_eq!(res.status, 200);
        logs = res.body.as_array().unwrap().clone();
        if logs.len() >= 2 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(logs.len(), 2, "{logs:?}");
    assert!(logs.iter().all(|l| l["status"] == "failed"));
    assert!(app.delivered.lock().unwrap().is_empty());
}
