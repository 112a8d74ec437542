use serde_json::json;

use crate::common::{ADMIN_KEY, TestApp};

const POST_SLUG: &str = "ako-sa-pripravit-na-stahovanie-bytu";

fn comment_payload(name: &str) -> serde_json::Value {
    json!({
        "author_name": name,
        "author_email": "jana@example.com",
        "content": "Skvelý článok, ďakujem!",
    })
}

async fn submit_comment(app: &TestApp, name: &str) -> serde_json::Value {
    let res = app
        .post(
            &format!("/api/blog/posts/{POST_SLUG}/comments"),
            &comment_payload(name),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.body);
    res.body
}

#[tokio::test]
async fn new_comment_awaits_moderation() {
    let app = TestApp::spawn().await;

    let body = submit_comment(&app, "Jana").await;
    assert_eq!(body["success"], true);
    assert_eq!(
        body["message"],
        "Váš komentár bol odoslaný a čaká na schválenie."
    );
    assert_eq!(body["comment"]["approved"], false);

    // Not visible publicly until approved.
    let res = app
        .get(&format!("/api/blog/posts/{POST_SLUG}/comments"))
        .await;
    assert_eq!(res.status, 200);
    assert!(res.body.as_array().unwrap().is_empty());

    // But visible when pending comments are requested explicitly.
    let res = app
        .get(&format!(
            "/api/blog/posts/{POST_SLUG}/comments?approved_only=false"
        ))
        .await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn approval_makes_a_comment_public() {
    let app = TestApp::spawn().await;

    let body = submit_comment(&app, "Jana").await;
    let id = body["comment"]["id"].as_str().unwrap().to_string();

    let res = app.patch_admin(&format!("/api/comments/{id}/approve")).await;
    assert_eq!(res.status, 200, "{}", res.body);
    assert_eq!(res.body["approved"], true);

    let res = app
        .get(&format!("/api/blog/posts/{POST_SLUG}/comments"))
        .await;
    let comments = res.body.as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["author_name"], "Jana");

    // Approving again succeeds and changes nothing.
    let res = app.patch_admin(&format!("/api/comments/{id}/approve")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["approved"], true);
}

#[tokio::test]
async fn moderation_queue_annotates_the_post() {
    let app = TestApp::spawn().await;

    submit_comment(&app, "Jana").await;
    submit_comment(&app, "Peter").await;

    let res = app.get_admin("/api/comments/pending").await;
    assert_eq!(res.status, 200, "{}", res.body);
    let queue = res.body.as_array().unwrap();
    assert_eq!(queue.len(), 2);
    // Longest-waiting first.
    assert_eq!(queue[0]["author_name"], "Jana");
    assert_eq!(queue[1]["author_name"], "Peter");
    assert_eq!(
        queue[0]["post_title"],
        "Ako sa pripraviť na sťahovanie bytu v Bratislave"
    );
    assert_eq!(queue[0]["post_slug"], POST_SLUG);
}

#[tokio::test]
async fn comments_can_be_addressed_by_post_id_too() {
    let app = TestApp::spawn().await;

    let res = app.get(&format!("/api/blog/posts/{POST_SLUG}")).await;
    let post_id = res.body["id"].as_str().unwrap().to_string();

    let res = app
        .post(
            &format!("/api/blog/posts/{post_id}/comments"),
            &comment_payload("Jana"),
        )
        .await;
    assert_eq!(res.status, 201);
    assert_eq!(res.body["comment"]["post_id"], post_id.as_str());
}

#[tokio::test]
async fn commenting_on_a_missing_post_fails() {
    let app = TestApp::spawn().await;

    let res = app
        .post("/api/blog/posts/no-such-post/comments", &comment_payload("Jana"))
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn invalid_comment_email_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            &format!("/api/blog/posts/{POST_SLUG}/comments"),
            &json!({
                "author_name": "Jana",
                "author_email": "not-an-email",
                "content": "Hi",
            }),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn moderation_requires_the_admin_key() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/comments/pending").await;
    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "ADMIN_KEY_MISSING");

    let res = app.get_with_key("/api/comments/pending", "wrong-key").await;
    assert_eq!(res.status, 403);
    assert_eq!(res.body["code"], "ADMIN_KEY_INVALID");

    let res = app.patch_with_key("/api/comments/some-id/approve", None).await;
    assert_eq!(res.status, 401);

    let res = app
        .patch_with_key("/api/comments/some-id/approve", Some(ADMIN_KEY))
        .await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}
