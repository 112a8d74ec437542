use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn seeded_posts_are_listed_newest_first() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/blog/posts").await;
    assert_eq!(res.status, 200);
    let posts = res.body.as_array().unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(
        posts[0]["slug"],
        "vypratavanie-bytu-prakticky-checklist"
    );
    assert_eq!(posts[1]["slug"], "5-tipov-ako-znizit-stres-pri-stahovani");
    assert_eq!(
        posts[2]["slug"],
        "ako-sa-pripravit-na-stahovanie-bytu"
    );
}

#[tokio::test]
async fn get_post_by_slug_returns_full_content() {
    let app = TestApp::spawn().await;

    let res = app
        .get("/api/blog/posts/ako-sa-pripravit-na-stahovanie-bytu")
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(
        res.body["title"],
        "Ako sa pripraviť na sťahovanie bytu v Bratislave"
    );
    assert_eq!(res.body["author_name"], "VI&MO Team");
    assert!(res.body["content"].as_str().unwrap().len() > 100);
}

#[tokio::test]
async fn unknown_slug_is_a_not_found() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/blog/posts/no-such-post").await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn created_post_appears_in_the_listing() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            "/api/blog/posts",
            &json!({
                "slug": "test-post",
                "title": "Test Post",
                "excerpt": "An excerpt",
                "content": "Some content for the post.",
                "category": "Tipy",
                "tags": ["test"],
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.body);
    assert_eq!(res.body["slug"], "test-post");
    // Short content still reads one minute.
    assert_eq!(res.body["reading_time"], 1);
    assert_eq!(res.body["author_name"], "VI&MO Team");

    let res = app.get("/api/blog/posts/test-post").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["title"], "Test Post");
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let app = TestApp::spawn().await;

    let payload = json!({
        "slug": "duplicate-slug",
        "title": "First",
        "excerpt": "x",
        "content": "x",
        "category": "Tipy",
    });
    let res = app.post("/api/blog/posts", &payload).await;
    assert_eq!(res.status, 201);

    let res = app.post("/api/blog/posts", &payload).await;
    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "CONFLICT");
}

#[tokio::test]
async fn invalid_slug_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            "/api/blog/posts",
            &json!({
                "slug": "Not A Slug!",
                "title": "Bad",
                "excerpt": "x",
                "content": "x",
                "category": "Tipy",
            }),
        )
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn seeded_author_is_retrievable() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/authors").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body.as_array().unwrap().len(), 1);

    let res = app.get("/api/authors/vimo-team").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["name"], "VI&MO Team");

    let res = app.get("/api/authors/nobody").await;
    assert_eq!(res.status, 404);
}
