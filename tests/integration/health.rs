use crate::common::TestApp;

#[tokio::test]
async fn health_reports_the_active_backend() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/health").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["status"], "ok");
    assert_eq!(res.body["backend"], "memory");
    assert_eq!(res.body["degraded"], false);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::spawn().await;

    let res = app.get("/api-docs/openapi.json").await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["info"]["title"], "Moveco Content API");
    assert!(res.body["paths"]["/api/blog/posts"].is_object());
}
