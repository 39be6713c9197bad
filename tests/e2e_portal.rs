// tests/e2e_portal.rs
use axum::http::{StatusCode, header};
use news_portal::domain::content::{ApprovalStatus, ContentKind};
use tower::util::ServiceExt as _;

mod support;
use support::{TestApp, form_request, newsroom, page_request, read_text, submit};

async fn portal_login(app: &axum::Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(form_request(
            "/portal/login",
            None,
            &format!("username={username}&password=correct+horse"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert!(cookie.contains("HttpOnly"));
    cookie.split(';').next().unwrap().to_string()
}

fn location(response: &axum::http::Response<axum::body::Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap()
}

#[tokio::test]
async fn login_sets_a_session_cookie_and_bad_credentials_rerender() {
    let app = TestApp::new();
    newsroom(&app).await;
    let router = app.router();

    let cookie = portal_login(&router, "jess").await;
    assert!(cookie.starts_with("portal_token="));

    let response = router
        .clone()
        .oneshot(form_request("/portal/login", None, "username=jess&password=nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let html = read_text(response).await;
    assert!(html.contains("value=\"jess\""));

    let response = router
        .clone()
        .oneshot(page_request("/portal/login", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(location(&response), "/portal/articles");

    let response = router
        .oneshot(form_request("/portal/logout", Some(&cookie), ""))
        .await
        .unwrap();
    let cleared = response.headers().get(header::SET_COOKIE).unwrap();
    assert!(cleared.to_str().unwrap().contains("Max-Age=0"));
}

#[tokio::test]
async fn pages_that_need_a_user_redirect_anonymous_visitors() {
    let app = TestApp::new();
    newsroom(&app).await;
    support::member(&app, "rita", "reader").await;
    let router = app.router();

    let response = router
        .clone()
        .oneshot(page_request("/portal/review", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/portal/login");

    let reader = portal_login(&router, "rita").await;
    let response = router
        .clone()
        .oneshot(page_request("/portal/review", Some(&reader)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(read_text(response).await.contains("only editors may review content"));

    let response = router
        .oneshot(page_request("/portal/newsletters/new", Some(&reader)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn journalist_submits_through_the_form() {
    let app = TestApp::new();
    let room = newsroom(&app).await;
    let router = app.router();
    let cookie = portal_login(&router, "jess").await;

    let response = router
        .clone()
        .oneshot(page_request("/portal/articles/new", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_text(response).await.contains("Daily Planet"));

    let response = router
        .clone()
        .oneshot(form_request(
            "/portal/articles",
            Some(&cookie),
            "title=&body=Some+text&publisher_id=",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let html = read_text(response).await;
    assert!(html.contains("class=\"errors\""));
    assert!(html.contains("Some text"));

    let response = router
        .clone()
        .oneshot(form_request(
            "/portal/articles",
            Some(&cookie),
            &format!("title=Tide+tables&body=High+at+noon&publisher_id={}", room.publisher.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/portal/articles?submitted=1");

    let response = router
        .oneshot(page_request("/portal/articles?submitted=1", Some(&cookie)))
        .await
        .unwrap();
    let html = read_text(response).await;
    assert!(html.contains("awaiting editorial review"));
    assert!(!html.contains("Tide tables"));
}

#[tokio::test]
async fn editor_approves_from_the_portal_and_followers_are_mailed() {
    let app = TestApp::new();
    let room = newsroom(&app).await;
    let reader = support::member(&app, "rita", "reader").await;
    app.services
        .subscription_commands
        .follow_publisher(&reader, room.publisher.id)
        .await
        .unwrap();
    let item = submit(&app, &room.journalist, ContentKind::Article, "Bridge opens", Some(room.publisher.id)).await;
    let router = app.router();
    let editor = portal_login(&router, "eddie").await;

    let response = router
        .clone()
        .oneshot(page_request("/portal/review", Some(&editor)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_text(response).await.contains("Bridge opens"));

    let response = router
        .clone()
        .oneshot(page_request(&format!("/portal/articles/{}", item.id), Some(&editor)))
        .await
        .unwrap();
    assert!(read_text(response).await.contains("/approve"));

    let response = router
        .clone()
        .oneshot(form_request(&format!("/portal/articles/{}/approve", item.id), Some(&editor), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/portal/articles");
    assert_eq!(app.store.content(item.id).unwrap().status, ApprovalStatus::Approved);
    assert_eq!(app.mailer.recipients(), vec!["rita@example.com"]);

    let response = router
        .clone()
        .oneshot(form_request(&format!("/portal/articles/{}/deny", item.id), Some(&editor), ""))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = router
        .oneshot(page_request("/portal/articles", None))
        .await
        .unwrap();
    assert!(read_text(response).await.contains("Bridge opens"));
    assert_eq!(app.mailer.batches().len(), 1);
}

#[tokio::test]
async fn follow_buttons_return_to_the_page() {
    let app = TestApp::new();
    let room = newsroom(&app).await;
    support::member(&app, "rita", "reader").await;
    let item = submit(&app, &room.journalist, ContentKind::Newsletter, "Weekly", None).await;
    app.store.force_status(item.id, ApprovalStatus::Approved);
    let router = app.router();
    let reader = portal_login(&router, "rita").await;

    let here = format!("/portal/newsletters/{}", item.id);
    let response = router
        .clone()
        .oneshot(form_request(
            &format!("/portal/journalists/{}/follow", i64::from(room.journalist.id)),
            Some(&reader),
            &format!("next={here}"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), here);

    let response = router
        .clone()
        .oneshot(page_request(&here, Some(&reader)))
        .await
        .unwrap();
    assert!(read_text(response).await.contains("Unfollow jess"));

    let response = router
        .oneshot(form_request(
            &format!("/portal/publishers/{}/follow", room.publisher.id),
            Some(&reader),
            "next=https://elsewhere.test/",
        ))
        .await
        .unwrap();
    assert_eq!(location(&response), "/portal/articles");
}
