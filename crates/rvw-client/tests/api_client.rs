//! End-to-end client behavior against an in-process fake backend.

mod support;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pretty_assertions::assert_eq;
use rvw_auth::{AuthGate, KeyValueStore, MemoryStore, SessionExpiry, SessionStore, TOKEN_KEY};
use rvw_client::{ApiClient, ApiError, ChatSession};
use rvw_core::entities::PresignedFile;
use serde_json::json;
use support::{FakeBackend, Reply, user_json};

fn client_for(backend: &FakeBackend, storage: Arc<MemoryStore>) -> ApiClient {
    ApiClient::new(&backend.url, Duration::from_secs(5), storage).expect("client builds")
}

#[tokio::test]
async fn login_token_is_sent_on_later_calls() {
    let backend = FakeBackend::start(|req| match req.path() {
        "/api/auth/login" => Reply::json(
            200,
            &json!({"token": "t1", "token_type": "bearer", "user": user_json("u1")}),
        ),
        "/api/auth/me" => Reply::json(200, &user_json("u1")),
        _ => Reply::json(404, &json!({"detail": "Not Found"})),
    });
    let storage = Arc::new(MemoryStore::new());
    let client = Arc::new(client_for(&backend, Arc::clone(&storage)));
    let mut session = SessionStore::new(storage.clone(), client.clone());

    let login = client.login("a@b.com", "hunter2").await.expect("login");
    assert_eq!(login.user.email, "a@b.com");
    session.set_auth(login.token, login.user).expect("persist");

    let me = client.me().await.expect("me");
    assert_eq!(me.id, "u1");

    let login_req = &backend.requests_to("/api/auth/login")[0];
    assert_eq!(login_req.authorization, None);
    assert_eq!(login_req.json(), json!({"email": "a@b.com", "password": "hunter2"}));
    assert_eq!(
        backend.requests_to("/api/auth/me")[0].authorization.as_deref(),
        Some("Bearer t1")
    );
}

#[tokio::test]
async fn unauthorized_clears_token_and_redirects_from_any_endpoint() {
    let backend = FakeBackend::start(|_| Reply::json(401, &json!({"detail": "Token expired"})));
    let storage = Arc::new(MemoryStore::new());
    let redirects = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&redirects);
    let client = client_for(&backend, Arc::clone(&storage)).with_login_redirect(Arc::new(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    ));

    let calls: Vec<Result<(), ApiError>> = vec![
        {
            storage.set(TOKEN_KEY, "stale").unwrap();
            client.get_review("r-1").await.map(drop)
        },
        {
            storage.set(TOKEN_KEY, "stale").unwrap();
            client.list_templates().await.map(drop)
        },
        {
            storage.set(TOKEN_KEY, "stale").unwrap();
            client.delete_template("t-1").await
        },
        {
            storage.set(TOKEN_KEY, "stale").unwrap();
            client.chat("hi", &[], None).await.map(drop)
        },
    ];

    for result in calls {
        let err = result.expect_err("401 must fail");
        assert!(err.is_unauthorized());
        assert_eq!(err.user_message("fallback"), "Unauthorized");
    }
    assert_eq!(redirects.load(Ordering::SeqCst), 4);
    assert!(storage.get(TOKEN_KEY).is_none());
}

#[tokio::test]
async fn unauthorized_signs_out_the_in_memory_session() {
    let backend = FakeBackend::start(|req| match req.path() {
        "/api/auth/login" => Reply::json(
            200,
            &json!({"token": "t1", "token_type": "bearer", "user": user_json("u1")}),
        ),
        _ => Reply::json(401, &json!({"detail": "Token expired"})),
    });
    let storage = Arc::new(MemoryStore::new());
    let expiry = SessionExpiry::default();
    let expired = expiry.clone();
    let client = Arc::new(
        client_for(&backend, Arc::clone(&storage))
            .with_login_redirect(Arc::new(move || expired.expire())),
    );
    let mut session = SessionStore::new(storage.clone(), client.clone()).with_expiry(expiry);

    let login = client.login("a@b.com", "hunter2").await.expect("login");
    session.set_auth(login.token, login.user).expect("persist");
    assert!(matches!(session.gate(), AuthGate::Authenticated(u) if u.id == "u1"));

    let err = client.get_review("r-1").await.expect_err("401 must fail");
    assert!(err.is_unauthorized());

    assert!(storage.get(TOKEN_KEY).is_none());
    assert_eq!(session.session().token, None);
    assert_eq!(session.session().user, None);
    assert_eq!(session.gate(), AuthGate::RedirectToLogin);
}

#[tokio::test]
async fn error_detail_is_verbatim_or_status_text() {
    let backend = FakeBackend::start(|req| match req.path() {
        "/api/reviews/missing" => Reply::json(404, &json!({"detail": "Review not found"})),
        "/api/rule-templates" => Reply::json(
            422,
            &json!({"detail": [{"loc": ["body", "name"], "msg": "field required"}]}),
        ),
        _ => Reply::text(503, "upstream down"),
    });
    let client = client_for(&backend, Arc::new(MemoryStore::new()));

    let err = client.get_review("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 404, ref detail } if detail == "Review not found"));

    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 503, ref detail } if detail == "Service Unavailable"));

    let err = client.list_templates().await.unwrap_err();
    assert_eq!(err.status(), Some(422));
    assert!(err.user_message("x").contains("field required"));
}

#[tokio::test]
async fn review_list_paginates_over_total() {
    let backend = FakeBackend::start(|req| {
        let limit: usize = req.query("limit").unwrap().parse().unwrap();
        let offset: usize = req.query("offset").unwrap().parse().unwrap();
        let reviews: Vec<_> = (0..23)
            .skip(offset)
            .take(limit)
            .map(|i| json!({"review_id": format!("r-{i:02}"), "status": "completed"}))
            .collect();
        Reply::json(200, &json!({"reviews": reviews, "total": 23}))
    });
    let client = client_for(&backend, Arc::new(MemoryStore::new()));

    let first = client.list_reviews(10, 0, None).await.unwrap();
    assert_eq!(first.reviews.len(), 10);
    assert_eq!(first.total, 23);

    let last = client.list_reviews(10, 20, None).await.unwrap();
    assert_eq!(last.reviews.len(), 3);
    assert_eq!(last.reviews[0].review_id, "r-20");
}

#[tokio::test]
async fn put_object_sends_raw_bytes_without_credentials() {
    let backend = FakeBackend::start(|req| match req.path() {
        "/bucket/ok.pdf" => Reply::text(200, ""),
        _ => Reply::text(403, "<Error>SignatureDoesNotMatch</Error>"),
    });
    let client = client_for(&backend, Arc::new(MemoryStore::with_token("t1")));
    let slot = |name: &str| PresignedFile {
        filename: name.to_string(),
        upload_url: format!("{}/bucket/{name}?sig=abc", backend.url),
        storage_key: format!("reviews/r-1/{name}"),
    };

    client
        .put_object(&slot("ok.pdf"), b"%PDF-1.7".to_vec(), "application/pdf")
        .await
        .expect("upload succeeds");
    let err = client
        .put_object(&slot("bad.pdf"), b"%PDF-1.7".to_vec(), "application/pdf")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Upload { status: 403, ref filename } if filename == "bad.pdf"));

    let put = &backend.requests_to("/bucket/ok.pdf")[0];
    assert_eq!(put.method, "PUT");
    assert_eq!(put.authorization, None);
    assert_eq!(put.content_type.as_deref(), Some("application/pdf"));
    assert_eq!(put.body, b"%PDF-1.7");
}

#[tokio::test]
async fn chat_session_records_turns_after_reply() {
    let backend = FakeBackend::start(|req| {
        let history_len = req.json()["history"].as_array().map_or(0, Vec::len);
        Reply::json(200, &json!({"reply": format!("seen {history_len}"), "usage": null}))
    });
    let client = client_for(&backend, Arc::new(MemoryStore::new()));
    let mut chat = ChatSession::new(&client, Some("r-1".into()));

    assert_eq!(chat.send("first").await.unwrap().reply, "seen 0");
    assert_eq!(chat.send("second").await.unwrap().reply, "seen 2");
    assert_eq!(chat.history().len(), 4);
    assert_eq!(backend.requests()[1].json()["review_id"], json!("r-1"));
}
