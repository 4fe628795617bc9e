use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use configs::AppConfig;

struct TestApp {
    app: Router,
    data_dir: std::path::PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.data_dir);
    }
}

async fn build_app() -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = std::env::temp_dir().join(format!("chirp_api_{}", Uuid::new_v4()));
    cfg.normalize_and_validate()?;
    let app = server::build_app(&cfg).await?;
    Ok(TestApp { app, data_dir: cfg.storage.data_dir })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v)?)
        }
        None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body)?).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, value))
}

fn signup_body(id: Uuid, email: &str) -> Value {
    json!({
        "user_id": id,
        "email": email,
        "first_name": "A",
        "last_name": "B",
        "password": "secret12"
    })
}

#[tokio::test]
async fn health_ok() -> anyhow::Result<()> {
    let t = build_app().await?;
    let (status, body) = send(&t.app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn signup_login_post_and_feed() -> anyhow::Result<()> {
    let t = build_app().await?;
    let u1 = Uuid::new_v4();

    // Register
    let (status, created) = send(&t.app, "POST", "/signup", Some(signup_body(u1, "a@x.com"))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());

    // Fetch equals record minus password
    let (status, fetched) = send(&t.app, "GET", &format!("/users/{u1}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fetched,
        json!({"user_id": u1, "email": "a@x.com", "first_name": "A", "last_name": "B", "birth_date": null})
    );

    // Wrong password -> 400
    let (status, body) = send(&t.app, "POST", "/login", Some(json!({"email": "a@x.com", "password": "wrongpass"}))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "authentication_error");

    // Post a tweet by U1
    let tweet_id = Uuid::new_v4();
    let (status, posted) = send(
        &t.app,
        "POST",
        "/post",
        Some(json!({"tweet_id": tweet_id, "content": "hello world", "by": fetched})),
    )
    .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(posted["by"]["user_id"], json!(u1));
    assert!(posted["created_at"].is_string());

    // Appears in the home feed and in the login response
    let (status, feed) = send(&t.app, "GET", "/", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed.as_array().map(Vec::len), Some(1));
    assert_eq!(feed[0]["tweet_id"], json!(tweet_id));

    let (status, login_feed) =
        send(&t.app, "POST", "/login", Some(json!({"user_id": u1, "email": "a@x.com", "password": "secret12"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login_feed, feed);
    Ok(())
}

#[tokio::test]
async fn duplicate_signup_conflicts() -> anyhow::Result<()> {
    let t = build_app().await?;
    let (status, _) = send(&t.app, "POST", "/signup", Some(signup_body(Uuid::new_v4(), "a@x.com"))).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = send(&t.app, "POST", "/signup", Some(signup_body(Uuid::new_v4(), "a@x.com"))).await?;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    let (_, users) = send(&t.app, "GET", "/users", None).await?;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
    Ok(())
}

#[tokio::test]
async fn invalid_payloads_are_rejected() -> anyhow::Result<()> {
    let t = build_app().await?;
    let mut short = signup_body(Uuid::new_v4(), "a@x.com");
    short["password"] = json!("short");
    let (status, body) = send(&t.app, "POST", "/signup", Some(short)).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "validation_error");

    let (status, _) = send(&t.app, "POST", "/login", Some(json!({"email": "a@x.com", "password": "x"}))).await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn user_update_and_delete() -> anyhow::Result<()> {
    let t = build_app().await?;
    let id = Uuid::new_v4();
    send(&t.app, "POST", "/signup", Some(signup_body(id, "a@x.com"))).await?;

    let (status, updated) = send(
        &t.app,
        "PUT",
        &format!("/users/{id}/update"),
        Some(json!({
            "user_id": Uuid::new_v4(),
            "email": "new@x.com",
            "first_name": "Grace",
            "last_name": "Hopper",
            "birth_date": "1906-12-09",
            "password": "newsecret"
        })),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["user_id"], json!(id));
    assert_eq!(updated["birth_date"], "1906-12-09");

    let (status, found) = send(&t.app, "POST", &format!("/users/{id}"), Some(json!({"email": "new@x.com"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found, updated);

    let (status, _) = send(&t.app, "DELETE", &format!("/users/{id}/delete"), None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&t.app, "GET", &format!("/users/{id}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = send(&t.app, "PUT", &format!("/users/{}/update", Uuid::new_v4()), Some(signup_body(id, "z@x.com"))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn email_lookup_is_scoped_to_path_id() -> anyhow::Result<()> {
    let t = build_app().await?;
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    send(&t.app, "POST", "/signup", Some(signup_body(a, "a@x.com"))).await?;
    send(&t.app, "POST", "/signup", Some(signup_body(b, "b@x.com"))).await?;

    let (status, found) = send(&t.app, "POST", &format!("/users/{a}"), Some(json!({"email": "a@x.com"}))).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["user_id"], json!(a));

    // b's email under a's id is not exposed
    let (status, body) = send(&t.app, "POST", &format!("/users/{a}"), Some(json!({"email": "b@x.com"}))).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    Ok(())
}

#[tokio::test]
async fn tweet_get_update_delete() -> anyhow::Result<()> {
    let t = build_app().await?;
    let by = json!({"user_id": Uuid::new_v4(), "email": "a@x.com", "first_name": "A", "last_name": "B"});
    let tweet_id = Uuid::new_v4();
    send(&t.app, "POST", "/post", Some(json!({"tweet_id": tweet_id, "content": "draft", "by": by}))).await?;

    let (status, updated) = send(
        &t.app,
        "PUT",
        &format!("/tweets/{tweet_id}/update"),
        Some(json!({"tweet_id": tweet_id, "content": "final", "by": by})),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "final");
    assert!(updated["updated_at"].is_string());

    let (status, fetched) = send(&t.app, "GET", &format!("/tweets/{tweet_id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, updated);

    let (status, _) = send(&t.app, "DELETE", &format!("/tweets/{tweet_id}/delete"), None).await?;
    assert_eq!(status, StatusCode::OK);

    // deleting again, or any unknown id, is a 404
    let (status, _) = send(&t.app, "DELETE", &format!("/tweets/{tweet_id}/delete"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&t.app, "DELETE", &format!("/tweets/{}/delete", Uuid::new_v4()), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn corrupt_collection_is_a_server_error() -> anyhow::Result<()> {
    let t = build_app().await?;
    tokio::fs::write(t.data_dir.join("tweets.json"), b"not json").await?;
    let (status, body) = send(&t.app, "GET", "/", None).await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "storage_error");
    Ok(())
}
