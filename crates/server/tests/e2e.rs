use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

struct TestApp {
    base_url: String,
    client: reqwest::Client,
    stop: Option<oneshot::Sender<()>>,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    let app = server::startup::build_app(&AppConfig::default());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown = async {
            let _ = rx.await;
        };
        if let Err(e) = server::serve(listener, app, shutdown).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp {
        base_url: format!("http://{}:{}", addr.ip(), addr.port()),
        client: reqwest::Client::new(),
        stop: Some(tx),
    })
}

impl TestApp {
    async fn post(&self, path: &str, body: Value) -> anyhow::Result<(StatusCode, Value)> {
        let res = self.client.post(format!("{}{}", self.base_url, path)).json(&body).send().await?;
        Ok((res.status(), res.json().await?))
    }

    async fn delete(&self, path: &str) -> anyhow::Result<reqwest::Response> {
        Ok(self.client.delete(format!("{}{}", self.base_url, path)).send().await?)
    }
}

#[tokio::test]
async fn catalog_lifecycle_over_http() -> anyhow::Result<()> {
    let app = start_server().await?;

    let health: Value = app.client.get(format!("{}/health", app.base_url)).send().await?.json().await?;
    assert_eq!(health["status"], "ok");

    let (status, loc) = app.post("/api/locations", json!({"building": "Library", "room": "101"})).await?;
    assert_eq!(status, StatusCode::CREATED);
    let (_, cat) = app.post("/api/categories", json!({"name": "Books", "description": "Printed"})).await?;
    let (status, res) = app
        .post(
            "/api/resources",
            json!({"name": "Atlas", "description": "World atlas", "locationId": loc["id"], "categoryId": cat["id"]}),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let blocked = app.delete(&format!("/api/categories/{}", cat["id"])).await?;
    assert_eq!(blocked.status(), StatusCode::CONFLICT);
    let body: Value = blocked.json().await?;
    assert_eq!(body["error"], "Conflict");
    assert_eq!(body["path"], format!("/api/categories/{}", cat["id"]));

    let res = app.delete(&format!("/api/resources/{}", res["id"])).await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = app.delete(&format!("/api/categories/{}", cat["id"])).await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let page: Value = app
        .client
        .get(format!("{}/api/categories", app.base_url))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(page["totalElements"], 0);
    assert_eq!(page["content"], json!([]));
    Ok(())
}

#[tokio::test]
async fn cors_preflight_is_answered() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = app
        .client
        .request(reqwest::Method::OPTIONS, format!("{}/api/locations", app.base_url))
        .header("Origin", "http://example.test")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await?;
    assert!(res.status().is_success());
    assert!(res.headers().contains_key("access-control-allow-origin"));
    Ok(())
}
