//! Serving over a real socket and shutting down.

use std::time::Duration;

use marketing_relay::{HttpServer, Shutdown};
use serde_json::{json, Value};

mod common;

#[tokio::test]
async fn test_serves_and_shuts_down_gracefully() {
    let loops = common::MockLoops::healthy().await;
    let config = common::test_config(&loops.url());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    let res = client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .expect("relay unreachable");
    assert_eq!(res.status(), 200);
    assert!(res.headers().contains_key("x-request-id"));
    assert_eq!(res.json::<Value>().await.unwrap(), json!({ "ok": true }));

    let res = client
        .post(format!("http://{}/send/test", addr))
        .json(&json!({ "email": "socket@b.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.json::<Value>().await.unwrap()["email"], "socket@b.com");

    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
