//! Serving over a real socket, including graceful shutdown.

mod common;

use std::sync::Arc;
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::StatusCode;
use tokio::net::TcpListener;

use annotator_store::{HttpServer, InMemoryStore, Shutdown};
use common::{test_config, url};

#[tokio::test]
async fn test_serve_and_shut_down() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(test_config(), Arc::new(InMemoryStore::new())).unwrap();
    let shutdown = Shutdown::new();
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder()
        .redirect(Policy::none())
        .build()
        .unwrap();
    let base = format!("http://{}", addr);

    let response = client
        .post(format!("{}{}", base, url("")))
        .form(&[("text", "over the wire")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["access-control-expose-headers"], "Location");
    let location = response.headers()["location"].to_str().unwrap().to_string();

    let body: serde_json::Value = client
        .get(format!("{}{}", base, location))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["text"], "over the wire");

    drop(client);
    shutdown.trigger();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap();
    assert!(result.is_ok());
}
