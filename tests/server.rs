//! End-to-end test over a real socket: start the relay on a random port,
//! call it with reqwest, stop it.

use std::time::Duration;
use veo_proxy_lib::proxy::{AxumServer, ProxyConfig};

#[tokio::test]
async fn server_serves_health_and_stops() {
    let config = ProxyConfig {
        port: 0,
        allow_lan_access: false,
        ..ProxyConfig::default()
    };
    let (server, handle) = AxumServer::start(&config)
        .await
        .expect("Failed to start relay");
    let port = server.local_addr().port();
    assert_ne!(port, 0);

    let response = reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
        .get(format!("http://127.0.0.1:{}/health", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("access-control-allow-origin"));
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");

    server.stop();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("Server did not stop")
        .unwrap();
}
