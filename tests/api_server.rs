//! End-to-end tests: a built directory served over a real socket.

mod common;

use std::net::SocketAddr;
use std::path::PathBuf;

use regionping::config::Settings;
use regionping::control_plane::CloudRunClient;
use regionping::directory::build_directory;
use regionping::http::AppServer;

/// Build a directory from the mock control plane and serve it on an
/// ephemeral port. Mirrors the startup sequence in main: the listener
/// only binds after the directory is complete.
async fn start_server(
    settings: Settings,
    global_endpoint: Option<&str>,
    items: &[serde_json::Value],
) -> SocketAddr {
    let control_plane = common::start_control_plane(200, common::list_response(items)).await;
    let base = format!("http://{control_plane}");
    let client = CloudRunClient::with_bases(base.clone(), base);
    let directory = build_directory(&client, "demo-project", global_endpoint)
        .await
        .unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = AppServer::new(directory, &settings);
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });
    addr
}

/// Asset directory unique to one test, seeded with an index page.
fn asset_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("regionping-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<html>pong</html>").unwrap();
    dir
}

#[tokio::test]
async fn test_endpoints_response_shape() {
    let items = vec![common::service_item(
        "us-central1",
        "Iowa",
        "https://us-central1.example.com",
    )];
    let addr = start_server(
        Settings::default(),
        Some("https://global.example.com"),
        &items,
    )
    .await;

    let response = reqwest::get(format!("http://{addr}/api/endpoints"))
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"],
        "application/json;charset=utf-8"
    );
    assert_eq!(response.headers()["cache-control"], "no-store");
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(
        response.headers()["strict-transport-security"],
        "max-age=3600; includeSubdomains; preload"
    );

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "us-central1": {
                "URL": "https://us-central1.example.com",
                "Region": "us-central1",
                "RegionName": "Iowa"
            },
            "global": {
                "URL": "https://global.example.com",
                "Region": "global",
                "RegionName": "Global External HTTPS Load Balancer"
            }
        })
    );
}

#[tokio::test]
async fn test_ping_returns_region_with_newline() {
    let settings = Settings {
        region: "us-east1".to_string(),
        ..Settings::default()
    };
    let addr = start_server(settings, None, &[]).await;

    for path in ["/api/ping", "/ping"] {
        let response = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
        assert_eq!(response.status(), 200, "{path}");
        assert_eq!(response.headers()["cache-control"], "no-store");
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(response.text().await.unwrap(), "us-east1\n", "{path}");
    }
}

#[tokio::test]
async fn test_first_request_header_appears_exactly_once() {
    let addr = start_server(Settings::default(), None, &[]).await;
    let client = reqwest::Client::new();

    // A burst of concurrent pings over both routes, then a few stragglers.
    let mut handles = Vec::new();
    for i in 0..10 {
        let client = client.clone();
        let path = if i % 2 == 0 { "/api/ping" } else { "/ping" };
        let url = format!("http://{addr}{path}");
        handles.push(tokio::spawn(async move {
            let response = client.get(url).send().await.unwrap();
            response.headers().contains_key("x-first-request")
        }));
    }

    let mut marked = 0;
    for handle in handles {
        if handle.await.unwrap() {
            marked += 1;
        }
    }
    for _ in 0..3 {
        let response = client
            .get(format!("http://{addr}/api/ping"))
            .send()
            .await
            .unwrap();
        if response.headers().contains_key("x-first-request") {
            marked += 1;
        }
    }

    assert_eq!(marked, 1, "exactly one response may carry the marker");
}

#[tokio::test]
async fn test_static_bundle_served_from_asset_dir() {
    let settings = Settings {
        asset_dir: asset_dir("static"),
        ..Settings::default()
    };
    let addr = start_server(settings, None, &[]).await;

    let response = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "<html>pong</html>");

    let missing = reqwest::get(format!("http://{addr}/no-such-file.js"))
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);
}

#[tokio::test]
async fn test_duplicate_regions_collapse_to_last_listed() {
    let items = vec![
        common::service_item("us-central1", "Iowa", "https://first.example.com"),
        common::service_item("us-central1", "Iowa", "https://second.example.com"),
    ];
    let addr = start_server(Settings::default(), None, &items).await;

    let body: serde_json::Value = reqwest::get(format!("http://{addr}/api/endpoints"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let object = body.as_object().unwrap();
    assert_eq!(object.len(), 1);
    assert_eq!(body["us-central1"]["URL"], "https://second.example.com");
}
