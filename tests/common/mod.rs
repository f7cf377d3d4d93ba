//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Start a mock control-plane backend on an ephemeral port.
///
/// Answers the metadata-server token path with a static token and every
/// other path with `list_body` at `list_status`, so one address can stand
/// in for both endpoints the client talks to. Returns the bound address.
pub async fn start_control_plane(list_status: u16, list_body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let list_body = Arc::new(list_body);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let list_body = list_body.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]);

                        let (status, body) = if head.contains("/computeMetadata/v1/") {
                            (
                                200,
                                r#"{"access_token":"test-token","expires_in":3599,"token_type":"Bearer"}"#
                                    .to_string(),
                            )
                        } else {
                            (list_status, list_body.as_ref().clone())
                        };

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

fn status_text(status: u16) -> &'static str {
    match status {
        200 => "200 OK",
        401 => "401 Unauthorized",
        403 => "403 Forbidden",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    }
}

/// JSON for one nested service item the way the control plane lists it.
#[allow(dead_code)]
pub fn service_item(region: &str, region_name: &str, url: &str) -> serde_json::Value {
    serde_json::json!({
        "metadata": {
            "name": format!("ping-{region}"),
            "labels": { "cloud.googleapis.com/location": region }
        },
        "status": { "address": { "url": url } },
        "spec": {
            "template": {
                "metadata": { "annotations": { "region-name": region_name } }
            }
        }
    })
}

/// A full list-call response body around `items`.
#[allow(dead_code)]
pub fn list_response(items: &[serde_json::Value]) -> String {
    serde_json::json!({ "items": items }).to_string()
}
