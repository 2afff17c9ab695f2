//! Shared utilities for integration tests: a tiny HTTP server driven by a
//! handler closure, enough to stand in for a JSON-RPC node or an explorer API.

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A request as seen by the mock.
#[derive(Debug, Clone)]
pub struct MockRequest {
    #[allow(dead_code)]
    pub method: String,
    #[allow(dead_code)]
    pub path: String,
    pub body: String,
}

/// Start a mock server on an ephemeral port. The handler returns
/// `(status, json_body)` for each request.
pub async fn start_mock_server<F>(handler: F) -> SocketAddr
where
    F: Fn(MockRequest) -> (u16, String) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let handler = handler.clone();
                    tokio::spawn(async move {
                        if let Some(request) = read_request(socket).await {
                            let (request, mut socket) = request;
                            let (status, body) = handler(request);
                            let status_text = match status {
                                200 => "200 OK",
                                400 => "400 Bad Request",
                                500 => "500 Internal Server Error",
                                _ => "200 OK",
                            };
                            let response = format!(
                                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                                status_text,
                                body.len(),
                                body
                            );
                            let _ = socket.write_all(response.as_bytes()).await;
                            let _ = socket.shutdown().await;
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request(mut socket: TcpStream) -> Option<(MockRequest, TcpStream)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();
    Some((MockRequest { method, path, body }, socket))
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Answer a JSON-RPC request with `result`, echoing its id.
#[allow(dead_code)]
pub fn rpc_result(request: &MockRequest, result: serde_json::Value) -> (u16, String) {
    let parsed: serde_json::Value = serde_json::from_str(&request.body).unwrap_or_default();
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "id": parsed.get("id").cloned().unwrap_or(serde_json::Value::from(0)),
        "result": result,
    });
    (200, body.to_string())
}

/// The JSON-RPC method named in a request body.
#[allow(dead_code)]
pub fn rpc_method(request: &MockRequest) -> String {
    serde_json::from_str::<serde_json::Value>(&request.body)
        .ok()
        .and_then(|v| v.get("method").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_default()
}
