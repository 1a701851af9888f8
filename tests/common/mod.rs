//! Shared utilities for integration tests.
#![allow(dead_code)]

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::broadcast;

use keychain_broadcast::events::Event;
use keychain_broadcast::keychain::{Keychain, KeychainCallback, KeychainError, KeychainMethod};

type Responder = Box<dyn Fn(KeychainMethod, &[Value]) -> (Duration, Value) + Send + Sync>;

/// In-memory wallet. Each call is answered by `responder` after the delay it returns.
pub struct ScriptedKeychain {
    responder: Responder,
    supported: Vec<KeychainMethod>,
    pub calls: Mutex<Vec<(KeychainMethod, Vec<Value>)>>,
}

impl ScriptedKeychain {
    pub fn new<F>(responder: F) -> Arc<Self>
    where
        F: Fn(KeychainMethod, &[Value]) -> (Duration, Value) + Send + Sync + 'static,
    {
        Arc::new(Self {
            responder: Box::new(responder),
            supported: vec![KeychainMethod::RequestTransfer, KeychainMethod::RequestCustomJson],
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Always answers `response` without delay.
    pub fn answering(response: Value) -> Arc<Self> {
        Self::new(move |_, _| (Duration::ZERO, response.clone()))
    }

    /// A wallet exposing only `supported`.
    pub fn limited_to(supported: Vec<KeychainMethod>, response: Value) -> Arc<Self> {
        Arc::new(Self {
            responder: Box::new(move |_, _| (Duration::ZERO, response.clone())),
            supported,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<(KeychainMethod, Vec<Value>)> {
        self.calls.lock().unwrap().clone()
    }
}

impl Keychain for ScriptedKeychain {
    fn call(
        &self,
        method: KeychainMethod,
        args: Vec<Value>,
        callback: KeychainCallback,
    ) -> Result<(), KeychainError> {
        if !self.supported.contains(&method) {
            return Err(KeychainError::UnsupportedMethod(method));
        }

        let (delay, response) = (self.responder)(method, &args);
        self.calls.lock().unwrap().push((method, args));

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback(response);
        });
        Ok(())
    }
}

/// Drain every event currently buffered in `rx`.
pub fn drain(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn names(events: &[Event]) -> Vec<String> {
    events.iter().map(|e| e.name().to_string()).collect()
}

/// Body of a raw HTTP request.
pub fn body_of(request: &str) -> &str {
    request.split_once("\r\n\r\n").map(|(_, b)| b).unwrap_or("")
}

/// Request line path of a raw HTTP request.
pub fn path_of(request: &str) -> &str {
    request.split_whitespace().nth(1).unwrap_or("")
}

/// Start a programmable HTTP backend on an ephemeral port.
///
/// `f` receives the raw request and returns `(status, body)`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let request = read_request(&mut socket).await;
                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..pos]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buf).into_owned()
}
