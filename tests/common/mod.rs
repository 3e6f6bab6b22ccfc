//! Shared utilities for integration tests.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use clinic_client::config::ClinicConfig;
use clinic_client::http::{FetchError, OutgoingRequest, Transport, TransportResponse};
use futures_util::future::BoxFuture;
use reqwest::StatusCode;

/// A request as seen by the mock backend.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct ReceivedRequest {
    pub method: String,
    pub target: String,
    /// Lower-cased header names.
    pub headers: HashMap<String, String>,
    pub body: String,
}

/// Config whose local backend points at `addr`.
#[allow(dead_code)]
pub fn config_for(addr: SocketAddr) -> ClinicConfig {
    let mut config = ClinicConfig::default();
    config.backend_urls.local = format!("http://{}/backend/", addr);
    config
}

/// Start a programmable mock backend on an ephemeral port.
///
/// The handler gets each parsed request and returns `(status, body)`.
/// Every request is also appended to the returned log.
#[allow(dead_code)]
pub async fn start_programmable_backend<F, Fut>(f: F) -> (SocketAddr, Arc<Mutex<Vec<ReceivedRequest>>>)
where
    F: Fn(ReceivedRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);

    let task_log = log.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let log = task_log.clone();
                    tokio::spawn(async move {
                        let Some(request) = read_request(&mut socket).await else {
                            return;
                        };
                        log.lock().unwrap().push(request.clone());

                        let (status, body) = f(request).await;
                        let status_text = match status {
                            200 => "200 OK",
                            403 => "403 Forbidden",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
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
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

#[allow(dead_code)]
async fn read_request(socket: &mut tokio::net::TcpStream) -> Option<ReceivedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next()?.split(' ');
    let method = request_line.next()?.to_string();
    let target = request_line.next()?.to_string();

    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().to_string()))
        .collect();

    let content_length: usize = headers
        .get("content-length")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    Some(ReceivedRequest {
        method,
        target,
        headers,
        body,
    })
}

/// What the scripted transport does with a request.
#[allow(dead_code)]
pub enum Behavior {
    Respond(u16, &'static str),
    Hang,
    Fail(&'static str),
}

/// In-memory transport that records every request with its (tokio) instant.
#[allow(dead_code)]
pub struct ScriptedTransport {
    calls: Mutex<Vec<(tokio::time::Instant, OutgoingRequest)>>,
    handler: Box<dyn Fn(&OutgoingRequest, usize) -> Behavior + Send + Sync>,
}

#[allow(dead_code)]
impl ScriptedTransport {
    /// `handler` receives the request and how many earlier requests went to the same URL.
    pub fn new<H>(handler: H) -> Arc<Self>
    where
        H: Fn(&OutgoingRequest, usize) -> Behavior + Send + Sync + 'static,
    {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            handler: Box::new(handler),
        })
    }

    pub fn calls(&self) -> Vec<(tokio::time::Instant, OutgoingRequest)> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests whose URL contains `fragment`.
    pub fn calls_to(&self, fragment: &str) -> Vec<(tokio::time::Instant, OutgoingRequest)> {
        self.calls()
            .into_iter()
            .filter(|(_, r)| r.url.contains(fragment))
            .collect()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: OutgoingRequest) -> BoxFuture<'_, Result<TransportResponse, FetchError>> {
        let behavior = {
            let mut calls = self.calls.lock().unwrap();
            let previous = calls.iter().filter(|(_, r)| r.url == request.url).count();
            let behavior = (self.handler)(&request, previous);
            calls.push((tokio::time::Instant::now(), request));
            behavior
        };

        Box::pin(async move {
            match behavior {
                Behavior::Respond(status, body) => Ok(TransportResponse::new(
                    StatusCode::from_u16(status).unwrap(),
                    body.as_bytes().to_vec(),
                )),
                Behavior::Hang => std::future::pending().await,
                Behavior::Fail(reason) => Err(FetchError::Transport(reason.to_string())),
            }
        })
    }
}
