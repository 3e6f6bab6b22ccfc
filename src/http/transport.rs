//! Network transport seam.
//!
//! `ApiClient` talks to the backend through `Transport` so the retry and
//! CSRF logic can run against an in-memory fake in tests.

use futures_util::future::BoxFuture;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};

use crate::http::error::FetchError;

/// A fully resolved request, ready to put on the wire.
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

/// Status and buffered body of a response.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends a single request. Implementations must not retry or time out on
/// their own; `ApiClient` owns both.
pub trait Transport: Send + Sync {
    fn send(&self, request: OutgoingRequest) -> BoxFuture<'_, Result<TransportResponse, FetchError>>;
}

/// Production transport backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("clinic-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: OutgoingRequest) -> BoxFuture<'_, Result<TransportResponse, FetchError>> {
        Box::pin(async move {
            let mut builder = self
                .client
                .request(request.method, &request.url)
                .headers(request.headers);
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await?;
            let status = response.status();
            let body = response.bytes().await?;

            Ok(TransportResponse {
                status,
                body: body.to_vec(),
            })
        })
    }
}
