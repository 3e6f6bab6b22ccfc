//! End-to-end calls through reqwest against a mock TCP backend.

use std::sync::Arc;

use clinic_client::config::{ClinicConfig, PageLocation};
use clinic_client::http::{ApiClient, FetchError, ReqwestTransport, RequestOptions};
use clinic_client::security::{is_valid_email, sanitize_value, RateLimiter};
use serde_json::json;

mod common;

fn loopback() -> PageLocation {
    PageLocation::new("127.0.0.1", "http:")
}

/// reqwest client that ignores proxy settings from the environment.
fn client_for(config: ClinicConfig) -> ApiClient {
    let http = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();
    ApiClient::with_transport(Arc::new(config), &loopback(), Arc::new(ReqwestTransport::from_client(http)))
}

#[tokio::test]
async fn test_contact_submission_roundtrip() {
    let (addr, log) = common::start_programmable_backend(|request| async move {
        if request.target.starts_with("/backend/routes/csrf.php") {
            (200, r#"{"token":"live-token"}"#.to_string())
        } else if request.target == "/backend/routes/contact.php" {
            (200, format!(r#"{{"success":true,"echo":{}}}"#, request.body))
        } else {
            (404, r#"{"error":"not found"}"#.to_string())
        }
    })
    .await;

    let client = client_for(common::config_for(addr));
    let limiter = RateLimiter::from_config(&client.config().security);

    assert!(is_valid_email("amina@example.com"));
    assert!(limiter.can_make_request());

    let body = json!({
        "name": sanitize_value(json!("  Amina <b> ")),
        "email": "amina@example.com",
    });
    let response = client
        .send("contact", RequestOptions::new().body(body))
        .await
        .expect("backend reachable");

    assert_eq!(response["success"], true);
    assert_eq!(response["echo"]["name"], "Amina b");

    let received = log.lock().unwrap().clone();
    assert_eq!(received.len(), 2);

    let token_request = &received[0];
    assert_eq!(token_request.method, "GET");
    assert_eq!(token_request.target, "/backend/routes/csrf.php?form_id=contact_form&expiry=30");

    let contact = &received[1];
    assert_eq!(contact.method, "POST");
    assert_eq!(contact.headers["x-csrf-token"], "live-token");
    assert_eq!(contact.headers["x-requested-with"], "XMLHttpRequest");
    assert_eq!(contact.headers["content-type"], "application/json");
}

#[tokio::test]
async fn test_http_error_status_surfaces() {
    let (addr, log) = common::start_programmable_backend(|request| async move {
        if request.target.contains("csrf.php") {
            (200, r#"{"token":"t"}"#.to_string())
        } else {
            (503, r#"{"error":"maintenance"}"#.to_string())
        }
    })
    .await;

    let client = client_for(common::config_for(addr));
    let err = client
        .send("appointment", RequestOptions::new().body(json!({})))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status(503)));
    let appointment_calls = log
        .lock()
        .unwrap()
        .iter()
        .filter(|r| r.target.contains("appointment.php"))
        .count();
    assert_eq!(appointment_calls, 1);
}

#[tokio::test]
async fn test_unreachable_backend_fails_fast() {
    // Bind then drop to get a port nobody listens on.
    let addr = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let mut config = common::config_for(addr);
    config.security.enable_csrf = false;
    let client = client_for(config);

    let err = client.send("newsletter", RequestOptions::new()).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)), "got {:?}", err);
}
