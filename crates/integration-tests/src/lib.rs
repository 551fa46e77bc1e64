//! Integration tests for Dabeeha.
//!
//! Tests drive the complete router in-process through
//! `tower::ServiceExt::oneshot` against a fresh temp-dir store, so no
//! server process or port is involved. A [`TestContext`] replays the
//! session cookie from the most recent response on every following
//! request and therefore behaves like one browser.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Test harness: a panic is a test failure.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::net::{IpAddr, Ipv4Addr};

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use dabeeha_server::catalog::Catalog;
use dabeeha_server::config::ServerConfig;
use dabeeha_server::state::AppState;
use dabeeha_server::store::Store;

/// One simulated browser against a fresh server instance.
pub struct TestContext {
    /// Shared state, exposed so tests can observe timers and accounts.
    pub state: AppState,
    app: Router,
    cookie: Option<String>,
    _data_dir: TempDir,
}

impl TestContext {
    /// Spin up a fresh server with an empty temp-dir store.
    pub async fn new() -> Self {
        let data_dir = TempDir::new().expect("temp dir");
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
            data_dir: data_dir.path().to_path_buf(),
            advisor: None,
            sentry_dsn: None,
            sentry_environment: None,
        };
        let store = Store::open(data_dir.path()).expect("open store");
        let catalog = Catalog::load(&store).await.expect("load catalog");
        let state = AppState::new(config, store, catalog);

        Self {
            app: dabeeha_server::app(state.clone()),
            state,
            cookie: None,
            _data_dir: data_dir,
        }
    }

    /// Issue one request, carrying the held session cookie if any.
    ///
    /// A `set-cookie` on the response replaces the held cookie, so the
    /// context follows session rotation transparently.
    pub async fn request(
        &mut self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie.clone());
        }
        let request = match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.expect("infallible");

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let raw = set_cookie.to_str().unwrap();
            let pair = raw.split_once(';').map_or(raw, |(pair, _)| pair);
            self.cookie = Some(pair.to_owned());
        }

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    pub async fn get(&mut self, path: &str) -> (StatusCode, Value) {
        self.request("GET", path, None).await
    }

    pub async fn post(&mut self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", path, Some(body)).await
    }

    pub async fn post_empty(&mut self, path: &str) -> (StatusCode, Value) {
        self.request("POST", path, None).await
    }

    pub async fn put(&mut self, path: &str, body: Value) -> (StatusCode, Value) {
        self.request("PUT", path, Some(body)).await
    }

    pub async fn delete(&mut self, path: &str) -> (StatusCode, Value) {
        self.request("DELETE", path, None).await
    }

    /// Register a customer and keep the session; returns the profile JSON.
    pub async fn register(&mut self, name: &str, email: &str) -> Value {
        let (status, body) = self
            .post(
                "/auth/register",
                json!({ "name": name, "email": email, "password": "secret" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        body
    }

    /// Add a product line to the cart; returns the cart view JSON.
    pub async fn add_to_cart(&mut self, product_id: &str, share: Option<u32>) -> Value {
        let (status, body) = self
            .post(
                "/cart/add",
                json!({ "product_id": product_id, "share": share }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "add to cart failed: {body}");
        body
    }
}

/// A complete, valid checkout form for the Maadi district.
#[must_use]
pub fn checkout_form(meeting_point: Option<&str>) -> Value {
    json!({
        "address": {
            "building": "12",
            "street": "Road 9",
            "district": "Maadi",
            "floor": "3",
            "meeting_point": meeting_point,
        },
        "billing": {
            "full_name": "Fatma Hassan",
            "phone": "01001234567",
        },
        "eid_day": "1st Day of Eid",
        "time_slot": "Early Morning (6 AM - 10 AM)",
    })
}

/// The nearest designated slaughter point to Maadi, used as the default
/// meeting point in happy-path checkouts.
pub const BASATEEN: &str = "Basateen Public Abattoir (Authorized)";
