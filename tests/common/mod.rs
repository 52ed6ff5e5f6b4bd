//! Shared utilities for integration testing.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use redirector::config::{RedirectorConfig, RuleConfig};
use redirector::http::ServerError;
use redirector::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A next handler answering `418` with body "next", counting its calls.
#[allow(dead_code)]
pub fn counting_next(
    calls: Arc<AtomicUsize>,
) -> impl tower::Service<Request<Body>, Response = Response<Body>, Error = Infallible> + Clone {
    tower::service_fn(move |_req: Request<Body>| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            let mut response = Response::new(Body::from("next"));
            *response.status_mut() = StatusCode::IM_A_TEAPOT;
            Ok::<_, Infallible>(response)
        }
    })
}

/// Read a response body to a string.
#[allow(dead_code)]
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Build a rule entry the way it would come out of a config file.
#[allow(dead_code)]
pub fn rule(from_path: &str, to: &str, code: u16) -> RuleConfig {
    RuleConfig {
        from_scheme: String::new(),
        from_path: from_path.to_string(),
        to: to.to_string(),
        code,
        meta: false,
    }
}

/// Start a plain HTTP server on an ephemeral port.
#[allow(dead_code)]
pub async fn spawn_server(
    config: RedirectorConfig,
) -> (SocketAddr, Shutdown, JoinHandle<Result<(), ServerError>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.serve(listener, rx).await });

    (addr, shutdown, handle)
}

/// HTTP client that reports redirects instead of following them.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
