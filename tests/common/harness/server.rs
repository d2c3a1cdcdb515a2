//! Stand-in for the application's Data API, served by axum.
//!
//! Routes are matched on method and raw path; decoded query pairs are
//! recorded for assertions. Each route replays its replies in order and
//! keeps repeating the last one.

#![allow(dead_code)]

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::net::{SocketAddr, TcpListener};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;

/// A request as the stub received it.
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: String,
}

impl Recorded {
    /// First value of query parameter `name`.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// The body parsed as JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("request body was not JSON")
    }
}

type Routes = HashMap<(String, String), VecDeque<(u16, String)>>;

struct Shared {
    routes: Routes,
    recorded: Vec<Recorded>,
}

type SharedState = Arc<Mutex<Shared>>;

/// Builder for a [`StubServer`].
#[derive(Default)]
pub struct StubBuilder {
    routes: Routes,
}

impl StubBuilder {
    /// Queues a raw reply for `method path`.
    pub fn route(mut self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.routes
            .entry((method.to_string(), path.to_string()))
            .or_default()
            .push_back((status, body.to_string()));
        self
    }

    /// Queues a JSON reply for `method path`.
    pub fn json(self, method: &str, path: &str, status: u16, body: Value) -> Self {
        let body = body.to_string();
        self.route(method, path, status, &body)
    }

    /// Answers the liveness check.
    pub fn ping(self) -> Self {
        self.route("GET", "/ping", 200, "JoplinClipperServer")
    }

    pub fn start(self) -> StubServer {
        StubServer::start(self.routes)
    }
}

/// A running stub bound to an ephemeral port on 127.0.0.1.
///
/// The server shuts down when the value is dropped.
pub struct StubServer {
    addr: SocketAddr,
    shared: SharedState,
    stop: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    pub fn builder() -> StubBuilder {
        StubBuilder::default()
    }

    fn start(routes: Routes) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub server");
        listener
            .set_nonblocking(true)
            .expect("Failed to make stub listener non-blocking");
        let addr = listener.local_addr().expect("Failed to read stub address");

        let shared = Arc::new(Mutex::new(Shared {
            routes,
            recorded: Vec::new(),
        }));
        let app = Router::new()
            .fallback(reply)
            .with_state(Arc::clone(&shared));
        let (stop, stopped) = oneshot::channel::<()>();

        let handle = thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("Failed to build stub runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("Failed to adopt stub listener");
                axum::serve(listener, app)
                    .with_graceful_shutdown(async {
                        let _ = stopped.await;
                    })
                    .await
                    .expect("Stub server failed");
            });
        });

        Self {
            addr,
            shared,
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.shared.lock().expect("stub state poisoned").recorded.clone()
    }

    /// `METHOD /path` of every request received so far.
    pub fn calls(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.path))
            .collect()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Returns a port nothing is listening on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind throwaway listener");
    listener.local_addr().expect("Failed to read address").port()
}

async fn reply(
    State(shared): State<SharedState>,
    method: Method,
    uri: Uri,
    Query(query): Query<Vec<(String, String)>>,
    body: String,
) -> Response {
    let mut shared = shared.lock().expect("stub state poisoned");

    let key = (method.to_string(), uri.path().to_string());
    let (status, reply_body) = match shared.routes.get_mut(&key) {
        Some(replies) if replies.len() > 1 => replies.pop_front().unwrap_or((500, String::new())),
        Some(replies) => replies.front().cloned().unwrap_or((500, String::new())),
        None => (404, "Not Found".to_string()),
    };

    shared.recorded.push(Recorded {
        method: key.0,
        path: key.1,
        query,
        body,
    });

    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], reply_body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(server: &StubServer, target: &str) -> (u16, String) {
        let url = format!("http://127.0.0.1:{}{target}", server.port());
        let client = reqwest::blocking::Client::builder()
            .no_proxy()
            .build()
            .expect("Failed to build client");
        let response = client.get(url).send().expect("request to stub failed");
        let status = response.status().as_u16();
        (status, response.text().expect("stub body was not text"))
    }

    #[test]
    fn records_decoded_query_pairs() {
        let server = StubServer::builder().ping().start();

        get(&server, "/ping?token=abc&fields=id%2Ctitle&query=two+words");

        let request = &server.requests()[0];
        assert_eq!(request.path, "/ping");
        assert_eq!(request.query_value("token"), Some("abc"));
        assert_eq!(request.query_value("fields"), Some("id,title"));
        assert_eq!(request.query_value("query"), Some("two words"));
    }

    #[test]
    fn replays_in_order_then_repeats_last() {
        let server = StubServer::builder()
            .route("GET", "/tags", 200, "first")
            .route("GET", "/tags", 500, "second")
            .start();

        assert_eq!(get(&server, "/tags"), (200, "first".to_string()));
        assert_eq!(get(&server, "/tags"), (500, "second".to_string()));
        assert_eq!(get(&server, "/tags"), (500, "second".to_string()));
    }

    #[test]
    fn unknown_route_is_not_found() {
        let server = StubServer::builder().ping().start();

        let (status, _) = get(&server, "/notes/missing");

        assert_eq!(status, 404);
        assert_eq!(server.calls(), vec!["GET /notes/missing"]);
    }
}
