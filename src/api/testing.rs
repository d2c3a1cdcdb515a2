//! In-memory transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::transport::{Request, Response, Transport, TransportError};

enum Reply {
    Response(Response),
    Failure(String),
}

/// Replays canned replies in order and records every request.
///
/// Running out of replies is reported as a transport failure, so a test
/// that issues more requests than it scripted fails loudly.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<Request>>,
}

impl std::fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedTransport")
            .field("pending", &self.replies.borrow().len())
            .field("requests", &self.requests.borrow().len())
            .finish()
    }
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Response(Response::new(status, body)));
        self
    }

    pub(crate) fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        let body = body.to_string();
        self.respond(status, &body)
    }

    /// Scripts a failure that never reaches the service.
    pub(crate) fn fail(self, message: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Reply::Failure(message.to_string()));
        self
    }

    /// Every request sent so far, in order.
    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    /// Paths of every request sent so far, in order.
    pub(crate) fn paths(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.path.clone()).collect()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &Request) -> Result<Response, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        let failure = |message: String| TransportError {
            method: request.method,
            url: format!("http://localhost:{}{}", request.port, request.path),
            source: message.into(),
        };
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(message)) => Err(failure(message)),
            None => Err(failure("no scripted reply left".to_string())),
        }
    }
}
