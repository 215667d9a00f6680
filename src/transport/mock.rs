//! Scripted in-memory `Transport` for tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{ClientError, Result};
use crate::transport::traits::{HttpResponse, Transport};

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

enum Scripted {
    Respond(HttpResponse),
    Unreachable(String),
}

/// Replies are queued per `(method, path)`; the last reply for a route repeats.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(&'static str, String), VecDeque<Scripted>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(self, path: &str, response: HttpResponse) -> Self {
        self.push("GET", path, Scripted::Respond(response))
    }

    pub fn on_post(self, path: &str, response: HttpResponse) -> Self {
        self.push("POST", path, Scripted::Respond(response))
    }

    pub fn unreachable_get(self, path: &str, message: &str) -> Self {
        self.push("GET", path, Scripted::Unreachable(message.to_string()))
    }

    pub fn unreachable_post(self, path: &str, message: &str) -> Self {
        self.push("POST", path, Scripted::Unreachable(message.to_string()))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.path == path)
            .count()
    }

    fn push(self, method: &'static str, path: &str, reply: Scripted) -> Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    fn reply(
        &self,
        method: &'static str,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            path: path.to_string(),
            body,
        });

        let mut routes = self.routes.lock().unwrap();
        let queue = match routes.get_mut(&(method, path.to_string())) {
            Some(queue) => queue,
            None => return Ok(HttpResponse::new(404, r#"{"detail":"Not Found"}"#)),
        };
        let scripted = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().map(|s| match s {
                Scripted::Respond(r) => Scripted::Respond(r.clone()),
                Scripted::Unreachable(m) => Scripted::Unreachable(m.clone()),
            })
        };

        match scripted {
            Some(Scripted::Respond(response)) => Ok(response),
            Some(Scripted::Unreachable(message)) => Err(ClientError::Transport(message)),
            None => Ok(HttpResponse::new(404, Vec::new())),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<HttpResponse> {
        self.reply("GET", path, None)
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<HttpResponse> {
        self.reply("POST", path, Some(body))
    }
}
