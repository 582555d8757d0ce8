//! Recording transport serving canned pages, for driver tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use super::{Params, Transport};
use crate::error::{Result, TransportError};

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: &'static str,
    pub path: String,
    pub params: Vec<(String, String)>,
}

impl Request {
    /// Value of a parameter, if present.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// In-memory transport.
///
/// Each path has a queue of bodies; the last one is repeated once the
/// queue is drained. Paths without a body answer with an empty page, and
/// paths marked failing answer with HTTP 500.
#[derive(Default)]
pub struct MockTransport {
    pages: Mutex<HashMap<String, VecDeque<String>>>,
    failing: Mutex<Vec<String>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a body for `path`.
    pub fn page(self, path: &str, body: impl Into<String>) -> Self {
        self.pages
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(body.into());
        self
    }

    /// Make every request to `path` fail with HTTP 500.
    pub fn failing(self, path: &str) -> Self {
        self.failing.lock().unwrap().push(path.to_string());
        self
    }

    /// All requests seen so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Requests seen for one path.
    pub fn requests_to(&self, path: &str) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    fn respond(&self, method: &'static str, path: &str, params: &Params) -> Result<String> {
        self.requests.lock().unwrap().push(Request {
            method,
            path: path.to_string(),
            params: params.to_vec(),
        });

        if self.failing.lock().unwrap().iter().any(|p| p == path) {
            return Err(TransportError::Status {
                url: format!("http://mock/{}", path),
                status: 500,
            }
            .into());
        }

        let mut pages = self.pages.lock().unwrap();
        let body = match pages.get_mut(path) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().cloned().unwrap_or_default(),
            None => String::new(),
        };
        Ok(body)
    }
}

impl Transport for MockTransport {
    fn host(&self) -> &str {
        "mock"
    }

    async fn get(&self, path: &str, query: &Params) -> Result<String> {
        self.respond("GET", path, query)
    }

    async fn post_form(&self, path: &str, form: &Params) -> Result<String> {
        self.respond("POST", path, form)
    }
}
