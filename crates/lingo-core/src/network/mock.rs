//! Mock transport for testing
//!
//! Replays scripted responses instead of talking to the platform, and records
//! every request it sees so tests can assert on headers, bodies and ordering.

use std::cell::RefCell;
use std::collections::VecDeque;

use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::network::{ApiRequest, ApiResponse, Method, Transport};

/// Host the mock answers for. Pair with `ClientConfig::with_base_url`.
pub const MOCK_BASE_URL: &str = "http://mock";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathMatch {
    Exact,
    Prefix,
}

#[derive(Debug)]
struct Route {
    method: Method,
    path: String,
    matching: PathMatch,
    /// The last response is repeated once the queue is down to one entry.
    responses: VecDeque<ApiResponse>,
}

impl Route {
    fn matches(&self, request: &ApiRequest) -> bool {
        if request.method != self.method {
            return false;
        }
        let Some(path) = request.url.strip_prefix(MOCK_BASE_URL) else {
            return false;
        };
        match self.matching {
            PathMatch::Exact => path == self.path,
            PathMatch::Prefix => path.starts_with(&self.path),
        }
    }

    fn next_response(&mut self) -> ApiResponse {
        if self.responses.len() > 1 {
            self.responses.pop_front().unwrap_or_else(not_found)
        } else {
            self.responses.front().cloned().unwrap_or_else(not_found)
        }
    }
}

fn not_found() -> ApiResponse {
    ApiResponse::new(404, "")
}

/// Scripted in-memory server.
///
/// Routes are tried in registration order; unmatched requests get a 404.
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: RefCell<Vec<Route>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method path` (exact match, query included) with `response`.
    pub fn on(self, method: Method, path: &str, response: ApiResponse) -> Self {
        self.on_sequence(method, path, vec![response])
    }

    /// Answer `method path` with 200 and the given JSON body.
    pub fn on_json(self, method: Method, path: &str, body: JsonValue) -> Self {
        self.on(method, path, ApiResponse::json(200, &body))
    }

    /// Answer successive matching requests with successive responses.
    pub fn on_sequence(self, method: Method, path: &str, responses: Vec<ApiResponse>) -> Self {
        self.push_route(method, path, PathMatch::Exact, responses)
    }

    /// Answer every request whose path starts with `prefix`.
    pub fn on_prefix(self, method: Method, prefix: &str, response: ApiResponse) -> Self {
        self.push_route(method, prefix, PathMatch::Prefix, vec![response])
    }

    fn push_route(
        self,
        method: Method,
        path: &str,
        matching: PathMatch,
        responses: Vec<ApiResponse>,
    ) -> Self {
        self.routes.borrow_mut().push(Route {
            method,
            path: path.to_string(),
            matching,
            responses: responses.into(),
        });
        self
    }

    /// Every request sent so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    /// Requests sent to a path (exact match), in order.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        let url = format!("{}{}", MOCK_BASE_URL, path);
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .cloned()
            .collect()
    }

    /// Requests whose path starts with `prefix`, in order.
    pub fn requests_with_prefix(&self, method: Method, prefix: &str) -> Vec<ApiRequest> {
        let url = format!("{}{}", MOCK_BASE_URL, prefix);
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.method == method && r.url.starts_with(&url))
            .cloned()
            .collect()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.requests.borrow_mut().push(request.clone());

        let mut routes = self.routes.borrow_mut();
        let response = routes
            .iter_mut()
            .find(|route| route.matches(request))
            .map(Route::next_response)
            .unwrap_or_else(not_found);
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get(path: &str) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            url: format!("{}{}", MOCK_BASE_URL, path),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn test_unmatched_is_not_found() {
        let mock = MockTransport::new();
        assert_eq!(mock.send(&get("/nothing")).unwrap().status, 404);
        assert_eq!(mock.requests().len(), 1);
    }

    #[test]
    fn test_sequence_repeats_last() {
        let mock = MockTransport::new().on_sequence(
            Method::Get,
            "/users/a",
            vec![ApiResponse::new(200, "1"), ApiResponse::new(200, "2")],
        );
        assert_eq!(mock.send(&get("/users/a")).unwrap().body, "1");
        assert_eq!(mock.send(&get("/users/a")).unwrap().body, "2");
        assert_eq!(mock.send(&get("/users/a")).unwrap().body, "2");
    }

    #[test]
    fn test_prefix_route() {
        let mock = MockTransport::new().on_json(Method::Get, "/exact", json!(1)).on_prefix(
            Method::Get,
            "/pre",
            ApiResponse::new(200, "p"),
        );
        assert_eq!(mock.send(&get("/prefix?x=1")).unwrap().body, "p");
        assert_eq!(mock.send(&get("/exact")).unwrap().body, "1");
        assert_eq!(mock.send(&get("/exact?x")).unwrap().status, 404);
        assert_eq!(mock.requests_with_prefix(Method::Get, "/pre").len(), 1);
    }
}
