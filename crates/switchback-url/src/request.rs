//! Transport-level requests.

use serde::{Deserialize, Serialize};
use switchback_core::{Method, RequestData};

use crate::target::{render_target, split_target};

/// A minimal transport request: a method, a request target in origin
/// form (`/path?query`), and an optional body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: Method,
    pub target: String,
    pub body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Request {
            method,
            target: target.into(),
            body: None,
        }
    }

    /// A GET request for `target`.
    pub fn get(target: impl Into<String>) -> Self {
        Request::new(Method::Get, target)
    }

    /// A POST request for `target`.
    pub fn post(target: impl Into<String>) -> Self {
        Request::new(Method::Post, target)
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

/// Decode a request into the data routers consume.
pub fn request_data(request: &Request) -> RequestData {
    let (path, query) = split_target(&request.target);
    RequestData {
        method: Some(request.method),
        path,
        query,
        body: request.body.clone(),
    }
}

/// Render printed data as a request, defaulting an absent method to
/// GET.
pub fn request_from(data: &RequestData) -> Request {
    Request {
        method: data.method.unwrap_or_default(),
        target: render_target(data),
        body: data.body.clone(),
    }
}
