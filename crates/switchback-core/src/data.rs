//! The request abstraction routers run over.
//!
//! A [`RequestData`] is the whole of what a route grammar can see: an
//! optional method, ordered path segments, a query mapping, and an
//! optional body. Parsing consumes pieces of it and returns the
//! remainder; printing produces fragments of it that are combined with
//! [`RequestData::concat`]. Both directions speak this one value, which
//! is what keeps them from drifting apart.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The HTTP methods a route grammar can guard on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

/// Raised by [`Method::from_str`] on an unrecognized method string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized HTTP method: {0}")]
pub struct ParseMethodError(pub String);

impl Method {
    /// The uppercase wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
        }
    }
}

impl Default for Method {
    /// An absent or unrecognized method reads as GET.
    fn default() -> Self {
        Method::Get
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = ParseMethodError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            "HEAD" => Ok(Method::Head),
            "OPTIONS" => Ok(Method::Options),
            other => Err(ParseMethodError(other.to_string())),
        }
    }
}

/// The decoded request surface a router consumes and a printer emits.
///
/// Path segments are stored already decoded and never empty (the URL
/// adapter filters empties when it splits a target). The query map keeps
/// values optional so `?flag` and `?flag=` stay distinguishable from an
/// absent key; entries whose value is `None` are dropped again when a
/// target is rendered. Iteration order of the map is the key order, so
/// printed output is deterministic regardless of input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestData {
    pub method: Option<Method>,
    pub path: Vec<String>,
    pub query: BTreeMap<String, Option<String>>,
    pub body: Option<Vec<u8>>,
}

impl RequestData {
    /// Append two fragments.
    ///
    /// Paths concatenate in order. Query maps merge with the left side
    /// winning a key collision. Method and body take the first present
    /// value. `RequestData::default()` is the identity on both sides.
    pub fn concat(self, other: RequestData) -> RequestData {
        let mut query = self.query;
        for (key, value) in other.query {
            query.entry(key).or_insert(value);
        }
        let mut path = self.path;
        path.extend(other.path);
        RequestData {
            method: self.method.or(other.method),
            path,
            query,
            body: self.body.or(other.body),
        }
    }

    /// Split off the first path segment, or `None` when the path is
    /// empty. The single consumption primitive behind the literal and
    /// typed-segment routers.
    pub fn take_leading_segment(mut self) -> Option<(String, RequestData)> {
        if self.path.is_empty() {
            return None;
        }
        let head = self.path.remove(0);
        Some((head, self))
    }
}
