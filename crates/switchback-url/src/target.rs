//! The origin-form target codec.
//!
//! A request target is the `/path?query` slice of a URL. Inbound,
//! [`split_target`] cuts it into decoded path segments and the query
//! map; outbound, [`render_target`] produces the escaped string again.
//! The two directions agree: rendering a split target and splitting a
//! rendered one are identity wherever the data is representable.
//!
//! Query values stay optional through the codec. `?flag` carries no
//! value and decodes to `None`; `?flag=` decodes to `Some("")`. On the
//! way out, entries whose value is `None` are dropped entirely.

use std::collections::BTreeMap;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use switchback_core::RequestData;

/// Bytes escaped inside a path segment. `:` stays bare so template
/// placeholder tokens render readably.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

/// Bytes escaped inside a query key or value.
const QUERY: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'&')
    .add(b'=')
    .add(b'%')
    .add(b'+');

/// Split a target into decoded path segments and the query map.
pub fn split_target(target: &str) -> (Vec<String>, BTreeMap<String, Option<String>>) {
    match target.split_once('?') {
        Some((path, query)) => (parse_path(path), parse_query(query)),
        None => (parse_path(target), BTreeMap::new()),
    }
}

/// Split a path on `/`, dropping empty components and percent-decoding
/// each segment.
pub fn parse_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(decode)
        .collect()
}

/// Split a raw query string on `&` and each pair on its first `=`.
///
/// A pair with no `=` keeps a `None` value, which is what lets `?flag`
/// survive a round trip as a key without a value.
pub fn parse_query(query: &str) -> BTreeMap<String, Option<String>> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode(key), Some(decode(value))),
            None => (decode(pair), None),
        })
        .collect()
}

/// Render the target for a printed fragment, leading `/` included.
///
/// Entries whose query value is absent are dropped. An empty path
/// renders as `/`, so the empty fragment resolves to the root.
pub fn render_target(data: &RequestData) -> String {
    let path = render_path(data);
    match render_query(data) {
        Some(query) => format!("{path}?{query}"),
        None => path,
    }
}

fn render_path(data: &RequestData) -> String {
    if data.path.is_empty() {
        return "/".to_string();
    }
    let segments: Vec<String> = data
        .path
        .iter()
        .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
        .collect();
    format!("/{}", segments.join("/"))
}

fn render_query(data: &RequestData) -> Option<String> {
    let pairs: Vec<String> = data
        .query
        .iter()
        .filter_map(|(key, value)| {
            value.as_ref().map(|value| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY),
                    utf8_percent_encode(value, QUERY)
                )
            })
        })
        .collect();
    (!pairs.is_empty()).then(|| pairs.join("&"))
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
